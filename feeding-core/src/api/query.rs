use chrono::NaiveDate;

/// Optional filter and pagination window for list endpoints.
///
/// Only the fields that are set end up in the query string; zero pages and
/// page sizes count as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Query string for the farm listing, which also filters by date.
    pub(crate) fn farm_query(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(from) = self.from_date {
            pairs.push(("fromDate", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_date {
            pairs.push(("toDate", to.format("%Y-%m-%d").to_string()));
        }
        self.push_paging(&mut pairs);
        encode(&pairs)
    }

    /// Query string for batch, product and animal listings.
    pub(crate) fn paging_query(&self) -> String {
        let mut pairs = Vec::new();
        self.push_paging(&mut pairs);
        encode(&pairs)
    }

    fn push_paging(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            pairs.push(("pageSize", size.to_string()));
        }
    }
}

/// `?a=1&b=2`, or an empty string when there is nothing to send.
fn encode(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_send_nothing() {
        let params = ListParams::new();
        assert_eq!(params.farm_query(), "");
        assert_eq!(params.paging_query(), "");
    }

    #[test]
    fn test_farm_query_keeps_declared_order() {
        let params = ListParams::new()
            .page_size(20)
            .from_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .page(2)
            .to_date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());

        assert_eq!(
            params.farm_query(),
            "?fromDate=2024-05-01&toDate=2024-05-31&page=2&pageSize=20"
        );
    }

    #[test]
    fn test_paging_query_ignores_dates() {
        let params = ListParams::new()
            .from_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .page(3);
        assert_eq!(params.paging_query(), "?page=3");
    }

    #[test]
    fn test_only_present_fields_are_sent() {
        let params = ListParams::new().page_size(50);
        assert_eq!(params.farm_query(), "?pageSize=50");
    }

    #[test]
    fn test_zero_paging_counts_as_unset() {
        let params = ListParams::new().page(0).page_size(0);
        assert_eq!(params.paging_query(), "");
    }
}
