use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminator chosen on the event form: does the feeding go to a single
/// animal or to a whole batch?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetType {
    #[default]
    Animal,
    Batch,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Animal => write!(f, "Animal"),
            TargetType::Batch => write!(f, "Batch"),
        }
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "animal" => Ok(TargetType::Animal),
            "batch" | "lote" => Ok(TargetType::Batch),
            _ => Err(format!(
                "Invalid target type '{}'. Valid options: animal, batch",
                s
            )),
        }
    }
}

/// What a feeding event was given to. Exactly one of animal or batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Animal(i64),
    Batch(i64),
}

impl Target {
    pub fn new(target_type: TargetType, id: i64) -> Self {
        match target_type {
            TargetType::Animal => Target::Animal(id),
            TargetType::Batch => Target::Batch(id),
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            Target::Animal(_) => TargetType::Animal,
            Target::Batch(_) => TargetType::Batch,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Target::Animal(id) | Target::Batch(id) => *id,
        }
    }

    pub fn animal_id(&self) -> Option<i64> {
        match self {
            Target::Animal(id) => Some(*id),
            Target::Batch(_) => None,
        }
    }

    pub fn batch_id(&self) -> Option<i64> {
        match self {
            Target::Batch(id) => Some(*id),
            Target::Animal(_) => None,
        }
    }

    /// Rebuilds a target from the nullable wire pair.
    fn from_wire(animal_id: Option<i64>, batch_id: Option<i64>) -> Result<Self, String> {
        match (animal_id, batch_id) {
            (Some(id), None) => Ok(Target::Animal(id)),
            (None, Some(id)) => Ok(Target::Batch(id)),
            (Some(a), Some(b)) => Err(format!(
                "feeding event targets both animal {} and batch {}",
                a, b
            )),
            (None, None) => Err("feeding event has neither animalId nor batchId".to_string()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Animal(id) => write!(f, "Animal {}", id),
            Target::Batch(id) => write!(f, "Lote {}", id),
        }
    }
}

/// Lifecycle flag. Cancellation is a soft delete on the server.
///
/// Accepts the status by name (any case) or as a numeric code. Anything
/// else reads as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StatusWire")]
pub enum EventStatus {
    #[default]
    Active,
    Cancelled,
    Unknown,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Active => write!(f, "active"),
            EventStatus::Cancelled => write!(f, "cancelled"),
            EventStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusWire {
    Name(String),
    Code(i64),
}

impl From<StatusWire> for EventStatus {
    fn from(wire: StatusWire) -> Self {
        match wire {
            StatusWire::Name(name) => match name.to_lowercase().as_str() {
                "active" => EventStatus::Active,
                "cancelled" | "canceled" => EventStatus::Cancelled,
                _ => EventStatus::Unknown,
            },
            StatusWire::Code(0) => EventStatus::Active,
            StatusWire::Code(1) => EventStatus::Cancelled,
            StatusWire::Code(_) => EventStatus::Unknown,
        }
    }
}

/// A feeding event as owned by the remote resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeedingEventWire", into = "FeedingEventWire")]
pub struct FeedingEvent {
    pub id: i64,
    pub farm_id: i64,
    pub date: DateTime<Utc>,
    /// kg or L, the unit is implicit
    pub quantity: f64,
    pub product_id: i64,
    pub target: Target,
    /// May be computed by the server
    pub cost: Option<f64>,
    pub status: EventStatus,
    /// Display names joined in by the backend, when it sends them
    pub product_name: Option<String>,
    pub animal_name: Option<String>,
    pub batch_name: Option<String>,
}

impl FeedingEvent {
    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }

    pub fn product_label(&self) -> &str {
        self.product_name.as_deref().unwrap_or("Producto desconocido")
    }

    /// "Animal: <name>" or "Lote: <name>", with "N/A" for a missing name.
    pub fn target_label(&self) -> String {
        let (kind, name) = match self.target {
            Target::Animal(_) => ("Animal", &self.animal_name),
            Target::Batch(_) => ("Lote", &self.batch_name),
        };
        format!("{}: {}", kind, name.as_deref().unwrap_or("N/A"))
    }

    /// Case-insensitive match on the product, animal or batch name. Events
    /// without names only match an empty term.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        term.is_empty()
            || [&self.product_name, &self.animal_name, &self.batch_name]
                .into_iter()
                .flatten()
                .any(|name| name.to_lowercase().contains(&term))
    }
}

impl fmt::Display for FeedingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<6} {}  {:<24} {:<20} {:>8} kg  ${:.2}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.product_label(),
            self.target_label(),
            self.quantity,
            self.cost.unwrap_or(0.0)
        )?;
        if self.is_cancelled() {
            write!(f, "  [{}]", self.status)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedingEventWire {
    id: i64,
    farm_id: i64,
    #[serde(with = "wire_datetime")]
    date: DateTime<Utc>,
    quantity: f64,
    product_id: i64,
    #[serde(default)]
    animal_id: Option<i64>,
    #[serde(default)]
    batch_id: Option<i64>,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    animal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    batch_name: Option<String>,
}

impl TryFrom<FeedingEventWire> for FeedingEvent {
    type Error = String;

    fn try_from(wire: FeedingEventWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id,
            farm_id: wire.farm_id,
            date: wire.date,
            quantity: wire.quantity,
            product_id: wire.product_id,
            target: Target::from_wire(wire.animal_id, wire.batch_id)?,
            cost: wire.cost,
            status: wire.status.unwrap_or_default(),
            product_name: wire.product_name,
            animal_name: wire.animal_name,
            batch_name: wire.batch_name,
        })
    }
}

impl From<FeedingEvent> for FeedingEventWire {
    fn from(event: FeedingEvent) -> Self {
        Self {
            id: event.id,
            farm_id: event.farm_id,
            date: event.date,
            quantity: event.quantity,
            product_id: event.product_id,
            animal_id: event.target.animal_id(),
            batch_id: event.target.batch_id(),
            cost: event.cost,
            status: Some(event.status),
            product_name: event.product_name,
            animal_name: event.animal_name,
            batch_name: event.batch_name,
        }
    }
}

/// Payload for creating a feeding event.
///
/// Serializes to the flat body the backend expects, with the unused target
/// field sent as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "CreateEventBody")]
pub struct NewFeedingEvent {
    pub farm_id: i64,
    pub date: DateTime<Utc>,
    pub quantity: f64,
    pub product_id: i64,
    pub target: Target,
}

impl NewFeedingEvent {
    pub fn new(
        farm_id: i64,
        date: DateTime<Utc>,
        quantity: f64,
        product_id: i64,
        target: Target,
    ) -> Self {
        Self {
            farm_id,
            date,
            quantity,
            product_id,
            target,
        }
    }

    /// Builds the payload from form-level input. A calendar date becomes
    /// midnight UTC of that day.
    pub fn from_form(
        farm_id: i64,
        date: NaiveDate,
        target_type: TargetType,
        target_id: i64,
        product_id: i64,
        quantity: f64,
    ) -> Self {
        Self::new(
            farm_id,
            date.and_time(NaiveTime::MIN).and_utc(),
            quantity,
            product_id,
            Target::new(target_type, target_id),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventBody {
    farm_id: i64,
    #[serde(with = "wire_datetime")]
    date: DateTime<Utc>,
    quantity: f64,
    product_id: i64,
    animal_id: Option<i64>,
    batch_id: Option<i64>,
}

impl From<NewFeedingEvent> for CreateEventBody {
    fn from(event: NewFeedingEvent) -> Self {
        Self {
            farm_id: event.farm_id,
            date: event.date,
            quantity: event.quantity,
            product_id: event.product_id,
            animal_id: event.target.animal_id(),
            batch_id: event.target.batch_id(),
        }
    }
}

/// ISO-8601 timestamps as the backend sends them. Offsets are optional on
/// input (missing means UTC); output always carries millis and `Z`.
mod wire_datetime {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_animal_target_sends_null_batch() {
        let event = NewFeedingEvent::from_form(3, may_first(), TargetType::Animal, 17, 9, 12.5);
        let body = serde_json::to_value(&event).unwrap();

        assert_eq!(
            body,
            json!({
                "farmId": 3,
                "date": "2024-05-01T00:00:00.000Z",
                "quantity": 12.5,
                "productId": 9,
                "animalId": 17,
                "batchId": null
            })
        );
    }

    #[test]
    fn test_batch_target_sends_null_animal() {
        let event = NewFeedingEvent::from_form(3, may_first(), TargetType::Batch, 4, 9, 80.0);
        let body = serde_json::to_value(&event).unwrap();

        assert_eq!(body["batchId"], json!(4));
        assert!(body["animalId"].is_null());
        assert!(body.as_object().unwrap().contains_key("animalId"));
    }

    #[test]
    fn test_target_type_from_str() {
        assert_eq!(TargetType::from_str("Animal").unwrap(), TargetType::Animal);
        assert_eq!(TargetType::from_str("BATCH").unwrap(), TargetType::Batch);
        assert_eq!(TargetType::from_str("lote").unwrap(), TargetType::Batch);
        assert!(TargetType::from_str("herd").is_err());
    }

    #[test]
    fn test_deserialize_server_event() {
        let event: FeedingEvent = serde_json::from_value(json!({
            "id": 41,
            "farmId": 3,
            "date": "2024-05-01T06:30:00Z",
            "quantity": 25.0,
            "productId": 9,
            "animalId": null,
            "batchId": 4,
            "cost": 45.5,
            "status": "Active",
            "productName": "Concentrado 18%",
            "batchName": "Lote Norte"
        }))
        .unwrap();

        assert_eq!(event.id, 41);
        assert_eq!(event.product_name.as_deref(), Some("Concentrado 18%"));
        assert_eq!(event.batch_name.as_deref(), Some("Lote Norte"));
        assert_eq!(event.animal_name, None);
        assert_eq!(event.target, Target::Batch(4));
        assert_eq!(event.cost, Some(45.5));
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.date, Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_deserialize_offsetless_date_and_missing_status() {
        let event: FeedingEvent = serde_json::from_value(json!({
            "id": 1,
            "farmId": 3,
            "date": "2024-05-01T08:00:00.123",
            "quantity": 2.0,
            "productId": 9,
            "animalId": 17
        }))
        .unwrap();

        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.cost, None);
        assert_eq!(event.date.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn test_deserialize_cancelled_spellings() {
        for status in ["Cancelled", "Canceled"] {
            let event: FeedingEvent = serde_json::from_value(json!({
                "id": 1, "farmId": 3, "date": "2024-05-01", "quantity": 1.0,
                "productId": 9, "animalId": 17, "status": status
            }))
            .unwrap();
            assert!(event.is_cancelled());
        }
    }

    #[test]
    fn test_deserialize_lenient_status() {
        for (status, expected) in [
            (json!("ACTIVE"), EventStatus::Active),
            (json!(0), EventStatus::Active),
            (json!(1), EventStatus::Cancelled),
            (json!("Completed"), EventStatus::Unknown),
            (json!(7), EventStatus::Unknown),
        ] {
            let event: FeedingEvent = serde_json::from_value(json!({
                "id": 1, "farmId": 3, "date": "2024-05-01", "quantity": 1.0,
                "productId": 9, "animalId": 17, "status": status.clone()
            }))
            .unwrap();
            assert_eq!(event.status, expected, "{}", status);
        }
    }

    #[test]
    fn test_deserialize_rejects_ambiguous_target() {
        let both = serde_json::from_value::<FeedingEvent>(json!({
            "id": 1, "farmId": 3, "date": "2024-05-01", "quantity": 1.0,
            "productId": 9, "animalId": 17, "batchId": 4
        }));
        assert!(both.is_err());

        let neither = serde_json::from_value::<FeedingEvent>(json!({
            "id": 1, "farmId": 3, "date": "2024-05-01", "quantity": 1.0, "productId": 9
        }));
        assert!(neither.is_err());
    }

    #[test]
    fn test_display_marks_cancelled() {
        let mut event = FeedingEvent {
            id: 7,
            farm_id: 3,
            date: may_first().and_time(NaiveTime::MIN).and_utc(),
            quantity: 10.0,
            product_id: 2,
            target: Target::Animal(5),
            cost: None,
            status: EventStatus::Active,
            product_name: None,
            animal_name: None,
            batch_name: None,
        };
        let line = event.to_string();
        assert!(line.contains("2024-05-01"));
        assert!(line.contains("Producto desconocido"));
        assert!(line.contains("Animal: N/A"));
        assert!(!line.contains("cancelled"));

        event.status = EventStatus::Cancelled;
        assert!(event.to_string().contains("[cancelled]"));
    }

    fn named_event() -> FeedingEvent {
        serde_json::from_value(json!({
            "id": 8, "farmId": 3, "date": "2024-05-01", "quantity": 4.0,
            "productId": 9, "animalId": 17,
            "productName": "Heno de alfalfa", "animalName": "Clara"
        }))
        .unwrap()
    }

    #[test]
    fn test_display_uses_names() {
        let line = named_event().to_string();
        assert!(line.contains("Heno de alfalfa"));
        assert!(line.contains("Animal: Clara"));
    }

    #[test]
    fn test_matches_product_or_animal_name() {
        let event = named_event();
        assert!(event.matches("ALFALFA"));
        assert!(event.matches("clar"));
        assert!(event.matches(""));
        assert!(!event.matches("maíz"));
    }

    #[test]
    fn test_names_survive_round_trip() {
        let event = named_event();
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(body["animalName"], json!("Clara"));
        assert!(body.get("batchName").is_none());
    }

    #[test]
    fn test_parse_rejects_garbage_date() {
        assert!(wire_datetime::parse("yesterday").is_none());
    }
}
