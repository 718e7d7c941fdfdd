use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimalType {
    #[default]
    Bovino,
    Porcino,
    Ovino,
    Equino,
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalType::Bovino => write!(f, "Bovino"),
            AnimalType::Porcino => write!(f, "Porcino"),
            AnimalType::Ovino => write!(f, "Ovino"),
            AnimalType::Equino => write!(f, "Equino"),
        }
    }
}

impl FromStr for AnimalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bovino" => Ok(AnimalType::Bovino),
            "porcino" => Ok(AnimalType::Porcino),
            "ovino" => Ok(AnimalType::Ovino),
            "equino" => Ok(AnimalType::Equino),
            _ => Err(format!(
                "Invalid animal type '{}'. Valid options: bovino, porcino, ovino, equino",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlanStatus {
    #[default]
    Activo,
    Inactivo,
    Borrador,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Activo => write!(f, "Activo"),
            PlanStatus::Inactivo => write!(f, "Inactivo"),
            PlanStatus::Borrador => write!(f, "Borrador"),
        }
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activo" => Ok(PlanStatus::Activo),
            "inactivo" => Ok(PlanStatus::Inactivo),
            "borrador" => Ok(PlanStatus::Borrador),
            _ => Err(format!(
                "Invalid plan status '{}'. Valid options: activo, inactivo, borrador",
                s
            )),
        }
    }
}

/// A reusable nutrition regimen. Held only in memory for now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingPlan {
    /// Empty until the plan store assigns one
    pub id: String,
    pub name: String,
    pub animal_type: AnimalType,
    pub age_group: String,
    pub feeds_per_day: u32,
    /// Free form, e.g. "25 kg"
    pub total_daily: String,
    /// Free form, e.g. "$45.00"
    pub cost: String,
    pub animals_assigned: u32,
    pub status: PlanStatus,
}

impl FeedingPlan {
    /// A plan with the same defaults the plan form starts from.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            animal_type: AnimalType::Bovino,
            age_group: String::new(),
            feeds_per_day: 1,
            total_daily: String::new(),
            cost: String::new(),
            animals_assigned: 0,
            status: PlanStatus::Activo,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_animal_type(mut self, animal_type: AnimalType) -> Self {
        self.animal_type = animal_type;
        self
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = age_group.into();
        self
    }

    pub fn with_feeds_per_day(mut self, feeds_per_day: u32) -> Self {
        self.feeds_per_day = feeds_per_day;
        self
    }

    pub fn with_total_daily(mut self, total_daily: impl Into<String>) -> Self {
        self.total_daily = total_daily.into();
        self
    }

    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = cost.into();
        self
    }

    pub fn with_animals_assigned(mut self, animals_assigned: u32) -> Self {
        self.animals_assigned = animals_assigned;
        self
    }

    pub fn with_status(mut self, status: PlanStatus) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive match on name or animal type.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.animal_type.to_string().to_lowercase().contains(&term)
    }

    /// Copies every field set on `update` onto this plan.
    pub fn apply(&mut self, update: PlanUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(animal_type) = update.animal_type {
            self.animal_type = animal_type;
        }
        if let Some(age_group) = update.age_group {
            self.age_group = age_group;
        }
        if let Some(feeds_per_day) = update.feeds_per_day {
            self.feeds_per_day = feeds_per_day;
        }
        if let Some(total_daily) = update.total_daily {
            self.total_daily = total_daily;
        }
        if let Some(cost) = update.cost {
            self.cost = cost;
        }
        if let Some(animals_assigned) = update.animals_assigned {
            self.animals_assigned = animals_assigned;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

impl fmt::Display for FeedingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Animal type: {}", self.animal_type)?;
        if !self.age_group.is_empty() {
            writeln!(f, "Age group: {}", self.age_group)?;
        }
        writeln!(f, "Feeds per day: {}", self.feeds_per_day)?;
        if !self.total_daily.is_empty() {
            writeln!(f, "Total daily: {}", self.total_daily)?;
        }
        if !self.cost.is_empty() {
            writeln!(f, "Cost: {}", self.cost)?;
        }
        writeln!(f, "Animals assigned: {}", self.animals_assigned)?;
        writeln!(f, "Status: {}", self.status)?;
        Ok(())
    }
}

/// Partial update for a plan, keyed on `id`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub id: String,
    pub name: Option<String>,
    pub animal_type: Option<AnimalType>,
    pub age_group: Option<String>,
    pub feeds_per_day: Option<u32>,
    pub total_daily: Option<String>,
    pub cost: Option<String>,
    pub animals_assigned: Option<u32>,
    pub status: Option<PlanStatus>,
}

impl PlanUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl From<FeedingPlan> for PlanUpdate {
    fn from(plan: FeedingPlan) -> Self {
        Self {
            id: plan.id,
            name: Some(plan.name),
            animal_type: Some(plan.animal_type),
            age_group: Some(plan.age_group),
            feeds_per_day: Some(plan.feeds_per_day),
            total_daily: Some(plan.total_daily),
            cost: Some(plan.cost),
            animals_assigned: Some(plan.animals_assigned),
            status: Some(plan.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_new_uses_form_defaults() {
        let plan = FeedingPlan::new("Plan Equino");
        assert!(plan.id.is_empty());
        assert_eq!(plan.animal_type, AnimalType::Bovino);
        assert_eq!(plan.feeds_per_day, 1);
        assert_eq!(plan.animals_assigned, 0);
        assert_eq!(plan.status, PlanStatus::Activo);
    }

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut plan = FeedingPlan::new("Plan Terneros")
            .with_id("2")
            .with_feeds_per_day(4)
            .with_total_daily("8 kg");

        let update = PlanUpdate {
            feeds_per_day: Some(5),
            status: Some(PlanStatus::Borrador),
            ..PlanUpdate::new("2")
        };
        plan.apply(update);

        assert_eq!(plan.feeds_per_day, 5);
        assert_eq!(plan.status, PlanStatus::Borrador);
        assert_eq!(plan.name, "Plan Terneros");
        assert_eq!(plan.total_daily, "8 kg");
    }

    #[test]
    fn test_matches_name_or_animal_type() {
        let plan = FeedingPlan::new("Plan Engorde").with_animal_type(AnimalType::Porcino);
        assert!(plan.matches("engorde"));
        assert!(plan.matches("PORC"));
        assert!(!plan.matches("ovino"));
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!(AnimalType::from_str("ovino").unwrap(), AnimalType::Ovino);
        assert!(AnimalType::from_str("caprino").is_err());
        assert_eq!(PlanStatus::from_str("BORRADOR").unwrap(), PlanStatus::Borrador);
        assert!(PlanStatus::from_str("archivado").is_err());
    }

    #[test]
    fn test_plan_json_uses_camel_case() {
        let plan = FeedingPlan::new("Plan Ovino").with_id("4");
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["animalType"], "Bovino");
        assert_eq!(json["feedsPerDay"], 1);
        assert_eq!(json["animalsAssigned"], 0);
    }

    #[test]
    fn test_plan_display() {
        let plan = FeedingPlan::new("Plan Bovino Adulto")
            .with_id("1")
            .with_cost("$45.00");
        let output = plan.to_string();
        assert!(output.contains("Plan Bovino Adulto"));
        assert!(output.contains("Cost: $45.00"));
        assert!(!output.contains("Age group"));
    }
}
