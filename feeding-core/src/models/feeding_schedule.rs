use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedType {
    #[serde(rename = "Concentrado")]
    Concentrate,
    #[serde(rename = "Forraje")]
    Forage,
    #[serde(rename = "Ensilaje")]
    Silage,
    #[serde(rename = "Suplemento")]
    Supplement,
    #[serde(rename = "Mineral")]
    Mineral,
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedType::Concentrate => write!(f, "Concentrado"),
            FeedType::Forage => write!(f, "Forraje"),
            FeedType::Silage => write!(f, "Ensilaje"),
            FeedType::Supplement => write!(f, "Suplemento"),
            FeedType::Mineral => write!(f, "Mineral"),
        }
    }
}

impl FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concentrado" | "concentrate" => Ok(FeedType::Concentrate),
            "forraje" | "forage" => Ok(FeedType::Forage),
            "ensilaje" | "silage" => Ok(FeedType::Silage),
            "suplemento" | "supplement" => Ok(FeedType::Supplement),
            "mineral" => Ok(FeedType::Mineral),
            _ => Err(format!("Invalid feed type '{}'", s)),
        }
    }
}

/// Time-of-day slot a ration is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealTime {
    #[serde(rename = "Mañana")]
    Morning,
    #[serde(rename = "Mediodía")]
    Noon,
    #[serde(rename = "Tarde")]
    Afternoon,
    #[serde(rename = "Noche")]
    Night,
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealTime::Morning => write!(f, "Mañana"),
            MealTime::Noon => write!(f, "Mediodía"),
            MealTime::Afternoon => write!(f, "Tarde"),
            MealTime::Night => write!(f, "Noche"),
        }
    }
}

impl MealTime {
    pub const ALL: [MealTime; 4] = [
        MealTime::Morning,
        MealTime::Noon,
        MealTime::Afternoon,
        MealTime::Night,
    ];

    /// Clock time the slot is served at, "HH:MM".
    pub fn hour(&self) -> &'static str {
        match self {
            MealTime::Morning => "06:00",
            MealTime::Noon => "12:00",
            MealTime::Afternoon => "18:00",
            MealTime::Night => "22:00",
        }
    }
}

/// One row of the feeding schedule view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSchedule {
    pub id: String,
    pub animal_name: String,
    pub time: MealTime,
    pub feed_type: FeedType,
    /// kg
    pub quantity: f64,
    pub status: String,
}

impl fmt::Display for FeedingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:<9} {:<11} {:>6} kg  {}",
            self.animal_name,
            self.time.to_string(),
            self.feed_type.to_string(),
            self.quantity,
            self.status
        )
    }
}
