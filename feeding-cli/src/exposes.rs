//! Units this tool exposes by name so a host can load them on demand.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposedModule {
    FeedingSchedule,
    FeedingPlan,
    FeedingEventsList,
    FeedingStore,
}

impl ExposedModule {
    pub const ALL: [ExposedModule; 4] = [
        ExposedModule::FeedingSchedule,
        ExposedModule::FeedingPlan,
        ExposedModule::FeedingEventsList,
        ExposedModule::FeedingStore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExposedModule::FeedingSchedule => "./FeedingSchedule",
            ExposedModule::FeedingPlan => "./FeedingPlan",
            ExposedModule::FeedingEventsList => "./FeedingEventsList",
            ExposedModule::FeedingStore => "./FeedingStore",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExposedModule::FeedingSchedule => "Feeding schedule view",
            ExposedModule::FeedingPlan => "Feeding plans view",
            ExposedModule::FeedingEventsList => "Feeding events of the active farm",
            ExposedModule::FeedingStore => "Plan store state as JSON",
        }
    }
}

impl fmt::Display for ExposedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExposedModule {
    type Err = String;

    /// Matches exposed names with or without the leading `./`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim_start_matches("./").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name().trim_start_matches("./").to_lowercase() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.name()).collect();
                format!(
                    "Unknown module '{}'. Available: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
