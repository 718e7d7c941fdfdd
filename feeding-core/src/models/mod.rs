mod feeding_event;
mod feeding_plan;
mod feeding_schedule;

pub use feeding_event::{EventStatus, FeedingEvent, NewFeedingEvent, Target, TargetType};
pub use feeding_plan::{AnimalType, FeedingPlan, PlanStatus, PlanUpdate};
pub use feeding_schedule::{FeedType, FeedingSchedule, MealTime};
