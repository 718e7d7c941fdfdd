use chrono::Utc;
use serde::Serialize;

use crate::models::{AnimalType, FeedingPlan, FeedingSchedule, PlanStatus, PlanUpdate};

/// In-memory feeding plans and schedules.
///
/// Nothing here touches the network or the disk; plans live as long as the
/// store does. Plans keep insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanStore {
    plans: Vec<FeedingPlan>,
    schedules: Vec<FeedingSchedule>,
    loading: bool,
    #[serde(skip)]
    last_id: i64,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the sample plans the application starts with.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.set_plans(sample_plans());
        store
    }

    pub fn plans(&self) -> &[FeedingPlan] {
        &self.plans
    }

    pub fn schedules(&self) -> &[FeedingSchedule] {
        &self.schedules
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: &str) -> Option<&FeedingPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Plans whose name or animal type contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&FeedingPlan> {
        self.plans.iter().filter(|p| p.matches(term)).collect()
    }

    /// Appends a plan, giving it an id first if it has none. Returns the id.
    pub fn add_plan(&mut self, mut plan: FeedingPlan) -> String {
        if plan.id.is_empty() {
            plan.id = self.next_id();
        }
        let id = plan.id.clone();
        self.plans.push(plan);
        id
    }

    /// Merges `update` onto the plan with the same id. Unknown ids are
    /// ignored; returns whether a plan was changed.
    pub fn update_plan(&mut self, update: PlanUpdate) -> bool {
        match self.plans.iter_mut().find(|p| p.id == update.id) {
            Some(plan) => {
                plan.apply(update);
                true
            }
            None => false,
        }
    }

    /// Removes the plan with `id`; returns whether one was removed.
    pub fn delete_plan(&mut self, id: &str) -> bool {
        let len_before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        self.plans.len() != len_before
    }

    pub fn set_plans(&mut self, plans: Vec<FeedingPlan>) {
        self.plans = plans;
    }

    pub fn set_schedules(&mut self, schedules: Vec<FeedingSchedule>) {
        self.schedules = schedules;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Creation time in milliseconds, bumped past the last id handed out.
    fn next_id(&mut self) -> String {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }
}

fn sample_plans() -> Vec<FeedingPlan> {
    vec![
        FeedingPlan::new("Plan Bovino Adulto - Alta Producción")
            .with_id("1")
            .with_age_group("Adulto")
            .with_feeds_per_day(3)
            .with_total_daily("25 kg")
            .with_cost("$45.00")
            .with_animals_assigned(42),
        FeedingPlan::new("Plan Terneros - Crecimiento")
            .with_id("2")
            .with_age_group("Cría")
            .with_feeds_per_day(4)
            .with_total_daily("8 kg")
            .with_cost("$18.00")
            .with_animals_assigned(18),
        FeedingPlan::new("Plan Porcino - Engorde")
            .with_id("3")
            .with_animal_type(AnimalType::Porcino)
            .with_age_group("Adulto")
            .with_feeds_per_day(3)
            .with_total_daily("4 kg")
            .with_cost("$12.00")
            .with_animals_assigned(35),
        FeedingPlan::new("Plan Ovino - Mantenimiento")
            .with_id("4")
            .with_animal_type(AnimalType::Ovino)
            .with_age_group("Adulto")
            .with_feeds_per_day(2)
            .with_total_daily("2 kg")
            .with_cost("$5.00")
            .with_animals_assigned(25)
            .with_status(PlanStatus::Inactivo),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedType, MealTime};

    #[test]
    fn test_add_then_delete_round_trips() {
        let mut store = PlanStore::seeded();
        let before = store.plans().to_vec();

        let id = store.add_plan(FeedingPlan::new("X"));
        assert_eq!(store.plans().len(), before.len() + 1);
        assert!(store.delete_plan(&id));

        assert_eq!(store.plans(), before.as_slice());
    }

    #[test]
    fn test_add_appends_and_keeps_given_id() {
        let mut store = PlanStore::new();
        store.add_plan(FeedingPlan::new("A"));
        let id = store.add_plan(FeedingPlan::new("B").with_id("custom"));

        assert_eq!(id, "custom");
        let names: Vec<&str> = store.plans().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_generated_ids_are_unique_and_increasing() {
        let mut store = PlanStore::new();
        let ids: Vec<i64> = (0..5)
            .map(|i| store.add_plan(FeedingPlan::new(format!("Plan {}", i))))
            .map(|id| id.parse().unwrap())
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_update_merges_onto_existing_plan() {
        let mut store = PlanStore::seeded();
        let update = PlanUpdate {
            animals_assigned: Some(50),
            ..PlanUpdate::new("1")
        };

        assert!(store.update_plan(update));
        let plan = store.get("1").unwrap();
        assert_eq!(plan.animals_assigned, 50);
        assert_eq!(plan.total_daily, "25 kg");
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut store = PlanStore::seeded();
        let before = store.plans().to_vec();

        let update = PlanUpdate {
            name: Some("Fantasma".to_string()),
            ..PlanUpdate::new("missing")
        };
        assert!(!store.update_plan(update));
        assert_eq!(store.plans(), before.as_slice());
    }

    #[test]
    fn test_full_replacement_via_plan_update() {
        let mut store = PlanStore::seeded();
        let replacement = FeedingPlan::new("Plan Equino")
            .with_id("2")
            .with_animal_type(AnimalType::Equino);

        assert!(store.update_plan(replacement.clone().into()));
        assert_eq!(store.get("2"), Some(&replacement));
    }

    #[test]
    fn test_delete_missing_is_a_no_op() {
        let mut store = PlanStore::seeded();
        assert!(!store.delete_plan("nope"));
        assert_eq!(store.plans().len(), 4);
    }

    #[test]
    fn test_search() {
        let store = PlanStore::seeded();
        let found: Vec<&str> = store
            .search("ovino")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        // "Bovino" contains "ovino" too
        assert_eq!(found, vec!["1", "2", "4"]);
        assert_eq!(store.search("engorde").len(), 1);
    }

    #[test]
    fn test_setters() {
        let mut store = PlanStore::seeded();
        store.set_loading(true);
        assert!(store.is_loading());

        store.set_plans(Vec::new());
        assert!(store.plans().is_empty());

        store.set_schedules(vec![FeedingSchedule {
            id: "s1".to_string(),
            animal_name: "Lote Norte".to_string(),
            time: MealTime::Morning,
            feed_type: FeedType::Forage,
            quantity: 30.0,
            status: "Pendiente".to_string(),
        }]);
        assert_eq!(store.schedules().len(), 1);
    }
}
