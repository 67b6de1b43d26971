//! Cascade-delete planning over the [`EntityKind::dependents`] graph.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::domain::entities::{Entity, EntityKind};
use crate::domain::ports::EntityMap;

/// Every record removed by deleting one root entity.
///
/// Engines discover children level by level: [`CascadePlan::next_level`]
/// yields parents whose dependents have not been looked up yet, and
/// [`CascadePlan::include`] records the children found for them.
///
/// # Examples
/// ```
/// use hbnb::domain::CascadePlan;
/// use hbnb::domain::entities::{Entity, EntityKind, Timestamp};
/// use serde_json::Map;
///
/// let now = Timestamp::from_datetime(chrono::Utc::now());
/// let state = Entity::from_attributes(EntityKind::State, Map::new(), now).expect("state");
/// let mut plan = CascadePlan::new(&state);
/// while let Some((kind, _parents)) = plan.next_level() {
///     for dependent in kind.dependents() {
///         plan.include(dependent.kind, Vec::<String>::new());
///     }
/// }
/// assert_eq!(plan.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CascadePlan {
    doomed: BTreeMap<EntityKind, BTreeSet<String>>,
    frontier: VecDeque<(EntityKind, Vec<String>)>,
}

impl CascadePlan {
    pub fn new(root: &Entity) -> Self {
        let mut plan = Self::default();
        plan.include(root.kind(), [root.id().to_owned()]);
        plan
    }

    /// Resolve the whole plan against an in-memory object map.
    pub fn collect(root: &Entity, objects: &EntityMap) -> Self {
        let mut plan = Self::new(root);
        while let Some((kind, parents)) = plan.next_level() {
            for dependent in kind.dependents() {
                let children: Vec<String> = objects
                    .values()
                    .filter(|entity| entity.kind() == dependent.kind)
                    .filter(|entity| {
                        entity
                            .foreign_key(dependent.foreign_key)
                            .is_some_and(|parent| parents.iter().any(|id| id == parent))
                    })
                    .map(|entity| entity.id().to_owned())
                    .collect();
                plan.include(dependent.kind, children);
            }
        }
        plan
    }

    /// Next batch of parents whose children still need discovering.
    pub fn next_level(&mut self) -> Option<(EntityKind, Vec<String>)> {
        self.frontier.pop_front()
    }

    /// Add records to the plan; ids seen before are ignored.
    pub fn include(&mut self, kind: EntityKind, ids: impl IntoIterator<Item = String>) {
        let known = self.doomed.entry(kind).or_default();
        let fresh: Vec<String> = ids.into_iter().filter(|id| known.insert(id.clone())).collect();
        if !fresh.is_empty() && !kind.dependents().is_empty() {
            self.frontier.push_back((kind, fresh));
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.doomed.get(&kind).is_some_and(|ids| ids.contains(id))
    }

    /// Ids of one kind scheduled for removal.
    pub fn ids(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
        self.doomed.get(&kind).into_iter().flatten().map(String::as_str)
    }

    /// Kinds and ids, children before parents.
    pub fn leaves_first(&self) -> impl Iterator<Item = (EntityKind, Vec<&str>)> {
        EntityKind::ALL.into_iter().rev().filter_map(|kind| {
            let ids: Vec<&str> = self.ids(kind).collect();
            (!ids.is_empty()).then_some((kind, ids))
        })
    }

    /// `"Type.id"` keys of every doomed record.
    pub fn storage_keys(&self) -> Vec<String> {
        self.doomed
            .iter()
            .flat_map(|(kind, ids)| ids.iter().map(|id| kind.storage_key(id)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.doomed.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Timestamp;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn insert(objects: &mut EntityMap, kind: EntityKind, value: Value) {
        let Value::Object(attrs) = value else {
            panic!("expected object");
        };
        let entity = Entity::from_attributes(kind, attrs, Timestamp::from_datetime(Utc::now()))
            .expect("entity builds");
        objects.insert(entity.storage_key(), entity);
    }

    #[fixture]
    fn objects() -> EntityMap {
        let mut objects = EntityMap::new();
        insert(&mut objects, EntityKind::State, json!({ "id": "s1" }));
        insert(&mut objects, EntityKind::State, json!({ "id": "s2" }));
        insert(&mut objects, EntityKind::User, json!({ "id": "u1" }));
        insert(&mut objects, EntityKind::City, json!({ "id": "c1", "state_id": "s1" }));
        insert(&mut objects, EntityKind::City, json!({ "id": "c2", "state_id": "s2" }));
        insert(
            &mut objects,
            EntityKind::Place,
            json!({ "id": "p1", "city_id": "c1", "user_id": "u1" }),
        );
        insert(
            &mut objects,
            EntityKind::Review,
            json!({ "id": "r1", "place_id": "p1", "user_id": "u1" }),
        );
        objects
    }

    fn root(objects: &EntityMap, key: &str) -> Entity {
        objects.get(key).cloned().expect("root exists")
    }

    #[rstest]
    fn state_cascades_down_to_reviews(objects: EntityMap) {
        let plan = CascadePlan::collect(&root(&objects, "State.s1"), &objects);
        assert_eq!(
            plan.storage_keys(),
            vec!["State.s1", "City.c1", "Place.p1", "Review.r1"]
        );
        assert!(!plan.contains(EntityKind::City, "c2"));
    }

    #[rstest]
    fn user_takes_places_and_reviews(objects: EntityMap) {
        let plan = CascadePlan::collect(&root(&objects, "User.u1"), &objects);
        assert_eq!(plan.len(), 3);
        assert!(plan.contains(EntityKind::Review, "r1"));
    }

    #[rstest]
    fn leaves_come_first(objects: EntityMap) {
        let plan = CascadePlan::collect(&root(&objects, "State.s1"), &objects);
        let kinds: Vec<EntityKind> = plan.leaves_first().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Review, EntityKind::Place, EntityKind::City, EntityKind::State]
        );
    }

    #[rstest]
    fn state_without_places_takes_only_its_cities(objects: EntityMap) {
        let plan = CascadePlan::collect(&root(&objects, "State.s2"), &objects);
        assert_eq!(plan.storage_keys(), vec!["State.s2", "City.c2"]);
    }

    #[rstest]
    fn childless_root_is_alone(objects: EntityMap) {
        let plan = CascadePlan::collect(&root(&objects, "Review.r1"), &objects);
        assert_eq!(plan.storage_keys(), vec!["Review.r1"]);
    }
}
