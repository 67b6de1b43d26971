//! Commit-time integrity checks against the in-memory object map.

use std::collections::BTreeMap;

use crate::domain::entities::{Entity, EntityKind};
use crate::domain::ports::{EntityMap, StorageError};

/// Reject a batch that would break id uniqueness, email uniqueness or a
/// reference. `batch` must already be de-duplicated by storage key.
pub(super) fn check_batch(existing: &EntityMap, batch: &[Entity]) -> Result<(), StorageError> {
    let mut batch_ids: BTreeMap<&str, EntityKind> = BTreeMap::new();
    for entity in batch {
        if let Some(other) = batch_ids.insert(entity.id(), entity.kind()) {
            return Err(StorageError::id_conflict(entity.id(), other.as_str()));
        }
        if let Some(other) = EntityKind::ALL.into_iter().find(|kind| {
            *kind != entity.kind() && existing.contains_key(&kind.storage_key(entity.id()))
        }) {
            return Err(StorageError::id_conflict(entity.id(), other.as_str()));
        }
    }

    check_emails(existing, batch)?;

    for entity in batch {
        for reference in entity.references() {
            let known = existing.contains_key(&reference.target.storage_key(&reference.id))
                || batch_ids.get(reference.id.as_str()) == Some(&reference.target);
            if !known {
                return Err(StorageError::invalid_reference(
                    reference.field,
                    reference.target.as_str(),
                    reference.id,
                ));
            }
        }
    }
    Ok(())
}

fn check_emails(existing: &EntityMap, batch: &[Entity]) -> Result<(), StorageError> {
    let mut owners: BTreeMap<&str, &str> = existing
        .values()
        .filter_map(|entity| match entity {
            Entity::User(user) => Some((user.email.as_str(), user.id.as_str())),
            _ => None,
        })
        .collect();
    // Users updated in this batch release their previous address.
    for entity in batch {
        if let Entity::User(user) = entity {
            owners.retain(|_, owner| *owner != user.id);
        }
    }
    for entity in batch {
        let Entity::User(user) = entity else {
            continue;
        };
        if owners.insert(user.email.as_str(), user.id.as_str()).is_some() {
            return Err(StorageError::duplicate_email(user.email.as_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Timestamp;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn entity(kind: EntityKind, value: Value) -> Entity {
        let Value::Object(attrs) = value else {
            panic!("expected object");
        };
        Entity::from_attributes(kind, attrs, Timestamp::from_datetime(Utc::now()))
            .expect("entity builds")
    }

    #[fixture]
    fn existing() -> EntityMap {
        [
            entity(EntityKind::State, json!({ "id": "s1" })),
            entity(EntityKind::User, json!({ "id": "u1", "email": "taken@x.io" })),
        ]
        .into_iter()
        .map(|entity| (entity.storage_key(), entity))
        .collect()
    }

    #[rstest]
    fn accepts_references_resolved_in_the_same_batch(existing: EntityMap) {
        let batch = vec![
            entity(EntityKind::City, json!({ "id": "c1", "state_id": "s1" })),
            entity(EntityKind::Place, json!({ "id": "p1", "city_id": "c1", "user_id": "u1" })),
        ];
        assert_eq!(check_batch(&existing, &batch), Ok(()));
    }

    #[rstest]
    fn rejects_dangling_references(existing: EntityMap) {
        let batch = vec![entity(
            EntityKind::Review,
            json!({ "place_id": "nowhere", "user_id": "u1" }),
        )];
        assert_eq!(
            check_batch(&existing, &batch),
            Err(StorageError::invalid_reference("place_id", "Place", "nowhere"))
        );
    }

    #[rstest]
    fn rejects_ids_reused_across_types(existing: EntityMap) {
        let batch = vec![entity(EntityKind::Amenity, json!({ "id": "s1" }))];
        assert_eq!(
            check_batch(&existing, &batch),
            Err(StorageError::id_conflict("s1", "State"))
        );
    }

    #[rstest]
    fn rejects_duplicate_emails(existing: EntityMap) {
        let batch = vec![entity(EntityKind::User, json!({ "id": "u2", "email": "taken@x.io" }))];
        assert_eq!(
            check_batch(&existing, &batch),
            Err(StorageError::duplicate_email("taken@x.io"))
        );
    }

    #[rstest]
    fn allows_a_user_to_keep_its_email(existing: EntityMap) {
        let batch = vec![entity(
            EntityKind::User,
            json!({ "id": "u1", "email": "taken@x.io", "first_name": "Ada" }),
        )];
        assert_eq!(check_batch(&existing, &batch), Ok(()));
    }
}
