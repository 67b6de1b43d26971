//! Handler bodies shared by every entity endpoint.
//!
//! Each resource module only declares its routes and per-type rules
//! (required fields, the parent key forced from the path, keys PUT ignores);
//! loading, validation, persistence and rendering happen here.

use actix_web::HttpResponse;
use serde_json::{Map, Value};

use crate::domain::entities::{BASE_FIELDS, CLASS_KEY, Entity, EntityKind, Model};
use crate::domain::{ApiResult, Error, Storage};

use super::validation::require_fields;

/// Attribute never rendered by the API.
const HIDDEN_FIELD: &str = "password";

/// Per-type rules applied on `POST`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CreateRules<'a> {
    /// Keys the body must contain, checked in order.
    pub required: &'a [&'a str],
    /// Foreign key taken from the path rather than the body.
    pub parent: Option<(&'a str, &'a str)>,
}

pub(crate) fn not_found() -> Error {
    Error::not_found("Not found")
}

/// `to_dict` without secrets.
pub(crate) fn render(entity: &Entity) -> Value {
    let mut attrs = entity.to_dict();
    if entity.kind() == EntityKind::User {
        attrs.remove(HIDDEN_FIELD);
    }
    Value::Object(attrs)
}

pub(crate) fn render_all<M: Model>(models: Vec<M>) -> Value {
    Value::Array(
        models
            .into_iter()
            .map(|model| render(&model.into()))
            .collect(),
    )
}

/// Fetch an entity or fail with 404.
pub(crate) async fn load(storage: &Storage, kind: EntityKind, id: &str) -> ApiResult<Entity> {
    storage.get(kind, id).await?.ok_or_else(not_found)
}

/// Fetch a typed entity or fail with 404.
pub(crate) async fn load_model<M: Model>(storage: &Storage, id: &str) -> ApiResult<M> {
    storage.fetch::<M>(id).await?.ok_or_else(not_found)
}

pub(crate) async fn list<M: Model>(storage: &Storage) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(render_all(storage.list::<M>().await?)))
}

pub(crate) async fn show(storage: &Storage, kind: EntityKind, id: &str) -> ApiResult<HttpResponse> {
    let entity = load(storage, kind, id).await?;
    Ok(HttpResponse::Ok().json(render(&entity)))
}

/// Delete with cascade; responds with an empty object.
pub(crate) async fn remove(storage: &Storage, kind: EntityKind, id: &str) -> ApiResult<HttpResponse> {
    let entity = load(storage, kind, id).await?;
    storage.delete(&entity).await?;
    Ok(HttpResponse::Ok().json(Map::new()))
}

/// Build and commit a new entity, answering 201.
pub(crate) async fn create(
    storage: &Storage,
    kind: EntityKind,
    mut attrs: Map<String, Value>,
    rules: CreateRules<'_>,
) -> ApiResult<HttpResponse> {
    require_fields(&attrs, rules.required)?;
    attrs.remove(CLASS_KEY);
    for field in BASE_FIELDS {
        attrs.remove(field);
    }
    if let Some((field, parent_id)) = rules.parent {
        attrs.insert(field.to_owned(), Value::from(parent_id));
    }
    let entity = storage.build(kind, attrs)?;
    let stored = storage.persist(entity).await?;
    Ok(HttpResponse::Created().json(render(&stored)))
}

/// Apply `changes` to a stored entity, skipping `ignored` keys.
pub(crate) async fn update(
    storage: &Storage,
    kind: EntityKind,
    id: &str,
    changes: Map<String, Value>,
    ignored: &[&str],
) -> ApiResult<HttpResponse> {
    let entity = load(storage, kind, id).await?;
    let updated = entity.apply_update(changes, ignored)?;
    let stored = storage.update(updated).await?;
    Ok(HttpResponse::Ok().json(render(&stored)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Timestamp;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn users_render_without_password() {
        let Value::Object(attrs) = json!({ "email": "a@b.c", "password": "secret" }) else {
            panic!("expected object");
        };
        let now = Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid instant"),
        );
        let user = Entity::from_attributes(EntityKind::User, attrs, now).expect("user builds");

        let rendered = render(&user);

        assert!(rendered.get("password").is_none());
        assert_eq!(rendered["email"], "a@b.c");
        assert_eq!(rendered["__class__"], "User");
    }
}
