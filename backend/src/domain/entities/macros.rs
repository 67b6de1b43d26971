//! Helper macro generating entity structs and their [`Model`] impls.
//!
//! [`Model`]: super::Model

macro_rules! define_entity {
    (
        $(#[$outer:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            /// Identifier unique across the whole store.
            pub id: String,
            /// Creation time.
            pub created_at: $crate::domain::entities::Timestamp,
            /// Time of the latest commit.
            pub updated_at: $crate::domain::entities::Timestamp,
            $(
                $(#[$field_meta])*
                #[serde(default)]
                pub $field: $ty,
            )*
        }

        impl $crate::domain::entities::Model for $name {
            const KIND: $crate::domain::entities::EntityKind =
                $crate::domain::entities::EntityKind::$name;
            const FIELDS: &'static [&'static str] =
                &["id", "created_at", "updated_at", $(stringify!($field)),*];

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> $crate::domain::entities::Timestamp {
                self.created_at
            }

            fn updated_at(&self) -> $crate::domain::entities::Timestamp {
                self.updated_at
            }

            fn from_entity(entity: $crate::domain::entities::Entity) -> Option<Self> {
                match entity {
                    $crate::domain::entities::Entity::$name(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$name> for $crate::domain::entities::Entity {
            fn from(value: $name) -> Self {
                Self::$name(value)
            }
        }
    };
}

pub(crate) use define_entity;

#[cfg(test)]
mod tests {
    use crate::domain::entities::{Model, State};

    #[test]
    fn field_list_starts_with_base_attributes() {
        assert_eq!(State::FIELDS, &["id", "created_at", "updated_at", "name"]);
    }
}
