//! Reviews left by users on places.

use super::define_entity;

define_entity! {
    pub struct Review {
        pub text: String,
        pub place_id: String,
        pub user_id: String,
    }
}
