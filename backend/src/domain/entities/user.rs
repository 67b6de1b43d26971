//! Registered users.

use super::define_entity;

define_entity! {
    /// A user; owns places and reviews.
    ///
    /// `password` is persisted but never rendered by the HTTP layer.
    pub struct User {
        /// Unique across all users.
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }
}
