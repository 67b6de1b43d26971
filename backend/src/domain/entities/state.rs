//! Geographic state owning cities.

use super::define_entity;

define_entity! {
    /// A state; deleting it removes its cities.
    pub struct State {
        pub name: String,
    }
}
