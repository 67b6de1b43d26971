//! City within a state.

use super::define_entity;

define_entity! {
    /// A city; belongs to a [`State`](super::State) and owns places.
    pub struct City {
        pub name: String,
        /// Owning state.
        pub state_id: String,
    }
}
