//! HTTP inbound adapter exposing the HBNB REST endpoints.

pub mod amenities;
pub mod cities;
pub mod error;
pub mod health;
pub mod index;
pub mod place_amenities;
pub mod places;
pub(crate) mod resources;
pub mod reviews;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod states;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
