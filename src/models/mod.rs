// src/models/mod.rs

pub mod error;
pub mod vehicle;

pub use error::ModelError;
pub use vehicle::{VehicleModel, VehicleState};
