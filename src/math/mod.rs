// src/math/mod.rs

pub mod integrator;

pub use integrator::euler_step;
