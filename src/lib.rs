pub mod configuration;
pub mod domain;
pub mod persistence;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
pub mod validation;
