pub mod config;
pub mod domain;
pub mod startup;
pub mod telemetry;

pub use domain::login;
