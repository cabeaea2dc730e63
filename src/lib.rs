pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod orchestrator;
pub mod profiles;
pub mod runner;
pub mod telemetry;
pub mod theme;
