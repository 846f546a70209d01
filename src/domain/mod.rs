// Domain module - Configuration, dataset naming and errors
pub mod config;
pub mod dataset;
pub mod error;
