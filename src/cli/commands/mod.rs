pub mod config;
pub mod scan;
