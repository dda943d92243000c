pub mod cli;
pub mod config;
pub mod manifest;
pub mod validation;
pub mod version;
