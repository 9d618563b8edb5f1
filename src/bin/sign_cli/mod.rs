//! CLI subcommand implementations for delegated-sign

pub mod build;
pub mod home;
pub mod layers;
pub mod logging;
pub mod output;
pub mod runtimes;
