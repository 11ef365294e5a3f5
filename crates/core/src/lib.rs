pub mod billing;
pub mod config;
pub mod pricing;
pub mod signature;
