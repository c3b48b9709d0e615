pub mod config;
pub mod log;
pub mod record;
pub mod snapshot;
