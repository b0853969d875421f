pub mod cli;
pub mod core;
pub mod logger;
pub mod report;
