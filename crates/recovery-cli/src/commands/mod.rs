pub mod breakdown;
pub mod config;
pub mod simulate;
