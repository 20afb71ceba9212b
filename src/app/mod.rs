pub mod check_runner;
pub mod cli;
pub mod logging;

pub use check_runner::{CheckRunner, load_config};
