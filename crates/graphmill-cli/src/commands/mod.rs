//! Command implementations.

mod clear;
mod probe;
mod run;

pub use clear::execute_clear;
pub use probe::execute_probe;
pub use run::execute_run;
