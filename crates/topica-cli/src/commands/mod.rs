//! Command implementations.

pub mod parse;
pub mod plan;
pub mod run;

pub use self::parse::execute_parse;
pub use self::plan::execute_plan;
pub use self::run::execute_run;
