pub mod report;
pub mod run;
pub mod validate;

pub use report::*;
pub use run::*;
pub use validate::*;
