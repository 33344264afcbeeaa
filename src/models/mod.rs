pub mod batch;
pub mod config;
pub mod outcome;
pub mod report;
pub mod work_item;

pub use batch::*;
pub use config::*;
pub use outcome::*;
pub use report::*;
pub use work_item::*;
