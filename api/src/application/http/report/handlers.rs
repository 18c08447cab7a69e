pub mod create_report;
pub mod get_report;

pub use create_report::{__path_create_report, create_report};
pub use get_report::{__path_get_report, get_report};
