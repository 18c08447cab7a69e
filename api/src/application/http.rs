pub mod diagnostics;
pub mod health;
pub mod report;
pub mod server;
