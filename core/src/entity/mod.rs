pub mod customers;
pub mod reports;
pub mod reviews;
