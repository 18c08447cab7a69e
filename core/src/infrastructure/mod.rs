pub mod customer;
pub mod db;
pub mod geocoding;
pub mod report;
pub mod review;
pub mod water_data;
