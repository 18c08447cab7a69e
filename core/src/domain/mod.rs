pub mod common;
pub mod contaminant;
pub mod geocoding;
pub mod neighborhood;
pub mod report;
pub mod review;
pub mod water_report;
