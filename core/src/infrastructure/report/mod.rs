pub mod mappers;
pub mod repositories;

pub use repositories::report_repository::PostgresReportRepository;
