pub mod review_repository;
