use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    review::{entities::Review, ports::ReviewRepository},
};
use crate::entity::reviews::{Column as ReviewColumn, Entity as ReviewEntity, Model as ReviewModel};

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            author: model.author,
            quote: model.quote,
            zip: model.zip,
            rating: model.rating,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pub db: DatabaseConnection,
}

impl PostgresReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReviewRepository for PostgresReviewRepository {
    async fn find_by_zip(&self, zip: &str, rating: i32) -> Result<Vec<Review>, CoreError> {
        let reviews = ReviewEntity::find()
            .filter(ReviewColumn::Zip.eq(zip))
            .filter(ReviewColumn::Rating.eq(rating))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch reviews by zip: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(Review::from)
            .collect::<Vec<Review>>();

        Ok(reviews)
    }

    async fn find_outside_zip(
        &self,
        zip: &str,
        rating: i32,
        limit: u64,
    ) -> Result<Vec<Review>, CoreError> {
        let reviews = ReviewEntity::find()
            .filter(ReviewColumn::Zip.ne(zip))
            .filter(ReviewColumn::Rating.eq(rating))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch backfill reviews: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(Review::from)
            .collect::<Vec<Review>>();

        Ok(reviews)
    }

    async fn count_by_rating(&self, rating: i32) -> Result<u64, CoreError> {
        ReviewEntity::find()
            .filter(ReviewColumn::Rating.eq(rating))
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to count reviews: {}", e);
                CoreError::InternalServerError
            })
    }
}
