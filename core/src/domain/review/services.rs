use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, error};

use crate::domain::{
    common::services::Service,
    contaminant::ports::WaterDataClient,
    geocoding::ports::Geocoder,
    neighborhood::ports::CustomerRepository,
    report::ports::ReportRepository,
    review::{
        entities::Review,
        ports::{ReviewRepository, ReviewService},
        value_objects::ReviewSelection,
    },
};

/// Tops `local` up to `target` with shuffled pool reviews from authors not already shown.
pub fn backfill<R: Rng + ?Sized>(
    mut local: Vec<Review>,
    pool: Vec<Review>,
    target: usize,
    rng: &mut R,
) -> Vec<Review> {
    local.truncate(target);
    let shortfall = target - local.len();
    if shortfall == 0 {
        return local;
    }

    let mut seen: HashSet<String> = local.iter().map(|r| r.author.clone()).collect();
    let mut candidates: Vec<Review> = pool
        .into_iter()
        .filter(|r| seen.insert(r.author.clone()))
        .collect();

    candidates.shuffle(rng);
    local.extend(candidates.into_iter().take(shortfall));
    local
}

impl<RP, CU, RV, WD, GC> ReviewService for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    async fn select_reviews(&self, zip: &str) -> ReviewSelection {
        let policy = &self.policy.reviews;

        let (local, total) = futures::join!(
            self.review_repository.find_by_zip(zip, policy.rating),
            self.review_repository.count_by_rating(policy.rating)
        );

        let local = local.unwrap_or_else(|e| {
            error!(%zip, "failed to fetch local reviews: {}", e);
            Vec::new()
        });
        let total_top_rated = total.unwrap_or_else(|e| {
            error!("failed to count reviews: {}", e);
            0
        });

        let pool = if local.len() < policy.target {
            let wanted = (policy.target - local.len()) * policy.backfill_factor;
            self.review_repository
                .find_outside_zip(zip, policy.rating, wanted as u64)
                .await
                .unwrap_or_else(|e| {
                    error!(%zip, "failed to fetch backfill reviews: {}", e);
                    Vec::new()
                })
        } else {
            Vec::new()
        };

        let reviews = backfill(local, pool, policy.target, &mut rand::thread_rng());
        debug!(%zip, selected = reviews.len(), "reviews selected");

        ReviewSelection {
            reviews,
            total_top_rated,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::domain::common::{
        ReportPolicy, entities::app_errors::CoreError, services::test_support::Mocks,
    };

    fn review(author: &str, zip: &str) -> Review {
        Review {
            author: author.to_string(),
            quote: format!("{author} loves the water"),
            zip: zip.to_string(),
            rating: 5,
        }
    }

    fn authors(reviews: &[Review]) -> Vec<&str> {
        reviews.iter().map(|r| r.author.as_str()).collect()
    }

    #[test]
    fn test_backfill_skips_known_authors() {
        let local = vec![review("Jennifer P.", "37934"), review("Marcus T.", "37934")];
        let pool = vec![
            review("Marcus T.", "37922"),
            review("Lisa M.", "37922"),
            review("David R.", "37919"),
        ];

        let picked = backfill(local, pool, 4, &mut StdRng::seed_from_u64(7));

        assert_eq!(picked.len(), 4);
        let names: HashSet<&str> = authors(&picked).into_iter().collect();
        assert_eq!(names.len(), 4);
        assert_eq!(&authors(&picked)[..2], &["Jennifer P.", "Marcus T."]);
    }

    #[test]
    fn test_backfill_dedups_pool_authors() {
        let pool = vec![
            review("Lisa M.", "37922"),
            review("Lisa M.", "37919"),
            review("David R.", "37919"),
        ];

        let picked = backfill(Vec::new(), pool, 4, &mut StdRng::seed_from_u64(1));

        assert_eq!(picked.len(), 2);
        let names: HashSet<&str> = authors(&picked).into_iter().collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_local_reviews_capped_at_target() {
        let local: Vec<Review> = (0..6)
            .map(|i| review(&format!("Neighbor {i}"), "37934"))
            .collect();

        let picked = backfill(local, Vec::new(), 4, &mut StdRng::seed_from_u64(3));

        assert_eq!(authors(&picked), vec!["Neighbor 0", "Neighbor 1", "Neighbor 2", "Neighbor 3"]);
    }

    #[tokio::test]
    async fn test_select_backfills_without_duplicates() {
        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_zip()
            .withf(|zip, rating| zip == "37934" && *rating == 5)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![review("Jennifer P.", "37934"), review("Marcus T.", "37934")])
                })
            });
        mocks
            .reviews
            .expect_find_outside_zip()
            .withf(|zip, _, limit| zip == "37934" && *limit == 6)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(vec![
                        review("Marcus T.", "37922"),
                        review("Lisa M.", "37922"),
                        review("David R.", "37919"),
                        review("Karen R.", "37919"),
                    ])
                })
            });
        mocks
            .reviews
            .expect_count_by_rating()
            .returning(|_| Box::pin(async { Ok(6012) }));
        let service = mocks.into_service(ReportPolicy::default());

        let selection = service.select_reviews("37934").await;

        assert_eq!(selection.reviews.len(), 4);
        let names: HashSet<&str> = authors(&selection.reviews).into_iter().collect();
        assert_eq!(names.len(), 4);
        assert_eq!(selection.total_top_rated, 6012);
    }

    #[tokio::test]
    async fn test_enough_local_reviews_skip_pool() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_find_by_zip().returning(|_, _| {
            Box::pin(async {
                Ok((0..4)
                    .map(|i| review(&format!("Neighbor {i}"), "37934"))
                    .collect::<Vec<_>>())
            })
        });
        mocks.reviews.expect_find_outside_zip().times(0);
        mocks
            .reviews
            .expect_count_by_rating()
            .returning(|_| Box::pin(async { Ok(4) }));
        let service = mocks.into_service(ReportPolicy::default());

        assert_eq!(service.select_reviews("37934").await.reviews.len(), 4);
    }

    #[tokio::test]
    async fn test_store_failures_degrade_to_empty() {
        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_find_by_zip()
            .returning(|_, _| Box::pin(async { Err(CoreError::InternalServerError) }));
        mocks
            .reviews
            .expect_find_outside_zip()
            .returning(|_, _, _| Box::pin(async { Err(CoreError::InternalServerError) }));
        mocks
            .reviews
            .expect_count_by_rating()
            .returning(|_| Box::pin(async { Err(CoreError::InternalServerError) }));
        let service = mocks.into_service(ReportPolicy::default());

        let selection = service.select_reviews("37934").await;

        assert!(selection.reviews.is_empty());
        assert_eq!(selection.total_top_rated, 0);
    }
}
