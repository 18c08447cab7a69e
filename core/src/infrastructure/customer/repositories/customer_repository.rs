use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    neighborhood::{
        entities::{BoundingBox, NearbyCustomer},
        ports::CustomerRepository,
    },
};
use crate::entity::customers::{
    Column as CustomerColumn, Entity as CustomerEntity, Model as CustomerModel,
};

impl From<CustomerModel> for NearbyCustomer {
    fn from(model: CustomerModel) -> Self {
        NearbyCustomer {
            latitude: model.lat,
            longitude: model.lng,
            install_date: model.install_date,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pub db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CustomerRepository for PostgresCustomerRepository {
    async fn find_within(&self, bounds: BoundingBox) -> Result<Vec<NearbyCustomer>, CoreError> {
        let customers = CustomerEntity::find()
            .filter(CustomerColumn::Lat.between(bounds.min_latitude, bounds.max_latitude))
            .filter(CustomerColumn::Lng.between(bounds.min_longitude, bounds.max_longitude))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch customers in bounds: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(NearbyCustomer::from)
            .collect::<Vec<NearbyCustomer>>();

        Ok(customers)
    }
}
