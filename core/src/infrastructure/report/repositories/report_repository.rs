use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    report::{entities::Report, ports::ReportRepository},
};
use crate::entity::reports::{
    ActiveModel as ReportActiveModel, Column as ReportColumn, Entity as ReportEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresReportRepository {
    pub db: DatabaseConnection,
}

impl PostgresReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReportRepository for PostgresReportRepository {
    async fn create(&self, report: Report) -> Result<Report, CoreError> {
        let created = ReportEntity::insert(ReportActiveModel {
            id: Set(report.id),
            client_name: Set(report.client_name),
            address: Set(report.address),
            city: Set(report.city),
            state: Set(report.state),
            zip: Set(report.zip),
            phone: Set(report.phone),
            lat: Set(report.latitude),
            lng: Set(report.longitude),
            created_at: Set(report.created_at.naive_utc()),
            viewed: Set(report.viewed),
        })
        .exec_with_returning(&self.db)
        .await
        .map(Report::from)
        .map_err(|e| {
            error!("Failed to create report: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Report>, CoreError> {
        let report = ReportEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get report by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(Report::from);

        Ok(report)
    }

    async fn mark_viewed(&self, id: &str) -> Result<(), CoreError> {
        ReportEntity::update_many()
            .col_expr(ReportColumn::Viewed, Expr::value(true))
            .filter(ReportColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to mark report viewed: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
