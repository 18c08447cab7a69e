use chrono::{TimeZone, Utc};

use crate::domain::report::entities::Report;
use crate::entity::reports::Model as ReportModel;

impl From<ReportModel> for Report {
    fn from(model: ReportModel) -> Self {
        Report {
            id: model.id,
            client_name: model.client_name,
            address: model.address,
            city: model.city,
            state: model.state,
            zip: model.zip,
            phone: model.phone,
            latitude: model.lat,
            longitude: model.lng,
            created_at: Utc.from_utc_datetime(&model.created_at),
            viewed: model.viewed,
        }
    }
}
