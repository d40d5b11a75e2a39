//! Weekly schedule listing. Read-only and not cached.

use asiste_common::api::CODE_OK;
use asiste_common::models::schedule::ScheduleShift;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::store::SessionStore;

pub struct ScheduleRepository {
    client: ApiClient,
    session: SessionStore,
}

impl ScheduleRepository {
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    #[tracing::instrument(skip(self))]
    pub async fn week_schedule(&self) -> ApiResult<Vec<ScheduleShift>> {
        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;
        let envelope = self.client.schedule(&token).await?;
        if envelope.header.code != CODE_OK {
            return Err(ApiError::message(envelope.header.message));
        }

        Ok(envelope
            .body
            .shifts
            .into_iter()
            .map(|data| ScheduleShift {
                day: data.day,
                date: data.date,
                time: data.time,
                shift_type: data.shift_type,
                confirmed: data.confirmed,
            })
            .collect())
    }
}
