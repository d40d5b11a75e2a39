//! Monthly attendance listing, justification reason codes, and the
//! multipart justification submission. None of this is cached.

use asiste_common::api::{ReportJustificationRequest, CODE_OK};
use asiste_common::models::attendance::{
    current_year_months, AttendanceRecord, AttendanceStatus, JustificationReason, Month,
};

use crate::client::{ApiClient, JustificationFile};
use crate::error::{ApiError, ApiResult};
use crate::store::{PrefStore, SessionStore};

pub struct AttendanceRepository {
    client: ApiClient,
    session: SessionStore,
    prefs: PrefStore,
}

impl AttendanceRepository {
    pub fn new(client: ApiClient, session: SessionStore, prefs: PrefStore) -> Self {
        Self {
            client,
            session,
            prefs,
        }
    }

    /// Records for one month plus the selectable month list. When the API
    /// omits `availableMonths`, the twelve months of the current year are
    /// generated locally.
    #[tracing::instrument(skip(self))]
    pub async fn records(
        &self,
        month_id: u32,
        year: i32,
    ) -> ApiResult<(Vec<AttendanceRecord>, Vec<Month>)> {
        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;
        let envelope = self.client.attendance(&token, month_id, year).await?;

        let body = match envelope.body {
            Some(body) if envelope.header.code == CODE_OK => body,
            _ => return Err(ApiError::message(envelope.header.message)),
        };

        let records = body
            .records
            .into_iter()
            .map(|data| AttendanceRecord {
                id: data.id,
                date: data.date,
                scheduled_time: data.scheduled_time,
                real_in: data.real_in,
                real_out: data.real_out,
                status: AttendanceStatus::parse_lossy(&data.status),
                can_report: data.can_report,
            })
            .collect();

        let months = match body.available_months {
            Some(months) => months
                .into_iter()
                .map(|data| Month {
                    id: data.id,
                    name: data.name,
                    year: data.year,
                })
                .collect(),
            None => current_year_months(),
        };

        Ok((records, months))
    }

    #[tracing::instrument(skip(self))]
    pub async fn justification_reasons(&self) -> ApiResult<Vec<JustificationReason>> {
        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;
        let envelope = self.client.justification_reasons(&token).await?;
        if envelope.header.code != CODE_OK {
            return Err(ApiError::message(envelope.header.message));
        }

        Ok(envelope
            .body
            .into_iter()
            .map(|data| JustificationReason {
                id: data.id,
                description: data.descripcion,
            })
            .collect())
    }

    /// Files a justification for an attendance row, optionally attaching an
    /// image or PDF. Succeeds only when the body code is 200 AND the body's
    /// own success flag is set.
    #[tracing::instrument(skip(self, description, file))]
    pub async fn submit_justification(
        &self,
        attendance_id: &str,
        description: &str,
        reason_id: Option<i32>,
        file: Option<JustificationFile>,
    ) -> ApiResult<String> {
        if description.trim().is_empty() {
            return Err(ApiError::message("La descripción es requerida"));
        }
        let Some(reason_id) = reason_id else {
            return Err(ApiError::message("Selecciona un motivo"));
        };

        let token = self.session.token().ok_or_else(ApiError::not_authenticated)?;

        let request = ReportJustificationRequest {
            attendance_id: attendance_id.to_string(),
            description: description.to_string(),
            device_id: Some(self.prefs.device_id()),
            // The binary part carries the evidence when a file is attached
            evidence_url: None,
            motivo_id: Some(reason_id),
        };

        let envelope = self
            .client
            .submit_justification(&token, &request, file.as_ref())
            .await?;
        if envelope.header.code == CODE_OK && envelope.body.success {
            Ok(envelope.body.message)
        } else {
            Err(ApiError::message(envelope.body.message))
        }
    }
}
