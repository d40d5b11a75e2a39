//! HTTP client for the self-service backend.
//!
//! One method per endpoint; every call goes through
//! [`http::send_envelope`](crate::http::send_envelope), so callers always
//! get an [`ApiResult`] and never a raw transport error. Authenticated
//! endpoints take the bearer token explicitly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart;

use asiste_common::api::{
    AttendanceBody, ChangePasswordBody, ChangePasswordRequest, Envelope, JustificationReasonData,
    LoginBody, LoginRequest, ReportBody, ReportJustificationRequest, ScheduleBody, ShiftBody,
    StatsBody,
};

use crate::error::{ApiError, ApiResult};
use crate::http::send_envelope;

/// Binary attachment for a justification: an image or a PDF, told apart by
/// the filename extension.
#[derive(Debug, Clone)]
pub struct JustificationFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl JustificationFile {
    fn content_type(&self) -> &'static str {
        if self.file_name.to_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "image/jpeg"
        }
    }

    /// Quotes would corrupt the Content-Disposition header.
    fn safe_file_name(&self) -> String {
        self.file_name.replace('"', "")
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url),
        })
    }

    #[tracing::instrument(skip(self, clave))]
    pub async fn login(&self, dni: &str, clave: &str) -> ApiResult<Envelope<LoginBody>> {
        let url = format!("{}/auth/login", self.base_url);
        send_envelope(self.http.post(&url).json(&LoginRequest { dni, clave })).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<Envelope<ChangePasswordBody>> {
        let url = format!("{}/auth/change-password", self.base_url);
        let request = ChangePasswordRequest {
            current_password,
            new_password,
        };
        send_envelope(self.http.post(&url).bearer_auth(token).json(&request)).await
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn active_shift(&self, token: &str) -> ApiResult<Envelope<ShiftBody>> {
        let url = format!("{}/shifts/active", self.base_url);
        send_envelope(self.http.get(&url).bearer_auth(token)).await
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn stats(&self, token: &str) -> ApiResult<Envelope<StatsBody>> {
        let url = format!("{}/stats", self.base_url);
        send_envelope(self.http.get(&url).bearer_auth(token)).await
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn attendance(
        &self,
        token: &str,
        month_id: u32,
        year: i32,
    ) -> ApiResult<Envelope<Option<AttendanceBody>>> {
        let url = format!(
            "{}/attendance?monthId={}&year={}",
            self.base_url, month_id, year
        );
        send_envelope(self.http.get(&url).bearer_auth(token)).await
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn justification_reasons(
        &self,
        token: &str,
    ) -> ApiResult<Envelope<Vec<JustificationReasonData>>> {
        let url = format!("{}/attendance/justification/motives", self.base_url);
        send_envelope(self.http.get(&url).bearer_auth(token)).await
    }

    /// Multipart submission: a required `data` JSON part plus an optional
    /// binary `file` part.
    #[tracing::instrument(skip(self, token, request, file))]
    pub async fn submit_justification(
        &self,
        token: &str,
        request: &ReportJustificationRequest,
        file: Option<&JustificationFile>,
    ) -> ApiResult<Envelope<ReportBody>> {
        let url = format!("{}/attendance/report", self.base_url);

        let data_json = serde_json::to_string(request)
            .map_err(|err| ApiError::internal(anyhow::Error::new(err)))?;
        let data_part = multipart::Part::text(data_json)
            .mime_str("application/json")
            .map_err(|err| ApiError::internal(anyhow::Error::new(err)))?;
        let mut form = multipart::Form::new().part("data", data_part);

        if let Some(file) = file {
            let file_part = multipart::Part::bytes(file.bytes.clone())
                .file_name(file.safe_file_name())
                .mime_str(file.content_type())
                .map_err(|err| ApiError::internal(anyhow::Error::new(err)))?;
            form = form.part("file", file_part);
        }

        send_envelope(self.http.post(&url).bearer_auth(token).multipart(form)).await
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn schedule(&self, token: &str) -> ApiResult<Envelope<ScheduleBody>> {
        let url = format!("{}/schedule", self.base_url);
        send_envelope(self.http.get(&url).bearer_auth(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_content_type_by_extension() {
        let pdf = JustificationFile {
            file_name: "constancia.PDF".to_string(),
            bytes: vec![],
        };
        assert_eq!(pdf.content_type(), "application/pdf");

        let photo = JustificationFile {
            file_name: "foto.jpg".to_string(),
            bytes: vec![],
        };
        assert_eq!(photo.content_type(), "image/jpeg");

        // No extension defaults to an image
        let other = JustificationFile {
            file_name: "adjunto".to_string(),
            bytes: vec![],
        };
        assert_eq!(other.content_type(), "image/jpeg");
    }

    #[test]
    fn test_file_name_strips_quotes() {
        let file = JustificationFile {
            file_name: "mi \"foto\".jpg".to_string(),
            bytes: vec![],
        };
        assert_eq!(file.safe_file_name(), "mi foto.jpg");
    }
}
