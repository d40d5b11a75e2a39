//! Wire types for the self-service REST API.
//!
//! Every response is wrapped in `{ "body": ..., "header": { "code", "message" } }`.
//! The HTTP status and the body-level `header.code` are independent: a
//! request can succeed at the transport level and still carry a non-200
//! application code, so callers must check both.

use serde::{Deserialize, Serialize};

/// Application-level status attached to every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub code: i32,
    pub message: String,
}

/// `header.code` value that signals application-level success.
pub const CODE_OK: i32 = 200;

/// Generic `{ body, header }` wrapper shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub header: ResponseHeader,
    pub body: T,
}

// --- auth ---

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub dni: &'a str,
    pub clave: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginBody {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordBody {
    pub success: bool,
    pub message: String,
}

// --- home ---

#[derive(Debug, Clone, Deserialize)]
pub struct ShiftBody {
    /// Absent when the employee has no active shift right now.
    pub shift: Option<ShiftData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftData {
    pub id: String,
    /// "ACTIVE" or "COMPLETED".
    pub status: String,
    pub scheduled_start_time: String,
    pub scheduled_end_time: String,
    #[serde(default)]
    pub next_shift_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    #[serde(default)]
    pub dias_laborados: i32,
    #[serde(default)]
    pub puntualidad: i32,
}

// --- attendance ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBody {
    pub records: Vec<AttendanceRecordData>,
    /// The API may omit this; the client then builds the month list itself.
    #[serde(default)]
    pub available_months: Option<Vec<MonthData>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordData {
    pub id: String,
    pub date: String,
    pub scheduled_time: String,
    pub real_in: Option<String>,
    pub real_out: Option<String>,
    /// "ASISTENCIA", "TARDANZA", "FALTA", "PROCESO".
    pub status: String,
    pub can_report: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthData {
    pub id: u32,
    pub name: String,
    pub year: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JustificationReasonData {
    pub id: i32,
    pub descripcion: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportJustificationRequest {
    pub attendance_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Unused when a binary file part is attached instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub report_id: Option<String>,
}

// --- schedule ---

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleBody {
    pub shifts: Vec<ScheduleShiftData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleShiftData {
    pub day: String,
    pub date: String,
    pub time: String,
    pub shift_type: String,
    pub confirmed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let req = LoginRequest {
            dni: "12345678",
            clave: "secret",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["dni"], "12345678");
        assert_eq!(json["clave"], "secret");
    }

    #[test]
    fn test_change_password_request_is_camel_case() {
        let req = ChangePasswordRequest {
            current_password: "old",
            new_password: "new",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["currentPassword"], "old");
        assert_eq!(json["newPassword"], "new");
    }

    #[test]
    fn test_envelope_parses_wrapped_response() {
        let json = r#"{"header":{"code":200,"message":"ok"},"body":{"token":"a.b.c"}}"#;
        let env: Envelope<LoginBody> = serde_json::from_str(json).unwrap();
        assert_eq!(env.header.code, CODE_OK);
        assert_eq!(env.body.token, "a.b.c");
    }

    #[test]
    fn test_stats_body_defaults_missing_fields() {
        let json = r#"{"header":{"code":200,"message":"ok"},"body":{}}"#;
        let env: Envelope<StatsBody> = serde_json::from_str(json).unwrap();
        assert_eq!(env.body.dias_laborados, 0);
        assert_eq!(env.body.puntualidad, 0);
    }

    #[test]
    fn test_stats_body_wire_names() {
        let json = r#"{"diasLaborados":10,"puntualidad":80}"#;
        let body: StatsBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.dias_laborados, 10);
        assert_eq!(body.puntualidad, 80);
    }

    #[test]
    fn test_shift_body_without_active_shift() {
        let json = r#"{"shift":null}"#;
        let body: ShiftBody = serde_json::from_str(json).unwrap();
        assert!(body.shift.is_none());
    }

    #[test]
    fn test_report_request_omits_null_fields() {
        let req = ReportJustificationRequest {
            attendance_id: "a-1".to_string(),
            description: "llegué tarde".to_string(),
            device_id: None,
            evidence_url: None,
            motivo_id: Some(3),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["attendanceId"], "a-1");
        assert_eq!(json["motivoId"], 3);
        assert!(json.get("deviceId").is_none());
        assert!(json.get("evidenceUrl").is_none());
    }

    #[test]
    fn test_attendance_body_ignores_unknown_and_defaults_months() {
        let json = r#"{"records":[],"somethingNew":1}"#;
        let body: AttendanceBody = serde_json::from_str(json).unwrap();
        assert!(body.records.is_empty());
        assert!(body.available_months.is_none());
    }
}
