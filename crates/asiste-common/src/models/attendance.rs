use chrono::Datelike;

/// One attendance row for the monthly listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: String,
    pub date: String,
    pub scheduled_time: String,
    pub real_in: Option<String>,
    pub real_out: Option<String>,
    pub status: AttendanceStatus,
    /// Whether the employee may still file a justification for this row.
    pub can_report: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Pending,
}

impl AttendanceStatus {
    /// Maps the server's Spanish status strings. Unknown values are treated
    /// as still-pending rather than failing the whole listing.
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "ASISTENCIA" => AttendanceStatus::Present,
            "TARDANZA" => AttendanceStatus::Late,
            "FALTA" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Pending,
        }
    }
}

/// Selectable month in the attendance filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Month {
    pub id: u32,
    pub name: String,
    pub year: String,
}

/// Reason code selectable when filing a justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JustificationReason {
    pub id: i32,
    pub description: String,
}

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// The twelve months of the current year, used when the API does not send
/// its own `availableMonths` list.
pub fn current_year_months() -> Vec<Month> {
    let year = chrono::Utc::now().year().to_string();
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Month {
            id: (i + 1) as u32,
            name: (*name).to_string(),
            year: year.clone(),
        })
        .collect()
}
