/// Active (or just finished) shift shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: String,
    pub status: ShiftStatus,
    /// "2025-12-27T08:00" or plain "08:00", as sent by the server.
    pub scheduled_start_time: String,
    pub scheduled_end_time: String,
    /// Only present once the shift is completed.
    pub next_shift_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftStatus {
    Active,
    Completed,
}

impl ShiftStatus {
    /// Lenient parse of the wire status string. Unknown values fall back to
    /// `Completed` so a new server-side status never breaks the client.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => ShiftStatus::Active,
            _ => ShiftStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Active => "ACTIVE",
            ShiftStatus::Completed => "COMPLETED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(ShiftStatus::parse_lossy("ACTIVE"), ShiftStatus::Active);
        assert_eq!(ShiftStatus::parse_lossy("COMPLETED"), ShiftStatus::Completed);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(ShiftStatus::parse_lossy(" active "), ShiftStatus::Active);
        assert_eq!(ShiftStatus::parse_lossy("Completed"), ShiftStatus::Completed);
    }

    #[test]
    fn test_unknown_status_falls_back_to_completed() {
        assert_eq!(ShiftStatus::parse_lossy("PAUSED"), ShiftStatus::Completed);
        assert_eq!(ShiftStatus::parse_lossy(""), ShiftStatus::Completed);
    }
}
