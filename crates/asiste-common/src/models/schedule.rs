/// One row of the weekly schedule screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleShift {
    /// "Lunes", "Martes", ...
    pub day: String,
    /// "22/12/2025"
    pub date: String,
    /// "08:00 - 17:30"
    pub time: String,
    /// "Turno Mañana", "Turno Noche", "Descanso"
    pub shift_type: String,
    pub confirmed: bool,
}
