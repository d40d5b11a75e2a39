pub mod attendance;
pub mod auth;
pub mod home;
pub mod schedule;

pub use attendance::AttendanceRepository;
pub use auth::AuthRepository;
pub use home::HomeRepository;
pub use schedule::ScheduleRepository;
