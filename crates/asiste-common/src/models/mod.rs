pub mod attendance;
pub mod schedule;
pub mod session;
pub mod shift;
pub mod stats;
