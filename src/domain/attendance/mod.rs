pub mod model;
pub mod repository;

pub use model::{AttendanceAction, AttendanceRecord};
pub use repository::AttendanceRepository;
