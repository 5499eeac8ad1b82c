pub mod model;
pub mod repository;

pub use model::{Zone, ZoneStatus};
pub use repository::ZoneRepository;
