pub mod common;
pub mod dto;
pub mod handlers;
pub mod router;

pub use router::create_api_router;
