pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::specialty_routes;
pub use services::{fallback_specialties, SpecialtyService, SPECIALTY_CACHE_TTL};
