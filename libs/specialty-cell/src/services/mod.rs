pub mod specialty;

pub use specialty::{fallback_specialties, SpecialtyService, SPECIALTY_CACHE_TTL};
