pub mod doctor;

pub use doctor::{DoctorService, MISSING_SPECIALTY_MESSAGE};
