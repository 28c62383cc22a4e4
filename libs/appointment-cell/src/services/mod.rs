pub mod slots;

pub use slots::{SlotService, MISSING_SPECIALTY_MESSAGE};
