// =====================================================================================
// MIS INTEGRATION GATEWAY
// =====================================================================================
//
// Talks to the legacy clinic hub service and turns its responses into the
// stable domain model used by the HTTP cells:
// - date_codec: `/Date(<millis>±HHMM)/` literals
// - wire:       raw envelopes, singular-or-array fields, MisResult
// - client:     MisTransport seam and the reqwest-backed MisClient
// - mapper:     raw payloads -> domain objects
//
// =====================================================================================

pub mod client;
pub mod date_codec;
pub mod error;
pub mod mapper;
pub mod models;
pub mod wire;

pub use client::{MisClient, MisTransport};
pub use error::{DateCodecError, GatewayError, ValidationError};
pub use models::{
    AppointmentSlot, DateRange, District, Doctor, Patient, PatientSearchCriteria, SlotContext,
    SlotTarget, Specialty,
};
pub use wire::{MisError, MisResult, OneOrMany};
