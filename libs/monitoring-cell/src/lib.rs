// =====================================================================================
// MONITORING CELL - MIS CONNECTIVITY CHECK
// =====================================================================================
//
// Answers "can we reach the clinic MIS right now?" with the cheapest call the
// hub offers, the district list.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{MisStatus, MisStatusData, MonitoringError};
pub use router::mis_status_routes;
pub use services::MisStatusService;
