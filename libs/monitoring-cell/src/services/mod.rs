pub mod mis_status;

pub use mis_status::MisStatusService;
