//! Help request domain entities.

pub mod emergency;
pub mod model;
pub mod status;

pub use emergency::EmergencyLevel;
pub use model::{CreateHelpRequest, HelpRequest, UpdateHelpRequest};
pub use status::RequestStatus;
