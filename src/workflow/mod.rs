mod board;
mod change;
mod request;
mod status;

pub use board::StatusBoard;
pub use change::{StatusChange, change_status};
pub use request::{CreditRequest, LeaseValues};
pub use status::{Status, validate_transition};
