pub mod client;
pub mod error;
pub mod report;
pub mod types;

pub use client::{CreditBureau, ScpcClient};
pub use error::ScpcError;
pub use report::{BureauReport, DecisionKind, ScoreModel};
pub use types::Contract;
