pub mod client;
pub mod error;
pub mod templates;

pub use client::{EmailClient, Mailer};
pub use error::EmailError;
