//! Client for the network's account and stats service.

mod client;
mod error;
mod model;
pub mod response;
pub mod transaction;
mod uuid;

pub use client::{HttpServiceClient, RemoteService};
pub use error::{RemoteError, RemoteResult, ValidationErrors};
pub use model::{
    INSUFFICIENT_FUNDS_MESSAGE, IncrementResult, LinkOutcome, PlayerRecord, PlayerStats,
    TransactionResult, TransactionStatus,
};
pub use transaction::{StatItem, StatTransaction};
pub use uuid::{ParseUuidError, PlayerUuid};
