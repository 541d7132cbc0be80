//! Per-round bookkeeping for the IBFT consensus engine.
//!
//! [`MessageSet`] accumulates the latest message from each validator of a
//! round so the round state machine can tally them against its quorum.

pub mod error;
mod message_set;

pub use error::MessageSetError;
pub use message_set::MessageSet;
