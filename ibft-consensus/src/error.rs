use ibft_common::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageSetError {
    /// The address is not a member of the round's validator set.
    #[error("Unauthorized sender: {0}")]
    UnauthorizedSender(Address),
}
