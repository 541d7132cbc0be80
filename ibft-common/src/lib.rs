//! Shared types for the IBFT round machinery: validator identities,
//! validator sets and the consensus message envelope.

pub mod address;
pub mod message;
pub mod validator;

pub use address::{Address, AddressError};
pub use message::{Message, MessageCode, MessageError};
pub use validator::{OrderedValidatorSet, Validator, ValidatorSet, ValidatorSetConfig};
