use ed25519_dalek::SignatureError;
use thiserror::Error;

/// Errors related specifically to validator address parsing and derivation.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The textual form was not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Decoded bytes do not have the expected length (20 for an address,
    /// 32 for a public key).
    #[error("Invalid length: {0}")]
    InvalidLength(usize),

    /// Key bytes do not describe a valid ed25519 point.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

impl From<SignatureError> for AddressError {
    fn from(err: SignatureError) -> Self {
        AddressError::InvalidPublicKey(err.to_string())
    }
}
