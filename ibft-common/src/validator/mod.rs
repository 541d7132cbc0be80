//! validator
//!
//! Validator descriptors and the validator-set abstraction consumed by the
//! round bookkeeping in `ibft-consensus`.
//!
//! A validator set is an ordered, immutable snapshot of the participants
//! allowed to send messages in one round. It is shared between components
//! behind an `Arc<dyn ValidatorSet>`.

pub mod config;
pub mod ordered;

use std::fmt;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressError};

pub use config::ValidatorSetConfig;
pub use ordered::OrderedValidatorSet;

/// A single consensus participant.
///
/// Serialized as its public key only; the address is re-derived on the way
/// back in, so a decoded validator always owns the key it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ValidatorKey", into = "ValidatorKey")]
pub struct Validator {
    address: Address,
    public_key: [u8; 32],
}

#[derive(Serialize, Deserialize)]
struct ValidatorKey {
    #[serde(with = "hex::serde")]
    public_key: [u8; 32],
}

impl TryFrom<ValidatorKey> for Validator {
    type Error = AddressError;

    fn try_from(key: ValidatorKey) -> Result<Self, Self::Error> {
        Validator::from_bytes(&key.public_key)
    }
}

impl From<Validator> for ValidatorKey {
    fn from(validator: Validator) -> Self {
        Self {
            public_key: validator.public_key,
        }
    }
}

impl Validator {
    pub fn new(public_key: &VerifyingKey) -> Self {
        Self {
            address: Address::from_public_key(public_key),
            public_key: public_key.to_bytes(),
        }
    }

    /// Builds a validator from raw key bytes, rejecting bytes that are not a
    /// valid ed25519 point.
    pub fn from_bytes(public_key: &[u8; 32]) -> Result<Self, AddressError> {
        let key = VerifyingKey::from_bytes(public_key)?;
        Ok(Self::new(&key))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey, AddressError> {
        Ok(VerifyingKey::from_bytes(&self.public_key)?)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Read-only view over the validators of a round.
///
/// Positions returned by [`ValidatorSet::get_by_address`] follow the set's own
/// ordering and stay stable for the lifetime of the snapshot.
pub trait ValidatorSet: fmt::Debug + Send + Sync {
    /// Total number of validators.
    fn size(&self) -> usize;

    /// All validators in positional order.
    fn list(&self) -> &[Validator];

    fn get_by_index(&self, index: usize) -> Option<&Validator>;

    /// Membership test. Returns the validator's position and descriptor.
    fn get_by_address(&self, address: &Address) -> Option<(usize, &Validator)>;

    fn contains(&self, address: &Address) -> bool {
        self.get_by_address(address).is_some()
    }

    fn public_key_of(&self, address: &Address) -> Option<[u8; 32]> {
        self.get_by_address(address).map(|(_, v)| *v.public_key())
    }
}
