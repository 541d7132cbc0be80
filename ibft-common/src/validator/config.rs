use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::address::AddressError;

use super::{OrderedValidatorSet, Validator};

/// On-disk description of a round's validator snapshot.
///
/// ```json
/// { "validators": ["8a88e3dd74...", "..."] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetConfig {
    /// Hex-encoded ed25519 public keys.
    pub validators: Vec<String>,
}

impl ValidatorSetConfig {
    pub fn from_validators(validators: &[Validator]) -> Self {
        Self {
            validators: validators.iter().map(|v| hex::encode(v.public_key())).collect(),
        }
    }

    /// Decodes every key and builds the ordered snapshot.
    pub fn build(&self) -> Result<OrderedValidatorSet, AddressError> {
        let validators = self
            .validators
            .iter()
            .map(|encoded| {
                let bytes = hex::decode(encoded)?;
                let key: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
                Validator::from_bytes(&key)
            })
            .collect::<Result<Vec<_>, AddressError>>()?;

        Ok(OrderedValidatorSet::new(validators))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let parsed = serde_json::from_str::<ValidatorSetConfig>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(parsed)
    }
}
