//! message.rs
//!
//! Consensus message envelope exchanged between validators during a round.
//!
//! The envelope carries the sender's [`Address`] in clear so that round
//! bookkeeping can route and admit messages without decoding the payload.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::Address;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Message codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Unknown message code: {0}")]
    UnknownCode(u64),
}

/// Protocol step a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCode {
    Preprepare,
    Prepare,
    Commit,
    RoundChange,
}

impl From<MessageCode> for u64 {
    fn from(code: MessageCode) -> Self {
        match code {
            MessageCode::Preprepare => 0,
            MessageCode::Prepare => 1,
            MessageCode::Commit => 2,
            MessageCode::RoundChange => 3,
        }
    }
}

impl TryFrom<u64> for MessageCode {
    type Error = MessageError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageCode::Preprepare),
            1 => Ok(MessageCode::Prepare),
            2 => Ok(MessageCode::Commit),
            3 => Ok(MessageCode::RoundChange),
            other => Err(MessageError::UnknownCode(other)),
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageCode::Preprepare => "PRE-PREPARE",
            MessageCode::Prepare => "PREPARE",
            MessageCode::Commit => "COMMIT",
            MessageCode::RoundChange => "ROUND-CHANGE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub code: MessageCode,
    /// Encoded protocol payload. Opaque at this layer.
    pub payload: Vec<u8>,
    pub address: Address,
    pub signature: Vec<u8>,
    pub committed_seal: Vec<u8>,
}

impl Message {
    pub fn new(code: MessageCode, payload: Vec<u8>, address: Address) -> Self {
        Self {
            code,
            payload,
            address,
            signature: Vec::new(),
            committed_seal: Vec::new(),
        }
    }

    pub fn sender(&self) -> &Address {
        &self.address
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Bytes covered by the sender's signature: the message with `signature`
    /// cleared.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, MessageError> {
        let unsigned = Message {
            signature: Vec::new(),
            ..self.clone()
        };
        unsigned.to_bytes()
    }
}
