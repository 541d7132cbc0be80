use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, warn};

use ibft_common::{Address, Message, ValidatorSet};

use crate::error::MessageSetError;

/// Collects at most one message per validator for a single round/view.
///
/// Every message is checked against the round's validator snapshot before it
/// is stored. A second message from the same validator replaces the first;
/// equivocation is not detected here.
///
/// All operations take `&self` and serialize on one internal lock, so a
/// `MessageSet` can be shared between connection handlers behind an `Arc`.
#[derive(Debug)]
pub struct MessageSet {
    validators: Arc<dyn ValidatorSet>,
    messages: Mutex<HashMap<Address, Message>>,
}

impl MessageSet {
    /// Creates an empty set bound to the given validator snapshot.
    pub fn new(validators: Arc<dyn ValidatorSet>) -> Self {
        Self {
            validators,
            messages: Mutex::new(HashMap::new()),
        }
    }

    /// Admits `msg` if its sender belongs to the validator set.
    ///
    /// Membership check and insertion happen under the same lock.
    pub fn add(&self, msg: Message) -> Result<(), MessageSetError> {
        let mut messages = self.lock();

        let sender = *msg.sender();
        if !self.validators.contains(&sender) {
            warn!(sender = %sender, code = %msg.code, "rejecting message from non-validator");
            return Err(MessageSetError::UnauthorizedSender(sender));
        }

        let code = msg.code;
        if messages.insert(sender, msg).is_some() {
            debug!(sender = %sender, code = %code, "replaced message");
        } else {
            debug!(sender = %sender, code = %code, total = messages.len(), "added message");
        }
        Ok(())
    }

    /// Position of `address` in the validator set's ordering.
    pub fn index_of(&self, address: &Address) -> Result<usize, MessageSetError> {
        let _guard = self.lock();

        self.validators
            .get_by_address(address)
            .map(|(index, _)| index)
            .ok_or(MessageSetError::UnauthorizedSender(*address))
    }

    pub fn public_key_of(&self, address: &Address) -> Result<[u8; 32], MessageSetError> {
        let _guard = self.lock();

        self.validators
            .public_key_of(address)
            .ok_or(MessageSetError::UnauthorizedSender(*address))
    }

    pub fn validator_set_size(&self) -> usize {
        self.validators.size()
    }

    pub fn validator_set(&self) -> &Arc<dyn ValidatorSet> {
        &self.validators
    }

    /// Drops the message stored for `address`, if any.
    pub fn remove(&self, address: &Address) {
        if self.lock().remove(address).is_some() {
            debug!(sender = %address, "removed message");
        }
    }

    /// Copy of every stored message. Order is unspecified.
    pub fn values(&self) -> Vec<Message> {
        self.lock().values().cloned().collect()
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get(&self, address: &Address) -> Option<Message> {
        self.lock().get(address).cloned()
    }

    // Every critical section is a single map call, so a panic elsewhere
    // cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<Address, Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for MessageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.lock();
        let senders = messages
            .keys()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[<{}> {}]", messages.len(), senders)
    }
}
