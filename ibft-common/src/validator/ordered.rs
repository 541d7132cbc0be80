use std::collections::HashMap;

use ed25519_dalek::VerifyingKey;

use crate::address::Address;

use super::{Validator, ValidatorSet};

/// Default [`ValidatorSet`]: validators sorted ascending by address.
///
/// Sorting at construction makes the positional index identical on every
/// node that builds the set from the same membership, regardless of the
/// order keys were supplied in. Duplicate addresses are collapsed.
#[derive(Debug, Clone, Default)]
pub struct OrderedValidatorSet {
    validators: Vec<Validator>,
    positions: HashMap<Address, usize>,
}

impl OrderedValidatorSet {
    pub fn new(mut validators: Vec<Validator>) -> Self {
        validators.sort_by(|a, b| a.address().cmp(b.address()));
        validators.dedup_by(|a, b| a.address() == b.address());

        let positions = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (*v.address(), i))
            .collect();

        Self { validators, positions }
    }

    pub fn from_public_keys<'a>(keys: impl IntoIterator<Item = &'a VerifyingKey>) -> Self {
        Self::new(keys.into_iter().map(Validator::new).collect())
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.validators.iter().map(|v| *v.address()).collect()
    }
}

impl ValidatorSet for OrderedValidatorSet {
    fn size(&self) -> usize {
        self.validators.len()
    }

    fn list(&self) -> &[Validator] {
        &self.validators
    }

    fn get_by_index(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }

    fn get_by_address(&self, address: &Address) -> Option<(usize, &Validator)> {
        let index = *self.positions.get(address)?;
        self.validators.get(index).map(|v| (index, v))
    }
}
