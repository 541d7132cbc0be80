use std::{collections::HashSet, sync::Arc, thread};

use ed25519_dalek::SigningKey;
use ibft_common::{Address, Message, MessageCode, OrderedValidatorSet, Validator, ValidatorSet};
use ibft_consensus::{MessageSet, MessageSetError};
use rand::rngs::OsRng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn new_validator() -> Validator {
    Validator::new(&SigningKey::generate(&mut OsRng).verifying_key())
}

fn commit(from: &Address, payload: &[u8]) -> Message {
    Message::new(MessageCode::Commit, payload.to_vec(), *from)
}

#[test]
fn test_three_member_round() {
    init_tracing();

    let (a, b, c) = (new_validator(), new_validator(), new_validator());
    let d = new_validator();
    let validators = Arc::new(OrderedValidatorSet::new(vec![a.clone(), b.clone(), c]));
    let set = MessageSet::new(validators);

    let msg_a = commit(a.address(), b"block-1");
    set.add(msg_a).unwrap();
    assert_eq!(set.size(), 1);

    let err = set.add(commit(d.address(), b"block-1")).unwrap_err();
    assert_eq!(err, MessageSetError::UnauthorizedSender(*d.address()));
    assert_eq!(set.size(), 1);

    let msg2_a = commit(a.address(), b"block-2");
    set.add(msg2_a.clone()).unwrap();
    assert_eq!(set.size(), 1);
    assert_eq!(set.get(a.address()), Some(msg2_a));

    set.remove(b.address());
    assert_eq!(set.size(), 1);

    set.remove(a.address());
    assert_eq!(set.size(), 0);
}

#[test]
fn test_rejection_does_not_stop_other_senders() {
    init_tracing();

    let members: Vec<Validator> = (0..4).map(|_| new_validator()).collect();
    let set = MessageSet::new(Arc::new(OrderedValidatorSet::new(members.clone())));
    let outsider = new_validator();

    let mut rejected = 0;
    for (i, v) in members.iter().enumerate() {
        if set.add(commit(v.address(), b"ok")).is_err() {
            rejected += 1;
        }
        if i % 2 == 0 && set.add(commit(outsider.address(), b"bad")).is_err() {
            rejected += 1;
        }
    }

    assert_eq!(rejected, 2);
    assert_eq!(set.size(), members.len());
}

#[test]
fn test_concurrent_adds_from_distinct_validators() {
    init_tracing();

    const N: usize = 32;
    let members: Vec<Validator> = (0..N).map(|_| new_validator()).collect();
    let set = Arc::new(MessageSet::new(Arc::new(OrderedValidatorSet::new(members.clone()))));

    let handles: Vec<_> = members
        .iter()
        .map(|v| {
            let set = Arc::clone(&set);
            let address = *v.address();
            thread::spawn(move || set.add(commit(&address, address.as_bytes())))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(set.size(), N);

    let values = set.values();
    assert_eq!(values.len(), N);

    let senders: HashSet<Address> = values.iter().map(|m| *m.sender()).collect();
    let expected: HashSet<Address> = members.iter().map(|v| *v.address()).collect();
    assert_eq!(senders, expected);

    for m in &values {
        assert_eq!(m.payload, m.sender().as_bytes().to_vec());
    }
}

#[test]
fn test_concurrent_mixed_operations_stay_consistent() {
    init_tracing();

    let members: Vec<Validator> = (0..8).map(|_| new_validator()).collect();
    let outsider = new_validator();
    let set = Arc::new(MessageSet::new(Arc::new(OrderedValidatorSet::new(members.clone()))));

    let handles: Vec<_> = members
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let set = Arc::clone(&set);
            let address = *v.address();
            let outsider = *outsider.address();
            thread::spawn(move || {
                for round in 0..100u32 {
                    set.add(commit(&address, &round.to_le_bytes())).unwrap();
                    assert!(set.add(commit(&outsider, b"x")).is_err());
                    if i % 2 == 1 && round % 10 == 0 {
                        set.remove(&address);
                    }
                    let _ = set.values();
                    let _ = set.to_string();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Every thread's last operation was an add of round 99.
    assert_eq!(set.size(), members.len());
    for v in &members {
        let msg = set.get(v.address()).unwrap();
        assert_eq!(msg.payload, 99u32.to_le_bytes().to_vec());
    }
    assert!(set.get(outsider.address()).is_none());
}

#[test]
fn test_index_follows_validator_set_ordering() {
    let members: Vec<Validator> = (0..6).map(|_| new_validator()).collect();
    let validators = Arc::new(OrderedValidatorSet::new(members.clone()));
    let set = MessageSet::new(validators.clone());

    assert_eq!(set.validator_set_size(), 6);
    for (position, v) in validators.list().iter().enumerate() {
        assert_eq!(set.index_of(v.address()), Ok(position));
        assert_eq!(set.public_key_of(v.address()), Ok(*v.public_key()));
    }
}
