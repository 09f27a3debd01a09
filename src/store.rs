use bytes::Bytes;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const NOT_AN_INTEGER: &str = "value is not an integer or out of range";

/// The Store holds every key-value pair of the server. It is designed to be shared between
/// connections: cloning it is cheap and every clone points to the same data.
///
/// All access goes through [`InnerStore::lock`]. A command holds the lock for as long as it runs,
/// so read-modify-write commands and renames are atomic with respect to every other command.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<InnerStore>,
}

impl Store {
    pub fn new() -> Store {
        Self::default()
    }
}

impl Deref for Store {
    type Target = InnerStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Default)]
pub struct InnerStore {
    state: Mutex<State>,
}

impl InnerStore {
    pub fn lock(&self) -> InnerStoreLocked<'_> {
        // Every mutation is a single map operation, so a poisoned map is still consistent.
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        InnerStoreLocked { state }
    }
}

pub struct InnerStoreLocked<'a> {
    state: MutexGuard<'a, State>,
}

impl<'a> InnerStoreLocked<'a> {
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.state.keys.get(key).cloned()
    }

    pub fn set(&mut self, key: String, value: Bytes) {
        self.state.keys.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Bytes> {
        self.state.keys.remove(key)
    }

    /// Moves the value stored at `from` to `to`, replacing whatever `to` held. Returns `false`,
    /// leaving the store untouched, when `from` does not exist.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.state.keys.remove(from) {
            Some(value) => {
                self.state.keys.insert(to.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.state.keys.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.state.keys.len()
    }

    /// A snapshot of the keys present when the call was made.
    pub fn keys(&self) -> Vec<String> {
        self.state.keys.keys().cloned().collect()
    }

    /// Adds `increment` to the integer stored at `key`, treating a missing key as `0`.
    pub fn incr_by(&mut self, key: &str, increment: i64) -> Result<i64, String> {
        let current = match self.state.keys.get(key) {
            Some(value) => std::str::from_utf8(value.as_ref())
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| NOT_AN_INTEGER.to_string())?,
            None => 0,
        };

        let value = current
            .checked_add(increment)
            .ok_or_else(|| NOT_AN_INTEGER.to_string())?;

        self.set(key.to_string(), value.to_string().into());

        Ok(value)
    }
}

#[derive(Default)]
struct State {
    keys: HashMap<String, Bytes>,
}
