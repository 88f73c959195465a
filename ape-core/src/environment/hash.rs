use std::hash::Hasher;

use rustc_hash::{FxHashMap, FxHasher};

use crate::eval::prelude::RuntimeError;

use super::prelude::{Value, ValueType};

/// Content digest of a hashable value, tagged with its type so `1` and `true` differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub value_type: ValueType,
    pub value: u64,
}

impl Value {
    pub fn hash_key(&self) -> Result<HashKey, RuntimeError> {
        let value = match self {
            Value::Integer { value } => *value as u64,
            Value::Boolean { value } => u64::from(*value),
            Value::String { value } => {
                let mut hasher = FxHasher::default();
                hasher.write(value.as_bytes());
                hasher.finish()
            },
            other => return Err(RuntimeError::UnusableAsHashKey {
                value_type: other.value_type()
            }),
        };

        Ok(HashKey { value_type: self.value_type(), value })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Insertion-ordered pairs with a key index. Overwriting keeps the original position.
#[derive(Debug, Clone, Default)]
pub struct HashPairs {
    entries: Vec<HashPair>,
    index: FxHashMap<HashKey, usize>,
}

impl HashPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Value, value: Value) -> Result<(), RuntimeError> {
        let hash_key = key.hash_key()?;

        match self.index.get(&hash_key) {
            Some(&position) => self.entries[position] = HashPair { key, value },
            None => {
                self.index.insert(hash_key, self.entries.len());
                self.entries.push(HashPair { key, value });
            }
        }

        Ok(())
    }

    pub fn remove(&mut self, key: &Value) -> Result<Option<HashPair>, RuntimeError> {
        let Some(position) = self.index.remove(&key.hash_key()?) else {
            return Ok(None);
        };

        let removed = self.entries.remove(position);

        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        Ok(Some(removed))
    }

    pub fn get(&self, key: &Value) -> Result<Option<&HashPair>, RuntimeError> {
        let hash_key = key.hash_key()?;

        Ok(self.index.get(&hash_key).map(|&position| &self.entries[position]))
    }

    pub fn contains(&self, key: &Value) -> Result<bool, RuntimeError> {
        Ok(self.index.contains_key(&key.hash_key()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for HashPairs {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
