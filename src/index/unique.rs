use crate::arr_helpers::{compress, compress_not};
use crate::error::IndexError;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::ops::Deref;

/// Index of unique values in arbitrary order, e.g. sample identifiers.
#[derive(Clone, Debug)]
pub struct UniqueIndex<K> {
    values: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone + Debug> UniqueIndex<K> {
    pub fn new(values: Vec<K>) -> Result<Self, IndexError<K>> {
        let mut positions = HashMap::with_capacity(values.len());
        for (ix, v) in values.iter().enumerate() {
            if positions.insert(v.clone(), ix).is_some() {
                return Err(IndexError::NotUnique { key: v.clone() });
            }
        }
        Ok(Self { values, positions })
    }

    pub fn as_slice(&self) -> &[K] {
        &self.values
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn locate_key(&self, key: &K) -> Result<usize, IndexError<K>> {
        self.positions
            .get(key)
            .copied()
            .ok_or_else(|| IndexError::KeyNotFound { key: key.clone() })
    }

    /// Masks over `self` and `other` marking values present in both.
    pub fn locate_intersection(&self, other: &UniqueIndex<K>) -> (Vec<bool>, Vec<bool>) {
        let loc = self.values.iter().map(|v| other.contains(v)).collect();
        let loc_other = other.values.iter().map(|v| self.contains(v)).collect();
        (loc, loc_other)
    }

    /// Mask of values in `self` that are also in `keys`.
    ///
    /// `keys` have to be unique. If `strict`, fails with the keys that are
    /// not present in `self`.
    pub fn locate_keys(&self, keys: &[K], strict: bool) -> Result<Vec<bool>, IndexError<K>> {
        let keys = UniqueIndex::new(keys.to_vec())?;
        let (loc, found) = self.locate_intersection(&keys);
        if strict && found.contains(&false) {
            return Err(IndexError::KeysNotFound {
                keys: compress_not(&found, keys.as_slice()),
            });
        }
        Ok(loc)
    }

    /// Values also present in `other`, in the order of `self`.
    pub fn intersect(&self, other: &UniqueIndex<K>) -> UniqueIndex<K> {
        let (loc, _) = self.locate_intersection(other);
        let values = compress(&loc, &self.values);
        let positions = values
            .iter()
            .enumerate()
            .map(|(ix, v)| (v.clone(), ix))
            .collect();
        Self { values, positions }
    }
}

impl<K> Deref for UniqueIndex<K> {
    type Target = [K];

    fn deref(&self) -> &[K] {
        &self.values
    }
}

impl<K: PartialEq> PartialEq for UniqueIndex<K> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Debug> Display for UniqueIndex<K> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "UniqueIndex({})", self.values.len())?;
        write!(f, "{:?}", self.values)
    }
}
