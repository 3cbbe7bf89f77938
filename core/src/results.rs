//! Results - What Producers Hand Back
//!
//! A producer calls its continuation with zero or more raw arguments
//! ([`ContinuationArgs`]). Those are collapsed into one [`Produced`] value per
//! producer and appended to a [`ResultsSequence`].
//!
//! `ResultsSequence` is persistent: appending returns a new sequence sharing
//! structure with the old one. A continuation that fires twice therefore
//! starts two independent downstream traversals from the same prefix.

use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Transforms a producer's raw continuation arguments into the stored result.
pub type Mapper<V> = Arc<dyn Fn(ContinuationArgs<V>) -> Produced<V> + Send + Sync>;

/// The ordered raw arguments a producer passes to its continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationArgs<V>(Vec<V>);

impl<V> ContinuationArgs<V> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The common case: a single argument.
    pub fn one(value: V) -> Self {
        Self(vec![value])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&V> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<V> {
        self.0
    }
}

impl<V> Default for ContinuationArgs<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> From<Vec<V>> for ContinuationArgs<V> {
    fn from(values: Vec<V>) -> Self {
        Self(values)
    }
}

impl<V> FromIterator<V> for ContinuationArgs<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V> IntoIterator for ContinuationArgs<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The value stored for one producer unit.
///
/// Serialises flat: a `Single` is written as its value and a `Tuple` as an
/// array. A single array-valued argument and a tuple of the same items
/// therefore produce identical JSON. Match on the variant (or use
/// [`ResultsSequence::get`]) when the distinction matters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Produced<V> {
    /// Exactly one argument, passed through unchanged.
    Single(V),
    /// Any other arity, kept as an ordered tuple.
    Tuple(Vec<V>),
}

impl<V> Produced<V> {
    /// The default collapse rule: arity 1 unwraps, every other arity
    /// (including zero) becomes a tuple.
    pub fn from_args(args: ContinuationArgs<V>) -> Self {
        let mut values = args.into_vec();
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Produced::Single(value);
            }
        }
        Produced::Tuple(values)
    }

    pub fn as_single(&self) -> Option<&V> {
        match self {
            Produced::Single(value) => Some(value),
            Produced::Tuple(_) => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[V]> {
        match self {
            Produced::Single(_) => None,
            Produced::Tuple(values) => Some(values),
        }
    }

    pub fn into_vec(self) -> Vec<V> {
        match self {
            Produced::Single(value) => vec![value],
            Produced::Tuple(values) => values,
        }
    }

    pub fn map<U, F>(self, mut f: F) -> Produced<U>
    where
        F: FnMut(V) -> U,
    {
        match self {
            Produced::Single(value) => Produced::Single(f(value)),
            Produced::Tuple(values) => Produced::Tuple(values.into_iter().map(f).collect()),
        }
    }
}

/// Ordered results, one per producer unit that has fired so far.
pub struct ResultsSequence<V: Clone> {
    inner: im::Vector<Produced<V>>,
}

impl<V: Clone> ResultsSequence<V> {
    pub fn new() -> Self {
        Self {
            inner: im::Vector::new(),
        }
    }

    /// Return a copy with `result` appended. `self` is left untouched.
    pub fn appended(&self, result: Produced<V>) -> Self {
        let mut inner = self.inner.clone();
        inner.push_back(result);
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Produced<V>> {
        self.inner.get(index)
    }

    /// Shortcut for results known to be single values.
    pub fn single(&self, index: usize) -> Option<&V> {
        self.get(index).and_then(Produced::as_single)
    }

    /// The payloads of `Single` results, in unit order. Tuples are skipped.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.iter().filter_map(Produced::as_single)
    }

    pub fn iter(&self) -> im::vector::Iter<'_, Produced<V>> {
        self.inner.iter()
    }

    pub fn to_vec(&self) -> Vec<Produced<V>> {
        self.inner.iter().cloned().collect()
    }
}

impl<V: Clone> Clone for ResultsSequence<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: Clone> Default for ResultsSequence<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for ResultsSequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}

impl<V: Clone + PartialEq> PartialEq for ResultsSequence<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Clone + PartialEq> PartialEq<Vec<Produced<V>>> for ResultsSequence<V> {
    fn eq(&self, other: &Vec<Produced<V>>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Clone> FromIterator<Produced<V>> for ResultsSequence<V> {
    fn from_iter<I: IntoIterator<Item = Produced<V>>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<V: Clone + Serialize> Serialize for ResultsSequence<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.inner.iter())
    }
}
