//! Batching, grouping and filtering adaptors for iterators.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use crate::error::ExtensionError;

/// Extension methods available on every iterator.
///
/// # Examples
///
/// ```
/// use extkit_common::collections::IteratorExt;
///
/// let batches: Vec<Vec<i32>> = (1..=7).batches(3).unwrap().collect();
/// assert_eq!(batches, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
///
/// let unique: Vec<i32> = [1, 2, 1, 3, 2].into_iter().distinct_by(|n| *n).collect();
/// assert_eq!(unique, vec![1, 2, 3]);
/// ```
pub trait IteratorExt: Iterator + Sized {
    /// Lazily split into `Vec`s of `size` items; the last one holds whatever
    /// remains.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when `size` is zero.
    fn batches(self, size: usize) -> Result<Batches<Self>, ExtensionError> {
        if size == 0 {
            return Err(ExtensionError::out_of_range(
                "size",
                "batch size must be greater than zero",
            ));
        }
        Ok(Batches { iter: self, size })
    }

    /// Call `action` once per batch, flushing a final partial batch.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when `size` is zero; nothing is consumed in that case.
    fn for_each_batch<F>(self, size: usize, action: F) -> Result<(), ExtensionError>
    where
        F: FnMut(Vec<Self::Item>),
    {
        self.batches(size)?.for_each(action);
        Ok(())
    }

    /// Group by key. Groups come out in the order their key was first seen;
    /// items keep their encounter order inside a group.
    fn to_groups<K, F>(self, mut key_fn: F) -> Vec<Vec<Self::Item>>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<Vec<Self::Item>> = Vec::new();
        for item in self {
            let slot = *slots.entry(key_fn(&item)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(item);
        }
        groups
    }

    /// Keep the first item for each key. Lazy, so it works on unbounded input.
    fn distinct_by<K, F>(self, key_fn: F) -> DistinctBy<Self, K, F>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        DistinctBy {
            iter: self,
            key_fn,
            seen: HashSet::new(),
        }
    }

    /// Items strictly after the first match; nothing when no item matches.
    fn after_first<P>(self, predicate: P) -> AfterFirst<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        AfterFirst {
            iter: self,
            predicate: Some(predicate),
        }
    }

    /// Items strictly before the first match; everything when no item matches.
    fn before_first<P>(self, predicate: P) -> BeforeFirst<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        BeforeFirst {
            iter: self,
            predicate,
            done: false,
        }
    }

    /// Up to `count` items chosen uniformly without replacement, in random order.
    fn random_elements<R>(self, count: usize, rng: &mut R) -> Vec<Self::Item>
    where
        R: Rng + ?Sized,
    {
        let mut picked = self.choose_multiple(rng, count);
        picked.shuffle(rng);
        picked
    }
}

impl<I: Iterator> IteratorExt for I {}

/// Iterator returned by [`IteratorExt::batches`].
#[derive(Debug, Clone)]
pub struct Batches<I> {
    iter: I,
    size: usize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.iter.next()?;
        let mut batch = Vec::with_capacity(self.size);
        batch.push(first);
        batch.extend(self.iter.by_ref().take(self.size - 1));
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = self.iter.size_hint();
        (
            low.div_ceil(self.size),
            high.map(|high| high.div_ceil(self.size)),
        )
    }
}

/// Iterator returned by [`IteratorExt::distinct_by`].
pub struct DistinctBy<I, K, F> {
    iter: I,
    key_fn: F,
    seen: HashSet<K>,
}

impl<I, K, F> Iterator for DistinctBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            if self.seen.insert((self.key_fn)(&item)) {
                return Some(item);
            }
        }
    }
}

/// Iterator returned by [`IteratorExt::after_first`].
pub struct AfterFirst<I, P> {
    iter: I,
    // Taken once the first match has been skipped.
    predicate: Option<P>,
}

impl<I, P> Iterator for AfterFirst<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(mut predicate) = self.predicate.take() {
            loop {
                let item = self.iter.next()?;
                if predicate(&item) {
                    break;
                }
            }
        }
        self.iter.next()
    }
}

/// Iterator returned by [`IteratorExt::before_first`].
pub struct BeforeFirst<I, P> {
    iter: I,
    predicate: P,
    done: bool,
}

impl<I, P> Iterator for BeforeFirst<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.iter.next()?;
        if (self.predicate)(&item) {
            self.done = true;
            return None;
        }
        Some(item)
    }
}

/// `true` when `items` is present and yields at least one element.
///
/// ```
/// use extkit_common::collections::has_items;
///
/// assert!(has_items(Some(vec![1])));
/// assert!(!has_items(Some(Vec::<i32>::new())));
/// assert!(!has_items(None::<Vec<i32>>));
/// ```
pub fn has_items<I: IntoIterator>(items: Option<I>) -> bool {
    items.is_some_and(|items| items.into_iter().next().is_some())
}

/// Add `item` to `items` (created when absent) unless an equal item is
/// already there.
pub fn safe_add<T: PartialEq>(items: Option<Vec<T>>, item: T) -> Vec<T> {
    let mut items = items.unwrap_or_default();
    items.push_unique(item);
    items
}

/// In-place helpers for `Vec`.
pub trait VecExt<T> {
    /// Push `item` unless an equal item is present. Returns whether it was added.
    fn push_unique(&mut self, item: T) -> bool;
}

impl<T: PartialEq> VecExt<T> for Vec<T> {
    fn push_unique(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.push(item);
        true
    }
}
