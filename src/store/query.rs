use std::collections::btree_map;
use std::collections::{vec_deque, HashMap, VecDeque};
use std::hash::Hash;

use super::bucket::{Direction, EntryRef, Slot};

/// Lazy walk over a score range in priority order.
///
/// Borrowing the store keeps it read-only for the lifetime of the query.
/// Clone the query to walk the same range again.
pub struct Query<'a, K, T> {
    buckets: btree_map::Range<'a, i64, VecDeque<K>>,
    current: Option<(i64, vec_deque::Iter<'a, K>)>,
    entries: &'a HashMap<K, Slot<T>>,
    direction: Direction,
}

impl<K, T> Clone for Query<'_, K, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            current: self.current.clone(),
            entries: self.entries,
            direction: self.direction,
        }
    }
}

impl<'a, K, T> Query<'a, K, T> {
    pub(crate) fn new(
        buckets: btree_map::Range<'a, i64, VecDeque<K>>,
        entries: &'a HashMap<K, Slot<T>>,
        direction: Direction,
    ) -> Self {
        Self {
            buckets,
            current: None,
            entries,
            direction,
        }
    }

    fn next_bucket(&mut self) -> Option<(&'a i64, &'a VecDeque<K>)> {
        match self.direction {
            Direction::Ascending => self.buckets.next(),
            Direction::Descending => self.buckets.next_back(),
        }
    }
}

impl<'a, K, T> Iterator for Query<'a, K, T>
where
    K: Eq + Hash,
{
    type Item = EntryRef<'a, K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((score, ref mut ids)) = self.current {
                if let Some(id) = ids.next() {
                    let slot = self.entries.get(id)?;
                    return Some(EntryRef {
                        id,
                        score,
                        payload: &slot.payload,
                    });
                }
            }
            let (score, bucket) = self.next_bucket()?;
            self.current = Some((*score, bucket.iter()));
        }
    }
}
