use crate::arr_helpers::{compress, compress_not};
use crate::error::IndexError;
use crate::index::loc::Loc;
use log::debug;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, Range};
use std::sync::OnceLock;

/// Index of sorted values, e.g. variant positions on a single chromosome.
///
/// Values must be monotonically increasing, duplicates are allowed.
/// An index either owns its values ([`SortedIndex::new`]) or borrows them
/// from the caller ([`SortedIndex::view`]). It is never modified after
/// construction; every sub-index derived from it is a new instance.
#[derive(Debug)]
pub struct SortedIndex<'a, K: Clone> {
    values: Cow<'a, [K]>,
    is_unique: OnceLock<bool>,
}

/// Position `i` of the first pair with `values[i] > values[i + 1]`.
pub(crate) fn unsorted_position<K: Ord>(values: &[K]) -> Option<usize> {
    values.windows(2).position(|w| w[0] > w[1])
}

fn check_sorted<K: Ord + Debug>(values: &[K]) -> Result<(), IndexError<K>> {
    match unsorted_position(values) {
        Some(position) => Err(IndexError::NotMonotonic { position }),
        None => Ok(()),
    }
}

impl<'a, K: Ord + Clone + Debug> SortedIndex<'a, K> {
    pub fn new(values: Vec<K>) -> Result<Self, IndexError<K>> {
        check_sorted(&values)?;
        debug!("Built sorted index over {} values", values.len());
        Ok(Self::from_sorted(Cow::Owned(values)))
    }

    /// Index over borrowed values, without copying them.
    pub fn view(values: &'a [K]) -> Result<Self, IndexError<K>> {
        check_sorted(values)?;
        Ok(Self::from_sorted(Cow::Borrowed(values)))
    }

    // callers guarantee that values are sorted
    pub(crate) fn from_sorted(values: Cow<'a, [K]>) -> Self {
        Self {
            values,
            is_unique: OnceLock::new(),
        }
    }

    pub fn as_slice(&self) -> &[K] {
        &self.values
    }

    /// True if there are no duplicate values.
    /// Computed on first access.
    pub fn is_unique(&self) -> bool {
        *self
            .is_unique
            .get_or_init(|| self.values.windows(2).all(|w| w[0] != w[1]))
    }

    pub fn into_owned(self) -> SortedIndex<'static, K>
    where
        K: 'static,
    {
        SortedIndex::from_sorted(Cow::Owned(self.values.into_owned()))
    }

    /// Contiguous sub-index borrowing from `self`.
    pub fn slice(&self, range: Range<usize>) -> SortedIndex<'_, K> {
        SortedIndex::from_sorted(Cow::Borrowed(&self.values[range]))
    }

    /// Values where `mask` is true.
    pub fn compress(&self, mask: &[bool]) -> SortedIndex<'a, K> {
        SortedIndex::from_sorted(Cow::Owned(compress(mask, self.as_slice())))
    }

    // [left, right) positions of values within the inclusive bounds
    fn span(&self, start: Option<&K>, stop: Option<&K>) -> (usize, usize) {
        let left = match start {
            Some(k) => self.values.partition_point(|v| v < k),
            None => 0,
        };
        let right = match stop {
            Some(k) => self.values.partition_point(|v| v <= k),
            None => self.values.len(),
        };
        (left, right)
    }

    /// Location of `key`, a range if `key` is duplicated.
    pub fn locate_key(&self, key: &K) -> Result<Loc, IndexError<K>> {
        let left = self.values.partition_point(|v| v < key);
        let right = left + self.values[left..].partition_point(|v| v <= key);
        if right == left {
            return Err(IndexError::KeyNotFound { key: key.clone() });
        }
        Ok(Loc::from_bounds(left, right))
    }

    /// Positions of all values within `start` and `stop` **inclusive**.
    /// A missing bound leaves that side open.
    pub fn locate_range(
        &self,
        start: Option<&K>,
        stop: Option<&K>,
    ) -> Result<Range<usize>, IndexError<K>> {
        let (left, right) = self.span(start, stop);
        if right <= left {
            return Err(IndexError::RangeNotFound {
                start: start.cloned(),
                stop: stop.cloned(),
            });
        }
        Ok(left..right)
    }

    /// Sub-index of all values within `start` and `stop` **inclusive**.
    /// Empty if no values are in range.
    pub fn intersect_range(&self, start: Option<&K>, stop: Option<&K>) -> SortedIndex<'_, K> {
        match self.locate_range(start, stop) {
            Ok(range) => self.slice(range),
            Err(_) => self.slice(0..0),
        }
    }

    /// Masks over `self` and `other` marking values present in both.
    ///
    /// Every occurrence of a shared value is marked, on both sides.
    pub fn locate_intersection(&self, other: &SortedIndex<'_, K>) -> (Vec<bool>, Vec<bool>) {
        let a = self.as_slice();
        let b = other.as_slice();
        let mut loc = vec![false; a.len()];
        let mut loc_other = vec![false; b.len()];
        let (mut i, mut j) = (0, 0);

        if self.is_unique() && other.is_unique() {
            while i < a.len() && j < b.len() {
                match a[i].cmp(&b[j]) {
                    Ordering::Less => i += 1,
                    Ordering::Greater => j += 1,
                    Ordering::Equal => {
                        loc[i] = true;
                        loc_other[j] = true;
                        i += 1;
                        j += 1;
                    }
                }
            }
        } else {
            while i < a.len() && j < b.len() {
                match a[i].cmp(&b[j]) {
                    Ordering::Less => i += 1,
                    Ordering::Greater => j += 1,
                    Ordering::Equal => {
                        let key = &a[i];
                        while i < a.len() && a[i] == *key {
                            loc[i] = true;
                            i += 1;
                        }
                        while j < b.len() && b[j] == *key {
                            loc_other[j] = true;
                            j += 1;
                        }
                    }
                }
            }
        }

        (loc, loc_other)
    }

    /// Mask of values in `self` that are also in `keys`.
    ///
    /// `keys` has to be sorted. If `strict`, fails with the keys that are
    /// not present in `self`.
    pub fn locate_keys(&self, keys: &[K], strict: bool) -> Result<Vec<bool>, IndexError<K>> {
        let keys = SortedIndex::view(keys)?;
        let (loc, found) = self.locate_intersection(&keys);
        if strict && found.contains(&false) {
            return Err(IndexError::KeysNotFound {
                keys: compress_not(&found, keys.as_slice()),
            });
        }
        Ok(loc)
    }

    /// Values also present in `other`.
    pub fn intersect(&self, other: &SortedIndex<'_, K>) -> SortedIndex<'a, K> {
        let (loc, _) = self.locate_intersection(other);
        self.compress(&loc)
    }

    /// Locate the intersection with a set of ranges, bounds inclusive.
    ///
    /// Returns a mask over `self` of the values within any of the ranges
    /// and a mask over the ranges of those containing at least one value.
    pub fn locate_intersection_ranges(
        &self,
        starts: &[K],
        stops: &[K],
    ) -> Result<(Vec<bool>, Vec<bool>), IndexError<K>> {
        if starts.len() != stops.len() {
            return Err(IndexError::RangeBoundsMisaligned {
                starts: starts.len(),
                stops: stops.len(),
            });
        }
        let mut loc = vec![false; self.len()];
        let loc_ranges = starts
            .iter()
            .zip(stops)
            .map(|(start, stop)| {
                let (left, right) = self.span(Some(start), Some(stop));
                if left < right {
                    loc[left..right].fill(true);
                    true
                } else {
                    false
                }
            })
            .collect();
        Ok((loc, loc_ranges))
    }

    /// Mask of values within any of the ranges, bounds inclusive.
    ///
    /// If `strict`, fails with the bounds of all ranges without values.
    pub fn locate_ranges(
        &self,
        starts: &[K],
        stops: &[K],
        strict: bool,
    ) -> Result<Vec<bool>, IndexError<K>> {
        let (loc, found) = self.locate_intersection_ranges(starts, stops)?;
        if strict && found.contains(&false) {
            return Err(IndexError::RangesNotFound {
                starts: compress_not(&found, starts),
                stops: compress_not(&found, stops),
            });
        }
        Ok(loc)
    }

    /// Values within any of the ranges, bounds inclusive.
    /// Only fails if `starts` and `stops` differ in length.
    pub fn intersect_ranges(
        &self,
        starts: &[K],
        stops: &[K],
    ) -> Result<SortedIndex<'a, K>, IndexError<K>> {
        let loc = self.locate_ranges(starts, stops, false)?;
        Ok(self.compress(&loc))
    }
}

impl<'a, K: Clone> Deref for SortedIndex<'a, K> {
    type Target = [K];

    fn deref(&self) -> &[K] {
        &self.values
    }
}

impl<'a, K: Clone> Clone for SortedIndex<'a, K> {
    // the uniqueness memo is not carried over
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            is_unique: OnceLock::new(),
        }
    }
}

impl<'a, 'b, K: Clone + PartialEq> PartialEq<SortedIndex<'b, K>> for SortedIndex<'a, K> {
    fn eq(&self, other: &SortedIndex<'b, K>) -> bool {
        self.values[..] == other.values[..]
    }
}

impl<'a, K: Clone + Debug> Display for SortedIndex<'a, K> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "SortedIndex({})", self.values.len())?;
        write!(f, "{:?}", &self.values[..])
    }
}

#[cfg(test)]
mod tests {
    use super::SortedIndex;
    use crate::error::IndexError;
    use crate::index::loc::Loc;

    fn make_test_index() -> SortedIndex<'static, i64> {
        SortedIndex::new(vec![3, 6, 11, 20, 35]).unwrap()
    }

    #[test]
    fn sorted_index_rejects_descending() {
        assert_eq!(
            SortedIndex::new(vec![5, 3, 1]).unwrap_err(),
            IndexError::NotMonotonic { position: 0 }
        );
        assert_eq!(
            SortedIndex::view(&[1, 2, 4, 3]).unwrap_err(),
            IndexError::NotMonotonic { position: 2 }
        );
        let idx = SortedIndex::new(vec![1, 1, 2, 2, 5]).unwrap();
        assert_eq!(idx.len(), 5);
    }

    #[test]
    fn sorted_index_is_unique() {
        assert!(!SortedIndex::new(vec![2, 5, 14, 15, 42, 42, 77])
            .unwrap()
            .is_unique());
        assert!(make_test_index().is_unique());
        assert!(SortedIndex::<i64>::new(vec![]).unwrap().is_unique());
        assert!(SortedIndex::new(vec![7]).unwrap().is_unique());
    }

    #[test]
    fn sorted_index_of_strings() {
        let idx = SortedIndex::new(vec!["a", "b", "b", "d"]).unwrap();
        assert_eq!(idx.locate_key(&"b").unwrap(), Loc::Range(1..3));
        assert!(SortedIndex::new(vec!["b", "a"]).is_err());
    }

    #[test]
    fn locate_key() {
        let idx = SortedIndex::new(vec![3, 6, 6, 11]).unwrap();
        assert_eq!(idx.locate_key(&3).unwrap(), Loc::Position(0));
        assert_eq!(idx.locate_key(&11).unwrap(), Loc::Position(3));
        assert_eq!(idx.locate_key(&6).unwrap(), Loc::Range(1..3));
        assert_eq!(
            idx.locate_key(&2).unwrap_err(),
            IndexError::KeyNotFound { key: 2 }
        );
        assert!(idx.locate_key(&7).is_err());
        assert!(idx.locate_key(&12).is_err());
    }

    #[test]
    fn locate_key_in_empty_index() {
        let idx = SortedIndex::<u32>::new(vec![]).unwrap();
        assert_eq!(
            idx.locate_key(&1).unwrap_err(),
            IndexError::KeyNotFound { key: 1 }
        );
        assert_eq!(
            idx.locate_range(None, None).unwrap_err(),
            IndexError::RangeNotFound {
                start: None,
                stop: None
            }
        );
        assert!(idx.intersect_range(None, None).is_empty());
    }

    #[test]
    fn locate_range() {
        let idx = make_test_index();
        assert_eq!(idx.locate_range(Some(&4), Some(&32)).unwrap(), 1..4);
        assert_eq!(idx[idx.locate_range(Some(&4), Some(&32)).unwrap()], [6, 11, 20]);
        // bounds are inclusive
        assert_eq!(idx.locate_range(Some(&6), Some(&20)).unwrap(), 1..4);
        assert_eq!(idx.locate_range(None, Some(&6)).unwrap(), 0..2);
        assert_eq!(idx.locate_range(Some(&20), None).unwrap(), 3..5);
        assert_eq!(idx.locate_range(None, None).unwrap(), 0..5);
        assert_eq!(
            idx.locate_range(Some(&12), Some(&19)).unwrap_err(),
            IndexError::RangeNotFound {
                start: Some(12),
                stop: Some(19)
            }
        );
        // inverted bounds never match
        assert!(idx.locate_range(Some(&20), Some(&6)).is_err());
        assert!(idx.locate_range(Some(&100), None).is_err());
    }

    #[test]
    fn intersect_range() {
        let idx = make_test_index();
        assert_eq!(idx.intersect_range(Some(&4), Some(&32)).as_slice(), &[6, 11, 20]);
        let empty = SortedIndex::new(vec![3, 6, 11]).unwrap();
        let empty = empty.intersect_range(Some(&100), Some(&200));
        assert!(empty.is_empty());
        assert!(empty.is_unique());
    }

    #[test]
    fn locate_intersection() {
        let idx1 = make_test_index();
        let idx2 = SortedIndex::new(vec![4, 6, 20, 39]).unwrap();
        let (loc1, loc2) = idx1.locate_intersection(&idx2);
        assert_eq!(loc1, vec![false, true, false, true, false]);
        assert_eq!(loc2, vec![false, true, true, false]);
        assert_eq!(idx1.compress(&loc1), idx2.compress(&loc2));
    }

    #[test]
    fn locate_intersection_with_duplicates() {
        let idx1 = SortedIndex::new(vec![1, 3, 3, 3, 7, 9]).unwrap();
        let idx2 = SortedIndex::new(vec![3, 3, 8, 9, 9]).unwrap();
        let (loc1, loc2) = idx1.locate_intersection(&idx2);
        assert_eq!(loc1, vec![false, true, true, true, false, true]);
        assert_eq!(loc2, vec![true, true, false, true, true]);
    }

    #[test]
    fn locate_keys() {
        let idx = make_test_index();
        assert_eq!(
            idx.locate_keys(&[4, 6, 20, 39], false).unwrap(),
            vec![false, true, false, true, false]
        );
        assert_eq!(
            idx.locate_keys(&[4, 6, 20, 39], true).unwrap_err(),
            IndexError::KeysNotFound { keys: vec![4, 39] }
        );
        assert_eq!(
            idx.locate_keys(&[6, 35], true).unwrap(),
            vec![false, true, false, false, true]
        );
        assert_eq!(
            idx.locate_keys(&[20, 6], false).unwrap_err(),
            IndexError::NotMonotonic { position: 0 }
        );
    }

    #[test]
    fn intersect() {
        let idx1 = make_test_index();
        let idx2 = SortedIndex::new(vec![4, 6, 20, 39]).unwrap();
        assert_eq!(idx1.intersect(&idx2).as_slice(), &[6, 20]);
        assert_eq!(idx2.intersect(&idx1).as_slice(), &[6, 20]);
    }

    #[test]
    fn locate_intersection_ranges() {
        let idx = make_test_index();
        let starts = [0, 6, 12, 31, 100];
        let stops = [2, 17, 15, 35, 120];
        let (loc, loc_ranges) = idx.locate_intersection_ranges(&starts, &stops).unwrap();
        assert_eq!(loc, vec![false, true, true, false, true]);
        assert_eq!(loc_ranges, vec![false, true, false, true, false]);
        assert_eq!(idx.compress(&loc).as_slice(), &[6, 11, 35]);
    }

    #[test]
    fn locate_intersection_overlapping_ranges() {
        let idx = make_test_index();
        let (loc, loc_ranges) = idx
            .locate_intersection_ranges(&[5, 10, 0], &[12, 21, 4])
            .unwrap();
        assert_eq!(loc, vec![true, true, true, true, false]);
        assert_eq!(loc_ranges, vec![true, true, true]);
    }

    #[test]
    fn locate_intersection_ranges_misaligned() {
        let idx = make_test_index();
        assert_eq!(
            idx.locate_intersection_ranges(&[1, 2], &[3]).unwrap_err(),
            IndexError::RangeBoundsMisaligned { starts: 2, stops: 1 }
        );
    }

    #[test]
    fn locate_ranges() {
        let idx = make_test_index();
        let starts = [0, 6, 12, 31, 100];
        let stops = [2, 17, 15, 35, 120];
        assert_eq!(
            idx.locate_ranges(&starts, &stops, false).unwrap(),
            vec![false, true, true, false, true]
        );
        assert_eq!(
            idx.locate_ranges(&starts, &stops, true).unwrap_err(),
            IndexError::RangesNotFound {
                starts: vec![0, 12, 100],
                stops: vec![2, 15, 120]
            }
        );
    }

    #[test]
    fn intersect_ranges() {
        let idx = make_test_index();
        let res = idx
            .intersect_ranges(&[0, 6, 12, 31, 100], &[2, 17, 15, 35, 120])
            .unwrap();
        assert_eq!(res.as_slice(), &[6, 11, 35]);
        assert!(idx.intersect_ranges(&[100], &[200]).unwrap().is_empty());
    }

    #[test]
    fn lookups_are_idempotent() {
        let idx = SortedIndex::new(vec![3, 6, 6, 11]).unwrap();
        let other = SortedIndex::new(vec![6, 11]).unwrap();
        let first = (idx.locate_key(&6), idx.locate_intersection(&other));
        assert!(!idx.is_unique());
        let second = (idx.locate_key(&6), idx.locate_intersection(&other));
        assert_eq!(first, second);
    }

    #[test]
    fn derived_indexes_recompute_uniqueness() {
        let idx = SortedIndex::new(vec![1, 2, 2, 3]).unwrap();
        assert!(!idx.is_unique());
        assert!(idx.slice(2..4).is_unique());
        assert!(idx.intersect_range(Some(&3), None).is_unique());
        assert!(!idx.clone().is_unique());
    }

    #[test]
    fn view_and_owned_agree() {
        let values = vec![1u64, 5, 5, 9];
        let view = SortedIndex::view(&values).unwrap();
        let owned = SortedIndex::new(values.clone()).unwrap();
        assert_eq!(view, owned);
        assert_eq!(view.locate_key(&5), owned.locate_key(&5));
        assert_eq!(view.into_owned(), owned);
    }

    #[test]
    fn display() {
        let idx = SortedIndex::new(vec![3, 6]).unwrap();
        assert_eq!(idx.to_string(), "SortedIndex(2)\n[3, 6]");
    }

    mod properties {
        use super::super::SortedIndex;
        use crate::index::loc::Loc;
        use proptest::prelude::*;

        fn sorted_values() -> impl Strategy<Value = Vec<u16>> {
            prop::collection::vec(0u16..200, 0..100).prop_map(|mut v| {
                v.sort_unstable();
                v
            })
        }

        proptest! {
            #[test]
            fn prop_locate_key_matches_scan(values in sorted_values(), key in 0u16..200) {
                let idx = SortedIndex::view(&values).unwrap();
                let hits: Vec<usize> = (0..values.len()).filter(|&i| values[i] == key).collect();
                match idx.locate_key(&key) {
                    Ok(Loc::Position(p)) => prop_assert_eq!(hits, vec![p]),
                    Ok(Loc::Range(r)) => {
                        prop_assert!(r.len() > 1);
                        prop_assert_eq!(hits, r.collect::<Vec<_>>());
                    }
                    Err(_) => prop_assert!(hits.is_empty()),
                }
            }

            #[test]
            fn prop_locate_range_matches_scan(
                values in sorted_values(),
                start in 0u16..200,
                stop in 0u16..200,
            ) {
                let idx = SortedIndex::view(&values).unwrap();
                let hits: Vec<usize> = (0..values.len())
                    .filter(|&i| start <= values[i] && values[i] <= stop)
                    .collect();
                match idx.locate_range(Some(&start), Some(&stop)) {
                    Ok(r) => prop_assert_eq!(hits, r.collect::<Vec<_>>()),
                    Err(_) => prop_assert!(hits.is_empty()),
                }
            }

            #[test]
            fn prop_locate_intersection_is_membership(a in sorted_values(), b in sorted_values()) {
                let idx_a = SortedIndex::view(&a).unwrap();
                let idx_b = SortedIndex::view(&b).unwrap();
                let (loc_a, loc_b) = idx_a.locate_intersection(&idx_b);
                for (v, found) in a.iter().zip(&loc_a) {
                    prop_assert_eq!(*found, b.contains(v));
                }
                for (v, found) in b.iter().zip(&loc_b) {
                    prop_assert_eq!(*found, a.contains(v));
                }
            }
        }
    }
}
