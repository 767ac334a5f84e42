use crate::error::{IndexError, MultiIndexError};
use crate::index::loc::Loc;
use crate::index::sorted::{unsorted_position, SortedIndex};
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Range;

/// Two-level index of sorted values, e.g. variant positions on several
/// chromosomes.
///
/// First level values must be sorted. Second level values must be sorted
/// within each run of equal first level values; this is checked when a run
/// is searched.
#[derive(Debug, Clone)]
pub struct SortedMultiIndex<'a, K1: Clone, K2: Clone> {
    outer: SortedIndex<'a, K1>,
    inner: Cow<'a, [K2]>,
}

impl<'a, K1, K2> SortedMultiIndex<'a, K1, K2>
where
    K1: Ord + Clone + Debug,
    K2: Ord + Clone + Debug,
{
    pub fn new(outer: Vec<K1>, inner: Vec<K2>) -> Result<Self, MultiIndexError<K1, K2>> {
        Self::from_levels(SortedIndex::new(outer), Cow::Owned(inner))
    }

    /// Index over borrowed levels, without copying them.
    pub fn view(outer: &'a [K1], inner: &'a [K2]) -> Result<Self, MultiIndexError<K1, K2>> {
        Self::from_levels(SortedIndex::view(outer), Cow::Borrowed(inner))
    }

    fn from_levels(
        outer: Result<SortedIndex<'a, K1>, IndexError<K1>>,
        inner: Cow<'a, [K2]>,
    ) -> Result<Self, MultiIndexError<K1, K2>> {
        let outer = outer.map_err(MultiIndexError::Outer)?;
        if outer.len() != inner.len() {
            return Err(MultiIndexError::LengthMismatch {
                outer: outer.len(),
                inner: inner.len(),
            });
        }
        Ok(Self { outer, inner })
    }

    pub fn outer(&self) -> &SortedIndex<'a, K1> {
        &self.outer
    }

    pub fn inner(&self) -> &[K2] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    // second level values of one outer group as a fresh index
    fn inner_group(
        &self,
        outer_key: &K1,
        range: &Range<usize>,
    ) -> Result<SortedIndex<'_, K2>, MultiIndexError<K1, K2>> {
        let values = &self.inner[range.clone()];
        if let Some(position) = unsorted_position(values) {
            return Err(MultiIndexError::InnerNotSorted {
                outer_key: outer_key.clone(),
                position: range.start + position,
            });
        }
        Ok(SortedIndex::from_sorted(Cow::Borrowed(values)))
    }

    fn locate_outer(&self, outer_key: &K1) -> Result<Loc, MultiIndexError<K1, K2>> {
        self.outer
            .locate_key(outer_key)
            .map_err(|_| MultiIndexError::OuterKeyNotFound {
                key: outer_key.clone(),
            })
    }

    /// Location of `outer_key`, or of (`outer_key`, `inner_key`) if given.
    /// A range if the key is duplicated.
    pub fn locate_key(
        &self,
        outer_key: &K1,
        inner_key: Option<&K2>,
    ) -> Result<Loc, MultiIndexError<K1, K2>> {
        let loc = self.locate_outer(outer_key)?;
        let inner_key = match inner_key {
            Some(k) => k,
            None => return Ok(loc),
        };
        let not_found = || MultiIndexError::KeyNotFound {
            outer_key: outer_key.clone(),
            inner_key: inner_key.clone(),
        };
        match loc {
            Loc::Range(range) => self
                .inner_group(outer_key, &range)?
                .locate_key(inner_key)
                .map(|loc| loc.offset(range.start))
                .map_err(|_| not_found()),
            Loc::Position(p) => {
                if self.inner[p] == *inner_key {
                    Ok(Loc::Position(p))
                } else {
                    Err(not_found())
                }
            }
        }
    }

    /// Positions of all entries of `outer_key` with second level values
    /// within `start` and `stop` **inclusive**. A missing bound leaves that
    /// side open.
    pub fn locate_range(
        &self,
        outer_key: &K1,
        start: Option<&K2>,
        stop: Option<&K2>,
    ) -> Result<Range<usize>, MultiIndexError<K1, K2>> {
        let loc = self.locate_outer(outer_key)?;
        if start.is_none() && stop.is_none() {
            return Ok(loc.to_range());
        }
        let not_found = || MultiIndexError::RangeNotFound {
            outer_key: outer_key.clone(),
            start: start.cloned(),
            stop: stop.cloned(),
        };
        match loc {
            Loc::Range(range) => self
                .inner_group(outer_key, &range)?
                .locate_range(start, stop)
                .map(|r| r.start + range.start..r.end + range.start)
                .map_err(|_| not_found()),
            Loc::Position(p) => {
                let v = &self.inner[p];
                if start.map_or(true, |s| s <= v) && stop.map_or(true, |s| v <= s) {
                    Ok(p..p + 1)
                } else {
                    Err(not_found())
                }
            }
        }
    }
}

impl<'a, K1: Clone, K2: Clone> Display for SortedMultiIndex<'a, K1, K2> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "SortedMultiIndex({})", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::SortedMultiIndex;
    use crate::error::{IndexError, MultiIndexError};
    use crate::index::loc::Loc;

    fn make_test_index() -> SortedMultiIndex<'static, &'static str, u32> {
        SortedMultiIndex::new(
            vec!["chr1", "chr1", "chr2", "chr2", "chr2", "chr3"],
            vec![1, 4, 2, 5, 5, 3],
        )
        .unwrap()
    }

    #[test]
    fn multi_index_construction() {
        let idx = make_test_index();
        assert_eq!(idx.len(), 6);
        assert_eq!(idx.to_string(), "SortedMultiIndex(6)");
        assert_eq!(
            SortedMultiIndex::new(vec!["chr2", "chr1"], vec![1, 2]).unwrap_err(),
            MultiIndexError::Outer(IndexError::NotMonotonic { position: 0 })
        );
        assert_eq!(
            SortedMultiIndex::new(vec!["chr1", "chr2"], vec![1, 2, 3]).unwrap_err(),
            MultiIndexError::LengthMismatch { outer: 2, inner: 3 }
        );
    }

    #[test]
    fn locate_key() {
        let idx = make_test_index();
        assert_eq!(idx.locate_key(&"chr1", None).unwrap(), Loc::Range(0..2));
        assert_eq!(idx.locate_key(&"chr1", Some(&4)).unwrap(), Loc::Position(1));
        assert_eq!(idx.locate_key(&"chr2", Some(&5)).unwrap(), Loc::Range(3..5));
        assert_eq!(idx.locate_key(&"chr3", None).unwrap(), Loc::Position(5));
        assert_eq!(idx.locate_key(&"chr3", Some(&3)).unwrap(), Loc::Position(5));
        assert_eq!(
            idx.locate_key(&"chr3", Some(&4)).unwrap_err(),
            MultiIndexError::KeyNotFound {
                outer_key: "chr3",
                inner_key: 4
            }
        );
        assert_eq!(
            idx.locate_key(&"chr2", Some(&3)).unwrap_err(),
            MultiIndexError::KeyNotFound {
                outer_key: "chr2",
                inner_key: 3
            }
        );
        assert_eq!(
            idx.locate_key(&"chrX", Some(&3)).unwrap_err(),
            MultiIndexError::OuterKeyNotFound { key: "chrX" }
        );
    }

    #[test]
    fn locate_range() {
        let idx = make_test_index();
        assert_eq!(idx.locate_range(&"chr1", None, None).unwrap(), 0..2);
        assert_eq!(idx.locate_range(&"chr1", Some(&1), Some(&4)).unwrap(), 0..2);
        assert_eq!(idx.locate_range(&"chr2", Some(&3), Some(&7)).unwrap(), 3..5);
        assert_eq!(idx.locate_range(&"chr2", None, Some(&2)).unwrap(), 2..3);
        assert_eq!(idx.locate_range(&"chr3", None, None).unwrap(), 5..6);
        assert_eq!(idx.locate_range(&"chr3", Some(&1), None).unwrap(), 5..6);
        assert_eq!(
            idx.locate_range(&"chr3", Some(&4), Some(&9)).unwrap_err(),
            MultiIndexError::RangeNotFound {
                outer_key: "chr3",
                start: Some(4),
                stop: Some(9)
            }
        );
        assert_eq!(
            idx.locate_range(&"chr1", Some(&2), Some(&3)).unwrap_err(),
            MultiIndexError::RangeNotFound {
                outer_key: "chr1",
                start: Some(2),
                stop: Some(3)
            }
        );
    }

    #[test]
    fn unsorted_inner_group_is_reported() {
        let idx = SortedMultiIndex::new(vec![1, 2, 2, 2], vec![9, 4, 8, 6]).unwrap();
        assert_eq!(idx.locate_key(&1, Some(&9)).unwrap(), Loc::Position(0));
        assert_eq!(
            idx.locate_key(&2, Some(&4)).unwrap_err(),
            MultiIndexError::InnerNotSorted {
                outer_key: 2,
                position: 2
            }
        );
        assert!(idx.locate_range(&2, Some(&4), None).is_err());
        // no second level search, no check
        assert_eq!(idx.locate_range(&2, None, None).unwrap(), 1..4);
    }

    #[test]
    fn view_over_borrowed_levels() {
        let chrom = vec![1u8, 1, 1, 2];
        let pos = vec![10u64, 20, 20, 5];
        let idx = SortedMultiIndex::view(&chrom, &pos).unwrap();
        assert_eq!(idx.locate_key(&1, Some(&20)).unwrap(), Loc::Range(1..3));
        assert_eq!(idx.inner(), &pos[..]);
        assert_eq!(idx.outer().as_slice(), &chrom[..]);
    }

    #[test]
    fn lookups_are_idempotent() {
        let idx = make_test_index();
        assert_eq!(
            idx.locate_key(&"chr2", Some(&5)),
            idx.locate_key(&"chr2", Some(&5))
        );
        assert_eq!(
            idx.locate_range(&"chr2", Some(&3), Some(&7)),
            idx.locate_range(&"chr2", Some(&3), Some(&7))
        );
    }
}
