use serde::Serialize;
use std::ops::Range;

/// Location of a key within an index.
///
/// A key that occurs once is found at a single position, duplicated keys
/// span a contiguous range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Loc {
    Position(usize),
    Range(Range<usize>),
}

impl Loc {
    pub(crate) fn from_bounds(start: usize, stop: usize) -> Self {
        if stop - start == 1 {
            Loc::Position(start)
        } else {
            Loc::Range(start..stop)
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Loc::Position(p) => *p,
            Loc::Range(r) => r.start,
        }
    }

    /// Number of entries covered.
    pub fn len(&self) -> usize {
        match self {
            Loc::Position(_) => 1,
            Loc::Range(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range covering the location, a single position becomes `p..p + 1`.
    pub fn to_range(&self) -> Range<usize> {
        match self {
            Loc::Position(p) => *p..*p + 1,
            Loc::Range(r) => r.clone(),
        }
    }

    /// Shift by `offset`, used to translate sub-index locations.
    pub fn offset(self, offset: usize) -> Self {
        match self {
            Loc::Position(p) => Loc::Position(p + offset),
            Loc::Range(r) => Loc::Range(r.start + offset..r.end + offset),
        }
    }
}
