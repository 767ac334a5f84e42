use crate::io::chromosome::Chromosome;
use std::fmt::Debug;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("max allele for packing is 14, found {found}")]
    MaxAlleleExceeded { found: i8 },
    #[error("min allele for packing is -1, found {found}")]
    MinAlleleExceeded { found: i8 },
    #[error("can only pack diploid calls, found ploidy {ploidy}")]
    NotDiploid { ploidy: usize },
    #[error("ploidy must be at least 1")]
    ZeroPloidy,
    #[error("buffer of length {len} does not match shape {shape:?}")]
    ShapeMismatch { len: usize, shape: Vec<usize> },
    #[error("calls of variant {variant} do not have a common shape")]
    RaggedCalls { variant: usize },
    #[error("selection index {index} out of bounds for axis of length {len}")]
    SelectionOutOfBounds { index: usize, len: usize },
    #[error("{n_haplotypes} haplotypes cannot be grouped into calls of ploidy {ploidy}")]
    IncompatiblePloidy { n_haplotypes: usize, ploidy: usize },
    #[error("Unknown chromosome name: {0}")]
    UnknownChromosome(String),
    #[error("Failed to parse line {line} of .bim file: {msg}")]
    BimParse { line: usize, msg: String },
    #[error("Invalid variant index: {0}")]
    VariantIndex(#[from] MultiIndexError<Chromosome, u64>),
    #[error("Invalid position index: {0}")]
    PositionIndex(#[from] IndexError<u64>),
    #[error("Failed to open source file")]
    FromFileOpeningError(#[from] io::Error),
    #[error("Failed to read csv")]
    Csv(#[from] csv::Error),
    #[error("Failed to serialize to json")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True if a lookup in a valid index found nothing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::VariantIndex(e) => e.is_not_found(),
            Self::PositionIndex(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Errors raised by [`SortedIndex`](crate::index::sorted::SortedIndex) and
/// [`UniqueIndex`](crate::index::unique::UniqueIndex).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError<K: Debug> {
    #[error("values are not monotonically increasing at position {position}")]
    NotMonotonic { position: usize },
    #[error("values are not unique, found duplicate {key:?}")]
    NotUnique { key: K },
    #[error("key not found: {key:?}")]
    KeyNotFound { key: K },
    #[error("no entries within range [{start:?}, {stop:?}]")]
    RangeNotFound { start: Option<K>, stop: Option<K> },
    #[error("keys not found: {keys:?}")]
    KeysNotFound { keys: Vec<K> },
    #[error("ranges without entries: starts {starts:?}, stops {stops:?}")]
    RangesNotFound { starts: Vec<K>, stops: Vec<K> },
    #[error("got {starts} range starts but {stops} range stops")]
    RangeBoundsMisaligned { starts: usize, stops: usize },
}

impl<K: Debug> IndexError<K> {
    /// True for lookup misses, false for invalid input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. }
                | Self::RangeNotFound { .. }
                | Self::KeysNotFound { .. }
                | Self::RangesNotFound { .. }
        )
    }
}

/// Errors raised by [`SortedMultiIndex`](crate::index::multi::SortedMultiIndex).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MultiIndexError<K1: Debug, K2: Debug> {
    #[error("invalid first level: {0}")]
    Outer(IndexError<K1>),
    #[error("levels are not aligned: {outer} outer keys, {inner} inner keys")]
    LengthMismatch { outer: usize, inner: usize },
    #[error("key not found: {key:?}")]
    OuterKeyNotFound { key: K1 },
    #[error("key not found: ({outer_key:?}, {inner_key:?})")]
    KeyNotFound { outer_key: K1, inner_key: K2 },
    #[error("no entries within range {outer_key:?}:{start:?}-{stop:?}")]
    RangeNotFound {
        outer_key: K1,
        start: Option<K2>,
        stop: Option<K2>,
    },
    #[error("second level values of {outer_key:?} are not sorted at position {position}")]
    InnerNotSorted { outer_key: K1, position: usize },
}

impl<K1: Debug, K2: Debug> MultiIndexError<K1, K2> {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OuterKeyNotFound { .. } | Self::KeyNotFound { .. } | Self::RangeNotFound { .. }
        )
    }
}
