//! Bit-packing of diploid genotype calls.
//!
//! A call `(a1, a2)` is packed into a single byte, the first allele in the
//! high nibble and the second allele in the low nibble. Alleles 0-14 are
//! stored as is, any negative (missing) allele is stored as nibble 15.
//! Packing is total: alleles outside of [-1, 14] are silently mangled, so
//! callers that cannot rule them out run [`check_allele_bounds`] first.

use crate::arr_helpers::min_max;
use crate::error::{Error, Result};
use crate::genotype::lookup_tables::{MISSING_NIBBLE, UNPACK_LOOKUP};
use log::debug;
use rayon::prelude::*;

pub const MAX_PACKABLE_ALLELE: i8 = 14;
pub const MIN_PACKABLE_ALLELE: i8 = -1;

// below this many calls the parallel codec runs on a single thread
const PAR_MIN_CALLS_PER_TASK: usize = 1 << 16;

#[inline]
fn encode_nibble(allele: i8) -> u8 {
    if allele < 0 {
        MISSING_NIBBLE
    } else {
        (allele as u8) & 0xF
    }
}

/// Pack a single diploid call into one byte.
#[inline]
pub fn pack_call(allele_1: i8, allele_2: i8) -> u8 {
    (encode_nibble(allele_1) << 4) | encode_nibble(allele_2)
}

/// Unpack a single byte into a diploid call.
#[inline]
pub fn unpack_call(packed: u8) -> [i8; 2] {
    UNPACK_LOOKUP[packed as usize]
}

pub fn pack_diploid(calls: &[[i8; 2]]) -> Vec<u8> {
    calls.iter().map(|[a1, a2]| pack_call(*a1, *a2)).collect()
}

pub fn unpack_diploid(packed: &[u8]) -> Vec<[i8; 2]> {
    packed.iter().map(|b| unpack_call(*b)).collect()
}

/// Same as [`pack_diploid`], split over the rayon thread pool.
/// Output order matches input order.
pub fn par_pack_diploid(calls: &[[i8; 2]]) -> Vec<u8> {
    debug!("Packing {} diploid calls", calls.len());
    calls
        .par_iter()
        .with_min_len(PAR_MIN_CALLS_PER_TASK)
        .map(|[a1, a2]| pack_call(*a1, *a2))
        .collect()
}

/// Same as [`unpack_diploid`], split over the rayon thread pool.
pub fn par_unpack_diploid(packed: &[u8]) -> Vec<[i8; 2]> {
    debug!("Unpacking {} diploid calls", packed.len());
    packed
        .par_iter()
        .with_min_len(PAR_MIN_CALLS_PER_TASK)
        .map(|b| unpack_call(*b))
        .collect()
}

/// Packs calls given as interleaved allele pairs `[a1, a2, a1, a2, ...]`.
/// A trailing unpaired allele is ignored.
pub fn par_pack_interleaved(alleles: &[i8]) -> Vec<u8> {
    debug!("Packing {} diploid calls", alleles.len() / 2);
    alleles
        .par_chunks_exact(2)
        .with_min_len(PAR_MIN_CALLS_PER_TASK)
        .map(|c| pack_call(c[0], c[1]))
        .collect()
}

/// Checks that all alleles can be packed without loss.
///
/// The max allele is checked before the min allele.
pub fn check_allele_bounds(alleles: &[i8]) -> Result<()> {
    let (min, max) = match min_max(alleles.iter().copied()) {
        Some(v) => v,
        None => return Ok(()),
    };
    if max > MAX_PACKABLE_ALLELE {
        return Err(Error::MaxAlleleExceeded { found: max });
    }
    if min < MIN_PACKABLE_ALLELE {
        return Err(Error::MinAlleleExceeded { found: min });
    }
    Ok(())
}
