//! Lookup tables for decoding packed diploid genotype bytes.

/// Nibble value marking a missing allele in a packed byte.
pub const MISSING_NIBBLE: u8 = 0xF;

/// Allele value used for missing calls in unpacked form.
pub const MISSING_ALLELE: i8 = -1;

const fn decode_nibble(nibble: u8) -> i8 {
    if nibble == MISSING_NIBBLE {
        MISSING_ALLELE
    } else {
        nibble as i8
    }
}

const fn build_unpack_lookup() -> [[i8; 2]; 256] {
    let mut table = [[0i8; 2]; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = [
            decode_nibble((byte as u8) >> 4),
            decode_nibble((byte as u8) & 0xF),
        ];
        byte += 1;
    }
    table
}

/// Decoded allele pair for every possible packed byte.
pub const UNPACK_LOOKUP: [[i8; 2]; 256] = build_unpack_lookup();
