use crate::error::{Error, Result};
use crate::genotype::allele_counts::{count_alleles, AlleleCountsArray};
use crate::genotype::codec::{check_allele_bounds, par_pack_interleaved, par_unpack_diploid};
use crate::genotype::haplotypes::HaplotypeArray;
use log::debug;

// fails unless `len` equals the product of `shape`, overflow included
pub(crate) fn check_shape(len: usize, shape: &[usize]) -> Result<()> {
    let expected = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
    if expected != Some(len) {
        return Err(Error::ShapeMismatch {
            len,
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

fn check_selection(selection: &[usize], len: usize) -> Result<()> {
    match selection.iter().find(|&&ix| ix >= len) {
        Some(&index) => Err(Error::SelectionOutOfBounds { index, len }),
        None => Ok(()),
    }
}

/// Selects rows and columns of a row major (rows, cols, block_len) buffer.
/// `None` keeps all rows or columns. Returns the data and the new row and
/// column counts.
pub(crate) fn subset_blocks(
    data: &[i8],
    shape: (usize, usize, usize),
    rows: Option<&[usize]>,
    cols: Option<&[usize]>,
) -> Result<(Vec<i8>, usize, usize)> {
    let (n_rows, n_cols, block_len) = shape;
    let rows = rows.map_or_else(|| (0..n_rows).collect(), <[usize]>::to_vec);
    let cols = cols.map_or_else(|| (0..n_cols).collect(), <[usize]>::to_vec);
    check_selection(&rows, n_rows)?;
    check_selection(&cols, n_cols)?;
    let row_len = n_cols * block_len;
    let mut res = Vec::with_capacity(rows.len() * cols.len() * block_len);
    for r in &rows {
        let row = &data[r * row_len..(r + 1) * row_len];
        for c in &cols {
            res.extend_from_slice(&row[c * block_len..(c + 1) * block_len]);
        }
    }
    Ok((res, rows.len(), cols.len()))
}

/// Genotype calls of shape (variants, samples, ploidy), stored variant major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenotypeArray {
    data: Vec<i8>,
    n_variants: usize,
    n_samples: usize,
    ploidy: usize,
}

impl GenotypeArray {
    pub fn new(data: Vec<i8>, n_variants: usize, n_samples: usize, ploidy: usize) -> Result<Self> {
        if ploidy == 0 {
            return Err(Error::ZeroPloidy);
        }
        check_shape(data.len(), &[n_variants, n_samples, ploidy])?;
        Ok(Self {
            data,
            n_variants,
            n_samples,
            ploidy,
        })
    }

    /// Builds the array from nested per variant, per sample calls.
    /// All variants need the same number of samples, all calls the same ploidy.
    pub fn from_calls(calls: Vec<Vec<Vec<i8>>>) -> Result<Self> {
        let n_variants = calls.len();
        let n_samples = calls.first().map_or(0, |v| v.len());
        let ploidy = calls
            .first()
            .and_then(|v| v.first())
            .map_or(2, |c| c.len());
        let mut data = Vec::with_capacity(n_variants * n_samples * ploidy);
        for (variant, samples) in calls.into_iter().enumerate() {
            if samples.len() != n_samples || samples.iter().any(|c| c.len() != ploidy) {
                return Err(Error::RaggedCalls { variant });
            }
            data.extend(samples.into_iter().flatten());
        }
        Self::new(data, n_variants, n_samples, ploidy)
    }

    pub fn n_variants(&self) -> usize {
        self.n_variants
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn ploidy(&self) -> usize {
        self.ploidy
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_variants, self.n_samples, self.ploidy)
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    /// All calls of a single variant, flattened to (samples * ploidy).
    pub fn variant(&self, variant_ix: usize) -> &[i8] {
        let width = self.n_samples * self.ploidy;
        &self.data[variant_ix * width..(variant_ix + 1) * width]
    }

    pub fn call(&self, variant_ix: usize, sample_ix: usize) -> &[i8] {
        let start = (variant_ix * self.n_samples + sample_ix) * self.ploidy;
        &self.data[start..start + self.ploidy]
    }

    /// Sub-selection of variants and / or samples by index, in the given
    /// order. `None` keeps the whole axis.
    pub fn subset(&self, variants: Option<&[usize]>, samples: Option<&[usize]>) -> Result<Self> {
        let (data, n_variants, n_samples) = subset_blocks(
            &self.data,
            (self.n_variants, self.n_samples, self.ploidy),
            variants,
            samples,
        )?;
        Ok(Self {
            data,
            n_variants,
            n_samples,
            ploidy: self.ploidy,
        })
    }

    /// Drops the ploidy dimension, one haplotype per allele of each call.
    /// Only meaningful for phased calls.
    pub fn into_haplotypes(self) -> HaplotypeArray {
        HaplotypeArray::from_parts(self.data, self.n_variants, self.n_samples * self.ploidy)
    }

    pub fn to_haplotypes(&self) -> HaplotypeArray {
        self.clone().into_haplotypes()
    }

    /// Number of non-reference alleles per call, shape (variants, samples).
    /// Calls with any missing allele are set to `fill`.
    pub fn to_n_alt(&self, fill: i8) -> Vec<i8> {
        self.data
            .chunks_exact(self.ploidy)
            .map(|call| {
                if call.iter().any(|&a| a < 0) {
                    fill
                } else {
                    call.iter().filter(|&&a| a > 0).count() as i8
                }
            })
            .collect()
    }

    /// Count of each of `alleles` per call, shape (variants, samples, alleles).
    ///
    /// Without `alleles` all alleles from 0 up to the max allele are counted.
    /// Returns the counts and the number of alleles counted.
    pub fn to_allele_counts(&self, alleles: Option<&[i8]>) -> (Vec<u8>, usize) {
        let alleles = match alleles {
            Some(a) => a.to_vec(),
            None => {
                let max = self.data.iter().copied().max().unwrap_or(-1);
                (0..=max).collect()
            }
        };
        let counts = self
            .data
            .chunks_exact(self.ploidy)
            .flat_map(|call| {
                alleles
                    .iter()
                    .map(move |allele| call.iter().filter(|&a| a == allele).count() as u8)
            })
            .collect();
        (counts, alleles.len())
    }

    /// Number of calls of each allele per variant.
    ///
    /// Alleles above `max_allele` are ignored, by default the max allele of
    /// the array is used.
    pub fn count_alleles(&self, max_allele: Option<i8>) -> AlleleCountsArray {
        count_alleles(&self.data, self.n_variants, max_allele)
    }

    /// Pack diploid calls into one byte per call.
    ///
    /// With `boundscheck` the alleles are checked to lie within [-1, 14]
    /// before packing. Without it, out of range alleles are silently mangled.
    pub fn to_packed(&self, boundscheck: bool) -> Result<PackedGenotypes> {
        if self.ploidy != 2 {
            return Err(Error::NotDiploid {
                ploidy: self.ploidy,
            });
        }
        if boundscheck {
            check_allele_bounds(&self.data)?;
        }
        debug!(
            "Packing genotypes of {} variants x {} samples",
            self.n_variants, self.n_samples
        );
        PackedGenotypes::new(
            par_pack_interleaved(&self.data),
            self.n_variants,
            self.n_samples,
        )
    }

    pub fn from_packed(packed: &PackedGenotypes) -> Self {
        Self {
            data: par_unpack_diploid(packed.as_slice()).into_flattened(),
            n_variants: packed.n_variants(),
            n_samples: packed.n_samples(),
            ploidy: 2,
        }
    }
}

/// Bit-packed diploid genotype calls of shape (variants, samples).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedGenotypes {
    data: Vec<u8>,
    n_variants: usize,
    n_samples: usize,
}

impl PackedGenotypes {
    pub fn new(data: Vec<u8>, n_variants: usize, n_samples: usize) -> Result<Self> {
        check_shape(data.len(), &[n_variants, n_samples])?;
        Ok(Self {
            data,
            n_variants,
            n_samples,
        })
    }

    pub fn n_variants(&self) -> usize {
        self.n_variants
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn variant(&self, variant_ix: usize) -> &[u8] {
        &self.data[variant_ix * self.n_samples..(variant_ix + 1) * self.n_samples]
    }

    pub fn get(&self, variant_ix: usize, sample_ix: usize) -> u8 {
        self.data[variant_ix * self.n_samples + sample_ix]
    }
}
