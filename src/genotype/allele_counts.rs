use crate::error::Result;
use crate::genotype::genotypes::check_shape;
use rayon::prelude::*;

/// Per variant counts of each allele, shape (variants, alleles).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlleleCountsArray {
    data: Vec<u32>,
    n_variants: usize,
    n_alleles: usize,
}

/// Counts alleles 0..=`max_allele` in each of `n_rows` equally long rows of
/// `data`. Missing alleles are never counted.
pub(crate) fn count_alleles(
    data: &[i8],
    n_rows: usize,
    max_allele: Option<i8>,
) -> AlleleCountsArray {
    let max_allele = max_allele.or_else(|| data.iter().copied().max());
    let n_alleles = match max_allele {
        Some(m) if m >= 0 => m as usize + 1,
        _ => 0,
    };
    let mut counts = vec![0u32; n_rows * n_alleles];
    let row_len = if n_rows == 0 { 0 } else { data.len() / n_rows };
    if n_alleles > 0 && row_len > 0 {
        counts
            .par_chunks_mut(n_alleles)
            .zip(data.par_chunks(row_len))
            .for_each(|(ac, row)| {
                for &allele in row {
                    if allele >= 0 && (allele as usize) < n_alleles {
                        ac[allele as usize] += 1;
                    }
                }
            });
    }
    AlleleCountsArray {
        data: counts,
        n_variants: n_rows,
        n_alleles,
    }
}

impl AlleleCountsArray {
    pub fn new(data: Vec<u32>, n_variants: usize, n_alleles: usize) -> Result<Self> {
        check_shape(data.len(), &[n_variants, n_alleles])?;
        Ok(Self {
            data,
            n_variants,
            n_alleles,
        })
    }

    pub fn n_variants(&self) -> usize {
        self.n_variants
    }

    pub fn n_alleles(&self) -> usize {
        self.n_alleles
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub fn variant(&self, variant_ix: usize) -> &[u32] {
        &self.data[variant_ix * self.n_alleles..(variant_ix + 1) * self.n_alleles]
    }

    /// Allele frequencies, shape (variants, alleles).
    /// Variants without any called allele are set to `fill`.
    pub fn to_frequencies(&self, fill: f64) -> Vec<f64> {
        let mut freqs = Vec::with_capacity(self.data.len());
        for v in 0..self.n_variants {
            let ac = self.variant(v);
            let n: u32 = ac.iter().sum();
            freqs.extend(ac.iter().map(|&c| {
                if n > 0 {
                    c as f64 / n as f64
                } else {
                    fill
                }
            }));
        }
        freqs
    }

    /// Number of distinct alleles observed per variant.
    pub fn allelism(&self) -> Vec<usize> {
        (0..self.n_variants)
            .map(|v| self.variant(v).iter().filter(|&&c| c > 0).count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{count_alleles, AlleleCountsArray};
    use crate::error::Error;

    fn make_test_counts() -> AlleleCountsArray {
        AlleleCountsArray::new(vec![3, 1, 0, 1, 2, 1, 0, 0, 2], 3, 3).unwrap()
    }

    #[test]
    fn allele_counts_shape() {
        let ac = make_test_counts();
        assert_eq!(ac.variant(1), &[1, 2, 1]);
        assert!(matches!(
            AlleleCountsArray::new(vec![1, 2, 3], 2, 2),
            Err(Error::ShapeMismatch { len: 3, .. })
        ));
    }

    #[test]
    fn count_alleles_ignores_missing_and_high_alleles() {
        let ac = count_alleles(&[0, 3, -1, 1, -1, -1], 2, Some(1));
        assert_eq!(ac.n_alleles(), 2);
        assert_eq!(ac.as_slice(), &[1, 0, 0, 1]);
        let ac = count_alleles(&[-1, -1], 1, None);
        assert_eq!(ac.n_alleles(), 0);
        assert!(ac.as_slice().is_empty());
        let ac = count_alleles(&[], 2, None);
        assert_eq!(ac.n_variants(), 2);
        assert_eq!(ac.n_alleles(), 0);
    }

    #[test]
    fn allele_counts_to_frequencies() {
        let ac = make_test_counts();
        assert_eq!(
            ac.to_frequencies(f64::NAN),
            vec![0.75, 0.25, 0.0, 0.25, 0.5, 0.25, 0.0, 0.0, 1.0]
        );
        let ac = AlleleCountsArray::new(vec![0, 0, 2, 2], 2, 2).unwrap();
        let af = ac.to_frequencies(f64::NAN);
        assert!(af[0].is_nan() && af[1].is_nan());
        assert_eq!(&af[2..], &[0.5, 0.5]);
    }

    #[test]
    fn allele_counts_allelism() {
        assert_eq!(make_test_counts().allelism(), vec![2, 3, 1]);
    }
}
