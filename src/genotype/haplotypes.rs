use crate::error::{Error, Result};
use crate::genotype::allele_counts::{count_alleles, AlleleCountsArray};
use crate::genotype::genotypes::{check_shape, subset_blocks, GenotypeArray};

/// Haplotype alleles of shape (variants, haplotypes), stored variant major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaplotypeArray {
    data: Vec<i8>,
    n_variants: usize,
    n_haplotypes: usize,
}

impl HaplotypeArray {
    pub fn new(data: Vec<i8>, n_variants: usize, n_haplotypes: usize) -> Result<Self> {
        check_shape(data.len(), &[n_variants, n_haplotypes])?;
        Ok(Self::from_parts(data, n_variants, n_haplotypes))
    }

    // callers guarantee the shape
    pub(crate) fn from_parts(data: Vec<i8>, n_variants: usize, n_haplotypes: usize) -> Self {
        Self {
            data,
            n_variants,
            n_haplotypes,
        }
    }

    pub fn n_variants(&self) -> usize {
        self.n_variants
    }

    pub fn n_haplotypes(&self) -> usize {
        self.n_haplotypes
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    pub fn variant(&self, variant_ix: usize) -> &[i8] {
        &self.data[variant_ix * self.n_haplotypes..(variant_ix + 1) * self.n_haplotypes]
    }

    pub fn get(&self, variant_ix: usize, haplotype_ix: usize) -> i8 {
        self.data[variant_ix * self.n_haplotypes + haplotype_ix]
    }

    /// Sub-selection of variants and / or haplotypes by index.
    pub fn subset(
        &self,
        variants: Option<&[usize]>,
        haplotypes: Option<&[usize]>,
    ) -> Result<Self> {
        let (data, n_variants, n_haplotypes) = subset_blocks(
            &self.data,
            (self.n_variants, self.n_haplotypes, 1),
            variants,
            haplotypes,
        )?;
        Ok(Self::from_parts(data, n_variants, n_haplotypes))
    }

    /// Groups consecutive haplotypes into calls of `ploidy` alleles.
    pub fn to_genotypes(&self, ploidy: usize) -> Result<GenotypeArray> {
        if ploidy == 0 {
            return Err(Error::ZeroPloidy);
        }
        if self.n_haplotypes % ploidy != 0 {
            return Err(Error::IncompatiblePloidy {
                n_haplotypes: self.n_haplotypes,
                ploidy,
            });
        }
        GenotypeArray::new(
            self.data.clone(),
            self.n_variants,
            self.n_haplotypes / ploidy,
            ploidy,
        )
    }

    /// Number of haplotypes carrying each allele per variant.
    /// Alleles above `max_allele` are ignored.
    pub fn count_alleles(&self, max_allele: Option<i8>) -> AlleleCountsArray {
        count_alleles(&self.data, self.n_variants, max_allele)
    }
}
