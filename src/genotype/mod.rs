pub mod allele_counts;
pub mod codec;
pub mod genotypes;
pub mod haplotypes;
pub mod lookup_tables;
