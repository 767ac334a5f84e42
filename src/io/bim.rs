use crate::error::{Error, Result};
use crate::index::multi::SortedMultiIndex;
use crate::io::{
    chromosome::Chromosome,
    indexed_read::{IndexedEntry, IndexedReader},
};
use log::{info, warn};
use std::path::Path;
use std::str::FromStr;

/// Variant positions indexed by chromosome, then position.
pub type VariantIndex = SortedMultiIndex<'static, Chromosome, u64>;

/// Entry of a .bim file.
///
/// According to the Plink 1.9 specs:
///
/// A text file with no header line, and one line per variant with the following six fields:
/// Chromosome code (either an integer, or 'X'/'Y'/'XY'/'MT'; '0' indicates unknown)
/// Variant identifier
/// Position in morgans or centimorgans (safe to use dummy value of '0')
/// Base-pair coordinate (1-based)
/// Allele 1 (usually minor)
/// Allele 2 (usually major)
#[derive(Debug, Clone, PartialEq)]
pub struct BimEntry {
    pub ix: usize,
    pub chromosome: Chromosome,
    pub id: String,
    pub centimorgan: f64,
    pub position: u64,
    pub allele_1: String,
    pub allele_2: String,
}

fn parse_error(line: usize, msg: impl Into<String>) -> Error {
    Error::BimParse {
        line: line + 1,
        msg: msg.into(),
    }
}

impl IndexedEntry for BimEntry {
    fn from_str(s: &str, ix: usize) -> Result<Self> {
        let fields = s.split_whitespace().collect::<Vec<&str>>();
        if fields.len() != 6 {
            return Err(parse_error(
                ix,
                format!("expected 6 columns, found {}", fields.len()),
            ));
        }
        Ok(Self {
            ix,
            chromosome: Chromosome::from_str(fields[0])
                .map_err(|_| Error::UnknownChromosome(fields[0].to_owned()))?,
            id: fields[1].to_owned(),
            centimorgan: fields[2]
                .parse()
                .map_err(|_| parse_error(ix, "Failed to convert 3rd col entry to float"))?,
            position: fields[3]
                .parse()
                .map_err(|_| parse_error(ix, "Failed to convert 4th col entry to int"))?,
            allele_1: fields[4].to_owned(),
            allele_2: fields[5].to_owned(),
        })
    }
}

impl BimEntry {
    pub fn chr(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

pub fn read_bim(path: &Path) -> Result<Vec<BimEntry>> {
    IndexedReader::<BimEntry>::new(path)?.collect()
}

/// Reads a .bim file into a chromosome / position index.
///
/// Fails if the variants are not sorted by chromosome.
pub fn read_variant_index(path: &Path) -> Result<VariantIndex> {
    let entries = read_bim(path)?;
    if entries.is_empty() {
        warn!("No variants in {:?}", path);
    }
    info!("Loaded {} variants from {:?}", entries.len(), path);
    variant_index(&entries)
}

pub fn variant_index(entries: &[BimEntry]) -> Result<VariantIndex> {
    let chromosomes: Vec<Chromosome> = entries.iter().map(|e| e.chromosome).collect();
    let positions: Vec<u64> = entries.iter().map(|e| e.position).collect();
    Ok(SortedMultiIndex::new(chromosomes, positions)?)
}
