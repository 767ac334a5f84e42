use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};

// A human chromosome code as used in .bim files.
// Parsed from plain ("1", "X"), prefixed ("chr1", "chrX") or plink numeric
// ("23" = X, "24" = Y, "25" = XY, "26" = MT) names, displayed plain.
// "0" is the plink code for an unplaced variant.
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Copy, Clone, Debug, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Chromosome {
    #[strum(to_string = "0")]
    Unknown,
    #[strum(to_string = "1", serialize = "chr1")]
    One,
    #[strum(to_string = "2", serialize = "chr2")]
    Two,
    #[strum(to_string = "3", serialize = "chr3")]
    Three,
    #[strum(to_string = "4", serialize = "chr4")]
    Four,
    #[strum(to_string = "5", serialize = "chr5")]
    Five,
    #[strum(to_string = "6", serialize = "chr6")]
    Six,
    #[strum(to_string = "7", serialize = "chr7")]
    Seven,
    #[strum(to_string = "8", serialize = "chr8")]
    Eight,
    #[strum(to_string = "9", serialize = "chr9")]
    Nine,
    #[strum(to_string = "10", serialize = "chr10")]
    Ten,
    #[strum(to_string = "11", serialize = "chr11")]
    Eleven,
    #[strum(to_string = "12", serialize = "chr12")]
    Twelve,
    #[strum(to_string = "13", serialize = "chr13")]
    Thirteen,
    #[strum(to_string = "14", serialize = "chr14")]
    Fourteen,
    #[strum(to_string = "15", serialize = "chr15")]
    Fifteen,
    #[strum(to_string = "16", serialize = "chr16")]
    Sixteen,
    #[strum(to_string = "17", serialize = "chr17")]
    Seventeen,
    #[strum(to_string = "18", serialize = "chr18")]
    Eighteen,
    #[strum(to_string = "19", serialize = "chr19")]
    Nineteen,
    #[strum(to_string = "20", serialize = "chr20")]
    Twenty,
    #[strum(to_string = "21", serialize = "chr21")]
    TwentyOne,
    #[strum(to_string = "22", serialize = "chr22")]
    TwentyTwo,
    #[strum(to_string = "X", serialize = "chrX", serialize = "23")]
    X,
    #[strum(to_string = "Y", serialize = "chrY", serialize = "24")]
    Y,
    #[strum(to_string = "XY", serialize = "chrXY", serialize = "25")]
    XY,
    #[strum(
        to_string = "MT",
        serialize = "chrMT",
        serialize = "M",
        serialize = "chrM",
        serialize = "26"
    )]
    MT,
}

impl Serialize for Chromosome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
