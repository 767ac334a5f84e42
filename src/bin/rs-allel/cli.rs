use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub(crate) struct Cli {
    /// enable debug logging
    #[clap(short, long, global = true)]
    pub(crate) debug: bool,

    #[clap(subcommand)]
    pub(crate) cmd: SubCmd,
}

#[derive(Subcommand)]
pub(crate) enum SubCmd {
    /// Locate a chromosome, or a variant by chromosome and position, in a .bim file
    LocateKey(LocateKeyArgs),
    /// Locate all variants of a chromosome within a position range (inclusive)
    LocateRange(LocateRangeArgs),
    /// Print all variants of a chromosome that lie within any of a set of ranges
    IntersectRanges(IntersectRangesArgs),
}

#[derive(Args, Debug, Serialize)]
pub(crate) struct LocateKeyArgs {
    /// path to .bim file, variants sorted by chromosome and position
    pub bim: String,

    /// chromosome name, e.g. 1, chr1 or X
    pub chromosome: String,

    /// base-pair position
    pub position: Option<u64>,
}

#[derive(Args, Debug, Serialize)]
pub(crate) struct LocateRangeArgs {
    /// path to .bim file, variants sorted by chromosome and position
    pub bim: String,

    /// chromosome name, e.g. 1, chr1 or X
    pub chromosome: String,

    /// first base-pair position of the range, open if omitted
    #[clap(long)]
    pub start: Option<u64>,

    /// last base-pair position of the range, open if omitted
    #[clap(long)]
    pub stop: Option<u64>,
}

#[derive(Args, Debug, Serialize)]
pub(crate) struct IntersectRangesArgs {
    /// path to .bim file, variants sorted by chromosome and position
    pub bim: String,

    /// chromosome name, e.g. 1, chr1 or X
    pub chromosome: String,

    /// csv file with `start` and `stop` columns
    pub ranges: String,

    /// fail if any range contains no variants
    #[clap(short, long)]
    pub strict: bool,
}
