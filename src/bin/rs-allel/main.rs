mod cli;

use clap::Parser;
use cli::{Cli, IntersectRangesArgs, LocateKeyArgs, LocateRangeArgs, SubCmd};
use log::{debug, error, info};
use rs_allel::arr_helpers::count_true;
use rs_allel::error::{Error, Result};
use rs_allel::index::sorted::SortedIndex;
use rs_allel::io::{
    bim::{read_bim, read_variant_index, variant_index},
    chromosome::Chromosome,
    ranges::read_ranges,
};
use std::path::Path;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    if cli.debug {
        simple_logger::init_with_level(log::Level::Debug).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    let res = match cli.cmd {
        SubCmd::LocateKey(args) => locate_key(args),
        SubCmd::LocateRange(args) => locate_range(args),
        SubCmd::IntersectRanges(args) => intersect_ranges(args),
    };

    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(exit_code(&e));
    }
}

// lookups that find nothing exit like grep without a match
const NOT_FOUND: exitcode::ExitCode = 1;

fn exit_code(e: &Error) -> exitcode::ExitCode {
    match e {
        _ if e.is_not_found() => NOT_FOUND,
        Error::FromFileOpeningError(_) | Error::Csv(_) => exitcode::IOERR,
        Error::Json(_) => exitcode::SOFTWARE,
        _ => exitcode::DATAERR,
    }
}

fn parse_chromosome(name: &str) -> Result<Chromosome> {
    Chromosome::from_str(name).map_err(|_| Error::UnknownChromosome(name.to_owned()))
}

fn locate_key(args: LocateKeyArgs) -> Result<()> {
    debug!("locate-key args: {}", serde_json::to_string(&args)?);
    let chromosome = parse_chromosome(&args.chromosome)?;
    let idx = read_variant_index(Path::new(&args.bim))?;
    let loc = idx.locate_key(&chromosome, args.position.as_ref())?;
    println!("{}", serde_json::to_string(&loc)?);
    Ok(())
}

fn locate_range(args: LocateRangeArgs) -> Result<()> {
    debug!("locate-range args: {}", serde_json::to_string(&args)?);
    let chromosome = parse_chromosome(&args.chromosome)?;
    let idx = read_variant_index(Path::new(&args.bim))?;
    let range = idx.locate_range(&chromosome, args.start.as_ref(), args.stop.as_ref())?;
    println!("{}", serde_json::to_string(&range)?);
    Ok(())
}

fn intersect_ranges(args: IntersectRangesArgs) -> Result<()> {
    debug!("intersect-ranges args: {}", serde_json::to_string(&args)?);
    let chromosome = parse_chromosome(&args.chromosome)?;
    let entries = read_bim(Path::new(&args.bim))?;
    let idx = variant_index(&entries)?;
    let group = idx.locate_range(&chromosome, None, None)?;
    let positions = SortedIndex::view(&idx.inner()[group.clone()])?;
    let (starts, stops) = read_ranges(Path::new(&args.ranges))?;
    let loc = positions.locate_ranges(&starts, &stops, args.strict)?;
    info!(
        "{} of {} variants on chromosome {} within {} ranges",
        count_true(&loc),
        loc.len(),
        chromosome,
        starts.len()
    );

    // stdout writer in csv format
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["chrom", "id", "position"])?;
    for (entry, _) in entries[group]
        .iter()
        .zip(&loc)
        .filter(|(_, keep)| **keep)
    {
        wtr.write_record([
            entry.chromosome.to_string(),
            entry.id.clone(),
            entry.position.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
