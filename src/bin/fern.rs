// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use barnsley::{checked_count, generate_threaded, generate_with, Fern, Progress, TransformTable};
use clap::{App, Arg, ArgMatches};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// Splits a comma-separated palette.  Blank entries are dropped, so
/// an empty string is an empty palette.
fn parse_palette(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

const OUTPUT: &str = "output";
const POINTS: &str = "points";
const COLORS: &str = "colors";
const SEED: &str = "seed";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fern")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Barnsley fern point cloud generator")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("-")
                .help("Output file, or - for standard output"),
        )
        .arg(
            Arg::with_name(POINTS)
                .required(false)
                .long(POINTS)
                .short("n")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("10000")
                .validator(|s| validate_number::<i64>(&s, "Could not parse point count"))
                .help("Number of points to generate"),
        )
        .arg(
            Arg::with_name(COLORS)
                .required(true)
                .long(COLORS)
                .short("c")
                .takes_value(true)
                .help("Comma-separated palette, e.g. #03BFAC,#ED3192"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .short("s")
                .takes_value(true)
                .validator(|s| validate_number::<u64>(&s, "Could not parse seed"))
                .help("Random seed; the same seed gives the same fern"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the generator"),
        )
        .get_matches()
}

fn write_points(outfile: &str, fern: &Fern<String>) -> Result<(), io::Error> {
    let output: Box<dyn Write> = if outfile == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(File::create(outfile)?)
    };
    let mut output = BufWriter::new(output);
    writeln!(output, "x,y,color")?;
    for (point, color) in fern.iter() {
        writeln!(output, "{},{},{}", point.0, point.1, color)?;
    }
    output.flush()
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let n = checked_count(i64::from_str(matches.value_of(POINTS).unwrap_or("10000"))?)?;
    let palette = parse_palette(matches.value_of(COLORS).unwrap_or(""));
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or("1"))?;
    let seed = match matches.value_of(SEED) {
        Some(s) => u64::from_str(s)?,
        None => rand::thread_rng().gen(),
    };
    info!("seed {}", seed);

    let table = TransformTable::barnsley_fern();
    let fern = if threads == 1 {
        let mut rng = StdRng::seed_from_u64(seed);
        let tenth = (n / 10).max(1);
        generate_with(&table, n, &palette[..], &mut rng, |i, _| {
            if (i + 1) % tenth == 0 {
                debug!("{} of {} points", i + 1, n);
            }
            Progress::Continue
        })?
    } else {
        generate_threaded(&table, n, &palette[..], threads, seed)?
    };

    if let Some((lo, hi)) = fern.bounds() {
        info!(
            "{} points within ({}, {}) .. ({}, {})",
            fern.len(),
            lo.0,
            lo.1,
            hi.0,
            hi.1
        );
    }

    write_points(matches.value_of(OUTPUT).unwrap_or("-"), &fern)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
