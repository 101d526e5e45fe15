use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kmv_estimator::{ingest, KmvEstimator, DEFAULT_CAPACITY};

/// Estimate the number of distinct whitespace-delimited tokens in a file or standard input.
///
/// Prints `<estimate> <elements added> <retained hashes>` on a single line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of minimum hash values kept by the estimator
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    size: usize,

    /// File name to process (otherwise reads from standard input)
    #[arg(long)]
    filename: Option<PathBuf>,

    /// Hash seed; picked at random when absent
    #[arg(long)]
    seed: Option<u32>,
}

fn build_estimator(args: &Args) -> anyhow::Result<KmvEstimator> {
    match args.seed {
        Some(seed) => KmvEstimator::new(args.size, seed),
        None => KmvEstimator::with_random_seed(args.size),
    }
    .context("Invalid --size")
}

/// Feed `--filename` into `estimator`, or standard input when no file is given.
fn ingest_input(args: &Args, estimator: &mut KmvEstimator) -> anyhow::Result<()> {
    match &args.filename {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            ingest(estimator, BufReader::new(file))
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            ingest(estimator, io::stdin().lock()).context("Failed to read standard input")?;
        }
    }
    Ok(())
}

fn write_report<W: Write>(estimator: &KmvEstimator, out: &mut W) -> anyhow::Result<()> {
    let report = estimator.report()?;
    writeln!(out, "{}", report)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut estimator = build_estimator(&args)?;
    ingest_input(&args, &mut estimator)?;
    write_report(&estimator, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kmv").chain(args.iter().copied())).unwrap()
    }

    fn run(args: &Args, input: &str) -> String {
        let mut estimator = build_estimator(args).unwrap();
        ingest(&mut estimator, Cursor::new(input)).unwrap();
        let mut out = Vec::new();
        write_report(&estimator, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.size, DEFAULT_CAPACITY);
        assert_eq!(args.filename, None);
        assert_eq!(args.seed, None);
        assert_eq!(build_estimator(&args).unwrap().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_report_line() {
        let args = parse(&["--size", "64", "--seed", "7"]);
        assert_eq!(run(&args, "to be or\nnot to be\n"), "4 6 4\n");
    }

    #[test]
    fn test_report_line_saturated() {
        let args = parse(&["--size", "2", "--seed", "7"]);
        let line = run(&args, "a b c d e f g h\n");
        let fields: Vec<&str> = line.trim_end().split(' ').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], "8");
        assert_eq!(fields[2], "2");
    }

    #[test]
    fn test_zero_size_rejected() {
        let args = parse(&["--size", "0", "--seed", "1"]);
        let err = build_estimator(&args).unwrap_err();
        assert_eq!(err.to_string(), "Invalid --size");
        assert_eq!(
            format!("{:#}", err),
            "Invalid --size: invalid configuration: capacity must be >= 1, got 0"
        );
        assert!(build_estimator(&parse(&["--size", "0"])).is_err());
    }

    #[test]
    fn test_bad_flags_rejected() {
        let args = ["kmv", "--size", "-3"];
        assert!(Args::try_parse_from(args).is_err());
        let args = ["kmv", "--seed", "4294967296"];
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn test_ingest_file() {
        let path = std::env::temp_dir().join(format!("kmv-test-{}.txt", std::process::id()));
        std::fs::write(&path, "x y\nx z\n").unwrap();
        let args = parse(&["--seed", "3", "--filename", path.to_str().unwrap()]);

        let mut estimator = build_estimator(&args).unwrap();
        ingest_input(&args, &mut estimator).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut out = Vec::new();
        write_report(&estimator, &mut out).unwrap();
        assert_eq!(out, b"3 4 3\n");
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("kmv-test-does-not-exist.txt");
        let args = parse(&["--filename", path.to_str().unwrap()]);
        let mut estimator = build_estimator(&args).unwrap();

        let err = ingest_input(&args, &mut estimator).unwrap_err();
        assert_eq!(err.to_string(), format!("Failed to open {}", path.display()));
        assert_eq!(estimator.elements_added(), 0);
    }
}
