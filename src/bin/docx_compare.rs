//! Command-line front end for document package comparison.
//!
//! # Usage
//!
//! ```sh
//! docx-compare expected.docx actual.docx
//! docx-compare --semantic --reviewer word-compare expected.docx actual.docx
//! docx-compare --list expected.docx actual.docx
//! ```
//!
//! Exit codes:
//! - `0`: documents are equal (identical, or judged equivalent by the reviewer)
//! - `1`: differences found between documents
//! - `2`: the documents could not be compared
//!
//! Missing or malformed arguments are rejected by clap, which also exits with
//! `2` after printing usage. `--help` and `--version` exit with `0`.

use clap::{ArgAction, Parser};
use docx_compare::compare::{CompareOptions, CompareVerdict, Comparer, DEFAULT_CHUNK_SIZE, diff_archives};
use docx_compare::review::ExternalCommandReviewer;
use docx_compare::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_EQUAL: u8 = 0;
const EXIT_DIFFERENT: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Compare docx document content
#[derive(Parser, Debug)]
#[command(
    name = "docx-compare",
    about = "Compares docx document content",
    long_about = "Compares an expected document package against an actual one.\n\
                  Byte-identical files match immediately; otherwise the zip entries are compared,\n\
                  and with --semantic an external reviewer decides whether differences matter.\n\n\
                  Exit codes: 0 documents are equal, 1 differences found, 2 error.",
    version
)]
struct Args {
    /// Document holding the expected content
    #[arg(value_name = "EXPECTED")]
    expected: PathBuf,

    /// Document to check against the expected one
    #[arg(value_name = "ACTUAL")]
    actual: PathBuf,

    /// Consider documents equal if the reviewer finds no revisions comparing them
    #[arg(long, visible_alias = "word-diff")]
    semantic: bool,

    /// Program performing the semantic review
    ///
    /// Invoked as `PROGRAM [REVIEWER_ARG..] <expected> <actual> <diff>`; it must print
    /// the revision count on its first output line.
    #[arg(long, value_name = "PROGRAM", env = "DOCX_COMPARE_REVIEWER")]
    reviewer: Option<PathBuf>,

    /// Extra argument passed to the reviewer before the paths (repeatable)
    #[arg(long = "reviewer-arg", value_name = "ARG", allow_hyphen_values = true)]
    reviewer_args: Vec<String>,

    /// Print every entry discrepancy when documents differ
    #[arg(long)]
    list: bool,

    /// Do not replace the expected document when the reviewer finds it equivalent
    #[arg(long)]
    keep_expected: bool,

    /// Bytes read per step when streaming content
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error comparing documents: {}", e);
            ExitCode::from(EXIT_ERROR)
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<u8> {
    let options = CompareOptions::new()
        .with_semantic_review(args.semantic)
        .with_chunk_size(args.chunk_size);

    let reviewer = args
        .reviewer
        .as_ref()
        .map(|program| ExternalCommandReviewer::new(program).args(&args.reviewer_args));

    let mut comparer = Comparer::new(options);
    if let Some(reviewer) = &reviewer {
        comparer = comparer.with_reviewer(reviewer);
    }

    let outcome = comparer.compare(&args.expected, &args.actual)?;

    match outcome.verdict {
        CompareVerdict::IdenticalBytes => {
            println!("Document content is identical");
            Ok(EXIT_EQUAL)
        },
        CompareVerdict::EquivalentContent => {
            if args.keep_expected {
                println!("Document content is not identical, but the reviewer found no changes");
            } else {
                println!(
                    "Document content is not identical, but the reviewer found no changes, replacing expected by actual"
                );
                std::fs::copy(&args.actual, &args.expected).map_err(|e| Error::from_io(&args.expected, e))?;
            }
            Ok(EXIT_EQUAL)
        },
        CompareVerdict::Different => {
            println!("Document content does not match");
            if args.list {
                for discrepancy in diff_archives(&args.expected, &args.actual)? {
                    println!("  {}", discrepancy?);
                }
            }
            if let Some(diff) = &outcome.diff_artifact {
                println!("Differences between documents are stored as: {}", diff.display());
            }
            Ok(EXIT_DIFFERENT)
        },
    }
}
