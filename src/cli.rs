//! Command-line orchestration for test binaries.
//!
//! User test programs build a [`Registry`] and hand it to [`run`], which
//! parses flags, applies the documented transformation pipeline
//! (name filter → include tags → exclude tags → optional shuffle), and either
//! lists the surviving tests or executes them, returning the process exit
//! status.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;

use crate::registry::Registry;
use crate::runner::Runner;

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// Flag surface of an attest test binary.
#[derive(Debug, Parser)]
#[command(name = "attest", about = "Run the tests registered in this binary.")]
pub struct RunArgs {
    /// Keep only tests whose "suite::test" name contains PATTERN.
    #[arg(long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Keep only tests carrying at least one of the given tags (repeatable).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Drop tests carrying any of the given tags (repeatable; wins over --tag).
    #[arg(long = "exclude-tag", value_name = "TAG")]
    pub exclude_tags: Vec<String>,

    /// Print surviving test names, one per line, without running anything.
    #[arg(long)]
    pub list: bool,

    /// Like --list, with tag/xfail/skip/timeout markers appended.
    #[arg(long)]
    pub list_verbose: bool,

    /// Shuffle execution order with a freshly generated seed.
    #[arg(long)]
    pub randomize: bool,

    /// Shuffle execution order with this exact seed (implies --randomize).
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parses `std::env::args()` and drives `registry`. Returns the exit status
/// for the process: 0 iff every executed test succeeded (listing and help
/// always exit 0; malformed input exits 1).
pub fn run(registry: &mut Registry) -> i32 {
    run_from(registry, std::env::args())
}

/// Like [`run`], with an explicit argument list (first element is the binary
/// name, as usual).
pub fn run_from<I, T>(registry: &mut Registry, args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match RunArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            // clap renders help to stdout and errors (quoting the offending
            // value, with usage) to stderr.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };
    execute(registry, args)
}

/// Applies the pipeline for already-parsed arguments.
pub fn execute(registry: &mut Registry, args: RunArgs) -> i32 {
    if let Some(pattern) = &args.filter {
        registry.filter(pattern);
    }
    registry.filter_by_tag(&args.tags);
    registry.exclude_by_tag(&args.exclude_tags);

    // Listing reflects the filtered registration order; it happens before any
    // shuffle and is therefore never affected by --randomize/--seed.
    if args.list {
        registry.list();
        return 0;
    }
    if args.list_verbose {
        registry.list_verbose();
        return 0;
    }

    if args.randomize || args.seed.is_some() {
        let seed = args.seed.unwrap_or_else(rand::random);
        // Reproducibility line, before any per-test output.
        println!("[seed: {seed}]");
        registry.shuffle(seed);
    }

    Runner::new(registry).run_all()
}
