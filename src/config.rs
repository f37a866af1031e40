//! Command-line arguments and the validated scan configuration built from them.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use super::error::ConfigError;

const KILOBYTE: u64 = 1024;
const MEGABYTE: u64 = KILOBYTE * 1024;
const GIGABYTE: u64 = MEGABYTE * 1024;

/// Summarize disk usage of a directory tree
#[derive(Parser, Debug, Clone)]
#[command(
    name = "quick-du",
    version,
    about = "Summarize disk usage of a directory tree",
    disable_help_flag = true,
    after_help = "EXAMPLES:\n    \
        quick-du\n    \
        quick-du -h /var/log\n    \
        quick-du -h -t 10M -j 16 /srv/data"
)]
pub struct CliArgs
{
    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// "Human-readable" output. Use unit suffixes: Byte, Kilobyte, Megabyte, Gigabyte
    #[arg(short = 'h', long = "human-readable")]
    pub human_readable: bool,

    /// Size threshold for folders, for example '1G', '10M', '100K', '1024'
    #[arg(short = 't', long, value_name = "SIZE")]
    pub threshold: Option<Threshold>,

    /// Number of worker threads listing directories
    #[arg(short = 'j', long, default_value_t = default_jobs(), value_name = "NUM", value_parser = parse_jobs)]
    pub jobs: usize,

    /// Log skipped directories and scan statistics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

fn default_jobs() -> usize
{
    num_cpus::get()
}

fn parse_jobs(value: &str) -> Result<usize, String>
{
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(jobs) => Ok(jobs),
        Err(error) => Err(error.to_string()),
    }
}

/// A size limit given as a plain byte count or with one trailing `G`, `M` or
/// `K` unit character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(u64);

impl Threshold
{
    pub fn bytes(&self) -> u64
    {
        self.0
    }
}

impl FromStr for Threshold
{
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err>
    {
        let invalid = |reason: &str| ConfigError::InvalidThreshold {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if let Ok(bytes) = value.parse::<u64>() {
            return Ok(Threshold(bytes));
        }

        let unit = value.chars().last().ok_or_else(|| invalid("empty value"))?;
        let digits = &value[..value.len() - unit.len_utf8()];

        let multiplier = match unit {
            'G' => GIGABYTE,
            'M' => MEGABYTE,
            'K' => KILOBYTE,
            _ => return Err(invalid("expected a byte count or a G, M or K suffix")),
        };

        let count = digits
            .parse::<u64>()
            .map_err(|_| invalid("expected a whole number before the unit"))?;

        count
            .checked_mul(multiplier)
            .map(Threshold)
            .ok_or_else(|| invalid("value is too large"))
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ScanConfig
{
    pub root: PathBuf,
    pub human_readable: bool,
    /// Parsed and validated but not applied: only the root total is printed.
    pub threshold: Option<Threshold>,
    pub jobs: usize,
    pub verbose: bool,
}

impl ScanConfig
{
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError>
    {
        let root = match args.target_dir {
            Some(target_dir) => target_dir,
            None => env::current_dir().map_err(|error| ConfigError::NoCurrentDir {
                reason: error.to_string(),
            })?,
        };

        Ok(ScanConfig {
            root: root,
            human_readable: args.human_readable,
            threshold: args.threshold,
            jobs: args.jobs,
            verbose: args.verbose,
        })
    }
}
