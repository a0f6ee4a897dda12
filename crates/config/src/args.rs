use clap::Parser;
use clap::error::ErrorKind;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("start block {start} is greater than end block {end}")]
pub struct RangeError {
    pub start: u64,
    pub end: u64,
}

/// Command line arguments: `export <startBlock> <endBlock>`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First block height to export (inclusive)
    #[arg(value_name = "startBlock")]
    pub start_block: u64,

    /// Last block height to export (inclusive)
    #[arg(value_name = "endBlock")]
    pub end_block: u64,

    /// Path to .env file (e.g., .env.polkadot)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,
}

impl Args {
    /// Parse command line arguments, exiting the process on failure.
    ///
    /// Usage errors (missing or non-numeric arguments) exit with status 1;
    /// `--help` and `--version` keep clap's exit status 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => {
                    let _ = e.print();
                    std::process::exit(1);
                }
            },
        }
    }

    /// The requested heights, validated so the range is well-formed.
    pub fn block_range(&self) -> Result<RangeInclusive<u64>, RangeError> {
        if self.start_block > self.end_block {
            return Err(RangeError {
                start: self.start_block,
                end: self.end_block,
            });
        }
        Ok(self.start_block..=self.end_block)
    }

    /// Load the configured dotenv file, if one exists.
    pub fn load_env_file(&self) {
        let _ = dotenv::from_filename(&self.env_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positional_heights() {
        let args = Args::try_parse_from(["export", "5", "9"]).unwrap();
        assert_eq!(args.start_block, 5);
        assert_eq!(args.end_block, 9);
        assert_eq!(args.env_file, ".env");
    }

    #[test]
    fn test_rejects_non_numeric_height() {
        assert!(Args::try_parse_from(["export", "abc", "9"]).is_err());
    }

    #[test]
    fn test_rejects_missing_height() {
        assert!(Args::try_parse_from(["export", "5"]).is_err());
    }

    #[test]
    fn test_block_range_rejects_start_after_end() {
        let args = Args::try_parse_from(["export", "5", "3"]).unwrap();
        assert_eq!(args.block_range(), Err(RangeError { start: 5, end: 3 }));
    }

    #[test]
    fn test_block_range_allows_single_height() {
        let args = Args::try_parse_from(["export", "100", "100"]).unwrap();
        assert_eq!(args.block_range().unwrap(), 100..=100);
    }
}
