//! Command-line arguments and defaults
//!
//! Resolution follows priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Compiled default (fallback)

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for madang-rating
#[derive(Parser, Debug)]
#[command(name = "madang-rating")]
#[command(about = "Mahjong game record keeping service")]
#[command(version)]
pub struct Args {
    /// Path to the SQLite database file (created if absent)
    #[arg(short, long, default_value = "games.db", env = "MADANG_DB")]
    pub database: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "MADANG_BIND")]
    pub bind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["madang-rating"]);
        assert_eq!(args.database, PathBuf::from("games.db"));
        assert_eq!(args.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "madang-rating",
            "--database",
            "/tmp/other.db",
            "--bind",
            "127.0.0.1:8080",
        ]);
        assert_eq!(args.database, PathBuf::from("/tmp/other.db"));
        assert_eq!(args.bind, "127.0.0.1:8080");
    }
}
