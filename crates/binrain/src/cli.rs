//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// A terminal portfolio with a handwriting intro and binary rain.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Config file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Play the intro even if it was already shown in this session.
    #[arg(long, conflicts_with = "skip_intro")]
    pub replay_intro: bool,

    /// Go straight to the page.
    #[arg(long)]
    pub skip_intro: bool,

    /// Seed for the rain, for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["binrain", "--replay-intro", "--seed", "7"]);
        assert!(args.replay_intro);
        assert!(!args.skip_intro);
        assert_eq!(args.seed, Some(7));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_replay_conflicts_with_skip() {
        let result = Args::try_parse_from(["binrain", "--replay-intro", "--skip-intro"]);
        assert!(result.is_err());
    }
}
