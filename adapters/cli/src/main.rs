#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a match over the host's stdin/stdout protocol.

mod driver;
mod logging;

use std::io;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use corner_rush_system_strategy::{Profile, SessionConfig};

use crate::logging::LogFormat;

/// Turn plan selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    /// Layered defense with a two-phase corner scout rush.
    CornerRush,
    /// Spread-out defense with interceptor stalling.
    Starter,
    /// Wall funnel with demolisher pushes.
    Siege,
}

impl From<ProfileArg> for Profile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::CornerRush => Profile::CornerRush,
            ProfileArg::Starter => Profile::Starter,
            ProfileArg::Siege => Profile::Siege,
        }
    }
}

/// Tower-defense decision engine speaking the host line protocol.
#[derive(Debug, Parser)]
#[command(name = "corner-rush", version, about)]
struct CliArgs {
    /// Turn plan to run for the whole match.
    #[arg(long, value_enum, default_value_t = ProfileArg::CornerRush, env = "CORNER_RUSH_PROFILE")]
    profile: ProfileArg,

    /// Seed for random choices; drawn from the OS when omitted.
    #[arg(long, env = "CORNER_RUSH_SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log record format written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Human, env = "CORNER_RUSH_LOG_FORMAT")]
    log_format: LogFormat,
}

/// Entry point for the Corner Rush command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.log_format, args.verbose);

    let config = SessionConfig {
        profile: args.profile.into(),
        seed: args.seed,
    };
    tracing::info!(?config, "waiting for game configuration");

    let stdin = io::stdin();
    driver::run(stdin.lock(), io::stdout().lock(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_default_to_the_corner_rush() {
        let args = CliArgs::try_parse_from(["corner-rush"]).expect("defaults parse");
        assert_eq!(args.profile, ProfileArg::CornerRush);
        assert_eq!(args.seed, None);
        assert_eq!(args.log_format, LogFormat::Human);
    }

    #[test]
    fn profile_seed_and_verbosity_parse() {
        let args = CliArgs::try_parse_from([
            "corner-rush",
            "--profile",
            "starter",
            "--seed",
            "42",
            "-vv",
            "--log-format",
            "json",
        ])
        .expect("valid arguments");
        assert_eq!(Profile::from(args.profile), Profile::Starter);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.log_format, LogFormat::Json);
    }
}
