use std::path::PathBuf;

use clap::Parser;

/// Watch a Discord user's presence through Lanyard.
#[derive(Parser, Debug)]
#[command(name = "lanyard", version, about)]
pub struct Args {
    /// Discord user id. Defaults to `presence.user_id` from the config.
    pub user_id: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Fetch once over HTTP, print, and exit.
    #[arg(long)]
    pub once: bool,

    /// Reconnect when the live socket drops.
    #[arg(long)]
    pub reconnect: bool,

    /// Print records as JSON instead of a card.
    #[arg(long)]
    pub json: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_id_and_flags() {
        let args = Args::try_parse_from([
            "lanyard",
            "94490510688792576",
            "--once",
            "--log-level",
            "debug",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(args.user_id.as_deref(), Some("94490510688792576"));
        assert!(args.once);
        assert!(!args.reconnect);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.print_config);
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["lanyard"]).unwrap();
        assert!(args.user_id.is_none());
        assert!(args.config.is_none());
        assert!(!args.json);
        assert!(!args.print_config);
    }
}
