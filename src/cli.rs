//! Command-line interface for gomoku_tui.

use clap::Parser;

/// Candidate servers probed in order when none are given on the command line.
const DEFAULT_SERVERS: [&str; 2] = [
    "http://phpdb.homeserver1/gomoku/",
    "http://172.23.72.107/gomoku/",
];

/// Gomoku TUI - terminal client for a two-player Gomoku server
#[derive(Parser, Debug)]
#[command(name = "gomoku_tui")]
#[command(about = "Terminal client for a two-player networked Gomoku server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Candidate server base URL (repeat the flag to probe several, in order)
    #[arg(long = "server", value_name = "URL")]
    pub servers: Vec<String>,

    /// Log file path (stdout belongs to the TUI)
    #[arg(long, default_value = "gomoku_tui.log")]
    pub log_file: std::path::PathBuf,
}

impl Cli {
    /// Ordered candidate list, falling back to the built-in LAN defaults.
    pub fn candidates(&self) -> Vec<String> {
        if self.servers.is_empty() {
            DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.servers.clone()
        }
    }
}
