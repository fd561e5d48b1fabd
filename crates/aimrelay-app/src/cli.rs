use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for aimrelay-server
#[derive(Parser, Debug, Clone)]
#[command(name = "aimrelay-server")]
#[command(about = "Chat relay for Perplexity, DeepSeek, Grok and OpenAI with web search grounding")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "AIMRELAY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to (default: 0.0.0.0)
    #[arg(long, env = "AIMRELAY_BIND", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Port to listen on (default: 8000)
    #[arg(short, long, env = "AIMRELAY_PORT")]
    pub port: Option<u16>,

    /// Number of search hits injected into a grounded conversation
    #[arg(long, env = "SEARCH_CONTEXT_RESULTS", value_name = "N")]
    pub context_results: Option<usize>,

    /// Log at debug level
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json_logs: bool,
}
