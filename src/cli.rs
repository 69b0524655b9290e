use clap::{Parser, Subcommand};

/// TubeGate — REST proxy for the YouTube Data API
#[derive(Parser)]
#[command(name = "tubegate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind (overrides TUBEGATE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the Google OAuth consent URL for headless bootstrap
    AuthUrl,
}
