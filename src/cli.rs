//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Replays the login gate's navigation decisions against file-backed storage.
#[derive(Debug, Parser)]
#[command(name = "cerberus-gate", version = cerberus_gate::build_info::VERSION, long_version = cerberus_gate::build_info::LONG_VERSION)]
pub struct Args {
    /// Path to config file (default: ./cerberus.toml or ~/.config/cerberus/cerberus.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the issuer base URL.
    #[arg(long = "issuer", global = true)]
    pub issuer: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Visit an address and follow client-side redirects; prints the outcome as JSON.
    Navigate {
        /// Absolute address being visited.
        href: String,
        /// `document.referrer` of the visit.
        #[arg(long = "referrer")]
        referrer: Option<String>,
        /// Navigation state `from` attached to the visit.
        #[arg(long = "from")]
        from: Option<String>,
        /// Treat the visitor as already signed in.
        #[arg(long = "signed-in")]
        signed_in: bool,
    },
    /// Resolve a raw redirect value against the issuer.
    Resolve {
        /// Raw value; omitted means empty.
        candidate: Option<String>,
    },
    /// Consume the redirect stored by the sign-in page, as after a successful login.
    CompleteLogin,
    /// Delete both storage scopes.
    ResetStorage,
}
