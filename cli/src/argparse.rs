use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "erp",
    about = "Inspect and query ERP list screens",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the client configuration file
    #[arg(long, global = true, default_value = "erp.toml")]
    pub config: PathBuf,

    /// Backend base URL, overrides the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in screens
    Screens,
    /// Show the filter fields of a screen and their operators
    Fields(ScreenArgs),
    /// Build the query string for a set of filters without contacting the backend
    Query(FilterArgs),
    /// Resolve the dropdown options of a screen
    Options(ScreenArgs),
    /// Run a search on a screen and print the returned rows
    Search(SearchArgs),
}

#[derive(Args)]
pub struct ScreenArgs {
    /// Screen name, e.g. products
    pub screen: String,

    /// Schema file (JSON, YAML or TOML) to use instead of the built-in one
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Filter as field:operator:value, or field:between:from:to. Use
    /// field:between:from..to when a bound contains a colon
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the rows as a single JSON array
    #[arg(long)]
    pub json: bool,
}
