use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cascade", version, about = "Cascade CLI")]
pub struct Cli {
    /// Config file; defaults to .cascade.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Populate the department control for an organization
    Departments(PopulateArgs),
    /// Populate the designation control for a department
    Designations(PopulateArgs),
}

#[derive(Args)]
pub struct PopulateArgs {
    /// Organization or department id
    pub parent_id: String,
    /// Value selected in the control before it is repopulated
    #[arg(long)]
    pub selected: Option<String>,
    /// Print the inserted markup and the resulting control
    #[arg(long)]
    pub markup: bool,
}
