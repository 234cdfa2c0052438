use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::postprocess::NavLink;

#[derive(Debug, Parser)]
#[command(
    name = "alma-plot",
    version,
    about = "Interactive ALMA classification plots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the interactive document from a results table
    Generate(GenerateArgs),
    /// Restyle and wrap an already generated document
    PostProcess(PostProcessArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long, help = "Results table (.csv, .tsv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, help = "Output directory for index.html")]
    pub out: PathBuf,

    #[arg(long, help = "JSON plot configuration")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "column",
        help = "Facet column for a map tab (repeatable; replaces configured list)"
    )]
    pub columns: Vec<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, help = "Sample id to highlight (needs sample_id_column)")]
    pub test_sample: Option<String>,

    #[arg(long, default_value_t = false, help = "Also write alma_summary.json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PostProcessArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub heading: Option<String>,

    #[arg(long, help = "Stylesheet file replacing the presentation theme")]
    pub stylesheet: Option<PathBuf>,

    #[arg(long)]
    pub container_id: Option<String>,

    #[arg(
        long = "link",
        help = "Navigation link as LABEL=HREF (repeatable; replaces defaults)"
    )]
    pub links: Vec<NavLink>,

    #[arg(long)]
    pub footer: Option<String>,
}
