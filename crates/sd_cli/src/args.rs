//! CLI surface: flags and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sd_core::ReportVariant;

#[derive(Parser, Debug)]
#[command(name = "statdoc", version, about = "Statistical report PDF generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a report PDF from a JSON request.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the JSON report request.
    #[arg(long)]
    pub input: PathBuf,

    /// Output PDF path.
    #[arg(long)]
    pub out: PathBuf,

    /// Which report pipeline to run.
    #[arg(long, value_enum, default_value_t = VariantArg::General)]
    pub variant: VariantArg,

    /// Override the request title.
    #[arg(long)]
    pub title: Option<String>,

    /// Suppress the success line on stderr.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VariantArg {
    General,
    Rejections,
}

impl From<VariantArg> for ReportVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::General => ReportVariant::General,
            VariantArg::Rejections => ReportVariant::Rejections,
        }
    }
}
