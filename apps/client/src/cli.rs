use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "client",
    about = "Generate tailored job applications from a job description and an optional CV",
    version
)]
pub struct Cli {
    /// Base URL of the generation service (overrides API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Origin that a relative API base resolves against (overrides APP_ORIGIN)
    #[arg(long, global = true)]
    pub origin: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit the job description line by line and generate on demand (default command)
    Interactive(InteractiveArgs),
    /// Submit one job description and print the generated application
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub struct InteractiveArgs {
    /// PDF CV to attach at startup
    #[arg(long)]
    pub cv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Job description text (read from stdin when neither --jd nor --jd-file is given)
    #[arg(long, conflicts_with = "jd_file")]
    pub jd: Option<String>,
    /// File containing the job description
    #[arg(long)]
    pub jd_file: Option<PathBuf>,
    /// PDF CV to attach
    #[arg(long)]
    pub cv: Option<PathBuf>,
    /// Also write the generated text to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Print a JSON report instead of the rendered page
    #[arg(long)]
    pub json: bool,
}
