use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forg", version, about = "Forg: Script-Driven File Organizer")]
pub struct Cli {
    /// Input script file path
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output folder name
    #[arg(short = 'o', long = "output-directory")]
    pub output_directory: PathBuf,
}
