use clap::Parser;
use rsalloc::checks::{self, Verdict};
use rsalloc::config::{Config, get_path};
use rsalloc::loaders::Loader;
use rsalloc::logging;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    version,
    about = "Check that an allocation is legal and stable"
)]
struct Options {
    /// Use FILE instead of rsalloc.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Staff file
    staff: Option<PathBuf>,
    /// Projects file
    projects: Option<PathBuf>,
    /// Students file
    students: Option<PathBuf>,
    /// Allocation file to check
    allocation: Option<PathBuf>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    logging::init(options.verbosity)?;
    let config = Config::load_or_default(options.config.as_deref())?;
    let loader = Loader::new(
        get_path(options.staff, &config.input.staff, "staff")?,
        get_path(options.projects, &config.input.projects, "projects")?,
        get_path(options.students, &config.input.students, "students")?,
    );
    let allocation = get_path(options.allocation, &config.output.allocation, "allocation")?;

    let assignments = loader.load()?;
    let verdict = match fs::read_to_string(&allocation) {
        Ok(text) => checks::verify(&assignments, &text),
        Err(e) => {
            info!(path = %allocation.display(), error = %e, "cannot read allocation file");
            Verdict::Invalid
        }
    };
    println!("{verdict}");
    Ok(())
}
