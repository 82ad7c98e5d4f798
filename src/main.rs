use clap::Parser;
use rsalloc::algos::Greedy;
use rsalloc::allocation::Allocation;
use rsalloc::config::{Config, get_path};
use rsalloc::display::*;
use rsalloc::loaders::Loader;
use rsalloc::{checks, logging, stats};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    version,
    about = "Assign projects and supervisors to students"
)]
struct Options {
    /// Use FILE instead of rsalloc.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the students of every project
    #[arg(short, long)]
    details: bool,
    /// Check the stability of the result
    #[arg(long)]
    check: bool,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Staff file
    staff: Option<PathBuf>,
    /// Projects file
    projects: Option<PathBuf>,
    /// Students file
    students: Option<PathBuf>,
    /// Output allocation file
    output: Option<PathBuf>,
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
    let output = get_path(options.output, &config.output.allocation, "output")?;

    let mut assignments = loader.load()?;
    Greedy::new(&mut assignments).assign();
    let score = stats::score(&assignments);
    Loader::save_assignments(&output, &assignments, score)?;
    info!(score, output = %output.display(), "allocation written");

    for s in &assignments.students {
        match (s.project, &s.supervisor) {
            (None, _) => warn!(student = %s, "student could not get a project"),
            (Some(project), None) => {
                warn!(student = %s, %project, "student could not get a supervisor");
            }
            _ => (),
        }
    }

    if options.details || config.output.details {
        display_details(&assignments);
    }
    display_stats(&assignments, score);
    display_empty(&assignments);
    display_unplaced(&assignments);

    if options.check {
        match Allocation::from_assignments(&assignments)
            .and_then(|alloc| checks::check(&assignments, &alloc))
        {
            Ok(()) => info!("allocation is stable"),
            Err(violation) => warn!(%violation, "allocation is not valid"),
        }
    }
    Ok(())
}
