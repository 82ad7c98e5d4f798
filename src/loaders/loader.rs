use super::records::{parse_projects, parse_staff, parse_students};
use crate::model::Assignments;
use eyre::WrapErr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Record files describing the staff, the projects and the students.
#[derive(Clone, Debug)]
pub struct Loader {
    staff: PathBuf,
    projects: PathBuf,
    students: PathBuf,
}

fn read(path: &Path, what: &str) -> eyre::Result<String> {
    fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read {what} file {}", path.display()))
}

impl Loader {
    pub fn new(staff: PathBuf, projects: PathBuf, students: PathBuf) -> Self {
        Self {
            staff,
            projects,
            students,
        }
    }

    pub fn load(&self) -> eyre::Result<Assignments> {
        let staff = parse_staff(&read(&self.staff, "staff")?)
            .wrap_err_with(|| format!("cannot load staff from {}", self.staff.display()))?;
        let projects = parse_projects(&read(&self.projects, "projects")?)
            .wrap_err_with(|| format!("cannot load projects from {}", self.projects.display()))?;
        let students = parse_students(&read(&self.students, "students")?)
            .wrap_err_with(|| format!("cannot load students from {}", self.students.display()))?;
        info!(
            staff = staff.len(),
            projects = projects.len(),
            students = students.len(),
            "records loaded"
        );
        Ok(Assignments::new(students, projects, staff))
    }

    pub fn save_assignments(path: &Path, a: &Assignments, score: u32) -> eyre::Result<()> {
        let file = fs::File::create(path)
            .wrap_err_with(|| format!("cannot create output file {}", path.display()))?;
        Self::write_assignments(file, a, score)
            .wrap_err_with(|| format!("cannot write output file {}", path.display()))?;
        debug!(path = %path.display(), "assignments saved");
        Ok(())
    }

    /// Write one `student project supervisor` line per student, sorted by
    /// student, then the score. Missing projects are written as `-1` and
    /// missing supervisors as an empty field.
    pub fn write_assignments<W: Write>(writer: W, a: &Assignments, score: u32) -> eyre::Result<()> {
        let mut students = a.students.iter().collect::<Vec<_>>();
        students.sort_by(|s1, s2| s1.name.cmp(&s2.name));
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for s in students {
            wtr.write_record([
                s.name.clone(),
                s.project.map_or_else(|| "-1".to_owned(), |p| p.to_string()),
                s.supervisor.as_ref().map_or_else(String::new, |st| st.0.clone()),
            ])?;
        }
        wtr.write_record([score.to_string()])?;
        wtr.flush()?;
        Ok(())
    }
}
