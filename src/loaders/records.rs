use crate::model::*;
use eyre::{WrapErr, bail, eyre};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Non-blank lines, split on whitespace, with their 1-based line number.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

fn number<T>(field: &str, what: &str, line: usize) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    field
        .parse()
        .wrap_err_with(|| format!("line {line}: invalid {what} {field:?}"))
}

/// Parse `<id> <load> <subject>*` lines.
pub fn parse_staff(text: &str) -> eyre::Result<Vec<Staff>> {
    let mut seen = BTreeSet::new();
    let mut staff = Vec::new();
    for (line, fields) in records(text) {
        let [id, load, expertise @ ..] = fields.as_slice() else {
            bail!("line {line}: missing load for staff member {}", fields[0]);
        };
        if !seen.insert(*id) {
            bail!("line {line}: duplicate staff member {id}");
        }
        staff.push(Staff::new(
            StaffId((*id).to_owned()),
            number(load, "load", line)?,
            expertise.iter().map(|&e| e.to_owned()).collect(),
        ));
    }
    Ok(staff)
}

/// Parse `<id> <proposer> <multiplicity> <subject> <title>` lines, the title
/// possibly containing spaces.
pub fn parse_projects(text: &str) -> eyre::Result<Vec<Project>> {
    let mut seen = BTreeSet::new();
    let mut projects = Vec::new();
    for (line, fields) in records(text) {
        let [id, proposer, multiplicity, subject, title @ ..] = fields.as_slice() else {
            bail!("line {line}: expected project id, proposer, multiplicity and subject");
        };
        let id = ProjectId(number(id, "project id", line)?);
        if !seen.insert(id) {
            bail!("line {line}: duplicate project {id}");
        }
        projects.push(Project::new(
            id,
            StaffId((*proposer).to_owned()),
            number(multiplicity, "multiplicity", line)?,
            (*subject).to_owned(),
            title.join(" "),
        ));
    }
    Ok(projects)
}

/// Parse `<id> <choice>*` lines, choices being given best first.
pub fn parse_students(text: &str) -> eyre::Result<Vec<Student>> {
    records(text)
        .enumerate()
        .map(|(idx, (line, fields))| {
            let (name, choices) = fields
                .split_first()
                .ok_or_else(|| eyre!("line {line}: empty record"))?;
            let rankings = choices
                .iter()
                .map(|c| number(c, "project choice", line).map(ProjectId))
                .collect::<eyre::Result<Vec<_>>>()?;
            Ok(Student::new(StudentId(idx), (*name).to_owned(), rankings))
        })
        .collect()
}
