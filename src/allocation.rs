use crate::checks::Violation;
use crate::model::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    pub project: ProjectId,
    pub supervisor: StaffId,
}

/// A candidate allocation, giving exactly one placement to every known
/// student. Project and supervisor ids are kept as found and may not exist.
#[derive(Clone, Debug)]
pub struct Allocation {
    placements: Vec<Placement>,
}

impl Allocation {
    /// Read an allocation with one `student project supervisor` line per
    /// student. A line holding a single number is a score line and is
    /// ignored, as are blank lines.
    pub fn parse(text: &str, a: &Assignments) -> Result<Allocation, Violation> {
        let mut placements: Vec<Option<Placement>> = vec![None; a.students.len()];
        let mut found = 0;
        for (n, line) in text.lines().enumerate() {
            let tokens = line.split_whitespace().collect::<Vec<_>>();
            match tokens[..] {
                [] => continue,
                [score] if score.bytes().all(|b| b.is_ascii_digit()) => continue,
                [student, project, supervisor] => {
                    let project = project
                        .parse()
                        .map(ProjectId)
                        .map_err(|_| Violation::Malformed { line: n + 1 })?;
                    let id = a
                        .student_named(student)
                        .ok_or_else(|| Violation::UnknownStudent(student.to_owned()))?;
                    let slot = &mut placements[id.0];
                    if slot.is_some() {
                        return Err(Violation::DuplicateStudent(student.to_owned()));
                    }
                    *slot = Some(Placement {
                        project,
                        supervisor: StaffId(supervisor.to_owned()),
                    });
                    found += 1;
                }
                _ => return Err(Violation::Malformed { line: n + 1 }),
            }
        }
        if found != a.students.len() {
            return Err(Violation::MissingStudents {
                expected: a.students.len(),
                found,
            });
        }
        // Several students sharing a name leave some slots empty.
        let placements = placements
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Violation::MissingStudents {
                expected: a.students.len(),
                found,
            })?;
        Ok(Allocation { placements })
    }

    /// Build a candidate from the projects and supervisors recorded in `a`.
    pub fn from_assignments(a: &Assignments) -> Result<Allocation, Violation> {
        let placements = a
            .students
            .iter()
            .map(|s| match (s.project, &s.supervisor) {
                (Some(project), Some(supervisor)) => Ok(Placement {
                    project,
                    supervisor: supervisor.clone(),
                }),
                _ => Err(Violation::Unplaced(s.name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Allocation { placements })
    }

    pub fn placement(&self, StudentId(student): StudentId) -> &Placement {
        &self.placements[student]
    }

    pub fn project_for(&self, student: StudentId) -> ProjectId {
        self.placement(student).project
    }

    pub fn supervisor_for(&self, student: StudentId) -> &StaffId {
        &self.placement(student).supervisor
    }

    pub fn placements(&self) -> impl Iterator<Item = (StudentId, &Placement)> {
        self.placements
            .iter()
            .enumerate()
            .map(|(idx, p)| (StudentId(idx), p))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
