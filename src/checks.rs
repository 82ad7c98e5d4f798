use crate::allocation::Allocation;
use crate::model::*;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Valid => "VALID",
            Verdict::Invalid => "INVALID",
        })
    }
}

/// First reason found for rejecting a candidate allocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    Malformed {
        line: usize,
    },
    UnknownStudent(String),
    DuplicateStudent(String),
    MissingStudents {
        expected: usize,
        found: usize,
    },
    Unplaced(String),
    UnknownProject {
        student: String,
        project: ProjectId,
    },
    UnknownSupervisor {
        student: String,
        supervisor: StaffId,
    },
    ProjectOverCapacity {
        project: ProjectId,
        count: u32,
        multiplicity: u32,
    },
    StaffOverloaded {
        staff: StaffId,
        count: u32,
        load: u32,
    },
    HigherChoiceAvailable {
        student: String,
        project: ProjectId,
    },
    StudentsWouldSwap {
        first: String,
        second: String,
    },
    SupervisorPrefersAvailable {
        student: String,
        supervisor: StaffId,
        project: ProjectId,
    },
    SupervisorsWouldSwap {
        first: StaffId,
        second: StaffId,
        first_student: String,
        second_student: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Malformed { line } => write!(f, "line {line} is malformed"),
            Violation::UnknownStudent(s) => write!(f, "unknown student {s}"),
            Violation::DuplicateStudent(s) => write!(f, "student {s} is listed more than once"),
            Violation::MissingStudents { expected, found } => {
                write!(f, "{found} students allocated out of {expected}")
            }
            Violation::Unplaced(s) => write!(f, "student {s} has no project or no supervisor"),
            Violation::UnknownProject { student, project } => {
                write!(f, "student {student} is allocated to unknown project {project}")
            }
            Violation::UnknownSupervisor {
                student,
                supervisor,
            } => write!(
                f,
                "student {student} is supervised by unknown staff member {supervisor}"
            ),
            Violation::ProjectOverCapacity {
                project,
                count,
                multiplicity,
            } => write!(
                f,
                "project {project} has {count} students for {multiplicity} places"
            ),
            Violation::StaffOverloaded { staff, count, load } => write!(
                f,
                "staff member {staff} supervises {count} students with a load of {load}"
            ),
            Violation::HigherChoiceAvailable { student, project } => write!(
                f,
                "student {student} could get better ranked project {project}"
            ),
            Violation::StudentsWouldSwap { first, second } => {
                write!(f, "students {first} and {second} would rather swap projects")
            }
            Violation::SupervisorPrefersAvailable {
                student,
                supervisor,
                project,
            } => write!(
                f,
                "supervisor {supervisor} would rather move student {student} to project {project}"
            ),
            Violation::SupervisorsWouldSwap {
                first,
                second,
                first_student,
                second_student,
            } => write!(
                f,
                "supervisors {first} and {second} would rather swap students {first_student} and {second_student}"
            ),
        }
    }
}

impl std::error::Error for Violation {}

/// Read a candidate allocation and tell whether it is legal and stable.
pub fn verify(a: &Assignments, text: &str) -> Verdict {
    match Allocation::parse(text, a).and_then(|alloc| check(a, &alloc)) {
        Ok(()) => Verdict::Valid,
        Err(violation) => {
            info!(%violation, "allocation rejected");
            Verdict::Invalid
        }
    }
}

/// Check an allocation against the records of `a`. Only the static part of
/// the records is used: usage counters are derived from the allocation.
pub fn check(a: &Assignments, alloc: &Allocation) -> Result<(), Violation> {
    let usage = check_legality(a, alloc)?;
    check_higher_choices(a, alloc, &usage)?;
    check_student_swaps(a, alloc)?;
    check_supervisor_choices(a, alloc, &usage)?;
    check_supervisor_swaps(a, alloc)
}

#[derive(Debug, Default)]
struct Usage {
    projects: BTreeMap<ProjectId, u32>,
    staff: BTreeMap<StaffId, u32>,
}

impl Usage {
    fn is_available(&self, a: &Assignments, project: ProjectId) -> bool {
        a.find_project(project).is_some_and(|p| {
            self.projects.get(&project).copied().unwrap_or(0) < p.multiplicity
        })
    }
}

fn check_legality(a: &Assignments, alloc: &Allocation) -> Result<Usage, Violation> {
    let mut usage = Usage::default();
    for (student, placement) in alloc.placements() {
        if a.find_project(placement.project).is_none() {
            return Err(Violation::UnknownProject {
                student: a.student(student).name.clone(),
                project: placement.project,
            });
        }
        if a.find_staff(&placement.supervisor).is_none() {
            return Err(Violation::UnknownSupervisor {
                student: a.student(student).name.clone(),
                supervisor: placement.supervisor.clone(),
            });
        }
        *usage.projects.entry(placement.project).or_default() += 1;
        *usage
            .staff
            .entry(placement.supervisor.clone())
            .or_default() += 1;
    }
    for (&project, &count) in &usage.projects {
        let multiplicity = a.project(project).multiplicity;
        if count > multiplicity {
            return Err(Violation::ProjectOverCapacity {
                project,
                count,
                multiplicity,
            });
        }
    }
    for (staff, &count) in &usage.staff {
        let load = a.staff_member(staff).load;
        if count > load {
            return Err(Violation::StaffOverloaded {
                staff: staff.clone(),
                count,
                load,
            });
        }
    }
    Ok(usage)
}

/// No student may be left below a better ranked project that still has room.
fn check_higher_choices(
    a: &Assignments,
    alloc: &Allocation,
    usage: &Usage,
) -> Result<(), Violation> {
    for s in &a.students {
        let current = s
            .rank_of(alloc.project_for(s.id))
            .unwrap_or(s.rankings.len());
        if let Some(&project) = s.rankings[..current]
            .iter()
            .find(|&&p| usage.is_available(a, p))
        {
            return Err(Violation::HigherChoiceAvailable {
                student: s.name.clone(),
                project,
            });
        }
    }
    Ok(())
}

/// No two students may both strictly prefer the project of the other.
fn check_student_swaps(a: &Assignments, alloc: &Allocation) -> Result<(), Violation> {
    for (i, first) in a.students.iter().enumerate() {
        let p1 = alloc.project_for(first.id);
        for second in &a.students[i + 1..] {
            let p2 = alloc.project_for(second.id);
            if first.strictly_prefers(p2, p1) && second.strictly_prefers(p1, p2) {
                return Err(Violation::StudentsWouldSwap {
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// A student who did not choose its project does not care which project it
/// gets, so its supervisor must not have a better suited project with room.
fn check_supervisor_choices(
    a: &Assignments,
    alloc: &Allocation,
    usage: &Usage,
) -> Result<(), Violation> {
    for s in &a.students {
        let current = alloc.project_for(s.id);
        if s.rank_of(current).is_some() {
            continue;
        }
        let supervisor = a.staff_member(alloc.supervisor_for(s.id));
        let affinity = supervisor.affinity_for(a.project(current));
        if let Some(better) = a.projects.values().find(|p| {
            usage.is_available(a, p.id) && supervisor.affinity_for(p).is_better_than(affinity)
        }) {
            return Err(Violation::SupervisorPrefersAvailable {
                student: s.name.clone(),
                supervisor: supervisor.id.clone(),
                project: better.id,
            });
        }
    }
    Ok(())
}

/// No two supervisors may both strictly gain by exchanging one of their
/// students. Students keep their projects, only supervision moves.
fn check_supervisor_swaps(a: &Assignments, alloc: &Allocation) -> Result<(), Violation> {
    let mut supervisees: BTreeMap<&StaffId, Vec<StudentId>> = BTreeMap::new();
    for (student, placement) in alloc.placements() {
        supervisees
            .entry(&placement.supervisor)
            .or_default()
            .push(student);
    }
    let supervisees = supervisees
        .into_iter()
        .map(|(st, students)| (a.staff_member(st), students))
        .collect::<Vec<_>>();
    for (i, (first, first_students)) in supervisees.iter().enumerate() {
        for (second, second_students) in &supervisees[i + 1..] {
            for &s1 in first_students {
                let p1 = a.project(alloc.project_for(s1));
                for &s2 in second_students {
                    let p2 = a.project(alloc.project_for(s2));
                    if first.affinity_for(p2).is_better_than(first.affinity_for(p1))
                        && second.affinity_for(p1).is_better_than(second.affinity_for(p2))
                    {
                        return Err(Violation::SupervisorsWouldSwap {
                            first: first.id.clone(),
                            second: second.id.clone(),
                            first_student: a.student(s1).name.clone(),
                            second_student: a.student(s2).name.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
