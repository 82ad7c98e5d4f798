use super::*;

pub(crate) fn staff(id: &str, load: u32, expertise: &[&str]) -> Staff {
    Staff::new(
        StaffId(id.into()),
        load,
        expertise.iter().map(|&e| e.to_owned()).collect(),
    )
}

pub(crate) fn project(id: i32, proposer: &str, multiplicity: u32, subject: &str) -> Project {
    Project::new(
        ProjectId(id),
        StaffId(proposer.into()),
        multiplicity,
        subject.into(),
        format!("Project {id}"),
    )
}

pub(crate) fn student(name: &str, rankings: &[i32]) -> Student {
    Student::new(
        StudentId(0),
        name.into(),
        rankings.iter().copied().map(ProjectId).collect(),
    )
}

pub(crate) fn sid(id: &str) -> StaffId {
    StaffId(id.into())
}
