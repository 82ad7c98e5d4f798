use super::StaffId;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProjectId(pub i32);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub proposer: StaffId,
    pub subject: String,
    pub multiplicity: u32,
    pub assigned: u32,
}

impl Project {
    pub fn new(
        id: ProjectId,
        proposer: StaffId,
        multiplicity: u32,
        subject: String,
        title: String,
    ) -> Self {
        Self {
            id,
            title,
            proposer,
            subject,
            multiplicity,
            assigned: 0,
        }
    }

    pub fn has_room(&self) -> bool {
        self.assigned < self.multiplicity
    }
}

#[test]
fn test_has_room() {
    let mut p = Project::new(
        ProjectId(10),
        StaffId("alice".into()),
        2,
        "ai".into(),
        "Neural nets".into(),
    );
    assert!(p.has_room());
    p.assigned = 2;
    assert!(!p.has_room());
    let p = Project {
        multiplicity: 0,
        assigned: 0,
        ..p
    };
    assert!(!p.has_room());
}
