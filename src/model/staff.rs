use super::Project;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StaffId(pub String);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Staff {
    pub id: StaffId,
    pub load: u32,
    pub assigned: u32,
    pub expertise: BTreeSet<String>,
}

impl Staff {
    pub fn new(id: StaffId, load: u32, expertise: BTreeSet<String>) -> Self {
        Self {
            id,
            load,
            assigned: 0,
            expertise,
        }
    }

    pub fn can_supervise(&self) -> bool {
        self.assigned < self.load
    }

    pub fn is_expert_in(&self, subject: &str) -> bool {
        self.expertise.contains(subject)
    }

    pub fn affinity_for(&self, project: &Project) -> Affinity {
        if project.proposer == self.id {
            Affinity::Proposer
        } else if self.is_expert_in(&project.subject) {
            Affinity::Expertise
        } else {
            Affinity::Neither
        }
    }
}

/// How much a staff member likes supervising a given project. Variants are
/// ordered best first, so a smaller value is strictly preferred.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Affinity {
    Proposer,
    Expertise,
    Neither,
}

impl Affinity {
    pub const ALL: [Affinity; 3] = [Affinity::Proposer, Affinity::Expertise, Affinity::Neither];

    pub fn is_better_than(self, other: Affinity) -> bool {
        self < other
    }

    pub fn points(self) -> u32 {
        match self {
            Affinity::Proposer => 4,
            Affinity::Expertise => 2,
            Affinity::Neither => 0,
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Affinity::Proposer => "own proposal",
            Affinity::Expertise => "expertise",
            Affinity::Neither => "neither",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectId;

    fn staff() -> Staff {
        Staff::new(
            StaffId("bob".into()),
            2,
            ["ai", "db"].into_iter().map(String::from).collect(),
        )
    }

    fn project(proposer: &str, subject: &str) -> Project {
        Project::new(
            ProjectId(1),
            StaffId(proposer.into()),
            1,
            subject.into(),
            String::new(),
        )
    }

    #[test]
    fn affinity_categories() {
        let st = staff();
        assert_eq!(st.affinity_for(&project("bob", "graphics")), Affinity::Proposer);
        assert_eq!(st.affinity_for(&project("carol", "db")), Affinity::Expertise);
        assert_eq!(st.affinity_for(&project("carol", "graphics")), Affinity::Neither);
    }

    #[test]
    fn affinity_order() {
        assert!(Affinity::Proposer.is_better_than(Affinity::Expertise));
        assert!(Affinity::Expertise.is_better_than(Affinity::Neither));
        assert!(!Affinity::Expertise.is_better_than(Affinity::Expertise));
        assert!(!Affinity::Neither.is_better_than(Affinity::Proposer));
    }
}
