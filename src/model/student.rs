use super::{ProjectId, StaffId};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StudentId(pub usize);

#[derive(Clone, Debug)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub rankings: Vec<ProjectId>,
    pub project: Option<ProjectId>,
    pub supervisor: Option<StaffId>,
}

impl Student {
    pub fn new(id: StudentId, name: String, rankings: Vec<ProjectId>) -> Self {
        Self {
            id,
            name,
            rankings,
            project: None,
            supervisor: None,
        }
    }

    pub fn rank_of(&self, project: ProjectId) -> Option<usize> {
        self.rankings.iter().position(|&p| p == project)
    }

    /// Return `true` if `better` is on the student list and ranked strictly
    /// above `worse`. An unranked project is never strictly preferred.
    pub fn strictly_prefers(&self, better: ProjectId, worse: ProjectId) -> bool {
        match (self.rank_of(better), self.rank_of(worse)) {
            (Some(b), Some(w)) => b < w,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn is_lazy(&self) -> bool {
        self.rankings.is_empty()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(rankings: &[i32]) -> Student {
        Student::new(
            StudentId(0),
            "s1".into(),
            rankings.iter().copied().map(ProjectId).collect(),
        )
    }

    #[test]
    fn rank_of_first_occurrence() {
        let s = student(&[10, 20, 10]);
        assert_eq!(s.rank_of(ProjectId(10)), Some(0));
        assert_eq!(s.rank_of(ProjectId(20)), Some(1));
        assert_eq!(s.rank_of(ProjectId(30)), None);
    }

    #[test]
    fn unranked_is_never_preferred() {
        let s = student(&[10, 20]);
        assert!(s.strictly_prefers(ProjectId(10), ProjectId(20)));
        assert!(!s.strictly_prefers(ProjectId(20), ProjectId(10)));
        assert!(s.strictly_prefers(ProjectId(20), ProjectId(99)));
        assert!(!s.strictly_prefers(ProjectId(99), ProjectId(20)));
        assert!(!s.strictly_prefers(ProjectId(98), ProjectId(99)));
        assert!(!s.strictly_prefers(ProjectId(10), ProjectId(10)));
    }
}
