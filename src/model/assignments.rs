use super::*;
use std::collections::{BTreeMap, HashMap};

/// Students, projects and staff together with the capacity bookkeeping of an
/// allocation in progress. Projects and staff are kept ordered by id, so that
/// every driving loop visits them in ascending id order.
#[derive(Clone, Debug)]
pub struct Assignments {
    pub students: Vec<Student>,
    pub projects: BTreeMap<ProjectId, Project>,
    pub staff: BTreeMap<StaffId, Staff>,
    names: HashMap<String, StudentId>,
}

impl Assignments {
    /// Students keep their input order and are renumbered by position.
    pub fn new(mut students: Vec<Student>, projects: Vec<Project>, staff: Vec<Staff>) -> Self {
        let mut names = HashMap::with_capacity(students.len());
        for (idx, student) in students.iter_mut().enumerate() {
            student.id = StudentId(idx);
            names.entry(student.name.clone()).or_insert(student.id);
        }
        Assignments {
            students,
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
            staff: staff.into_iter().map(|s| (s.id.clone(), s)).collect(),
            names,
        }
    }

    pub fn student(&self, StudentId(student): StudentId) -> &Student {
        &self.students[student]
    }

    pub fn student_named(&self, name: &str) -> Option<StudentId> {
        self.names.get(name).copied()
    }

    pub fn project(&self, project: ProjectId) -> &Project {
        &self.projects[&project]
    }

    pub fn find_project(&self, project: ProjectId) -> Option<&Project> {
        self.projects.get(&project)
    }

    pub fn staff_member(&self, staff: &StaffId) -> &Staff {
        &self.staff[staff]
    }

    pub fn find_staff(&self, staff: &StaffId) -> Option<&Staff> {
        self.staff.get(staff)
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        (0..self.students.len()).map(StudentId).collect()
    }

    pub fn filter_projects<F>(&self, condition: F) -> Vec<ProjectId>
    where
        F: Fn(ProjectId) -> bool,
    {
        self.projects
            .keys()
            .copied()
            .filter(|&p| condition(p))
            .collect()
    }

    pub fn all_staff(&self) -> Vec<StaffId> {
        self.staff.keys().cloned().collect()
    }

    pub fn rankings(&self, student: StudentId) -> &[ProjectId] {
        &self.student(student).rankings
    }

    pub fn rank_of(&self, student: StudentId, project: ProjectId) -> Option<usize> {
        self.student(student).rank_of(project)
    }

    pub fn project_for(&self, student: StudentId) -> Option<ProjectId> {
        self.student(student).project
    }

    pub fn supervisor_for(&self, student: StudentId) -> Option<&StaffId> {
        self.student(student).supervisor.as_ref()
    }

    pub fn students_for(&self, project: ProjectId) -> Vec<StudentId> {
        self.students
            .iter()
            .filter(|s| s.project == Some(project))
            .map(|s| s.id)
            .collect()
    }

    pub fn supervisees_of(&self, staff: &StaffId) -> Vec<StudentId> {
        self.students
            .iter()
            .filter(|s| s.supervisor.as_ref() == Some(staff))
            .map(|s| s.id)
            .collect()
    }

    /// Unknown projects never have room.
    pub fn has_room(&self, project: ProjectId) -> bool {
        self.find_project(project).is_some_and(Project::has_room)
    }

    pub fn can_supervise(&self, staff: &StaffId) -> bool {
        self.find_staff(staff).is_some_and(Staff::can_supervise)
    }

    pub fn is_expert(&self, staff: &StaffId, project: ProjectId) -> bool {
        self.staff_member(staff)
            .is_expert_in(&self.project(project).subject)
    }

    pub fn affinity(&self, staff: &StaffId, project: ProjectId) -> Affinity {
        self.staff_member(staff).affinity_for(self.project(project))
    }

    pub fn is_open(&self, project: ProjectId) -> bool {
        self.project(project).assigned > 0
    }

    pub fn assign_to(&mut self, student: StudentId, project: ProjectId) {
        assert!(
            self.project_for(student).is_none(),
            "a project is already assigned to this student"
        );
        assert!(self.has_room(project), "project is already full");
        self.students[student.0].project = Some(project);
        if let Some(p) = self.projects.get_mut(&project) {
            p.assigned += 1;
        }
    }

    /// Assign `project` to `student` if it exists and still has room.
    pub fn assign_if_room(&mut self, student: StudentId, project: ProjectId) -> bool {
        if !self.has_room(project) {
            return false;
        }
        self.assign_to(student, project);
        true
    }

    /// First project, in id order, with room left and matching `condition`.
    pub fn first_project_with_room<F>(&self, condition: F) -> Option<ProjectId>
    where
        F: Fn(&Project) -> bool,
    {
        self.projects
            .values()
            .find(|p| p.has_room() && condition(p))
            .map(|p| p.id)
    }

    /// Make sure that `student` has a project, placing it on the first
    /// project with room left if needed. Return `false` if every project is
    /// full.
    pub fn ensure_project(&mut self, student: StudentId) -> bool {
        if self.project_for(student).is_some() {
            return true;
        }
        match self.first_project_with_room(|_| true) {
            Some(project) => {
                self.assign_to(student, project);
                true
            }
            None => false,
        }
    }

    /// Attach `staff` as the supervisor of `student`. This only happens if
    /// the student already has a project but no supervisor, and if the staff
    /// member has some load left.
    pub fn supervise(&mut self, student: StudentId, staff: &StaffId) -> bool {
        if !self.can_supervise(staff)
            || self.project_for(student).is_none()
            || self.supervisor_for(student).is_some()
        {
            return false;
        }
        self.students[student.0].supervisor = Some(staff.clone());
        if let Some(st) = self.staff.get_mut(staff) {
            st.assigned += 1;
        }
        true
    }

    pub fn unassigned_students(&self) -> Vec<StudentId> {
        self.students
            .iter()
            .filter(|s| s.project.is_none())
            .map(|s| s.id)
            .collect()
    }

    pub fn unsupervised_students(&self) -> Vec<StudentId> {
        self.students
            .iter()
            .filter(|s| s.supervisor.is_none())
            .map(|s| s.id)
            .collect()
    }

    pub fn total_places(&self) -> u64 {
        self.projects.values().map(|p| u64::from(p.multiplicity)).sum()
    }

    pub fn total_load(&self) -> u64 {
        self.staff.values().map(|s| u64::from(s.load)).sum()
    }

    /// Check that there are enough project places and supervision slots for
    /// every student.
    pub fn has_enough_capacity(&self) -> bool {
        let students = self.students.len() as u64;
        self.total_places() >= students && self.total_load() >= students
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::*;

    fn sample() -> Assignments {
        Assignments::new(
            vec![student("s1", &[10]), student("s2", &[20, 10])],
            vec![project(20, "bob", 1, "db"), project(10, "alice", 1, "ai")],
            vec![staff("bob", 1, &["ai"]), staff("alice", 1, &[])],
        )
    }

    #[test]
    fn ordered_collections() {
        let a = sample();
        assert_eq!(
            a.projects.keys().copied().collect::<Vec<_>>(),
            vec![ProjectId(10), ProjectId(20)]
        );
        assert_eq!(
            a.all_staff(),
            vec![StaffId("alice".into()), StaffId("bob".into())]
        );
        assert_eq!(a.all_students(), vec![StudentId(0), StudentId(1)]);
        assert_eq!(a.student_named("s2"), Some(StudentId(1)));
        assert_eq!(a.student_named("s3"), None);
    }

    #[test]
    fn assign_and_supervise() {
        let mut a = sample();
        let (s1, s2) = (StudentId(0), StudentId(1));
        let bob = StaffId("bob".into());
        assert!(!a.supervise(s1, &bob), "no project yet");
        assert!(a.assign_if_room(s1, ProjectId(10)));
        assert!(!a.assign_if_room(s2, ProjectId(10)));
        assert!(!a.assign_if_room(s2, ProjectId(99)));
        assert!(a.supervise(s1, &bob));
        assert!(!a.can_supervise(&bob));
        assert_eq!(a.affinity(&bob, ProjectId(10)), Affinity::Expertise);
        assert!(a.ensure_project(s2));
        assert_eq!(a.project_for(s2), Some(ProjectId(20)));
        assert!(!a.supervise(s2, &bob), "bob is full");
        assert_eq!(a.students_for(ProjectId(10)), vec![s1]);
        assert_eq!(a.supervisees_of(&bob), vec![s1]);
        assert_eq!(a.unsupervised_students(), vec![s2]);
        assert!(a.unassigned_students().is_empty());
    }

    #[test]
    fn ensure_project_when_everything_is_full() {
        let mut a = Assignments::new(
            vec![student("s1", &[]), student("s2", &[])],
            vec![project(1, "bob", 1, "db")],
            vec![staff("bob", 2, &[])],
        );
        assert!(!a.has_enough_capacity());
        assert!(a.ensure_project(StudentId(0)));
        assert!(!a.ensure_project(StudentId(1)));
        assert_eq!(a.unassigned_students(), vec![StudentId(1)]);
    }

    #[test]
    #[should_panic(expected = "already assigned")]
    fn assignment_is_write_once() {
        let mut a = sample();
        a.assign_to(StudentId(0), ProjectId(10));
        a.assign_to(StudentId(0), ProjectId(20));
    }
}
