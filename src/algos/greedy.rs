use crate::model::*;
use tracing::{debug, info, instrument, trace, warn};

/// Single pass first-fit allocator. Assignments are never undone: a student
/// project or supervisor, once set, stays set.
pub struct Greedy<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> Greedy<'a> {
    pub fn new(assignments: &'a mut Assignments) -> Greedy<'a> {
        Greedy { assignments }
    }

    pub fn assign(&mut self) {
        if !self.assignments.has_enough_capacity() {
            warn!(
                students = self.assignments.students.len(),
                places = self.assignments.total_places(),
                load = self.assignments.total_load(),
                "not enough capacity to place every student"
            );
        }

        // Give every student its best choice still having room.
        self.preferred_projects();

        // Let every staff member pick students, first on its own projects,
        // then on projects matching its expertise, then on anything.
        let staff = self.assignments.all_staff();
        for st in &staff {
            self.own_projects(st);
        }
        for st in &staff {
            let sweeps = self.expertise_projects(st);
            trace!(staff = %st, sweeps, "expertise pass done");
        }
        for st in &staff {
            let sweeps = self.any_projects(st);
            trace!(staff = %st, sweeps, "any project pass done");
        }

        // Whatever happened before, try to give everyone a project and a
        // supervisor.
        self.remaining_projects();
        self.remaining_supervisors();

        info!(
            unassigned = self.assignments.unassigned_students().len(),
            unsupervised = self.assignments.unsupervised_students().len(),
            "allocation done"
        );
    }

    #[instrument(skip_all)]
    fn preferred_projects(&mut self) {
        let a = &mut *self.assignments;
        for student in a.unassigned_students() {
            for project in a.rankings(student).to_vec() {
                if a.assign_if_room(student, project) {
                    trace!(
                        student = %a.student(student),
                        %project,
                        "student gets chosen project"
                    );
                    break;
                }
            }
        }
        debug!(
            unassigned = a.unassigned_students().len(),
            "preferred projects assigned"
        );
    }

    #[instrument(skip_all, fields(staff = %staff))]
    fn own_projects(&mut self, staff: &StaffId) {
        let a = &mut *self.assignments;
        if !a.can_supervise(staff) {
            return;
        }

        // Supervise students already placed on our projects.
        for student in a.all_students() {
            if !a.can_supervise(staff) {
                break;
            }
            if a.supervisor_for(student).is_some() {
                continue;
            }
            if let Some(project) = a.project_for(student) {
                if a.project(project).proposer == *staff {
                    a.supervise(student, staff);
                }
            }
        }

        // Place and supervise students without project on our projects.
        for student in a.all_students() {
            if !a.can_supervise(staff) {
                break;
            }
            if a.supervisor_for(student).is_some() || a.project_for(student).is_some() {
                continue;
            }
            if let Some(project) = a.first_project_with_room(|p| p.proposer == *staff) {
                a.assign_to(student, project);
                a.supervise(student, staff);
                trace!(student = %a.student(student), %project, "placed on own project");
            }
        }
    }

    #[instrument(skip_all, fields(staff = %staff))]
    fn expertise_projects(&mut self, staff: &StaffId) -> usize {
        let a = &mut *self.assignments;
        let mut sweeps = 0;
        while a.can_supervise(staff) {
            sweeps += 1;
            let mut changed = false;

            for student in a.all_students() {
                if !a.can_supervise(staff) {
                    break;
                }
                if a.supervisor_for(student).is_some() {
                    continue;
                }
                if let Some(project) = a.project_for(student) {
                    if a.is_expert(staff, project) && a.supervise(student, staff) {
                        changed = true;
                    }
                }
            }

            let expertise = a.staff_member(staff).expertise.clone();
            for student in a.all_students() {
                if !a.can_supervise(staff) {
                    break;
                }
                if a.supervisor_for(student).is_some() || a.project_for(student).is_some() {
                    continue;
                }
                if let Some(project) = a.first_project_with_room(|p| expertise.contains(&p.subject))
                {
                    a.assign_to(student, project);
                    if a.supervise(student, staff) {
                        changed = true;
                    }
                    trace!(student = %a.student(student), %project, "placed on expertise project");
                }
            }

            if !changed {
                break;
            }
        }
        sweeps
    }

    #[instrument(skip_all, fields(staff = %staff))]
    fn any_projects(&mut self, staff: &StaffId) -> usize {
        let a = &mut *self.assignments;
        let mut sweeps = 0;
        while a.can_supervise(staff) {
            sweeps += 1;
            let mut changed = false;

            for student in a.all_students() {
                if !a.can_supervise(staff) {
                    break;
                }
                if a.supervise(student, staff) {
                    changed = true;
                }
            }

            for student in a.all_students() {
                if !a.can_supervise(staff) {
                    break;
                }
                if a.supervisor_for(student).is_some() || a.project_for(student).is_some() {
                    continue;
                }
                if !a.ensure_project(student) {
                    continue;
                }
                if a.supervise(student, staff) {
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }
        sweeps
    }

    #[instrument(skip_all)]
    fn remaining_projects(&mut self) {
        let a = &mut *self.assignments;
        for student in a.unassigned_students() {
            if !a.ensure_project(student) {
                debug!(student = %a.student(student), "no project left with room");
            }
        }
    }

    #[instrument(skip_all)]
    fn remaining_supervisors(&mut self) {
        let a = &mut *self.assignments;
        let staff = a.all_staff();
        for student in a.unsupervised_students() {
            if !staff.iter().any(|st| a.supervise(student, st)) {
                debug!(student = %a.student(student), "no supervisor available");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::*;

    fn run(
        students: Vec<Student>,
        projects: Vec<Project>,
        staff: Vec<Staff>,
    ) -> Assignments {
        let mut a = Assignments::new(students, projects, staff);
        Greedy::new(&mut a).assign();
        a
    }

    fn placement(a: &Assignments, name: &str) -> (Option<i32>, Option<String>) {
        let s = a.student_named(name).unwrap();
        (
            a.project_for(s).map(|p| p.0),
            a.supervisor_for(s).map(|st| st.0.clone()),
        )
    }

    #[test]
    fn first_choice_with_room_wins() {
        let a = run(
            vec![
                student("s1", &[10, 20]),
                student("s2", &[10, 20]),
                student("s3", &[10, 20]),
            ],
            vec![project(10, "alice", 1, "ai"), project(20, "bob", 2, "db")],
            vec![staff("alice", 3, &[]), staff("bob", 3, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(10), Some("alice".into())));
        assert_eq!(placement(&a, "s2"), (Some(20), Some("bob".into())));
        assert_eq!(placement(&a, "s3"), (Some(20), Some("bob".into())));
    }

    #[test]
    fn unknown_choices_are_skipped() {
        let a = run(
            vec![student("s1", &[99, 20])],
            vec![project(10, "alice", 1, "ai"), project(20, "bob", 1, "db")],
            vec![staff("alice", 1, &[]), staff("bob", 1, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(20), Some("bob".into())));
    }

    #[test]
    fn proposer_supervises_before_expert() {
        // "amy" sorts first and is an expert, but "zed" proposed the project.
        let a = run(
            vec![student("s1", &[10])],
            vec![project(10, "zed", 1, "ai")],
            vec![staff("amy", 1, &["ai"]), staff("zed", 1, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(10), Some("zed".into())));
    }

    #[test]
    fn staff_places_students_on_own_projects() {
        // s2 has no choices; alice has load left and a project with room.
        let a = run(
            vec![student("s1", &[20]), student("s2", &[])],
            vec![project(10, "bob", 1, "db"), project(20, "alice", 1, "ai"), project(30, "alice", 1, "ai")],
            vec![staff("alice", 2, &[]), staff("bob", 1, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(20), Some("alice".into())));
        assert_eq!(placement(&a, "s2"), (Some(30), Some("alice".into())));
    }

    #[test]
    fn expertise_before_anything() {
        // alice has no project of her own; s1 must go on the "ai" project
        // rather than on the lower-numbered "db" one.
        let a = run(
            vec![student("s1", &[])],
            vec![project(10, "bob", 1, "db"), project(20, "carol", 1, "ai")],
            vec![staff("alice", 1, &["ai"]), staff("bob", 0, &[]), staff("carol", 0, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(20), Some("alice".into())));
    }

    #[test]
    fn any_project_as_last_resort() {
        let a = run(
            vec![student("s1", &[]), student("s2", &[])],
            vec![project(10, "bob", 1, "db"), project(20, "bob", 1, "db")],
            vec![staff("alice", 2, &["ai"]), staff("bob", 0, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(10), Some("alice".into())));
        assert_eq!(placement(&a, "s2"), (Some(20), Some("alice".into())));
    }

    #[test]
    fn exhausted_capacity_leaves_students_unplaced() {
        let a = run(
            vec![student("s1", &[10]), student("s2", &[10]), student("s3", &[])],
            vec![project(10, "alice", 2, "ai")],
            vec![staff("alice", 1, &[])],
        );
        assert_eq!(placement(&a, "s1"), (Some(10), Some("alice".into())));
        assert_eq!(placement(&a, "s2"), (Some(10), None));
        assert_eq!(placement(&a, "s3"), (None, None));
        assert_eq!(a.project(ProjectId(10)).assigned, 2);
        assert_eq!(a.staff_member(&sid("alice")).assigned, 1);
    }

    #[test]
    fn staff_passes_stop_within_load() {
        // Every useful sweep supervises at least one more student, so a pass
        // never sweeps more than load + 1 times.
        for load in 0..6 {
            let students = (0..10).map(|i| student(&format!("s{i}"), &[])).collect();
            let mut a = Assignments::new(
                students,
                vec![project(10, "bob", 3, "ai"), project(20, "bob", 20, "db")],
                vec![staff("alice", load, &["ai"]), staff("bob", 0, &[])],
            );
            let mut greedy = Greedy::new(&mut a);
            let alice = sid("alice");
            assert!(greedy.expertise_projects(&alice) <= load as usize + 1);
            assert!(greedy.any_projects(&alice) <= load as usize + 1);
            assert_eq!(a.staff_member(&alice).assigned, load);
        }
    }

    #[test]
    fn full_coverage_with_enough_capacity() {
        let students = (0..12)
            .map(|i| student(&format!("s{i:02}"), &[10 + (i % 3), 20]))
            .collect();
        let a = run(
            students,
            vec![
                project(10, "alice", 2, "ai"),
                project(11, "bob", 2, "db"),
                project(12, "carol", 2, "hci"),
                project(20, "dave", 3, "ai"),
                project(30, "dave", 5, "net"),
            ],
            vec![
                staff("alice", 3, &["db"]),
                staff("bob", 3, &["ai"]),
                staff("carol", 3, &[]),
                staff("dave", 4, &["net"]),
            ],
        );
        assert!(a.unassigned_students().is_empty());
        assert!(a.unsupervised_students().is_empty());
        for p in a.projects.values() {
            assert!(p.assigned <= p.multiplicity);
            assert_eq!(p.assigned as usize, a.students_for(p.id).len());
        }
        for st in a.staff.values() {
            assert!(st.assigned <= st.load);
            assert_eq!(st.assigned as usize, a.supervisees_of(&st.id).len());
        }
    }
}
