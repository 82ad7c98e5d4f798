use crate::model::*;

/// Only the first ranks earn points, the best one earning this much.
const RANK_POINTS: usize = 4;

/// Points earned by a student for its project choice and its supervisor.
pub fn student_score(a: &Assignments, student: StudentId) -> u32 {
    let Some(project) = a.project_for(student) else {
        return 0;
    };
    let choice = a
        .rank_of(student, project)
        .filter(|&rank| rank < RANK_POINTS)
        .map_or(0, |rank| (RANK_POINTS - rank) as u32);
    let supervision = a
        .supervisor_for(student)
        .filter(|st| a.find_staff(st).is_some() && a.find_project(project).is_some())
        .map_or(0, |st| a.affinity(st, project).points());
    choice + supervision
}

pub fn score(a: &Assignments) -> u32 {
    a.all_students()
        .into_iter()
        .map(|s| student_score(a, s))
        .sum()
}

/// Number of students placed on their choice of each rank, truncated after
/// the last non-empty rank.
pub fn statistics(a: &Assignments) -> Vec<usize> {
    let longest = a.students.iter().map(|s| s.rankings.len()).max().unwrap_or(0);
    let mut ranks = vec![0; longest];
    for s in &a.students {
        if let Some(rank) = s.project.and_then(|p| s.rank_of(p)) {
            ranks[rank] += 1;
        }
    }
    let latest = ranks.iter().rposition(|&n| n != 0).map_or(0, |n| n + 1);
    ranks.truncate(latest);
    ranks
}

/// Number of supervised students for each supervision affinity.
pub fn affinities(a: &Assignments) -> [usize; 3] {
    let mut counts = [0; 3];
    for s in &a.students {
        if let (Some(project), Some(st)) = (s.project, &s.supervisor) {
            counts[a.affinity(st, project) as usize] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::*;

    fn sample() -> Assignments {
        Assignments::new(
            vec![
                student("s1", &[10, 20]),
                student("s2", &[10, 20]),
                student("s3", &[1, 2, 3, 4, 20]),
                student("s4", &[]),
            ],
            vec![
                project(10, "alice", 1, "ai"),
                project(20, "bob", 3, "db"),
            ],
            vec![staff("alice", 2, &[]), staff("bob", 2, &["ai"])],
        )
    }

    #[test]
    fn first_choice_with_proposer() {
        let mut a = sample();
        a.assign_to(StudentId(0), ProjectId(10));
        a.supervise(StudentId(0), &sid("alice"));
        assert_eq!(student_score(&a, StudentId(0)), 8);
        assert_eq!(score(&a), 8);
    }

    #[test]
    fn scores_by_rank_and_affinity() {
        let mut a = sample();
        a.assign_to(StudentId(0), ProjectId(10));
        a.supervise(StudentId(0), &sid("bob"));
        a.assign_to(StudentId(1), ProjectId(20));
        a.supervise(StudentId(1), &sid("alice"));
        a.assign_to(StudentId(2), ProjectId(20));
        a.supervise(StudentId(2), &sid("bob"));
        a.assign_to(StudentId(3), ProjectId(20));
        // rank 0 + expertise, rank 1 + neither, rank 4 + proposer, unsupervised
        assert_eq!(student_score(&a, StudentId(0)), 4 + 2);
        assert_eq!(student_score(&a, StudentId(1)), 3);
        assert_eq!(student_score(&a, StudentId(2)), 4);
        assert_eq!(student_score(&a, StudentId(3)), 0);
        assert_eq!(score(&a), 13);
        assert_eq!(statistics(&a), vec![1, 1, 0, 0, 1]);
        assert_eq!(affinities(&a), [1, 1, 1]);
    }

    #[test]
    fn empty_allocation() {
        let a = sample();
        assert_eq!(score(&a), 0);
        assert!(statistics(&a).is_empty());
        assert_eq!(affinities(&a), [0, 0, 0]);
    }
}
