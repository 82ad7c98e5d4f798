use crate::model::{Affinity, Assignments};
use crate::stats;

pub fn display_details(a: &Assignments) {
    let mut projects = a.projects.values().collect::<Vec<_>>();
    projects.sort_by_key(|p| p.title.clone());
    for p in projects {
        let mut students = a.students_for(p.id);
        students.sort_by_key(|&s| a.student(s).name.clone());
        if !students.is_empty() {
            println!("{} ({}, proposed by {}):", p.title, p.id, p.proposer);
            for s in students {
                print!("  - {}", a.student(s).name);
                if let Some(rank) = a.rank_of(s, p.id) {
                    print!(" (rank {})", rank + 1);
                }
                if let Some(st) = a.supervisor_for(s) {
                    print!(" supervised by {} ({})", st, a.affinity(st, p.id));
                }
                println!();
            }
            println!();
        }
    }
}

pub fn display_stats(a: &Assignments, score: u32) {
    let students = a.students.len();
    let lazy = a.students.iter().filter(|s| s.is_lazy()).count();
    println!(
        "Students registered/unregistered/total: {}/{}/{}",
        students - lazy,
        lazy,
        students
    );
    let ranks = stats::statistics(a);
    let cumul = ranks.iter().scan(0, |s, &r| {
        *s += r;
        Some(*s)
    });
    let total: usize = ranks.iter().sum();
    println!("Final ranking:");
    for (rank, (n, c)) in ranks.iter().zip(cumul).enumerate() {
        if *n != 0 {
            println!(
                "  - rank {}: {} (cumulative {} - {:.2}%)",
                rank + 1,
                n,
                c,
                100.0 * c as f32 / total as f32
            );
        }
    }
    println!("Supervision:");
    for (affinity, n) in Affinity::ALL.iter().zip(stats::affinities(a)) {
        println!("  - {affinity}: {n}");
    }
    println!("Score: {score}");
}

pub fn display_empty(a: &Assignments) {
    let mut projects = a.filter_projects(|p| !a.is_open(p));
    projects.sort_by_key(|&p| a.project(p).title.clone());
    if !projects.is_empty() {
        println!("Empty projects:");
        for p in projects {
            println!("  - {} ({})", a.project(p).title, p);
        }
    }
}

pub fn display_unplaced(a: &Assignments) {
    let unplaced = a
        .students
        .iter()
        .filter(|s| s.project.is_none() || s.supervisor.is_none())
        .collect::<Vec<_>>();
    if !unplaced.is_empty() {
        println!("Incomplete allocations:");
        for s in unplaced {
            match s.project {
                None => println!("  - {} has no project", s.name),
                Some(p) => println!("  - {} on {} has no supervisor", s.name, p),
            }
        }
    }
}
