//! End-to-end enumeration behavior of the solver API

use xcover::solve::brute_force_solutions;
use xcover::{solve_with_config, SolveStatus, Solver, SolverConfig, SolverMode};

fn ab_solver() -> Solver {
    let mut solver = Solver::new(SolverMode::ExactCover);
    solver.declare_primary("a").unwrap();
    solver.declare_primary("b").unwrap();
    solver.add_option("ab", &["a", "b"]).unwrap();
    solver.add_option("a", &["a"]).unwrap();
    solver.add_option("b", &["b"]).unwrap();
    solver
}

#[test]
fn test_two_solutions_then_exhaustion() {
    let mut solver = ab_solver();

    assert_eq!(solver.solve().code(), 10);
    let first = solver.current_solution().unwrap();
    assert_eq!(first.option_names(), vec!["ab"]);

    assert_eq!(solver.solve().code(), 10);
    let second = solver.current_solution().unwrap();
    let mut names = second.option_names();
    names.sort_unstable();
    assert_eq!(names, vec!["a", "b"]);

    assert_eq!(solver.solve().code(), 20);
}

#[test]
fn test_exhaustion_is_idempotent() {
    let mut solver = ab_solver();
    while solver.solve().found() {}

    for _ in 0..5 {
        assert_eq!(solver.solve(), SolveStatus::Exhausted);
        assert!(solver.current_solution().is_none());
    }
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let run = || -> Vec<Vec<usize>> {
        let mut solver = ab_solver();
        solver
            .solutions()
            .map(|s| s.option_ids())
            .collect()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_color_scenario_red_blue() {
    // Two ways to cover p, each committing s to a different color.
    let mut solver = Solver::new(SolverMode::ExactCoverColors);
    solver.declare_primary("p").unwrap();
    solver.declare_secondary("s").unwrap();
    solver.add_option("red", &["p", "s:red"]).unwrap();
    solver.add_option("blue", &["p", "s:blue"]).unwrap();

    let solutions = solver.solve_all();
    assert_eq!(solutions.len(), 2);
    for solution in &solutions {
        assert_eq!(solution.len(), 1);
    }
    assert_eq!(solutions[0].option_names(), vec!["red"]);
    assert_eq!(solutions[1].option_names(), vec!["blue"]);
}

#[test]
fn test_unsolvable_problem_reports_exhaustion() {
    let mut solver = Solver::new(SolverMode::ExactCover);
    solver.declare_primary("covered").unwrap();
    solver.declare_primary("uncoverable").unwrap();
    solver.add_option("only", &["covered"]).unwrap();

    assert_eq!(solver.solve(), SolveStatus::Exhausted);
    assert_eq!(solver.solve(), SolveStatus::Exhausted);
}

#[test]
fn test_engine_matches_brute_force() {
    // A denser synthetic instance with colored, uncolored and shared
    // secondary coverage.
    let build = |solver: &mut Solver| {
        solver.declare_primary("p1").unwrap();
        solver.declare_primary("p2").unwrap();
        solver.declare_primary("p3").unwrap();
        solver.declare_secondary("s1").unwrap();
        solver.declare_secondary("s2").unwrap();
        solver.add_option("o0", &["p1", "s1:1"]).unwrap();
        solver.add_option("o1", &["p2", "s1:1"]).unwrap();
        solver.add_option("o2", &["p3", "s1:2"]).unwrap();
        solver.add_option("o3", &["p1", "p2"]).unwrap();
        solver.add_option("o4", &["p3", "s2:1"]).unwrap();
        solver.add_option("o5", &["p3"]).unwrap();
        solver.add_option("o6", &["p2", "s1"]).unwrap();
    };

    let mut solver = Solver::new(SolverMode::ExactCoverColors);
    build(&mut solver);
    let mut expected = brute_force_solutions(solver.registry(), solver.options());
    expected.sort();

    let mut found: Vec<Vec<usize>> = solver
        .solutions()
        .map(|s| s.sorted_option_ids())
        .collect();
    found.sort();

    assert_eq!(found, expected);
    assert!(!found.is_empty());
}

#[test]
fn test_solve_with_config_caps_enumeration() {
    let config = SolverConfig {
        max_solutions: Some(1),
        ..SolverConfig::default()
    };
    let solutions = solve_with_config(&config, |solver| {
        solver.add_option("ab", &["a", "b"])?;
        solver.add_option("a", &["a"])?;
        solver.add_option("b", &["b"])?;
        Ok(())
    })
    .unwrap();

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].option_names(), vec!["ab"]);
}

#[test]
fn test_langford_pairs_n3() {
    // Langford sequences for n = 3: 231213 and 312132.
    let mut solver = Solver::new(SolverMode::ExactCover);
    for d in 1..=3usize {
        solver.declare_primary(&format!("d{d}")).unwrap();
    }
    for i in 1..=6usize {
        solver.declare_primary(&format!("s{i}")).unwrap();
    }
    for d in 1..=3usize {
        for i in 1..=6usize {
            let j = i + d + 1;
            if j <= 6 {
                let digit = format!("d{d}");
                let left = format!("s{i}");
                let right = format!("s{j}");
                solver
                    .add_option(
                        &format!("d{d}p{i}"),
                        &[digit.as_str(), left.as_str(), right.as_str()],
                    )
                    .unwrap();
            }
        }
    }

    let solutions = solver.solve_all();
    assert_eq!(solutions.len(), 2);

    // Decode each solution back into a sequence.
    let mut sequences = Vec::new();
    for solution in &solutions {
        let mut seq = [0usize; 6];
        for name in solution.option_names() {
            let d: usize = name[1..2].parse().unwrap();
            let i: usize = name[3..].parse().unwrap();
            seq[i - 1] = d;
            seq[i + d] = d;
        }
        sequences.push(seq);
    }
    sequences.sort();
    assert_eq!(sequences, vec![[2, 3, 1, 2, 1, 3], [3, 1, 2, 1, 3, 2]]);
}
