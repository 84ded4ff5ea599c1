//! gridsolve — run a problem file through the step-at-a-time A* engine.
//!
//! ```text
//! gridsolve <problem-file> [--trace]
//! ```
//!
//! The default mode drives the engine to completion and prints the outcome
//! with an ASCII rendering of the grid. `--trace` additionally prints one
//! line per expansion (the cell popped from the open set and the cells newly
//! opened), the same per-step delta a visualizer would paint.
//!
//! Exit codes: 0 when a path was found, 1 when the search exhausted, 2 on
//! usage, parse, or configuration errors.

use std::fs;
use std::process::ExitCode;

use gridstep_core::{ObstacleMask, Position};
use gridstep_problem::Problem;
use gridstep_search::StepResult;

struct Args {
    file: String,
    trace: bool,
}

fn parse_args() -> Option<Args> {
    let mut file = None;
    let mut trace = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--trace" => trace = true,
            _ if file.is_none() && !arg.starts_with('-') => file = Some(arg),
            _ => return None,
        }
    }
    Some(Args { file: file?, trace })
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args() else {
        eprintln!("usage: gridsolve <problem-file> [--trace]");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(found) => {
            if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("gridsolve: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&args.file)?;
    let problem = Problem::parse(&text, &mut rand::rng())?;
    log::info!(
        "{}x{} grid, {} -> {}, {:?} heuristic, {} obstacles",
        problem.columns(),
        problem.rows(),
        problem.start(),
        problem.goal(),
        problem.heuristic(),
        problem.obstacles().len()
    );

    let mut engine = problem.engine()?;
    let mut steps = 0u64;
    let outcome = loop {
        let result = engine.step();
        steps += 1;
        match result {
            StepResult::Expanded { expanded, opened } => {
                if args.trace {
                    let opened: Vec<String> = opened.iter().map(ToString::to_string).collect();
                    println!(
                        "step {steps}: expanded {expanded}, opened [{}]",
                        opened.join(", ")
                    );
                }
            }
            terminal => break terminal,
        }
    };

    match outcome {
        StepResult::Found { path } => {
            println!(
                "found a path of {} moves in {steps} steps",
                path.len().saturating_sub(1)
            );
            print!("{}", render(&problem.mask(), &path, problem.start(), problem.goal()));
            Ok(true)
        }
        StepResult::Exhausted => {
            println!("no path exists ({steps} steps)");
            Ok(false)
        }
        StepResult::Expanded { .. } => unreachable!("loop breaks only on terminal results"),
    }
}

/// Draw the grid: `#` obstacle, `*` path, `S`/`G` endpoints, `.` free.
fn render(mask: &ObstacleMask, path: &[Position], start: Position, goal: Position) -> String {
    let mut out = String::new();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let p = Position::new(x, y);
            let c = if p == start {
                'S'
            } else if p == goal {
                'G'
            } else if mask.blocked(p) {
                '#'
            } else if path.contains(&p) {
                '*'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
