use std::fmt::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use log::info;
use ordering_compat::{
    CompatError, OperationTable, OrderingOp, Provenance, TypeDescriptor, complete_ordering_from,
    formula, load_descriptor,
};

const SAMPLES: [i64; 7] = [-5, -2, -1, 0, 1, 2, 7];

fn usage() {
    eprintln!("usage: ordering-cli table");
    eprintln!("       ordering-cli plan <descriptor.json>");
    eprintln!("       ordering-cli verify <descriptor.json>");
}

fn render_table() -> String {
    let mut out = String::new();
    for root in OrderingOp::ALL {
        let _ = writeln!(out, "root {} ({}):", root.symbol(), root.dunder());
        for target in OrderingOp::ALL {
            let rendered = if target == root {
                "native".to_string()
            } else {
                formula(root, target).render(root)
            };
            let _ = writeln!(out, "  {:<2} := {}", target.symbol(), rendered);
        }
    }
    out
}

fn render_plan(descriptor: &TypeDescriptor) -> Result<String, CompatError> {
    let plan = descriptor.plan()?;
    Ok(format!("type: {}\n{plan}", descriptor.name))
}

/// Instantiates the descriptor over `i64`, completes it and checks the
/// resulting operations against each other on a sample grid.
fn verify(descriptor: &TypeDescriptor) -> Result<Vec<String>, CompatError> {
    let mut table = OperationTable::<i64>::with_partial_eq(descriptor.name.clone());
    for op in descriptor.defines.iter() {
        table.define(op, Arc::new(move |a: &i64, b: &i64| op.apply(a, b)));
    }
    let root = descriptor.resolve_root()?;
    let report = complete_ordering_from(&mut table, root)?;
    info!(
        "{}: derived {} operation(s) from {}",
        report.type_name,
        report.derived.len(),
        report.root
    );

    let mut violations = Vec::new();
    for a in SAMPLES {
        for b in SAMPLES {
            let lt = table.call(OrderingOp::Lt, &a, &b)?;
            let le = table.call(OrderingOp::Le, &a, &b)?;
            let gt = table.call(OrderingOp::Gt, &a, &b)?;
            let ge = table.call(OrderingOp::Ge, &a, &b)?;
            let eq = table.equal(&a, &b);

            if [lt, eq, gt].into_iter().filter(|held| *held).count() != 1 {
                violations.push(format!("trichotomy fails for ({a}, {b})"));
            }
            if le != (lt || eq) {
                violations.push(format!("<= disagrees with < or eq for ({a}, {b})"));
            }
            if ge != (gt || eq) {
                violations.push(format!(">= disagrees with > or eq for ({a}, {b})"));
            }
        }
    }

    for op in OrderingOp::ALL {
        if let Some(spec) = table.spec(op)
            && let Provenance::Derived { formula, .. } = spec.provenance
        {
            info!("{} {}", op.dunder(), formula.render(report.root));
        }
    }
    Ok(violations)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("table") if args.len() == 2 => {
            print!("{}", render_table());
            ExitCode::SUCCESS
        }
        Some(command @ ("plan" | "verify")) if args.len() == 3 => {
            let descriptor = match load_descriptor(&args[2]) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    eprintln!("descriptor error: {err}");
                    return ExitCode::from(1);
                }
            };
            if command == "plan" {
                match render_plan(&descriptor) {
                    Ok(text) => {
                        print!("{text}");
                        ExitCode::SUCCESS
                    }
                    Err(err) => {
                        eprintln!("plan error: {err}");
                        ExitCode::from(1)
                    }
                }
            } else {
                match verify(&descriptor) {
                    Ok(violations) if violations.is_empty() => {
                        println!("{}: consistent", descriptor.name);
                        ExitCode::SUCCESS
                    }
                    Ok(violations) => {
                        for violation in &violations {
                            eprintln!("{}: {violation}", descriptor.name);
                        }
                        ExitCode::from(1)
                    }
                    Err(err) => {
                        eprintln!("verify error: {err}");
                        ExitCode::from(1)
                    }
                }
            }
        }
        _ => {
            usage();
            ExitCode::from(2)
        }
    }
}
