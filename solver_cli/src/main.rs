//! # Solvify CLI Application
//!
//! Terminal front-end for the formula solving engine: pick a formula, pick
//! the variable to solve for, enter the remaining values with their units,
//! and get the result with its full derivation.

use std::io::{self, BufRead, Write};

use solver_core::formulas::Formula;
use solver_core::solver::{solve, SolveRequest};
use solver_core::units;

fn prompt(message: &str) -> String {
    print!("{}", message);
    if io::stdout().flush().is_err() {
        return String::new();
    }
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_choice(message: &str, max: usize) -> usize {
    loop {
        let input = prompt(message);
        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= max => return n - 1,
            _ => println!("Please enter a number between 1 and {}.", max),
        }
    }
}

fn main() {
    println!("Solvify CLI - Physical Formula Solver");
    println!("=====================================");
    println!();

    let catalogue = Formula::all();
    println!("Formulas:");
    for (i, formula) in catalogue.iter().enumerate() {
        let descriptor = formula.descriptor();
        println!("  {:2}. {} ({})", i + 1, descriptor.name, descriptor.expression);
    }
    println!();
    let formula = catalogue[prompt_choice("Choose a formula: ", catalogue.len())];
    let descriptor = formula.descriptor();

    let solvable = descriptor.solvable_variables();
    println!();
    println!("Solve for:");
    for (i, &name) in solvable.iter().enumerate() {
        // Unwrap is safe: solvable_variables only returns registered names
        let spec = descriptor.variable(name).unwrap();
        println!("  {:2}. {} ({})", i + 1, spec.label, name);
    }
    println!();
    let target = solvable[prompt_choice("Choose a variable: ", solvable.len())];

    let mut request = SolveRequest::new(formula, target);
    println!();
    for spec in descriptor.variables {
        if spec.name == target {
            continue;
        }
        let symbols: Vec<&str> = units::units_for(spec.quantity)
            .iter()
            .map(|u| u.symbol)
            .filter(|s| !s.is_empty())
            .collect();
        let base = units::base_unit(spec.quantity).symbol;
        let hint = if symbols.is_empty() {
            String::new()
        } else {
            format!(" [{}]", symbols.join(", "))
        };

        let label = if spec.optional {
            format!("{} ({}, optional, blank to skip): ", spec.label, spec.name)
        } else {
            format!("{} ({}): ", spec.label, spec.name)
        };
        let raw = prompt(&label);
        if raw.is_empty() && spec.optional {
            continue;
        }
        let unit = prompt(&format!("  unit{} [{}]: ", hint, base));
        let unit = if unit.is_empty() { base.to_string() } else { unit };
        request = request.with_field(spec.name, raw, unit);
    }

    // Unwrap is safe: target came from solvable_variables above
    let target_spec = descriptor.variable(target).unwrap();
    let base = units::base_unit(target_spec.quantity).symbol;
    let result_unit = prompt(&format!("Result unit [{}]: ", base));
    if !result_unit.is_empty() {
        request = request.with_result_unit(result_unit);
    }

    println!();
    match solve(&request) {
        Ok(solution) => {
            println!("═══════════════════════════════════════");
            println!("  {}", descriptor.name.to_uppercase());
            println!("═══════════════════════════════════════");
            println!();
            for step in &solution.steps {
                println!("  {}", step);
            }
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  {} = {} {}",
                solution.variable, solution.value, solution.unit
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&solution) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
