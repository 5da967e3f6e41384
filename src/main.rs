use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use keto_meal_optimizer_rs::cli::{Cli, Command};
use keto_meal_optimizer_rs::error::Result;
use keto_meal_optimizer_rs::interface::{
    build_report, compose_meal, display_food_list, display_meal, prompt_yes_no,
};
use keto_meal_optimizer_rs::state::{load_foods, load_request, save_report, FoodCatalog};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Optimize {
            request,
            json,
            output,
        } => cmd_optimize(&cli.foods, &request, json, output.as_deref()),
        Command::Compose => cmd_compose(&cli.foods),
        Command::Foods => cmd_foods(&cli.foods),
    }
}

fn load_catalog(file_path: &str) -> Result<Option<FoodCatalog>> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Food table not found: {}", file_path);
        eprintln!("Pass --foods <csv> or place table_cf.csv in the current directory.");
        return Ok(None);
    }

    // Duplicate rows are already reported through tracing.
    let (catalog, _) = load_foods(path)?;
    Ok(Some(catalog))
}

/// Optimize a meal from a JSON request.
fn cmd_optimize(foods_path: &str, request_path: &str, json: bool, output: Option<&str>) -> Result<()> {
    let Some(catalog) = load_catalog(foods_path)? else {
        return Ok(());
    };

    let request = load_request(request_path)?;
    let (mut meal, _) = request.build_meal(&catalog)?;

    let outcome = meal.solve();
    let report = build_report(&meal, &outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome.is_ok() {
        display_meal(&meal);
    }

    if let Some(path) = output {
        save_report(path, &report)?;
        println!("Report saved to {}", path);
    }

    outcome.map(|_| ())
}

/// Compose a meal interactively and optimize it.
fn cmd_compose(foods_path: &str) -> Result<()> {
    let Some(catalog) = load_catalog(foods_path)? else {
        return Ok(());
    };

    if catalog.is_empty() {
        println!("Food table is empty.");
        return Ok(());
    }

    println!("Loaded {} foods", catalog.len());
    println!();

    let (mut meal, _) = compose_meal(&catalog)?;

    loop {
        match meal.solve() {
            Ok(outcome) => {
                display_meal(&meal);
                if let Some(value) = outcome.objective_value {
                    println!("Objective value: {:.2}", value);
                }
                return Ok(());
            }
            Err(e) if e.is_solve_failure() => {
                eprintln!("Optimization failed: {}", e);
                if !prompt_yes_no("Start over with new constraints?", true)? {
                    return Ok(());
                }
                meal = compose_meal(&catalog)?.0;
            }
            Err(e) => return Err(e),
        }
    }
}

/// List the food table.
fn cmd_foods(foods_path: &str) -> Result<()> {
    let Some(catalog) = load_catalog(foods_path)? else {
        return Ok(());
    };

    display_food_list(catalog.iter(), "Foods");
    Ok(())
}
