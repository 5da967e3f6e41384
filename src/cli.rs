use clap::{Parser, Subcommand};

/// KetoMealOptimizer: choose ingredient amounts that meet nutrient targets.
#[derive(Parser, Debug)]
#[command(name = "keto_meal_optimizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food table CSV (nutrients per 100 g).
    #[arg(short, long, global = true, default_value = "table_cf.csv")]
    pub foods: String,

    /// Log solver activity (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize a meal described by a JSON request file.
    Optimize {
        /// Path to the request JSON.
        #[arg(short, long)]
        request: String,

        /// Print the JSON report instead of the text rendering.
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build and optimize a meal interactively.
    Compose,

    /// List the loaded food table.
    Foods,
}

impl Default for Command {
    fn default() -> Self {
        Command::Compose
    }
}
