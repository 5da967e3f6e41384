use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("No feasible meal satisfies the constraints")]
    Infeasible,

    #[error("Solver fault: {0}")]
    SolverFault(String),

    #[error("Objective mode {mode} cannot be expressed linearly for ingredient '{ingredient}'")]
    UnsupportedObjective { ingredient: String, mode: u8 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MealError {
    /// Whether this error is a solve failure the caller may retry with relaxed bounds.
    pub fn is_solve_failure(&self) -> bool {
        matches!(
            self,
            MealError::Infeasible
                | MealError::SolverFault(_)
                | MealError::UnsupportedObjective { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MealError>;
