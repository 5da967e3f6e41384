//! Linear program handed to an [`LpSolver`](crate::optimizer::LpSolver).
//!
//! The program is plain data: bounded variables, linear rows, and one of the
//! four objective shapes the solver contract supports.

/// `constant + Σ coefficient · x[index]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    pub terms: Vec<(usize, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(index: usize, coefficient: f64) -> Self {
        Self {
            terms: vec![(index, coefficient)],
            constant: 0.0,
        }
    }

    /// Append `coefficient · x[index]`; zero coefficients are skipped.
    pub fn push(&mut self, index: usize, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((index, coefficient));
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            terms: self.terms.iter().map(|&(i, c)| (i, c * factor)).collect(),
            constant: self.constant * factor,
        }
    }

    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    pub fn plus(&self, other: &LinearExpr) -> Self {
        let mut terms = self.terms.clone();
        terms.extend_from_slice(&other.terms);
        Self {
            terms,
            constant: self.constant + other.constant,
        }
    }

    pub fn minus(&self, other: &LinearExpr) -> Self {
        self.plus(&other.negated())
    }

    /// Value of the expression at `values`; missing indices count as 0.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(i, c)| c * values.get(i).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

/// Relation between a row's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// `expr (<= | >= | ==) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub sense: Sense,
    pub rhs: f64,
    /// Short tag for logs.
    pub label: String,
}

impl Constraint {
    pub fn leq(expr: LinearExpr, rhs: f64, label: impl Into<String>) -> Self {
        Self {
            expr,
            sense: Sense::LessEqual,
            rhs,
            label: label.into(),
        }
    }

    pub fn geq(expr: LinearExpr, rhs: f64, label: impl Into<String>) -> Self {
        Self {
            expr,
            sense: Sense::GreaterEqual,
            rhs,
            label: label.into(),
        }
    }

    pub fn eq(expr: LinearExpr, rhs: f64, label: impl Into<String>) -> Self {
        Self {
            expr,
            sense: Sense::Equal,
            rhs,
            label: label.into(),
        }
    }

    /// Whether `values` satisfy the row within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Sense::LessEqual => lhs <= self.rhs + tolerance,
            Sense::GreaterEqual => lhs >= self.rhs - tolerance,
            Sense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Lower and upper bound of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VariableBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// Objective shapes accepted by the solver contract. Solvers always minimize.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// Feasibility only.
    None,
    /// Minimize one linear expression.
    Minimize(LinearExpr),
    /// Minimize the largest of the expressions.
    MinimizeMax(Vec<LinearExpr>),
    /// Minimize the negated smallest of the expressions (maximize the smallest).
    MinimizeNegatedMin(Vec<LinearExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub variables: Vec<VariableBounds>,
    pub constraints: Vec<Constraint>,
    pub objective: Objective,
}

impl LinearProgram {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::None,
        }
    }

    /// Add a variable and return its index.
    pub fn add_variable(&mut self, bounds: VariableBounds) -> usize {
        self.variables.push(bounds);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Whether `values` satisfy all bounds and rows within `tolerance`.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(values)
                .all(|(b, &v)| v >= b.lower - tolerance && v <= b.upper + tolerance)
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }
}

impl Default for LinearProgram {
    fn default() -> Self {
        Self::new()
    }
}
