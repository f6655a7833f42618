use carpool_expr::ids::VariableId;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Closed interval `[lower, upper]`; either side may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    /// No value fits; a variable with empty bounds makes the model infeasible.
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    pub(crate) fn is_numeric(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan()
    }
}

/// A column: bounds plus integrality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Integer in `[0, 1]`.
    pub fn binary() -> Self {
        Self::integer(Bounds::new(0.0, 1.0))
    }

    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }

    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }
}

/// A row; its coefficients live in the model's columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub bounds: Bounds,
}

/// `sense` is `None` until an objective is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub terms: Vec<(VariableId, f64)>,
}
