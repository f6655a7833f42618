//! Linear expression: weighted variable terms plus a constant.
//!
//! Terms keep insertion order and may repeat a variable; the model merges
//! them when a row or objective is stored.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::ids::VariableId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    linear: Vec<(VariableId, f64)>,
}

impl Expr {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// A constant with no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            linear: Vec::new(),
        }
    }

    /// `1 · var`.
    pub fn var(var_id: VariableId) -> Self {
        Self {
            constant: 0.0,
            linear: vec![(var_id, 1.0)],
        }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.linear
    }

    pub fn into_linear_terms(self) -> Vec<(VariableId, f64)> {
        self.linear
    }

    /// Append `coeff · var`; zero coefficients are dropped.
    pub fn add_term(&mut self, var_id: VariableId, coeff: f64) {
        if coeff != 0.0 {
            self.linear.push((var_id, coeff));
        }
    }

    /// `self <sense> other` with every term moved left and every constant
    /// moved right.
    pub fn compare_expr(&self, other: &Expr, sense: ComparisonSense) -> ConstraintExpr {
        let mut lhs = Expr::from_constant(0.0);
        lhs.linear.reserve(self.linear.len() + other.linear.len());
        for &(var, coeff) in &self.linear {
            lhs.add_term(var, coeff);
        }
        for &(var, coeff) in &other.linear {
            lhs.add_term(var, -coeff);
        }
        ConstraintExpr::new(lhs, sense, other.constant - self.constant)
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Self::Output {
        self.constant += rhs.constant;
        self.linear.extend(rhs.linear);
        self
    }
}

impl std::ops::Add<f64> for Expr {
    type Output = Expr;

    fn add(mut self, rhs: f64) -> Self::Output {
        self.constant += rhs;
        self
    }
}

impl FromIterator<(VariableId, f64)> for Expr {
    fn from_iter<I: IntoIterator<Item = (VariableId, f64)>>(iter: I) -> Self {
        let mut expr = Expr::new_empty();
        for (var_id, coeff) in iter {
            expr.add_term(var_id, coeff);
        }
        expr
    }
}
