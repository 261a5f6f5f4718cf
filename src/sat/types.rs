//! Boolean variables, literals, models and cardinality constraints.

use std::fmt;
use std::ops::Not;

/// A boolean variable, numbered from 1 as in DIMACS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Creates a variable from its 1-based id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is zero or does not fit a DIMACS literal.
    pub fn new(id: u32) -> Self {
        assert!(id > 0 && id <= i32::MAX as u32, "variable id {id} out of range");
        Var(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    /// 0-based position, for indexing dense tables.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn positive(self) -> Lit {
        Lit(self.0 as i32)
    }

    pub fn negative(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

/// A literal: the magnitude names the variable, the sign its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(i32);

impl Lit {
    /// Creates a literal from a nonzero signed DIMACS integer.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero.
    pub fn from_dimacs(value: i32) -> Self {
        assert!(value != 0 && value != i32::MIN, "invalid literal {value}");
        Lit(value)
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A disjunction of literals.
pub type Clause = Vec<Lit>;

/// A total truth assignment produced by a SAT answer.
///
/// Variables the backend never saw read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Builds a model from the true literals of a backend assignment.
    pub fn from_literals<I>(num_vars: usize, literals: I) -> Self
    where
        I: IntoIterator<Item = Lit>,
    {
        let mut values = vec![false; num_vars];
        for lit in literals {
            let idx = lit.var().index();
            if idx >= values.len() {
                values.resize(idx + 1, false);
            }
            values[idx] = lit.is_positive();
        }
        Self { values }
    }

    pub fn value(&self, var: Var) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }

    /// Whether `lit` is satisfied.
    pub fn satisfies(&self, lit: Lit) -> bool {
        self.value(lit.var()) == lit.is_positive()
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }
}

/// Direction of a cardinality bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// At most `bound` literals are true.
    AtMost,
    /// At least `bound` literals are true.
    AtLeast,
}

/// `count(true literals) <= bound` or `>= bound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityConstraint {
    pub lits: Vec<Lit>,
    pub bound: usize,
    pub comparison: Comparison,
}

impl CardinalityConstraint {
    pub fn at_most(lits: Vec<Lit>, bound: usize) -> Self {
        Self {
            lits,
            bound,
            comparison: Comparison::AtMost,
        }
    }

    pub fn at_least(lits: Vec<Lit>, bound: usize) -> Self {
        Self {
            lits,
            bound,
            comparison: Comparison::AtLeast,
        }
    }

    /// Evaluates the constraint under `model`.
    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        let count = self.lits.iter().filter(|&&l| model.satisfies(l)).count();
        match self.comparison {
            Comparison::AtMost => count <= self.bound,
            Comparison::AtLeast => count >= self.bound,
        }
    }
}
