//! Triangular fuzzy number value object and its arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::domain::foundation::ValidationError;

/// A triangular fuzzy number `(l, m, u)` with `l <= m <= u`.
///
/// `l` is the most pessimistic bound, `m` the most likely value and `u` the
/// most optimistic bound. Serializes as a `[l, m, u]` array; deserialization
/// re-checks the ordering.
///
/// All arithmetic is pure and total: inputs are never mutated and every
/// operation returns a number, including the degenerate zero cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct TriangularFuzzyNumber {
    l: f64,
    m: f64,
    u: f64,
}

/// Short alias used throughout the analysis code.
pub type Tfn = TriangularFuzzyNumber;

impl TriangularFuzzyNumber {
    /// The identity judgment `(1, 1, 1)`.
    pub const ONE: Self = Self {
        l: 1.0,
        m: 1.0,
        u: 1.0,
    };

    /// The additive identity `(0, 0, 0)`.
    pub const ZERO: Self = Self {
        l: 0.0,
        m: 0.0,
        u: 0.0,
    };

    /// Creates a TFN, rejecting non-finite components and `l > m` or `m > u`.
    pub fn new(l: f64, m: f64, u: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("l", l), ("m", m), ("u", u)] {
            if !value.is_finite() {
                return Err(ValidationError::not_finite(field, value));
            }
        }
        if l > m {
            return Err(ValidationError::out_of_order("l", l, m));
        }
        if m > u {
            return Err(ValidationError::out_of_order("m", m, u));
        }
        Ok(Self { l, m, u })
    }

    /// Creates the crisp TFN `(a, a, a)`.
    pub fn crisp(value: f64) -> Self {
        Self {
            l: value,
            m: value,
            u: value,
        }
    }

    /// Builds a TFN from arithmetic output without re-validating.
    ///
    /// Arithmetic over ordered, non-negative operands keeps the ordering.
    /// The zero-reciprocal policy in [`inverse`](Self::inverse) is the one
    /// place where a degenerate input can yield an unordered triple.
    pub(crate) fn from_components(l: f64, m: f64, u: f64) -> Self {
        Self { l, m, u }
    }

    /// Lower (most pessimistic) bound.
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Modal (most likely) value.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Upper (most optimistic) bound.
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Returns `[l, m, u]`.
    pub fn components(&self) -> [f64; 3] {
        [self.l, self.m, self.u]
    }

    /// Reciprocal `(1/u, 1/m, 1/l)`.
    ///
    /// A zero component has reciprocal `0` rather than infinity.
    pub fn inverse(&self) -> Self {
        Self::from_components(
            reciprocal_or_zero(self.u),
            reciprocal_or_zero(self.m),
            reciprocal_or_zero(self.l),
        )
    }

    /// Elementwise product `(l1*l2, m1*m2, u1*u2)`.
    ///
    /// This is the usual approximation of fuzzy multiplication and is only
    /// meaningful for non-negative operands.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_components(self.l * other.l, self.m * other.m, self.u * other.u)
    }

    /// Centroid defuzzification `(l + m + u) / 3`.
    pub fn centroid(&self) -> f64 {
        (self.l + self.m + self.u) / 3.0
    }

    /// Elementwise geometric mean across `items`.
    ///
    /// Returns [`ONE`](Self::ONE) for an empty slice (empty product).
    pub fn geometric_mean(items: &[Self]) -> Self {
        if items.is_empty() {
            return Self::ONE;
        }

        let exponent = 1.0 / items.len() as f64;
        let (l, m, u) = items
            .iter()
            .fold((1.0, 1.0, 1.0), |(l, m, u), t| (l * t.l, m * t.m, u * t.u));

        Self::from_components(l.powf(exponent), m.powf(exponent), u.powf(exponent))
    }

    /// Elementwise sum across `items`, starting from [`ZERO`](Self::ZERO).
    pub fn sum(items: &[Self]) -> Self {
        items.iter().fold(Self::ZERO, |acc, t| acc + *t)
    }

    /// Componentwise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.l - other.l).abs() <= tolerance
            && (self.m - other.m).abs() <= tolerance
            && (self.u - other.u).abs() <= tolerance
    }

    /// Returns true if all components are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.l > 0.0 && self.m > 0.0 && self.u > 0.0
    }
}

fn reciprocal_or_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        1.0 / value
    }
}

impl Default for TriangularFuzzyNumber {
    fn default() -> Self {
        Self::ONE
    }
}

impl Add for TriangularFuzzyNumber {
    type Output = Self;

    /// Elementwise sum.
    fn add(self, other: Self) -> Self {
        Self::from_components(self.l + other.l, self.m + other.m, self.u + other.u)
    }
}

impl TryFrom<[f64; 3]> for TriangularFuzzyNumber {
    type Error = ValidationError;

    fn try_from(value: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<TriangularFuzzyNumber> for [f64; 3] {
    fn from(value: TriangularFuzzyNumber) -> Self {
        value.components()
    }
}

impl fmt::Display for TriangularFuzzyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.l, self.m, self.u)
    }
}
