//! The numeric tower: arbitrary-precision integers and IEEE doubles.
//!
//! A `Number` keeps the representation it was created with. Binary
//! arithmetic and ordering stay in the integer domain only when both
//! operands are integers; otherwise both sides are widened to `f64`.
//!
//! ```text
//! Integer ⊕ Integer -> Integer
//! Integer ⊕ Float   -> Float
//! Float   ⊕ Float   -> Float
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Why a numeric operation has no result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// `div`/`rem` applied to a float.
    NotIntegers,
    /// `bnot` applied to a float.
    NotIntegral,
    /// Integer division or remainder by zero.
    DivisionByZero,
}

/// A number: exactly one of an arbitrary-precision integer or a double.
#[derive(Clone, Debug)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
}

impl Number {
    /// Integer constructor.
    #[inline]
    pub fn int(n: impl Into<BigInt>) -> Self {
        Number::Integer(n.into())
    }

    /// Float constructor.
    #[inline]
    pub fn float(f: f64) -> Self {
        Number::Float(f)
    }

    /// Whether this number uses the integer representation.
    #[inline]
    pub fn is_integral(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// The integer payload, if integral.
    #[inline]
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Number::Integer(i) => Some(i),
            Number::Float(_) => None,
        }
    }

    /// Fits-in-`i64` view of an integer.
    pub fn to_i64(&self) -> Option<i64> {
        self.as_integer().and_then(ToPrimitive::to_i64)
    }

    /// Fits-in-`usize` view of a non-negative integer.
    pub fn to_usize(&self) -> Option<usize> {
        self.as_integer().and_then(ToPrimitive::to_usize)
    }

    /// Widen to `f64`. Integers too large for a double become infinite.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64().unwrap_or(if i.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
            Number::Float(f) => *f,
        }
    }

    fn widen(
        &self,
        other: &Number,
        int_op: impl FnOnce(&BigInt, &BigInt) -> BigInt,
        float_op: impl FnOnce(f64, f64) -> f64,
    ) -> Number {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(int_op(a, b)),
            _ => Number::Float(float_op(self.as_f64(), other.as_f64())),
        }
    }

    /// `/`: truncating integer division for two integers, double division otherwise.
    pub fn divide(&self, other: &Number) -> Result<Number, NumericError> {
        match (self, other) {
            (Number::Integer(_), Number::Integer(b)) if b.is_zero() => {
                Err(NumericError::DivisionByZero)
            }
            _ => Ok(self.widen(other, |a, b| a / b, |a, b| a / b)),
        }
    }

    /// `div`: integer-only truncating division.
    pub fn int_div(&self, other: &Number) -> Result<Number, NumericError> {
        let (a, b) = Self::both_integers(self, other)?;
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Number::Integer(a / b))
    }

    /// `rem`: integer-only remainder, sign follows the dividend.
    pub fn rem(&self, other: &Number) -> Result<Number, NumericError> {
        let (a, b) = Self::both_integers(self, other)?;
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Number::Integer(a % b))
    }

    /// `bnot`: bitwise complement, `-(n + 1)`.
    pub fn bnot(&self) -> Result<Number, NumericError> {
        match self {
            Number::Integer(i) => Ok(Number::Integer(-(i + BigInt::one()))),
            Number::Float(_) => Err(NumericError::NotIntegral),
        }
    }

    fn both_integers<'a>(
        a: &'a Number,
        b: &'a Number,
    ) -> Result<(&'a BigInt, &'a BigInt), NumericError> {
        match (a, b) {
            (Number::Integer(a), Number::Integer(b)) => Ok((a, b)),
            _ => Err(NumericError::NotIntegers),
        }
    }

    /// `==`: equal across representations (`1 == 1.0`).
    pub fn loose_eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    /// `=:=`: equal value and equal representation.
    pub fn exact_eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => false,
        }
    }

    /// Numeric ordering; `None` only when a NaN is involved.
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: &Number) -> Number {
        self.widen(rhs, |a, b| a + b, |a, b| a + b)
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: &Number) -> Number {
        self.widen(rhs, |a, b| a - b, |a, b| a - b)
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: &Number) -> Number {
        self.widen(rhs, |a, b| a * b, |a, b| a * b)
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Float(f) => Number::Float(-f),
        }
    }
}

/// Loose numeric equality, the rule used by structural value equality.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.loose_eq(other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` that distinguishes 1.0 from 1
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<BigInt> for Number {
    fn from(i: BigInt) -> Self {
        Number::Integer(i)
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Integer(BigInt::from(i))
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Number::Integer(BigInt::from(i))
    }
}

impl From<u32> for Number {
    fn from(i: u32) -> Self {
        Number::Integer(BigInt::from(i))
    }
}

impl From<usize> for Number {
    fn from(i: usize) -> Self {
        Number::Integer(BigInt::from(i))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}
