use std::fmt;

/// The result of evaluating an expression.
///
/// Integer operands stay integers under `+`, `-` and `*`. A float operand on
/// either side, or any division, produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64 bit integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
}

/// Why an arithmetic step could not produce a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    DivisionByZero,
    Overflow,
}

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        f.write_str(symbol)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl Number {
    /// Converts the value to an `f64`, rounding integers past 2^53 to the
    /// nearest representable float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Float(x) => x,
        }
    }

    /// Applies `op` to `self` and `rhs` with the usual promotion rules.
    ///
    /// # Errors
    /// - `DivisionByZero` when dividing by integer or float zero.
    /// - `Overflow` when integer `+`, `-` or `*` leaves the `i64` range.
    ///
    /// # Example
    /// ```
    /// use tinycalc::interpreter::value::{Number, Operator};
    ///
    /// assert_eq!(Number::Integer(3).apply(Operator::Mul, Number::Integer(4)),
    ///            Ok(Number::Integer(12)));
    /// assert_eq!(Number::Integer(8).apply(Operator::Div, Number::Integer(2)),
    ///            Ok(Number::Float(4.0)));
    /// assert_eq!(Number::Integer(1).apply(Operator::Add, Number::Float(2.0)),
    ///            Ok(Number::Float(3.0)));
    /// ```
    pub fn apply(self, op: Operator, rhs: Self) -> Result<Self, ArithmeticFault> {
        use Number::{Float, Integer};

        match (op, self, rhs) {
            (Operator::Div, ..) => {
                let divisor = rhs.as_float();
                if divisor == 0.0 {
                    return Err(ArithmeticFault::DivisionByZero);
                }
                Ok(Float(self.as_float() / divisor))
            },
            (_, Integer(a), Integer(b)) => {
                let folded = match op {
                    Operator::Add => a.checked_add(b),
                    Operator::Sub => a.checked_sub(b),
                    Operator::Mul => a.checked_mul(b),
                    Operator::Div => unreachable!(),
                };
                folded.map(Integer).ok_or(ArithmeticFault::Overflow)
            },
            _ => {
                let (a, b) = (self.as_float(), rhs.as_float());
                Ok(Float(match op {
                             Operator::Add => a + b,
                             Operator::Sub => a - b,
                             Operator::Mul => a * b,
                             Operator::Div => unreachable!(),
                         }))
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` on whole floats.
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_chain_stays_integer() {
        let sum = Number::Integer(1).apply(Operator::Add, Number::Integer(2)).unwrap();
        assert_eq!(sum, Number::Integer(3));
        let product = sum.apply(Operator::Mul, Number::Integer(-4)).unwrap();
        assert_eq!(product, Number::Integer(-12));
        assert_eq!(product.apply(Operator::Sub, Number::Integer(1)), Ok(Number::Integer(-13)));
    }

    #[test]
    fn any_float_operand_promotes() {
        assert_eq!(Number::Float(1.5).apply(Operator::Mul, Number::Integer(2)),
                   Ok(Number::Float(3.0)));
        assert_eq!(Number::Integer(5).apply(Operator::Sub, Number::Float(0.5)),
                   Ok(Number::Float(4.5)));
    }

    #[test]
    fn division_is_always_true_division() {
        assert_eq!(Number::Integer(7).apply(Operator::Div, Number::Integer(2)),
                   Ok(Number::Float(3.5)));
        assert_eq!(Number::Integer(8).apply(Operator::Div, Number::Integer(2)),
                   Ok(Number::Float(4.0)));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(Number::Integer(1).apply(Operator::Div, Number::Integer(0)),
                   Err(ArithmeticFault::DivisionByZero));
        assert_eq!(Number::Float(1.0).apply(Operator::Div, Number::Float(0.0)),
                   Err(ArithmeticFault::DivisionByZero));
    }

    #[test]
    fn integer_overflow_is_rejected() {
        assert_eq!(Number::Integer(i64::MAX).apply(Operator::Add, Number::Integer(1)),
                   Err(ArithmeticFault::Overflow));
        assert_eq!(Number::Integer(i64::MIN).apply(Operator::Mul, Number::Integer(-1)),
                   Err(ArithmeticFault::Overflow));
    }

    #[test]
    fn large_integers_promote_with_rounding() {
        assert_eq!(Number::Integer(9_007_199_254_740_992).apply(Operator::Div, Number::Integer(2)),
                   Ok(Number::Float(4_503_599_627_370_496.0)));
        assert_eq!(Number::Integer(9_007_199_254_740_993).apply(Operator::Div, Number::Integer(1)),
                   Ok(Number::Float(9_007_199_254_740_992.0)));
        assert_eq!(Number::Integer(i64::MAX).apply(Operator::Add, Number::Float(1.0)),
                   Ok(Number::Float(9_223_372_036_854_775_808.0)));
    }

    #[test]
    fn display_keeps_float_tag_visible() {
        assert_eq!(Number::Integer(4).to_string(), "4");
        assert_eq!(Number::Float(4.0).to_string(), "4.0");
        assert_eq!(Number::Float(3.5).to_string(), "3.5");
    }
}
