use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{MAX_NESTING_DEPTH, Value},
    },
    util::{
        num::{f64_to_i64_exact, i64_to_f64_checked},
        stack::ensure_sufficient_stack,
    },
};

/// Two numeric operands brought to a common subkind.
enum Operands {
    Integers(i64, i64),
    Reals(f64, f64),
}

impl Value {
    /// Applies a non-assigning binary operator.
    ///
    /// Arithmetic keeps integers as integers and promotes to real as soon as
    /// one operand is real; `/` always yields a real. Comparisons yield
    /// booleans, with `>=` and `<=` computed as "equal or greater/less".
    ///
    /// # Errors
    /// Returns `RuntimeError::UnsupportedOperation` for operand kinds the
    /// operator does not accept, plus the arithmetic errors of the individual
    /// operations.
    ///
    /// # Example
    /// ```
    /// use tern::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let seven = Value::Integer(7);
    /// let two = Value::Integer(2);
    ///
    /// assert_eq!(seven.binary_op(BinaryOperator::Div, &two, 1).unwrap(), Value::Real(3.5));
    /// assert_eq!(seven.binary_op(BinaryOperator::FloorDiv, &two, 1).unwrap(), Value::Integer(3));
    /// assert_eq!(Value::Integer(-7).binary_op(BinaryOperator::Mod, &two, 1).unwrap(),
    ///            Value::Integer(1));
    /// ```
    pub fn binary_op(&self, op: BinaryOperator, rhs: &Self, line: usize) -> EvalResult<Self> {
        use BinaryOperator as Op;
        match op {
            Op::Add => self.add(rhs, line),
            Op::Sub => self.sub(rhs, line),
            Op::Mul => self.mul(rhs, line),
            Op::Div => self.true_div(rhs, line),
            Op::FloorDiv => self.floor_div(rhs, line),
            Op::Mod => self.modulo(rhs, line),
            Op::ShiftLeft => self.shl(rhs, line),
            Op::ShiftRight => self.shr(rhs, line),
            Op::Equal => self.equals(rhs, line).map(Self::Bool),
            Op::NotEqual => self.equals(rhs, line).map(|equal| Self::Bool(!equal)),
            Op::Less => self.less(rhs, line).map(Self::Bool),
            Op::Greater => self.greater(rhs, line).map(Self::Bool),
            Op::LessEqual => Ok(Self::Bool(self.equals(rhs, line)? || self.less(rhs, line)?)),
            Op::GreaterEqual => Ok(Self::Bool(self.equals(rhs, line)? || self.greater(rhs, line)?)),
            Op::Assign
            | Op::AddAssign
            | Op::SubAssign
            | Op::MulAssign
            | Op::DivAssign
            | Op::FloorDivAssign
            | Op::ModAssign
            | Op::ShiftLeftAssign
            | Op::ShiftRightAssign => Err(RuntimeError::InvalidAssignmentTarget { line }),
        }
    }

    /// `+`: numeric addition, or concatenation of two strings.
    ///
    /// # Errors
    /// Fails for other operand kinds and on integer overflow.
    pub fn add(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        if let (Self::String(a), Self::String(b)) = (self, rhs) {
            let mut joined = a.borrow().clone();
            joined.extend(b.borrow().iter());
            return Ok(Self::from(joined));
        }

        match self.numeric_operands(rhs, "+", line)? {
            Operands::Integers(a, b) => a.checked_add(b)
                                         .map(Self::Integer)
                                         .ok_or(RuntimeError::Overflow { line }),
            Operands::Reals(a, b) => Ok(Self::Real(a + b)),
        }
    }

    /// `-`
    ///
    /// # Errors
    /// Fails for non-numeric operands and on integer overflow.
    pub fn sub(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        match self.numeric_operands(rhs, "-", line)? {
            Operands::Integers(a, b) => a.checked_sub(b)
                                         .map(Self::Integer)
                                         .ok_or(RuntimeError::Overflow { line }),
            Operands::Reals(a, b) => Ok(Self::Real(a - b)),
        }
    }

    /// `*`
    ///
    /// # Errors
    /// Fails for non-numeric operands and on integer overflow.
    pub fn mul(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        match self.numeric_operands(rhs, "*", line)? {
            Operands::Integers(a, b) => a.checked_mul(b)
                                         .map(Self::Integer)
                                         .ok_or(RuntimeError::Overflow { line }),
            Operands::Reals(a, b) => Ok(Self::Real(a * b)),
        }
    }

    /// `/`: true division, always real.
    ///
    /// # Errors
    /// Fails for non-numeric operands and for a zero divisor.
    pub fn true_div(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        let (a, b) = match self.numeric_operands(rhs, "/", line)? {
            Operands::Integers(a, b) => (i64_to_f64_checked(a, line)?, i64_to_f64_checked(b, line)?),
            Operands::Reals(a, b) => (a, b),
        };
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }
        Ok(Self::Real(a / b))
    }

    /// `//`: division rounded towards negative infinity.
    ///
    /// # Errors
    /// Fails for non-numeric operands, a zero divisor and `i64::MIN // -1`.
    pub fn floor_div(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        match self.numeric_operands(rhs, "//", line)? {
            Operands::Integers(_, 0) => Err(RuntimeError::DivisionByZero { line }),
            Operands::Integers(a, b) => {
                let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow { line })?;
                if a % b != 0 && (a < 0) != (b < 0) {
                    return Ok(Self::Integer(quotient - 1));
                }
                Ok(Self::Integer(quotient))
            },
            Operands::Reals(_, b) if b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
            Operands::Reals(a, b) => Ok(Self::Real((a / b).floor())),
        }
    }

    /// `%`: remainder with the sign of the divisor.
    ///
    /// # Errors
    /// Fails for non-numeric operands and a zero divisor.
    pub fn modulo(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        match self.numeric_operands(rhs, "%", line)? {
            Operands::Integers(_, 0) => Err(RuntimeError::DivisionByZero { line }),
            Operands::Integers(a, b) => {
                let remainder = a.checked_rem(b).unwrap_or(0);
                if remainder != 0 && (remainder < 0) != (b < 0) {
                    return Ok(Self::Integer(remainder + b));
                }
                Ok(Self::Integer(remainder))
            },
            Operands::Reals(_, b) if b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
            Operands::Reals(a, b) => {
                let remainder = a % b;
                if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                    return Ok(Self::Real(remainder + b));
                }
                Ok(Self::Real(remainder))
            },
        }
    }

    /// `<<`: integer left shift.
    ///
    /// # Errors
    /// Fails for non-integer operands, a negative shift count and results
    /// that do not fit into 64 bits.
    pub fn shl(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        let (value, count) = self.shift_operands(rhs, "<<", line)?;
        if value == 0 {
            return Ok(Self::Integer(0));
        }
        u32::try_from(count).ok()
                            .and_then(|count| 2_i64.checked_pow(count))
                            .and_then(|factor| value.checked_mul(factor))
                            .map(Self::Integer)
                            .ok_or(RuntimeError::Overflow { line })
    }

    /// `>>`: arithmetic right shift.
    ///
    /// # Errors
    /// Fails for non-integer operands and a negative shift count.
    pub fn shr(&self, rhs: &Self, line: usize) -> EvalResult<Self> {
        let (value, count) = self.shift_operands(rhs, ">>", line)?;
        Ok(Self::Integer(value >> count.min(63)))
    }

    /// Unary `-`.
    ///
    /// # Errors
    /// Fails for non-numeric operands and for `-i64::MIN`.
    pub fn negate(&self, line: usize) -> EvalResult<Self> {
        match self {
            Self::Integer(n) => n.checked_neg()
                                 .map(Self::Integer)
                                 .ok_or(RuntimeError::Overflow { line }),
            Self::Real(r) => Ok(Self::Real(-r)),
            other => Err(RuntimeError::UnsupportedUnary { op:      "-",
                                                          operand: other.kind(),
                                                          line }),
        }
    }

    /// `==`: total equality.
    ///
    /// Values of different kinds are never equal. Numbers compare by value
    /// across subkinds, strings by characters, tables by contents, functions
    /// by arity and body, and types by kind.
    ///
    /// # Errors
    /// Returns `RuntimeError::StackOverflow` when comparing tables nested more
    /// than [`MAX_NESTING_DEPTH`] levels deep, which includes two distinct
    /// tables that each contain themselves.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(1).equals(&Value::Real(1.0), 1).unwrap());
    /// assert!(Value::from("ab").equals(&Value::from("ab"), 1).unwrap());
    /// assert!(!Value::Integer(0).equals(&Value::Bool(false), 1).unwrap());
    /// ```
    pub fn equals(&self, rhs: &Self, line: usize) -> EvalResult<bool> {
        self.equals_at(rhs, 0, line)
    }

    pub(crate) fn equals_at(&self, rhs: &Self, depth: usize, line: usize) -> EvalResult<bool> {
        Ok(match (self, rhs) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Integer(a), Self::Real(b)) | (Self::Real(b), Self::Integer(a)) => {
                f64_to_i64_exact(*b) == Some(*a)
            },
            (Self::String(a), Self::String(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Table(a), Self::Table(b)) => {
                if Rc::ptr_eq(a, b) {
                    return Ok(true);
                }
                if depth >= MAX_NESTING_DEPTH {
                    return Err(RuntimeError::StackOverflow { depth: MAX_NESTING_DEPTH,
                                                             line });
                }
                ensure_sufficient_stack(|| a.borrow().same_entries(&b.borrow(), depth + 1, line))?
            },
            (Self::Function(a), Self::Function(b)) => a.same_as(b),
            (Self::Type(a), Self::Type(b)) => a == b,
            _ => false,
        })
    }

    /// `>`
    ///
    /// # Errors
    /// Only numbers and strings are ordered; other operands fail.
    pub fn greater(&self, rhs: &Self, line: usize) -> EvalResult<bool> {
        Ok(self.ordering(rhs, ">", line)? == Some(Ordering::Greater))
    }

    /// `<`
    ///
    /// # Errors
    /// Only numbers and strings are ordered; other operands fail.
    pub fn less(&self, rhs: &Self, line: usize) -> EvalResult<bool> {
        Ok(self.ordering(rhs, "<", line)? == Some(Ordering::Less))
    }

    /// Returns the absolute value of a number as a real.
    ///
    /// # Errors
    /// Fails for non-numeric values.
    pub fn magnitude(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => i64_to_f64_checked(*n, line).map(f64::abs),
            Self::Real(r) => Ok(r.abs()),
            other => Err(RuntimeError::UnsupportedUnary { op:      "abs",
                                                          operand: other.kind(),
                                                          line }),
        }
    }

    fn ordering(&self, rhs: &Self, op: &'static str, line: usize) -> EvalResult<Option<Ordering>> {
        if let (Self::String(a), Self::String(b)) = (self, rhs) {
            return Ok(Some(a.borrow().as_slice().cmp(b.borrow().as_slice())));
        }
        Ok(match self.numeric_operands(rhs, op, line)? {
            Operands::Integers(a, b) => Some(a.cmp(&b)),
            Operands::Reals(a, b) => a.partial_cmp(&b),
        })
    }

    fn numeric_operands(&self, rhs: &Self, op: &'static str, line: usize) -> EvalResult<Operands> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Ok(Operands::Integers(*a, *b)),
            (Self::Real(a), Self::Real(b)) => Ok(Operands::Reals(*a, *b)),
            (Self::Integer(a), Self::Real(b)) => Ok(Operands::Reals(i64_to_f64_checked(*a, line)?, *b)),
            (Self::Real(a), Self::Integer(b)) => Ok(Operands::Reals(*a, i64_to_f64_checked(*b, line)?)),
            _ => Err(self.unsupported(op, rhs, line)),
        }
    }

    fn shift_operands(&self, rhs: &Self, op: &'static str, line: usize) -> EvalResult<(i64, i64)> {
        let (Self::Integer(value), Self::Integer(count)) = (self, rhs) else {
            return Err(self.unsupported(op, rhs, line));
        };
        if *count < 0 {
            return Err(RuntimeError::InvalidArgument { details: "negative shift count".to_string(),
                                                       line });
        }
        Ok((*value, *count))
    }

    /// Builds the error for an operator applied to unsupported operand kinds.
    #[must_use]
    pub fn unsupported(&self, op: &'static str, rhs: &Self, line: usize) -> RuntimeError {
        RuntimeError::UnsupportedOperation { op,
                                             left: self.kind(),
                                             right: rhs.kind(),
                                             line }
    }
}
