// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Evaluator for custom hash expressions.
//!
//! An expression is a flat sequence of unsigned integer literals separated by the binary
//! operators `+ - * / % ^`, with `x` standing for the key. There are no parentheses, no
//! unary operators and no precedence: operators are applied strictly left to right against
//! an accumulator that starts at 0 with an implicit leading `+`.
//!
//! # Usage
//!
//! ```rust
//! use hashlab::expression::evaluate;
//!
//! // ((0 + 3) ^ 2 + 5) % 7 = 0
//! assert_eq!(evaluate("x^2 + 5 % 7", 3, 10).unwrap(), 0);
//! // ((0 + 4) * 3 + 1) = 13, 13 % 10 = 3
//! assert_eq!(evaluate("x * 3 + 1", 4, 10).unwrap(), 3);
//! ```
//!
//! Arithmetic is 64-bit and wraps on overflow. Division or remainder by zero yields 0 for
//! that step.

use std::fmt;

use crate::error::Error;

/// The symbol replaced by the key before evaluation.
pub const KEY_SYMBOL: char = 'x';

/// A binary operator of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Operator {
    /// Parses an operator symbol, returning `None` for anything else.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Rem),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Returns the operator symbol.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Rem => '%',
            Operator::Pow => '^',
        }
    }

    /// Applies the operator to `lhs` and `rhs`.
    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs.wrapping_add(rhs),
            Operator::Sub => lhs.wrapping_sub(rhs),
            Operator::Mul => lhs.wrapping_mul(rhs),
            Operator::Div => {
                if rhs == 0 {
                    0
                } else {
                    lhs.wrapping_div(rhs)
                }
            }
            Operator::Rem => {
                if rhs == 0 {
                    0
                } else {
                    lhs.wrapping_rem(rhs)
                }
            }
            // `as` saturates out-of-range floats and truncates toward zero.
            Operator::Pow => (lhs as f64).powf(rhs as f64) as i64,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A custom hash expression over the key symbol `x`.
///
/// The text is kept verbatim and only checked when evaluated, since the validity of the
/// substituted form depends on the key (a negative key introduces a leading `-`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    text: String,
}

impl Expression {
    /// Wraps expression text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the expression text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Evaluates the expression for `key` and reduces the result into `[0, modulus)`.
    ///
    /// See [`evaluate`].
    pub fn evaluate(&self, key: i64, modulus: i64) -> Result<i64, Error> {
        evaluate(&self.text, key, modulus)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Evaluates `expression` with every `x` replaced by the decimal form of `key`.
///
/// The final value `v` is reduced to `|v % modulus|`, which lies in `[0, modulus)`.
///
/// # Errors
///
/// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if
/// `modulus` is not positive, and
/// [`ErrorKind::InvalidExpression`](crate::error::ErrorKind::InvalidExpression) if the
/// substituted text contains a character other than digits, whitespace and the six
/// operators, if an operand is missing (empty expression, leading operator, two operators
/// in a row, trailing operator), or if a literal does not fit in 64 bits.
pub fn evaluate(expression: &str, key: i64, modulus: i64) -> Result<i64, Error> {
    if modulus <= 0 {
        return Err(
            Error::config_invalid("modulus must be positive").with_context("modulus", modulus)
        );
    }

    let substituted: String = expression
        .replace(KEY_SYMBOL, &key.to_string())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut result = 0i64;
    let mut pending = Operator::Add;
    let mut operand_start = 0usize;

    for (pos, c) in substituted.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }
        let Some(op) = Operator::from_symbol(c) else {
            return Err(Error::invalid_expression(format!("unexpected character '{c}'"))
                .with_context("expression", expression)
                .with_context("position", pos));
        };
        let operand = parse_operand(&substituted[operand_start..pos], expression, pos)?;
        result = pending.apply(result, operand);
        pending = op;
        operand_start = pos + c.len_utf8();
    }

    let operand = parse_operand(&substituted[operand_start..], expression, substituted.len())?;
    result = pending.apply(result, operand);

    Ok((result % modulus).abs())
}

fn parse_operand(digits: &str, expression: &str, pos: usize) -> Result<i64, Error> {
    if digits.is_empty() {
        return Err(Error::invalid_expression("missing operand")
            .with_context("expression", expression)
            .with_context("position", pos));
    }
    digits.parse::<i64>().map_err(|e| {
        Error::invalid_expression(format!("operand '{digits}' is out of range"))
            .with_context("expression", expression)
            .set_source(e)
    })
}
