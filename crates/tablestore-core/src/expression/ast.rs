//! Expression tree for row filters and write conditions.
//!
//! A tree is either a combinator over child expressions or a single
//! comparison between a column token and a value reference. Trees are built
//! with the free functions in this module ([`col`], [`var`], [`and`],
//! [`or`], [`not`]) or parsed from text with
//! [`parse_filter`](super::parse_filter).

use std::fmt;

use tablestore_model::types::{ComparatorType, LogicalOperator};
use tablestore_model::value::ColumnValue;

/// Expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Logical combination of child expressions, in source order.
    Combinator {
        /// The combinator.
        op: LogicalOperator,
        /// Child expressions.
        children: Vec<Expression>,
    },
    /// Leaf comparison.
    Comparison(Comparison),
}

/// A comparison `column <op> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Comparator.
    pub op: ComparatorType,
    /// Column token, possibly carrying an inline option block
    /// (`age[ignore_if_missing: true]`).
    pub column: String,
    /// Right-hand operand.
    pub value: ValueRef,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRef {
    /// A constant.
    Literal(ColumnValue),
    /// A named binding resolved at compile time.
    Binding(String),
}

impl From<ColumnValue> for ValueRef {
    fn from(value: ColumnValue) -> Self {
        Self::Literal(value)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ValueRef {
                fn from(value: $ty) -> Self {
                    Self::Literal(ColumnValue::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, i64, i32, f64, bool, bytes::Bytes);

impl Expression {
    /// Negate several expressions under one `NOT` node.
    #[must_use]
    pub fn not_all(children: impl IntoIterator<Item = Expression>) -> Self {
        Self::Combinator {
            op: LogicalOperator::Not,
            children: children.into_iter().collect(),
        }
    }

    /// Combine with another expression under `AND`.
    #[must_use]
    pub fn and(self, other: Expression) -> Self {
        and([self, other])
    }

    /// Combine with another expression under `OR`.
    #[must_use]
    pub fn or(self, other: Expression) -> Self {
        or([self, other])
    }

    /// Every binding name referenced by the tree, in source order.
    #[must_use]
    pub fn bindings(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_bindings(&mut names);
        names
    }

    fn collect_bindings<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Combinator { children, .. } => {
                for child in children {
                    child.collect_bindings(names);
                }
            }
            Self::Comparison(Comparison {
                value: ValueRef::Binding(name),
                ..
            }) => names.push(name),
            Self::Comparison(_) => {}
        }
    }
}

/// Start a comparison on a column token.
#[must_use]
pub fn col(token: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder {
        column: token.into(),
    }
}

/// Reference a named binding.
#[must_use]
pub fn var(name: impl Into<String>) -> ValueRef {
    ValueRef::Binding(name.into())
}

/// `AND` over the given expressions.
#[must_use]
pub fn and(children: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Combinator {
        op: LogicalOperator::And,
        children: children.into_iter().collect(),
    }
}

/// `OR` over the given expressions.
#[must_use]
pub fn or(children: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Combinator {
        op: LogicalOperator::Or,
        children: children.into_iter().collect(),
    }
}

/// `NOT` of one expression.
#[must_use]
pub fn not(child: Expression) -> Expression {
    Expression::not_all([child])
}

/// Column half of a comparison under construction.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    column: String,
}

impl ColumnBuilder {
    fn compare(self, op: ComparatorType, value: impl Into<ValueRef>) -> Expression {
        Expression::Comparison(Comparison {
            op,
            column: self.column,
            value: value.into(),
        })
    }

    /// `column == value`
    #[must_use]
    pub fn eq(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::Equal, value)
    }

    /// `column != value`
    #[must_use]
    pub fn ne(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::NotEqual, value)
    }

    /// `column > value`
    #[must_use]
    pub fn gt(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::GreaterThan, value)
    }

    /// `column >= value`
    #[must_use]
    pub fn ge(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::GreaterEqual, value)
    }

    /// `column < value`
    #[must_use]
    pub fn lt(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::LessThan, value)
    }

    /// `column <= value`
    #[must_use]
    pub fn le(self, value: impl Into<ValueRef>) -> Expression {
        self.compare(ComparatorType::LessEqual, value)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

// The text form parses back to an equal tree, except for binary and
// non-finite double literals, which render in angle brackets and are
// rejected by the parser.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(c) => write!(f, "{c}"),
            Self::Combinator {
                op: LogicalOperator::Not,
                children,
            } => {
                f.write_str("not (")?;
                write_joined(f, children, ", ")?;
                f.write_str(")")
            }
            Self::Combinator { op, children } => {
                let sep = match op {
                    LogicalOperator::Or => " or ",
                    _ => " and ",
                };
                f.write_str("(")?;
                write_joined(f, children, sep)?;
                f.write_str(")")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Expression], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_plain_column_token(&self.column) {
            f.write_str(&self.column)?;
        } else {
            write_quoted(f, &self.column)?;
        }
        write!(f, " {} {}", self.op.symbol(), self.value)
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binding(name) => f.write_str(name),
            Self::Literal(ColumnValue::String(s)) => write_quoted(f, s),
            Self::Literal(ColumnValue::Double(d)) if d.is_finite() => write!(f, "{d:?}"),
            Self::Literal(ColumnValue::Double(d)) => write!(f, "<{d}>"),
            Self::Literal(ColumnValue::Binary(b)) => write!(f, "<binary {} bytes>", b.len()),
            Self::Literal(v) => write!(f, "{v}"),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

/// An identifier optionally followed by a bracketed option block.
fn is_plain_column_token(token: &str) -> bool {
    let name = token.split_once('[').map_or(token, |(name, _)| name);
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && (name.len() == token.len() || token.ends_with(']'))
}
