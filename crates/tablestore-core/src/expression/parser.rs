//! Lexer and recursive-descent parser for filter text.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or_expr    := and_expr ("or" and_expr)*
//! and_expr   := not_expr ("and" not_expr)*
//! not_expr   := "not" not_expr | primary
//! primary    := "(" or_expr ")" | column comparator value
//! column     := (identifier | string) option_block?
//! comparator := "==" | "!=" | ">" | ">=" | "<" | "<="
//! value      := string | integer | float | "true" | "false" | identifier
//! ```
//!
//! Keywords are case-insensitive. A bare identifier on the right-hand side is
//! a binding reference. The option block is kept verbatim for the column
//! option parser.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use tablestore_model::types::{ComparatorType, LogicalOperator};
use tablestore_model::value::ColumnValue;

use super::ast::{Comparison, Expression, ValueRef};
use crate::error::{TableStoreError, TableStoreResult};

// ---------------------------------------------------------------------------
// Token type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Identifier(String),
    Str(String),
    Integer(i64),
    Float(f64),
    /// Raw contents of a `[...]` block.
    OptionBlock(String),
    Compare(ComparatorType),
    True,
    False,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(s) => write!(f, "identifier '{s}'"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::OptionBlock(s) => write!(f, "'[{s}]'"),
            Self::Compare(op) => write!(f, "'{}'", op.symbol()),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

fn unexpected(expected: &str, found: &Token) -> TableStoreError {
    TableStoreError::InvalidExpression(format!("expected {expected}, found {found}"))
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn tokenize(&mut self) -> TableStoreResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            if tok == Token::Eof {
                tokens.push(Token::Eof);
                break;
            }
            tokens.push(tok);
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(char::is_ascii_whitespace) {
            self.chars.next();
        }
    }

    fn next_token(&mut self) -> TableStoreResult<Token> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            '(' => {
                self.chars.next();
                Ok(Token::LParen)
            }
            ')' => {
                self.chars.next();
                Ok(Token::RParen)
            }
            '[' => self.read_option_block(),
            '"' | '\'' => self.read_string(ch),
            '=' | '!' | '<' | '>' | '~' => self.read_operator(),
            '-' => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            c if is_ident_start(c) => Ok(self.read_identifier_or_keyword()),
            _ => Err(TableStoreError::InvalidExpression(format!(
                "unexpected character '{ch}'"
            ))),
        }
    }

    /// Read a run of operator characters and accept only the six comparators.
    fn read_operator(&mut self) -> TableStoreResult<Token> {
        let mut op = String::new();
        while let Some(&c) = self.chars.peek() {
            if matches!(c, '=' | '!' | '<' | '>' | '~') {
                op.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        ComparatorType::from_symbol(&op)
            .map(Token::Compare)
            .ok_or_else(|| TableStoreError::InvalidExpression(format!("unsupported operator '{op}'")))
    }

    fn read_option_block(&mut self) -> TableStoreResult<Token> {
        self.chars.next(); // consume '['
        let mut body = String::new();
        for c in self.chars.by_ref() {
            if c == ']' {
                return Ok(Token::OptionBlock(body));
            }
            body.push(c);
        }
        Err(TableStoreError::InvalidExpression(
            "unterminated option block".to_owned(),
        ))
    }

    fn read_string(&mut self, quote: char) -> TableStoreResult<Token> {
        self.chars.next(); // consume opening quote
        let mut s = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(other) => s.push(other),
                    None => break,
                },
                c if c == quote => return Ok(Token::Str(s)),
                c => s.push(c),
            }
        }
        Err(TableStoreError::InvalidExpression(
            "unterminated string literal".to_owned(),
        ))
    }

    fn read_number(&mut self) -> TableStoreResult<Token> {
        let mut s = String::new();
        if self.chars.peek() == Some(&'-') {
            s.push('-');
            self.chars.next();
        }
        let mut is_float = false;
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
            } else if c == '.' && !is_float {
                is_float = true;
                s.push(c);
            } else {
                break;
            }
            self.chars.next();
        }
        if self.at_exponent() {
            is_float = true;
            for c in self.chars.by_ref().take(2) {
                s.push(c);
            }
            while let Some(&c) = self.chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                s.push(c);
                self.chars.next();
            }
        }
        let invalid = || TableStoreError::InvalidExpression(format!("invalid number '{s}'"));
        if is_float {
            s.parse().map(Token::Float).map_err(|_| invalid())
        } else {
            s.parse().map(Token::Integer).map_err(|_| invalid())
        }
    }

    /// `e` or `E`, an optional sign, then a digit.
    fn at_exponent(&self) -> bool {
        let mut ahead = self.chars.clone();
        if !matches!(ahead.next(), Some('e' | 'E')) {
            return false;
        }
        match ahead.next() {
            Some('+' | '-') => ahead.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_ident_continue(c) {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        match ident.to_ascii_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Identifier(ident),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        tok
    }

    fn at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn parse_or_expr(&mut self) -> TableStoreResult<Expression> {
        let mut children = vec![self.parse_and_expr()?];
        while matches!(self.peek(), Token::Or) {
            self.advance();
            children.push(self.parse_and_expr()?);
        }
        Ok(flatten(LogicalOperator::Or, children))
    }

    fn parse_and_expr(&mut self) -> TableStoreResult<Expression> {
        let mut children = vec![self.parse_not_expr()?];
        while matches!(self.peek(), Token::And) {
            self.advance();
            children.push(self.parse_not_expr()?);
        }
        Ok(flatten(LogicalOperator::And, children))
    }

    fn parse_not_expr(&mut self) -> TableStoreResult<Expression> {
        if matches!(self.peek(), Token::Not) {
            self.advance();
            let child = self.parse_not_expr()?;
            return Ok(Expression::not_all([child]));
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> TableStoreResult<Expression> {
        if matches!(self.peek(), Token::LParen) {
            self.advance();
            let expr = self.parse_or_expr()?;
            let tok = self.advance();
            if tok != Token::RParen {
                return Err(unexpected("')'", &tok));
            }
            return Ok(expr);
        }

        let column = self.parse_column()?;
        let op = match self.advance() {
            Token::Compare(op) => op,
            other => return Err(unexpected("comparison operator", &other)),
        };
        let value = self.parse_value()?;
        Ok(Expression::Comparison(Comparison { op, column, value }))
    }

    fn parse_column(&mut self) -> TableStoreResult<String> {
        let mut column = match self.advance() {
            Token::Identifier(name) | Token::Str(name) => name,
            other => return Err(unexpected("column name", &other)),
        };
        if let Token::OptionBlock(block) = self.peek() {
            column = format!("{column}[{block}]");
            self.advance();
        }
        Ok(column)
    }

    fn parse_value(&mut self) -> TableStoreResult<ValueRef> {
        Ok(match self.advance() {
            Token::Str(s) => ValueRef::Literal(ColumnValue::String(s)),
            Token::Integer(n) => ValueRef::Literal(ColumnValue::Integer(n)),
            Token::Float(n) => ValueRef::Literal(ColumnValue::Double(n)),
            Token::True => ValueRef::Literal(ColumnValue::Boolean(true)),
            Token::False => ValueRef::Literal(ColumnValue::Boolean(false)),
            Token::Identifier(name) => ValueRef::Binding(name),
            other => return Err(unexpected("value", &other)),
        })
    }
}

/// A single child stands alone; several share one combinator node.
fn flatten(op: LogicalOperator, mut children: Vec<Expression>) -> Expression {
    if children.len() == 1 {
        if let Some(only) = children.pop() {
            return only;
        }
    }
    Expression::Combinator { op, children }
}

/// Parse filter text into an expression tree.
pub fn parse_filter(input: &str) -> TableStoreResult<Expression> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser::new(tokens);
    if parser.at_end() {
        return Err(TableStoreError::InvalidExpression("empty expression".to_owned()));
    }
    let expr = parser.parse_or_expr()?;
    if !parser.at_end() {
        let tok = parser.advance();
        return Err(unexpected("end of expression", &tok));
    }
    Ok(expr)
}
