//! Inline per-column option blocks.
//!
//! A column token is a bare name or `name[key: value, ...]`. The block is
//! parsed into a map of literal values; `ignore_if_missing` and
//! `latest_version_only` must be booleans, any other key is passed through.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tablestore_model::value::ColumnValue;

use crate::error::{TableStoreError, TableStoreResult};

/// Whether rows lacking the column pass the filter.
pub const IGNORE_IF_MISSING: &str = "ignore_if_missing";
/// Whether only the newest version of the column is compared.
pub const LATEST_VERSION_ONLY: &str = "latest_version_only";

static COLUMN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<name>[^\[\]]*?)\s*(?:\[(?P<options>[^\[\]]*)\])?\s*$")
        .expect("column token pattern is valid")
});

static OPTION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("option key pattern is valid")
});

/// A column name with its parsed inline options.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Column name.
    pub name: String,
    /// Inline options; `None` when the token had no bracketed block.
    pub options: Option<BTreeMap<String, ColumnValue>>,
}

impl ColumnRef {
    /// Value of a boolean option, if given.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.options
            .as_ref()
            .and_then(|options| options.get(key))
            .and_then(ColumnValue::as_bool)
    }
}

/// Split a column token into its name and inline options.
pub fn parse(token: &str) -> TableStoreResult<ColumnRef> {
    let invalid = |reason: &str| {
        TableStoreError::InvalidFilterExpression(format!("{reason} in column '{token}'"))
    };

    let caps = COLUMN_TOKEN
        .captures(token)
        .ok_or_else(|| invalid("unbalanced option block"))?;
    let name = caps.name("name").map_or("", |m| m.as_str());
    if name.is_empty() {
        return Err(invalid("missing column name"));
    }

    let options = caps
        .name("options")
        .map(|block| parse_options(block.as_str()).map_err(|reason| invalid(&reason)))
        .transpose()?;

    Ok(ColumnRef {
        name: name.to_owned(),
        options,
    })
}

fn parse_options(block: &str) -> Result<BTreeMap<String, ColumnValue>, String> {
    let mut options = BTreeMap::new();
    if block.trim().is_empty() {
        return Ok(options);
    }

    for entry in split_entries(block) {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("option '{}' has no value", entry.trim()))?;
        let key = key.trim();
        if !OPTION_KEY.is_match(key) {
            return Err(format!("invalid option key '{key}'"));
        }
        let value = parse_literal(value.trim())?;
        if matches!(key, IGNORE_IF_MISSING | LATEST_VERSION_ONLY)
            && !matches!(value, ColumnValue::Boolean(_))
        {
            return Err(format!("option '{key}' must be a boolean, got {value}"));
        }
        options.insert(key.to_owned(), value);
    }
    Ok(options)
}

/// Split on commas that sit outside quoted values.
fn split_entries(block: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (i, c) in block.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, ',') => {
                entries.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&block[start..]);
    entries
}

fn parse_literal(raw: &str) -> Result<ColumnValue, String> {
    if raw.is_empty() {
        return Err("empty option value".to_owned());
    }
    if let Some(quoted) = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
    {
        return Ok(ColumnValue::String(quoted.to_owned()));
    }
    match raw {
        "true" => return Ok(ColumnValue::Boolean(true)),
        "false" => return Ok(ColumnValue::Boolean(false)),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(ColumnValue::Integer(n));
    }
    if raw.contains('.') {
        if let Ok(n) = raw.parse::<f64>() {
            return Ok(ColumnValue::Double(n));
        }
    }
    let bare = raw.strip_prefix(':').unwrap_or(raw);
    if OPTION_KEY.is_match(bare) {
        return Ok(ColumnValue::String(bare.to_owned()));
    }
    Err(format!("invalid option value '{raw}'"))
}
