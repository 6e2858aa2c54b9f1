//! Bound parameter values and placeholder interpolation

use crate::error::{DbError, DbResult};
use sg_core::sql_utils::quote_string_literal;
use std::fmt;

/// A value bound to a positional `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Render the value as a SQL literal.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(true) => "TRUE".to_string(),
            SqlValue::Bool(false) => "FALSE".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) if f.is_finite() => f.to_string(),
            // NaN / infinity have no portable literal form
            SqlValue::Float(f) => quote_string_literal(&f.to_string()),
            SqlValue::Text(s) => quote_string_literal(s),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Substitute each positional `?` in `query` with the next binding as a literal.
///
/// Placeholders are not recognized inside single-quoted strings, double-quoted
/// or backtick-quoted identifiers, `--` line comments, `/* */` block comments,
/// or `$tag$ ... $tag$` dollar-quoted bodies. The number of placeholders must
/// equal the number of bindings.
pub fn interpolate(query: &str, bindings: &[SqlValue]) -> DbResult<String> {
    let chars: Vec<char> = query.chars().collect();
    let mut out = String::with_capacity(query.len());
    let mut placeholders = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let span_end = match ch {
            // A doubled quote closes and immediately reopens, which is
            // exactly the escape semantics.
            '\'' | '"' | '`' => Some(find_from(&chars, i + 1, &[ch]).map_or(chars.len(), |p| p + 1)),
            '-' if chars.get(i + 1) == Some(&'-') => {
                Some(find_from(&chars, i + 2, &['\n']).unwrap_or(chars.len()))
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                Some(find_from(&chars, i + 2, &['*', '/']).map_or(chars.len(), |p| p + 2))
            }
            '$' => dollar_tag(&chars, i).map(|tag| {
                let body = i + tag.len();
                find_from(&chars, body, tag).map_or(chars.len(), |p| p + tag.len())
            }),
            _ => None,
        };

        if let Some(end) = span_end {
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if ch == '?' {
            if let Some(value) = bindings.get(placeholders) {
                out.push_str(&value.to_literal());
            }
            placeholders += 1;
        } else {
            out.push(ch);
        }
        i += 1;
    }

    if placeholders != bindings.len() {
        return Err(DbError::BindingMismatch {
            query: query.to_string(),
            placeholders,
            bindings: bindings.len(),
        });
    }
    Ok(out)
}

/// Position of the first occurrence of `pattern` at or after `from`.
fn find_from(chars: &[char], from: usize, pattern: &[char]) -> Option<usize> {
    if from > chars.len() {
        return None;
    }
    chars[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|p| p + from)
}

/// The `$tag$` opening at `start`, if any. Positional `$1` parameters are not tags.
fn dollar_tag(chars: &[char], start: usize) -> Option<&[char]> {
    let mut end = start + 1;
    while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    let starts_with_digit = chars.get(start + 1).is_some_and(|c| c.is_ascii_digit());
    if end < chars.len() && chars[end] == '$' && !starts_with_digit {
        Some(&chars[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
