//! SQL identifier quoting utilities
//!
//! Shared by the history reader (which builds queries against a configurable
//! table name) and the schema grammars.

/// Quote a SQL identifier with `quote`, doubling any embedded quote character.
///
/// # Examples
/// ```
/// use sg_core::sql_utils::quote_ident_with;
/// assert_eq!(quote_ident_with("users", '"'), r#""users""#);
/// assert_eq!(quote_ident_with("my`table", '`'), "`my``table`");
/// ```
pub fn quote_ident_with(ident: &str, quote: char) -> String {
    let doubled = format!("{quote}{quote}");
    format!(
        "{quote}{}{quote}",
        ident.replace(quote, &doubled),
        quote = quote
    )
}

/// Quote a potentially schema-qualified name (e.g. `schema.table`), component by component.
///
/// # Examples
/// ```
/// use sg_core::sql_utils::quote_qualified_with;
/// assert_eq!(quote_qualified_with("staging.orders", '"'), r#""staging"."orders""#);
/// assert_eq!(quote_qualified_with("orders", '`'), "`orders`");
/// ```
pub fn quote_qualified_with(name: &str, quote: char) -> String {
    name.split('.')
        .map(|part| quote_ident_with(part, quote))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a potentially schema-qualified table name into (schema, table).
///
/// Uses the last `.` as the separator; unqualified names get `default_schema`.
///
/// # Examples
/// ```
/// use sg_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("migrations", "main"), ("main", "migrations"));
/// assert_eq!(split_qualified_name("app.migrations", "main"), ("app", "migrations"));
/// ```
pub fn split_qualified_name<'a>(name: &'a str, default_schema: &'a str) -> (&'a str, &'a str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => (default_schema, name),
    }
}

/// Render a string as a single-quoted SQL literal, doubling embedded quotes.
pub fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
