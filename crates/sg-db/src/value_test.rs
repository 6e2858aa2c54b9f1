use super::*;

#[test]
fn test_literals() {
    assert_eq!(SqlValue::Null.to_literal(), "NULL");
    assert_eq!(SqlValue::Bool(true).to_literal(), "TRUE");
    assert_eq!(SqlValue::Bool(false).to_literal(), "FALSE");
    assert_eq!(SqlValue::Int(-42).to_literal(), "-42");
    assert_eq!(SqlValue::Float(1.5).to_literal(), "1.5");
    assert_eq!(SqlValue::from("O'Brien").to_literal(), "'O''Brien'");
}

#[test]
fn test_option_conversion() {
    assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
    assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".to_string()));
}

#[test]
fn test_interpolate_in_order() {
    let sql = interpolate(
        "INSERT INTO settings (key, value, enabled) VALUES (?, ?, ?)",
        &["theme".into(), "dark".into(), true.into()],
    )
    .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO settings (key, value, enabled) VALUES ('theme', 'dark', TRUE)"
    );
}

#[test]
fn test_interpolate_without_placeholders() {
    let sql = interpolate("DROP TABLE users", &[]).unwrap();
    assert_eq!(sql, "DROP TABLE users");
}

#[test]
fn test_question_mark_inside_literal_untouched() {
    let sql = interpolate(
        "UPDATE faq SET answer = ? WHERE question = 'why?'",
        &["because".into()],
    )
    .unwrap();
    assert_eq!(
        sql,
        "UPDATE faq SET answer = 'because' WHERE question = 'why?'"
    );
}

#[test]
fn test_question_mark_inside_escaped_literal_untouched() {
    let sql = interpolate("SELECT 'it''s ?' , ?", &[1i64.into()]).unwrap();
    assert_eq!(sql, "SELECT 'it''s ?' , 1");
}

#[test]
fn test_question_mark_inside_identifier_untouched() {
    let sql = interpolate(r#"SELECT "odd?col" FROM t WHERE id = ?"#, &[7i64.into()]).unwrap();
    assert_eq!(sql, r#"SELECT "odd?col" FROM t WHERE id = 7"#);
}

#[test]
fn test_binding_value_with_question_mark_not_reinterpolated() {
    let sql = interpolate("VALUES (?, ?)", &["?".into(), "b".into()]).unwrap();
    assert_eq!(sql, "VALUES ('?', 'b')");
}

#[test]
fn test_too_few_bindings() {
    let err = interpolate("VALUES (?, ?)", &["a".into()]).unwrap_err();
    match err {
        DbError::BindingMismatch {
            placeholders,
            bindings,
            ..
        } => {
            assert_eq!(placeholders, 2);
            assert_eq!(bindings, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_too_many_bindings() {
    let err = interpolate("VALUES (?)", &["a".into(), "b".into()]).unwrap_err();
    assert!(err.to_string().contains("[D003]"));
}

#[test]
fn test_comments_are_not_placeholders() {
    let sql = interpolate(
        "SELECT ? -- why?\nFROM t /* is this? */ WHERE x = ?",
        &[1i64.into(), "a".into()],
    )
    .unwrap();
    assert_eq!(sql, "SELECT 1 -- why?\nFROM t /* is this? */ WHERE x = 'a'");
}

#[test]
fn test_commented_placeholder_needs_no_binding() {
    let sql = interpolate("DROP TABLE t -- safe?", &[]).unwrap();
    assert_eq!(sql, "DROP TABLE t -- safe?");
}

#[test]
fn test_dollar_quoted_body_is_skipped() {
    let query = "CREATE FUNCTION f() RETURNS int AS $$ SELECT 1 WHERE 'a' ? 'b' $$ LANGUAGE sql; SELECT ?";
    let sql = interpolate(query, &[2i64.into()]).unwrap();
    assert!(sql.ends_with("LANGUAGE sql; SELECT 2"));
    assert!(sql.contains("$$ SELECT 1 WHERE 'a' ? 'b' $$"));

    let tagged = interpolate("DO $body$ BEGIN PERFORM ?; END $body$", &[]).unwrap();
    assert_eq!(tagged, "DO $body$ BEGIN PERFORM ?; END $body$");
}

#[test]
fn test_positional_dollar_parameter_is_not_a_tag() {
    let sql = interpolate("SELECT $1, ?", &[true.into()]).unwrap();
    assert_eq!(sql, "SELECT $1, TRUE");
}

#[test]
fn test_unterminated_comment_runs_to_end() {
    let sql = interpolate("SELECT 1 /* open ?", &[]).unwrap();
    assert_eq!(sql, "SELECT 1 /* open ?");
}
