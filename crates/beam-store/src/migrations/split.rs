//! Statement splitting
//!
//! Splits a migration file into individually executable statements on `;`,
//! ignoring semicolons inside single-quoted literals. Every `'` toggles the
//! literal state: doubled `''` escapes, comments and other quoting styles
//! are not understood, so migration files must keep apostrophes balanced.

/// Split `sql` into trimmed, non-empty statements
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;

    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                current.push(ch);
            }
            ';' if !in_literal => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_semicolon_inside_literal_is_kept() {
        let stmts = split_statements("CREATE TABLE t (id INT); INSERT INTO t VALUES ('a;b');");
        assert_eq!(
            stmts,
            vec![
                "CREATE TABLE t (id INT)".to_string(),
                "INSERT INTO t VALUES ('a;b')".to_string(),
            ]
        );
    }

    #[test]
    fn test_trailing_statement_without_semicolon() {
        let stmts = split_statements("SELECT 1;\n  SELECT 2  ");
        assert_eq!(stmts, vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_empty_statements_are_discarded() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;;\n ; ").is_empty());
        assert_eq!(split_statements(";;SELECT 1;;"), vec!["SELECT 1"]);
    }

    #[test]
    fn test_multiline_statement_trimmed() {
        let sql = "\n\nCREATE TABLE customers (\n    id TEXT PRIMARY KEY\n);\n\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE customers (\n    id TEXT PRIMARY KEY\n)"]
        );
    }

    #[test]
    fn test_doubled_quote_toggles_twice() {
        // 'it''s' toggles four times and ends outside the literal, so the
        // semicolon after it still splits.
        let stmts = split_statements("INSERT INTO t VALUES ('it''s'); SELECT 1");
        assert_eq!(stmts, vec!["INSERT INTO t VALUES ('it''s')", "SELECT 1"]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest() {
        let stmts = split_statements("SELECT 'x; SELECT 2;");
        assert_eq!(stmts, vec!["SELECT 'x; SELECT 2;"]);
    }

    proptest! {
        #[test]
        fn prop_unquoted_statements_round_trip(
            parts in prop::collection::vec("[a-zA-Z0-9 (),_=\n]{0,24}", 0..8)
        ) {
            let sql = parts.join(";");
            let expected: Vec<String> = parts
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            prop_assert_eq!(split_statements(&sql), expected);
        }

        #[test]
        fn prop_literal_contents_never_split(value in "[a-z; ]{0,16}") {
            let sql = format!("INSERT INTO t VALUES ('{}')", value);
            prop_assert_eq!(split_statements(&sql), vec![sql.clone()]);
        }
    }
}
