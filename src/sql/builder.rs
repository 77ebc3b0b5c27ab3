//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a resource descriptor.

use crate::config::{ResourceKind, SortOrder};
use crate::sql::params::BindValue;
use serde_json::Value;

/// Quote identifier for SQLite (safe: only from descriptors).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: &Value) {
        self.params.push(BindValue::from_json(v));
    }
}

/// Id column followed by every field column, in descriptor order.
fn select_column_list(kind: &ResourceKind) -> String {
    std::iter::once(kind.id_column)
        .chain(kind.fields.iter().map(|f| f.column))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// ORDER BY for the kind's fixed ordering. Display order puts missing values last.
fn order_clause(kind: &ResourceKind) -> String {
    let id = quoted(kind.id_column);
    match kind.order {
        SortOrder::Insertion => " ORDER BY rowid".to_string(),
        SortOrder::NewestFirst => format!(" ORDER BY {} DESC", id),
        SortOrder::IdAscending => format!(" ORDER BY {}", id),
        SortOrder::Display { column } => {
            let col = quoted(column);
            format!(" ORDER BY {col} IS NULL, {col}, {id}")
        }
    }
}

/// SELECT every row with optional exact-match filters (column, stored value), in the kind's order.
pub fn select_list(kind: &ResourceKind, filters: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        q.push_param(val);
        where_parts.push(format!("{} = ?", quoted(col)));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{}{}",
        select_column_list(kind),
        quoted(kind.table),
        where_clause,
        order_clause(kind)
    );
    q
}

/// INSERT one row. `id` is included only when the caller (or the id strategy) supplies it.
/// `values` are already encoded (column, stored value) pairs.
pub fn insert(kind: &ResourceKind, id: Option<&Value>, values: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len() + 1);
    if let Some(id) = id {
        cols.push(quoted(kind.id_column));
        q.push_param(id);
    }
    for (col, val) in values {
        cols.push(quoted(col));
        q.push_param(val);
    }
    let placeholders = vec!["?"; cols.len()].join(", ");
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", quoted(kind.table))
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted(kind.table),
            cols.join(", "),
            placeholders
        )
    };
    q
}

/// UPDATE by id: SET every given column (full replace of the writable fields).
pub fn update(kind: &ResourceKind, id: &Value, values: &[(&str, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(values.len());
    for (col, val) in values {
        sets.push(format!("{} = ?", quoted(col)));
        q.push_param(val);
    }
    if sets.is_empty() {
        // Nothing writable: still touch the row so a missing id reports zero rows affected.
        sets.push(format!("{0} = {0}", quoted(kind.id_column)));
    }
    q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(kind.table),
        sets.join(", "),
        quoted(kind.id_column)
    );
    q
}

/// DELETE by id.
pub fn delete(kind: &ResourceKind, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(kind.table),
        quoted(kind.id_column)
    );
    q
}

/// COUNT rows in `table` whose `column` equals `value`.
pub fn count_where(table: &str, column: &str, value: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(value);
    q.sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?", quoted(table), quoted(column));
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kinds::{FAQS, FAQ_CATEGORIES, PACKAGES, PROJECT_REQUESTS, TEAM_MEMBERS};
    use serde_json::json;

    #[test]
    fn display_order_sorts_missing_values_last() {
        let q = select_list(&PACKAGES, &[]);
        assert!(q.sql.ends_with(r#"ORDER BY "display_order" IS NULL, "display_order", "id""#));
        assert!(q.params.is_empty());
    }

    #[test]
    fn reserved_words_are_quoted() {
        let q = select_list(&TEAM_MEMBERS, &[("isActive", json!(1))]);
        assert!(q.sql.contains(r#""order""#));
        assert!(q.sql.contains(r#"WHERE "isActive" = ?"#));
        assert_eq!(q.params, vec![BindValue::I64(1)]);
        let q = select_list(&FAQ_CATEGORIES, &[]);
        assert!(q.sql.starts_with(r#"SELECT "key", "label" FROM "faq_categories""#));
    }

    #[test]
    fn newest_first_and_filtered_lists() {
        assert!(select_list(&PROJECT_REQUESTS, &[]).sql.ends_with(r#"ORDER BY "id" DESC"#));
        let q = select_list(&FAQS, &[("category", json!("general"))]);
        assert!(q.sql.contains(r#"WHERE "category" = ? ORDER BY "id""#));
    }

    #[test]
    fn insert_includes_id_only_when_given() {
        let values = vec![("title", json!("Basic"))];
        let q = insert(&PACKAGES, None, &values);
        assert_eq!(q.sql, r#"INSERT INTO "packages" ("title") VALUES (?)"#);
        let q = insert(&PACKAGES, Some(&json!(7)), &values);
        assert_eq!(q.sql, r#"INSERT INTO "packages" ("id", "title") VALUES (?, ?)"#);
        assert_eq!(q.params[0], BindValue::I64(7));
    }

    #[test]
    fn update_binds_id_last() {
        let q = update(&FAQ_CATEGORIES, &json!("general"), &[("label", json!("General"))]);
        assert_eq!(q.sql, r#"UPDATE "faq_categories" SET "label" = ? WHERE "key" = ?"#);
        assert_eq!(q.params[1], BindValue::Text("general".into()));
    }

    #[test]
    fn guard_counts_dependents() {
        let q = count_where("faqs", "category", &json!("general"));
        assert_eq!(q.sql, r#"SELECT COUNT(*) FROM "faqs" WHERE "category" = ?"#);
    }
}
