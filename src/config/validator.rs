//! Descriptor validation: unique paths and tables, and every column a kind refers to must exist.

use crate::config::types::{FieldType, ListFilter, ResourceKind, SortOrder};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(kinds: &[&ResourceKind]) -> Result<(), ConfigError> {
    let mut paths = HashSet::new();
    let mut tables = HashSet::new();
    for kind in kinds {
        if !paths.insert(kind.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(kind.path_segment.to_string()));
        }
        if !tables.insert(kind.table) {
            return Err(ConfigError::Validation(format!("table '{}' registered twice", kind.table)));
        }
        validate_kind(kind)?;
    }

    for kind in kinds {
        for dep in kind.dependents {
            let target = kinds
                .iter()
                .find(|k| k.table == dep.table)
                .ok_or_else(|| ConfigError::MissingReference {
                    kind: "table",
                    id: dep.table.to_string(),
                })?;
            if target.field_by_column(dep.column).is_none() {
                return Err(ConfigError::MissingReference {
                    kind: "column",
                    id: format!("{}.{}", dep.table, dep.column),
                });
            }
        }
    }
    Ok(())
}

fn validate_kind(kind: &ResourceKind) -> Result<(), ConfigError> {
    let mut columns = HashSet::new();
    let mut wires = HashSet::new();
    columns.insert(kind.id_column);
    wires.insert(kind.id_wire);
    for f in kind.fields {
        if !columns.insert(f.column) {
            return Err(ConfigError::Validation(format!(
                "{}: duplicate column '{}'",
                kind.table, f.column
            )));
        }
        if !wires.insert(f.wire) {
            return Err(ConfigError::Validation(format!(
                "{}: duplicate wire name '{}'",
                kind.table, f.wire
            )));
        }
    }

    if let SortOrder::Display { column } = kind.order {
        match kind.field_by_column(column) {
            Some(f) if f.ty == FieldType::Integer => {}
            Some(_) => {
                return Err(ConfigError::Validation(format!(
                    "{}: display order column '{}' must be an integer",
                    kind.table, column
                )))
            }
            None => return Err(missing_column(kind, column)),
        }
    }

    for filter in kind.filters {
        match *filter {
            ListFilter::Equals { column, .. } => {
                kind.field_by_column(column).ok_or_else(|| missing_column(kind, column))?;
            }
            ListFilter::ActiveOnly { column, .. } => {
                let f = kind.field_by_column(column).ok_or_else(|| missing_column(kind, column))?;
                if f.ty != FieldType::Bool {
                    return Err(ConfigError::Validation(format!(
                        "{}: active filter column '{}' must be boolean",
                        kind.table, column
                    )));
                }
            }
        }
    }

    for (wire, source) in kind.presentation.mirrors {
        if !wires.contains(source) {
            return Err(ConfigError::MissingReference {
                kind: "wire field",
                id: format!("{}.{}", kind.table, source),
            });
        }
        if wires.contains(wire) {
            return Err(ConfigError::Validation(format!(
                "{}: mirror '{}' shadows a stored field",
                kind.table, wire
            )));
        }
    }
    Ok(())
}

fn missing_column(kind: &ResourceKind, column: &str) -> ConfigError {
    ConfigError::MissingReference {
        kind: "column",
        id: format!("{}.{}", kind.table, column),
    }
}
