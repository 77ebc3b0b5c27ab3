//! Per-kind schema descriptors: one `ResourceKind` describes a table, its columns, the wire names
//! they travel under, how each value is encoded, and how rows are ordered and filtered.

use serde_json::Value;

/// Storage representation of a field and the codec applied at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Real,
    /// Stored as INTEGER 0/1, exposed as true/false.
    Bool,
    /// Stored as serialized JSON text, exposed as an array. Corrupt text reads as `[]`.
    JsonArray,
    /// Strings are stored verbatim, arrays as JSON text. Reads back an array when the text is one.
    TextOrJsonArray,
}

impl FieldType {
    /// SQLite column type used in DDL.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Text | FieldType::JsonArray | FieldType::TextOrJsonArray => "TEXT",
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Bool => "BOOLEAN",
        }
    }
}

/// Value substituted when the request omits a field (or sends null).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    EmptyString,
    Null,
    False,
    EmptyArray,
}

impl FieldDefault {
    pub fn value(&self) -> Value {
        match self {
            FieldDefault::EmptyString => Value::String(String::new()),
            FieldDefault::Null => Value::Null,
            FieldDefault::False => Value::Bool(false),
            FieldDefault::EmptyArray => Value::Array(Vec::new()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Storage column name.
    pub column: &'static str,
    /// Name used in responses (and accepted in requests).
    pub wire: &'static str,
    /// Additional request names accepted for this field, checked after `wire`.
    pub aliases: &'static [&'static str],
    pub ty: FieldType,
    pub default: FieldDefault,
    /// Emitted as NOT NULL in DDL.
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(column: &'static str, ty: FieldType, default: FieldDefault) -> Self {
        FieldSpec {
            column,
            wire: column,
            aliases: &[],
            ty,
            default,
            required: false,
        }
    }

    pub const fn wire(mut self, wire: &'static str) -> Self {
        self.wire = wire;
        self
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Request names for this field in lookup order.
    pub fn input_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.wire)
            .chain(std::iter::once(self.column))
            .chain(self.aliases.iter().copied())
    }
}

/// How a kind's identifier is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdStrategy {
    /// `INTEGER PRIMARY KEY AUTOINCREMENT`; any `id` in the body is ignored.
    AutoIncrement,
    /// `INTEGER PRIMARY KEY`; an integer `id` in the body is used, otherwise the store assigns one.
    IntegerOrAuto,
    /// Text id generated at creation time (time-ordered, collision resistant).
    TimeDerived,
    /// Text id taken from the body when present, otherwise generated like `TimeDerived`.
    CallerOrTimeDerived,
    /// Text id that is a required field of the body (e.g. a category key).
    NaturalKey,
}

impl IdStrategy {
    pub fn is_integer(&self) -> bool {
        matches!(self, IdStrategy::AutoIncrement | IdStrategy::IntegerOrAuto)
    }
}

/// Fixed ordering applied by `list`.
#[derive(Clone, Copy, Debug)]
pub enum SortOrder {
    /// Storage insertion order (rowid).
    Insertion,
    /// Newest first (id descending).
    NewestFirst,
    /// Ascending by the id column.
    IdAscending,
    /// Ascending by an optional display-order column; missing values sort last, id breaks ties.
    Display { column: &'static str },
}

/// Optional filter a `list` call accepts from the query string.
#[derive(Clone, Copy, Debug)]
pub enum ListFilter {
    /// `?{param}=v` keeps rows whose `column` equals v, unless v is `wildcard`.
    Equals {
        param: &'static str,
        column: &'static str,
        wildcard: &'static str,
    },
    /// `?{param}=true|1` keeps rows whose boolean `column` is set.
    ActiveOnly {
        param: &'static str,
        column: &'static str,
    },
}

/// A row in another table that references this kind's id; deletion is refused while any exists.
#[derive(Clone, Copy, Debug)]
pub struct DependentRef {
    pub table: &'static str,
    pub column: &'static str,
}

/// Read-side extras that reshape a row for the client without extra storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct Presentation {
    /// `(wire, source_wire)`: copy an already decoded field under another name.
    pub mirrors: &'static [(&'static str, &'static str)],
    /// `(wire, value)`: constant integer fields.
    pub constants: &'static [(&'static str, i64)],
}

/// Synthetic row placed ahead of the stored rows on every `list`.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticRow {
    pub fields: &'static [(&'static str, &'static str)],
}

impl SyntheticRow {
    pub fn to_value(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect();
        Value::Object(map)
    }

    /// The row's value for the given id field, if it has one.
    pub fn id_value(&self, id_wire: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(k, _)| *k == id_wire)
            .map(|(_, v)| Value::String((*v).to_string()))
    }
}

#[derive(Debug)]
pub struct ResourceKind {
    /// Human-readable singular name used in messages ("Package").
    pub name: &'static str,
    /// URL path segment ("packages-server").
    pub path_segment: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    /// Wire name of the id in bodies and responses.
    pub id_wire: &'static str,
    pub id_strategy: IdStrategy,
    pub fields: &'static [FieldSpec],
    pub order: SortOrder,
    pub filters: &'static [ListFilter],
    pub dependents: &'static [DependentRef],
    pub presentation: Presentation,
    pub synthetic_head: Option<SyntheticRow>,
}

impl ResourceKind {
    pub fn field_by_column(&self, column: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.column == column)
    }
}
