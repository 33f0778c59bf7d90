//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a static table definition.

use crate::sql::SqlValue;

/// One column of a table. `cast` is appended to placeholders bound to it (e.g. `$1::timestamptz`);
/// `select_as_text` selects the column as `col::text` so enum values decode as `String`.
#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub cast: Option<&'static str>,
    pub select_as_text: bool,
}

impl Column {
    pub const fn plain(name: &'static str) -> Self {
        Column {
            name,
            cast: None,
            select_as_text: false,
        }
    }

    pub const fn cast(name: &'static str, cast: &'static str) -> Self {
        Column {
            name,
            cast: Some(cast),
            select_as_text: false,
        }
    }

    /// Enum-typed column: cast on write, read back as text.
    pub const fn enumerated(name: &'static str, type_name: &'static str) -> Self {
        Column {
            name,
            cast: Some(type_name),
            select_as_text: true,
        }
    }
}

/// A table known to the builder. The first column is the primary key.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    pub fn pk(&self) -> &'static str {
        self.columns[0].name
    }

    fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Quote identifier for PostgreSQL (safe: only from static table definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> usize {
        self.params.push(v);
        self.params.len()
    }

    fn placeholder(&mut self, column: &Column, v: SqlValue) -> String {
        let n = self.push_param(v);
        match column.cast {
            Some(t) => format!("${}::{}", n, t),
            None => format!("${}", n),
        }
    }
}

/// SELECT list: each column as-is, except enum columns which come back as `col::text AS col`.
fn select_column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(c.name);
            if c.select_as_text {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ORDER BY pk.
pub fn select_all(table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk())
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &Table, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk())
    );
    q
}

/// INSERT only the supplied columns so the store fills in its defaults; RETURNING every column.
/// Unknown column names and the primary key are skipped.
pub fn insert(table: &Table, values: Vec<(&str, SqlValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, v) in values {
        if name == table.pk() {
            continue;
        }
        let Some(c) = table.column(name) else { continue };
        placeholders.push(q.placeholder(c, v));
        cols.push(quoted(c.name));
    }
    let returning = select_column_list(table);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(table.name), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table.name),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only the supplied columns. `None` when nothing is left to set.
pub fn update(table: &Table, id: i32, values: Vec<(&str, SqlValue)>) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, v) in values {
        if name == table.pk() {
            continue;
        }
        let Some(c) = table.column(name) else { continue };
        let rhs = q.placeholder(c, v);
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(table.name),
        sets.join(", "),
        quoted(table.pk()),
        id_param
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(table: &Table, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlValue::Int(id));
    q.sql = format!("DELETE FROM {} WHERE {} = $1", quoted(table.name), quoted(table.pk()));
    q
}
