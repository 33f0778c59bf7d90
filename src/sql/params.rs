//! Values that the builder binds as query parameters.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value bound to a PostgreSQL query. Each variant is sent with its own native type,
/// so the statement sees `int4` for ids and `text` for everything else (cast in SQL where needed).
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i32),
    Text(String),
}

impl SqlValue {
    /// `Some(s)` becomes `Text`, `None` becomes `Null`.
    pub fn opt_text(v: Option<&str>) -> Self {
        v.map(|s| SqlValue::Text(s.to_string())).unwrap_or(SqlValue::Null)
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Int(n)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)
            }
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlValue::Int(_) => <i32 as Type<Postgres>>::type_info(),
            SqlValue::Null | SqlValue::Text(_) => <String as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty) || <i32 as Type<Postgres>>::compatible(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_values_map_to_null() {
        assert_eq!(SqlValue::opt_text(None), SqlValue::Null);
        assert_eq!(SqlValue::opt_text(Some("x")), SqlValue::Text("x".into()));
        assert_eq!(SqlValue::from(7i32), SqlValue::Int(7));
    }

    #[test]
    fn produced_type_follows_variant() {
        let int = SqlValue::Int(1).produces().map(|t| t.to_string());
        let text = SqlValue::Text("a".into()).produces().map(|t| t.to_string());
        assert_eq!(int.as_deref(), Some("INT4"));
        assert_eq!(text.as_deref(), Some("TEXT"));
    }
}
