//! MySQL-facing value types.
//!
//! Wrappers over raw column values whose driver types lack the JSON
//! semantics this layer's consumers expect.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySqlTypeInfo, MySqlValueRef};
use sqlx::{Decode, Type};

/// Nullable timestamp column wrapper.
///
/// Decoding delegates to the driver's own `Option<DateTime<Utc>>` handling,
/// so validity follows the driver's NULL reporting rather than any check on
/// the raw input. JSON serialization yields the literal `null` or a quoted
/// RFC-3339 string, e.g. `"2023-01-02T15:04:05Z"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullableTimestamp(Option<DateTime<Utc>>);

impl NullableTimestamp {
    /// A valid timestamp.
    pub fn from_timestamp(time: DateTime<Utc>) -> Self {
        Self(Some(time))
    }

    /// The NULL value.
    pub fn null() -> Self {
        Self(None)
    }

    /// Whether the column held a value.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The value, when present.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.0
    }
}

impl From<Option<DateTime<Utc>>> for NullableTimestamp {
    fn from(time: Option<DateTime<Utc>>) -> Self {
        Self(time)
    }
}

impl From<DateTime<Utc>> for NullableTimestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self(Some(time))
    }
}

impl From<NullableTimestamp> for Option<DateTime<Utc>> {
    fn from(value: NullableTimestamp) -> Self {
        value.0
    }
}

impl Type<sqlx::MySql> for NullableTimestamp {
    fn type_info() -> MySqlTypeInfo {
        <DateTime<Utc> as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <DateTime<Utc> as Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> Decode<'r, sqlx::MySql> for NullableTimestamp {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        let time = <Option<DateTime<Utc>> as Decode<sqlx::MySql>>::decode(value)?;
        Ok(Self(time))
    }
}

impl Serialize for NullableTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => serializer.serialize_none(),
            Some(time) => {
                serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}
