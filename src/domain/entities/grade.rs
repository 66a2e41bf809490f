use std::{fmt, str::FromStr};

use derive_more::Display;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{error::BoxDynError, postgres::{PgTypeInfo, PgValueRef}, Decode, Postgres, Type};

const SCALE: f64 = 100.0;
const MAX_HUNDREDTHS: u16 = 1000;

/// A grade-point value on the 0.00..=10.00 scale, held as exact hundredths so
/// that "8.00", "8" and 8.0 are the same grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u16);

#[derive(Debug, Display, PartialEq)]
pub enum GradeError {
    #[display("Grade cannot be empty")]
    Empty,

    #[display("Grade must be a number, got '{_0}'")]
    NotNumeric(String),

    #[display("Grade must be between 0.00 and 10.00")]
    OutOfRange,
}

impl std::error::Error for GradeError {}

impl Grade {
    pub const MAX: Grade = Grade(MAX_HUNDREDTHS);
}

impl TryFrom<f64> for Grade {
    type Error = GradeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(GradeError::OutOfRange);
        }
        let scaled = (value * SCALE).round();
        if scaled > f64::from(MAX_HUNDREDTHS) {
            return Err(GradeError::OutOfRange);
        }
        Ok(Grade(scaled as u16))
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GradeError::Empty);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| GradeError::NotNumeric(trimmed.to_string()))?;
        Grade::try_from(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawGrade {
            Text(String),
            Number(f64),
        }

        match RawGrade::deserialize(deserializer)? {
            RawGrade::Text(text) => text.parse().map_err(de::Error::custom),
            RawGrade::Number(value) => Grade::try_from(value).map_err(de::Error::custom),
        }
    }
}

// NUMERIC columns are selected as `::TEXT` and parsed here, which keeps the
// comparison exact without a decimal crate.
impl Type<Postgres> for Grade {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Grade {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<Postgres>>::decode(value)?;
        Ok(text.parse::<Grade>()?)
    }
}
