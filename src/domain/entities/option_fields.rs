use serde::{Deserialize, Deserializer};

/// Represents optional field semantics in PATCH requests.
///
/// - `Unchanged` → field absent from the body
/// - `SetToNull` → field present as `null`
/// - `SetToValue` → field present with a value
///
/// Fields must carry `#[serde(default)]` so that absence maps to `Unchanged`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    pub fn as_ref(&self) -> OptionField<&T> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(v),
        }
    }

    pub fn map_value<U, F: FnOnce(T) -> U>(self, f: F) -> OptionField<U> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)),
        }
    }

    /// Split into the `(touched, value)` pair bound into `CASE WHEN` updates.
    pub fn into_update(self) -> (bool, Option<T>) {
        match self {
            Self::Unchanged => (false, None),
            Self::SetToNull => (true, None),
            Self::SetToValue(v) => (true, Some(v)),
        }
    }

    /// Applies the change to an in-memory value.
    pub fn apply_to(self, target: &mut Option<T>) {
        if let Some(value) = self.into_option() {
            *target = value;
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}
