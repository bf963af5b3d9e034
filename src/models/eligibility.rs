use serde::{Deserialize, Serialize};

/// Allowed values for a set-membership constraint.
///
/// Catalog files spell "no restriction" as a magic member of the list
/// (`"all"`, `"any"` or `"general"` depending on the field). That member is
/// resolved into [`Allowed::Any`] once, when the catalog is parsed, so the
/// matcher never compares against sentinel strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allowed {
    Any,
    Only(Vec<String>),
}

impl Allowed {
    /// Build from the raw list; any occurrence of `wildcard` lifts the constraint.
    pub fn from_values(values: Vec<String>, wildcard: &str) -> Self {
        if values.iter().any(|value| value == wildcard) {
            Allowed::Any
        } else {
            Allowed::Only(values)
        }
    }

    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Allowed::Only(values.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Allowed::Any => true,
            Allowed::Only(values) => values.iter().any(|allowed| allowed == value),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Allowed::Any)
    }

    fn to_values(&self, wildcard: &str) -> Vec<String> {
        match self {
            Allowed::Any => vec![wildcard.to_string()],
            Allowed::Only(values) => values.clone(),
        }
    }
}

/// Single-valued flag constraint where `"any"` lifts the restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scalar {
    Any,
    Exactly(String),
}

impl Scalar {
    pub const WILDCARD: &'static str = "any";

    #[inline]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Scalar::Any => true,
            Scalar::Exactly(expected) => expected == value,
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        if value == Scalar::WILDCARD {
            Scalar::Any
        } else {
            Scalar::Exactly(value)
        }
    }
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Any => Scalar::WILDCARD.to_string(),
            Scalar::Exactly(value) => value,
        }
    }
}

/// Inclusive range check where either bound may be absent.
#[inline]
pub fn within_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    let below = min.is_some_and(|min| value < min);
    let above = max.is_some_and(|max| value > max);
    !(below || above)
}

/// Does an optional plain list (no wildcard) admit `value`? Absent lists admit everything.
#[inline]
pub fn listed(values: Option<&[String]>, value: &str) -> bool {
    values.map_or(true, |values| values.iter().any(|allowed| allowed == value))
}

/// Serde adapters for `Option<Allowed>` fields, one per wildcard spelling.
///
/// Use as `#[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]`.
pub mod wildcard {
    macro_rules! wildcard_list {
        ($name:ident, $token:literal) => {
            pub mod $name {
                use super::super::{lenient, Allowed};
                use serde::{Deserialize, Deserializer, Serialize, Serializer};
                use serde_json::Value;

                pub const TOKEN: &str = $token;

                pub fn serialize<S>(value: &Option<Allowed>, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    value
                        .as_ref()
                        .map(|allowed| allowed.to_values(TOKEN))
                        .serialize(serializer)
                }

                pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Allowed>, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let value = Value::deserialize(deserializer)?;
                    Ok(lenient::string_list(&value).map(|values| Allowed::from_values(values, TOKEN)))
                }
            }
        };
    }

    wildcard_list!(all, "all");
    wildcard_list!(any, "any");
    wildcard_list!(general, "general");
}

/// Tolerant readers for eligibility sub-fields.
///
/// A sub-field of the wrong JSON type is logged and read as absent, which
/// makes it non-constraining. One malformed entry never fails the catalog.
pub mod lenient {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::{Deserialize, Deserializer};
    use serde_json::{Number, Value};

    use super::Scalar;

    fn ignored(expected: &str, value: &Value) {
        tracing::warn!("Ignoring malformed eligibility value {} (expected {})", value, expected);
    }

    /// Range bound. Numeric strings such as `"21"` are accepted.
    pub fn bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let bound = match &value {
            Value::Null => None,
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        };

        if bound.is_none() && !value.is_null() {
            ignored("a number", &value);
        }
        Ok(bound)
    }

    /// Plain list whose members may be strings or numbers (years are
    /// sometimes written unquoted). Other members never match and are dropped.
    pub fn strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(string_list(&value))
    }

    pub fn scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Scalar::from(text))),
            other => {
                ignored("a string", &other);
                Ok(None)
            }
        }
    }

    /// Whole eligibility block; `null` or a non-object means no constraints.
    pub fn block<'de, D, E>(deserializer: D) -> Result<E, D::Error>
    where
        D: Deserializer<'de>,
        E: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(E::default()),
            value @ Value::Object(_) => E::deserialize(value).map_err(D::Error::custom),
            other => {
                ignored("an object", &other);
                Ok(E::default())
            }
        }
    }

    pub(crate) fn string_list(value: &Value) -> Option<Vec<String>> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        Value::Number(number) => Some(number_text(number)),
                        other => {
                            ignored("a string", other);
                            None
                        }
                    })
                    .collect(),
            ),
            other => {
                ignored("a list", other);
                None
            }
        }
    }

    // 2025.0 reads as "2025", the way the form submits it
    pub(crate) fn number_text(number: &Number) -> String {
        match number.as_f64() {
            Some(float) if number.is_f64() => float.to_string(),
            _ => number.to_string(),
        }
    }
}
