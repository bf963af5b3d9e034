use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::eligibility::lenient::number_text;

/// Raw form answers, field id -> submitted string.
///
/// This is the unit that gets auto-saved as a draft and submitted for
/// matching; profiles are normalized from it on every submission. JSON
/// clients may send numbers and booleans; they are kept as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>", into = "BTreeMap<String, String>")]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Trimmed value, empty string when missing.
    pub fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// Required fields that are missing or blank, in the order given.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|field| self.get(field).is_none())
            .map(|field| field.to_string())
            .collect()
    }

    /// Percentage (0-100) of required fields that are filled in.
    pub fn progress(&self, required: &[&str]) -> u8 {
        if required.is_empty() {
            return 100;
        }
        let filled = required.len() - self.missing(required).len();
        ((filled * 100) / required.len()) as u8
    }

    /// Drop blank values; restoring a draft only ever fills non-empty fields.
    pub fn filled(&self) -> FormData {
        self.0
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl TryFrom<BTreeMap<String, Value>> for FormData {
    type Error = String;

    fn try_from(fields: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        let mut form = FormData::new();
        for (field, value) in fields {
            let text = match value {
                // null is an unanswered field
                Value::Null => continue,
                Value::String(text) => text,
                Value::Number(number) => number_text(&number),
                Value::Bool(flag) => flag.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("field `{}` must be a string, number or boolean", field));
                }
            };
            form.0.insert(field, text);
        }
        Ok(form)
    }
}

impl From<FormData> for BTreeMap<String, String> {
    fn from(form: FormData) -> Self {
        form.0
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipProfile {
    pub age: u32,
    pub gender: String,
    pub state: String,
    pub category: String,
    pub disability: String,
    pub single_child: String,
    pub minority: String,
    pub qualification: String,
    /// Lower bound of the selected income bracket.
    pub income: u64,
    pub economic_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentProfile {
    pub age: u32,
    pub gender: String,
    pub job_status: String,
    pub state: String,
    pub income: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamProfile {
    pub age: u32,
    pub course: String,
    pub passing_year: String,
    pub stream: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfile {
    pub age: u32,
    pub qualification: String,
    /// Experience label as submitted (`fresher`, `2-3`, `10+`, ...).
    pub experience: String,
    /// Representative years for `experience`.
    pub experience_years: f64,
    pub work_type: Option<String>,
    pub skills: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfile {
    pub age: u32,
    pub application_type: Option<String>,
    pub qualification: String,
    pub field: String,
    pub state: String,
    pub category: String,
    pub gender: String,
}
