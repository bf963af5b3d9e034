use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::eligibility::{lenient, wildcard, Allowed, Scalar};

/// One opportunity record. Display metadata is carried through untouched;
/// only `eligibility` (and the entry kind for applications and jobs) takes
/// part in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(
    serialize = "E: Serialize",
    deserialize = "E: serde::de::DeserializeOwned + Default"
))]
pub struct CatalogEntry<E> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// `college` / `internship` / `fellowship` for applications, exam type for exams.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(alias = "applicationLink", default, skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
    #[serde(alias = "deadline", default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient::block")]
    pub eligibility: E,
    /// Everything else (`amount`, `location`, `examDate`, ...), kept verbatim.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl<E: Default> CatalogEntry<E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            provider: None,
            institution: None,
            kind: None,
            job_type: None,
            apply_link: None,
            application_deadline: None,
            eligibility: E::default(),
            details: Map::new(),
        }
    }

    pub fn with_eligibility(mut self, eligibility: E) -> Self {
        self.eligibility = eligibility;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipEligibility {
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
    #[serde(default, with = "wildcard::general", skip_serializing_if = "Option::is_none")]
    pub categories: Option<Allowed>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_income: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_income: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub states: Option<Allowed>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub economic_status: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub disability: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub single_child: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar", skip_serializing_if = "Option::is_none")]
    pub minority: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentEligibility {
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub genders: Option<Allowed>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub job_status: Option<Allowed>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_income: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_income: Option<f64>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub states: Option<Allowed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEligibility {
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub passing_years: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEligibility {
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_experience: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_experience: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEligibility {
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bound", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Allowed>,
    #[serde(default, with = "wildcard::all", skip_serializing_if = "Option::is_none")]
    pub states: Option<Allowed>,
    #[serde(default, with = "wildcard::any", skip_serializing_if = "Option::is_none")]
    pub categories: Option<Allowed>,
}

pub type Scholarship = CatalogEntry<ScholarshipEligibility>;
pub type GovernmentScheme = CatalogEntry<GovernmentEligibility>;
pub type Exam = CatalogEntry<ExamEligibility>;
pub type Job = CatalogEntry<JobEligibility>;
pub type Application = CatalogEntry<ApplicationEligibility>;

/// The whole static catalog, one ordered collection per domain.
///
/// Missing collections parse as empty; unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub scholarships: Vec<Scholarship>,
    #[serde(default)]
    pub government: Vec<GovernmentScheme>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn total_entries(&self) -> usize {
        self.scholarships.len()
            + self.government.len()
            + self.exams.len()
            + self.jobs.len()
            + self.applications.len()
    }
}
