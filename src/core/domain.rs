use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::filters::{
    matches_application, matches_exam, matches_government, matches_job, matches_scholarship,
};
use super::normalize::{experience_years, parse_age, parse_income_bracket};
use crate::models::{
    ApplicationEligibility, ApplicationProfile, Catalog, CatalogEntry, ExamEligibility,
    ExamProfile, FormData, GovernmentEligibility, GovernmentProfile, JobEligibility, JobProfile,
    ScholarshipEligibility, ScholarshipProfile,
};

/// Errors raised while turning a submitted form into a profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// The five opportunity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    Scholarships,
    Government,
    Exams,
    Jobs,
    Applications,
}

#[derive(Debug, Error)]
#[error("unknown domain: {0}")]
pub struct UnknownDomain(pub String);

impl DomainKind {
    pub const ALL: [DomainKind; 5] = [
        DomainKind::Scholarships,
        DomainKind::Government,
        DomainKind::Exams,
        DomainKind::Jobs,
        DomainKind::Applications,
    ];

    /// URL slug, also the top-level key of the catalog file
    pub fn catalog_key(self) -> &'static str {
        match self {
            DomainKind::Scholarships => "scholarships",
            DomainKind::Government => "government",
            DomainKind::Exams => "exams",
            DomainKind::Jobs => "jobs",
            DomainKind::Applications => "applications",
        }
    }

    /// Prefix of the per-form storage keys (`scholarshipFormDraft`, ...)
    pub fn form_prefix(self) -> &'static str {
        match self {
            DomainKind::Scholarships => "scholarship",
            other => other.catalog_key(),
        }
    }

    pub fn draft_key(self) -> String {
        format!("{}FormDraft", self.form_prefix())
    }

    /// Key holding the last successfully submitted form
    pub fn submission_key(self) -> String {
        format!("{}FormData", self.form_prefix())
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            DomainKind::Scholarships => Scholarships::REQUIRED_FIELDS,
            DomainKind::Government => Government::REQUIRED_FIELDS,
            DomainKind::Exams => Exams::REQUIRED_FIELDS,
            DomainKind::Jobs => Jobs::REQUIRED_FIELDS,
            DomainKind::Applications => Applications::REQUIRED_FIELDS,
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_key())
    }
}

impl FromStr for DomainKind {
    type Err = UnknownDomain;

    /// Accepts the catalog key or the form prefix, case-insensitively
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        DomainKind::ALL
            .into_iter()
            .find(|kind| kind.catalog_key() == wanted || kind.form_prefix() == wanted)
            .ok_or_else(|| UnknownDomain(value.to_string()))
    }
}

/// Per-domain configuration of the submission pipeline: which fields are
/// required, how the raw form becomes a profile, which catalog collection to
/// read and how one entry is judged.
pub trait Domain {
    type Profile: Serialize + Clone + fmt::Debug;
    type Eligibility: Serialize + DeserializeOwned + Default + Clone + fmt::Debug;

    const KIND: DomainKind;
    const REQUIRED_FIELDS: &'static [&'static str];

    fn normalize(form: &FormData) -> Self::Profile;

    fn is_eligible(profile: &Self::Profile, entry: &CatalogEntry<Self::Eligibility>) -> bool;

    fn entries(catalog: &Catalog) -> &[CatalogEntry<Self::Eligibility>];

    /// Report every blank required field, not just the first
    fn validate(form: &FormData) -> Result<(), FormError> {
        let missing = form.missing(Self::REQUIRED_FIELDS);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    fn profile(form: &FormData) -> Result<Self::Profile, FormError> {
        Self::validate(form)?;
        Ok(Self::normalize(form))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scholarships;

#[derive(Debug, Clone, Copy)]
pub struct Government;

#[derive(Debug, Clone, Copy)]
pub struct Exams;

#[derive(Debug, Clone, Copy)]
pub struct Jobs;

#[derive(Debug, Clone, Copy)]
pub struct Applications;

impl Domain for Scholarships {
    type Profile = ScholarshipProfile;
    type Eligibility = ScholarshipEligibility;

    const KIND: DomainKind = DomainKind::Scholarships;
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "age",
        "gender",
        "state",
        "category",
        "disability",
        "singleChild",
        "minority",
        "qualification",
        "income",
        "economicStatus",
    ];

    fn normalize(form: &FormData) -> ScholarshipProfile {
        ScholarshipProfile {
            age: parse_age(&form.text("age")),
            gender: form.text("gender"),
            state: form.text("state"),
            category: form.text("category"),
            disability: form.text("disability"),
            single_child: form.text("singleChild"),
            minority: form.text("minority"),
            qualification: form.text("qualification"),
            income: parse_income_bracket(&form.text("income")),
            economic_status: form.text("economicStatus"),
        }
    }

    fn is_eligible(profile: &ScholarshipProfile, entry: &CatalogEntry<ScholarshipEligibility>) -> bool {
        matches_scholarship(profile, entry)
    }

    fn entries(catalog: &Catalog) -> &[CatalogEntry<ScholarshipEligibility>] {
        &catalog.scholarships
    }
}

impl Domain for Government {
    type Profile = GovernmentProfile;
    type Eligibility = GovernmentEligibility;

    const KIND: DomainKind = DomainKind::Government;
    // The form's job-status select has the id "job"
    const REQUIRED_FIELDS: &'static [&'static str] = &["age", "gender", "job", "state", "income"];

    fn normalize(form: &FormData) -> GovernmentProfile {
        GovernmentProfile {
            age: parse_age(&form.text("age")),
            gender: form.text("gender"),
            job_status: form.text("job"),
            state: form.text("state"),
            income: parse_income_bracket(&form.text("income")),
        }
    }

    fn is_eligible(profile: &GovernmentProfile, entry: &CatalogEntry<GovernmentEligibility>) -> bool {
        matches_government(profile, entry)
    }

    fn entries(catalog: &Catalog) -> &[CatalogEntry<GovernmentEligibility>] {
        &catalog.government
    }
}

impl Domain for Exams {
    type Profile = ExamProfile;
    type Eligibility = ExamEligibility;

    const KIND: DomainKind = DomainKind::Exams;
    const REQUIRED_FIELDS: &'static [&'static str] = &["age", "course", "passingYear", "stream"];

    fn normalize(form: &FormData) -> ExamProfile {
        ExamProfile {
            age: parse_age(&form.text("age")),
            course: form.text("course"),
            passing_year: form.text("passingYear"),
            stream: form.text("stream"),
        }
    }

    fn is_eligible(profile: &ExamProfile, entry: &CatalogEntry<ExamEligibility>) -> bool {
        matches_exam(profile, entry)
    }

    fn entries(catalog: &Catalog) -> &[CatalogEntry<ExamEligibility>] {
        &catalog.exams
    }
}

impl Domain for Jobs {
    type Profile = JobProfile;
    type Eligibility = JobEligibility;

    const KIND: DomainKind = DomainKind::Jobs;
    const REQUIRED_FIELDS: &'static [&'static str] = &["age", "qualification", "experience"];

    fn normalize(form: &FormData) -> JobProfile {
        let experience = form.text("experience");
        JobProfile {
            age: parse_age(&form.text("age")),
            qualification: form.text("qualification"),
            experience_years: experience_years(&experience),
            experience,
            work_type: form.optional("workType"),
            skills: form.optional("skills"),
            location: form.optional("location"),
            salary: form.optional("salary"),
        }
    }

    fn is_eligible(profile: &JobProfile, entry: &CatalogEntry<JobEligibility>) -> bool {
        matches_job(profile, entry)
    }

    fn entries(catalog: &Catalog) -> &[CatalogEntry<JobEligibility>] {
        &catalog.jobs
    }
}

impl Domain for Applications {
    type Profile = ApplicationProfile;
    type Eligibility = ApplicationEligibility;

    const KIND: DomainKind = DomainKind::Applications;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["age", "qualification", "field", "state", "category", "gender"];

    fn normalize(form: &FormData) -> ApplicationProfile {
        ApplicationProfile {
            age: parse_age(&form.text("age")),
            application_type: form.optional("applicationType"),
            qualification: form.text("qualification"),
            field: form.text("field"),
            state: form.text("state"),
            category: form.text("category"),
            gender: form.text("gender"),
        }
    }

    fn is_eligible(profile: &ApplicationProfile, entry: &CatalogEntry<ApplicationEligibility>) -> bool {
        matches_application(profile, entry)
    }

    fn entries(catalog: &Catalog) -> &[CatalogEntry<ApplicationEligibility>] {
        &catalog.applications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_keys() {
        assert_eq!(DomainKind::Scholarships.draft_key(), "scholarshipFormDraft");
        assert_eq!(DomainKind::Government.draft_key(), "governmentFormDraft");
        assert_eq!(DomainKind::Exams.draft_key(), "examsFormDraft");
        assert_eq!(DomainKind::Jobs.submission_key(), "jobsFormData");
        assert_eq!(DomainKind::Applications.catalog_key(), "applications");
    }

    #[test]
    fn test_parse_domain() {
        assert_eq!("scholarships".parse::<DomainKind>().unwrap(), DomainKind::Scholarships);
        assert_eq!("Scholarship".parse::<DomainKind>().unwrap(), DomainKind::Scholarships);
        assert_eq!("jobs".parse::<DomainKind>().unwrap(), DomainKind::Jobs);
        assert!("housing".parse::<DomainKind>().is_err());
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        let form: FormData = [("age", "19"), ("course", "btech")].into_iter().collect();
        assert_eq!(
            Exams::validate(&form),
            Err(FormError::MissingFields(vec![
                "passingYear".to_string(),
                "stream".to_string()
            ]))
        );
    }

    #[test]
    fn test_government_normalize() {
        let form: FormData = [
            ("age", "45"),
            ("gender", "female"),
            ("job", "unemployed"),
            ("state", "bihar"),
            ("income", "abc"),
        ]
        .into_iter()
        .collect();

        let profile = Government::profile(&form).unwrap();
        assert_eq!(profile.job_status, "unemployed");
        assert_eq!(profile.income, 0);
    }

    #[test]
    fn test_jobs_normalize_optional_fields() {
        let form: FormData = [
            ("age", "25"),
            ("qualification", "graduate"),
            ("experience", "10+"),
            ("workType", " "),
        ]
        .into_iter()
        .collect();

        let profile = Jobs::profile(&form).unwrap();
        assert_eq!(profile.experience_years, 10.0);
        assert_eq!(profile.work_type, None);
    }
}
