use crate::models::eligibility::{listed, within_bounds, Allowed, Scalar};
use crate::models::{
    Application, ApplicationProfile, Exam, ExamProfile, GovernmentProfile, GovernmentScheme, Job,
    JobProfile, Scholarship, ScholarshipProfile,
};

// Absent eligibility fields never disqualify. Present-but-empty lists admit nothing.

#[inline]
fn admitted(allowed: Option<&Allowed>, value: &str) -> bool {
    allowed.map_or(true, |allowed| allowed.admits(value))
}

#[inline]
fn flag_admitted(flag: Option<&Scalar>, value: &str) -> bool {
    flag.map_or(true, |flag| flag.admits(value))
}

/// Check a scholarship against a profile
#[inline]
pub fn matches_scholarship(profile: &ScholarshipProfile, entry: &Scholarship) -> bool {
    let eligibility = &entry.eligibility;

    // Check age
    if !within_bounds(profile.age as f64, eligibility.min_age, eligibility.max_age) {
        return false;
    }

    // Check category ("general" opens the scholarship to every category)
    if !admitted(eligibility.categories.as_ref(), &profile.category) {
        return false;
    }

    // Check income
    if !within_bounds(profile.income as f64, eligibility.min_income, eligibility.max_income) {
        return false;
    }

    if !listed(eligibility.qualifications.as_deref(), &profile.qualification) {
        return false;
    }

    if !admitted(eligibility.states.as_ref(), &profile.state) {
        return false;
    }

    if !listed(eligibility.economic_status.as_deref(), &profile.economic_status) {
        return false;
    }

    // Disability, single child and minority flags
    flag_admitted(eligibility.disability.as_ref(), &profile.disability)
        && flag_admitted(eligibility.single_child.as_ref(), &profile.single_child)
        && flag_admitted(eligibility.minority.as_ref(), &profile.minority)
}

/// Check a government scheme against a profile
#[inline]
pub fn matches_government(profile: &GovernmentProfile, entry: &GovernmentScheme) -> bool {
    let eligibility = &entry.eligibility;

    within_bounds(profile.age as f64, eligibility.min_age, eligibility.max_age)
        && admitted(eligibility.genders.as_ref(), &profile.gender)
        && admitted(eligibility.job_status.as_ref(), &profile.job_status)
        && within_bounds(profile.income as f64, eligibility.min_income, eligibility.max_income)
        && admitted(eligibility.states.as_ref(), &profile.state)
}

/// Check an entrance exam against a profile
#[inline]
pub fn matches_exam(profile: &ExamProfile, entry: &Exam) -> bool {
    let eligibility = &entry.eligibility;

    within_bounds(profile.age as f64, eligibility.min_age, eligibility.max_age)
        && listed(eligibility.courses.as_deref(), &profile.course)
        && listed(eligibility.streams.as_deref(), &profile.stream)
        && listed(eligibility.passing_years.as_deref(), &profile.passing_year)
}

/// Check a job posting against a profile
#[inline]
pub fn matches_job(profile: &JobProfile, entry: &Job) -> bool {
    let eligibility = &entry.eligibility;

    if !within_bounds(profile.age as f64, eligibility.min_age, eligibility.max_age) {
        return false;
    }

    if !listed(eligibility.qualifications.as_deref(), &profile.qualification) {
        return false;
    }

    // Experience is compared through its representative years, not the label
    if !within_bounds(
        profile.experience_years,
        eligibility.min_experience,
        eligibility.max_experience,
    ) {
        return false;
    }

    // Work type only filters when the visitor picked one
    match profile.work_type.as_deref() {
        Some(work_type) => entry.job_type.as_deref() == Some(work_type),
        None => true,
    }
}

/// Check a college/internship/fellowship application against a profile
#[inline]
pub fn matches_application(profile: &ApplicationProfile, entry: &Application) -> bool {
    let eligibility = &entry.eligibility;

    if let Some(application_type) = profile.application_type.as_deref() {
        if entry.kind.as_deref() != Some(application_type) {
            return false;
        }
    }

    within_bounds(profile.age as f64, eligibility.min_age, eligibility.max_age)
        && listed(eligibility.qualifications.as_deref(), &profile.qualification)
        && admitted(eligibility.fields.as_ref(), &profile.field)
        && admitted(eligibility.states.as_ref(), &profile.state)
        && admitted(eligibility.categories.as_ref(), &profile.category)
}
