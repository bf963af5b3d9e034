//! Opportunity Finder - eligibility matching for students and job seekers
//!
//! Matches a visitor's form answers against a static catalog of scholarships,
//! government schemes, entrance exams, jobs and applications. Each domain
//! normalizes its form into a typed profile and keeps the catalog entries
//! whose eligibility block admits that profile, in catalog order.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Domain, DomainKind, FormError, MatchResult, Matcher};
pub use crate::models::{Catalog, CatalogEntry, FindMatchesRequest, FindMatchesResponse, FormData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let form: FormData = [("age", "21"), ("course", "btech")].into_iter().collect();
        assert_eq!(form.missing(DomainKind::Exams.required_fields()).len(), 2);
    }
}
