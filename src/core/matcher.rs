use crate::core::domain::{Domain, FormError};
use crate::models::{Catalog, CatalogEntry, FormData};

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult<E> {
    /// Matched entries, in catalog order
    pub matches: Vec<CatalogEntry<E>>,
    pub total_candidates: usize,
}

impl<E> MatchResult<E> {
    pub fn total_results(&self) -> usize {
        self.matches.len()
    }
}

/// A validated submission: the normalized profile and what it matched
#[derive(Debug, Clone)]
pub struct Submission<D: Domain> {
    pub profile: D::Profile,
    pub result: MatchResult<D::Eligibility>,
}

/// Runs the submission pipeline for any domain
///
/// # Pipeline Stages
/// 1. Required-field validation
/// 2. Profile normalization
/// 3. Single linear eligibility pass over the domain's collection
///
/// The pass is a stable filter: no scoring, no re-ordering, and the catalog
/// itself is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Filter `entries` down to those the profile is eligible for
    pub fn find_matches<D: Domain>(
        &self,
        profile: &D::Profile,
        entries: &[CatalogEntry<D::Eligibility>],
    ) -> MatchResult<D::Eligibility> {
        let matches: Vec<_> = entries
            .iter()
            .filter(|entry| D::is_eligible(profile, entry))
            .cloned()
            .collect();

        tracing::debug!(
            domain = %D::KIND,
            matched = matches.len(),
            candidates = entries.len(),
            "eligibility pass complete"
        );

        MatchResult {
            matches,
            total_candidates: entries.len(),
        }
    }

    /// Validate and normalize a raw form, then match it against the catalog
    pub fn submit<D: Domain>(
        &self,
        form: &FormData,
        catalog: &Catalog,
    ) -> Result<Submission<D>, FormError> {
        let profile = D::profile(form)?;
        let result = self.find_matches::<D>(&profile, D::entries(catalog));
        Ok(Submission { profile, result })
    }
}
