// Core algorithm exports
pub mod domain;
pub mod filters;
pub mod matcher;
pub mod normalize;

pub use domain::{
    Applications, Domain, DomainKind, Exams, FormError, Government, Jobs, Scholarships,
    UnknownDomain,
};
pub use filters::{
    matches_application, matches_exam, matches_government, matches_job, matches_scholarship,
};
pub use matcher::{MatchResult, Matcher, Submission};
pub use normalize::{experience_years, parse_age, parse_income_bracket};
