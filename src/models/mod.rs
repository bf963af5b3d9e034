// Model exports
pub mod catalog;
pub mod eligibility;
pub mod profile;
pub mod requests;
pub mod responses;

pub use catalog::{
    Application, ApplicationEligibility, Catalog, CatalogEntry, Exam, ExamEligibility,
    GovernmentEligibility, GovernmentScheme, Job, JobEligibility, Scholarship,
    ScholarshipEligibility,
};
pub use eligibility::{Allowed, Scalar};
pub use profile::{
    ApplicationProfile, ExamProfile, FormData, GovernmentProfile, JobProfile, ScholarshipProfile,
};
pub use requests::{
    FindMatchesRequest, LoginRequest, SaveDraftRequest, SaveOpportunityRequest, SignupRequest,
};
pub use responses::{
    CatalogSummary, DomainInfo, DraftResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
};
