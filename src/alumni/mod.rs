//! Alumni profiles: generation, storage and bulk ingestion.

pub mod ingest;
pub mod profile;
pub mod store;

pub use ingest::{BulkIngestReport, UploadKind, ingest};
pub use profile::{
    AlumniProfile, FailedProfile, ProfileAssessment, ProfileGenerator, ProfileOutcome,
    ProfileStatus,
};
pub use store::{AlumniRecord, AlumniStore, RECENT_LIMIT};
