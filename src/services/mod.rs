pub mod commit_submitter;
pub mod draft_stager;
pub mod failure_writer;

pub use commit_submitter::{CommitOutcome, CommitSubmitter};
pub use draft_stager::DraftStager;
pub use failure_writer::FailureWriter;
