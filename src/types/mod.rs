pub mod job;

pub use job::{Application, ApplicationFields, Job, JobFields, SearchQuery};
