mod nullable;

mod listing;
pub use listing::{JobGroupListing, JobInfoListing, Listing};

mod job_info;
pub use job_info::JobInfo;

mod job_group;
pub use job_group::JobGroup;

mod job_state;
pub use job_state::JobState;

/// Numeric identifier of a job on the appliance.
pub type JobId = u64;
