/// State of the last recent run of a job.
///
/// The Director reports it as an upper-case string; anything outside the
/// known set is kept as [`JobState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Ok,
    WaitingDemand,
    WaitingSchedule,
    Running,
    Failed,
    Stopped,
    Unknown,
}

impl JobState {
    /// Returns `true` if the job is in good standing (succeeded, idle or running).
    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            JobState::Ok | JobState::WaitingDemand | JobState::WaitingSchedule | JobState::Running
        )
    }
}

impl From<&str> for JobState {
    fn from(s: &str) -> Self {
        match s {
            "OK" => JobState::Ok,
            "WAITING_DEMAND" => JobState::WaitingDemand,
            "WAITING_SCHEDULE" => JobState::WaitingSchedule,
            "RUNNING" => JobState::Running,
            "FAILED" => JobState::Failed,
            "STOPPED" => JobState::Stopped,
            _ => JobState::Unknown,
        }
    }
}
