use cuc_core::errors::*;

err_impl! {ScenarioError,
    #[error("connectivity job failed: {0}")]
    ConnectivityJobFailed(String),

    #[error("job against an unreachable port succeeded: {0}")]
    UnexpectedJobSuccess(String),

    #[error("teardown failed: {0}")]
    TeardownFailed(String),

    #[error("resources left behind after the run: {0}")]
    LeakedResources(String),

    #[error("connectivity sub-tests failed: {0}")]
    SubtestsFailed(String),
}
