mod daemonset_test;
mod manifest_test;

use std::time::Duration;

use cuc_testutils::*;
use rstest::*;
use tracing_test::traced_test;

use super::*;
use crate::poll::PollError;
use crate::prelude::*;

#[fixture]
fn fast_poll() -> PollPolicy {
    PollPolicy::new(Duration::ZERO, Duration::from_secs(1))
}

// Gives up after the first attempt
#[fixture]
fn no_wait() -> PollPolicy {
    PollPolicy::new(Duration::from_secs(1), Duration::ZERO)
}

fn deployments_path() -> String {
    format!("/apis/apps/v1/namespaces/{TEST_NAMESPACE}/deployments")
}

fn daemonset_path() -> String {
    format!("/apis/apps/v1/namespaces/{TEST_NAMESPACE}/daemonsets/{TEST_DAEMONSET}")
}

fn services_path() -> String {
    format!("/api/v1/namespaces/{TEST_NAMESPACE}/services")
}

fn jobs_path() -> String {
    format!("/apis/batch/v1/namespaces/{TEST_NAMESPACE}/jobs")
}

fn to_json<T: serde::Serialize>(obj: &T) -> serde_json::Value {
    serde_json::to_value(obj).unwrap()
}
