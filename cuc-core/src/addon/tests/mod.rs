
use std::time::Duration;

use rstest::*;
use tracing_test::traced_test;

use super::*;
use crate::poll::PollPolicy;

const TEST_ADDON: &str = "vpc-cni";
const TEST_CLUSTER: &str = "test-cluster";
const INITIAL_VERSION: &str = "v1.10.1-eksbuild.1";
const FINAL_VERSION: &str = "v1.11.0-eksbuild.1";

fn addon_at(version: &str, status: AddonStatus) -> AddonDescription {
    AddonDescription {
        name: TEST_ADDON.into(),
        version: Some(version.into()),
        status,
    }
}

#[fixture]
fn fast_poll() -> PollPolicy {
    PollPolicy::new(Duration::ZERO, Duration::from_secs(1))
}
