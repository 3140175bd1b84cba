use std::collections::BTreeMap;
use std::time::Duration;

use lazy_static::lazy_static;

// Well-known labels and annotations
pub const APP_KUBERNETES_IO_NAME_KEY: &str = "app.kubernetes.io/name";
pub const AWS_LOAD_BALANCER_TYPE_ANNOTATION_KEY: &str = "service.beta.kubernetes.io/aws-load-balancer-type";
pub const NLB_LOAD_BALANCER_TYPE: &str = "nlb";

// Labels applied to everything the scenario creates
pub const SCENARIO_LABEL_KEY: &str = "cuc.io/scenario";
pub const SCENARIO_LABEL_VALUE: &str = "connectivity";
pub const SERVICE_SELECTOR_LABEL_KEY: &str = "role";
pub const SERVICE_SELECTOR_LABEL_VALUE: &str = "service-test";
pub const JOB_NAME_LABEL_KEY: &str = "job-name";

// The CNI add-on and its agent
pub const DEFAULT_ADDON_NAME: &str = "vpc-cni";
pub const CNI_DAEMONSET_NAME: &str = "aws-node";
pub const CNI_DAEMONSET_NAMESPACE: &str = "kube-system";
pub const CNI_CONTAINER_NAME: &str = "aws-node";

// Keep every test pod on the primary ENI while the scenario runs
pub const WARM_IP_TARGET_ENV_VAR: &str = "WARM_IP_TARGET";
pub const WARM_IP_TARGET_VALUE: &str = "3";
pub const WARM_ENI_TARGET_ENV_VAR: &str = "WARM_ENI_TARGET";
pub const WARM_ENI_TARGET_VALUE: &str = "0";

// Test workloads
pub const DEFAULT_TEST_NAMESPACE: &str = "default";
pub const HTTP_SERVER_DEPLOYMENT_NAME: &str = "http-server";
pub const HTTP_SERVER_CONTAINER_NAME: &str = "http-server";
pub const HTTP_SERVER_IMAGE: &str = "nginx:1.21.4";
pub const HTTP_SERVER_PORT: i32 = 80;
pub const TEST_SERVICE_NAME: &str = "test-service";
pub const TESTER_JOB_NAME: &str = "test-job";
pub const NEGATIVE_TESTER_JOB_NAME: &str = "negative-test-job";
pub const BUSYBOX_CONTAINER_NAME: &str = "busybox";
pub const BUSYBOX_IMAGE: &str = "busybox";
pub const UNREACHABLE_PORT: i32 = 2273;
pub const TESTER_TIMEOUT_SECONDS: u32 = 5;
pub const NEGATIVE_TESTER_TIMEOUT_SECONDS: u32 = 1;

// Scenario sizing
pub const DEFAULT_REPLICAS: i32 = 20;
pub const DEFAULT_TESTER_PARALLELISM: i32 = 20;
pub const DEFAULT_NEGATIVE_TESTER_PARALLELISM: i32 = 2;

// Timing
pub const POLL_INTERVAL_SHORT: Duration = Duration::from_secs(2);
pub const POLL_INTERVAL_MEDIUM: Duration = Duration::from_secs(5);
pub const POLL_INTERVAL_LONG: Duration = Duration::from_secs(20);
pub const DEFAULT_ADDON_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const DEFAULT_ROLLOUT_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_DEPLOYMENT_READY_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_SERVICE_SETTLE_TIME: Duration = POLL_INTERVAL_LONG;

lazy_static! {
    pub static ref CNI_ENV_OVERRIDES: BTreeMap<String, String> = BTreeMap::from([
        (WARM_IP_TARGET_ENV_VAR.into(), WARM_IP_TARGET_VALUE.into()),
        (WARM_ENI_TARGET_ENV_VAR.into(), WARM_ENI_TARGET_VALUE.into()),
    ]);
}
