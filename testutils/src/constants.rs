pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_CLUSTER_NAME: &str = "test-cluster";
pub const TEST_DEPLOYMENT: &str = "the-deployment";
pub const TEST_DAEMONSET: &str = "the-daemonset";
pub const TEST_DAEMONSET_CONTAINER: &str = "the-agent";
pub const TEST_SERVICE: &str = "the-service";
pub const TEST_JOB: &str = "the-job";
pub const TEST_CLUSTER_IP: &str = "10.100.42.17";
pub const TEST_SERVICE_PORT: i32 = 80;
pub const TEST_REPLICAS: i32 = 3;
