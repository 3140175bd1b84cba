use clap::Parser;

use super::*;
use crate::connectivity::*;

pub const INITIAL_VERSION: &str = "v1.19.6-eksbuild.1";
pub const FINAL_VERSION: &str = "v1.20.1-eksbuild.1";

// Everything polls without sleeping and gives up quickly, so a test that gets stuck fails instead
// of hanging
#[fixture]
pub fn opts() -> Options {
    Options::parse_from([
        "cuc-scenario",
        "--cluster-name",
        TEST_CLUSTER_NAME,
        "--initial-version",
        INITIAL_VERSION,
        "--final-version",
        FINAL_VERSION,
        "--namespace",
        TEST_NAMESPACE,
        "--poll-interval",
        "0s",
        "--addon-poll-interval",
        "0s",
        "--addon-timeout",
        "1s",
        "--rollout-timeout",
        "1s",
        "--deployment-timeout",
        "1s",
        "--job-timeout",
        "1s",
        "--delete-timeout",
        "1s",
        "--service-settle-time",
        "0s",
    ])
}

pub fn build_ctx(client: kube::Client, addons: MockAddonApi, opts: Options) -> ScenarioContext {
    ScenarioContext::new(client, Arc::new(addons), opts)
}

pub fn to_json<T: serde::Serialize>(obj: &T) -> serde_json::Value {
    serde_json::to_value(obj).unwrap()
}

pub fn deployments_path() -> String {
    format!("/apis/apps/v1/namespaces/{TEST_NAMESPACE}/deployments")
}

pub fn services_path() -> String {
    format!("/api/v1/namespaces/{TEST_NAMESPACE}/services")
}

pub fn jobs_path() -> String {
    format!("/apis/batch/v1/namespaces/{TEST_NAMESPACE}/jobs")
}

pub fn cni_daemonset_path() -> String {
    format!("/apis/apps/v1/namespaces/{CNI_DAEMONSET_NAMESPACE}/daemonsets/{CNI_DAEMONSET_NAME}")
}

pub fn ready_http_server(opts: &Options) -> appsv1::Deployment {
    let mut depl = build_http_server_deployment(opts);
    depl.status = Some(appsv1::DeploymentStatus {
        replicas: Some(opts.replicas),
        updated_replicas: Some(opts.replicas),
        ready_replicas: Some(opts.replicas),
        available_replicas: Some(opts.replicas),
        ..Default::default()
    });
    depl
}

pub fn assigned_service(opts: &Options, mode: ExposureMode, cluster_ip: &str) -> corev1::Service {
    let mut svc = build_test_service(opts, mode);
    svc.spec.get_or_insert_default().cluster_ip = Some(cluster_ip.into());
    svc
}

pub fn finished_job(mut job: batchv1::Job, succeeded: i32, failed: i32) -> batchv1::Job {
    job.status = Some(batchv1::JobStatus {
        succeeded: Some(succeeded),
        failed: Some(failed),
        ..Default::default()
    });
    job
}

// The real agent daemonset, already rolled out
pub fn cni_daemonset() -> appsv1::DaemonSet {
    let mut ds = test_daemonset(2, 4);
    ds.metadata.name = Some(CNI_DAEMONSET_NAME.into());
    ds.metadata.namespace = Some(CNI_DAEMONSET_NAMESPACE.into());
    if let Some(pod_spec) = ds.spec.as_mut().and_then(|s| s.template.spec.as_mut()) {
        pod_spec.containers[0].name = CNI_CONTAINER_NAME.into();
    }
    ds
}

// POSTs only match when the submitted object is exactly the expected one, which is how the two
// jobs (created at the same path) get told apart
pub fn handle_create_exact(
    fake_apiserver: &mut MockServerBuilder,
    path: String,
    expected: serde_json::Value,
    created: serde_json::Value,
) {
    fake_apiserver.handle(move |when, then| {
        when.method(httpmock::Method::POST).path(&path).json_body(expected.clone());
        then.status(201).json_body(created.clone());
    });
}

pub fn handle_create_error(fake_apiserver: &mut MockServerBuilder, path: String) {
    fake_apiserver.handle(move |when, then| {
        when.method(httpmock::Method::POST).path(&path);
        then.status(500).json_body(status_server_error());
    });
}

pub fn handle_create_conflict(fake_apiserver: &mut MockServerBuilder, path: String) {
    fake_apiserver.handle(move |when, then| {
        when.method(httpmock::Method::POST).path(&path);
        then.status(409).json_body(status_already_exists());
    });
}

pub fn handle_deleted(fake_apiserver: &mut MockServerBuilder, path: String) {
    fake_apiserver.handle_delete(path);
}
