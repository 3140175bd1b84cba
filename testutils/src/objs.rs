use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::api::batch::v1 as batchv1;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::*;

use crate::constants::*;

fn test_meta(name: &str, generation: i64) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        namespace: Some(TEST_NAMESPACE.into()),
        name: Some(name.into()),
        generation: Some(generation),
        ..Default::default()
    }
}

#[fixture]
pub fn test_deployment(#[default(TEST_REPLICAS)] ready_replicas: i32) -> appsv1::Deployment {
    appsv1::Deployment {
        metadata: test_meta(TEST_DEPLOYMENT, 1),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(TEST_REPLICAS),
            ..Default::default()
        }),
        status: Some(appsv1::DeploymentStatus {
            observed_generation: Some(1),
            replicas: Some(TEST_REPLICAS),
            updated_replicas: Some(TEST_REPLICAS),
            ready_replicas: Some(ready_replicas),
            available_replicas: Some(ready_replicas),
            ..Default::default()
        }),
    }
}

// A daemonset that was just patched (generation 2) and whose controller has caught up to
// `observed_generation`, with `updated` of its 4 pods replaced.
#[fixture]
pub fn test_daemonset(#[default(2)] observed_generation: i64, #[default(4)] updated: i32) -> appsv1::DaemonSet {
    appsv1::DaemonSet {
        metadata: test_meta(TEST_DAEMONSET, 2),
        spec: Some(appsv1::DaemonSetSpec {
            template: corev1::PodTemplateSpec {
                spec: Some(corev1::PodSpec {
                    containers: vec![corev1::Container {
                        name: TEST_DAEMONSET_CONTAINER.into(),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }),
        status: Some(appsv1::DaemonSetStatus {
            observed_generation: Some(observed_generation),
            desired_number_scheduled: 4,
            current_number_scheduled: 4,
            updated_number_scheduled: Some(updated),
            number_available: Some(updated),
            ..Default::default()
        }),
    }
}

#[fixture]
pub fn test_service(#[default(TEST_CLUSTER_IP)] cluster_ip: &str) -> corev1::Service {
    corev1::Service {
        metadata: test_meta(TEST_SERVICE, 1),
        spec: Some(corev1::ServiceSpec {
            cluster_ip: Some(cluster_ip.into()),
            ports: Some(vec![corev1::ServicePort {
                port: TEST_SERVICE_PORT,
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[fixture]
pub fn test_job(#[default(2)] parallelism: i32, #[default(0)] succeeded: i32, #[default(0)] failed: i32) -> batchv1::Job {
    batchv1::Job {
        metadata: test_meta(TEST_JOB, 1),
        spec: Some(batchv1::JobSpec {
            parallelism: Some(parallelism),
            completions: Some(parallelism),
            ..Default::default()
        }),
        status: Some(batchv1::JobStatus {
            active: Some(parallelism - succeeded - failed),
            succeeded: Some(succeeded),
            failed: Some(failed),
            ..Default::default()
        }),
    }
}

pub fn with_job_condition(mut job: batchv1::Job, type_: &str) -> batchv1::Job {
    job.status.get_or_insert_default().conditions = Some(vec![batchv1::JobCondition {
        type_: type_.into(),
        status: "True".into(),
        ..Default::default()
    }]);
    job
}
