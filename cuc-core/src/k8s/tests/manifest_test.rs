use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::*;

#[rstest]
fn test_busybox_container_defaults() {
    let container = ContainerBuilder::busybox().build();
    assert_eq!(container.name, BUSYBOX_CONTAINER_NAME);
    assert_eq!(container.image.as_deref(), Some(BUSYBOX_IMAGE));
    assert_eq!(container.command, Some(vec!["sleep".to_string(), "3600".to_string()]));
    assert_eq!(container.ports, None);
}

#[rstest]
fn test_http_server_container() {
    let container = ContainerBuilder::busybox()
        .name(HTTP_SERVER_CONTAINER_NAME)
        .image(HTTP_SERVER_IMAGE)
        .command(None)
        .port(HTTP_SERVER_PORT, "TCP")
        .build();
    assert_eq!(container.image.as_deref(), Some(HTTP_SERVER_IMAGE));
    assert_eq!(container.command, None);
    assert_eq!(container.ports.unwrap()[0].container_port, HTTP_SERVER_PORT);
}

#[rstest]
fn test_deployment_builder() {
    let depl = DeploymentBuilder::new(TEST_NAMESPACE)
        .name(HTTP_SERVER_DEPLOYMENT_NAME)
        .replicas(DEFAULT_REPLICAS)
        .pod_label(SERVICE_SELECTOR_LABEL_KEY, SERVICE_SELECTOR_LABEL_VALUE)
        .build();

    assert_eq!(depl.namespaced_name(), format!("{TEST_NAMESPACE}/{HTTP_SERVER_DEPLOYMENT_NAME}"));
    let spec = depl.spec.unwrap();
    assert_eq!(spec.replicas, Some(DEFAULT_REPLICAS));

    let pod_labels = spec.template.metadata.unwrap().labels.unwrap();
    assert_eq!(spec.selector.match_labels.unwrap(), pod_labels);
    assert_eq!(pod_labels.get(SERVICE_SELECTOR_LABEL_KEY).unwrap(), SERVICE_SELECTOR_LABEL_VALUE);
    assert_eq!(pod_labels.get(SCENARIO_LABEL_KEY).unwrap(), SCENARIO_LABEL_VALUE);
    assert_eq!(spec.template.spec.unwrap().termination_grace_period_seconds, Some(0));
}

#[rstest]
fn test_service_builder() {
    let annotations = BTreeMap::from([(AWS_LOAD_BALANCER_TYPE_ANNOTATION_KEY.to_string(), "nlb".to_string())]);
    let svc = ServiceBuilder::http(TEST_NAMESPACE)
        .service_type("LoadBalancer")
        .selector(SERVICE_SELECTOR_LABEL_KEY, SERVICE_SELECTOR_LABEL_VALUE)
        .annotations(&annotations)
        .build();

    assert_eq!(svc.name_any(), TEST_SERVICE_NAME);
    assert_eq!(svc.metadata.annotations, Some(annotations));
    let spec = svc.spec.unwrap();
    assert_eq!(spec.type_.as_deref(), Some("LoadBalancer"));
    assert_eq!(
        spec.selector.unwrap(),
        BTreeMap::from([(SERVICE_SELECTOR_LABEL_KEY.to_string(), SERVICE_SELECTOR_LABEL_VALUE.to_string())])
    );
    let port = &spec.ports.unwrap()[0];
    assert_eq!(port.port, HTTP_SERVER_PORT);
    assert_eq!(port.target_port, Some(IntOrString::Int(HTTP_SERVER_PORT)));
}

#[rstest]
fn test_service_builder_no_annotations() {
    let svc = ServiceBuilder::http(TEST_NAMESPACE).build();
    assert_eq!(svc.metadata.annotations, None);
    assert_eq!(svc.spec.unwrap().type_.as_deref(), Some("ClusterIP"));
}

#[rstest]
fn test_job_builder() {
    let job = JobBuilder::new(TEST_NAMESPACE)
        .name(NEGATIVE_TESTER_JOB_NAME)
        .parallelism(DEFAULT_NEGATIVE_TESTER_PARALLELISM)
        .build();

    assert_eq!(job.name_any(), NEGATIVE_TESTER_JOB_NAME);
    let spec = job.spec.unwrap();
    assert_eq!(spec.parallelism, Some(DEFAULT_NEGATIVE_TESTER_PARALLELISM));
    assert_eq!(spec.completions, Some(DEFAULT_NEGATIVE_TESTER_PARALLELISM));
    assert_eq!(spec.backoff_limit, Some(0));
    assert_eq!(spec.template.spec.unwrap().restart_policy.as_deref(), Some("Never"));
}
