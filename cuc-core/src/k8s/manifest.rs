//! Builders for the throwaway workloads the connectivity checks run.  Every builder starts out
//! with sensible defaults, so callers only have to spell out what differs.
use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::*;
use crate::prelude::*;

const BUSYBOX_SLEEP_COMMAND: [&str; 2] = ["sleep", "3600"];
const DEFAULT_DEPLOYMENT_NAME: &str = "deployment-test";
const DEFAULT_DEPLOYMENT_REPLICAS: i32 = 10;
const DEFAULT_JOB_PARALLELISM: i32 = 1;

#[derive(Clone, Debug)]
pub struct ContainerBuilder {
    name: String,
    image: String,
    command: Option<Vec<String>>,
    args: Option<Vec<String>>,
    ports: Vec<corev1::ContainerPort>,
}

impl ContainerBuilder {
    pub fn busybox() -> ContainerBuilder {
        ContainerBuilder {
            name: BUSYBOX_CONTAINER_NAME.into(),
            image: BUSYBOX_IMAGE.into(),
            command: Some(BUSYBOX_SLEEP_COMMAND.iter().map(|s| s.to_string()).collect()),
            args: None,
            ports: vec![],
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = image.into();
        self
    }

    // None falls back to the image's entrypoint
    pub fn command(mut self, command: Option<Vec<String>>) -> Self {
        self.command = command;
        self
    }

    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn port(mut self, port: i32, protocol: &str) -> Self {
        self.ports.push(corev1::ContainerPort {
            container_port: port,
            protocol: Some(protocol.into()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> corev1::Container {
        corev1::Container {
            name: self.name,
            image: Some(self.image),
            image_pull_policy: Some("IfNotPresent".into()),
            command: self.command,
            args: self.args,
            ports: (!self.ports.is_empty()).then_some(self.ports),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct DeploymentBuilder {
    name: String,
    namespace: String,
    replicas: i32,
    container: corev1::Container,
    pod_labels: BTreeMap<String, String>,
}

impl DeploymentBuilder {
    pub fn new(namespace: &str) -> DeploymentBuilder {
        DeploymentBuilder {
            name: DEFAULT_DEPLOYMENT_NAME.into(),
            namespace: namespace.into(),
            replicas: DEFAULT_DEPLOYMENT_REPLICAS,
            container: ContainerBuilder::busybox().build(),
            pod_labels: BTreeMap::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn container(mut self, container: corev1::Container) -> Self {
        self.container = container;
        self
    }

    pub fn pod_label(mut self, key: &str, value: &str) -> Self {
        self.pod_labels.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> appsv1::Deployment {
        let mut pod_labels = self.pod_labels;
        pod_labels.insert(APP_KUBERNETES_IO_NAME_KEY.into(), self.name.clone());
        pod_labels.insert(SCENARIO_LABEL_KEY.into(), SCENARIO_LABEL_VALUE.into());

        appsv1::Deployment {
            metadata: build_object_meta(&self.namespace, &self.name),
            spec: Some(appsv1::DeploymentSpec {
                replicas: Some(self.replicas),
                selector: metav1::LabelSelector {
                    match_labels: Some(pod_labels.clone()),
                    ..Default::default()
                },
                template: corev1::PodTemplateSpec {
                    metadata: Some(metav1::ObjectMeta {
                        labels: Some(pod_labels),
                        ..Default::default()
                    }),
                    spec: Some(corev1::PodSpec {
                        containers: vec![self.container],
                        termination_grace_period_seconds: Some(0),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceBuilder {
    name: String,
    namespace: String,
    type_: String,
    port: i32,
    target_port: i32,
    selector: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

impl ServiceBuilder {
    // A plain HTTP service on port 80, forwarding to port 80 on the selected pods
    pub fn http(namespace: &str) -> ServiceBuilder {
        ServiceBuilder {
            name: TEST_SERVICE_NAME.into(),
            namespace: namespace.into(),
            type_: "ClusterIP".into(),
            port: HTTP_SERVER_PORT,
            target_port: HTTP_SERVER_PORT,
            selector: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn service_type(mut self, type_: &str) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn selector(mut self, key: &str, value: &str) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    pub fn annotations(mut self, annotations: &BTreeMap<String, String>) -> Self {
        self.annotations.extend(annotations.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn build(self) -> corev1::Service {
        let mut metadata = build_object_meta(&self.namespace, &self.name);
        if !self.annotations.is_empty() {
            metadata.annotations = Some(self.annotations);
        }

        corev1::Service {
            metadata,
            spec: Some(corev1::ServiceSpec {
                type_: Some(self.type_),
                selector: Some(self.selector),
                ports: Some(vec![corev1::ServicePort {
                    port: self.port,
                    target_port: Some(IntOrString::Int(self.target_port)),
                    protocol: Some("TCP".into()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct JobBuilder {
    name: String,
    namespace: String,
    parallelism: i32,
    container: corev1::Container,
}

impl JobBuilder {
    pub fn new(namespace: &str) -> JobBuilder {
        JobBuilder {
            name: TESTER_JOB_NAME.into(),
            namespace: namespace.into(),
            parallelism: DEFAULT_JOB_PARALLELISM,
            container: ContainerBuilder::busybox().build(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn parallelism(mut self, parallelism: i32) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn container(mut self, container: corev1::Container) -> Self {
        self.container = container;
        self
    }

    // Completions match parallelism, so the job only succeeds once every worker has succeeded,
    // and a single failed worker fails the whole job (no retries).
    pub fn build(self) -> batchv1::Job {
        let metadata = build_object_meta(&self.namespace, &self.name);
        let pod_labels = metadata.labels.clone();

        batchv1::Job {
            metadata,
            spec: Some(batchv1::JobSpec {
                parallelism: Some(self.parallelism),
                completions: Some(self.parallelism),
                backoff_limit: Some(0),
                template: corev1::PodTemplateSpec {
                    metadata: Some(metav1::ObjectMeta {
                        labels: pod_labels,
                        ..Default::default()
                    }),
                    spec: Some(corev1::PodSpec {
                        containers: vec![self.container],
                        restart_policy: Some("Never".into()),
                        termination_grace_period_seconds: Some(0),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
