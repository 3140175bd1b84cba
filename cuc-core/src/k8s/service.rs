use kube::api::PropagationPolicy;
use tracing::*;

use super::*;
use crate::prelude::*;

#[instrument(skip_all, fields(service = svc.namespaced_name()))]
pub async fn create_service(client: kube::Client, svc: &corev1::Service) -> anyhow::Result<corev1::Service> {
    let api = namespaced_api(client, svc)?;
    let created = api.create(&Default::default(), svc).await?;
    info!(
        "created service {} of type {}: {:?}",
        created.namespaced_name(),
        created.spec.as_ref().and_then(|s| s.type_.as_deref()).unwrap_or("ClusterIP"),
        created.status,
    );
    Ok(created)
}

pub async fn delete_service_and_await_gone(
    client: kube::Client,
    svc: &corev1::Service,
    poll: &PollPolicy,
) -> EmptyResult {
    let api: kube::Api<corev1::Service> = namespaced_api(client, svc)?;
    delete_and_await_gone(&api, &svc.name_any(), PropagationPolicy::Foreground, poll).await
}

// The address the in-cluster testers dial: the cluster IP assigned by the apiserver and the first
// declared service port.
pub fn service_endpoint(svc: &corev1::Service) -> anyhow::Result<(String, i32)> {
    let spec = svc
        .spec
        .as_ref()
        .ok_or_else(|| KubernetesError::field_not_found("service spec"))?;
    let ip = match spec.cluster_ip.as_deref() {
        Some(ip) if !ip.is_empty() && ip != "None" => ip.to_string(),
        _ => bail!(KubernetesError::missing_cluster_ip(&svc.namespaced_name())),
    };
    let port = spec
        .ports
        .as_ref()
        .and_then(|ports| ports.first())
        .ok_or_else(|| KubernetesError::field_not_found("service ports"))?
        .port;

    Ok((ip, port))
}
