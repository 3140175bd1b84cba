use kube::api::PropagationPolicy;
use tracing::*;

use super::*;
use crate::poll::poll_until;
use crate::prelude::*;

#[instrument(skip_all, fields(deployment = depl.namespaced_name()))]
pub async fn create_and_await_ready(
    client: kube::Client,
    depl: &appsv1::Deployment,
    poll: &PollPolicy,
) -> anyhow::Result<appsv1::Deployment> {
    let api = namespaced_api(client, depl)?;
    let created = api.create(&Default::default(), depl).await?;
    info!("created deployment {}, waiting for replicas to become ready", created.namespaced_name());

    let name = created.name_any();
    let (api, name) = (&api, name.as_str());
    let ready = poll_until(&format!("deployment {name} to be ready"), poll, move || check_ready(api, name)).await?;
    info!("deployment {name} is ready");
    Ok(ready)
}

pub async fn delete_deployment_and_await_gone(
    client: kube::Client,
    depl: &appsv1::Deployment,
    poll: &PollPolicy,
) -> EmptyResult {
    let api: kube::Api<appsv1::Deployment> = namespaced_api(client, depl)?;
    delete_and_await_gone(&api, &depl.name_any(), PropagationPolicy::Foreground, poll).await
}

// Mirrors what `kubectl rollout status` checks: the controller has seen the latest spec, and
// every desired replica is updated and ready.
pub fn is_deployment_ready(depl: &appsv1::Deployment) -> bool {
    let desired = depl.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
    let Some(status) = depl.status.as_ref() else {
        return false;
    };

    status.observed_generation.unwrap_or_default() >= depl.metadata.generation.unwrap_or_default()
        && status.updated_replicas.unwrap_or_default() == desired
        && status.ready_replicas.unwrap_or_default() == desired
        && status.available_replicas.unwrap_or_default() >= desired
}

async fn check_ready(api: &kube::Api<appsv1::Deployment>, name: &str) -> anyhow::Result<Option<appsv1::Deployment>> {
    let depl = api.get(name).await?;
    if is_deployment_ready(&depl) {
        return Ok(Some(depl));
    }

    let status = depl.status.as_ref();
    debug!(
        "deployment {name}: {}/{} replicas ready",
        status.and_then(|s| s.ready_replicas).unwrap_or_default(),
        depl.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
    );
    Ok(None)
}
