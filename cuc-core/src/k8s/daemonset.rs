use std::collections::BTreeMap;

use kube::api::{
    Patch,
    PatchParams,
};
use serde_json::json;
use tracing::*;

use super::*;
use crate::poll::poll_until;
use crate::prelude::*;

// Sets (or overwrites) environment variables on one container of a daemonset and waits for every
// node's pod to be replaced with the new configuration.  The container has to exist already; a
// strategic merge patch against a missing container name would quietly add a new one.
#[instrument(skip(client, env, poll))]
pub async fn set_env_and_await_rollout(
    client: kube::Client,
    name: &str,
    namespace: &str,
    container: &str,
    env: &BTreeMap<String, String>,
    poll: &PollPolicy,
) -> EmptyResult {
    let api = kube::Api::<appsv1::DaemonSet>::namespaced(client, namespace);
    let ds = api.get(name).await?;
    let has_container = ds
        .spec
        .as_ref()
        .and_then(|s| s.template.spec.as_ref())
        .is_some_and(|ps| ps.containers.iter().any(|c| c.name == container));
    if !has_container {
        bail!(KubernetesError::container_not_found(&format!("{namespace}/{name}:{container}")));
    }

    info!("setting {env:?} on {namespace}/{name}:{container}");
    api.patch(name, &PatchParams::default(), &Patch::Strategic(build_env_patch(container, env)))
        .await?;

    let api = &api;
    poll_until(&format!("daemonset {namespace}/{name} to roll out"), poll, move || check_rollout(api, name)).await?;
    info!("daemonset {namespace}/{name} rolled out");
    Ok(())
}

// Container env lists are merged by name, so this only touches the listed variables.
pub fn build_env_patch(container: &str, env: &BTreeMap<String, String>) -> serde_json::Value {
    let env: Vec<_> = env.iter().map(|(k, v)| json!({"name": k, "value": v})).collect();
    json!({
        "spec": {
            "template": {
                "spec": {
                    "containers": [{"name": container, "env": env}],
                },
            },
        },
    })
}

pub fn is_rollout_complete(ds: &appsv1::DaemonSet) -> bool {
    let Some(status) = ds.status.as_ref() else {
        return false;
    };

    status.observed_generation.unwrap_or_default() >= ds.metadata.generation.unwrap_or_default()
        && status.updated_number_scheduled.unwrap_or_default() == status.desired_number_scheduled
        && status.number_available.unwrap_or_default() == status.desired_number_scheduled
}

async fn check_rollout(api: &kube::Api<appsv1::DaemonSet>, name: &str) -> anyhow::Result<Option<()>> {
    let ds = api.get(name).await?;
    if is_rollout_complete(&ds) {
        return Ok(Some(()));
    }

    if let Some(status) = ds.status.as_ref() {
        debug!(
            "daemonset {name}: {}/{} pods updated, {} available",
            status.updated_number_scheduled.unwrap_or_default(),
            status.desired_number_scheduled,
            status.number_available.unwrap_or_default(),
        );
    }
    Ok(None)
}
