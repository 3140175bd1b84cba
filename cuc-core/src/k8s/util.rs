use std::fmt::Debug;

use either::Either;
use kube::api::{
    DeleteParams,
    PropagationPolicy,
};
use kube::Resource;
use serde::de::DeserializeOwned;
use tracing::*;

use super::*;
use crate::macros::*;
use crate::poll::poll_until;
use crate::prelude::*;

// Everything the scenario creates carries the scenario label so that leftovers can be found (and
// cleaned up by hand, if it comes to that) with a single label selector.
pub fn build_object_meta(namespace: &str, name: &str) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        namespace: Some(namespace.into()),
        name: Some(name.into()),
        labels: klabel!(
            SCENARIO_LABEL_KEY => SCENARIO_LABEL_VALUE,
            APP_KUBERNETES_IO_NAME_KEY => name,
        ),
        ..Default::default()
    }
}

pub fn scenario_label_selector() -> String {
    format!("{SCENARIO_LABEL_KEY}={SCENARIO_LABEL_VALUE}")
}

pub fn namespaced_api<K>(client: kube::Client, obj: &K) -> anyhow::Result<kube::Api<K>>
where
    K: Resource<DynamicType = (), Scope = k8s_openapi::NamespaceResourceScope>,
{
    let ns = obj
        .meta()
        .namespace
        .as_deref()
        .ok_or_else(|| KubernetesError::field_not_found(&format!("{} namespace", K::kind(&()))))?;
    Ok(kube::Api::namespaced(client, ns))
}

// With foreground propagation the object only disappears once its dependents (replica sets,
// pods) are gone too, so "gone" really means the test pods have released their IPs.  Background
// propagation returns as soon as the object itself is gone and leaves its dependents to the
// garbage collector.
#[instrument(skip(api, poll), fields(kind = %K::kind(&())))]
pub async fn delete_and_await_gone<K>(
    api: &kube::Api<K>,
    name: &str,
    propagation: PropagationPolicy,
    poll: &PollPolicy,
) -> EmptyResult
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    let params = DeleteParams {
        propagation_policy: Some(propagation),
        ..Default::default()
    };

    // delete returns an "either" object; left contains the object being deleted,
    // and right contains a status code indicating the delete is finished.
    match api.delete(name, &params).await {
        Ok(Either::Left(_)) => debug!("deletion of {name} in progress"),
        Ok(Either::Right(_)) => {
            info!("{} {name} deleted", K::kind(&()));
            return Ok(());
        },
        Err(kube::Error::Api(kube::core::ErrorResponse { code: 404, .. })) => {
            info!("{name} is already gone");
            return Ok(());
        },
        Err(e) => return Err(e.into()),
    }

    poll_until(&format!("{} {name} to be deleted", K::kind(&())), poll, move || check_gone(api, name)).await?;
    info!("{} {name} deleted", K::kind(&()));
    Ok(())
}

// A create that failed because the name is taken means the object belongs to someone else
pub fn is_already_exists(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<kube::Error>(),
        Some(kube::Error::Api(kube::core::ErrorResponse { code: 409, .. }))
    )
}

async fn check_gone<K>(api: &kube::Api<K>, name: &str) -> anyhow::Result<Option<()>>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    Ok(api.get_opt(name).await?.is_none().then_some(()))
}

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any(),
        }
    }
}
