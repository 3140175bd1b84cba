use std::fmt::Debug;

use kube::Resource;
use kube::api::ListParams;
use serde::de::DeserializeOwned;

use super::*;
use crate::prelude::*;

// Lists every deployment, service, and job in the namespace that still carries the scenario label;
// an empty result means the run cleaned up after itself.
pub async fn list_scenario_resources(client: kube::Client, namespace: &str) -> anyhow::Result<Vec<String>> {
    let mut leftovers = vec![];
    leftovers.extend(list_labeled::<appsv1::Deployment>(client.clone(), namespace).await?);
    leftovers.extend(list_labeled::<corev1::Service>(client.clone(), namespace).await?);
    leftovers.extend(list_labeled::<batchv1::Job>(client, namespace).await?);
    Ok(leftovers)
}

async fn list_labeled<K>(client: kube::Client, namespace: &str) -> anyhow::Result<Vec<String>>
where
    K: Resource<DynamicType = (), Scope = k8s_openapi::NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
{
    let api = kube::Api::<K>::namespaced(client, namespace);
    let objs = api.list(&ListParams::default().labels(&scenario_label_selector())).await?;
    Ok(objs
        .items
        .iter()
        .map(|obj| format!("{} {}", K::kind(&()), obj.namespaced_name()))
        .collect())
}
