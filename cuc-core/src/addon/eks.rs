//! Add-on management backed by the EKS control-plane API.
//!
//! Credentials and region come from the standard AWS provider chain (environment variables,
//! shared config/credentials files, instance or pod identity); the region can be overridden
//! explicitly, which is handy when the test runner lives outside the cluster's region.
use async_trait::async_trait;
use aws_config::{
    BehaviorVersion,
    Region,
};
use aws_sdk_eks::types::{
    Addon,
    ResolveConflicts,
};
use tracing::*;

use super::*;

pub struct EksAddonClient {
    client: aws_sdk_eks::Client,
}

impl EksAddonClient {
    pub async fn new(region: Option<String>) -> EksAddonClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        EksAddonClient::from_client(aws_sdk_eks::Client::new(&config))
    }

    pub fn from_client(client: aws_sdk_eks::Client) -> EksAddonClient {
        EksAddonClient { client }
    }
}

#[async_trait]
impl AddonApi for EksAddonClient {
    async fn describe_addon(&self, name: &str, cluster: &str) -> anyhow::Result<Option<AddonDescription>> {
        match self.client.describe_addon().addon_name(name).cluster_name(cluster).send().await {
            Ok(output) => Ok(output.addon().map(AddonDescription::from)),
            Err(err) => match err.into_service_error() {
                e if e.is_resource_not_found_exception() => Ok(None),
                e => Err(e.into()),
            },
        }
    }

    async fn create_addon_with_version(&self, name: &str, cluster: &str, version: &str) -> EmptyResult {
        let res = self
            .client
            .create_addon()
            .addon_name(name)
            .cluster_name(cluster)
            .addon_version(version)
            .resolve_conflicts(ResolveConflicts::Overwrite)
            .send()
            .await;

        match res {
            Ok(_) => Ok(()),
            Err(err) => match err.into_service_error() {
                // The add-on is already installed (at some other version), so move it instead
                e if e.is_resource_in_use_exception() => {
                    info!("add-on {name} already exists on {cluster}, updating it to {version}");
                    self.client
                        .update_addon()
                        .addon_name(name)
                        .cluster_name(cluster)
                        .addon_version(version)
                        .resolve_conflicts(ResolveConflicts::Overwrite)
                        .send()
                        .await?;
                    Ok(())
                },
                e => Err(e.into()),
            },
        }
    }
}

impl From<&Addon> for AddonDescription {
    fn from(addon: &Addon) -> AddonDescription {
        AddonDescription {
            name: addon.addon_name().unwrap_or_default().into(),
            version: addon.addon_version().map(String::from),
            status: AddonStatus::from_provider(addon.status().map(|s| s.as_str())),
        }
    }
}
