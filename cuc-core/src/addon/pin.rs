use tracing::*;

use super::*;
use crate::poll::{
    PollPolicy,
    poll_until,
};

#[instrument(skip(api, poll))]
pub async fn ensure_addon_version(
    api: &(dyn AddonApi + Send + Sync),
    name: &str,
    cluster: &str,
    version: &str,
    poll: &PollPolicy,
) -> anyhow::Result<AddonDescription> {
    // An error on this first lookup is how a missing add-on shows up on some accounts, so it's
    // treated the same as "not found" instead of failing the run.
    let needs_install = match api.describe_addon(name, cluster).await {
        Ok(Some(addon)) if addon.version.as_deref() == Some(version) => {
            info!("add-on {name} is already at version {version} (status {})", addon.status);
            false
        },
        Ok(Some(addon)) => {
            info!("add-on {name} is at version {:?}, moving to {version}", addon.version);
            true
        },
        Ok(None) => {
            info!("add-on {name} is not installed on {cluster}");
            true
        },
        Err(err) => {
            warn!("could not describe add-on {name} ({err:#}); assuming it is not installed");
            true
        },
    };

    if needs_install {
        info!("applying add-on {name} version {version}");
        api.create_addon_with_version(name, cluster, version).await?;
    }

    let addon = poll_until(&format!("add-on {name} to become active at {version}"), poll, move || {
        check_addon(api, name, cluster, version)
    })
    .await?;

    info!("add-on {name} is active at version {version}");
    Ok(addon)
}

async fn check_addon(
    api: &(dyn AddonApi + Send + Sync),
    name: &str,
    cluster: &str,
    version: &str,
) -> anyhow::Result<Option<AddonDescription>> {
    let addon = api
        .describe_addon(name, cluster)
        .await?
        .ok_or_else(|| AddonError::not_found(name))?;

    if addon.is_active_at(version) {
        return Ok(Some(addon));
    }
    debug!("add-on {name} is {} at version {:?}", addon.status, addon.version);
    Ok(None)
}
