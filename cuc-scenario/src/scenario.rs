use cuc_core::addon::ensure_addon_version;
use cuc_core::errors::*;
use cuc_core::k8s::{
    list_scenario_resources,
    set_env_and_await_rollout,
};
use cuc_core::prelude::*;
use tracing::*;

use crate::connectivity::run_connectivity_subtest;
use crate::context::ScenarioContext;
use crate::errors::ScenarioError;
use crate::modes::ExposureMode;

#[derive(Debug)]
pub struct SubtestReport {
    pub version: String,
    pub mode: ExposureMode,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScenarioSummary {
    pub reports: Vec<SubtestReport>,
}

impl ScenarioSummary {
    pub fn record(&mut self, version: &str, mode: ExposureMode, res: &EmptyResult) {
        self.reports.push(SubtestReport {
            version: version.into(),
            mode,
            error: res.as_ref().err().map(|err| format!("{err:#}")),
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &SubtestReport> {
        self.reports.iter().filter(|r| r.error.is_some())
    }

    pub fn log(&self) {
        for report in &self.reports {
            match &report.error {
                None => info!("PASS {} on {}", report.mode, report.version),
                Some(err) => error!("FAIL {} on {}: {err}", report.mode, report.version),
            }
        }
    }

    pub fn into_result(self) -> EmptyResult {
        let failed: Vec<_> = self.failures().map(|r| format!("{} on {}", r.mode, r.version)).collect();
        if !failed.is_empty() {
            bail!(ScenarioError::subtests_failed(&failed.join(", ")));
        }
        Ok(())
    }
}

// The CNI phases (pinning the add-on, tweaking its agent) are prerequisites for everything after
// them, so a failure there ends the run.  The connectivity sub-tests are independent of each
// other; each one's result is recorded and the run moves on to the next.
#[instrument(skip_all, fields(cluster = %ctx.opts.cluster_name))]
pub async fn run_scenario(ctx: &ScenarioContext) -> anyhow::Result<ScenarioSummary> {
    let mut summary = ScenarioSummary::default();

    for version in [&ctx.opts.initial_version, &ctx.opts.final_version] {
        prepare_cni(ctx, version).await?;

        for mode in &ctx.opts.modes {
            let res = run_connectivity_subtest(ctx, *mode).await;
            if let Err(err) = &res {
                error!("{mode} connectivity check on {version} failed: {err:#}");
            }
            summary.record(version, *mode, &res);
        }
    }

    check_for_leaks(ctx).await?;
    Ok(summary)
}

#[instrument(skip(ctx))]
pub async fn prepare_cni(ctx: &ScenarioContext, version: &str) -> EmptyResult {
    let addon = ensure_addon_version(
        ctx.addons.as_ref(),
        &ctx.opts.addon_name,
        &ctx.opts.cluster_name,
        version,
        &ctx.addon_poll(),
    )
    .await?;
    info!("{} is {} at {version}", addon.name, addon.status);

    if ctx.opts.skip_daemonset_tweak {
        warn!("leaving {CNI_DAEMONSET_NAMESPACE}/{CNI_DAEMONSET_NAME} untouched");
        return Ok(());
    }

    set_env_and_await_rollout(
        ctx.client.clone(),
        CNI_DAEMONSET_NAME,
        CNI_DAEMONSET_NAMESPACE,
        CNI_CONTAINER_NAME,
        &CNI_ENV_OVERRIDES,
        &ctx.rollout_poll(),
    )
    .await
}

pub async fn check_for_leaks(ctx: &ScenarioContext) -> EmptyResult {
    let leftovers = list_scenario_resources(ctx.client.clone(), &ctx.opts.namespace).await?;
    if !leftovers.is_empty() {
        bail!(ScenarioError::leaked_resources(&leftovers.join(", ")));
    }
    info!("no scenario resources left in {}", ctx.opts.namespace);
    Ok(())
}
