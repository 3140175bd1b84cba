mod connectivity;
mod context;
mod errors;
mod modes;
mod scenario;

use std::sync::Arc;

use clap::Parser;
use cuc_core::addon::EksAddonClient;
use cuc_core::errors::*;
use cuc_core::logging;
use cuc_core::prelude::*;
use tracing::*;

use crate::context::ScenarioContext;
use crate::modes::ExposureMode;
use crate::scenario::run_scenario;

/// Pins the CNI add-on to each version in turn and checks that every kind of service exposure
/// still routes traffic to pods on the upgraded network.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Options {
    #[arg(long, env = "CLUSTER_NAME")]
    pub cluster_name: String,

    #[arg(long, env = "INITIAL_CNI_VERSION")]
    pub initial_version: String,

    #[arg(long, env = "FINAL_CNI_VERSION")]
    pub final_version: String,

    #[arg(long, default_value = DEFAULT_ADDON_NAME)]
    pub addon_name: String,

    // Falls back to the usual AWS region resolution chain when unset
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    #[arg(long, default_value = DEFAULT_TEST_NAMESPACE)]
    pub namespace: String,

    #[arg(long, default_value_t = DEFAULT_REPLICAS)]
    pub replicas: i32,

    #[arg(long, default_value_t = DEFAULT_TESTER_PARALLELISM)]
    pub tester_parallelism: i32,

    #[arg(long, default_value_t = DEFAULT_NEGATIVE_TESTER_PARALLELISM)]
    pub negative_parallelism: i32,

    #[arg(long, default_value_t = UNREACHABLE_PORT)]
    pub unreachable_port: i32,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = ExposureMode::ALL)]
    pub modes: Vec<ExposureMode>,

    #[arg(long, default_value_t = POLL_INTERVAL_SHORT.into())]
    pub poll_interval: humantime::Duration,

    #[arg(long, default_value_t = POLL_INTERVAL_MEDIUM.into())]
    pub addon_poll_interval: humantime::Duration,

    #[arg(long, default_value_t = DEFAULT_ADDON_TIMEOUT.into())]
    pub addon_timeout: humantime::Duration,

    #[arg(long, default_value_t = DEFAULT_ROLLOUT_TIMEOUT.into())]
    pub rollout_timeout: humantime::Duration,

    #[arg(long, default_value_t = DEFAULT_DEPLOYMENT_READY_TIMEOUT.into())]
    pub deployment_timeout: humantime::Duration,

    #[arg(long, default_value_t = DEFAULT_JOB_TIMEOUT.into())]
    pub job_timeout: humantime::Duration,

    #[arg(long, default_value_t = DEFAULT_DELETE_TIMEOUT.into())]
    pub delete_timeout: humantime::Duration,

    // How long to wait after creating a service before probing it; load balancers in particular
    // take a while to start forwarding
    #[arg(long, default_value_t = DEFAULT_SERVICE_SETTLE_TIME.into())]
    pub service_settle_time: humantime::Duration,

    #[arg(long)]
    pub skip_daemonset_tweak: bool,

    #[arg(short, long, default_value = "info")]
    pub verbosity: String,
}

#[instrument(ret, err)]
async fn run(opts: Options) -> EmptyResult {
    let client = kube::Client::try_default().await?;
    let addons = Arc::new(EksAddonClient::new(opts.region.clone()).await);
    let ctx = ScenarioContext::new(client, addons, opts);

    let summary = run_scenario(&ctx).await?;
    summary.log();
    summary.into_result()
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup(&format!("{},aws_config=warn,aws_smithy_runtime=warn", args.verbosity));
    if let Err(err) = run(args).await {
        logerr!(err, "connectivity scenario failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests;
