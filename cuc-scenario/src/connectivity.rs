//! A single connectivity sub-test: stand up an HTTP server deployment behind a service exposed a
//! particular way, check that a fleet of tester pods can reach it, and check that the same fleet
//! cannot reach a port nothing is listening on.  Whatever got created is torn down afterwards,
//! whether or not the checks passed.
use cuc_core::errors::*;
use cuc_core::k8s::*;
use cuc_core::prelude::*;
use tokio::time::sleep;
use tracing::*;

use crate::Options;
use crate::context::ScenarioContext;
use crate::errors::ScenarioError;
use crate::modes::ExposureMode;

// Objects are recorded here before they're submitted, so that teardown also covers a create call
// that failed after the apiserver accepted it (a timeout, say); deleting something that never got
// created is a no-op.  A create rejected because the name is already taken un-records the object,
// since whatever holds that name isn't ours to delete.
#[derive(Debug, Default)]
pub struct SubtestResources {
    pub deployment: Option<appsv1::Deployment>,
    pub service: Option<corev1::Service>,
    pub tester_job: Option<batchv1::Job>,
    pub negative_tester_job: Option<batchv1::Job>,
}

pub fn build_http_server_deployment(opts: &Options) -> appsv1::Deployment {
    let container = ContainerBuilder::busybox()
        .name(HTTP_SERVER_CONTAINER_NAME)
        .image(HTTP_SERVER_IMAGE)
        .command(None)
        .port(HTTP_SERVER_PORT, "TCP")
        .build();

    DeploymentBuilder::new(&opts.namespace)
        .name(HTTP_SERVER_DEPLOYMENT_NAME)
        .replicas(opts.replicas)
        .container(container)
        .pod_label(SERVICE_SELECTOR_LABEL_KEY, SERVICE_SELECTOR_LABEL_VALUE)
        .build()
}

pub fn build_test_service(opts: &Options, mode: ExposureMode) -> corev1::Service {
    ServiceBuilder::http(&opts.namespace)
        .service_type(mode.service_type())
        .selector(SERVICE_SELECTOR_LABEL_KEY, SERVICE_SELECTOR_LABEL_VALUE)
        .annotations(&mode.annotations())
        .build()
}

pub fn build_tester_job(opts: &Options, cluster_ip: &str, port: i32) -> batchv1::Job {
    JobBuilder::new(&opts.namespace)
        .name(TESTER_JOB_NAME)
        .parallelism(opts.tester_parallelism)
        .container(wget_spider_container(cluster_ip, port, TESTER_TIMEOUT_SECONDS))
        .build()
}

// Same wget check, pointed at a port the service doesn't expose; this one has to fail
pub fn build_negative_tester_job(opts: &Options, cluster_ip: &str) -> batchv1::Job {
    JobBuilder::new(&opts.namespace)
        .name(NEGATIVE_TESTER_JOB_NAME)
        .parallelism(opts.negative_parallelism)
        .container(wget_spider_container(cluster_ip, opts.unreachable_port, NEGATIVE_TESTER_TIMEOUT_SECONDS))
        .build()
}

fn wget_spider_container(cluster_ip: &str, port: i32, timeout_secs: u32) -> corev1::Container {
    ContainerBuilder::busybox()
        .command(Some(vec!["wget".into()]))
        .args(vec![
            "--spider".into(),
            "-T".into(),
            timeout_secs.to_string(),
            format!("{cluster_ip}:{port}"),
        ])
        .build()
}

#[instrument(skip(ctx))]
pub async fn run_connectivity_subtest(ctx: &ScenarioContext, mode: ExposureMode) -> EmptyResult {
    let mut resources = SubtestResources::default();
    let res = check_connectivity(ctx, mode, &mut resources).await;
    let teardown_res = teardown(ctx, &resources).await;

    match (res, teardown_res) {
        (Err(err), Err(teardown_err)) => {
            // The check failure is the interesting one, but don't lose the teardown failure either
            error!("teardown after failed {mode} check also failed: {teardown_err:#}");
            Err(err)
        },
        (Err(err), Ok(())) => Err(err),
        (Ok(()), teardown_res) => teardown_res,
    }
}

pub(crate) async fn check_connectivity(
    ctx: &ScenarioContext,
    mode: ExposureMode,
    resources: &mut SubtestResources,
) -> EmptyResult {
    let depl = resources.deployment.insert(build_http_server_deployment(&ctx.opts));
    let res = create_and_await_ready(ctx.client.clone(), depl, &ctx.deployment_poll()).await;
    forget_if_taken(&mut resources.deployment, &res);
    res?;

    let svc = resources.service.insert(build_test_service(&ctx.opts, mode));
    let res = create_service(ctx.client.clone(), svc).await;
    forget_if_taken(&mut resources.service, &res);
    let svc = res?;
    let (cluster_ip, port) = service_endpoint(&svc)?;

    let settle_time = *ctx.opts.service_settle_time;
    info!("service {} is at {cluster_ip}:{port}, waiting {settle_time:?} for it to settle", svc.namespaced_name());
    sleep(settle_time).await;

    let tester = resources
        .tester_job
        .insert(build_tester_job(&ctx.opts, &cluster_ip, port));
    let res = create_and_await_completion(ctx.client.clone(), tester, &ctx.job_poll()).await;
    forget_if_taken(&mut resources.tester_job, &res);
    let outcome = res?;
    if !outcome.is_success() {
        bail!(ScenarioError::connectivity_job_failed(&format!("{mode} via {cluster_ip}:{port}: {outcome:?}")));
    }
    info!("all testers reached {cluster_ip}:{port}");

    let negative = resources
        .negative_tester_job
        .insert(build_negative_tester_job(&ctx.opts, &cluster_ip));
    let res = create_and_await_completion(ctx.client.clone(), negative, &ctx.job_poll()).await;
    forget_if_taken(&mut resources.negative_tester_job, &res);
    let outcome = res?;
    if outcome.is_success() {
        bail!(ScenarioError::unexpected_job_success(&format!(
            "{mode} via {cluster_ip}:{}: {outcome:?}",
            ctx.opts.unreachable_port
        )));
    }
    info!("negative testers failed as expected");

    Ok(())
}

fn forget_if_taken<K: KubeResourceExt, T>(slot: &mut Option<K>, res: &anyhow::Result<T>) {
    if res.as_ref().is_err_and(is_already_exists) {
        if let Some(obj) = slot.take() {
            warn!("{} already exists and was not created by this run; leaving it alone", obj.namespaced_name());
        }
    }
}

// Every deletion gets attempted regardless of whether an earlier one failed; all the failures are
// reported together at the end.  Jobs go first since their pods are the clients of the service.
#[instrument(skip_all)]
pub async fn teardown(ctx: &ScenarioContext, resources: &SubtestResources) -> EmptyResult {
    let poll = ctx.delete_poll();
    let mut failures = vec![];

    for job in [&resources.tester_job, &resources.negative_tester_job].into_iter().flatten() {
        let res = delete_job_and_await_gone(ctx.client.clone(), job, &poll).await;
        record_failure(&mut failures, "Job", job, res);
    }

    if let Some(svc) = &resources.service {
        let res = delete_service_and_await_gone(ctx.client.clone(), svc, &poll).await;
        record_failure(&mut failures, "Service", svc, res);
    }

    if let Some(depl) = &resources.deployment {
        let res = delete_deployment_and_await_gone(ctx.client.clone(), depl, &poll).await;
        record_failure(&mut failures, "Deployment", depl, res);
    }

    if !failures.is_empty() {
        bail!(ScenarioError::teardown_failed(&failures.join("; ")));
    }
    Ok(())
}

fn record_failure<K: KubeResourceExt>(failures: &mut Vec<String>, kind: &str, obj: &K, res: EmptyResult) {
    if let Err(err) = res {
        warn!("could not delete {kind} {}: {err:#}", obj.namespaced_name());
        failures.push(format!("{kind} {}: {err:#}", obj.namespaced_name()));
    }
}
