use kube::api::PropagationPolicy;
use tracing::*;

use super::*;
use crate::poll::poll_until;
use crate::prelude::*;

const JOB_COMPLETE_CONDITION: &str = "Complete";
const JOB_FAILED_CONDITION: &str = "Failed";

/// The terminal state of a batch job, with the number of pods that ended up in that state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobOutcome {
    Succeeded(i32),
    Failed(i32),
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Succeeded(_))
    }
}

#[instrument(skip_all, fields(job = job.namespaced_name()))]
pub async fn create_and_await_completion(
    client: kube::Client,
    job: &batchv1::Job,
    poll: &PollPolicy,
) -> anyhow::Result<JobOutcome> {
    let api = namespaced_api(client, job)?;
    let created = api.create(&Default::default(), job).await?;
    info!("created job {}, waiting for it to finish", created.namespaced_name());

    let name = created.name_any();
    let (api, name) = (&api, name.as_str());
    let outcome = poll_until(&format!("job {name} to finish"), poll, move || check_job(api, name)).await?;
    info!("job {name} finished: {outcome:?}");
    Ok(outcome)
}

pub async fn delete_job_and_await_gone(client: kube::Client, job: &batchv1::Job, poll: &PollPolicy) -> EmptyResult {
    let api: kube::Api<batchv1::Job> = namespaced_api(client, job)?;
    delete_and_await_gone(&api, &job.name_any(), PropagationPolicy::Background, poll).await
}

// A single failed pod is enough to call the job failed (the jobs we build never retry); success
// needs every expected completion.
pub fn job_outcome(job: &batchv1::Job) -> Option<JobOutcome> {
    let status = job.status.as_ref()?;
    let has_condition = |type_: &str| {
        status
            .conditions
            .as_ref()
            .is_some_and(|conds| conds.iter().any(|c| c.type_ == type_ && c.status == "True"))
    };

    let failed = status.failed.unwrap_or_default();
    let succeeded = status.succeeded.unwrap_or_default();
    if failed > 0 || has_condition(JOB_FAILED_CONDITION) {
        return Some(JobOutcome::Failed(failed));
    }

    let completions = job
        .spec
        .as_ref()
        .and_then(|s| s.completions.or(s.parallelism))
        .unwrap_or(1);
    if succeeded >= completions || has_condition(JOB_COMPLETE_CONDITION) {
        return Some(JobOutcome::Succeeded(succeeded));
    }
    None
}

async fn check_job(api: &kube::Api<batchv1::Job>, name: &str) -> anyhow::Result<Option<JobOutcome>> {
    let job = api.get(name).await?;
    let outcome = job_outcome(&job);
    if outcome.is_none() {
        let status = job.status.as_ref();
        debug!(
            "job {name}: {} active, {} succeeded",
            status.and_then(|s| s.active).unwrap_or_default(),
            status.and_then(|s| s.succeeded).unwrap_or_default(),
        );
    }
    Ok(outcome)
}
