use std::sync::Arc;

use cuc_core::addon::AddonApi;
use cuc_core::prelude::*;

use crate::Options;

// Everything a scenario phase needs, passed around explicitly instead of living in globals
#[derive(Clone)]
pub struct ScenarioContext {
    pub client: kube::Client,
    pub addons: Arc<dyn AddonApi + Send + Sync>,
    pub opts: Options,
}

impl ScenarioContext {
    pub fn new(client: kube::Client, addons: Arc<dyn AddonApi + Send + Sync>, opts: Options) -> ScenarioContext {
        ScenarioContext { client, addons, opts }
    }

    pub fn addon_poll(&self) -> PollPolicy {
        PollPolicy::new(*self.opts.addon_poll_interval, *self.opts.addon_timeout)
    }

    pub fn rollout_poll(&self) -> PollPolicy {
        self.k8s_poll(*self.opts.rollout_timeout)
    }

    pub fn deployment_poll(&self) -> PollPolicy {
        self.k8s_poll(*self.opts.deployment_timeout)
    }

    pub fn job_poll(&self) -> PollPolicy {
        self.k8s_poll(*self.opts.job_timeout)
    }

    pub fn delete_poll(&self) -> PollPolicy {
        self.k8s_poll(*self.opts.delete_timeout)
    }

    fn k8s_poll(&self, timeout: std::time::Duration) -> PollPolicy {
        PollPolicy::new(*self.opts.poll_interval, timeout)
    }
}
