use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use cuc_core::prelude::*;

/// How the test service is exposed.  The two load-balancer modes differ only in the annotation
/// that asks the AWS load balancer controller for an NLB instead of a classic ELB.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExposureMode {
    #[value(alias = "clb")]
    LoadBalancer,

    #[value(alias = "nlb")]
    NetworkLoadBalancer,

    #[value(alias = "clusterip")]
    ClusterIp,

    #[value(alias = "nodeport")]
    NodePort,
}

impl ExposureMode {
    pub const ALL: [ExposureMode; 4] = [
        ExposureMode::LoadBalancer,
        ExposureMode::NetworkLoadBalancer,
        ExposureMode::ClusterIp,
        ExposureMode::NodePort,
    ];

    pub fn service_type(&self) -> &'static str {
        match self {
            ExposureMode::LoadBalancer | ExposureMode::NetworkLoadBalancer => "LoadBalancer",
            ExposureMode::ClusterIp => "ClusterIP",
            ExposureMode::NodePort => "NodePort",
        }
    }

    pub fn annotations(&self) -> BTreeMap<String, String> {
        match self {
            ExposureMode::NetworkLoadBalancer => BTreeMap::from([(
                AWS_LOAD_BALANCER_TYPE_ANNOTATION_KEY.into(),
                NLB_LOAD_BALANCER_TYPE.into(),
            )]),
            _ => BTreeMap::new(),
        }
    }
}

// Same names the command line accepts
impl fmt::Display for ExposureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}
