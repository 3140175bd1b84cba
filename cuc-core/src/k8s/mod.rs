mod daemonset;
mod deployment;
mod job;
mod leaks;
mod manifest;
mod service;
mod util;

pub use daemonset::*;
pub use deployment::*;
pub use job::*;
pub use leaks::*;
pub use manifest::*;
pub use service::*;
pub use util::*;

use crate::errors::*;

err_impl! {KubernetesError,
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("field not found in struct: {0}")]
    FieldNotFound(String),

    #[error("service has no cluster IP: {0}")]
    MissingClusterIp(String),
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
}

#[cfg(test)]
mod tests;
