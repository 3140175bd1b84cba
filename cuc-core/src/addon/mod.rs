mod eks;
mod pin;

use std::fmt;

use async_trait::async_trait;
pub use eks::EksAddonClient;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
pub use pin::ensure_addon_version;

use crate::errors::*;

err_impl! {AddonError,
    #[error("add-on {0} not found")]
    NotFound(String),
}

/// Lifecycle state of a managed add-on as reported by the provider.  We only care about telling
/// "active" apart from everything else, but keep the raw value around for logging.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddonStatus {
    Unknown,
    Creating,
    Active,
    Other(String),
}

impl AddonStatus {
    pub fn from_provider(status: Option<&str>) -> AddonStatus {
        match status {
            None | Some("") => AddonStatus::Unknown,
            Some("ACTIVE") => AddonStatus::Active,
            Some("CREATING") => AddonStatus::Creating,
            Some(other) => AddonStatus::Other(other.into()),
        }
    }
}

impl fmt::Display for AddonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddonStatus::Unknown => write!(f, "UNKNOWN"),
            AddonStatus::Creating => write!(f, "CREATING"),
            AddonStatus::Active => write!(f, "ACTIVE"),
            AddonStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddonDescription {
    pub name: String,
    pub version: Option<String>,
    pub status: AddonStatus,
}

impl AddonDescription {
    pub fn is_active_at(&self, version: &str) -> bool {
        self.status == AddonStatus::Active && self.version.as_deref() == Some(version)
    }
}

// describe_addon returns Ok(None) when the provider says the add-on doesn't exist; any other
// failure is an error.
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait AddonApi {
    async fn describe_addon(&self, name: &str, cluster: &str) -> anyhow::Result<Option<AddonDescription>>;
    async fn create_addon_with_version(&self, name: &str, cluster: &str, version: &str) -> EmptyResult;
}

#[cfg(test)]
mod tests;
