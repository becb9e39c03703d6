//! Operation keys
//!
//! The host addresses operations as `"resource:operation"` strings. Inside
//! the crate each supported pair is one `Operation` variant so dispatch is an
//! exhaustive match.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// API resource families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Device,
    Agent,
    Alert,
    Asset,
    Share,
    Volume,
    VmRestore,
    ActivityLog,
    SaasDomain,
    SaasSeat,
    SaasApplication,
    DtcAsset,
    DtcRmmTemplate,
    DtcStoragePool,
}

impl Resource {
    /// Every resource, in listing order
    pub const ALL: [Resource; 14] = [
        Resource::Device,
        Resource::Agent,
        Resource::Alert,
        Resource::Asset,
        Resource::Share,
        Resource::Volume,
        Resource::VmRestore,
        Resource::ActivityLog,
        Resource::SaasDomain,
        Resource::SaasSeat,
        Resource::SaasApplication,
        Resource::DtcAsset,
        Resource::DtcRmmTemplate,
        Resource::DtcStoragePool,
    ];

    /// Wire name of the resource
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Device => "device",
            Resource::Agent => "agent",
            Resource::Alert => "alert",
            Resource::Asset => "asset",
            Resource::Share => "share",
            Resource::Volume => "volume",
            Resource::VmRestore => "vmRestore",
            Resource::ActivityLog => "activityLog",
            Resource::SaasDomain => "saasDomain",
            Resource::SaasSeat => "saasSeat",
            Resource::SaasApplication => "saasApplication",
            Resource::DtcAsset => "dtcAsset",
            Resource::DtcRmmTemplate => "dtcRmmTemplate",
            Resource::DtcStoragePool => "dtcStoragePool",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported resource/operation pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DeviceGet,
    DeviceGetMany,
    AgentGetMany,
    AlertGetMany,
    AssetGetMany,
    ShareGetMany,
    VolumeGet,
    VmRestoreGetMany,
    ActivityLogGetMany,
    SaasDomainGetMany,
    SaasSeatGetMany,
    SaasApplicationGetMany,
    DtcAssetGet,
    DtcAssetGetMany,
    DtcAssetGetManyByClient,
    DtcRmmTemplateGetMany,
    DtcStoragePoolGetMany,
}

impl Operation {
    /// Every supported operation
    pub const ALL: [Operation; 17] = [
        Operation::DeviceGet,
        Operation::DeviceGetMany,
        Operation::AgentGetMany,
        Operation::AlertGetMany,
        Operation::AssetGetMany,
        Operation::ShareGetMany,
        Operation::VolumeGet,
        Operation::VmRestoreGetMany,
        Operation::ActivityLogGetMany,
        Operation::SaasDomainGetMany,
        Operation::SaasSeatGetMany,
        Operation::SaasApplicationGetMany,
        Operation::DtcAssetGet,
        Operation::DtcAssetGetMany,
        Operation::DtcAssetGetManyByClient,
        Operation::DtcRmmTemplateGetMany,
        Operation::DtcStoragePoolGetMany,
    ];

    /// Resolve a resource/operation pair
    pub fn parse(resource: &str, operation: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.resource().as_str() == resource && op.name() == operation)
            .ok_or_else(|| Error::unknown_operation(resource, operation))
    }

    /// Resolve from host parameter values
    ///
    /// Non-string values count as empty names and fail the lookup.
    pub fn from_params(resource: Option<&JsonValue>, operation: Option<&JsonValue>) -> Result<Self> {
        let resource = resource.and_then(JsonValue::as_str).unwrap_or_default();
        let operation = operation.and_then(JsonValue::as_str).unwrap_or_default();
        Self::parse(resource, operation)
    }

    /// Resource this operation belongs to
    pub fn resource(&self) -> Resource {
        match self {
            Operation::DeviceGet | Operation::DeviceGetMany => Resource::Device,
            Operation::AgentGetMany => Resource::Agent,
            Operation::AlertGetMany => Resource::Alert,
            Operation::AssetGetMany => Resource::Asset,
            Operation::ShareGetMany => Resource::Share,
            Operation::VolumeGet => Resource::Volume,
            Operation::VmRestoreGetMany => Resource::VmRestore,
            Operation::ActivityLogGetMany => Resource::ActivityLog,
            Operation::SaasDomainGetMany => Resource::SaasDomain,
            Operation::SaasSeatGetMany => Resource::SaasSeat,
            Operation::SaasApplicationGetMany => Resource::SaasApplication,
            Operation::DtcAssetGet
            | Operation::DtcAssetGetMany
            | Operation::DtcAssetGetManyByClient => Resource::DtcAsset,
            Operation::DtcRmmTemplateGetMany => Resource::DtcRmmTemplate,
            Operation::DtcStoragePoolGetMany => Resource::DtcStoragePool,
        }
    }

    /// Operation name within the resource
    pub fn name(&self) -> &'static str {
        match self {
            Operation::DeviceGet | Operation::VolumeGet | Operation::DtcAssetGet => "get",
            Operation::DtcAssetGetManyByClient => "getManyByClient",
            _ => "getMany",
        }
    }

    /// Method and path template of the upstream endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::DeviceGet => "GET /bcdr/device/{serialNumber}",
            Operation::DeviceGetMany => "GET /bcdr/device",
            Operation::AgentGetMany => "GET /bcdr/device/{serialNumber}/asset/agent",
            Operation::AlertGetMany => "GET /bcdr/device/{serialNumber}/alert",
            Operation::AssetGetMany => "GET /bcdr/device/{serialNumber}/asset",
            Operation::ShareGetMany => "GET /bcdr/device/{serialNumber}/asset/share",
            Operation::VolumeGet => "GET /bcdr/device/{serialNumber}/asset/volume",
            Operation::VmRestoreGetMany => "GET /bcdr/device/{serialNumber}/vm-restores",
            Operation::ActivityLogGetMany => "GET /report/activity-log",
            Operation::SaasDomainGetMany => "GET /saas/domains",
            Operation::SaasSeatGetMany => "GET /saas/{saasCustomerId}/seats",
            Operation::SaasApplicationGetMany => "GET /saas/{saasCustomerId}/applications",
            Operation::DtcAssetGet => "GET /dtc/{clientId}/assets/{assetUuid}",
            Operation::DtcAssetGetMany => "GET /dtc/assets",
            Operation::DtcAssetGetManyByClient => "GET /dtc/{clientId}/assets",
            Operation::DtcRmmTemplateGetMany => "GET /dtc/rmm-templates",
            Operation::DtcStoragePoolGetMany => "GET /dtc/storage-pool",
        }
    }

    /// Whether the operation returns a single object
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            Operation::DeviceGet | Operation::VolumeGet | Operation::DtcAssetGet
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource(), self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((resource, operation)) => Self::parse(resource, operation),
            None => Err(Error::unknown_operation(s, "")),
        }
    }
}
