//! Operation handlers
//!
//! One arm per `Operation`. Each arm reads its own parameters, builds the
//! request and picks between a single call, a bounded page or a full fetch.

use super::params::ItemParams;
use super::types::Operation;
use crate::decode::ResponseNormalizer;
use crate::error::Result;
use crate::http::{ApiPath, HttpClient, RequestSpec};
use crate::pagination::{FetchMode, Paginator, ORDER_PARAM, SORT_PARAM};
use crate::types::{JsonObject, JsonValue, QueryValue};
use tracing::debug;

/// Filters copied into the activity log query when truthy
const ACTIVITY_LOG_FILTERS: [&str; 5] = ["clientName", "since", "sinceUnits", "targetType", "user"];

/// Device listing flags sent as `"1"` / `"0"`
const DEVICE_FLAGS: [&str; 2] = ["showHiddenDevices", "showChildResellerDevices"];

/// Result of one handler invocation
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// A single object
    Single(JsonValue),
    /// A list of objects
    Many(Vec<JsonValue>),
}

impl HandlerOutput {
    /// Flatten into output items
    pub fn into_items(self) -> Vec<JsonValue> {
        match self {
            HandlerOutput::Single(value) => vec![value],
            HandlerOutput::Many(items) => items,
        }
    }

    /// Number of output items
    pub fn len(&self) -> usize {
        match self {
            HandlerOutput::Single(_) => 1,
            HandlerOutput::Many(items) => items.len(),
        }
    }

    /// Whether there are no output items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run `operation` for one item
pub async fn execute(
    client: &HttpClient,
    operation: Operation,
    params: &ItemParams<'_>,
) -> Result<HandlerOutput> {
    debug!(operation = %operation, item = params.index(), "Executing operation");

    match operation {
        Operation::DeviceGet => {
            let serial = params.required_string("serialNumber")?;
            get_single(client, device_path(&serial)).await
        }
        Operation::DeviceGetMany => {
            let options = params.object("options")?;
            let spec = RequestSpec::get(ApiPath::new("/bcdr/device"));
            let spec = apply_sort(apply_device_flags(spec, &options), &options);
            get_paged(client, &spec, params.fetch_mode()?).await
        }
        Operation::AgentGetMany => {
            let serial = params.required_string("serialNumber")?;
            get_many(client, device_path(&serial).literal("asset/agent"), params).await
        }
        Operation::AlertGetMany => {
            let serial = params.required_string("serialNumber")?;
            get_many(client, device_path(&serial).literal("alert"), params).await
        }
        Operation::AssetGetMany => {
            let serial = params.required_string("serialNumber")?;
            get_many(client, device_path(&serial).literal("asset"), params).await
        }
        Operation::ShareGetMany => {
            let serial = params.required_string("serialNumber")?;
            get_many(client, device_path(&serial).literal("asset/share"), params).await
        }
        Operation::VolumeGet => {
            let serial = params.required_string("serialNumber")?;
            let volume = params.required_string("volumeName")?;
            let spec = RequestSpec::get(device_path(&serial).literal("asset/volume"))
                .query("volumeName", volume);
            Ok(HandlerOutput::Single(client.request(&spec).await?))
        }
        Operation::VmRestoreGetMany => {
            let serial = params.required_string("serialNumber")?;
            let path = device_path(&serial).literal("vm-restores");
            get_normalized(client, path, ResponseNormalizer::ITEMS, FetchMode::All).await
        }
        Operation::ActivityLogGetMany => {
            let filters = params.object("filters")?;
            let mut spec = RequestSpec::get(ApiPath::new("/report/activity-log"));
            for name in ACTIVITY_LOG_FILTERS {
                if let Some(value) = filters.get(name).filter(|v| is_truthy(v)) {
                    if let Some(value) = QueryValue::from_json(value) {
                        spec = spec.query(name, value);
                    }
                }
            }
            get_paged(client, &spec, params.fetch_mode()?).await
        }
        Operation::SaasDomainGetMany => {
            let mode = params.fetch_mode()?;
            let path = ApiPath::new("/saas/domains");
            get_normalized(client, path, ResponseNormalizer::SAAS_DOMAINS, mode).await
        }
        Operation::SaasSeatGetMany => {
            let customer = params.required_string("saasCustomerId")?;
            let mode = params.fetch_mode()?;
            let path = saas_path(&customer).literal("seats");
            get_normalized(client, path, ResponseNormalizer::SAAS_SEATS, mode).await
        }
        Operation::SaasApplicationGetMany => {
            let customer = params.required_string("saasCustomerId")?;
            let mode = params.fetch_mode()?;
            let path = saas_path(&customer).literal("applications");
            get_normalized(client, path, ResponseNormalizer::SAAS_APPLICATIONS, mode).await
        }
        Operation::DtcAssetGet => {
            let client_id = params.required_string("clientId")?;
            let asset = params.required_string("assetUuid")?;
            get_single(client, dtc_client_path(&client_id).segment(asset)).await
        }
        Operation::DtcAssetGetMany => get_many(client, ApiPath::new("/dtc/assets"), params).await,
        Operation::DtcAssetGetManyByClient => {
            let client_id = params.required_string("clientId")?;
            get_many(client, dtc_client_path(&client_id), params).await
        }
        Operation::DtcRmmTemplateGetMany => {
            let path = ApiPath::new("/dtc/rmm-templates");
            get_normalized(client, path, ResponseNormalizer::ITEMS, FetchMode::All).await
        }
        Operation::DtcStoragePoolGetMany => {
            let path = ApiPath::new("/dtc/storage-pool");
            get_normalized(client, path, ResponseNormalizer::ITEMS, FetchMode::All).await
        }
    }
}

fn device_path(serial: &str) -> ApiPath {
    ApiPath::new("/bcdr/device").segment(serial)
}

fn saas_path(customer: &str) -> ApiPath {
    ApiPath::new("/saas").segment(customer)
}

fn dtc_client_path(client_id: &str) -> ApiPath {
    ApiPath::new("/dtc").segment(client_id).literal("assets")
}

async fn get_single(client: &HttpClient, path: ApiPath) -> Result<HandlerOutput> {
    let body = client.request(&RequestSpec::get(path)).await?;
    Ok(HandlerOutput::Single(body))
}

/// Paginated listing with the generic `options.sortBy` / `options.sortOrder`
async fn get_many(client: &HttpClient, path: ApiPath, params: &ItemParams<'_>) -> Result<HandlerOutput> {
    let options = params.object("options")?;
    let spec = apply_sort(RequestSpec::get(path), &options);
    get_paged(client, &spec, params.fetch_mode()?).await
}

async fn get_paged(client: &HttpClient, spec: &RequestSpec, mode: FetchMode) -> Result<HandlerOutput> {
    let paged = Paginator::new(client).fetch(spec, mode).await?;
    Ok(HandlerOutput::Many(paged.into_items()))
}

/// One unpaginated call, normalized; a bounded mode truncates client-side
async fn get_normalized(
    client: &HttpClient,
    path: ApiPath,
    normalizer: ResponseNormalizer,
    mode: FetchMode,
) -> Result<HandlerOutput> {
    let body = client.request(&RequestSpec::get(path)).await?;
    let mut items = normalizer.normalize(body);
    if let FetchMode::Limit(limit) = mode {
        items.truncate(limit as usize);
    }
    Ok(HandlerOutput::Many(items))
}

fn apply_sort(mut spec: RequestSpec, options: &JsonObject) -> RequestSpec {
    for (option, param) in [("sortBy", SORT_PARAM), ("sortOrder", ORDER_PARAM)] {
        if let Some(value) = options.get(option).filter(|v| is_truthy(v)) {
            if let Some(value) = QueryValue::from_json(value) {
                spec = spec.query(param, value);
            }
        }
    }
    spec
}

fn apply_device_flags(mut spec: RequestSpec, options: &JsonObject) -> RequestSpec {
    for flag in DEVICE_FLAGS {
        if let Some(value) = options.get(flag).filter(|v| !v.is_null()) {
            let wire = if is_truthy(value) { "1" } else { "0" };
            spec = spec.query(flag, wire);
        }
    }
    spec
}

/// Non-empty strings, non-zero numbers and `true`
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
