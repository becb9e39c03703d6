//! Tests for operation dispatch

use super::*;
use crate::auth::Credential;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::FetchMode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::from_credential(config, &Credential::new("pub", "sec")).unwrap()
}

fn items(value: Value) -> JsonItems {
    JsonItems::from_value(value).unwrap()
}

async fn run(server: &MockServer, operation: Operation, params: Value) -> crate::Result<HandlerOutput> {
    let client = test_client(server);
    let source = items(params);
    execute(&client, operation, &ItemParams::new(&source, 0)).await
}

fn query_of(request: &wiremock::Request) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.sort();
    pairs
}

// ============================================================================
// Operation Key Tests
// ============================================================================

#[test_case("device", "get", Operation::DeviceGet ; "device get")]
#[test_case("device", "getMany", Operation::DeviceGetMany ; "device get many")]
#[test_case("agent", "getMany", Operation::AgentGetMany ; "agent")]
#[test_case("alert", "getMany", Operation::AlertGetMany ; "alert")]
#[test_case("asset", "getMany", Operation::AssetGetMany ; "asset")]
#[test_case("share", "getMany", Operation::ShareGetMany ; "share")]
#[test_case("volume", "get", Operation::VolumeGet ; "volume")]
#[test_case("vmRestore", "getMany", Operation::VmRestoreGetMany ; "vm restore")]
#[test_case("activityLog", "getMany", Operation::ActivityLogGetMany ; "activity log")]
#[test_case("saasDomain", "getMany", Operation::SaasDomainGetMany ; "saas domain")]
#[test_case("saasSeat", "getMany", Operation::SaasSeatGetMany ; "saas seat")]
#[test_case("saasApplication", "getMany", Operation::SaasApplicationGetMany ; "saas application")]
#[test_case("dtcAsset", "get", Operation::DtcAssetGet ; "dtc asset get")]
#[test_case("dtcAsset", "getMany", Operation::DtcAssetGetMany ; "dtc asset get many")]
#[test_case("dtcAsset", "getManyByClient", Operation::DtcAssetGetManyByClient ; "dtc asset by client")]
#[test_case("dtcRmmTemplate", "getMany", Operation::DtcRmmTemplateGetMany ; "rmm templates")]
#[test_case("dtcStoragePool", "getMany", Operation::DtcStoragePoolGetMany ; "storage pool")]
fn test_parse_operation(resource: &str, operation: &str, expected: Operation) {
    let parsed = Operation::parse(resource, operation).unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.to_string(), format!("{resource}:{operation}"));
    assert_eq!(
        format!("{resource}:{operation}").parse::<Operation>().unwrap(),
        expected
    );
}

#[test_case("device", "delete" ; "unknown operation")]
#[test_case("printer", "getMany" ; "unknown resource")]
#[test_case("volume", "getMany" ; "operation of another resource")]
#[test_case("Device", "get" ; "case sensitive")]
fn test_parse_unknown_operation(resource: &str, operation: &str) {
    let err = Operation::parse(resource, operation).unwrap_err();
    match err {
        Error::UnknownOperation {
            resource: r,
            operation: o,
        } => {
            assert_eq!(r, resource);
            assert_eq!(o, operation);
        }
        other => panic!("Expected UnknownOperation, got {other:?}"),
    }
}

#[test]
fn test_from_str_without_separator() {
    let err = "device".parse::<Operation>().unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { .. }));
}

#[test]
fn test_from_params_non_string() {
    let err = Operation::from_params(Some(&json!(1)), Some(&json!("get"))).unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { .. }));
    assert_eq!(
        Operation::from_params(Some(&json!("device")), Some(&json!("get"))).unwrap(),
        Operation::DeviceGet
    );
}

#[test]
fn test_all_operations_have_distinct_keys() {
    let mut keys: Vec<String> = Operation::ALL.iter().map(ToString::to_string).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), Operation::ALL.len());
}

#[test]
fn test_every_resource_has_an_operation() {
    for resource in Resource::ALL {
        assert!(Operation::ALL.iter().any(|op| op.resource() == resource));
    }
}

#[test]
fn test_single_operations() {
    let single: Vec<_> = Operation::ALL.into_iter().filter(Operation::is_single).collect();
    assert_eq!(
        single,
        vec![Operation::DeviceGet, Operation::VolumeGet, Operation::DtcAssetGet]
    );
    assert!(Operation::DeviceGet.endpoint().starts_with("GET /bcdr/device/"));
}

// ============================================================================
// Parameter Tests
// ============================================================================

#[test]
fn test_json_items_from_value() {
    let list = items(json!([{ "a": 1 }, { "a": 2 }]));
    assert_eq!(list.len(), 2);
    assert_eq!(list.get("a", 1), Some(json!(2)));
    assert_eq!(list.get("a", 5), None);

    let single = items(json!({ "a": 1 }));
    assert_eq!(single.len(), 1);

    assert!(JsonItems::from_value(json!([1])).is_err());
    assert!(JsonItems::from_value(json!("x")).is_err());
    assert!(JsonItems::from_json_str("not json").is_err());
}

#[test]
fn test_json_items_set_all() {
    let mut list = items(json!([{}, { "resource": "agent" }]));
    list.set_all("resource", &json!("device"));
    assert_eq!(list.get("resource", 0), Some(json!("device")));
    assert_eq!(list.get("resource", 1), Some(json!("device")));
}

#[test]
fn test_required_string() {
    let source = items(json!([{ "serialNumber": "ABC", "clientId": 42, "empty": "", "bad": [1] }]));
    let params = ItemParams::new(&source, 0);

    assert_eq!(params.required_string("serialNumber").unwrap(), "ABC");
    assert_eq!(params.required_string("clientId").unwrap(), "42");
    assert!(matches!(
        params.required_string("missing"),
        Err(Error::MissingParameter { index: 0, .. })
    ));
    assert!(matches!(
        params.required_string("empty"),
        Err(Error::MissingParameter { .. })
    ));
    assert!(matches!(
        params.required_string("bad"),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_fetch_mode_params() {
    let source = items(json!([
        { "returnAll": true, "limit": "nonsense" },
        { "returnAll": false, "limit": 10 },
        {},
        { "limit": 0 },
        { "returnAll": "yes" },
        { "limit": 25.0 },
        { "limit": 2.5 }
    ]));

    assert_eq!(ItemParams::new(&source, 0).fetch_mode().unwrap(), FetchMode::All);
    assert_eq!(ItemParams::new(&source, 1).fetch_mode().unwrap(), FetchMode::Limit(10));
    assert_eq!(ItemParams::new(&source, 2).fetch_mode().unwrap(), FetchMode::Limit(50));
    assert!(matches!(
        ItemParams::new(&source, 3).fetch_mode(),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(matches!(
        ItemParams::new(&source, 4).fetch_mode(),
        Err(Error::InvalidParameter { .. })
    ));
    assert_eq!(ItemParams::new(&source, 5).fetch_mode().unwrap(), FetchMode::Limit(25));
    assert!(matches!(
        ItemParams::new(&source, 6).limit(),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_object_param() {
    let source = items(json!([{ "options": { "sortBy": "name" }, "filters": "x" }]));
    let params = ItemParams::new(&source, 0);
    assert_eq!(params.object("options").unwrap().len(), 1);
    assert!(params.object("missing").unwrap().is_empty());
    assert!(params.object("filters").is_err());
}

// ============================================================================
// Handler Tests
// ============================================================================

#[test]
fn test_handler_output_items() {
    assert_eq!(HandlerOutput::Single(json!({ "a": 1 })).into_items(), vec![json!({ "a": 1 })]);
    assert_eq!(HandlerOutput::Many(vec![]).len(), 0);
    assert!(HandlerOutput::Many(vec![]).is_empty());
}

#[tokio::test]
async fn test_device_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bcdr/device/SN%201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "serialNumber": "SN 1" })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run(&server, Operation::DeviceGet, json!({ "serialNumber": "SN 1" }))
        .await
        .unwrap();
    assert_eq!(out, HandlerOutput::Single(json!({ "serialNumber": "SN 1" })));
}

#[tokio::test]
async fn test_device_get_missing_serial_makes_no_request() {
    let server = MockServer::start().await;
    let err = run(&server, Operation::DeviceGet, json!({})).await.unwrap_err();
    assert!(matches!(err, Error::MissingParameter { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_device_get_many_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bcdr/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "serialNumber": "A" }, { "serialNumber": "B" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run(
        &server,
        Operation::DeviceGetMany,
        json!({
            "returnAll": false,
            "limit": 25,
            "options": {
                "showHiddenDevices": true,
                "showChildResellerDevices": false,
                "sortBy": "name",
                "sortOrder": ""
            }
        }),
    )
    .await
    .unwrap();
    assert_eq!(out.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        query_of(&requests[0]),
        vec![
            ("_perPage".to_string(), "25".to_string()),
            ("_sort".to_string(), "name".to_string()),
            ("showChildResellerDevices".to_string(), "0".to_string()),
            ("showHiddenDevices".to_string(), "1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_device_get_many_without_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bcdr/device"))
        .and(query_param("_page", "1"))
        .and(query_param("_perPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "id": 1 }] })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run(&server, Operation::DeviceGetMany, json!({ "returnAll": true }))
        .await
        .unwrap();
    assert_eq!(out, HandlerOutput::Many(vec![json!({ "id": 1 })]));
}

#[tokio::test]
async fn test_nested_device_listings() {
    let server = MockServer::start().await;
    for suffix in ["asset/agent", "alert", "asset", "asset/share"] {
        Mock::given(method("GET"))
            .and(path(format!("/bcdr/device/SN1/{suffix}")))
            .and(query_param("_perPage", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "kind": suffix }] })))
            .expect(1)
            .mount(&server)
            .await;
    }

    for operation in [
        Operation::AgentGetMany,
        Operation::AlertGetMany,
        Operation::AssetGetMany,
        Operation::ShareGetMany,
    ] {
        let out = run(&server, operation, json!({ "serialNumber": "SN1" })).await.unwrap();
        assert_eq!(out.len(), 1, "{operation}");
    }
}

#[tokio::test]
async fn test_generic_sort_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dtc/assets"))
        .and(query_param("_sort", "hostname"))
        .and(query_param("_order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run(
        &server,
        Operation::DtcAssetGetMany,
        json!({ "limit": 5, "options": { "sortBy": "hostname", "sortOrder": "desc" } }),
    )
    .await
    .unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_volume_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bcdr/device/SN1/asset/volume"))
        .and(query_param("volumeName", "C:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "C:" })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run(
        &server,
        Operation::VolumeGet,
        json!({ "serialNumber": "SN1", "volumeName": "C:" }),
    )
    .await
    .unwrap();
    assert_eq!(out, HandlerOutput::Single(json!({ "name": "C:" })));
}

#[tokio::test]
async fn test_vm_restore_single_object_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bcdr/device/SN1/vm-restores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "restoreId": 7 })))
        .mount(&server)
        .await;

    let out = run(&server, Operation::VmRestoreGetMany, json!({ "serialNumber": "SN1" }))
        .await
        .unwrap();
    assert_eq!(out, HandlerOutput::Many(vec![json!({ "restoreId": 7 })]));
}

#[tokio::test]
async fn test_activity_log_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report/activity-log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    run(
        &server,
        Operation::ActivityLogGetMany,
        json!({
            "limit": 10,
            "filters": {
                "clientName": "Acme",
                "since": 7,
                "sinceUnits": "days",
                "targetType": "",
                "user": null
            }
        }),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        query_of(&requests[0]),
        vec![
            ("_perPage".to_string(), "10".to_string()),
            ("clientName".to_string(), "Acme".to_string()),
            ("since".to_string(), "7".to_string()),
            ("sinceUnits".to_string(), "days".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_saas_domains_client_side_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/saas/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        })))
        .mount(&server)
        .await;

    let out = run(&server, Operation::SaasDomainGetMany, json!({ "limit": 2 }))
        .await
        .unwrap();
    assert_eq!(out, HandlerOutput::Many(vec![json!({ "id": 1 }), json!({ "id": 2 })]));

    let all = run(&server, Operation::SaasDomainGetMany, json!({ "returnAll": true }))
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn test_saas_seats_and_applications() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/saas/cust-1/seats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "seats": [{ "id": "s" }] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/saas/cust-1/applications"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "applications": [{ "id": "a" }] })),
        )
        .mount(&server)
        .await;

    let seats = run(
        &server,
        Operation::SaasSeatGetMany,
        json!({ "saasCustomerId": "cust-1", "returnAll": true }),
    )
    .await
    .unwrap();
    assert_eq!(seats, HandlerOutput::Many(vec![json!({ "id": "s" })]));

    let apps = run(
        &server,
        Operation::SaasApplicationGetMany,
        json!({ "saasCustomerId": "cust-1" }),
    )
    .await
    .unwrap();
    assert_eq!(apps, HandlerOutput::Many(vec![json!({ "id": "a" })]));
}

#[tokio::test]
async fn test_dtc_asset_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dtc/12/assets/uuid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uuid": "uuid-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dtc/12/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "uuid": "u" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let one = run(
        &server,
        Operation::DtcAssetGet,
        json!({ "clientId": 12, "assetUuid": "uuid-1" }),
    )
    .await
    .unwrap();
    assert_eq!(one, HandlerOutput::Single(json!({ "uuid": "uuid-1" })));

    let many = run(&server, Operation::DtcAssetGetManyByClient, json!({ "clientId": "12" }))
        .await
        .unwrap();
    assert_eq!(many.len(), 1);
}

#[tokio::test]
async fn test_dtc_templates_and_pools() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dtc/rmm-templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }, { "id": 2 }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dtc/storage-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "id": "p" }] })))
        .mount(&server)
        .await;

    let templates = run(&server, Operation::DtcRmmTemplateGetMany, json!({})).await.unwrap();
    assert_eq!(templates.len(), 2);

    let pools = run(&server, Operation::DtcStoragePoolGetMany, json!({})).await.unwrap();
    assert_eq!(pools, HandlerOutput::Many(vec![json!({ "id": "p" })]));
}

#[tokio::test]
async fn test_api_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Device not found" })))
        .mount(&server)
        .await;

    let err = run(&server, Operation::DeviceGet, json!({ "serialNumber": "nope" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Device not found"));
}
