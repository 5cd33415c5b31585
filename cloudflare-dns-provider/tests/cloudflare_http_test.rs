//! Cloudflare client against a local mock API server.

use std::sync::Arc;

use cloudflare_dns_provider::{
    CaaData, CaaRecordBody, DnsApi, MxRecordBody, PaginationParams, PlainRecordBody,
    ProviderCredentials, ProviderError, ProxiableRecordBody, RecordBody, create_provider,
};
use httpmock::prelude::*;
use serde_json::{Value, json};

const ZONE: &str = "023e105f4ecef8ad9ca31a8372d0c353";
const TOKEN: &str = "test-token";

fn api(server: &MockServer) -> Arc<dyn DnsApi> {
    create_provider(
        ProviderCredentials {
            api_token: TOKEN.to_string(),
        },
        &reqwest::Client::new(),
        Some(&server.base_url()),
    )
    .unwrap()
}

fn ok(result: Value) -> Value {
    json!({"success": true, "errors": [], "messages": [], "result": result})
}

fn failed(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null
    })
}

fn record_json(id: &str, record_type: &str, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "zone_id": ZONE,
        "zone_name": "example.com",
        "name": name,
        "type": record_type,
        "content": content,
        "proxiable": true,
        "proxied": false,
        "ttl": 1,
        "comment": null,
        "tags": []
    })
}

#[tokio::test]
async fn zone_name_sends_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE}"))
                .header("authorization", format!("Bearer {TOKEN}"));
            then.status(200)
                .json_body(ok(json!({"id": ZONE, "name": "example.com", "status": "active"})));
        })
        .await;

    let name = api(&server).zone_name(ZONE).await.unwrap();

    mock.assert_async().await;
    assert_eq!(name, "example.com");
}

#[tokio::test]
async fn create_mx_posts_priority() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/zones/{ZONE}/dns_records"))
                .json_body(json!({
                    "type": "MX",
                    "name": "example.com",
                    "content": "mail.example.com",
                    "ttl": 1,
                    "priority": 10
                }));
            let mut record = record_json("rec-mx", "MX", "example.com", "mail.example.com");
            record["priority"] = json!(10);
            then.status(200).json_body(ok(record));
        })
        .await;

    let body = RecordBody::Mx(MxRecordBody {
        name: "example.com".to_string(),
        content: "mail.example.com".to_string(),
        ttl: 1,
        priority: 10,
        comment: None,
    });
    let record = api(&server).create_record(ZONE, &body).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.id, "rec-mx");
    assert_eq!(record.priority, Some(10));
    assert_eq!(record.comment, None);
}

#[tokio::test]
async fn create_caa_sends_structured_data() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/zones/{ZONE}/dns_records"))
                .json_body(json!({
                    "type": "CAA",
                    "name": "example.com",
                    "ttl": 3600,
                    "data": {"flags": 0, "tag": "issue", "value": "letsencrypt.org"}
                }));
            let mut record =
                record_json("rec-caa", "CAA", "example.com", "0 issue \"letsencrypt.org\"");
            record["data"] = json!({"flags": 0, "tag": "issue", "value": "letsencrypt.org"});
            then.status(200).json_body(ok(record));
        })
        .await;

    let body = RecordBody::Caa(CaaRecordBody {
        name: "example.com".to_string(),
        ttl: 3600,
        data: CaaData {
            flags: 0,
            tag: "issue".to_string(),
            value: "letsencrypt.org".to_string(),
        },
        comment: None,
    });
    let record = api(&server).create_record(ZONE, &body).await.unwrap();

    mock.assert_async().await;
    assert!(record.data.is_some());
}

#[tokio::test]
async fn update_uses_put() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("/zones/{ZONE}/dns_records/rec-a"))
                .json_body(json!({
                    "type": "A",
                    "name": "www.example.com",
                    "content": "192.0.2.2",
                    "ttl": 300,
                    "proxied": true,
                    "comment": "moved"
                }));
            let mut record = record_json("rec-a", "A", "www.example.com", "192.0.2.2");
            record["proxied"] = json!(true);
            record["ttl"] = json!(300);
            record["comment"] = json!("moved");
            then.status(200).json_body(ok(record));
        })
        .await;

    let body = RecordBody::A(ProxiableRecordBody {
        name: "www.example.com".to_string(),
        content: "192.0.2.2".to_string(),
        ttl: 300,
        proxied: true,
        comment: Some("moved".to_string()),
    });
    let record = api(&server)
        .update_record(ZONE, "rec-a", &body)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(record.proxied, Some(true));
    assert_eq!(record.comment.as_deref(), Some("moved"));
}

#[tokio::test]
async fn get_missing_record_is_record_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/zones/{ZONE}/dns_records/gone"));
            then.status(404).json_body(failed(81044, "Record does not exist."));
        })
        .await;

    let err = api(&server).get_record(ZONE, "gone").await.unwrap_err();

    assert!(
        matches!(&err, ProviderError::RecordNotFound { record_id, .. } if record_id == "gone"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn delete_in_unknown_zone_is_zone_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/zones/nope/dns_records/rec-a");
            then.status(404)
                .json_body(failed(7003, "Could not route to /zones/nope/dns_records/rec-a"));
        })
        .await;

    let err = api(&server).delete_record("nope", "rec-a").await.unwrap_err();

    assert!(
        matches!(err, ProviderError::ZoneNotFound { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn delete_succeeds() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path(format!("/zones/{ZONE}/dns_records/rec-a"));
            then.status(200).json_body(ok(json!({"id": "rec-a"})));
        })
        .await;

    api(&server).delete_record(ZONE, "rec-a").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn rate_limit_keeps_retry_after_and_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/zones/{ZONE}/dns_records/rec-a"));
            then.status(429)
                .header("retry-after", "7")
                .json_body(failed(10000, "Rate limited"));
        })
        .await;

    let err = api(&server).get_record(ZONE, "rec-a").await.unwrap_err();

    mock.assert_hits_async(1).await;
    assert!(
        matches!(err, ProviderError::RateLimited { retry_after: Some(7), .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn status_codes_map_to_variants() {
    let cases: [(u16, i64, fn(&ProviderError) -> bool); 4] = [
        (400, 9005, |e| {
            matches!(e, ProviderError::InvalidParameter { param, .. } if param == "content")
        }),
        (401, 10000, |e| matches!(e, ProviderError::InvalidCredentials { .. })),
        (403, 9109, |e| matches!(e, ProviderError::PermissionDenied { .. })),
        (502, 0, |e| {
            matches!(e, ProviderError::ServerError { status: 502, .. })
        }),
    ];

    for (status, code, check) in cases {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(format!("/zones/{ZONE}/dns_records"));
                then.status(status).json_body(failed(code, "failure"));
            })
            .await;

        let body = RecordBody::Txt(PlainRecordBody {
            name: "example.com".to_string(),
            content: "hello".to_string(),
            ttl: 1,
            comment: None,
        });
        let err = api(&server).create_record(ZONE, &body).await.unwrap_err();
        assert!(check(&err), "status {status}: unexpected error {err:?}");
    }
}

#[tokio::test]
async fn non_json_error_body_is_still_classified() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/zones/{ZONE}"));
            then.status(503).body("<html>upstream unavailable</html>");
        })
        .await;

    let err = api(&server).zone_name(ZONE).await.unwrap_err();
    assert!(matches!(err, ProviderError::ServerError { status: 503, .. }));
}

#[tokio::test]
async fn list_passes_pagination_and_reads_total() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE}/dns_records"))
                .query_param("page", "2")
                .query_param("per_page", "2");
            then.status(200).json_body(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": [
                    record_json("rec-3", "A", "c.example.com", "192.0.2.3"),
                    record_json("rec-4", "A", "d.example.com", "192.0.2.4")
                ],
                "result_info": {
                    "page": 2,
                    "per_page": 2,
                    "count": 2,
                    "total_count": 5,
                    "total_pages": 3
                }
            }));
        })
        .await;

    let page = api(&server)
        .list_records(ZONE, &PaginationParams { page: 2, per_page: 2 })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.total_count, Some(5));
    assert!(page.has_more());
}

#[tokio::test]
async fn list_clamps_page_size() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE}/dns_records"))
                .query_param("page", "1")
                .query_param("per_page", "5000");
            then.status(200).json_body(ok(json!([])));
        })
        .await;

    let page = api(&server)
        .list_records(ZONE, &PaginationParams { page: 0, per_page: 100_000 })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(page.records.is_empty());
    assert!(!page.has_more());
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let api = create_provider(
        ProviderCredentials {
            api_token: TOKEN.to_string(),
        },
        &reqwest::Client::new(),
        Some("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = api.zone_name(ZONE).await.unwrap_err();
    assert!(
        matches!(
            err,
            ProviderError::NetworkError { .. } | ProviderError::Timeout { .. }
        ),
        "unexpected error: {err:?}"
    );
}
