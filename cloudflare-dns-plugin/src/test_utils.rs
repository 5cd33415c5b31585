//! In-memory provider stub for adapter and host tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cloudflare_dns_provider::{
    CloudflareDnsRecord, DnsApi, PaginationParams, ProviderCredentials, ProviderError, RecordBody,
    RecordPage,
};
use serde_json::{Value, json};

use crate::adapter::RecordAdapter;
use crate::config::PluginSettings;
use crate::connector::Connector;

pub const ZONE_ID: &str = "zone-1";
pub const ZONE_APEX: &str = "example.com";

/// Records every call and serves records from a map keyed by id.
pub struct StubDnsApi {
    records: Mutex<BTreeMap<String, CloudflareDnsRecord>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicU64,
    /// Returned by the next call instead of its normal result.
    fail_next: Mutex<Option<ProviderError>>,
    /// Whether list pages report `total_count`.
    report_total: bool,
    delay: Option<Duration>,
}

impl StubDnsApi {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_next: Mutex::new(None),
            report_total: false,
            delay: None,
        }
    }

    pub fn reporting_total() -> Self {
        Self {
            report_total: true,
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn insert(&self, record: CloudflareDnsRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<CloudflareDnsRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn fail_next(&self, error: ProviderError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.fail_next.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn store(&self, id: String, body: &RecordBody) -> CloudflareDnsRecord {
        let mut value = serde_json::to_value(body).unwrap();
        value["id"] = Value::String(id.clone());
        if let Some(data) = value.get("data").cloned() {
            value["content"] = json!(srv_or_caa_content(&data));
            if let Some(priority) = data.get("priority") {
                value["priority"] = priority.clone();
            }
        }
        let record: CloudflareDnsRecord = serde_json::from_value(value).unwrap();
        self.insert(record.clone());
        record
    }

    fn record_not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: "cloudflare".to_string(),
            record_id: record_id.to_string(),
            raw_message: Some("Record does not exist.".to_string()),
        }
    }
}

fn srv_or_caa_content(data: &Value) -> String {
    match (data.get("weight"), data.get("tag")) {
        (Some(weight), _) => format!(
            "{weight} {} {}",
            data["port"],
            data["target"].as_str().unwrap_or_default()
        ),
        (_, Some(tag)) => format!(
            "{} {} {}",
            data["flags"],
            tag.as_str().unwrap_or_default(),
            data["value"]
        ),
        _ => String::new(),
    }
}

#[async_trait]
impl DnsApi for StubDnsApi {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn zone_name(&self, zone_id: &str) -> Result<String, ProviderError> {
        self.enter(format!("zone_name {zone_id}")).await?;
        Ok(ZONE_APEX.to_string())
    }

    async fn get_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> Result<CloudflareDnsRecord, ProviderError> {
        self.enter(format!("get_record {zone_id} {record_id}")).await?;
        self.get(record_id)
            .ok_or_else(|| Self::record_not_found(record_id))
    }

    async fn create_record(
        &self,
        zone_id: &str,
        body: &RecordBody,
    ) -> Result<CloudflareDnsRecord, ProviderError> {
        self.enter(format!("create_record {zone_id} {}", body.name()))
            .await?;
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(self.store(id, body))
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        body: &RecordBody,
    ) -> Result<CloudflareDnsRecord, ProviderError> {
        self.enter(format!("update_record {zone_id} {record_id}"))
            .await?;
        if self.get(record_id).is_none() {
            return Err(Self::record_not_found(record_id));
        }
        Ok(self.store(record_id.to_string(), body))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<(), ProviderError> {
        self.enter(format!("delete_record {zone_id} {record_id}"))
            .await?;
        self.records
            .lock()
            .unwrap()
            .remove(record_id)
            .map(|_| ())
            .ok_or_else(|| Self::record_not_found(record_id))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &PaginationParams,
    ) -> Result<RecordPage, ProviderError> {
        self.enter(format!(
            "list_records {zone_id} page={} per_page={}",
            params.page, params.per_page
        ))
        .await?;
        let records = self.records.lock().unwrap();
        let total = records.len();
        let start = (params.page.saturating_sub(1) as usize)
            .saturating_mul(params.per_page as usize);
        let page = records
            .values()
            .skip(start)
            .take(params.per_page as usize)
            .cloned()
            .collect();
        Ok(RecordPage {
            records: page,
            page: params.page,
            per_page: params.per_page,
            total_count: self.report_total.then(|| u32::try_from(total).unwrap()),
        })
    }
}

/// Hands out the same stub for every request.
pub struct StubConnector(pub Arc<StubDnsApi>);

impl Connector for StubConnector {
    fn connect(&self, _credentials: ProviderCredentials) -> Result<Arc<dyn DnsApi>, ProviderError> {
        Ok(self.0.clone())
    }
}

pub fn adapter_with(api: Arc<StubDnsApi>) -> RecordAdapter {
    RecordAdapter::new(
        Arc::new(StubConnector(api)),
        PluginSettings {
            default_api_token: Some("env-token".to_string()),
            ..PluginSettings::default()
        },
    )
}

pub fn target() -> Value {
    json!({"zone_id": ZONE_ID, "api_token": "test-token"})
}

pub fn a_record(id: &str, name: &str) -> CloudflareDnsRecord {
    CloudflareDnsRecord {
        id: id.to_string(),
        record_type: "A".to_string(),
        name: name.to_string(),
        content: "192.0.2.1".to_string(),
        ttl: 1,
        proxied: Some(false),
        priority: None,
        comment: None,
        data: None,
    }
}
