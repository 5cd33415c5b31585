//! Record lifecycle operations
//!
//! Each operation is one request/response cycle against the provider; DNS
//! mutations on Cloudflare complete synchronously, so there is nothing to
//! poll. Nothing is cached between calls and nothing is retried here.

use std::sync::Arc;

use cloudflare_dns_provider::{DnsApi, PaginationParams, RecordPage};
use serde_json::Value;

use crate::capabilities::RESOURCE_TYPE;
use crate::classifier::{classify_plugin_error, is_not_found, is_rate_limited};
use crate::config::{PluginSettings, TargetConfig};
use crate::connector::Connector;
use crate::error::{PluginError, PluginResult};
use crate::mapper;
use crate::properties::DnsRecordProperties;
use crate::types::{
    CreateRequest, DeleteRequest, ListRequest, ListResult, Operation, OperationErrorCode,
    ProgressResult, ReadRequest, ReadResult, StatusRequest, UpdateRequest,
};

/// Page size used when the host does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A connected provider plus the zone the request targets.
struct Target {
    zone_id: String,
    api: Arc<dyn DnsApi>,
}

/// Serves the host's lifecycle requests for `CLOUDFLARE::DNS::Record`.
///
/// Stateless apart from the connector, so one instance can serve concurrent
/// requests.
pub struct RecordAdapter {
    connector: Arc<dyn Connector>,
    settings: PluginSettings,
}

impl RecordAdapter {
    pub fn new(connector: Arc<dyn Connector>, settings: PluginSettings) -> Self {
        Self {
            connector,
            settings,
        }
    }

    fn connect(&self, raw: &Value) -> PluginResult<Target> {
        let config = TargetConfig::parse(raw)?;
        let credentials = config.credentials(self.settings.default_api_token.as_deref())?;
        let api = self.connector.connect(credentials)?;
        Ok(Target {
            zone_id: config.zone_id,
            api,
        })
    }

    // ===== Create =====

    pub async fn create(&self, request: CreateRequest) -> ProgressResult {
        self.try_create(&request).await.unwrap_or_else(|e| {
            let (code, message) = report("create", &e);
            ProgressResult::failure(Operation::Create, code, message)
        })
    }

    async fn try_create(&self, request: &CreateRequest) -> PluginResult<ProgressResult> {
        let target = self.connect(&request.target_config)?;
        let props = DnsRecordProperties::parse(&request.properties)?;
        let kind = props.validate()?;

        let apex = target.api.zone_name(&target.zone_id).await?;
        let body = mapper::to_provider_create(&props, &apex)?;
        let record = target.api.create_record(&target.zone_id, &body).await?;
        log::info!("created {kind} record '{}' as {}", props.name, record.id);

        let current = reported_properties(mapper::from_provider_record(&record, &apex), &props);
        Ok(ProgressResult::success(Operation::Create).with_resource(record.id, current.to_value()?))
    }

    // ===== Read =====

    pub async fn read(&self, request: ReadRequest) -> ReadResult {
        match self.try_read(&request).await {
            Ok(properties) => ReadResult {
                resource_type: RESOURCE_TYPE.to_string(),
                properties: Some(properties),
                error_code: None,
                message: None,
            },
            Err(e) => {
                let (code, message) = report("read", &e);
                ReadResult {
                    resource_type: RESOURCE_TYPE.to_string(),
                    properties: None,
                    error_code: Some(code),
                    message: Some(message),
                }
            }
        }
    }

    async fn try_read(&self, request: &ReadRequest) -> PluginResult<Value> {
        require_native_id(&request.native_id)?;
        let target = self.connect(&request.target_config)?;

        let apex = target.api.zone_name(&target.zone_id).await?;
        let record = target
            .api
            .get_record(&target.zone_id, &request.native_id)
            .await?;

        mapper::from_provider_record(&record, &apex).to_value()
    }

    // ===== Update =====

    pub async fn update(&self, request: UpdateRequest) -> ProgressResult {
        self.try_update(&request).await.unwrap_or_else(|e| {
            let (code, message) = report("update", &e);
            ProgressResult::failure(Operation::Update, code, message)
        })
    }

    async fn try_update(&self, request: &UpdateRequest) -> PluginResult<ProgressResult> {
        require_native_id(&request.native_id)?;
        let target = self.connect(&request.target_config)?;
        let props = DnsRecordProperties::parse(&request.desired_properties)?;
        props.validate()?;
        if let Some(prior) = &request.prior_properties {
            reject_replacement(prior, &props)?;
        }

        let apex = target.api.zone_name(&target.zone_id).await?;
        let update = mapper::to_provider_update(&props, &request.native_id, &apex)?;
        let record = target
            .api
            .update_record(&target.zone_id, &update.record_id, &update.body)
            .await?;
        log::info!("updated record {}", update.record_id);

        let current = reported_properties(mapper::from_provider_record(&record, &apex), &props);
        Ok(ProgressResult::success(Operation::Update)
            .with_resource(update.record_id, current.to_value()?))
    }

    // ===== Delete =====

    /// Deleting a record that is already gone succeeds.
    pub async fn delete(&self, request: DeleteRequest) -> ProgressResult {
        match self.try_delete(&request).await {
            Ok(()) => ProgressResult::success(Operation::Delete),
            Err(e) if is_not_found(&e) => {
                log::info!("record {} already absent", request.native_id);
                ProgressResult::success(Operation::Delete)
            }
            Err(e) => {
                let (code, message) = report("delete", &e);
                ProgressResult::failure(Operation::Delete, code, message)
            }
        }
    }

    async fn try_delete(&self, request: &DeleteRequest) -> PluginResult<()> {
        require_native_id(&request.native_id)?;
        let target = self.connect(&request.target_config)?;
        target
            .api
            .delete_record(&target.zone_id, &request.native_id)
            .await?;
        log::info!("deleted record {}", request.native_id);
        Ok(())
    }

    // ===== Status =====

    /// Mutations finish before they return, so there is never anything pending.
    #[allow(clippy::unused_self)]
    pub fn status(&self, request: &StatusRequest) -> ProgressResult {
        ProgressResult {
            native_id: request.native_id.clone(),
            ..ProgressResult::success(Operation::CheckStatus)
        }
    }

    // ===== List =====

    /// One page of record ids in the zone.
    ///
    /// The page token is the 1-based page index. A token that does not parse
    /// starts from page 1.
    pub async fn list(&self, request: ListRequest) -> ListResult {
        self.try_list(&request).await.unwrap_or_else(|e| {
            let (code, message) = report("list", &e);
            ListResult::failure(code, message)
        })
    }

    async fn try_list(&self, request: &ListRequest) -> PluginResult<ListResult> {
        let target = self.connect(&request.target_config)?;
        let params = PaginationParams {
            page: parse_page_token(request.page_token.as_deref()),
            per_page: request
                .page_size
                .filter(|&size| size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        };

        let page = target.api.list_records(&target.zone_id, &params).await?;
        let next_page_token = next_page_token(&page);
        log::debug!(
            "listed {} records on page {} of zone {}",
            page.records.len(),
            page.page,
            target.zone_id
        );

        Ok(ListResult {
            native_ids: page.records.into_iter().map(|r| r.id).collect(),
            next_page_token,
            error_code: None,
            message: None,
        })
    }
}

fn parse_page_token(token: Option<&str>) -> u32 {
    token
        .and_then(|t| t.trim().parse::<u32>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}

/// 1-based index of the page after `page`, if there may be one.
fn next_page_token(page: &RecordPage) -> Option<String> {
    if !page.has_more() {
        return None;
    }
    page.page.checked_add(1).map(|next| next.to_string())
}

fn require_native_id(native_id: &str) -> PluginResult<()> {
    if native_id.trim().is_empty() {
        return Err(PluginError::InvalidProperties("native_id is required".to_string()));
    }
    Ok(())
}

/// Create-only fields cannot change in place.
fn reject_replacement(prior: &Value, desired: &DnsRecordProperties) -> PluginResult<()> {
    for (field, wanted) in [
        ("record_type", desired.record_type.as_str()),
        ("name", desired.name.as_str()),
    ] {
        if let Some(current) = prior.get(field).and_then(Value::as_str)
            && current != wanted
        {
            return Err(PluginError::InvalidProperties(format!(
                "{field} cannot be changed from '{current}' to '{wanted}'; \
                 the record must be replaced"
            )));
        }
    }
    Ok(())
}

/// Provider state with the identity fields the host asked for, so later diffs
/// compare like with like.
fn reported_properties(
    mut stored: DnsRecordProperties,
    requested: &DnsRecordProperties,
) -> DnsRecordProperties {
    stored.name.clone_from(&requested.name);
    stored.record_type.clone_from(&requested.record_type);
    stored
}

fn report(operation: &str, error: &PluginError) -> (OperationErrorCode, String) {
    let code = classify_plugin_error(error);
    if is_rate_limited(error) {
        log::warn!("{operation} throttled by provider: {error}");
    } else if error.is_expected() {
        log::warn!("{operation} failed ({code}): {error}");
    } else {
        log::error!("{operation} failed ({code}): {error}");
    }
    (code, error.to_string())
}
