//! Cloudflare `DnsApi` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsApi, ErrorContext, ProviderErrorMapper};
use crate::types::{CloudflareDnsRecord, PaginationParams, RecordBody, RecordPage};

use super::{CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS};

#[async_trait]
impl DnsApi for CloudflareProvider {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn zone_name(&self, zone_id: &str) -> Result<String> {
        let zone: CloudflareZone = self
            .get(&format!("/zones/{zone_id}"), ErrorContext::zone(zone_id))
            .await?;
        log::debug!("[{}] zone {} is {}", self.provider_name(), zone.id, zone.name);
        Ok(zone.name)
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<CloudflareDnsRecord> {
        self.get(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            ErrorContext::record(zone_id, record_id),
        )
        .await
    }

    async fn create_record(
        &self,
        zone_id: &str,
        body: &RecordBody,
    ) -> Result<CloudflareDnsRecord> {
        log::info!(
            "[{}] creating {} record {}",
            self.provider_name(),
            body.type_name(),
            body.name()
        );
        self.post(
            &format!("/zones/{zone_id}/dns_records"),
            body,
            ErrorContext::zone(zone_id),
        )
        .await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        body: &RecordBody,
    ) -> Result<CloudflareDnsRecord> {
        log::info!(
            "[{}] overwriting {} record {record_id}",
            self.provider_name(),
            body.type_name()
        );
        self.put(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            body,
            ErrorContext::record(zone_id, record_id),
        )
        .await
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        log::info!("[{}] deleting record {record_id}", self.provider_name());
        self.delete(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            ErrorContext::record(zone_id, record_id),
        )
        .await
    }

    async fn list_records(&self, zone_id: &str, params: &PaginationParams) -> Result<RecordPage> {
        let params = params.validated(MAX_PAGE_SIZE_RECORDS);
        let (records, info) = self
            .get_page::<CloudflareDnsRecord>(
                &format!(
                    "/zones/{zone_id}/dns_records?page={}&per_page={}",
                    params.page, params.per_page
                ),
                ErrorContext::zone(zone_id),
            )
            .await?;

        let (page, per_page, total_count) = info.map_or(
            (params.page, params.per_page, None),
            |i| {
                (
                    i.page.unwrap_or(params.page),
                    i.per_page.unwrap_or(params.per_page),
                    i.total_count,
                )
            },
        );

        Ok(RecordPage {
            records,
            page,
            per_page,
            total_count,
        })
    }
}
