//! Cloudflare HTTP request methods

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpResponse, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// Send one request and unwrap the response envelope.
    ///
    /// Non-2xx statuses and `success: false` envelopes are both handed to the
    /// error mapper together with the status they arrived with.
    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;
            log::debug!(
                "[{}] Request Body: {}",
                self.provider_name(),
                truncate_for_log(&String::from_utf8_lossy(&bytes))
            );
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        if !response.is_success() {
            return Err(self.api_failure(&response, context));
        }

        let envelope: CloudflareResponse<T> =
            HttpUtils::parse_json(&response.body, self.provider_name())?;

        if !envelope.success {
            let (code, message) = envelope.first_error();
            return Err(self.map_error(
                RawApiError {
                    status: response.status,
                    code,
                    message,
                    retry_after: response.retry_after,
                },
                context,
            ));
        }

        Ok(envelope)
    }

    /// Classify a non-2xx response, reading the envelope when there is one.
    fn api_failure(&self, response: &HttpResponse, context: ErrorContext) -> ProviderError {
        let raw = match serde_json::from_str::<CloudflareResponse<serde_json::Value>>(&response.body)
        {
            Ok(envelope) => {
                let (code, message) = envelope.first_error();
                RawApiError {
                    status: response.status,
                    code,
                    message,
                    retry_after: None,
                }
            }
            Err(_) => RawApiError::new(response.status, truncate_for_log(&response.body)),
        }
        .retry_after(response.retry_after);

        let error = self.map_error(raw, context);
        if error.is_expected() {
            log::warn!("{error}");
        } else {
            log::error!("{error}");
        }
        error
    }

    /// GET a single resource.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        self.send::<T, ()>(Method::GET, path, None, context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("response is missing the result field"))
    }

    /// GET a collection, keeping the pagination info.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<(Vec<T>, Option<super::types::CloudflareResultInfo>)> {
        let envelope = self
            .send::<Vec<T>, ()>(Method::GET, path, None, context)
            .await?;
        Ok((envelope.result.unwrap_or_default(), envelope.result_info))
    }

    /// POST a body and return the created resource.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, context: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send::<T, B>(Method::POST, path, Some(body), context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("response is missing the result field"))
    }

    /// PUT a body over an existing resource.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B, context: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send::<T, B>(Method::PUT, path, Some(body), context)
            .await?
            .result
            .ok_or_else(|| self.parse_error("response is missing the result field"))
    }

    /// DELETE a resource.
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        self.send::<serde_json::Value, ()>(Method::DELETE, path, None, context)
            .await
            .map(|_| ())
    }
}
