//! S3 object store client.
//!
//! # Responsibilities
//! - Resolve object URLs (virtual-hosted or path-style addressing)
//! - Sign each `PUT` with Signature V4
//! - Map transport failures and non-2xx answers to `StoreError`
//!
//! # Design Decisions
//! - One request per `put`, no retries
//! - Transport timeout comes from config; nothing else bounds a call

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::StoreConfig;
use crate::store::sigv4::{self, Credentials, SigningRequest};
use crate::store::{ObjectStore, StoreError};

const SERVICE: &str = "s3";

/// Upper bound on how much of an error body is kept for diagnostics.
const MAX_ERROR_BODY: usize = 1024;

/// Writes objects to an S3 bucket over HTTPS.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: reqwest::Client,
    endpoint: Endpoint,
    bucket: String,
    region: String,
    credentials: Credentials,
}

#[derive(Debug, Clone)]
enum Endpoint {
    /// `<scheme>://<bucket>.<host>/<key>`
    VirtualHosted { scheme: String, host: String },
    /// `<base>/<bucket>/<key>`
    PathStyle { base: Url },
}

impl S3Store {
    /// Build a client from store configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base = match &config.endpoint {
            Some(raw) => Url::parse(raw)
                .map_err(|e| StoreError::InvalidRequest(format!("endpoint '{}': {}", raw, e)))?,
            None => Url::parse(&format!("https://s3.{}.amazonaws.com", config.region))
                .map_err(|e| StoreError::InvalidRequest(format!("region '{}': {}", config.region, e)))?,
        };

        // A bucket label cannot prefix an IP literal.
        let ip_host = matches!(base.host(), Some(url::Host::Ipv4(_) | url::Host::Ipv6(_)));
        let endpoint = if config.force_path_style || ip_host {
            Endpoint::PathStyle { base }
        } else {
            Endpoint::VirtualHosted {
                scheme: base.scheme().to_string(),
                host: host_with_port(&base)?,
            }
        };

        Ok(Self {
            client,
            endpoint,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            credentials: Credentials {
                access_key_id: config.access_key_id.clone(),
                secret_access_key: config.secret_access_key.clone(),
            },
        })
    }

    /// URL an object with `key` is written to.
    pub fn object_url(&self, key: &str) -> Result<Url, StoreError> {
        let encoded = sigv4::encode_key(key);
        let raw = match &self.endpoint {
            Endpoint::VirtualHosted { scheme, host } => {
                format!("{}://{}.{}/{}", scheme, self.bucket, host, encoded)
            }
            Endpoint::PathStyle { base } => format!(
                "{}/{}/{}",
                base.as_str().trim_end_matches('/'),
                self.bucket,
                encoded
            ),
        };
        Url::parse(&raw).map_err(|e| StoreError::InvalidRequest(format!("object url '{}': {}", raw, e)))
    }
}

fn host_with_port(url: &Url) -> Result<String, StoreError> {
    let host = url
        .host_str()
        .ok_or_else(|| StoreError::InvalidRequest(format!("endpoint '{}' has no host", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidRequest("empty object key".into()));
        }

        let url = self.object_url(key)?;
        let host = host_with_port(&url)?;
        let signed = sigv4::sign(
            &SigningRequest {
                method: "PUT",
                host: &host,
                canonical_uri: url.path(),
                payload: &body,
                region: &self.region,
                service: SERVICE,
            },
            &self.credentials,
            chrono::Utc::now(),
        );

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-amz-date", signed.amz_date)
            .header("x-amz-content-sha256", signed.content_sha256)
            .header("authorization", signed.authorization)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(key = %key, status = %status, "Object stored");
            return Ok(());
        }

        let mut text = response.text().await.unwrap_or_default();
        if text.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        Err(StoreError::Status {
            status: status.as_u16(),
            body: text,
        })
    }
}
