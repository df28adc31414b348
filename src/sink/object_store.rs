use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};

use super::signing::{self, AwsCredentials, PutRequest};
use super::SinkError;

// ---

/// Uploads telemetry to an S3-compatible bucket with a path-style `PUT`.
///
/// With credentials every request is SigV4-signed, which is what AWS itself
/// requires. Without them requests go out anonymously; that only suits a local
/// MinIO or LocalStack whose bucket accepts anonymous writes.
#[derive(Debug, Clone)]
pub struct ObjectStoreSink {
    client: Client,
    endpoint: String,
    region: String,
    bucket: String,
    credentials: Option<AwsCredentials>,
}

impl ObjectStoreSink {
    // ---
    /// `endpoint` falls back to the regional AWS endpoint when `None`.
    pub fn new(
        bucket: impl Into<String>,
        region: &str,
        endpoint: Option<String>,
        credentials: Option<AwsCredentials>,
    ) -> Self {
        // ---
        let endpoint = endpoint
            .unwrap_or_else(|| format!("https://s3.{region}.amazonaws.com"))
            .trim_end_matches('/')
            .to_string();

        Self {
            client: Client::new(),
            endpoint,
            region: region.to_string(),
            bucket: bucket.into(),
            credentials,
        }
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    pub async fn upload(&self, key: &str, data: Vec<u8>) -> Result<String, SinkError> {
        // ---
        let url = self.object_url(key);
        let size = data.len();
        tracing::info!("Uploading {} bytes to {}", size, url);

        let mut request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "application/json");

        match &self.credentials {
            Some(credentials) => {
                let parsed = Url::parse(&url).map_err(|e| SinkError::Endpoint {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
                let host = match (parsed.host_str(), parsed.port()) {
                    (Some(host), Some(port)) => format!("{host}:{port}"),
                    (Some(host), None) => host.to_string(),
                    (None, _) => {
                        return Err(SinkError::Endpoint {
                            url,
                            reason: "no host".to_string(),
                        })
                    }
                };

                let signed = signing::sign_put(
                    &PutRequest {
                        host: &host,
                        path: parsed.path(),
                        region: &self.region,
                        body: &data,
                    },
                    credentials,
                    Utc::now(),
                );

                request = request
                    .header(AUTHORIZATION, signed.authorization)
                    .header("x-amz-date", signed.amz_date)
                    .header("x-amz-content-sha256", signed.content_sha256);
                if let Some(token) = signed.security_token {
                    request = request.header("x-amz-security-token", token);
                }
            }
            None => tracing::warn!("No AWS credentials configured; sending an anonymous upload"),
        }

        let response = request
            .body(data)
            .send()
            .await
            .map_err(|source| SinkError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                url,
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Upload of '{}' to bucket '{}' complete", key, self.bucket);
        Ok(url)
    }
}
