use std::path::Path;
use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::credentials::ServiceAccountCredentials;
use super::{ObjectStore, StoreConnector, UploadError, UploadResult, validate_key};

pub const DEFAULT_API_BASE: &str = "https://storage.googleapis.com";
pub const DEFAULT_PUBLIC_BASE: &str = "https://storage.googleapis.com";
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.full_control";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Endpoints and limits for the GCS client. Defaults target Google's public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcsConfig {
    /// JSON/upload API root
    pub api_base: String,
    /// Root of public object URLs
    pub public_base: String,
    pub scope: String,
    pub timeout_secs: u64,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            public_base: DEFAULT_PUBLIC_BASE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Signed RS256 assertion for the OAuth2 JWT-bearer grant.
pub fn build_assertion(
    creds: &ServiceAccountCredentials,
    scope: &str,
    issued_at: i64,
) -> UploadResult<String> {
    let claims = TokenClaims {
        iss: &creds.client_email,
        scope,
        aud: &creds.token_uri,
        iat: issued_at,
        exp: issued_at + TOKEN_LIFETIME_SECS,
    };
    let key = EncodingKey::from_rsa_pem(creds.private_key.as_bytes())
        .map_err(|e| UploadError::Credentials(format!("invalid private key: {}", e)))?;
    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| UploadError::Auth(format!("failed to sign assertion: {}", e)))
}

fn join_segments(base: &str, segments: &[&str]) -> UploadResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| UploadError::Http(format!("invalid base URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| UploadError::Http(format!("base URL cannot have a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `POST {api_base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={name}`
pub fn upload_url(api_base: &str, bucket: &str, name: &str) -> UploadResult<Url> {
    let mut url = join_segments(api_base, &["upload", "storage", "v1", "b", bucket, "o"])?;
    url.query_pairs_mut()
        .append_pair("uploadType", "media")
        .append_pair("name", name);
    Ok(url)
}

/// `POST {api_base}/storage/v1/b/{bucket}/o/{name}/acl`
pub fn acl_url(api_base: &str, bucket: &str, name: &str) -> UploadResult<Url> {
    join_segments(api_base, &["storage", "v1", "b", bucket, "o", name, "acl"])
}

/// A single bucket on Google Cloud Storage, authenticated with a bearer token.
pub struct GcsStore {
    client: Client,
    bucket: String,
    access_token: String,
    config: GcsConfig,
}

impl GcsStore {
    /// Exchange the service-account key for an access token and bind to `bucket`.
    pub fn connect(
        creds: &ServiceAccountCredentials,
        bucket: &str,
        config: GcsConfig,
    ) -> UploadResult<Self> {
        if bucket.is_empty() {
            return Err(UploadError::InvalidKey("Empty bucket name".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let assertion = build_assertion(creds, &config.scope, chrono::Utc::now().timestamp())?;
        debug!(
            "Requesting access token for {} from {}",
            creds.client_email, creds.token_uri
        );
        let response = client
            .post(&creds.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            error!("Token exchange failed: {} {}", status, body);
            return Err(UploadError::Auth(format!("token endpoint returned {}: {}", status, body)));
        }
        let token: TokenResponse = response.json()?;
        debug!("Access token acquired, expires_in={:?}", token.expires_in);

        Ok(Self::with_token(client, bucket, token.access_token, config))
    }

    /// Bind to `bucket` with an already obtained access token.
    pub fn with_token(client: Client, bucket: &str, access_token: String, config: GcsConfig) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            access_token,
            config,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn check(response: reqwest::blocking::Response, what: &str) -> UploadResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        error!("GCS {} failed: {} {}", what, status, body);
        Err(UploadError::Http(format!("{} returned {}: {}", what, status, body)))
    }
}

impl ObjectStore for GcsStore {
    fn upload(&self, name: &str, data: &[u8], content_type: &str) -> UploadResult<()> {
        let name = validate_key(name)?;
        let url = upload_url(&self.config.api_base, &self.bucket, name)?;
        debug!(
            "Storing object in GCS: bucket={}, key={}, {} bytes",
            self.bucket,
            name,
            data.len()
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()?;
        Self::check(response, "upload")?;
        info!("Uploaded gs://{}/{}", self.bucket, name);
        Ok(())
    }

    fn make_public(&self, name: &str) -> UploadResult<()> {
        let name = validate_key(name)?;
        let url = acl_url(&self.config.api_base, &self.bucket, name)?;
        debug!("Granting public read on gs://{}/{}", self.bucket, name);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "entity": "allUsers", "role": "READER" }))
            .send()?;
        Self::check(response, "acl insert")
    }

    fn public_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base.trim_end_matches('/'),
            self.bucket,
            name
        )
    }
}

/// Connects `GcsStore`s from service-account key files.
#[derive(Debug, Clone, Default)]
pub struct GcsConnector {
    pub config: GcsConfig,
}

impl GcsConnector {
    pub fn new(config: GcsConfig) -> Self {
        Self { config }
    }
}

impl StoreConnector for GcsConnector {
    fn connect(&self, credentials_path: &Path, bucket: &str) -> UploadResult<Box<dyn ObjectStore>> {
        let creds = ServiceAccountCredentials::from_file(credentials_path)?;
        let store = GcsStore::connect(&creds, bucket, self.config.clone())?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(private_key: &str) -> ServiceAccountCredentials {
        ServiceAccountCredentials {
            key_type: Some("service_account".to_string()),
            project_id: None,
            client_email: "uploader@demo.iam.gserviceaccount.com".to_string(),
            private_key: private_key.to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn builds_upload_url() {
        let url = upload_url(DEFAULT_API_BASE, "my-bucket", "abc.png").unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/upload/storage/v1/b/my-bucket/o?uploadType=media&name=abc.png"
        );
    }

    #[test]
    fn acl_url_escapes_object_name() {
        let url = acl_url("http://localhost:4443/", "b", "renders/abc.png").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4443/storage/v1/b/b/o/renders%2Fabc.png/acl"
        );
    }

    #[test]
    fn public_url_uses_public_base() {
        let client = Client::new();
        let store = GcsStore::with_token(client, "my-bucket", "t".to_string(), GcsConfig::default());
        assert_eq!(
            store.public_url("abc.png"),
            "https://storage.googleapis.com/my-bucket/abc.png"
        );
        assert_eq!(store.bucket(), "my-bucket");
    }

    #[test]
    fn bad_private_key_is_a_credentials_error() {
        let err = build_assertion(&creds("not a pem"), DEFAULT_SCOPE, 1_700_000_000).unwrap_err();
        assert!(matches!(err, UploadError::Credentials(_)));
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: GcsConfig = serde_json::from_str(r#"{"api_base": "http://localhost:4443"}"#).unwrap();
        assert_eq!(cfg.api_base, "http://localhost:4443");
        assert_eq!(cfg.public_base, DEFAULT_PUBLIC_BASE);
        assert_eq!(cfg.timeout_secs, 60);
    }
}
