//! AWS SDK S3 client implementation of the `ObjectStore` port.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use tracing::instrument;

use crate::config::S3Settings;
use crate::error::{StorageError, StorageResult};
use crate::ports::object_store::{ObjectStore, service_error_message};

/// Provider name reported for credentials taken from the config file.
const CREDENTIALS_PROVIDER: &str = "elena-storage-s3";

/// `ObjectStore` backed by the AWS SDK for Rust.
///
/// One request per call: no retries beyond the SDK's standard retry
/// policy and no client-side caching.
#[derive(Debug, Clone)]
pub struct AwsObjectStore {
    s3_client: S3Client,
}

impl AwsObjectStore {
    /// Build a client from the `StorageManager` settings.
    ///
    /// Explicit keys take precedence; when both are absent the default
    /// credential chain (environment, profile, instance metadata) is used.
    pub async fn connect(settings: &S3Settings) -> StorageResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region_name.clone()));

        match (&settings.access_key_id, &settings.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                let credentials = Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    CREDENTIALS_PROVIDER,
                );
                loader = loader.credentials_provider(credentials);
            }
            (None, None) => {}
            _ => {
                return Err(StorageError::InvalidSettings(
                    "access_key_id and secret_access_key must be set together".to_string(),
                ));
            }
        }

        if let Some(ref endpoint_url) = settings.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self::from_client(S3Client::from_conf(s3_config)))
    }

    /// Wrap an existing S3 client.
    pub const fn from_client(s3_client: S3Client) -> Self {
        Self { s3_client }
    }
}

/// Translate an SDK failure into a storage error, keeping the service text.
fn sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(service_err) = err.as_service_error() {
        let code = service_err.code().unwrap_or("Unknown");
        let message = service_error_message(operation, code, service_err.message().unwrap_or(""));
        return match code {
            "NoSuchKey" | "NotFound" => StorageError::not_found(message),
            _ => StorageError::backend(message),
        };
    }
    StorageError::backend(format!(
        "{operation} failed: {}",
        DisplayErrorContext(&err)
    ))
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    #[instrument(skip(self))]
    async fn list_buckets(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .s3_client
                .list_buckets()
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|err| sdk_error("ListBuckets", err))?;

            names.extend(
                output
                    .buckets()
                    .iter()
                    .filter_map(|bucket| bucket.name().map(str::to_string)),
            );

            match output.continuation_token() {
                Some(token) if !token.is_empty() => continuation_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(names)
    }

    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let response = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| sdk_error("GetObject", err))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::backend(format!("GetObject body read failed: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    #[instrument(skip(self, body), fields(size = body.len()))]
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> StorageResult<()> {
        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| sdk_error("PutObject", err))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.s3_client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| sdk_error("DeleteObject", err))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use aws_smithy_http_client::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;

    use super::*;

    fn settings() -> S3Settings {
        S3Settings {
            access_key_id: Some("AKIDEXAMPLE".into()),
            secret_access_key: None,
            region_name: "eu-west-1".into(),
            bucket_name: "elena.dev".into(),
            endpoint_url: None,
            force_path_style: false,
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_half_configured_credentials() {
        let result = AwsObjectStore::connect(&settings()).await;
        assert!(matches!(result, Err(StorageError::InvalidSettings(_))));
    }

    #[tokio::test]
    async fn test_connect_with_explicit_credentials_and_endpoint() {
        let mut settings = settings();
        settings.secret_access_key = Some("secret".into());
        settings.endpoint_url = Some("http://127.0.0.1:9000".into());
        settings.force_path_style = true;

        // Building the client performs no network I/O.
        assert!(AwsObjectStore::connect(&settings).await.is_ok());
    }

    /// Client whose single request is answered with `status` and `body`.
    fn replay_store(uri: &str, status: u16, body: &'static str) -> AwsObjectStore {
        let event = ReplayEvent::new(
            http::Request::builder()
                .uri(uri)
                .body(SdkBody::empty())
                .unwrap(),
            http::Response::builder()
                .status(status)
                .body(SdkBody::from(body))
                .unwrap(),
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
            .http_client(StaticReplayClient::new(vec![event]))
            .build();

        AwsObjectStore::from_client(S3Client::from_conf(config))
    }

    #[tokio::test]
    async fn test_get_missing_key_keeps_service_message() {
        let store = replay_store(
            "https://elena.dev.s3.eu-west-1.amazonaws.com/BotStatus/none.json",
            404,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>NoSuchKey</Code>\
             <Message>The specified key does not exist.</Message>\
             <Key>BotStatus/none.json</Key><RequestId>4442587FB7D0A2F9</RequestId></Error>",
        );

        let err = store
            .get_object("elena.dev", "BotStatus/none.json")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred (NoSuchKey) when calling the GetObject operation: \
             The specified key does not exist."
        );
    }

    #[tokio::test]
    async fn test_get_access_denied_is_not_a_missing_key() {
        let store = replay_store(
            "https://elena.dev.s3.eu-west-1.amazonaws.com/BotStatus/b.json",
            403,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>AccessDenied</Code><Message>Access Denied</Message>\
             <RequestId>4442587FB7D0A2F9</RequestId></Error>",
        );

        let err = store
            .get_object("elena.dev", "BotStatus/b.json")
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "An error occurred (AccessDenied) when calling the GetObject operation: Access Denied"
        );
    }

    #[tokio::test]
    async fn test_list_buckets_returns_names() {
        let store = replay_store(
            "https://s3.eu-west-1.amazonaws.com/?x-id=ListBuckets",
            200,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <ListAllMyBucketsResult>\
             <Owner><ID>owner</ID></Owner>\
             <Buckets>\
             <Bucket><Name>elena.dev</Name><CreationDate>2024-01-19T17:27:33.000Z</CreationDate></Bucket>\
             <Bucket><Name>elena.prod</Name><CreationDate>2024-01-19T17:27:33.000Z</CreationDate></Bucket>\
             </Buckets>\
             </ListAllMyBucketsResult>",
        );

        let names = store.list_buckets().await.unwrap();
        assert_eq!(names, vec!["elena.dev".to_string(), "elena.prod".to_string()]);
    }
}
