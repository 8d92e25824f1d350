//! S3 object-storage sink
//!
//! Uploads crawled resources to a bucket under flat keys computed by
//! [`object_key`](crate::storage::object_key). Objects are uploaded with
//! the response's content type and a `public-read` ACL so the bucket can
//! serve the mirror directly.

use crate::config::S3Target;
use crate::storage::{object_key, StorageError, StorageResult};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use url::Url;

/// Object-storage sink writing to one S3 bucket
#[derive(Debug, Clone)]
pub struct ObjectSink {
    client: Client,
    bucket: String,
}

impl ObjectSink {
    /// Builds a sink from static credentials in the resolved config
    pub fn new(target: &S3Target) -> Self {
        let credentials = Credentials::new(
            target.access_key_id.clone(),
            target.secret_access_key.clone(),
            None,
            None,
            "petrify",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(target.region.clone()))
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: target.bucket.clone(),
        }
    }

    /// Uploads a resource body at the key mapped from its URL
    pub async fn write(&self, uri: &Url, body: &[u8], content_type: &str) -> StorageResult<String> {
        let key = object_key(uri);
        let content_type = if content_type.is_empty() {
            "text/html"
        } else {
            content_type
        };

        tracing::info!("Uploading {} with content type {}", key, content_type);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body.to_vec()))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.clone(),
                message: e.to_string(),
            })?;

        Ok(key)
    }
}
