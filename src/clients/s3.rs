use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use super::{ObjectStore, PresignRequest, PutObjectRequest};
use crate::models::AppError;
use crate::utils::upstream_error;

const SERVICE: &str = "s3";

/// `ObjectStore` backed by S3.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .set_content_type(request.content_type)
            .body(ByteStream::from(request.body))
            .send()
            .await
            .map_err(|e| upstream_error(SERVICE, e))?;
        Ok(())
    }

    async fn presigned_get_url(&self, request: PresignRequest) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(request.expires_in)
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(request.bucket)
            .key(request.key)
            .presigned(presigning)
            .await
            .map_err(|e| upstream_error(SERVICE, e))?;

        Ok(presigned.uri().to_string())
    }
}
