//! Image uploads for form fields. The dashboard sends images inline as data
//! URLs; they are stored in S3 (or MinIO) and replaced by a public URL.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Upper bound on a decoded upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Unsupported image: {0}")]
    InvalidImage(String),

    #[error("Image upload failed: {0}")]
    Upload(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Recognises raster formats by their magic bytes.
    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }
}

/// Decoded image bytes ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub format: ImageFormat,
}

impl ImagePayload {
    /// Accepts `data:image/<type>;base64,<data>` or bare base64 of a PNG,
    /// JPEG, GIF or WebP file. The bytes must be one of those formats
    /// whatever the declared type says; SVG and other markup is refused.
    pub fn decode(input: &str) -> Result<Self, MediaError> {
        let (declared, encoded) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .ok_or_else(|| MediaError::InvalidImage("malformed data URL".into()))?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    MediaError::InvalidImage("data URL must be base64-encoded".into())
                })?;
                let format = ImageFormat::from_mime(mime)
                    .ok_or_else(|| MediaError::InvalidImage(format!("content type `{mime}`")))?;
                (Some(format), data)
            }
            None => (None, input),
        };

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| MediaError::InvalidImage(format!("invalid base64: {e}")))?;
        if bytes.is_empty() {
            return Err(MediaError::InvalidImage("empty image".into()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::InvalidImage(format!(
                "larger than {} MB",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }

        let format = ImageFormat::sniff(&bytes)
            .ok_or_else(|| MediaError::InvalidImage("unrecognised image format".into()))?;
        if declared.is_some_and(|declared| declared != format) {
            return Err(MediaError::InvalidImage(format!(
                "content is {} but was declared otherwise",
                format.content_type()
            )));
        }

        Ok(Self {
            bytes: Bytes::from(bytes),
            format,
        })
    }
}

/// Stores an image and returns the URL it is publicly served from.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, image: ImagePayload) -> Result<String, MediaError>;
}

pub struct S3MediaUploader {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaUploader {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaUploader for S3MediaUploader {
    async fn upload(&self, image: ImagePayload) -> Result<String, MediaError> {
        let key = format!("uploads/{}.{}", Uuid::new_v4(), image.format.extension());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(image.bytes))
            .content_type(image.format.content_type())
            .send()
            .await
            .map_err(|e| MediaError::Upload(format!("S3 upload failed: {e}")))?;

        info!("Uploaded image to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
