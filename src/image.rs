use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use std::convert::Infallible;
use std::str::FromStr;
use warp::Filter;

pub const PNG: &str = "image/png";
const PROXY_PATH: &str = "/image?id=";

/// A generated image, either hosted by the provider or carried inline.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    Remote { url: String },
    Inline { content_type: String, data: Bytes },
}

impl ImageRef {
    pub fn remote(url: impl Into<String>) -> Self {
        ImageRef::Remote { url: url.into() }
    }

    pub fn inline(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        ImageRef::Inline {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Inline bytes stay valid for as long as they are held; hosted urls expire.
    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }

    /// The url a browser can load directly: the hosted url, or a data uri.
    pub fn direct_url(&self) -> String {
        match self {
            ImageRef::Remote { url } => url.clone(),
            ImageRef::Inline { content_type, data } => format!(
                "data:{};base64,{}",
                content_type,
                general_purpose::STANDARD.encode(data)
            ),
        }
    }
}

/// How image references are handed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageDelivery {
    #[default]
    Direct,
    /// Links to `GET /image`, served out of the image cache.
    Proxy,
}

impl ImageDelivery {
    pub fn render(&self, key: &str, image: &ImageRef) -> String {
        match self {
            ImageDelivery::Direct => image.direct_url(),
            ImageDelivery::Proxy => format!("{}{}", PROXY_PATH, proxy_id(key)),
        }
    }
}

impl FromStr for ImageDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ImageDelivery::Direct),
            "proxy" => Ok(ImageDelivery::Proxy),
            other => Err(format!("unknown image delivery `{}`", other)),
        }
    }
}

pub fn with_delivery(
    delivery: ImageDelivery,
) -> impl Filter<Extract = (ImageDelivery,), Error = Infallible> + Clone {
    warp::any().map(move || delivery)
}

/// Cache keys are free text, ids must survive a query string.
pub fn proxy_id(key: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(key)
}

pub fn key_from_id(id: &str) -> Option<String> {
    let raw = general_purpose::URL_SAFE_NO_PAD.decode(id).ok()?;
    String::from_utf8(raw).ok()
}
