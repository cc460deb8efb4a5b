//! Wire contract of the AI proxy endpoint consumed by the chat panel.
//!
//! # Responsibility
//! - Define request/reply payloads exchanged with the proxy.
//! - Resolve inline image payloads into MIME type + base64 data.
//!
//! # Invariants
//! - Payload field names are camelCase on the wire.
//! - A request carries a non-blank message or an image.

pub mod image;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use image::{parse_inline_image, InlineImage, DEFAULT_IMAGE_MIME_TYPE};

/// Request body accepted by the proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub message: String,
    /// Data URL or raw base64 image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    /// System prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ignite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_calls: Option<Value>,
}

impl ProxyRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image_base64: impl Into<String>) -> Self {
        self.image_base64 = Some(image_base64.into());
        self
    }

    /// Inline image resolved from `image_base64`, if any.
    pub fn image(&self) -> Option<InlineImage> {
        self.image_base64
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_inline_image)
    }

    pub fn validate(&self) -> Result<(), ProxyError> {
        if self.message.trim().is_empty() && self.image().is_none() {
            return Err(ProxyError::EmptyRequest);
        }
        Ok(())
    }
}

/// Reply body returned by the proxy: a result or an error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyReply {
    Success {
        text: String,
        #[serde(rename = "functionCalls", default)]
        function_calls: Vec<Value>,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// Successful model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyOutput {
    pub text: String,
    pub function_calls: Vec<Value>,
}

impl ProxyReply {
    pub fn into_result(self) -> Result<ProxyOutput, ProxyError> {
        match self {
            Self::Success {
                text,
                function_calls,
            } => Ok(ProxyOutput {
                text,
                function_calls,
            }),
            Self::Failure { error, details } => Err(ProxyError::Upstream { error, details }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Neither a message nor an image was supplied.
    EmptyRequest,
    /// The proxy answered with an error object.
    Upstream {
        error: String,
        details: Option<String>,
    },
}

impl Display for ProxyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRequest => write!(f, "request needs a message or an image"),
            Self::Upstream {
                error,
                details: Some(details),
            } => write!(f, "proxy error: {error} ({details})"),
            Self::Upstream {
                error,
                details: None,
            } => write!(f, "proxy error: {error}"),
        }
    }
}

impl Error for ProxyError {}
