//! JSON response envelope shared by every endpoint.
//!
//! All success and error bodies use the shape
//! `{success, message?, data?, totalMatch?}`; absent fields are omitted
//! rather than serialised as null.

use serde::Serialize;

use crate::domain::page::PageOf;

/// Response envelope. `total_match` is only present on paginated listings
/// and always reflects the filter alone, ignoring the requested window.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "totalMatch", skip_serializing_if = "Option::is_none")]
    pub total_match: Option<u64>,
}

impl<T: Serialize> Envelope<T> {
    /// Success with a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            total_match: None,
        }
    }

    /// Success with a payload and a message.
    pub fn data_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            total_match: None,
        }
    }
}

impl Envelope<()> {
    /// Success with a message only.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            total_match: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Success with a page of items and the total matching count.
    pub fn page(page: PageOf<T>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(page.items),
            total_match: Some(page.total),
        }
    }
}
