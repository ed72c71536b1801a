//! HTTP method types.

use derive_more::Display;

/// HTTP request method documented by a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, serde::Serialize)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    #[serde(rename = "GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    #[serde(rename = "POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    #[serde(rename = "PUT")]
    Put,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    #[serde(rename = "PATCH")]
    Patch,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    #[serde(rename = "DELETE")]
    Delete,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    #[serde(rename = "HEAD")]
    Head,
}

impl Method {
    /// Returns `true` if resolved parameters are sent as the request body.
    ///
    /// For the remaining methods (GET, DELETE, HEAD) parameters are encoded
    /// into the path's query string instead.
    #[must_use]
    pub const fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Head.to_string(), "HEAD");
    }

    #[test]
    fn method_carries_body() {
        assert!(Method::Post.carries_body());
        assert!(Method::Put.carries_body());
        assert!(Method::Patch.carries_body());
        assert!(!Method::Get.carries_body());
        assert!(!Method::Delete.carries_body());
        assert!(!Method::Head.carries_body());
    }

    #[test]
    fn method_serialize() {
        let json = serde_json::to_string(&Method::Get).expect("serialize");
        assert_eq!(json, r#""GET""#);
    }
}
