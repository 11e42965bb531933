//! Request descriptor types.

use serde_json::Value;

/// HTTP method for an API request.
///
/// The gateway defaults to `GET` when none is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Body of an API request.
#[derive(Clone, Debug)]
pub enum RequestBody {
    /// A JSON body, sent as `application/json` unless the caller overrides
    /// the content type.
    Json(Value),
    /// Raw bytes; the caller supplies the content type via a header.
    Raw(Vec<u8>),
    /// A multipart form (text fields and file parts). The transport layer
    /// sets the boundary content type.
    Multipart(Vec<FormPart>),
}

/// One part of a multipart form body.
#[derive(Clone, Debug)]
pub struct FormPart {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: FormValue,
}

/// Value of a multipart form part.
#[derive(Clone)]
pub enum FormValue {
    /// A plain text field.
    Text(String),
    /// A file attachment. Audio recordings travel this way; the bytes are
    /// opaque to the SDK.
    File {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    /// Create a text field part.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    /// Create a file attachment part.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File {
                filename: filename.into(),
                content_type: content_type.into(),
                bytes,
            },
        }
    }
}

// File bytes are noise in logs; show the length instead.
impl std::fmt::Debug for FormValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormValue::Text(value) => f.debug_tuple("Text").field(value).finish(),
            FormValue::File {
                filename,
                content_type,
                bytes,
            } => f
                .debug_struct("File")
                .field("filename", filename)
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Descriptor for one outgoing API request.
///
/// Paths are relative to the configured [`ApiUrl`](crate::ApiUrl) and may
/// carry a query string.
///
/// # Example
///
/// ```
/// use lingo_core::{ApiRequest, Method};
/// use serde_json::json;
///
/// let request = ApiRequest::post("api/submit-exam")
///     .json(json!({"answers": [1, 2, 0]}));
/// assert_eq!(request.method, Method::Post);
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// Endpoint path, relative to the configured host.
    pub path: String,
    /// HTTP method.
    pub method: Method,
    /// Caller-supplied header overrides. A caller `Content-Type` wins over
    /// the gateway's `application/json` default.
    pub headers: Vec<(String, String)>,
    /// Query parameters, percent-encoded by the transport.
    pub query: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    /// Create a request with the given path and the default `GET` method.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::default(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Create a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// Create a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::Post)
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Attach a raw byte body. The caller should also set a `Content-Type`
    /// header.
    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Raw(bytes));
        self
    }

    /// Attach a multipart form body.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    /// Returns the caller-supplied `Content-Type` override, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_method_is_get() {
        let request = ApiRequest::new("api/get-ai-exam");
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn content_type_lookup_is_case_insensitive() {
        let request = ApiRequest::post("api/stt").header("content-type", "audio/wav");
        assert_eq!(request.content_type(), Some("audio/wav"));
    }

    #[test]
    fn content_type_absent_by_default() {
        let request = ApiRequest::post("api/submit-exam").json(json!({"answers": []}));
        assert_eq!(request.content_type(), None);
    }

    #[test]
    fn file_part_debug_omits_bytes() {
        let part = FormPart::file("audio", "clip.wav", "audio/wav", vec![0u8; 1024]);
        let debug = format!("{:?}", part);
        assert!(debug.contains("clip.wav"));
        assert!(debug.contains("1024"));
    }
}
