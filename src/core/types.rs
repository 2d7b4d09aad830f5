use crate::core::errors::BlueKaiError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Ordered query arguments.
///
/// The order here is the order the values are concatenated into the signing
/// string and the order the pairs appear on the wire. Keep both in one list so
/// they cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a key/value pair
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Builder-style variant of [`QueryArgs::push`]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values concatenated with no separator, as they are signed
    pub fn concatenated_values(&self) -> String {
        self.0.iter().map(|(_, v)| v.as_str()).collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

/// A request body, either a JSON value or text that is already serialized.
///
/// Whatever [`RequestBody::to_payload`] returns is both signed and sent.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Raw(String),
}

impl RequestBody {
    /// Serialize any model into a JSON body
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, BlueKaiError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// The exact body text placed on the wire
    pub fn to_payload(&self) -> Result<String, BlueKaiError> {
        match self {
            Self::Json(value) => Ok(serde_json::to_string(value)?),
            Self::Raw(text) => Ok(text.clone()),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

/// Response payload: parsed JSON when the body parses, raw bytes otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(Vec<u8>),
}

impl ResponseBody {
    /// Parse `bytes` as JSON, keeping the raw content if that fails
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match serde_json::from_slice(&bytes) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                tracing::debug!("Response body is not JSON, returning raw content: {}", e);
                Self::Raw(bytes)
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Self::Json(_) => None,
            Self::Raw(bytes) => Some(bytes),
        }
    }
}

/// Status code and body of a completed call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_parts(self) -> (u16, ResponseBody) {
        (self.status, self.body)
    }

    /// Turn a non-2xx response into [`BlueKaiError::ApiError`]
    pub fn error_for_status(self) -> Result<Self, BlueKaiError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        };

        Err(BlueKaiError::ApiError {
            code: self.status,
            message,
        })
    }

    /// Deserialize a JSON body into a typed model
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BlueKaiError> {
        match &self.body {
            ResponseBody::Json(value) => Ok(T::deserialize(value)?),
            ResponseBody::Raw(bytes) => Err(BlueKaiError::NonJsonResponse {
                status: self.status,
                len: bytes.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_args_keep_insertion_order() {
        let args = QueryArgs::new().with("type", "url").with("partner_id", 123);

        let pairs: Vec<_> = args.iter().collect();
        assert_eq!(pairs, vec![("type", "url"), ("partner_id", "123")]);
        assert_eq!(args.concatenated_values(), "url123");
    }

    #[test]
    fn test_raw_body_is_sent_verbatim() {
        let body = RequestBody::from("{\"name\": \"x\"}");
        assert_eq!(body.to_payload().unwrap(), "{\"name\": \"x\"}");
    }

    #[test]
    fn test_json_body_is_compact() {
        let body = RequestBody::from(json!({"name": "Example Category"}));
        assert_eq!(body.to_payload().unwrap(), r#"{"name":"Example Category"}"#);
    }

    #[test]
    fn test_response_body_falls_back_to_raw() {
        let body = ResponseBody::from_bytes(b"<html>oops</html>".to_vec());
        assert_eq!(body.as_raw(), Some(&b"<html>oops</html>"[..]));
        assert!(body.as_json().is_none());

        let body = ResponseBody::from_bytes(br#"{"id": 1}"#.to_vec());
        assert_eq!(body.as_json(), Some(&json!({"id": 1})));
    }

    #[test]
    fn test_json_on_raw_body_reports_response() {
        let response = ApiResponse::new(502, ResponseBody::Raw(b"<html/>".to_vec()));
        let err = response.json::<Value>().unwrap_err();
        assert!(matches!(
            err,
            BlueKaiError::NonJsonResponse { status: 502, len: 7 }
        ));
    }

    #[test]
    fn test_error_for_status() {
        let ok = ApiResponse::new(201, ResponseBody::Json(json!({})));
        assert!(ok.error_for_status().is_ok());

        let err = ApiResponse::new(403, ResponseBody::Raw(b"denied".to_vec()))
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, BlueKaiError::ApiError { code: 403, ref message } if message == "denied"));
    }
}
