//! Gateway response wrapper.

use serde_json::Value;

/// Outcome of a single transaction as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Approved,
    Declined,
    Error,
    HeldForReview,
}

impl ResponseCode {
    /// Parses the gateway's numeric code (`"1"` to `"4"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(ResponseCode::Approved),
            "2" => Some(ResponseCode::Declined),
            "3" => Some(ResponseCode::Error),
            "4" => Some(ResponseCode::HeldForReview),
            _ => None,
        }
    }
}

/// The decoded response body of an authorize or purchase call.
///
/// The body is kept as received, with no shape validation; `None` means the
/// gateway returned something that was not JSON. The accessors read well-known
/// fields and return `None` when a field is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizeResponse {
    data: Option<Value>,
}

impl AuthorizeResponse {
    pub fn new(data: Option<Value>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    /// Top-level `messages.resultCode`: `Ok` or `Error`.
    pub fn result_code(&self) -> Option<&str> {
        self.str_at("/messages/resultCode")
    }

    pub fn message_code(&self) -> Option<&str> {
        self.str_at("/messages/message/0/code")
    }

    pub fn message_text(&self) -> Option<&str> {
        self.str_at("/messages/message/0/text")
    }

    pub fn response_code(&self) -> Option<ResponseCode> {
        self.str_at("/transactionResponse/responseCode")
            .and_then(ResponseCode::from_code)
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.str_at("/transactionResponse/transId")
    }

    pub fn auth_code(&self) -> Option<&str> {
        self.str_at("/transactionResponse/authCode")
    }

    /// True when the request was accepted and the transaction approved.
    pub fn is_successful(&self) -> bool {
        self.result_code() == Some("Ok") && self.response_code() == Some(ResponseCode::Approved)
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.data.as_ref()?.pointer(pointer)?.as_str()
    }
}
