use serde::{Deserialize, Serialize};

use crate::error::ClaimCheckError;
use crate::models::{Brief, CaseRecord};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClaimCheckRequest {
    Ping,
    Health,
    Check {
        brief: Brief,
        case: CaseRecord,
    },
    ResolveGuideline {
        citation: String,
    },
    ValidateCode {
        code: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClaimCheckResponse {
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub version: String,
}

impl ClaimCheckResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: "ok".to_string(),
            data: Some(data),
            error: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(msg.into()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn pong() -> Self {
        Self::ok(serde_json::json!({"pong": true}))
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Decode one MessagePack request frame.
pub fn decode_request(frame: &[u8]) -> Result<ClaimCheckRequest, ClaimCheckError> {
    rmp_serde::from_slice(frame)
        .map_err(|e| ClaimCheckError::Ipc(format!("invalid request frame: {}", e)))
}

/// Encode a response as MessagePack with named fields.
pub fn encode_response(response: &ClaimCheckResponse) -> Result<Vec<u8>, ClaimCheckError> {
    rmp_serde::to_vec_named(response)
        .map_err(|e| ClaimCheckError::Ipc(format!("failed to encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tagged_by_action() {
        let req: ClaimCheckRequest = serde_json::from_value(serde_json::json!({
            "action": "resolve_guideline",
            "citation": "InterQual 2026"
        }))
        .unwrap();
        assert!(matches!(req, ClaimCheckRequest::ResolveGuideline { ref citation } if citation == "InterQual 2026"));

        let req: ClaimCheckRequest = serde_json::from_value(serde_json::json!({
            "action": "check",
            "brief": {},
            "case": { "procedure_codes": ["72148"] }
        }))
        .unwrap();
        match req {
            ClaimCheckRequest::Check { case, .. } => assert_eq!(case.procedure_codes, vec!["72148"]),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_request_survives_messagepack() {
        let req = ClaimCheckRequest::ValidateCode {
            code: "E0601".to_string(),
        };
        let bytes = rmp_serde::to_vec_named(&req).unwrap();
        let back: ClaimCheckRequest = rmp_serde::from_slice(&bytes).unwrap();
        assert!(matches!(back, ClaimCheckRequest::ValidateCode { code } if code == "E0601"));
    }

    #[test]
    fn test_decode_request_rejects_garbage() {
        let err = decode_request(&[0xc1, 0x00, 0xff]).unwrap_err();
        assert!(matches!(err, ClaimCheckError::Ipc(_)));
        assert!(err.to_string().starts_with("IPC error: invalid request frame"));

        let frame = rmp_serde::to_vec_named(&ClaimCheckRequest::Ping).unwrap();
        assert!(matches!(decode_request(&frame), Ok(ClaimCheckRequest::Ping)));
    }

    #[test]
    fn test_encode_response_round_trips() {
        let bytes = encode_response(&ClaimCheckResponse::pong()).unwrap();
        let back: ClaimCheckResponse = rmp_serde::from_slice(&bytes).unwrap();
        assert!(back.is_ok());
        assert_eq!(back.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_response_envelopes() {
        let ok = ClaimCheckResponse::pong();
        assert!(ok.is_ok());
        assert_eq!(ok.data.unwrap()["pong"], true);

        let err = ClaimCheckResponse::err("boom");
        assert!(!err.is_ok());
        assert_eq!(err.error.as_deref(), Some("boom"));
        assert!(err.data.is_none());
    }
}
