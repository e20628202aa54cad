use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// 텍스트 응답 본문
///
/// decode 요청이 있고 응답 포맷이 JSON일 경우에만 [`Body::Json`]이 된다.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    /// UTF-8이 아닌 원본 응답으로 decode 요청이 없을 때 그대로 반환 된다.
    Bytes(Vec<u8>),
    Json(Value),
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text.as_str()),
            Body::Bytes(_) | Body::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Text(_) | Body::Bytes(_) => None,
            Body::Json(value) => Some(value),
        }
    }

    /// 응답을 원하는 타입으로 변환한다. 텍스트 응답은 이 시점에 JSON으로 파싱 된다.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        match self {
            Body::Text(text) => serde_json::from_str(&text)
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string())),
            Body::Bytes(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string())),
            Body::Json(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string())),
        }
    }

    /// 본문을 그대로 돌려준다. 텍스트 응답은 UTF-8 바이트로 변환 된다.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Body::Text(text) => text.into_bytes(),
            Body::Bytes(bytes) => bytes,
            Body::Json(value) => value.to_string().into_bytes(),
        }
    }
}

/// 응답 본문을 [`Body`]로 변환한다.
///
/// decode 요청이 없으면 실패하지 않는다. decode 요청 시 파싱에 실패할 경우 원문을 반환하지 않고 에러를 반환한다.
pub(crate) fn decode(body: Vec<u8>, decode: bool) -> Result<Body, ClientError> {
    if !decode {
        return Ok(match String::from_utf8(body) {
            Ok(text) => Body::Text(text),
            Err(e) => Body::Bytes(e.into_bytes()),
        });
    }

    serde_json::from_slice(&body)
        .map(Body::Json)
        .map_err(|e| {
            warn!("응답을 JSON으로 변환할 수 없습니다. ERROR: {}", e);
            ClientError::ResponseParseFailed(e.to_string())
        })
}
