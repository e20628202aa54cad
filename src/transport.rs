use crate::error::TransportError;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 응답 본문을 읽는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// 첫 번째 줄만 읽는다. 줄바꿈 문자(`\n`)가 있다면 포함 된다.
    FirstLine,
    /// 본문 전체를 읽는다.
    #[default]
    AllLines,
}

impl ReadMode {
    pub fn apply(self, mut body: Vec<u8>) -> Vec<u8> {
        if self == ReadMode::FirstLine {
            if let Some(pos) = body.iter().position(|b| *b == b'\n') {
                body.truncate(pos + 1);
            }
        }
        body
    }
}

/// 완성된 URL로 GET 요청을 보내고 응답 본문을 반환한다.
///
/// 2xx 이외의 응답, 연결 실패, 비어있는 본문은 모두 [`TransportError`]로 반환 되어야 하며
/// 재시도는 하지 않는다.
pub trait Transport {
    fn fetch(&self, url: &str, mode: ReadMode) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str, mode: ReadMode) -> Result<Vec<u8>, TransportError> {
        (**self).fetch(url, mode)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fetch(&self, url: &str, mode: ReadMode) -> Result<Vec<u8>, TransportError> {
        (**self).fetch(url, mode)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// 설정 되지 않을시 타임아웃 없이 응답을 기다린다.
    pub timeout_secs: Option<u64>,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
}

/// `reqwest` 블로킹 클라이언트를 사용한 전송 구현
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(&TransportOptions::default())
    }

    pub fn with_options(options: &TransportOptions) -> Result<Self, TransportError> {
        let redirect = if options.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let mut builder = reqwest::blocking::Client::builder()
            .redirect(redirect)
            .timeout(options.timeout_secs.map(Duration::from_secs));

        if let Some(agent) = &options.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        let client = builder.build()
            .map_err(|e| TransportError::RequestFailed(format!("cannot build http client, ERROR: {:?}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, mode: ReadMode) -> Result<Vec<u8>, TransportError> {
        debug!("GET {} ({:?})", url, mode);

        let response = self.client.get(url)
            .send()
            .map_err(|e| {
                warn!("요청이 실패 하였습니다. URL: {}, ERROR: {:?}", url, e);
                TransportError::RequestFailed(format!("URL: {}, ERROR: {:?}", url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("응답 코드가 올바르지 않습니다. URL: {}, STATUS: {}", url, status);
            return Err(TransportError::UnexpectedStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()
            .map_err(|e| TransportError::BodyReadFailed(format!("URL: {}, ERROR: {:?}", url, e)))?;
        if body.is_empty() {
            return Err(TransportError::EmptyBody(url.to_owned()));
        }

        Ok(mode.apply(body.to_vec()))
    }
}
