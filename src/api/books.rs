use crate::api::Endpoint;
use crate::error::{ClientError, RequestError};
use crate::grammar;
use crate::response::{self, Body};
use crate::transport::{ReadMode, Transport};
use std::fmt;

/// Books API 기본 URL
pub const DEFAULT_BASE_URL: &str = "http://openlibrary.org/api/";

const DEFAULT_FORMAT: &str = "json";
const DEFAULT_JSCMD: &str = "viewapi";

/// 타입이 지정된 서지 식별자 (예: `ISBN:0451526538`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibKey {
    key_type: String,
    value: String,
}

impl BibKey {
    pub fn new<K: Into<String>, V: Into<String>>(key_type: K, value: V) -> Self {
        Self {
            key_type: key_type.into(),
            value: value.into(),
        }
    }

    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn validate(&self) -> Result<(), RequestError> {
        if grammar::is_bibkey(&self.key_type) && !self.value.is_empty() {
            Ok(())
        } else {
            Err(RequestError::InvalidBibKeys(self.to_string()))
        }
    }
}

impl fmt::Display for BibKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, self.value)
    }
}

/// 식별자 목록을 `type:value,type:value` 형태로 직렬화 한다.
///
/// 값은 검증 하거나 이스케이프 하지 않고 그대로 이어 붙인다. 따라서 `,`를 포함한 값은
/// 다시 `,`로 나누었을 때 원래 목록으로 복원 되지 않는다.
pub fn serialize_bibkeys(bibkeys: &[BibKey]) -> String {
    bibkeys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// 검증이 완료된 Books API 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooksRequest {
    bibkeys: Vec<BibKey>,
    format: String,
    jscmd: String,
}

impl BooksRequest {
    pub fn builder() -> BooksRequestBuilder {
        BooksRequestBuilder::new()
    }

    pub fn bibkeys(&self) -> &[BibKey] {
        &self.bibkeys
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn jscmd(&self) -> &str {
        &self.jscmd
    }

    /// 응답을 JSON으로 해석할 수 있는 포맷인지 여부
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    pub fn path(&self) -> String {
        format!(
            "books?bibkeys={}&jscmd={}&format={}",
            serialize_bibkeys(&self.bibkeys),
            self.jscmd,
            self.format
        )
    }
}

#[derive(Debug, Default)]
pub struct BooksRequestBuilder {
    bibkeys: Vec<BibKey>,
    format: Option<String>,
    jscmd: Option<String>,
}

impl BooksRequestBuilder {
    pub fn new() -> Self {
        BooksRequestBuilder::default()
    }

    pub fn bibkey<K: Into<String>, V: Into<String>>(mut self, key_type: K, value: V) -> Self {
        self.bibkeys.push(BibKey::new(key_type, value));
        self
    }

    pub fn bibkeys<I, K, V>(mut self, bibkeys: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.bibkeys.extend(bibkeys.into_iter().map(|(k, v)| BibKey::new(k, v)));
        self
    }

    pub fn format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn jscmd<S: Into<String>>(mut self, jscmd: S) -> Self {
        self.jscmd = Some(jscmd.into());
        self
    }

    pub fn build(self) -> Result<BooksRequest, RequestError> {
        for key in &self.bibkeys {
            key.validate()?;
        }

        let format = self.format.unwrap_or_else(|| DEFAULT_FORMAT.to_owned());
        if !grammar::is_format(&format) {
            return Err(RequestError::InvalidFormat(format));
        }

        let jscmd = self.jscmd.unwrap_or_else(|| DEFAULT_JSCMD.to_owned());
        if !grammar::is_jscmd(&jscmd) {
            return Err(RequestError::InvalidCommand(jscmd));
        }

        Ok(BooksRequest {
            bibkeys: self.bibkeys,
            format,
            jscmd,
        })
    }
}

/// Books API 클라이언트
#[derive(Debug, Clone)]
pub struct BooksClient<T> {
    endpoint: Endpoint<T>,
    read_mode: ReadMode,
}

impl<T: Transport> BooksClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, transport)
    }

    pub fn with_base_url<S: Into<String>>(base_url: S, transport: T) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, transport),
            read_mode: ReadMode::FirstLine,
        }
    }

    pub fn with_read_mode(mut self, mode: ReadMode) -> Self {
        self.read_mode = mode;
        self
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }

    /// `decode`가 설정 되어 있고 포맷이 json일 경우에만 응답을 JSON으로 변환한다.
    pub fn request(&self, request: &BooksRequest, decode: bool) -> Result<Body, ClientError> {
        let body = self.endpoint.get(&request.path(), self.read_mode)?;
        response::decode(body, decode && request.is_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn build_with_defaults() {
        let request = BooksRequest::builder()
            .bibkey("ISBN", "0451526538")
            .build()
            .unwrap();

        assert_eq!(request.format(), "json");
        assert_eq!(request.jscmd(), "viewapi");
        assert_eq!(request.path(), "books?bibkeys=ISBN:0451526538&jscmd=viewapi&format=json");
    }

    #[test]
    fn serialized_bibkeys_split_back_into_pairs() {
        let pairs = vec![("ISBN", "0451526538"), ("oclc", "1234"), ("LCCN", "93005405"), ("OLID", "OL123M")];
        let request = BooksRequest::builder()
            .bibkeys(pairs.clone())
            .build()
            .unwrap();

        let serialized = serialize_bibkeys(request.bibkeys());
        let restored: Vec<(&str, &str)> = serialized.split(',')
            .map(|pair| pair.split_once(':').unwrap())
            .collect();

        assert_eq!(restored, pairs);
    }

    #[test]
    fn values_with_comma_are_serialized_verbatim() {
        let request = BooksRequest::builder()
            .bibkey("ISBN", "0451526538,OLID:OL1M")
            .build()
            .unwrap();

        let serialized = serialize_bibkeys(request.bibkeys());

        assert_eq!(serialized, "ISBN:0451526538,OLID:OL1M");
        assert_eq!(serialized.split(',').count(), 2);
    }

    #[test]
    fn key_type_case_is_preserved() {
        let request = BooksRequest::builder()
            .bibkey("isbn", "1")
            .bibkey("Olid", "OL1M")
            .build()
            .unwrap();

        assert_eq!(serialize_bibkeys(request.bibkeys()), "isbn:1,Olid:OL1M");
    }

    #[test]
    fn empty_bibkeys_are_valid() {
        let request = BooksRequest::builder().build().unwrap();
        assert_eq!(request.path(), "books?bibkeys=&jscmd=viewapi&format=json");
    }

    #[test]
    fn one_invalid_bibkey_rejects_the_whole_request() {
        let err = BooksRequest::builder()
            .bibkey("ISBN", "1")
            .bibkey("ASIN", "B000")
            .bibkey("OLID", "OL1M")
            .build()
            .unwrap_err();

        assert_eq!(err, RequestError::InvalidBibKeys("ASIN:B000".to_owned()));
    }

    #[test]
    fn empty_bibkey_value_is_rejected() {
        let err = BooksRequest::builder().bibkey("ISBN", "").build().unwrap_err();
        assert_eq!(err, RequestError::InvalidBibKeys("ISBN:".to_owned()));
    }

    #[test]
    fn invalid_format_and_jscmd() {
        let err = BooksRequest::builder().format("xml").build().unwrap_err();
        assert_eq!(err, RequestError::InvalidFormat("xml".to_owned()));

        let err = BooksRequest::builder().jscmd("summary").build().unwrap_err();
        assert_eq!(err, RequestError::InvalidCommand("summary".to_owned()));
    }

    #[test]
    fn request_uses_first_line_and_decodes_json() {
        let transport = RecordingTransport::replying("{\"ISBN:1\": {\"title\": \"t\"}}\ntrailing");
        let client = BooksClient::new(&transport);
        let request = BooksRequest::builder()
            .bibkey("ISBN", "1")
            .jscmd("data")
            .build()
            .unwrap();

        let body = client.request(&request, true).unwrap();

        assert_eq!(body, Body::Json(json!({"ISBN:1": {"title": "t"}})));
        assert_eq!(transport.calls(), vec![(
            "http://openlibrary.org/api/books?bibkeys=ISBN:1&jscmd=data&format=json".to_owned(),
            ReadMode::FirstLine,
        )]);
    }

    #[test]
    fn javascript_format_is_never_decoded() {
        let transport = RecordingTransport::replying("var _OLBookInfo = {};");
        let client = BooksClient::with_base_url("http://localhost/api/", &transport);
        let request = BooksRequest::builder()
            .bibkey("ISBN", "1")
            .format("javascript")
            .build()
            .unwrap();

        let body = client.request(&request, true).unwrap();

        assert_eq!(body, Body::Text("var _OLBookInfo = {};".to_owned()));
    }

    #[test]
    fn decode_failure_does_not_fall_back_to_text() {
        let transport = RecordingTransport::replying("<html>");
        let client = BooksClient::new(&transport);
        let request = BooksRequest::builder().bibkey("ISBN", "1").build().unwrap();

        let err = client.request(&request, true).unwrap_err();

        assert!(err.is_decode());
    }
}
