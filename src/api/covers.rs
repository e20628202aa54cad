use crate::api::Endpoint;
use crate::error::{ClientError, RequestError};
use crate::grammar;
use crate::transport::{ReadMode, Transport};

/// Covers API 기본 URL
pub const DEFAULT_BASE_URL: &str = "http://covers.openlibrary.org/";

/// 이미지 종류에 따른 URL 네임스페이스
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// 도서 표지
    Book,
    /// 저자 사진
    Author,
}

impl Namespace {
    pub fn segment(&self) -> &'static str {
        match self {
            Namespace::Book => "b",
            Namespace::Author => "a",
        }
    }

    fn validate_key(&self, key: &str) -> Result<(), RequestError> {
        match self {
            Namespace::Book if grammar::is_cover_key(key) => Ok(()),
            Namespace::Book => Err(RequestError::InvalidCoverKey(key.to_owned())),
            Namespace::Author if grammar::is_author_key(key) => Ok(()),
            Namespace::Author => Err(RequestError::InvalidAuthorKey(key.to_owned())),
        }
    }
}

/// 검증이 완료된 이미지 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    namespace: Namespace,
    key: String,
    value: String,
    size: String,
}

impl ImageRequest {
    pub fn new(namespace: Namespace, key: &str, value: &str, size: &str) -> Result<Self, RequestError> {
        namespace.validate_key(key)?;

        if value.is_empty() {
            return Err(RequestError::EmptyValue);
        }

        if !grammar::is_size(size) {
            return Err(RequestError::InvalidSize(size.to_owned()));
        }

        Ok(Self {
            namespace,
            key: key.to_owned(),
            value: value.to_owned(),
            size: size.to_owned(),
        })
    }

    pub fn book_cover(key: &str, value: &str, size: &str) -> Result<Self, RequestError> {
        Self::new(Namespace::Book, key, value, size)
    }

    pub fn author_photo(key: &str, value: &str, size: &str) -> Result<Self, RequestError> {
        Self::new(Namespace::Author, key, value, size)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn filename(&self) -> String {
        format!("{}-{}.jpg", self.value, self.size)
    }

    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.namespace.segment(), self.key, self.filename())
    }
}

/// Covers API 클라이언트
///
/// 이미지는 항상 응답 전체를 읽어 바이트 그대로 반환한다.
#[derive(Debug, Clone)]
pub struct CoversClient<T> {
    endpoint: Endpoint<T>,
}

impl<T: Transport> CoversClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, transport)
    }

    pub fn with_base_url<S: Into<String>>(base_url: S, transport: T) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, transport),
        }
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }

    pub fn request_book_cover(&self, key: &str, value: &str, size: &str) -> Result<Vec<u8>, ClientError> {
        self.request(&ImageRequest::book_cover(key, value, size)?)
    }

    pub fn request_author_photo(&self, key: &str, value: &str, size: &str) -> Result<Vec<u8>, ClientError> {
        self.request(&ImageRequest::author_photo(key, value, size)?)
    }

    pub fn request(&self, request: &ImageRequest) -> Result<Vec<u8>, ClientError> {
        self.endpoint.get(&request.path(), ReadMode::AllLines)
    }
}
