use crate::configs::Settings;
use crate::error::{ClientError, TransportError};
use crate::transport::{HttpTransport, ReadMode, Transport};
use std::sync::Arc;
use tracing::debug;

pub mod books;
pub mod covers;
pub mod read;
pub mod recent_changes;

pub use books::{BibKey, BooksClient, BooksRequest};
pub use covers::{CoversClient, ImageRequest, Namespace};
pub use read::{ReadClient, ReadMultiRequest, ReadSingleRequest};
pub use recent_changes::{DateFilter, RecentChangesClient, RecentChangesRequest};

/// 기본 URL과 전송 계층을 묶은 API 엔드포인트
///
/// 요청 별 상태를 가지지 않으며 URL은 기본 URL과 상대 경로를 그대로 이어 붙여 만든다.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> Endpoint<T> {
    pub(crate) fn new<S: Into<String>>(base_url: S, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str, mode: ReadMode) -> Result<Vec<u8>, ClientError> {
        let url = self.url(path);
        debug!("request url: {}", url);

        Ok(self.transport.fetch(&url, mode)?)
    }
}

/// 네 개의 하위 API 클라이언트를 하나의 전송 계층으로 묶은 클라이언트
pub struct OpenLibrary<T> {
    pub books: BooksClient<T>,
    pub covers: CoversClient<T>,
    pub read: ReadClient<T>,
    pub recent_changes: RecentChangesClient<T>,
}

impl<T: Transport + Clone> OpenLibrary<T> {
    pub fn new(transport: T) -> Self {
        Self {
            books: BooksClient::new(transport.clone()),
            covers: CoversClient::new(transport.clone()),
            read: ReadClient::new(transport.clone()),
            recent_changes: RecentChangesClient::new(transport),
        }
    }

    /// 텍스트 응답을 읽는 방식을 모든 텍스트 API에 설정한다. 이미지 API는 항상 전체를 읽는다.
    pub fn with_read_mode(self, mode: ReadMode) -> Self {
        Self {
            books: self.books.with_read_mode(mode),
            covers: self.covers,
            read: self.read.with_read_mode(mode),
            recent_changes: self.recent_changes.with_read_mode(mode),
        }
    }
}

impl OpenLibrary<Arc<HttpTransport>> {
    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::with_options(&settings.transport)?);

        Ok(Self {
            books: BooksClient::with_base_url(settings.books_url.as_str(), transport.clone()),
            covers: CoversClient::with_base_url(settings.covers_url.as_str(), transport.clone()),
            read: ReadClient::with_base_url(settings.read_url.as_str(), transport.clone()),
            recent_changes: RecentChangesClient::with_base_url(settings.recent_changes_url.as_str(), transport),
        })
    }
}
