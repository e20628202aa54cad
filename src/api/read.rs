use crate::api::Endpoint;
use crate::error::{ClientError, RequestError};
use crate::grammar;
use crate::response::{self, Body};
use crate::transport::{ReadMode, Transport};

/// Read API 기본 URL
pub const DEFAULT_BASE_URL: &str = "http://openlibrary.org/api/volumes/brief/";

fn validate_id_type(id_type: &str) -> Result<(), RequestError> {
    if grammar::is_id_type(id_type) {
        Ok(())
    } else {
        Err(RequestError::InvalidIdType(id_type.to_owned()))
    }
}

/// 단일 도서 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSingleRequest {
    id_type: String,
    id_value: String,
}

impl ReadSingleRequest {
    pub fn new<T: Into<String>, V: Into<String>>(id_type: T, id_value: V) -> Result<Self, RequestError> {
        let id_type = id_type.into();
        validate_id_type(&id_type)?;

        Ok(Self {
            id_type,
            id_value: id_value.into(),
        })
    }

    pub fn path(&self) -> String {
        format!("{}/{}.json", self.id_type, self.id_value)
    }
}

/// 여러 도서를 한 번에 요청한다.
///
/// 하나의 그룹은 같은 도서를 가리키는 식별자들(동의어)로 구성 된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMultiRequest {
    groups: Vec<Vec<(String, String)>>,
}

impl ReadMultiRequest {
    pub fn builder() -> ReadMultiRequestBuilder {
        ReadMultiRequestBuilder::new()
    }

    pub fn groups(&self) -> &[Vec<(String, String)>] {
        &self.groups
    }

    /// `type:value;type:value|type:value` 형태로 직렬화 된 그룹 목록
    pub fn serialized_groups(&self) -> String {
        self.groups.iter()
            .map(|group| {
                group.iter()
                    .map(|(id_type, id_value)| format!("{}:{}", id_type, id_value))
                    .collect::<Vec<_>>()
                    .join(";")
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn path(&self) -> String {
        format!("json/{}", self.serialized_groups())
    }
}

#[derive(Debug, Default)]
pub struct ReadMultiRequestBuilder {
    groups: Vec<Vec<(String, String)>>,
    strict: bool,
}

impl ReadMultiRequestBuilder {
    pub fn new() -> Self {
        ReadMultiRequestBuilder::default()
    }

    pub fn group<I, K, V>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.groups.push(ids.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// 설정 시 비어있는 그룹 목록과 비어있는 그룹을 허용하지 않는다.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Result<ReadMultiRequest, RequestError> {
        if self.strict && (self.groups.is_empty() || self.groups.iter().any(|g| g.is_empty())) {
            return Err(RequestError::EmptyRequestGroups);
        }

        for (id_type, _) in self.groups.iter().flatten() {
            validate_id_type(id_type)?;
        }

        Ok(ReadMultiRequest { groups: self.groups })
    }
}

/// Read API 클라이언트
#[derive(Debug, Clone)]
pub struct ReadClient<T> {
    endpoint: Endpoint<T>,
    read_mode: ReadMode,
}

impl<T: Transport> ReadClient<T> {
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

    pub fn single_request(&self, id_type: &str, id_value: &str, decode: bool) -> Result<Body, ClientError> {
        let request = ReadSingleRequest::new(id_type, id_value)?;
        let body = self.endpoint.get(&request.path(), self.read_mode)?;
        response::decode(body, decode)
    }

    pub fn multi_request(&self, request: &ReadMultiRequest, decode: bool) -> Result<Body, ClientError> {
        let body = self.endpoint.get(&request.path(), self.read_mode)?;
        response::decode(body, decode)
    }
}
