use std::fmt;

/// 요청 매개변수 검증 실패
///
/// 모든 검증은 네트워크 호출 전에 수행 되며, 첫 번째로 실패한 항목만 반환 된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// bibkey 타입이 ISBN|OCLC|LCCN|OLID와 매칭 되지 않거나 값이 비어 있음
    InvalidBibKeys(String),
    InvalidFormat(String),
    InvalidCommand(String),
    InvalidCoverKey(String),
    InvalidAuthorKey(String),
    InvalidSize(String),
    /// 이미지 요청의 값이 비어 있음
    EmptyValue,
    InvalidIdType(String),
    /// strict 모드에서 비어있는 그룹 목록 혹은 그룹이 입력됨
    EmptyRequestGroups,
    InvalidYear(String),
    InvalidMonth(String),
    InvalidDay(String),
    InvalidKind(String),
    InvalidLimit(u32),
    InvalidOffset(u32),
    /// 연도 없이 월이 입력됨
    MonthWithoutYear,
    /// 월 없이 일이 입력됨
    DayWithoutMonth,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBibKeys(key) => write!(f, "bibkey must be ISBN, OCLC, LCCN or OLID with a value: {:?}", key),
            RequestError::InvalidFormat(v) => write!(f, "format must be json or javascript: {:?}", v),
            RequestError::InvalidCommand(v) => write!(f, "jscmd must be viewapi, data or details: {:?}", v),
            RequestError::InvalidCoverKey(v) => write!(f, "key must be isbn, oclc, lccn, olid or id: {:?}", v),
            RequestError::InvalidAuthorKey(v) => write!(f, "key must be olid or id: {:?}", v),
            RequestError::InvalidSize(v) => write!(f, "size must be S, M or L: {:?}", v),
            RequestError::EmptyValue => write!(f, "value must not be empty"),
            RequestError::InvalidIdType(v) => write!(f, "id type must be isbn, lccn, oclc or olid: {:?}", v),
            RequestError::EmptyRequestGroups => write!(f, "request groups must not be empty"),
            RequestError::InvalidYear(v) => write!(f, "year must match [0-9]{{4}}: {:?}", v),
            RequestError::InvalidMonth(v) => write!(f, "month must match 1[0-2]|0[1-9]: {:?}", v),
            RequestError::InvalidDay(v) => write!(f, "day must match 3[01]|[12][0-9]|0[1-9]: {:?}", v),
            RequestError::InvalidKind(v) => write!(f, "kind must match add-cover|add-book|merge-authors|update: {:?}", v),
            RequestError::InvalidLimit(v) => write!(f, "limit must be less or equal to 1000: {}", v),
            RequestError::InvalidOffset(v) => write!(f, "offset must be less or equal to 10000: {}", v),
            RequestError::MonthWithoutYear => write!(f, "month requires year"),
            RequestError::DayWithoutMonth => write!(f, "day requires month"),
        }
    }
}

impl std::error::Error for RequestError {}

/// 전송 계층 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 연결 실패 등 요청 자체가 실패함
    RequestFailed(String),
    /// 2xx 이외의 응답 코드
    UnexpectedStatus { url: String, status: u16 },
    EmptyBody(String),
    BodyReadFailed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestFailed(message) => write!(f, "request failed, {}", message),
            TransportError::UnexpectedStatus { url, status } => write!(f, "unexpected status {} from {}", status, url),
            TransportError::EmptyBody(url) => write!(f, "empty response body from {}", url),
            TransportError::BodyReadFailed(message) => write!(f, "failed to read response body, {}", message),
        }
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    InvalidRequest(RequestError),
    Transport(TransportError),
    /// decode 요청 시 응답 본문이 올바른 JSON이 아님
    ResponseParseFailed(String),
}

impl ClientError {
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, ClientError::InvalidRequest(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::ResponseParseFailed(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidRequest(err) => write!(f, "invalid request, {}", err),
            ClientError::Transport(err) => write!(f, "transport error, {}", err),
            ClientError::ResponseParseFailed(message) => write!(f, "response is not valid json, {}", message),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::InvalidRequest(err) => Some(err),
            ClientError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RequestError> for ClientError {
    fn from(err: RequestError) -> Self {
        ClientError::InvalidRequest(err)
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Transport(err)
    }
}
