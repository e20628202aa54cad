use crate::api::Endpoint;
use crate::error::{ClientError, RequestError};
use crate::grammar;
use crate::response::{self, Body};
use crate::transport::{ReadMode, Transport};
use chrono::{Datelike, NaiveDate};

/// RecentChanges API 기본 URL
pub const DEFAULT_BASE_URL: &str = "http://openlibrary.org/recentchanges";

pub const DEFAULT_LIMIT: u32 = 100;
pub const DEFAULT_OFFSET: u32 = 0;
pub const MAX_LIMIT: u32 = 1000;
pub const MAX_OFFSET: u32 = 10000;

/// 연도 → 월 → 일 순서로 좁혀지는 날짜 필터
///
/// 상위 항목 없이 하위 항목만 존재하는 상태는 표현할 수 없다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    Any,
    Year(String),
    Month(String, String),
    Day(String, String, String),
}

impl DateFilter {
    /// 경로에 사용될 세그먼트 목록
    pub fn segments(&self) -> Vec<&str> {
        match self {
            DateFilter::Any => vec![],
            DateFilter::Year(y) => vec![y.as_str()],
            DateFilter::Month(y, m) => vec![y.as_str(), m.as_str()],
            DateFilter::Day(y, m, d) => vec![y.as_str(), m.as_str(), d.as_str()],
        }
    }
}

/// 검증이 완료된 RecentChanges 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChangesRequest {
    date: DateFilter,
    kind: Option<String>,
    limit: u32,
    offset: u32,
    bot: Option<bool>,
}

impl Default for RecentChangesRequest {
    fn default() -> Self {
        Self {
            date: DateFilter::Any,
            kind: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            bot: None,
        }
    }
}

impl RecentChangesRequest {
    pub fn builder() -> RecentChangesRequestBuilder {
        RecentChangesRequestBuilder::new()
    }

    pub fn date(&self) -> &DateFilter {
        &self.date
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn bot(&self) -> Option<bool> {
        self.bot
    }

    /// 날짜 필터와 종류(kind)의 조합으로 경로를 결정한다.
    ///
    /// | kind | 날짜        | 경로                          |
    /// |------|-------------|-------------------------------|
    /// | 없음 | 없음        | `.json`                       |
    /// | 없음 | y[/m[/d]]   | `/y[/m[/d]].json`             |
    /// | 있음 | 없음        | `/kind.json`                  |
    /// | 있음 | y[/m[/d]]   | `/y[/m[/d]]/kind.json`        |
    pub fn path(&self) -> String {
        let mut segments = self.date.segments();
        if let Some(kind) = &self.kind {
            segments.push(kind.as_str());
        }

        if segments.is_empty() {
            ".json".to_owned()
        } else {
            format!("/{}.json", segments.join("/"))
        }
    }

    pub fn query(&self) -> String {
        let mut query = format!("limit={}&offset={}", self.limit, self.offset);
        if let Some(bot) = self.bot {
            query.push_str(&format!("&bot={}", bot));
        }
        query
    }

    pub fn relative_url(&self) -> String {
        format!("{}?{}", self.path(), self.query())
    }
}

#[derive(Debug, Default)]
pub struct RecentChangesRequestBuilder {
    year: Option<String>,
    month: Option<String>,
    day: Option<String>,
    kind: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    bot: Option<bool>,
}

impl RecentChangesRequestBuilder {
    pub fn new() -> Self {
        RecentChangesRequestBuilder::default()
    }

    pub fn year<S: Into<String>>(mut self, year: S) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn month<S: Into<String>>(mut self, month: S) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn day<S: Into<String>>(mut self, day: S) -> Self {
        self.day = Some(day.into());
        self
    }

    /// 연도, 월, 일을 한 번에 설정한다.
    pub fn date(self, date: NaiveDate) -> Self {
        self.year(format!("{:04}", date.year()))
            .month(format!("{:02}", date.month()))
            .day(format!("{:02}", date.day()))
    }

    pub fn kind<S: Into<String>>(mut self, kind: S) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// `true`일 경우 봇의 변경만, `false`일 경우 사람의 변경만 조회한다.
    pub fn bot(mut self, bot: bool) -> Self {
        self.bot = Some(bot);
        self
    }

    pub fn build(self) -> Result<RecentChangesRequest, RequestError> {
        let date = resolve_date(self.year, self.month, self.day)?;

        if let Some(kind) = &self.kind {
            if !grammar::is_kind(kind) {
                return Err(RequestError::InvalidKind(kind.clone()));
            }
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit > MAX_LIMIT {
            return Err(RequestError::InvalidLimit(limit));
        }

        let offset = self.offset.unwrap_or(DEFAULT_OFFSET);
        if offset > MAX_OFFSET {
            return Err(RequestError::InvalidOffset(offset));
        }

        Ok(RecentChangesRequest {
            date,
            kind: self.kind,
            limit,
            offset,
            bot: self.bot,
        })
    }
}

fn resolve_date(year: Option<String>, month: Option<String>, day: Option<String>) -> Result<DateFilter, RequestError> {
    if let Some(year) = &year {
        if !grammar::is_year(year) {
            return Err(RequestError::InvalidYear(year.clone()));
        }
    }

    if let Some(month) = &month {
        if year.is_none() {
            return Err(RequestError::MonthWithoutYear);
        }
        if !grammar::is_month(month) {
            return Err(RequestError::InvalidMonth(month.clone()));
        }
    }

    if let Some(day) = &day {
        if month.is_none() {
            return Err(RequestError::DayWithoutMonth);
        }
        if !grammar::is_day(day) {
            return Err(RequestError::InvalidDay(day.clone()));
        }
    }

    Ok(match (year, month, day) {
        (Some(y), Some(m), Some(d)) => DateFilter::Day(y, m, d),
        (Some(y), Some(m), None) => DateFilter::Month(y, m),
        (Some(y), None, _) => DateFilter::Year(y),
        (None, _, _) => DateFilter::Any,
    })
}

/// RecentChanges API 클라이언트
#[derive(Debug, Clone)]
pub struct RecentChangesClient<T> {
    endpoint: Endpoint<T>,
    read_mode: ReadMode,
}

impl<T: Transport> RecentChangesClient<T> {
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

    /// 응답은 항상 JSON이므로 `decode` 설정만으로 변환 여부가 결정 된다.
    pub fn request(&self, request: &RecentChangesRequest, decode: bool) -> Result<Body, ClientError> {
        let body = self.endpoint.get(&request.relative_url(), self.read_mode)?;
        response::decode(body, decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn path_of(year: Option<&str>, month: Option<&str>, day: Option<&str>, kind: Option<&str>) -> String {
        let mut builder = RecentChangesRequest::builder();
        if let Some(y) = year {
            builder = builder.year(y);
        }
        if let Some(m) = month {
            builder = builder.month(m);
        }
        if let Some(d) = day {
            builder = builder.day(d);
        }
        if let Some(k) = kind {
            builder = builder.kind(k);
        }
        builder.build().unwrap().path()
    }

    #[test]
    fn path_without_kind() {
        assert_eq!(path_of(None, None, None, None), ".json");
        assert_eq!(path_of(Some("2020"), None, None, None), "/2020.json");
        assert_eq!(path_of(Some("2020"), Some("01"), None, None), "/2020/01.json");
        assert_eq!(path_of(Some("2020"), Some("01"), Some("31"), None), "/2020/01/31.json");
    }

    #[test]
    fn path_with_kind() {
        assert_eq!(path_of(None, None, None, Some("add-cover")), "/add-cover.json");
        assert_eq!(path_of(Some("2020"), None, None, Some("update")), "/2020/update.json");
        assert_eq!(path_of(Some("2020"), Some("12"), None, Some("add-book")), "/2020/12/add-book.json");
        assert_eq!(
            path_of(Some("2020"), Some("12"), Some("05"), Some("merge-authors")),
            "/2020/12/05/merge-authors.json"
        );
    }

    #[test]
    fn default_query() {
        let request = RecentChangesRequest::builder().build().unwrap();
        assert_eq!(request, RecentChangesRequest::default());
        assert_eq!(request.relative_url(), ".json?limit=100&offset=0");
    }

    #[test]
    fn bot_is_tri_state() {
        let humans = RecentChangesRequest::builder().bot(false).build().unwrap();
        let bots = RecentChangesRequest::builder().bot(true).limit(5).offset(10).build().unwrap();

        assert_eq!(humans.query(), "limit=100&offset=0&bot=false");
        assert_eq!(bots.query(), "limit=5&offset=10&bot=true");
    }

    #[test]
    fn month_requires_year_and_day_requires_month() {
        let err = RecentChangesRequest::builder().month("01").build().unwrap_err();
        assert_eq!(err, RequestError::MonthWithoutYear);

        let err = RecentChangesRequest::builder().year("2020").day("01").build().unwrap_err();
        assert_eq!(err, RequestError::DayWithoutMonth);

        let err = RecentChangesRequest::builder().day("01").build().unwrap_err();
        assert_eq!(err, RequestError::DayWithoutMonth);
    }

    #[test]
    fn validation_order_reports_first_failure() {
        let err = RecentChangesRequest::builder()
            .year("20")
            .month("13")
            .kind("delete")
            .limit(2000)
            .build()
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidYear("20".to_owned()));

        let err = RecentChangesRequest::builder()
            .year("2020")
            .month("13")
            .kind("delete")
            .build()
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidMonth("13".to_owned()));

        let err = RecentChangesRequest::builder()
            .year("2020")
            .month("02")
            .day("32")
            .build()
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidDay("32".to_owned()));

        let err = RecentChangesRequest::builder()
            .kind("Update")
            .limit(2000)
            .build()
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidKind("Update".to_owned()));
    }

    #[test]
    fn limit_and_offset_bounds() {
        assert!(RecentChangesRequest::builder().limit(1000).build().is_ok());
        assert_eq!(
            RecentChangesRequest::builder().limit(1001).build().unwrap_err(),
            RequestError::InvalidLimit(1001)
        );
        assert!(RecentChangesRequest::builder().offset(10000).build().is_ok());
        assert_eq!(
            RecentChangesRequest::builder().offset(10001).build().unwrap_err(),
            RequestError::InvalidOffset(10001)
        );
    }

    #[test]
    fn day_is_not_checked_against_month_length() {
        let request = RecentChangesRequest::builder()
            .year("2021")
            .month("02")
            .day("31")
            .build()
            .unwrap();

        assert_eq!(request.path(), "/2021/02/31.json");
    }

    #[test]
    fn date_fills_zero_padded_segments() {
        let date = NaiveDate::from_ymd_opt(2011, 3, 7).unwrap();
        let request = RecentChangesRequest::builder().date(date).kind("add-book").build().unwrap();

        assert_eq!(
            request.date(),
            &DateFilter::Day("2011".to_owned(), "03".to_owned(), "07".to_owned())
        );
        assert_eq!(request.path(), "/2011/03/07/add-book.json");
    }

    #[test]
    fn request_joins_path_and_query_with_question_mark() {
        let transport = RecordingTransport::replying("[{\"id\": \"1\", \"kind\": \"update\"}]\n");
        let client = RecentChangesClient::new(&transport);
        let request = RecentChangesRequest::builder()
            .year("2020")
            .kind("update")
            .limit(1)
            .bot(false)
            .build()
            .unwrap();

        let body = client.request(&request, true).unwrap();

        assert_eq!(body, Body::Json(json!([{"id": "1", "kind": "update"}])));
        assert_eq!(transport.calls(), vec![(
            "http://openlibrary.org/recentchanges/2020/update.json?limit=1&offset=0&bot=false".to_owned(),
            ReadMode::FirstLine,
        )]);
    }
}
