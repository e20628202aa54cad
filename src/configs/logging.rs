use serde::Deserialize;
use std::fmt;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const DEFAULT_NAME: &str = "openlibrary";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 로그 파일을 저장할 디렉토리로 설정 되지 않을 시 stderr에만 로그를 출력한다.
    pub dir: Option<String>,

    /// 로그 파일 이름의 접두어로 설정 되지 않을 시 `openlibrary`로 설정 된다.
    pub name: Option<String>,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    pub keep: Option<usize>,

    /// 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 WARN으로 설정 된다.
    ///
    /// 이 값은 [`tracing::Level`]로 변환 됨으로 자세한 사항은 해당 파일을 확인
    pub level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    ///
    /// 이 값은 [`rolling::Rotation`]으로 변환 됨으로 자세한 사항은 해당 파일을 확인
    pub rotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidRotation(String),
    FileAppenderFailed(String),
    AlreadyInitialized,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidLevel(l) => write!(f, "로그 레벨(level)은 TRACE, DEBUG, INFO, WARN, ERROR만 가능 합니다. (입력: {})", l),
            LoggingError::InvalidRotation(r) => write!(f, "로깅 파일 로테이션(rotation)은 DAILY, HOURLY, MINUTELY, NEVER만 가능 합니다. (입력: {})", r),
            LoggingError::FileAppenderFailed(message) => write!(f, "로그 파일을 생성할 수 없습니다. {}", message),
            LoggingError::AlreadyInitialized => write!(f, "로깅 설정이 이미 완료 되었습니다."),
        }
    }
}

impl std::error::Error for LoggingError {}

/// 프로그램에서 사용할 로깅 옵션을 설정한다.
///
/// 파일 로깅을 사용하는 경우 반환된 [`WorkerGuard`]가 유지 되는 동안에만 파일에 로그가 기록 된다.
pub fn set_global_logging_config(c: &Config) -> Result<Option<WorkerGuard>, LoggingError> {
    let level = match &c.level {
        Some(level) => parse_level(level)?,
        None => tracing::Level::WARN,
    };

    match &c.dir {
        Some(dir) => {
            let file_appender = build_file_appender(c, dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            init_subscriber(std::io::stderr.and(non_blocking), level)?;
            Ok(Some(guard))
        }
        None => {
            init_subscriber(std::io::stderr, level)?;
            Ok(None)
        }
    }
}

fn build_file_appender(c: &Config, dir: &str) -> Result<rolling::RollingFileAppender, LoggingError> {
    let rotation = match &c.rotation {
        Some(rotation) => parse_rotation(rotation)?,
        None => rolling::Rotation::DAILY,
    };

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(c.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_owned()))
        .filename_suffix("log")
        .rotation(rotation);

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    file_appender.build(dir)
        .map_err(|e| LoggingError::FileAppenderFailed(e.to_string()))
}

fn init_subscriber<W>(writer: W, level: tracing::Level) -> Result<(), LoggingError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_writer(writer)
        .with_max_level(level)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, LoggingError> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(LoggingError::InvalidRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, LoggingError> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(LoggingError::InvalidLevel(l.to_owned())),
    }
}
