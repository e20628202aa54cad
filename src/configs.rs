use crate::api::{books, covers, read, recent_changes};
use crate::transport::TransportOptions;
use serde::Deserialize;
use std::env;

pub mod logging;

/// 환경 변수 접두어로 `OPENLIBRARY__BOOKS_URL`, `OPENLIBRARY__TRANSPORT__TIMEOUT_SECS` 처럼 사용한다.
const ENV_PREFIX: &str = "OPENLIBRARY";

/// 클라이언트 설정
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub books_url: String,
    pub covers_url: String,
    pub read_url: String,
    pub recent_changes_url: String,
    pub transport: TransportOptions,
    pub log: logging::Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            books_url: books::DEFAULT_BASE_URL.to_owned(),
            covers_url: covers::DEFAULT_BASE_URL.to_owned(),
            read_url: read::DEFAULT_BASE_URL.to_owned(),
            recent_changes_url: recent_changes::DEFAULT_BASE_URL.to_owned(),
            transport: TransportOptions::default(),
            log: logging::Config::default(),
        }
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// `config/{RUN_MODE}.json` 파일과 환경 변수로 설정을 읽는다.
///
/// 설정 파일은 없어도 되며, 설정 되지 않은 값은 [`Settings::default`]를 따른다.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    load_settings_from(&format!("config/{}.json", run_mode))
}

pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    config.try_deserialize()
}
