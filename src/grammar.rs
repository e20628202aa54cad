//! 요청 매개변수 문법
//!
//! 모든 검사는 문자열의 시작 위치에 고정된 접두 매칭이다. 공백은 제거하지 않으며,
//! 유효한 토큰이 문자열 중간에만 있는 경우는 거부 된다.
use regex::Regex;
use std::sync::LazyLock;

static BIBKEY: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:ISBN|OCLC|LCCN|OLID)"));
static FORMAT: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:json|javascript)"));
static JSCMD: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:viewapi|data|details)"));

static COVER_KEY: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:isbn|oclc|lccn|olid|id)"));
static AUTHOR_KEY: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:olid|id)"));
// 대소문자 구분
static SIZE: LazyLock<Regex> = LazyLock::new(|| anchored(r"S|M|L"));

static ID_TYPE: LazyLock<Regex> = LazyLock::new(|| anchored(r"(?i:isbn|lccn|oclc|olid)"));

static YEAR: LazyLock<Regex> = LazyLock::new(|| anchored(r"[0-9]{4}"));
static MONTH: LazyLock<Regex> = LazyLock::new(|| anchored(r"1[0-2]|0[1-9]"));
static DAY: LazyLock<Regex> = LazyLock::new(|| anchored(r"3[01]|[12][0-9]|0[1-9]"));
static KIND: LazyLock<Regex> = LazyLock::new(|| anchored(r"add-cover|add-book|merge-authors|update"));

fn anchored(alternatives: &str) -> Regex {
    Regex::new(&format!(r"\A(?:{})", alternatives)).unwrap()
}

pub fn is_bibkey(s: &str) -> bool {
    BIBKEY.is_match(s)
}

pub fn is_format(s: &str) -> bool {
    FORMAT.is_match(s)
}

pub fn is_jscmd(s: &str) -> bool {
    JSCMD.is_match(s)
}

/// 도서 표지 요청에 사용할 수 있는 키 (isbn, oclc, lccn, olid, id)
pub fn is_cover_key(s: &str) -> bool {
    COVER_KEY.is_match(s)
}

/// 저자 사진 요청에 사용할 수 있는 키 (olid, id)
pub fn is_author_key(s: &str) -> bool {
    AUTHOR_KEY.is_match(s)
}

pub fn is_size(s: &str) -> bool {
    SIZE.is_match(s)
}

pub fn is_id_type(s: &str) -> bool {
    ID_TYPE.is_match(s)
}

pub fn is_year(s: &str) -> bool {
    YEAR.is_match(s)
}

pub fn is_month(s: &str) -> bool {
    MONTH.is_match(s)
}

/// 월 별 일수는 확인하지 않는다. (예: 02/31 허용)
pub fn is_day(s: &str) -> bool {
    DAY.is_match(s)
}

pub fn is_kind(s: &str) -> bool {
    KIND.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bibkey_is_case_insensitive() {
        for key in ["ISBN", "isbn", "Oclc", "lccn", "OLID"] {
            assert!(is_bibkey(key), "{}", key);
        }
        assert!(!is_bibkey("ASIN"));
        assert!(!is_bibkey(""));
    }

    #[test]
    fn matching_is_anchored_at_start() {
        assert!(!is_bibkey("x-ISBN"));
        assert!(!is_bibkey(" ISBN"));
        assert!(!is_jscmd("raw data"));
        assert!(!is_kind("an update"));
        assert!(!is_year(" 2020"));
    }

    #[test]
    fn matching_accepts_prefix() {
        assert!(is_bibkey("ISBN13"));
        assert!(is_format("jsonp"));
        assert!(is_year("20201"));
        assert!(is_month("10x"));
    }

    #[test]
    fn size_and_kind_are_case_sensitive() {
        assert!(is_size("S"));
        assert!(is_size("M"));
        assert!(is_size("L"));
        assert!(!is_size("s"));
        assert!(!is_size("XL"));

        assert!(is_kind("add-book"));
        assert!(!is_kind("ADD-BOOK"));
        assert!(!is_kind("Update"));
    }

    #[test]
    fn author_key_is_a_subset_of_cover_key() {
        for key in ["olid", "ID", "Olid"] {
            assert!(is_author_key(key));
            assert!(is_cover_key(key));
        }
        assert!(is_cover_key("isbn"));
        assert!(!is_author_key("isbn"));
    }

    #[test]
    fn month_range() {
        for month in ["01", "09", "10", "12"] {
            assert!(is_month(month), "{}", month);
        }
        for month in ["00", "13", "1", "", "a1"] {
            assert!(!is_month(month), "{}", month);
        }
    }

    #[test]
    fn day_range_ignores_month_length() {
        for day in ["01", "09", "10", "29", "30", "31"] {
            assert!(is_day(day), "{}", day);
        }
        for day in ["00", "32", "40", "7"] {
            assert!(!is_day(day), "{}", day);
        }
    }

    #[test]
    fn year_needs_four_digits() {
        assert!(is_year("2020"));
        assert!(is_year("0001"));
        assert!(!is_year("202"));
        assert!(!is_year("abcd"));
    }

    #[test]
    fn id_type_and_format_and_jscmd() {
        assert!(is_id_type("ISBN"));
        assert!(is_id_type("olid"));
        assert!(!is_id_type("id"));

        assert!(is_format("JSON"));
        assert!(is_format("javascript"));
        assert!(!is_format("xml"));

        assert!(is_jscmd("viewapi"));
        assert!(is_jscmd("Data"));
        assert!(is_jscmd("details"));
        assert!(!is_jscmd("summary"));
    }
}
