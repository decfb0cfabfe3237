use chrono::{DateTime, Local, Timelike};
use std::fmt;

#[cfg(test)]
use chrono::TimeZone;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParseTimeError {
    // ":"区切りの個数が不正
    InvalidFormat,

    // 時や分が数値として読めない
    InvalidNumber,
}

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseTimeError::InvalidFormat => {
                write!(f, "invalid format")
            }
            ParseTimeError::InvalidNumber => {
                write!(f, "invalid number")
            }
        }
    }
}

// "HH:MM"形式の文字列を0時からの経過分に変換する
// 24時以降や60分以上の値は弾かない ("25:99"は1599になる)
// 範囲まで検証したい場合は呼び出し側で行う
pub fn hhmm_to_minutes(hhmm: &str) -> Result<i64, ParseTimeError> {
    let cols: Vec<&str> = hhmm.split(':').collect();
    if cols.len() != 2 {
        return Err(ParseTimeError::InvalidFormat);
    }

    let hh: i64 = match cols[0].parse() {
        Ok(n) => n,
        Err(_) => {
            return Err(ParseTimeError::InvalidNumber);
        }
    };

    let mm: i64 = match cols[1].parse() {
        Ok(n) => n,
        Err(_) => {
            return Err(ParseTimeError::InvalidNumber);
        }
    };

    return Ok(hh * 60 + mm);
}

#[test]
fn test_hhmm_to_minutes_正常系() {
    let actual = hhmm_to_minutes("09:30");
    let expected = Ok(570);
    assert_eq!(actual, expected);
}

#[test]
fn test_hhmm_to_minutes_ゼロ埋めされていなくても読めること() {
    let actual = hhmm_to_minutes("9:05");
    let expected = Ok(545);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_hhmm_to_minutes_コロンがない場合はInvalidFormat() {
    let actual = hhmm_to_minutes("0930");
    let expected = Err(ParseTimeError::InvalidFormat);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_hhmm_to_minutes_コロンが2つある場合はInvalidFormat() {
    let actual = hhmm_to_minutes("09:30:00");
    let expected = Err(ParseTimeError::InvalidFormat);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_hhmm_to_minutes_数値として読めない場合はInvalidNumber() {
    let actual = hhmm_to_minutes("ab:cd");
    let expected = Err(ParseTimeError::InvalidNumber);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_hhmm_to_minutes_空文字列はInvalidFormat() {
    let actual = hhmm_to_minutes("");
    let expected = Err(ParseTimeError::InvalidFormat);
    assert_eq!(actual, expected);
}

#[test]
fn test_hhmm_to_minutes_範囲外の時刻も弾かないこと() {
    // 時が24以上でも分が60以上でもそのまま計算する
    let actual = hhmm_to_minutes("25:99");
    let expected = Ok(1599);
    assert_eq!(actual, expected);
}

// 0時からの経過分を"HH:MM"形式に変換する
// 1440以上の場合も日を跨がず"25:00"のように表示する
pub fn minutes_to_hhmm(minutes: i64) -> String {
    let h = minutes / 60;
    let m = minutes % 60;

    return format!("{:02}:{:02}", h, m);
}

#[test]
fn test_minutes_to_hhmm_正常系() {
    let actual = minutes_to_hhmm(570);
    let expected = String::from("09:30");
    assert_eq!(actual, expected);
}

#[test]
fn test_minutes_to_hhmm_ゼロ埋めされること() {
    let actual = minutes_to_hhmm(65);
    let expected = String::from("01:05");
    assert_eq!(actual, expected);
}

#[test]
fn test_minutes_to_hhmm_1440以上の場合は時が24を超えること() {
    let actual = minutes_to_hhmm(1500);
    let expected = String::from("25:00");
    assert_eq!(actual, expected);
}

#[test]
fn test_minutes_to_hhmm_往復変換で元に戻ること() {
    for minutes in 0..(24 * 60) {
        let actual = hhmm_to_minutes(&minutes_to_hhmm(minutes));
        let expected = Ok(minutes);
        assert_eq!(actual, expected);
    }
}

// 現在時刻を0時からの経過分に変換する
pub fn minutes_of_day(dt: &DateTime<Local>) -> i64 {
    return (dt.hour() * 60 + dt.minute()) as i64;
}

#[test]
fn test_minutes_of_day_正常系() {
    let dt = Local.with_ymd_and_hms(2023, 4, 1, 9, 30, 45).unwrap();
    let actual = minutes_of_day(&dt);
    let expected = 570;
    assert_eq!(actual, expected);
}

#[test]
fn test_minutes_of_day_0時ちょうどの場合() {
    let dt = Local.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap();
    let actual = minutes_of_day(&dt);
    let expected = 0;
    assert_eq!(actual, expected);
}
