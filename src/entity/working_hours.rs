use crate::entity::time_of_day::minutes_to_hhmm;
use std::fmt;

// 空き時間を探す範囲の外枠。[start, end)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorkingHours {
    start_minutes: i64,
    end_minutes: i64,
}

impl WorkingHours {
    // start < endを満たさない場合はNoneを返す
    pub fn new(start_minutes: i64, end_minutes: i64) -> Option<Self> {
        if start_minutes >= end_minutes {
            return None;
        }

        Some(Self {
            start_minutes,
            end_minutes,
        })
    }

    pub fn get_start_minutes(&self) -> i64 {
        return self.start_minutes;
    }

    pub fn get_end_minutes(&self) -> i64 {
        return self.end_minutes;
    }

    pub fn get_span_minutes(&self) -> i64 {
        return self.end_minutes - self.start_minutes;
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            minutes_to_hhmm(self.start_minutes),
            minutes_to_hhmm(self.end_minutes)
        )
    }
}

#[test]
fn test_new_正常系() {
    let working_hours_opt = WorkingHours::new(480, 1080);

    match working_hours_opt {
        Some(working_hours) => {
            assert_eq!(working_hours.get_start_minutes(), 480);
            assert_eq!(working_hours.get_end_minutes(), 1080);
            assert_eq!(working_hours.get_span_minutes(), 600);
        }
        None => {
            panic!("Noneとなってはいけないケース");
        }
    }
}

#[test]
#[allow(non_snake_case)]
fn test_new_開始と終了が同じ場合はNone() {
    let actual = WorkingHours::new(480, 480);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_new_開始と終了が逆転している場合はNone() {
    let actual = WorkingHours::new(1080, 480);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
fn test_display_整形されること() {
    let working_hours = WorkingHours::new(480, 1080).unwrap();
    let actual = format!("{}", working_hours);
    let expected = String::from("08:00-18:00");
    assert_eq!(actual, expected);
}
