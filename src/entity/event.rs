use crate::entity::time_of_day::minutes_to_hhmm;
use std::fmt;
use uuid::Uuid;

#[cfg(test)]
use uuid::uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    id: Uuid,
    title: String,
    description: String,
    start_minutes: i64,
    end_minutes: i64,
}

impl Event {
    // [start, end)の半開区間。start < endを満たさない場合はNoneを返す
    pub fn new(
        title: &str,
        description: &str,
        start_minutes: i64,
        end_minutes: i64,
    ) -> Option<Self> {
        if start_minutes >= end_minutes {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            start_minutes,
            end_minutes,
        })
    }

    // 保存済みのデータを読み戻す時用。idを引き継ぐ
    // ファイルが手で編集されてstart >= endになっていてもそのまま保持する
    // (読み飛ばすかどうかは使う側が判断する)
    pub fn new_with_id(
        id: Uuid,
        title: &str,
        description: &str,
        start_minutes: i64,
        end_minutes: i64,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            start_minutes,
            end_minutes,
        }
    }

    pub fn get_id(&self) -> Uuid {
        return self.id;
    }

    pub fn get_title(&self) -> &str {
        return &self.title;
    }

    pub fn get_description(&self) -> &str {
        return &self.description;
    }

    pub fn get_start_minutes(&self) -> i64 {
        return self.start_minutes;
    }

    pub fn get_end_minutes(&self) -> i64 {
        return self.end_minutes;
    }

    pub fn get_duration_minutes(&self) -> i64 {
        return self.end_minutes - self.start_minutes;
    }

    // 半開区間同士の重なり判定。端が接しているだけの場合は重ならない扱い
    pub fn overlaps_with(&self, other: &Event) -> bool {
        return self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes;
    }

    // 更新後にstart < endが崩れる場合は何も変更せずfalseを返す
    pub fn apply_update(&mut self, update: &EventUpdate) -> bool {
        let new_start_minutes = update.get_start_minutes().unwrap_or(self.start_minutes);
        let new_end_minutes = update.get_end_minutes().unwrap_or(self.end_minutes);

        if new_start_minutes >= new_end_minutes {
            return false;
        }

        match update.get_title() {
            Some(title) => {
                self.title = title.to_string();
            }
            None => {}
        }

        match update.get_description() {
            Some(description) => {
                self.description = description.to_string();
            }
            None => {}
        }

        self.start_minutes = new_start_minutes;
        self.end_minutes = new_end_minutes;

        return true;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{} {}",
            minutes_to_hhmm(self.start_minutes),
            minutes_to_hhmm(self.end_minutes),
            self.title
        )
    }
}

#[test]
fn test_new_正常系() {
    let event_opt = Event::new("ミーティング", "進捗確認", 540, 600);

    match event_opt {
        Some(event) => {
            assert_eq!(event.get_title(), "ミーティング");
            assert_eq!(event.get_description(), "進捗確認");
            assert_eq!(event.get_start_minutes(), 540);
            assert_eq!(event.get_end_minutes(), 600);
            assert_eq!(event.get_duration_minutes(), 60);
        }
        None => {
            panic!("Noneとなってはいけないケース");
        }
    }
}

#[test]
#[allow(non_snake_case)]
fn test_new_開始と終了が同じ場合はNone() {
    let actual = Event::new("ミーティング", "", 540, 540);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_new_開始と終了が逆転している場合はNone() {
    let actual = Event::new("ミーティング", "", 600, 540);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
fn test_new_with_id_指定したidが引き継がれること() {
    let id = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let event = Event::new_with_id(id, "朝会", "", 555, 570);

    assert_eq!(event.get_id(), id);
}

#[test]
fn test_overlaps_with_対称であること() {
    let event_a = Event::new("予定A", "", 540, 600).unwrap();
    let event_b = Event::new("予定B", "", 570, 630).unwrap();

    assert_eq!(event_a.overlaps_with(&event_b), true);
    assert_eq!(event_b.overlaps_with(&event_a), true);
}

#[test]
fn test_overlaps_with_端が接しているだけの場合は重ならないこと() {
    let event_a = Event::new("予定A", "", 0, 60).unwrap();
    let event_b = Event::new("予定B", "", 60, 120).unwrap();

    assert_eq!(event_a.overlaps_with(&event_b), false);
    assert_eq!(event_b.overlaps_with(&event_a), false);
}

#[test]
fn test_overlaps_with_片方がもう片方に完全に含まれる場合は重なること() {
    let event_a = Event::new("予定A", "", 540, 720).unwrap();
    let event_b = Event::new("予定B", "", 570, 600).unwrap();

    assert_eq!(event_a.overlaps_with(&event_b), true);
    assert_eq!(event_b.overlaps_with(&event_a), true);
}

#[test]
fn test_overlaps_with_自分自身とは重なる扱いになること() {
    // 自己衝突を除外するのは列挙する側の責務
    let event = Event::new("予定A", "", 540, 600).unwrap();

    assert_eq!(event.overlaps_with(&event), true);
}

// 更新を許可するフィールドだけを明示的に持つ
// 任意のフィールドをマージする方式だと検証されていない値が紛れ込むため
#[derive(Clone, Debug, PartialEq)]
pub struct EventUpdate {
    title: Option<String>,
    description: Option<String>,
    start_minutes: Option<i64>,
    end_minutes: Option<i64>,
}

impl EventUpdate {
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            start_minutes: None,
            end_minutes: None,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string());
    }

    pub fn set_start_minutes(&mut self, start_minutes: i64) {
        self.start_minutes = Some(start_minutes);
    }

    pub fn set_end_minutes(&mut self, end_minutes: i64) {
        self.end_minutes = Some(end_minutes);
    }

    pub fn get_title(&self) -> Option<&str> {
        return self.title.as_deref();
    }

    pub fn get_description(&self) -> Option<&str> {
        return self.description.as_deref();
    }

    pub fn get_start_minutes(&self) -> Option<i64> {
        return self.start_minutes;
    }

    pub fn get_end_minutes(&self) -> Option<i64> {
        return self.end_minutes;
    }
}

#[test]
fn test_apply_update_時刻だけを更新できること() {
    let mut event = Event::new("ミーティング", "進捗確認", 540, 600).unwrap();

    let mut update = EventUpdate::new();
    update.set_start_minutes(600);
    update.set_end_minutes(660);

    let actual = event.apply_update(&update);

    assert_eq!(actual, true);
    assert_eq!(event.get_start_minutes(), 600);
    assert_eq!(event.get_end_minutes(), 660);
    assert_eq!(event.get_title(), "ミーティング");
    assert_eq!(event.get_description(), "進捗確認");
}

#[test]
fn test_apply_update_題名だけを更新できること() {
    let mut event = Event::new("ミーティング", "", 540, 600).unwrap();

    let mut update = EventUpdate::new();
    update.set_title("定例ミーティング");

    let actual = event.apply_update(&update);

    assert_eq!(actual, true);
    assert_eq!(event.get_title(), "定例ミーティング");
    assert_eq!(event.get_start_minutes(), 540);
    assert_eq!(event.get_end_minutes(), 600);
}

#[test]
fn test_apply_update_開始と終了が逆転する更新は拒否されること() {
    let mut event = Event::new("ミーティング", "", 540, 600).unwrap();

    let mut update = EventUpdate::new();
    update.set_start_minutes(660);

    let actual = event.apply_update(&update);

    // 何も変更されない
    assert_eq!(actual, false);
    assert_eq!(event.get_start_minutes(), 540);
    assert_eq!(event.get_end_minutes(), 600);
}

#[test]
fn test_apply_update_片方の端だけ動かして逆転する場合も拒否されること() {
    let mut event = Event::new("ミーティング", "", 540, 600).unwrap();

    let mut update = EventUpdate::new();
    update.set_title("書き換わってはいけない");
    update.set_end_minutes(540);

    let actual = event.apply_update(&update);

    assert_eq!(actual, false);
    assert_eq!(event.get_title(), "ミーティング");
    assert_eq!(event.get_end_minutes(), 600);
}

#[test]
fn test_display_時刻と題名が整形されること() {
    let event = Event::new("ミーティング", "", 540, 600).unwrap();
    let actual = format!("{}", event);
    let expected = String::from("09:00-10:00 ミーティング");
    assert_eq!(actual, expected);
}
