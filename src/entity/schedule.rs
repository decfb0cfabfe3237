use crate::entity::event::Event;
use crate::entity::time_of_day::minutes_to_hhmm;
use crate::entity::working_hours::WorkingHours;
use std::fmt;
use uuid::Uuid;

#[cfg(test)]
use uuid::uuid;

// 開始時刻の昇順で並べた新しいVecを返す。引数のVecは変更しない
// sort_byは安定ソートなので、開始時刻が同じ場合は元の順序が保たれる
pub fn sort_events_by_start(events: &Vec<Event>) -> Vec<Event> {
    let mut sorted_events = events.clone();
    sorted_events.sort_by(|a, b| a.get_start_minutes().cmp(&b.get_start_minutes()));

    return sorted_events;
}

#[test]
fn test_sort_events_by_start_開始時刻の昇順に並ぶこと() {
    let event_a = Event::new("昼会", "", 780, 840).unwrap();
    let event_b = Event::new("朝会", "", 555, 570).unwrap();
    let event_c = Event::new("夕会", "", 1050, 1080).unwrap();

    let events = vec![event_a.clone(), event_b.clone(), event_c.clone()];
    let actual = sort_events_by_start(&events);
    let expected = vec![event_b, event_a, event_c];
    assert_eq!(actual, expected);

    // 引数のVecは変更されない
    assert_eq!(events[0].get_title(), "昼会");
}

#[test]
fn test_sort_events_by_start_開始時刻が同じ場合は元の順序が保たれること() {
    let event_a = Event::new("予定A", "", 540, 600).unwrap();
    let event_b = Event::new("予定B", "", 540, 570).unwrap();
    let event_c = Event::new("予定C", "", 540, 630).unwrap();

    let events = vec![event_a.clone(), event_b.clone(), event_c.clone()];
    let actual = sort_events_by_start(&events);
    let expected = vec![event_a, event_b, event_c];
    assert_eq!(actual, expected);
}

// 重なっている予定の組。組としては順不同だが、
// 列挙した時の並びで開始時刻が早い方をfirstに持つ
#[derive(Clone, Debug, PartialEq)]
pub struct ConflictPair {
    first: Event,
    second: Event,
}

impl ConflictPair {
    pub fn new(first: Event, second: Event) -> Self {
        Self { first, second }
    }

    pub fn get_first(&self) -> &Event {
        return &self.first;
    }

    pub fn get_second(&self) -> &Event {
        return &self.second;
    }
}

// 重なりのある予定の組を全て列挙する
// 開始時刻でソートしてから走査するので、同じ入力に対しては
// 入力の並び順によらず常に同じ順序で返る
pub fn find_conflicts(events: &Vec<Event>) -> Vec<ConflictPair> {
    let sorted_events = sort_events_by_start(events);
    let mut conflicts: Vec<ConflictPair> = vec![];

    for i in 0..sorted_events.len() {
        for j in (i + 1)..sorted_events.len() {
            if sorted_events[i].overlaps_with(&sorted_events[j]) {
                let conflict =
                    ConflictPair::new(sorted_events[i].clone(), sorted_events[j].clone());
                conflicts.push(conflict);
            }
        }
    }

    return conflicts;
}

#[test]
fn test_find_conflicts_予定がない場合は空() {
    let events: Vec<Event> = vec![];
    let actual = find_conflicts(&events);
    let expected: Vec<ConflictPair> = vec![];
    assert_eq!(actual, expected);
}

#[test]
fn test_find_conflicts_予定が1件の場合は自分自身とは衝突しないこと() {
    let event = Event::new("ミーティング", "", 540, 600).unwrap();
    let events = vec![event];

    let actual = find_conflicts(&events);
    let expected: Vec<ConflictPair> = vec![];
    assert_eq!(actual, expected);
}

#[test]
fn test_find_conflicts_端が接しているだけの場合は衝突しないこと() {
    let event_a = Event::new("予定A", "", 0, 60).unwrap();
    let event_b = Event::new("予定B", "", 60, 120).unwrap();
    let events = vec![event_a, event_b];

    let actual = find_conflicts(&events);
    let expected: Vec<ConflictPair> = vec![];
    assert_eq!(actual, expected);
}

#[test]
fn test_find_conflicts_重なっている場合は衝突として報告されること() {
    // 09:00-10:00と09:30-10:30
    let event_a = Event::new("予定A", "", 540, 600).unwrap();
    let event_b = Event::new("予定B", "", 570, 630).unwrap();
    let events = vec![event_a.clone(), event_b.clone()];

    let actual = find_conflicts(&events);
    let expected = vec![ConflictPair::new(event_a, event_b)];
    assert_eq!(actual, expected);
}

#[test]
fn test_find_conflicts_題名などのフィールドがそのまま残ること() {
    let event_a = Event::new("朝会", "毎日の進捗確認", 555, 585).unwrap();
    let event_b = Event::new("1on1", "上長と", 570, 600).unwrap();
    let events = vec![event_a, event_b];

    let conflicts = find_conflicts(&events);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].get_first().get_title(), "朝会");
    assert_eq!(conflicts[0].get_first().get_description(), "毎日の進捗確認");
    assert_eq!(conflicts[0].get_second().get_title(), "1on1");
}

#[test]
fn test_find_conflicts_3件が互いに重なる場合は3組になること() {
    let event_a = Event::new("予定A", "", 540, 660).unwrap();
    let event_b = Event::new("予定B", "", 570, 630).unwrap();
    let event_c = Event::new("予定C", "", 600, 720).unwrap();
    let events = vec![event_a.clone(), event_b.clone(), event_c.clone()];

    let actual = find_conflicts(&events);

    // 開始時刻が早い方の予定ごとにまとまった順序で列挙される
    let expected = vec![
        ConflictPair::new(event_a.clone(), event_b.clone()),
        ConflictPair::new(event_a, event_c.clone()),
        ConflictPair::new(event_b, event_c),
    ];
    assert_eq!(actual, expected);
}

#[test]
fn test_find_conflicts_入力の並び順によらず結果が同じこと() {
    let event_a = Event::new("予定A", "", 540, 660).unwrap();
    let event_b = Event::new("予定B", "", 570, 630).unwrap();
    let event_c = Event::new("予定C", "", 600, 720).unwrap();

    let events1 = vec![event_a.clone(), event_b.clone(), event_c.clone()];
    let events2 = vec![event_c, event_a, event_b];

    let actual1 = find_conflicts(&events1);
    let actual2 = find_conflicts(&events2);
    assert_eq!(actual1, actual2);
}

#[test]
fn test_find_conflicts_繰り返し呼んでも同じ結果になること() {
    let event_a = Event::new("予定A", "", 600, 720).unwrap();
    let event_b = Event::new("予定B", "", 540, 660).unwrap();
    let events = vec![event_a, event_b];

    let actual1 = find_conflicts(&events);
    let actual2 = find_conflicts(&events);
    assert_eq!(actual1, actual2);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SuggestSlotError {
    // 必要な時間の長さが与えられておらず、除外した予定からも導けない
    NoDurationGiven,

    // 勤務時間内に十分な空きがない
    NoSlotAvailable,
}

impl fmt::Display for SuggestSlotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuggestSlotError::NoDurationGiven => {
                write!(f, "no duration given")
            }
            SuggestSlotError::NoSlotAvailable => {
                write!(f, "no slot available")
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SuggestedSlot {
    start_minutes: i64,
    end_minutes: i64,
}

impl SuggestedSlot {
    pub fn new(start_minutes: i64, end_minutes: i64) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    pub fn get_start_minutes(&self) -> i64 {
        return self.start_minutes;
    }

    pub fn get_end_minutes(&self) -> i64 {
        return self.end_minutes;
    }
}

impl fmt::Display for SuggestedSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            minutes_to_hhmm(self.start_minutes),
            minutes_to_hhmm(self.end_minutes)
        )
    }
}

// 勤務時間内で、必要な長さが確保できる最初の空きを探す
//
// exclude_event_id_optで指定した予定は探索から除外する (予定の入れ直し用)。
// その時duration_minutes_optが与えられていなければ、除外した予定自身の長さを使う。
// 一番早い空きを返すのであって、長さが最も近い空きを探しはしない
pub fn suggest_slot(
    events: &Vec<Event>,
    exclude_event_id_opt: Option<Uuid>,
    duration_minutes_opt: Option<i64>,
    working_hours: &WorkingHours,
) -> Result<SuggestedSlot, SuggestSlotError> {
    // 0以下の長さは指定なしとして扱う
    let mut target_duration_opt = match duration_minutes_opt {
        Some(duration_minutes) if duration_minutes > 0 => Some(duration_minutes),
        _ => None,
    };

    let mut candidate_events: Vec<Event> = vec![];

    for event in events.iter() {
        let is_excluded = match exclude_event_id_opt {
            Some(exclude_event_id) => event.get_id() == exclude_event_id,
            None => false,
        };

        if is_excluded {
            if target_duration_opt.is_none() {
                target_duration_opt = Some(event.get_duration_minutes());
            }
        } else {
            candidate_events.push(event.clone());
        }
    }

    let target_duration = match target_duration_opt {
        Some(target_duration) => target_duration,
        None => {
            return Err(SuggestSlotError::NoDurationGiven);
        }
    };

    // 上流のデータが壊れていた場合 (start >= end) は防御的に読み飛ばす
    let valid_events: Vec<Event> = candidate_events
        .iter()
        .filter(|event| event.get_start_minutes() < event.get_end_minutes())
        .map(|event| event.clone())
        .collect();

    let sorted_events = sort_events_by_start(&valid_events);

    // 勤務開始時刻から順に隙間を見ていき、最初に足りた隙間を返す
    let mut prev_end = working_hours.get_start_minutes();

    for i in 0..=sorted_events.len() {
        let next_start = if i < sorted_events.len() {
            sorted_events[i].get_start_minutes()
        } else {
            working_hours.get_end_minutes()
        };

        let gap = next_start - prev_end;
        if gap >= target_duration {
            return Ok(SuggestedSlot::new(prev_end, prev_end + target_duration));
        }

        if i < sorted_events.len() {
            // 前の予定に完全に含まれる予定でカーソルが巻き戻らないようにmaxを取る
            prev_end = prev_end.max(sorted_events[i].get_end_minutes());
        }
    }

    return Err(SuggestSlotError::NoSlotAvailable);
}

#[test]
fn test_suggest_slot_予定がない場合は勤務開始時刻から提案されること() {
    let events: Vec<Event> = vec![];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(30), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 510));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_勤務時間全体と同じ長さでも提案できること() {
    // 08:00-18:00の600分ちょうど
    let events: Vec<Event> = vec![];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(600), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 1080));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_最初に見つかった空きを返すこと() {
    // 09:00-09:15と10:00-11:00が埋まっている時に30分を探すと、
    // 09:15-09:45の方が長さは近いが、より早い08:00-08:30が返る
    let event_a = Event::new("朝会", "", 540, 555).unwrap();
    let event_b = Event::new("定例", "", 600, 660).unwrap();
    let events = vec![event_a, event_b];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(30), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 510));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_隙間の長さがちょうどの場合も使えること() {
    // 08:00-09:00の空きに60分がちょうど収まる
    let event = Event::new("長い会議", "", 540, 1020).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(60), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 540));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_最後の予定から勤務終了までの隙間も候補になること() {
    let event = Event::new("埋まり", "", 480, 1020).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(60), &working_hours);
    let expected = Ok(SuggestedSlot::new(1020, 1080));
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_suggest_slot_勤務時間より長い場合はNoSlotAvailable() {
    // 08:00-09:00の60分しかないところに90分は入らない
    let events: Vec<Event> = vec![];
    let working_hours = WorkingHours::new(480, 540).unwrap();

    let actual = suggest_slot(&events, None, Some(90), &working_hours);
    let expected = Err(SuggestSlotError::NoSlotAvailable);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_suggest_slot_隙間が全て足りない場合はNoSlotAvailable() {
    // 隙間は08:00-08:15と12:30-12:45と17:45-18:00の15分ずつしかない
    let event_a = Event::new("予定A", "", 495, 750).unwrap();
    let event_b = Event::new("予定B", "", 765, 1065).unwrap();
    let events = vec![event_a, event_b];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(30), &working_hours);
    let expected = Err(SuggestSlotError::NoSlotAvailable);
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_除外した予定の長さから必要な時間が導かれること() {
    // 14:00-15:00の予定を入れ直す。長さの指定がないので60分の空きを探す
    let event_a = Event::new("移動", "", 480, 530).unwrap();
    let event_b = Event::new("入れ直したい会議", "", 840, 900).unwrap();
    let event_c = Event::new("別件", "", 570, 600).unwrap();
    let exclude_event_id = event_b.get_id();
    let events = vec![event_a, event_b, event_c];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, Some(exclude_event_id), None, &working_hours);

    // 08:50-09:30は40分しかないので、10:00からの60分が返る
    // (40分の指定なら08:50が返るはずなので、長さが60分で探せていることが分かる)
    let expected = Ok(SuggestedSlot::new(600, 660));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_除外した予定自身の時間帯が空きとして使えること() {
    let event = Event::new("入れ直したい会議", "", 840, 900).unwrap();
    let exclude_event_id = event.get_id();
    let events = vec![event];
    let working_hours = WorkingHours::new(840, 900).unwrap();

    let actual = suggest_slot(&events, Some(exclude_event_id), None, &working_hours);
    let expected = Ok(SuggestedSlot::new(840, 900));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_存在しないidを除外指定しても無視されること() {
    let event = Event::new("ミーティング", "", 540, 600).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();
    let unknown_id = uuid!("00000000-0000-0000-0000-000000000000");

    let actual = suggest_slot(&events, Some(unknown_id), Some(30), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 510));
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_suggest_slot_長さが与えられず導けもしない場合はNoDurationGiven() {
    let event = Event::new("ミーティング", "", 540, 600).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, None, &working_hours);
    let expected = Err(SuggestSlotError::NoDurationGiven);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_suggest_slot_存在しないidの除外指定だけで長さがない場合もNoDurationGiven() {
    let event = Event::new("ミーティング", "", 540, 600).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();
    let unknown_id = uuid!("00000000-0000-0000-0000-000000000000");

    let actual = suggest_slot(&events, Some(unknown_id), None, &working_hours);
    let expected = Err(SuggestSlotError::NoDurationGiven);
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_0以下の長さは指定なしとして扱われること() {
    // 長さ0の指定はそのまま使わず、除外した予定の長さ (60分) で探す
    let event = Event::new("入れ直したい会議", "", 840, 900).unwrap();
    let exclude_event_id = event.get_id();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, Some(exclude_event_id), Some(0), &working_hours);
    let expected = Ok(SuggestedSlot::new(480, 540));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_前の予定に完全に含まれる予定で空きが巻き戻らないこと() {
    // 09:00-12:00の中に09:30-10:00が含まれていても、
    // 10:00以降が空いていると誤認しないこと
    let event_a = Event::new("長い会議", "", 540, 720).unwrap();
    let event_b = Event::new("中断して出る打合せ", "", 570, 600).unwrap();
    let events = vec![event_a, event_b];
    let working_hours = WorkingHours::new(510, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(60), &working_hours);

    // 08:30-09:00は30分しかないので、12:00からの60分が返る
    let expected = Ok(SuggestedSlot::new(720, 780));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_勤務時間外の予定も隙間の計算に影響すること() {
    // 07:00-08:30の予定は勤務時間 (08:00-18:00) の外にはみ出しているが
    // 除外はせず、先頭の空きは08:30からとなる
    let event = Event::new("早朝の用事", "", 420, 510).unwrap();
    let events = vec![event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(30), &working_hours);
    let expected = Ok(SuggestedSlot::new(510, 540));
    assert_eq!(actual, expected);
}

#[test]
fn test_suggest_slot_壊れた予定は読み飛ばして探索が続くこと() {
    // 手で編集されたファイル経由だとstart >= endの予定が紛れ込みうる
    let broken_id = uuid!("11111111-1111-1111-1111-111111111111");
    let broken_event = Event::new_with_id(broken_id, "壊れた予定", "", 600, 540);
    let event = Event::new("ミーティング", "", 480, 540).unwrap();
    let events = vec![broken_event, event];
    let working_hours = WorkingHours::new(480, 1080).unwrap();

    let actual = suggest_slot(&events, None, Some(30), &working_hours);
    let expected = Ok(SuggestedSlot::new(540, 570));
    assert_eq!(actual, expected);
}
