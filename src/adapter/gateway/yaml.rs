use crate::entity::event::Event;
use crate::entity::time_of_day::{hhmm_to_minutes, minutes_to_hhmm};
use crate::entity::working_hours::WorkingHours;
use linked_hash_map::LinkedHashMap;
use uuid::Uuid;
use yaml_rust::Yaml;

#[cfg(test)]
use yaml_rust::YamlLoader;

#[cfg(test)]
use uuid::uuid;

// 勤務時間が読めなかった時に使う値
const DEFAULT_WORKING_HOURS_START: &str = "08:00";
const DEFAULT_WORKING_HOURS_END: &str = "18:00";

#[test]
fn test_yaml_to_event_正常系() {
    let s = "
id: '67e55044-10b1-426f-9247-bb680e5fe0c8'
title: 'ミーティング'
description: '進捗確認'
start_time: '09:00'
end_time: '10:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let actual = yaml_to_event(event_yaml);
    let expected = Some(Event::new_with_id(
        uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8"),
        "ミーティング",
        "進捗確認",
        540,
        630,
    ));
    assert_eq!(actual, expected);
}

#[test]
fn test_yaml_to_event_idキーがない場合は新しく採番されること() {
    let s = "
title: 'ミーティング'
start_time: '09:00'
end_time: '10:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let event_opt = yaml_to_event(event_yaml);

    match event_opt {
        Some(event) => {
            assert_eq!(event.get_title(), "ミーティング");
            assert_eq!(event.get_start_minutes(), 540);
            assert_eq!(event.get_end_minutes(), 630);
        }
        None => {
            panic!("Noneとなってはいけないケース");
        }
    }
}

#[test]
fn test_yaml_to_event_descriptionキーがない場合は空文字列となること() {
    let s = "
title: 'ミーティング'
start_time: '09:00'
end_time: '10:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let event_opt = yaml_to_event(event_yaml);

    match event_opt {
        Some(event) => {
            assert_eq!(event.get_description(), "");
        }
        None => {
            panic!("Noneとなってはいけないケース");
        }
    }
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_event_start_timeキーがない場合はNone() {
    let s = "
title: 'ミーティング'
end_time: '10:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let actual = yaml_to_event(event_yaml);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_yaml_to_event_時刻が読めない場合はNone() {
    let s = "
title: 'ミーティング'
start_time: '0900'
end_time: '10:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let actual = yaml_to_event(event_yaml);
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
fn test_yaml_to_event_開始と終了が逆転していてもそのまま読み込まれること() {
    // 検証は使う側の責務なので、ここでは弾かない
    let s = "
id: '67e55044-10b1-426f-9247-bb680e5fe0c8'
title: '壊れた予定'
start_time: '10:00'
end_time: '09:00'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let event_yaml: &Yaml = &docs[0];

    let actual = yaml_to_event(event_yaml);
    let expected = Some(Event::new_with_id(
        uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8"),
        "壊れた予定",
        "",
        600,
        540,
    ));
    assert_eq!(actual, expected);
}

// 時刻が読めない場合はNoneを返す
// idが読めない場合は新しく採番し、title/descriptionは空文字列で補う
pub fn yaml_to_event(yaml: &Yaml) -> Option<Event> {
    let id: Uuid = match yaml["id"].as_str() {
        Some(id_str) => match Uuid::parse_str(id_str) {
            Ok(id) => id,
            Err(_) => Uuid::new_v4(),
        },
        None => Uuid::new_v4(),
    };

    let title: String = yaml["title"].as_str().unwrap_or("").to_string();
    let description: String = yaml["description"].as_str().unwrap_or("").to_string();

    let start_minutes: i64 = match yaml["start_time"].as_str() {
        Some(start_time_str) => match hhmm_to_minutes(start_time_str) {
            Ok(minutes) => minutes,
            Err(_) => {
                return None;
            }
        },
        None => {
            return None;
        }
    };

    let end_minutes: i64 = match yaml["end_time"].as_str() {
        Some(end_time_str) => match hhmm_to_minutes(end_time_str) {
            Ok(minutes) => minutes,
            Err(_) => {
                return None;
            }
        },
        None => {
            return None;
        }
    };

    return Some(Event::new_with_id(
        id,
        &title,
        &description,
        start_minutes,
        end_minutes,
    ));
}

#[test]
fn test_event_to_yaml_正常系() {
    let id = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let event = Event::new_with_id(id, "ミーティング", "進捗確認", 540, 630);

    let actual = event_to_yaml(&event);

    assert_eq!(
        actual["id"].as_str(),
        Some("67e55044-10b1-426f-9247-bb680e5fe0c8")
    );
    assert_eq!(actual["title"].as_str(), Some("ミーティング"));
    assert_eq!(actual["description"].as_str(), Some("進捗確認"));
    assert_eq!(actual["start_time"].as_str(), Some("09:00"));
    assert_eq!(actual["end_time"].as_str(), Some("10:30"));
}

#[test]
fn test_event_to_yaml_読み戻すと同じ予定になること() {
    let id = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let event = Event::new_with_id(id, "ミーティング", "", 540, 630);

    let actual = yaml_to_event(&event_to_yaml(&event));
    let expected = Some(event);
    assert_eq!(actual, expected);
}

pub fn event_to_yaml(event: &Event) -> Yaml {
    let mut event_hash = LinkedHashMap::new();

    event_hash.insert(
        Yaml::String(String::from("id")),
        Yaml::String(event.get_id().to_string()),
    );
    event_hash.insert(
        Yaml::String(String::from("title")),
        Yaml::String(event.get_title().to_string()),
    );
    event_hash.insert(
        Yaml::String(String::from("description")),
        Yaml::String(event.get_description().to_string()),
    );
    event_hash.insert(
        Yaml::String(String::from("start_time")),
        Yaml::String(minutes_to_hhmm(event.get_start_minutes())),
    );
    event_hash.insert(
        Yaml::String(String::from("end_time")),
        Yaml::String(minutes_to_hhmm(event.get_end_minutes())),
    );

    return Yaml::Hash(event_hash);
}

#[test]
fn test_yaml_to_working_hours_正常系() {
    let s = "
start: '09:30'
end: '17:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let working_hours_yaml: &Yaml = &docs[0];

    let actual = yaml_to_working_hours(working_hours_yaml);
    let expected = WorkingHours::new(570, 1050).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_yaml_to_working_hours_キーがない場合はデフォルト値となること() {
    let s = "
start: '09:30'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let working_hours_yaml: &Yaml = &docs[0];

    let actual = yaml_to_working_hours(working_hours_yaml);
    let expected = WorkingHours::new(480, 1080).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_yaml_to_working_hours_逆転している場合はデフォルト値となること() {
    let s = "
start: '18:00'
end: '08:00'
";

    let docs = YamlLoader::load_from_str(s).unwrap();
    let working_hours_yaml: &Yaml = &docs[0];

    let actual = yaml_to_working_hours(working_hours_yaml);
    let expected = WorkingHours::new(480, 1080).unwrap();
    assert_eq!(actual, expected);
}

// 読めなかった場合は08:00-18:00で補う
// 明示的な設定を持たない利用者にも外枠を渡せるようにするため、
// デフォルト値はエンジン側ではなくこの境界で与える
pub fn yaml_to_working_hours(yaml: &Yaml) -> WorkingHours {
    let default_working_hours = WorkingHours::new(
        hhmm_to_minutes(DEFAULT_WORKING_HOURS_START).unwrap(),
        hhmm_to_minutes(DEFAULT_WORKING_HOURS_END).unwrap(),
    )
    .unwrap();

    let start_minutes: i64 = match yaml["start"].as_str() {
        Some(start_str) => match hhmm_to_minutes(start_str) {
            Ok(minutes) => minutes,
            Err(_) => {
                return default_working_hours;
            }
        },
        None => {
            return default_working_hours;
        }
    };

    let end_minutes: i64 = match yaml["end"].as_str() {
        Some(end_str) => match hhmm_to_minutes(end_str) {
            Ok(minutes) => minutes,
            Err(_) => {
                return default_working_hours;
            }
        },
        None => {
            return default_working_hours;
        }
    };

    return WorkingHours::new(start_minutes, end_minutes).unwrap_or(default_working_hours);
}

#[test]
fn test_working_hours_to_yaml_正常系() {
    let working_hours = WorkingHours::new(570, 1050).unwrap();

    let actual = working_hours_to_yaml(&working_hours);

    assert_eq!(actual["start"].as_str(), Some("09:30"));
    assert_eq!(actual["end"].as_str(), Some("17:30"));
}

pub fn working_hours_to_yaml(working_hours: &WorkingHours) -> Yaml {
    let mut working_hours_hash = LinkedHashMap::new();

    working_hours_hash.insert(
        Yaml::String(String::from("start")),
        Yaml::String(minutes_to_hhmm(working_hours.get_start_minutes())),
    );
    working_hours_hash.insert(
        Yaml::String(String::from("end")),
        Yaml::String(minutes_to_hhmm(working_hours.get_end_minutes())),
    );

    return Yaml::Hash(working_hours_hash);
}
