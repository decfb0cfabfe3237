use crate::adapter::gateway::yaml::{
    event_to_yaml, working_hours_to_yaml, yaml_to_event, yaml_to_working_hours,
};
use crate::application::interface::EventRepositoryTrait;
use crate::entity::event::{Event, EventUpdate};
use crate::entity::working_hours::WorkingHours;
use chrono::{DateTime, Local};
use fs2::FileExt;
use linked_hash_map::LinkedHashMap;
use regex::Regex;
use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use uuid::Uuid;
use walkdir::WalkDir;
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};

pub struct EventRepository {
    users: Vec<UserSchedule>,
    schedule_storage_dir_name: String,
    last_synced_time: DateTime<Local>,

    // 2つのプロセスが同じ保存先を同時に触らないようにするためのロック
    // 保持している間だけ有効なので、dropされるまで持ち続ける
    lock_file_opt: Option<File>,
}

struct UserSchedule {
    user_name: String,
    working_hours: WorkingHours,
    events: Vec<Event>,
    _schedule_dir_path: String,
    schedule_yaml_file_path: String,
}

impl UserSchedule {
    fn new(
        user_name: String,
        working_hours: WorkingHours,
        events: Vec<Event>,
        _schedule_dir_path: String,
        schedule_yaml_file_path: String,
    ) -> Self {
        Self {
            user_name,
            working_hours,
            events,
            _schedule_dir_path,
            schedule_yaml_file_path,
        }
    }
}

impl EventRepository {
    pub fn new(schedule_storage_dir_name: &str) -> Self {
        Self {
            users: vec![],
            schedule_storage_dir_name: schedule_storage_dir_name.to_string(),
            last_synced_time: DateTime::<Local>::MIN_UTC.into(),
            lock_file_opt: None,
        }
    }

    fn acquire_lock(&mut self) {
        if self.lock_file_opt.is_some() {
            return;
        }

        let lock_file_path = Path::new(&self.schedule_storage_dir_name).join(".yotei.lock");
        let lock_file = File::create(&lock_file_path).unwrap();

        match lock_file.try_lock_exclusive() {
            Ok(()) => {
                self.lock_file_opt = Some(lock_file);
            }
            Err(_) => {
                panic!("別のプロセスが{:?}を使用中です", lock_file_path);
            }
        }
    }
}

impl EventRepositoryTrait for EventRepository {
    fn get_storage_dir_name(&self) -> &str {
        &self.schedule_storage_dir_name
    }

    fn get_user_names(&self) -> Vec<String> {
        self.users
            .iter()
            .map(|user| user.user_name.clone())
            .collect()
    }

    fn load(&mut self) {
        self.acquire_lock();

        for entry in WalkDir::new(self.schedule_storage_dir_name.as_str())
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_name() == "schedule.yaml" {
                let schedule_yaml_file_path: String =
                    entry.path().to_str().map(|s| s.to_string()).unwrap();
                let schedule_dir_path: String = entry
                    .path()
                    .parent()
                    .and_then(|name| name.to_str().map(|s| s.to_string()))
                    .unwrap();

                // ディレクトリ名をそのまま利用者名とする
                let user_name: String = entry
                    .path()
                    .parent()
                    .and_then(|name| name.file_name())
                    .and_then(|name| name.to_str().map(|s| s.to_string()))
                    .unwrap();

                let mut file = File::open(entry.path()).unwrap();
                let mut text = String::new();
                file.read_to_string(&mut text).unwrap();

                match YamlLoader::load_from_str(text.as_str()) {
                    Err(_) => {
                        panic!("Error occured in {:?}", entry.path());
                    }
                    Ok(docs) => {
                        let schedule_yaml: &Yaml = &docs[0]["schedule"];

                        let working_hours =
                            yaml_to_working_hours(&schedule_yaml["working_hours"]);

                        let mut events: Vec<Event> = vec![];
                        for event_yaml in schedule_yaml["events"].as_vec().unwrap_or(&vec![]) {
                            // 時刻が読めない予定は読み飛ばす
                            match yaml_to_event(event_yaml) {
                                Some(event) => {
                                    events.push(event);
                                }
                                None => {}
                            }
                        }

                        let user_schedule = UserSchedule::new(
                            user_name,
                            working_hours,
                            events,
                            schedule_dir_path,
                            schedule_yaml_file_path,
                        );
                        self.users.push(user_schedule);
                    }
                }
            }
        }
    }

    fn save(&self) {
        for user in self.users.iter() {
            let mut events_yaml: Vec<Yaml> = vec![];
            for event in user.events.iter() {
                events_yaml.push(event_to_yaml(event));
            }

            let mut schedule_hash = LinkedHashMap::new();
            schedule_hash.insert(
                Yaml::String(String::from("working_hours")),
                working_hours_to_yaml(&user.working_hours),
            );
            schedule_hash.insert(
                Yaml::String(String::from("events")),
                Yaml::Array(events_yaml),
            );

            let mut doc_hash = LinkedHashMap::new();
            doc_hash.insert(
                Yaml::String(String::from("schedule")),
                Yaml::Hash(schedule_hash),
            );
            let doc = Yaml::Hash(doc_hash);

            let mut out_str = String::new();
            let mut emitter = YamlEmitter::new(&mut out_str);
            emitter.dump(&doc).unwrap();

            out_str += "\n";

            let mut file = File::create(user.schedule_yaml_file_path.as_str()).unwrap();
            file.write_all(out_str.as_bytes()).unwrap();
        }
    }

    fn sync_clock(&mut self, now: DateTime<Local>) {
        self.last_synced_time = now;
    }

    fn get_last_synced_time(&self) -> DateTime<Local> {
        self.last_synced_time
    }

    fn get_events(&self, user_name: &str) -> Vec<Event> {
        for user in self.users.iter() {
            if user.user_name == user_name {
                return user.events.clone();
            }
        }

        vec![]
    }

    fn get_working_hours(&self, user_name: &str) -> Option<WorkingHours> {
        for user in self.users.iter() {
            if user.user_name == user_name {
                return Some(user.working_hours);
            }
        }

        None
    }

    fn set_working_hours(&mut self, user_name: &str, working_hours: WorkingHours) -> bool {
        for user in self.users.iter_mut() {
            if user.user_name == user_name {
                user.working_hours = working_hours;
                return true;
            }
        }

        false
    }

    fn get_event_by_id(&self, id: Uuid) -> Option<Event> {
        for user in self.users.iter() {
            for event in user.events.iter() {
                if event.get_id() == id {
                    return Some(event.clone());
                }
            }
        }

        None
    }

    fn add_event(&mut self, user_name: &str, event: Event) -> bool {
        for user in self.users.iter_mut() {
            if user.user_name == user_name {
                user.events.push(event);
                return true;
            }
        }

        false
    }

    fn remove_event_by_id(&mut self, id: Uuid) -> bool {
        for user in self.users.iter_mut() {
            let orig_len = user.events.len();
            user.events.retain(|event| event.get_id() != id);

            if user.events.len() != orig_len {
                return true;
            }
        }

        false
    }

    fn update_event_by_id(&mut self, id: Uuid, update: &EventUpdate) -> bool {
        for user in self.users.iter_mut() {
            for event in user.events.iter_mut() {
                if event.get_id() == id {
                    return event.apply_update(update);
                }
            }
        }

        false
    }

    fn create_user(&mut self, user_name: &str) {
        // ディレクトリの区切りに使われうる文字や空白は"-"に置き換える
        // 利用者名そのものは変えず、ディレクトリ名にだけ使う
        let dir_separator_pattern = Regex::new(r"[/\s]+").unwrap();
        let user_name_for_dir = dir_separator_pattern.replace_all(user_name, "-").to_string();

        let schedule_dir_path =
            Path::new(&self.schedule_storage_dir_name).join(&user_name_for_dir);

        match fs::create_dir_all(&schedule_dir_path) {
            Ok(()) => {}
            Err(err) => {
                println!("{}", err);
                return;
            }
        }

        let schedule_yaml_file_path = schedule_dir_path.join("schedule.yaml");

        // 明示的な設定を持たない利用者にもデフォルトの勤務時間を与える
        let working_hours = yaml_to_working_hours(&Yaml::Null);

        match (schedule_dir_path.to_str(), schedule_yaml_file_path.to_str()) {
            (Some(schedule_dir_path_str), Some(schedule_yaml_file_path_str)) => {
                let user_schedule = UserSchedule::new(
                    user_name.to_string(),
                    working_hours,
                    vec![],
                    schedule_dir_path_str.to_string(),
                    schedule_yaml_file_path_str.to_string(),
                );

                self.users.push(user_schedule);
            }
            _ => {}
        }
    }
}
