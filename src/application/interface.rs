use crate::entity::event::{Event, EventUpdate};
use crate::entity::working_hours::WorkingHours;
use chrono::{DateTime, Local};
use uuid::Uuid;

pub trait EventRepositoryTrait {
    fn get_storage_dir_name(&self) -> &str;
    fn get_user_names(&self) -> Vec<String>;
    fn load(&mut self);
    fn save(&self);
    fn sync_clock(&mut self, now: DateTime<Local>);
    fn get_last_synced_time(&self) -> DateTime<Local>;
    fn get_events(&self, user_name: &str) -> Vec<Event>;
    fn get_working_hours(&self, user_name: &str) -> Option<WorkingHours>;
    fn set_working_hours(&mut self, user_name: &str, working_hours: WorkingHours) -> bool;
    fn get_event_by_id(&self, id: Uuid) -> Option<Event>;
    fn add_event(&mut self, user_name: &str, event: Event) -> bool;
    fn remove_event_by_id(&mut self, id: Uuid) -> bool;
    fn update_event_by_id(&mut self, id: Uuid, update: &EventUpdate) -> bool;
    fn create_user(&mut self, user_name: &str);
}
