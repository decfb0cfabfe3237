use crate::application::interface::EventRepositoryTrait;
use crate::entity::schedule::suggest_slot;
use chrono::Local;

pub fn suggest_slot_sample(event_repository: &mut dyn EventRepositoryTrait) {
    // 初期化
    event_repository.sync_clock(Local::now());
    event_repository.load();

    // 利用者ごとに30分の空きを探して表示する
    for user_name in event_repository.get_user_names().iter() {
        let events = event_repository.get_events(user_name);
        let working_hours_opt = event_repository.get_working_hours(user_name);

        match working_hours_opt {
            Some(working_hours) => {
                let result = suggest_slot(&events, None, Some(30), &working_hours);

                match result {
                    Ok(suggested_slot) => {
                        println!("{}\t{}", user_name, suggested_slot);
                    }
                    Err(err) => {
                        println!("{}\t{}", user_name, err);
                    }
                }
            }
            None => {}
        }
    }
}
