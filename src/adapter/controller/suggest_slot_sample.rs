use yotei::adapter::gateway::event_repository::EventRepository;
use yotei::application::suggest_slot_sample::suggest_slot_sample;

fn main() {
    let mut event_repository = EventRepository::new("../yotei-data/schedules/");
    suggest_slot_sample(&mut event_repository);
}
