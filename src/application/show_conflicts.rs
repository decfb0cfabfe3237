use crate::entity::event::Event;
use crate::entity::schedule::find_conflicts;

// 重なっている予定の組を一覧表示する
pub fn show_conflicts(events: &Vec<Event>) {
    let conflicts = find_conflicts(events);

    for conflict in conflicts.iter() {
        println!("{}\t{}", conflict.get_first(), conflict.get_second());
    }
}
