pub mod interface;
pub mod show_conflicts;
pub mod suggest_slot_sample;
