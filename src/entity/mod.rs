pub mod event;
pub mod schedule;
pub mod time_of_day;
pub mod working_hours;
