use std::env;
use std::fs::File;
use std::io::prelude::*;
use walkdir::WalkDir;
use yaml_rust::{Yaml, YamlLoader};
use yotei::adapter::gateway::yaml::yaml_to_event;
use yotei::application::show_conflicts::show_conflicts;
use yotei::entity::event::Event;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!("{}", args.len());
        panic!("usage: {} <schedules_dir>", &args[0]);
    }

    let schedules_dir = &args[1];

    for entry in WalkDir::new(schedules_dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_name() == "schedule.yaml" {
            let mut file = File::open(entry.path()).unwrap();
            let mut text = String::new();
            file.read_to_string(&mut text).unwrap();

            match YamlLoader::load_from_str(text.as_str()) {
                Err(_) => {
                    panic!("Error occured in {:?}", entry.path());
                }
                Ok(docs) => {
                    let schedule_yaml: &Yaml = &docs[0]["schedule"];

                    let mut events: Vec<Event> = vec![];
                    for event_yaml in schedule_yaml["events"].as_vec().unwrap_or(&vec![]) {
                        match yaml_to_event(event_yaml) {
                            Some(event) => {
                                events.push(event);
                            }
                            None => {}
                        }
                    }

                    println!("{:?}", entry.path());
                    show_conflicts(&events);
                }
            }
        }
    }
}
