use chrono::Local;
use regex::Regex;
use std::io::Stdout;
use std::io::{stdout, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::raw::RawTerminal;
use termion::style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;
use yotei::adapter::gateway::event_repository::EventRepository;
use yotei::application::interface::EventRepositoryTrait;
use yotei::entity::event::{Event, EventUpdate};
use yotei::entity::schedule::{find_conflicts, sort_events_by_start, suggest_slot};
use yotei::entity::time_of_day::{hhmm_to_minutes, minutes_of_day, minutes_to_hhmm};
use yotei::entity::working_hours::WorkingHours;

#[cfg(test)]
use uuid::uuid;

const MAX_COL: u16 = 999;

// 連続する空白を1つにまとめてから空白区切りで分割する
fn tokenize(untrimmed_line: &str) -> Vec<String> {
    let re = Regex::new(r"\s+").unwrap();
    let line: String = re
        .replace_all(untrimmed_line, " ")
        .to_string()
        .trim()
        .to_string();

    let tokens: Vec<String> = line.split(' ').map(|token| token.to_string()).collect();

    return tokens;
}

#[test]
fn test_tokenize_正常系() {
    let actual = tokenize("new 朝会 09:15 09:30");
    let expected = vec![
        String::from("new"),
        String::from("朝会"),
        String::from("09:15"),
        String::from("09:30"),
    ];
    assert_eq!(actual, expected);
}

#[test]
fn test_tokenize_連続する空白は1つにまとめられること() {
    let actual = tokenize("  ls   \t  ");
    let expected = vec![String::from("ls")];
    assert_eq!(actual, expected);
}

#[test]
fn test_tokenize_空文字列の場合は空文字列1つとなること() {
    let actual = tokenize("");
    let expected = vec![String::from("")];
    assert_eq!(actual, expected);
}

// 行末の文字の表示幅。Backspaceで消す幅を知るために使う
fn last_char_width(line: &str) -> u16 {
    let ch_opt = line.chars().last();
    let width = match ch_opt {
        Some(ch) => UnicodeWidthChar::width(ch).unwrap_or(0),
        None => 0,
    } as u16;

    return width;
}

#[test]
fn test_last_char_width_半角の場合() {
    let actual = last_char_width("ls");
    let expected = 1;
    assert_eq!(actual, expected);
}

#[test]
fn test_last_char_width_全角の場合() {
    let actual = last_char_width("新 朝会");
    let expected = 2;
    assert_eq!(actual, expected);
}

#[test]
fn test_last_char_width_空文字列の場合() {
    let actual = last_char_width("");
    let expected = 0;
    assert_eq!(actual, expected);
}

// 表示幅がwidthになるまで末尾に空白を足す。列を揃えるために使う
// 全角文字が混ざると文字数ではなく表示幅で揃える必要がある
fn pad_to_width(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    let mut current_width = UnicodeWidthStr::width(s);

    while current_width < width {
        padded.push(' ');
        current_width += 1;
    }

    return padded;
}

#[test]
fn test_pad_to_width_半角の場合() {
    let actual = pad_to_width("meeting", 10);
    let expected = String::from("meeting   ");
    assert_eq!(actual, expected);
}

#[test]
fn test_pad_to_width_全角が混ざる場合() {
    // "朝会"は表示幅4
    let actual = pad_to_width("朝会", 6);
    let expected = String::from("朝会  ");
    assert_eq!(actual, expected);
}

#[test]
fn test_pad_to_width_幅を超えている場合はそのまま() {
    let actual = pad_to_width("長い長い題名", 4);
    let expected = String::from("長い長い題名");
    assert_eq!(actual, expected);
}

// idの先頭一致で予定を特定する。一意に定まらない場合はNone
fn find_event_id_by_prefix(events: &Vec<Event>, prefix: &str) -> Option<Uuid> {
    if prefix.is_empty() {
        return None;
    }

    let mut matched_ids: Vec<Uuid> = vec![];

    for event in events.iter() {
        if event.get_id().to_string().starts_with(prefix) {
            matched_ids.push(event.get_id());
        }
    }

    if matched_ids.len() == 1 {
        return Some(matched_ids[0]);
    }

    return None;
}

#[test]
fn test_find_event_id_by_prefix_正常系() {
    let id_a = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let id_b = uuid!("00000000-0000-0000-0000-000000000000");
    let event_a = Event::new_with_id(id_a, "朝会", "", 555, 570);
    let event_b = Event::new_with_id(id_b, "定例", "", 600, 660);
    let events = vec![event_a, event_b];

    let actual = find_event_id_by_prefix(&events, "67e5");
    let expected = Some(id_a);
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_find_event_id_by_prefix_複数に一致する場合はNone() {
    let id_a = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let id_b = uuid!("67e55044-0000-0000-0000-000000000000");
    let event_a = Event::new_with_id(id_a, "朝会", "", 555, 570);
    let event_b = Event::new_with_id(id_b, "定例", "", 600, 660);
    let events = vec![event_a, event_b];

    let actual = find_event_id_by_prefix(&events, "67e5");
    let expected = None;
    assert_eq!(actual, expected);
}

#[test]
#[allow(non_snake_case)]
fn test_find_event_id_by_prefix_空のプレフィックスはNone() {
    let id_a = uuid!("67e55044-10b1-426f-9247-bb680e5fe0c8");
    let event_a = Event::new_with_id(id_a, "朝会", "", 555, 570);
    let events = vec![event_a];

    let actual = find_event_id_by_prefix(&events, "");
    let expected = None;
    assert_eq!(actual, expected);
}

// 生モードでは改行だけだと行頭に戻らないので、毎回左端まで戻す
fn print_line(stdout: &mut RawTerminal<Stdout>, message: &str) {
    write!(stdout, "{}", termion::cursor::Left(MAX_COL)).unwrap();
    println!("{}", message);
    write!(stdout, "{}", termion::cursor::Left(MAX_COL)).unwrap();
    stdout.flush().unwrap();
}

fn show_events(stdout: &mut RawTerminal<Stdout>, events: &Vec<Event>) {
    let sorted_events = sort_events_by_start(events);

    for event in sorted_events.iter() {
        let short_id: String = event.get_id().to_string().chars().take(8).collect();
        let time_range = format!(
            "{}-{}",
            minutes_to_hhmm(event.get_start_minutes()),
            minutes_to_hhmm(event.get_end_minutes())
        );

        let message = format!(
            "{} {} {} {}",
            short_id,
            time_range,
            pad_to_width(event.get_title(), 20),
            event.get_description()
        );
        print_line(stdout, &message);
    }
}

fn execute(
    stdout: &mut RawTerminal<Stdout>,
    event_repository: &mut dyn EventRepositoryTrait,
    focused_user_name_opt: &mut Option<String>,
    untrimmed_line: &str,
) {
    let tokens = tokenize(untrimmed_line);

    let focused_user_name = match focused_user_name_opt {
        Some(focused_user_name) => focused_user_name.clone(),
        None => {
            print_line(stdout, "利用者がいません。user <名前> で作成してください");

            match tokens[0].as_str() {
                "利用者" | "user" => {}
                _ => {
                    return;
                }
            }

            String::from("")
        }
    };

    match tokens[0].as_str() {
        "新" | "new" => {
            if tokens.len() >= 4 {
                let title = &tokens[1];

                let start_minutes = match hhmm_to_minutes(&tokens[2]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("開始時刻: {}", err));
                        return;
                    }
                };

                let end_minutes = match hhmm_to_minutes(&tokens[3]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("終了時刻: {}", err));
                        return;
                    }
                };

                let description = if tokens.len() >= 5 {
                    tokens[4].as_str()
                } else {
                    ""
                };

                match Event::new(title, description, start_minutes, end_minutes) {
                    Some(event) => {
                        event_repository.add_event(&focused_user_name, event);
                    }
                    None => {
                        print_line(stdout, "開始時刻は終了時刻より前にしてください");
                    }
                }
            }
        }
        "一覧" | "list" | "ls" => {
            let events = event_repository.get_events(&focused_user_name);
            show_events(stdout, &events);
        }
        "詳" | "detail" | "desc" => {
            if tokens.len() >= 2 {
                let events = event_repository.get_events(&focused_user_name);
                let event_id_opt = find_event_id_by_prefix(&events, &tokens[1]);

                let event_opt = event_id_opt
                    .and_then(|event_id| event_repository.get_event_by_id(event_id));

                match event_opt {
                    Some(event) => {
                        print_line(stdout, &format!("{}", event.get_id()));
                        print_line(stdout, &format!("{}", event));
                        print_line(stdout, event.get_description());
                    }
                    None => {
                        print_line(stdout, "予定を特定できません");
                    }
                }
            }
        }
        "衝突" | "conflicts" | "cf" => {
            let events = event_repository.get_events(&focused_user_name);
            let conflicts = find_conflicts(&events);

            for conflict in conflicts.iter() {
                let message = format!("{}\t{}", conflict.get_first(), conflict.get_second());
                print_line(stdout, &message);
            }

            if conflicts.is_empty() {
                print_line(stdout, "衝突はありません");
            }
        }
        "空き" | "suggest" | "sg" => {
            let duration_minutes_opt: Option<i64> = if tokens.len() >= 2 {
                tokens[1].parse().ok()
            } else {
                None
            };

            let events = event_repository.get_events(&focused_user_name);
            let working_hours_opt = event_repository.get_working_hours(&focused_user_name);

            match working_hours_opt {
                Some(working_hours) => {
                    let result = suggest_slot(&events, None, duration_minutes_opt, &working_hours);

                    match result {
                        Ok(suggested_slot) => {
                            print_line(stdout, &format!("{}", suggested_slot));
                        }
                        Err(err) => {
                            print_line(stdout, &format!("{}", err));
                        }
                    }
                }
                None => {}
            }
        }
        "再配置" | "reslot" | "rs" => {
            if tokens.len() >= 2 {
                let events = event_repository.get_events(&focused_user_name);
                let working_hours_opt = event_repository.get_working_hours(&focused_user_name);
                let event_id_opt = find_event_id_by_prefix(&events, &tokens[1]);

                match (event_id_opt, working_hours_opt) {
                    (Some(event_id), Some(working_hours)) => {
                        // 入れ直したい予定自身は除外し、長さはその予定から導く
                        let result = suggest_slot(&events, Some(event_id), None, &working_hours);

                        match result {
                            Ok(suggested_slot) => {
                                print_line(stdout, &format!("{}", suggested_slot));
                            }
                            Err(err) => {
                                print_line(stdout, &format!("{}", err));
                            }
                        }
                    }
                    (None, _) => {
                        print_line(stdout, "予定を特定できません");
                    }
                    _ => {}
                }
            }
        }
        "変更" | "move" | "mv" => {
            if tokens.len() >= 4 {
                let events = event_repository.get_events(&focused_user_name);
                let event_id_opt = find_event_id_by_prefix(&events, &tokens[1]);

                let start_minutes = match hhmm_to_minutes(&tokens[2]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("開始時刻: {}", err));
                        return;
                    }
                };

                let end_minutes = match hhmm_to_minutes(&tokens[3]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("終了時刻: {}", err));
                        return;
                    }
                };

                match event_id_opt {
                    Some(event_id) => {
                        let mut update = EventUpdate::new();
                        update.set_start_minutes(start_minutes);
                        update.set_end_minutes(end_minutes);

                        if !event_repository.update_event_by_id(event_id, &update) {
                            print_line(stdout, "開始時刻は終了時刻より前にしてください");
                        }
                    }
                    None => {
                        print_line(stdout, "予定を特定できません");
                    }
                }
            }
        }
        "削除" | "delete" | "rm" => {
            if tokens.len() >= 2 {
                let events = event_repository.get_events(&focused_user_name);
                let event_id_opt = find_event_id_by_prefix(&events, &tokens[1]);

                match event_id_opt {
                    Some(event_id) => {
                        event_repository.remove_event_by_id(event_id);
                    }
                    None => {
                        print_line(stdout, "予定を特定できません");
                    }
                }
            }
        }
        "勤務" | "hours" => {
            if tokens.len() >= 3 {
                let start_minutes = match hhmm_to_minutes(&tokens[1]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("開始時刻: {}", err));
                        return;
                    }
                };

                let end_minutes = match hhmm_to_minutes(&tokens[2]) {
                    Ok(minutes) => minutes,
                    Err(err) => {
                        print_line(stdout, &format!("終了時刻: {}", err));
                        return;
                    }
                };

                match WorkingHours::new(start_minutes, end_minutes) {
                    Some(working_hours) => {
                        event_repository.set_working_hours(&focused_user_name, working_hours);
                    }
                    None => {
                        print_line(stdout, "開始時刻は終了時刻より前にしてください");
                    }
                }
            } else {
                let working_hours_opt = event_repository.get_working_hours(&focused_user_name);

                match working_hours_opt {
                    Some(working_hours) => {
                        print_line(stdout, &format!("{}", working_hours));
                    }
                    None => {}
                }
            }
        }
        "利用者" | "user" => {
            if tokens.len() >= 2 {
                let user_name = &tokens[1];

                let user_names = event_repository.get_user_names();
                if !user_names.contains(user_name) {
                    event_repository.create_user(user_name);
                }

                *focused_user_name_opt = Some(user_name.clone());
            } else {
                for user_name in event_repository.get_user_names().iter() {
                    print_line(stdout, user_name);
                }
            }
        }
        "今" | "now" => {
            let now_minutes = minutes_of_day(&Local::now());
            print_line(stdout, &minutes_to_hhmm(now_minutes));
        }
        "保存" | "save" => {
            event_repository.save();
        }
        &_ => {}
    }
}

fn main() {
    let mut event_repository = EventRepository::new("../yotei-data/schedules/");

    // controllerで実体を見るのを避けるために、1つ関数を切る
    application(&mut event_repository);
}

fn application(event_repository: &mut dyn EventRepositoryTrait) {
    // 初期化
    event_repository.sync_clock(Local::now());
    event_repository.load();

    // RawModeを有効にする
    let mut stdout = stdout().into_raw_mode().unwrap();

    write!(stdout, "{}", termion::clear::All).unwrap();
    write!(stdout, "{}", termion::cursor::BlinkingBar).unwrap();
    stdout.flush().unwrap();

    // 最初の利用者に自動的にフォーカスを当てる
    let mut focused_user_name_opt: Option<String> =
        event_repository.get_user_names().first().cloned();

    match &focused_user_name_opt {
        Some(focused_user_name) => {
            print_line(&mut stdout, &format!("利用者: {}", focused_user_name));
        }
        None => {}
    }

    let header: &str = "yotei>";
    let mut line = String::from("");

    write!(stdout, "{}", termion::cursor::Left(MAX_COL)).unwrap();
    write!(stdout, "{}", header).unwrap();
    stdout.flush().unwrap();

    // キー入力を受け付ける
    for c in std::io::stdin().keys() {
        match c.unwrap() {
            Key::Char('q') | Key::Ctrl('d') => {
                if line.is_empty() {
                    break;
                }
            }
            Key::Backspace | Key::Ctrl('h') => {
                let width = last_char_width(&line);

                if width > 0 {
                    line.pop();

                    write!(
                        stdout,
                        "{}{}",
                        termion::cursor::Left(MAX_COL),
                        termion::clear::CurrentLine,
                    )
                    .unwrap();
                    write!(stdout, "{}{}", header, line).unwrap();
                    stdout.flush().unwrap();
                }
            }
            Key::Ctrl('u') => {
                line.clear();

                write!(
                    stdout,
                    "{}{}",
                    termion::cursor::Left(MAX_COL),
                    termion::clear::CurrentLine,
                )
                .unwrap();
                write!(stdout, "{}{}", header, line).unwrap();
                stdout.flush().unwrap();
            }
            Key::Char('\n') | Key::Ctrl('m') => {
                writeln!(stdout, "").unwrap();
                write!(stdout, "{}", termion::cursor::Left(MAX_COL)).unwrap();

                println!("{}{}{}", style::Bold, line, style::Reset);
                stdout.flush().unwrap();

                execute(
                    &mut stdout,
                    event_repository,
                    &mut focused_user_name_opt,
                    &line,
                );

                // 初期化
                line.clear();

                write!(
                    stdout,
                    "{}{}",
                    termion::cursor::Left(MAX_COL),
                    termion::clear::CurrentLine,
                )
                .unwrap();
                write!(stdout, "{}{}", header, line).unwrap();
                stdout.flush().unwrap();
            }
            Key::Char(c) => {
                line.push(c);

                write!(stdout, "{}", c).unwrap();
                stdout.flush().unwrap();
            }
            _key => {}
        }
    }

    write!(stdout, "{}", termion::clear::CurrentLine).unwrap();
    println!("{}{}{}", style::Bold, line, style::Reset);

    // 保存して終わり
    event_repository.save();

    // BlinkingBlockに戻す
    writeln!(stdout, "{}", termion::cursor::BlinkingBlock).unwrap();
}
