use log::{debug, error};
use mealfinder::controller::{Key, ListPane, Target};
use mealfinder::render::{render, RenderMode};
use mealfinder::{App, AppConfig, MealDbClient, Mood, Screen, UiEvent};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "\
Commands:
  search <ingredient>   search by ingredient (bare text works too)
  time <any|15|30|60>   filter by approximate cooking time
  mood <comfort|light|spicy>  toggle a mood filter
  open <id>|#<n>        show details for a meal id or the n-th card
  close                 close the detail panel
  help                  show this message
  quit                  exit";

enum Input {
    Events(Vec<UiEvent>),
    Help,
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let log_env = env_logger::Env::default().default_filter_or(&config.log_level);
    env_logger::Builder::from_env(log_env).init();

    let mode = if env::args().skip(1).any(|a| a == "--html") {
        RenderMode::Html
    } else {
        RenderMode::Text
    };

    let client = MealDbClient::from_config(&config.api)?;
    debug!("Using meal API at {}", client.base_url());

    let (events_tx, events_rx) = mpsc::channel::<UiEvent>(32);
    let (frames_tx, mut frames_rx) = mpsc::unbounded_channel::<Screen>();
    let app = App::new(Arc::new(client));
    let runner = tokio::spawn(app.run(events_rx, frames_tx));

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last: Option<Screen> = None;
    let mut events_tx = Some(events_tx);

    loop {
        tokio::select! {
            frame = frames_rx.recv() => match frame {
                Some(screen) => {
                    println!("\n{}", render(&screen, mode));
                    last = Some(screen);
                }
                None => break,
            },
            line = lines.next_line(), if events_tx.is_some() => {
                let input = match line {
                    Ok(Some(line)) => parse_input(&line, last.as_ref()),
                    Ok(None) => Input::Quit,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        Input::Quit
                    }
                };

                match input {
                    Input::Events(events) => {
                        if let Some(tx) = &events_tx {
                            for event in events {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    Input::Help => println!("{}", HELP),
                    // Closing the channel lets the runner finish pending requests and stop
                    Input::Quit => events_tx = None,
                }
            }
        }
    }

    runner.await?;
    Ok(())
}

fn parse_input(line: &str, last: Option<&Screen>) -> Input {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let events = match command.to_ascii_lowercase().as_str() {
        "" => return Input::Events(Vec::new()),
        "quit" | "exit" => return Input::Quit,
        "help" | "?" => return Input::Help,
        "search" => vec![
            UiEvent::QueryEdited(arg.to_string()),
            UiEvent::Click(Target::SearchButton),
        ],
        "time" => vec![UiEvent::TimeSelected(arg.to_string())],
        "mood" => {
            let checked = match (Mood::from_key(arg), last) {
                (Some(mood), Some(screen)) => !screen.filters.moods.contains(&mood),
                _ => true,
            };
            vec![UiEvent::MoodToggled {
                mood: arg.to_string(),
                checked,
            }]
        }
        "open" => match resolve_card(arg, last) {
            Some(id) => vec![UiEvent::Click(Target::Card(id))],
            None => {
                println!("No such card: {}", arg);
                Vec::new()
            }
        },
        "close" => vec![UiEvent::Click(Target::DetailClose)],
        _ => vec![
            UiEvent::QueryEdited(line.to_string()),
            UiEvent::KeyPress {
                key: Key::Enter,
                target: Target::IngredientField,
            },
        ],
    };

    Input::Events(events)
}

/// `#n` picks the n-th visible card, anything else is taken as a meal id
fn resolve_card(arg: &str, last: Option<&Screen>) -> Option<String> {
    let Some(position) = arg.strip_prefix('#') else {
        return (!arg.is_empty()).then(|| arg.to_string());
    };
    let index = position.parse::<usize>().ok()?.checked_sub(1)?;
    match last.map(|s| &s.list) {
        Some(ListPane::Cards(meals)) => meals.get(index).map(|m| m.id.clone()),
        _ => None,
    }
}
