use ratatui::crossterm::event::KeyCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::tui::bindings::{self, Action, Binding};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normal: HashMap<String, KeyList>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeyList {
    Single(String),
    Multiple(Vec<String>),
}

impl KeyList {
    pub fn keys(&self) -> Vec<&str> {
        match self {
            KeyList::Single(s) => vec![s.as_str()],
            KeyList::Multiple(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs_path().map(|p| p.join("bindings.toml"))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config").join("modus"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to parse {}: {}", path.display(), e);
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s.to_lowercase().as_str() {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" | "ret" => Some(KeyCode::Enter),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        _ => {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() == 1 {
                Some(KeyCode::Char(chars[0]))
            } else {
                None
            }
        }
    }
}

pub fn parse_action(s: &str) -> Option<Action> {
    match s {
        "quit" => Some(Action::Quit),
        "prev_field" => Some(Action::PrevField),
        "next_field" => Some(Action::NextField),
        "value_up" => Some(Action::ValueUp),
        "value_down" => Some(Action::ValueDown),
        "play" => Some(Action::Play),
        "enter_root" => Some(Action::EnterRoot),
        "export" => Some(Action::Export),
        _ => None,
    }
}

pub fn apply_overrides(bindings: &mut Vec<Binding>, overrides: &HashMap<String, KeyList>) {
    for (action_str, keys) in overrides {
        let Some(action) = parse_action(action_str) else {
            continue;
        };
        bindings.retain(|b| b.action != action);
        for key_str in keys.keys() {
            if let Some(key) = parse_key(key_str) {
                bindings.push(Binding {
                    key,
                    action,
                    hint: "",
                });
            }
        }
    }
}

pub struct Bindings {
    pub normal: Vec<Binding>,
}

impl Bindings {
    pub fn load() -> Self {
        let config = load_config();
        let mut normal: Vec<Binding> = bindings::normal_bindings().to_vec();
        apply_overrides(&mut normal, &config.normal);
        Self { normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("x"), Some(KeyCode::Char('x')));
        assert_eq!(parse_key("bogus"), None);
    }

    #[test]
    fn test_apply_overrides_replaces_defaults() {
        let mut normal: Vec<Binding> = bindings::normal_bindings().to_vec();
        let mut overrides = HashMap::new();
        overrides.insert("play".to_string(), KeyList::Single("x".to_string()));
        apply_overrides(&mut normal, &overrides);

        assert_eq!(
            bindings::lookup(&normal, KeyCode::Char('x')),
            Some(Action::Play)
        );
        assert_eq!(bindings::lookup(&normal, KeyCode::Char('p')), None);
    }

    #[test]
    fn test_unknown_actions_are_ignored() {
        let mut normal: Vec<Binding> = bindings::normal_bindings().to_vec();
        let before = normal.len();
        let mut overrides = HashMap::new();
        overrides.insert("warp".to_string(), KeyList::Single("x".to_string()));
        apply_overrides(&mut normal, &overrides);
        assert_eq!(normal.len(), before);
    }

    #[test]
    fn test_toml_shape() {
        let config: Config = toml::from_str(
            r#"
            [normal]
            play = ["x", "enter"]
            quit = "esc"
            "#,
        )
        .unwrap();
        assert_eq!(config.normal["play"].keys(), vec!["x", "enter"]);
        assert_eq!(config.normal["quit"].keys(), vec!["esc"]);
    }
}
