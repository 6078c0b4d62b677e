use ratatui::crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    PrevField,
    NextField,
    ValueUp,
    ValueDown,
    Play,
    EnterRoot,
    Export,
}

#[derive(Clone, Copy)]
pub struct Binding {
    pub key: KeyCode,
    pub action: Action,
    pub hint: &'static str,
}

pub fn normal_bindings() -> &'static [Binding] {
    &[
        Binding { key: KeyCode::Char('q'), action: Action::Quit, hint: "quit" },
        Binding { key: KeyCode::Esc, action: Action::Quit, hint: "quit" },
        Binding { key: KeyCode::Char('h'), action: Action::PrevField, hint: "field left" },
        Binding { key: KeyCode::Left, action: Action::PrevField, hint: "field left" },
        Binding { key: KeyCode::Char('l'), action: Action::NextField, hint: "field right" },
        Binding { key: KeyCode::Right, action: Action::NextField, hint: "field right" },
        Binding { key: KeyCode::Char('k'), action: Action::ValueUp, hint: "value up" },
        Binding { key: KeyCode::Up, action: Action::ValueUp, hint: "value up" },
        Binding { key: KeyCode::Char('j'), action: Action::ValueDown, hint: "value down" },
        Binding { key: KeyCode::Down, action: Action::ValueDown, hint: "value down" },
        Binding { key: KeyCode::Char('p'), action: Action::Play, hint: "play" },
        Binding { key: KeyCode::Char(' '), action: Action::Play, hint: "play" },
        Binding { key: KeyCode::Char('r'), action: Action::EnterRoot, hint: "type root" },
        Binding { key: KeyCode::Char('e'), action: Action::Export, hint: "export wav" },
    ]
}

pub fn lookup(bindings: &[Binding], code: KeyCode) -> Option<Action> {
    bindings.iter().find(|b| b.key == code).map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(
            lookup(normal_bindings(), KeyCode::Char('p')),
            Some(Action::Play)
        );
        assert_eq!(lookup(normal_bindings(), KeyCode::Char('z')), None);
    }
}
