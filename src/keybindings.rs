use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Ordered action-to-key table. Lookups walk the table in insertion order,
/// so the first binding registered for a key wins.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    entries: Vec<(Action, KeyCombo)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let ctrl = KeyModifiers::CONTROL;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), ctrl));
        kb.add(NewWindow, KeyCombo::new(KeyCode::Char('n'), ctrl));
        kb.add(CloseWindow, KeyCombo::new(KeyCode::Char('w'), ctrl));
        kb.add(MinimizeWindow, KeyCombo::new(KeyCode::Char('m'), ctrl));
        kb.add(MaximizeWindow, KeyCombo::new(KeyCode::Char('x'), ctrl));
        kb.add(RestoreWindow, KeyCombo::new(KeyCode::Char('r'), ctrl));
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(FocusPrev, KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.entries.push((action, combo));
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.entries
            .iter()
            .any(|(act, combo)| *act == action && combo.matches(key))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.entries
            .iter()
            .find(|(_, combo)| combo.matches(key))
            .map(|(act, _)| *act)
    }

    /// Actions with their key labels, in registration order.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        let mut out: Vec<(Action, Vec<String>)> = Vec::new();
        for (act, combo) in &self.entries {
            match out.iter_mut().find(|(existing, _)| existing == act) {
                Some((_, labels)) => labels.push(combo.display()),
                None => out.push((*act, vec![combo.display()])),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        assert_eq!(kb.action_for_key(&ev), Some(Action::Quit));
    }

    #[test]
    fn plain_letters_pass_through_to_content() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), None);
    }

    #[test]
    fn first_binding_wins() {
        let mut kb = KeyBindings::new();
        let combo = KeyCombo::new(KeyCode::F(2), KeyModifiers::NONE);
        kb.add(Action::NewWindow, combo.clone());
        kb.add(Action::Quit, combo);
        let ev = KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), Some(Action::NewWindow));
    }

    #[test]
    fn help_entries_group_by_action() {
        let mut kb = KeyBindings::default();
        kb.add(
            Action::Quit,
            KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE),
        );
        let help = kb.help_entries();
        assert_eq!(help[0], (Action::Quit, vec!["Ctrl+Q".into(), "Esc".into()]));
        assert_eq!(help.len(), 8);
    }
}
