use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in raw key events: Shift+Tab becomes
/// BackTab, and only key presses get through.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        let out = norm.normalize(Event::Key(key)).expect("should return event");
        if let Event::Key(k) = out {
            assert_eq!(k.code, KeyCode::BackTab);
            assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
        } else {
            panic!("expected key event");
        }
    }

    #[test]
    fn release_and_repeat_are_dropped() {
        let mut norm = KeyboardNormalizer::new();
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
            key.kind = kind;
            assert!(norm.normalize(Event::Key(key)).is_none());
        }
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        assert_eq!(
            norm.normalize(Event::Resize(10, 20)),
            Some(Event::Resize(10, 20))
        );
    }
}
