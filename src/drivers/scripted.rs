use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

/// Replays a fixed queue of events. Once the queue is empty `poll` reports
/// no input, so a loop driven by this driver must quit on its own.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
    mouse_capture: Option<bool>,
}

impl ScriptedDriver {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            mouse_capture: None,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Last value passed to `set_mouse_capture`.
    pub fn mouse_capture(&self) -> Option<bool> {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = Some(enabled);
        Ok(())
    }
}
