use crate::game::Direction;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::time::Duration;

/// The keys that steer the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Key> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::NONE, KeyCode::Up) => Some(Key::ArrowUp),
            (KeyModifiers::NONE, KeyCode::Down) => Some(Key::ArrowDown),
            (KeyModifiers::NONE, KeyCode::Left) => Some(Key::ArrowLeft),
            (KeyModifiers::NONE, KeyCode::Right) => Some(Key::ArrowRight),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('w' | 'W')) => Some(Key::W),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('a' | 'A')) => Some(Key::A),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('s' | 'S')) => Some(Key::S),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('d' | 'D')) => Some(Key::D),
            _ => None,
        }
    }

    pub(crate) fn direction(self) -> Direction {
        match self {
            Key::ArrowUp | Key::W => Direction::Up,
            Key::ArrowDown | Key::S => Direction::Down,
            Key::ArrowLeft | Key::A => Direction::Left,
            Key::ArrowRight | Key::D => Direction::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    Quit,
    Key(Key),
}

impl InputEvent {
    /// Translate a terminal event.  Only key presses of quit or steering keys
    /// produce anything.
    pub(crate) fn from_event(event: &Event) -> Option<InputEvent> {
        let ev = event.as_key_press_event()?;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                Some(InputEvent::Quit)
            }
            _ => Key::from_key_event(ev).map(InputEvent::Key),
        }
    }
}

/// A source of player input
pub(crate) trait InputSource {
    /// Return every event that has arrived since the last call, in order,
    /// without blocking
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Input read from the terminal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while poll(Duration::ZERO)? {
            if let Some(ev) = InputEvent::from_event(&read()?) {
                events.push(ev);
            }
        }
        Ok(events)
    }
}
