//! Terminal input translated into the events the app handles.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};

/// Input events, already filtered down to what the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key { key: Key, modifiers: Modifiers },
    Press { x: u16, y: u16, button: MouseButton },
    Drag { x: u16, y: u16, button: MouseButton },
    Release { x: u16, y: u16, button: MouseButton },
    Scroll { x: u16, y: u16, delta: i16 },
    Resize { width: u16, height: u16 },
}

impl Input {
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Key { .. } => "key",
            Self::Press { .. } => "press",
            Self::Drag { .. } => "drag",
            Self::Release { .. } => "release",
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

fn convert_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    })
}

/// Converts a crossterm event. Key releases, hover moves and other
/// unused events become `None`.
pub fn convert_event(event: CrosstermEvent) -> Option<Input> {
    match event {
        CrosstermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            Some(Input::Key {
                key: convert_key(code)?,
                modifiers: modifiers.into(),
            })
        }
        CrosstermEvent::Mouse(MouseEvent {
            kind, column, row, ..
        }) => match kind {
            MouseEventKind::Down(button) => Some(Input::Press {
                x: column,
                y: row,
                button: button.into(),
            }),
            MouseEventKind::Drag(button) => Some(Input::Drag {
                x: column,
                y: row,
                button: button.into(),
            }),
            MouseEventKind::Up(button) => Some(Input::Release {
                x: column,
                y: row,
                button: button.into(),
            }),
            MouseEventKind::ScrollUp => Some(Input::Scroll {
                x: column,
                y: row,
                delta: -1,
            }),
            MouseEventKind::ScrollDown => Some(Input::Scroll {
                x: column,
                y: row,
                delta: 1,
            }),
            _ => None,
        },
        CrosstermEvent::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}
