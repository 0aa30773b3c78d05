//! Terminal platform: raw mode setup and keyboard input via crossterm
//!
//! Terminals that speak the kitty keyboard protocol report key releases.
//! Everywhere else a key counts as held while its press/repeat events keep
//! arriving. A fresh press waits out the keyboard's auto-repeat delay
//! (`FIRST_HOLD_WINDOW`); once repeats flow, `HOLD_WINDOW` frames of silence
//! release it.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{ExecutableCommand, cursor, terminal};

use super::input::InputSource;
use crate::error::GameError;
use crate::sim::{HeldKeys, InputEvent, Key, TickInput};

/// Frames a repeating key stays held after its last repeat (no release events)
pub const HOLD_WINDOW: u64 = 4;
/// Frames a fresh press stays held before the first repeat; covers
/// auto-repeat delays up to about 660 ms at 30 Hz
pub const FIRST_HOLD_WINDOW: u64 = 20;

/// When a held key was last reported and whether it has started repeating
#[derive(Debug, Clone, Copy)]
struct HoldState {
    last_seen: u64,
    repeating: bool,
}

impl HoldState {
    fn window(&self) -> u64 {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_HOLD_WINDOW
        }
    }
}

/// Puts the terminal into game mode and restores it on drop
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self, GameError> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Ask for release events where the terminal can send them
        let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        log::info!(
            "Terminal ready (key release events: {})",
            if keyboard_enhanced { "yes" } else { "no" }
        );

        Ok(Self { keyboard_enhanced })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Physical key to game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Keyboard input read from the terminal on a background thread
pub struct TerminalInput {
    rx: Receiver<Event>,
    release_events: bool,
    held: HeldKeys,
    holds: HashMap<Key, HoldState>,
    frame: u64,
}

impl TerminalInput {
    /// Start the reader thread. It exits once the receiver is dropped and
    /// the next event arrives.
    pub fn spawn(release_events: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        log::error!("Terminal event read failed: {}", err);
                        break;
                    }
                }
            }
        });
        Self::from_receiver(rx, release_events)
    }

    pub fn from_receiver(rx: Receiver<Event>, release_events: bool) -> Self {
        Self {
            rx,
            release_events,
            held: HeldKeys::none(),
            holds: HashMap::new(),
            frame: 0,
        }
    }

    fn translate(&mut self, event: Event, out: &mut Vec<InputEvent>) {
        let Event::Key(key_event) = event else {
            return;
        };
        if key_event.kind != KeyEventKind::Release && is_quit(&key_event) {
            out.push(InputEvent::Quit);
            return;
        }
        let Some(key) = map_key(key_event.code) else {
            return;
        };

        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let repeating = self.held.is_held(key);
                self.holds.insert(
                    key,
                    HoldState {
                        last_seen: self.frame,
                        repeating,
                    },
                );
                if !repeating {
                    self.held.press(key);
                    out.push(InputEvent::KeyDown(key));
                }
            }
            KeyEventKind::Release => {
                self.holds.remove(&key);
                if self.held.is_held(key) {
                    self.held.release(key);
                    out.push(InputEvent::KeyUp(key));
                }
            }
        }
    }

    /// Release keys that went quiet (terminals without release events)
    fn expire_stale(&mut self, out: &mut Vec<InputEvent>) {
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|key| {
                self.holds
                    .get(key)
                    .map(|hold| self.frame.saturating_sub(hold.last_seen) > hold.window())
                    .unwrap_or(true)
            })
            .collect();
        for key in stale {
            self.held.release(key);
            self.holds.remove(&key);
            out.push(InputEvent::KeyUp(key));
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<TickInput, GameError> {
        self.frame += 1;
        let held = self.held;
        let mut events = Vec::new();

        loop {
            match self.rx.try_recv() {
                Ok(event) => self.translate(event, &mut events),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(GameError::Io(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "terminal input closed",
                    )));
                }
            }
        }
        if !self.release_events {
            self.expire_stale(&mut events);
        }

        Ok(TickInput { events, held })
    }
}
