//! # Gamepad state
//!
//! The handheld exposes its buttons as a keyboard, so raw input arrives as Linux
//! key codes. [`Buttons::from_key_code`] translates those; [`Gamepad`] latches
//! the state once per tick so edge queries compare against the previous tick.

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        const A     = 1 << 4;
        const B     = 1 << 5;
        const C     = 1 << 6;
        const X     = 1 << 7;
        const Y     = 1 << 8;
        const Z     = 1 << 9;
        const L     = 1 << 10;
        const R     = 1 << 11;
        const START = 1 << 12;
        const MENU  = 1 << 13;
    }
}

// linux/input-event-codes.h
const KEY_ESC: u16 = 1;
const KEY_1: u16 = 2;
const KEY_2: u16 = 3;
const KEY_BACKSPACE: u16 = 14;
const KEY_TAB: u16 = 15;
const KEY_ENTER: u16 = 28;
const KEY_LEFTCTRL: u16 = 29;
const KEY_LEFTSHIFT: u16 = 42;
const KEY_LEFTALT: u16 = 56;
const KEY_SPACE: u16 = 57;
const KEY_UP: u16 = 103;
const KEY_LEFT: u16 = 105;
const KEY_RIGHT: u16 = 106;
const KEY_DOWN: u16 = 108;

impl Buttons {
    pub fn from_key_code(code: u16) -> Option<Buttons> {
        let button = match code {
            KEY_UP => Buttons::UP,
            KEY_DOWN => Buttons::DOWN,
            KEY_LEFT => Buttons::LEFT,
            KEY_RIGHT => Buttons::RIGHT,
            KEY_LEFTCTRL => Buttons::A,
            KEY_LEFTALT => Buttons::B,
            KEY_2 => Buttons::C,
            KEY_SPACE => Buttons::X,
            KEY_LEFTSHIFT => Buttons::Y,
            KEY_1 => Buttons::Z,
            KEY_TAB => Buttons::L,
            KEY_BACKSPACE => Buttons::R,
            KEY_ENTER => Buttons::START,
            KEY_ESC => Buttons::MENU,
            _ => return None,
        };
        Some(button)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Gamepad {
    pending: Buttons,
    current: Buttons,
    previous: Buttons,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Takes effect on the next [`Gamepad::update`].
    pub fn set_key(&mut self, code: u16, down: bool) {
        if let Some(button) = Buttons::from_key_code(code) {
            self.pending.set(button, down);
        }
    }

    pub fn set_button(&mut self, button: Buttons, down: bool) {
        self.pending.set(button, down);
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        self.previous = self.current;
        self.current = self.pending;
    }

    pub fn held(&self, button: Buttons) -> bool {
        self.current.contains(button)
    }

    /// Down this tick, up the tick before.
    pub fn pressed(&self, button: Buttons) -> bool {
        self.current.contains(button) && !self.previous.contains(button)
    }

    /// Up this tick, down the tick before.
    pub fn released(&self, button: Buttons) -> bool {
        !self.current.contains(button) && self.previous.contains(button)
    }
}
