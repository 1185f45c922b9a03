/// Controller state.
///
/// `PadState` is one poll of a controller. `Pad` remembers the previous poll
/// so the demos can tell a fresh press (`pressed`) from a held button (`held`).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Cross,
    Circle,
    Start,
    Select,
}

impl Button {
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PadState(u16);

impl PadState {
    pub const fn empty() -> Self {
        PadState(0)
    }

    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn set(&mut self, button: Button, down: bool) {
        if down {
            self.0 |= button.bit();
        } else {
            self.0 &= !button.bit();
        }
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Pad {
    current: PadState,
    previous: PadState,
}

impl Pad {
    /// Record this tick's poll.
    pub fn update(&mut self, state: PadState) {
        self.previous = self.current;
        self.current = state;
    }

    /// Level-triggered: true on every tick the button is down.
    pub fn held(&self, button: Button) -> bool {
        self.current.contains(button)
    }

    /// Edge-triggered: true only on the tick the button goes down.
    pub fn pressed(&self, button: Button) -> bool {
        self.current.contains(button) && !self.previous.contains(button)
    }
}
