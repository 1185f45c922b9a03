use psx_demos::input::{Button, Pad, PadState};

#[test]
fn pad_state_sets_and_clears() {
    let mut state = PadState::empty().with(Button::Up).with(Button::Cross);
    assert!(state.contains(Button::Up));
    assert!(state.contains(Button::Cross));
    assert!(!state.contains(Button::Down));

    state.set(Button::Up, false);
    assert!(!state.contains(Button::Up));
}

#[test]
fn pressed_fires_on_rising_edge_only() {
    let mut pad = Pad::default();
    let start = PadState::empty().with(Button::Start);

    pad.update(start);
    assert!(pad.pressed(Button::Start));
    assert!(pad.held(Button::Start));

    pad.update(start);
    assert!(!pad.pressed(Button::Start));
    assert!(pad.held(Button::Start));

    pad.update(PadState::empty());
    assert!(!pad.held(Button::Start));
    pad.update(start);
    assert!(pad.pressed(Button::Start));
}

#[test]
fn buttons_are_independent() {
    let mut pad = Pad::default();
    pad.update(PadState::empty().with(Button::Left));
    pad.update(PadState::empty().with(Button::Left).with(Button::Start));
    assert!(pad.pressed(Button::Start));
    assert!(!pad.pressed(Button::Left));
    assert!(pad.held(Button::Left));
}
