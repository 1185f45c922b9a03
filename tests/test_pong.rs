mod common;

use common::{DrawCall, RecordingRenderer};
use psx_demos::config::{PongConfig, ScreenSize};
use psx_demos::input::{Button, Pad, PadState};
use psx_demos::platform::Rgb;
use psx_demos::pong::{Pong, Side};

const SCREEN: ScreenSize = ScreenSize {
    width: 320,
    height: 240,
};

fn make_pong() -> Pong {
    Pong::new(PongConfig::default(), SCREEN)
}

fn pad(buttons: &[Button]) -> Pad {
    let mut pad = Pad::default();
    let state = buttons
        .iter()
        .fold(PadState::empty(), |state, &b| state.with(b));
    pad.update(state);
    pad
}

#[test]
fn initial_layout() {
    let pong = make_pong();
    assert_eq!(pong.left.x, 20);
    assert_eq!(pong.right.x, 320 - 20 - 4);
    assert_eq!(pong.left.y, (240 - 32) / 2);
    assert!(!pong.ball.in_play);
    assert_eq!((pong.ball.x, pong.ball.y), (158, 118));
}

#[test]
fn bats_move_and_clamp_between_borders() {
    let mut pong = make_pong();
    pong.move_bat(Side::Left, -2);
    assert_eq!(pong.left.y, 102);

    pong.move_bat(Side::Left, -1000);
    assert_eq!(pong.left.y, 20);
    pong.move_bat(Side::Right, 1000);
    assert_eq!(pong.right.y, 240 - 20 - 32);
}

#[test]
fn each_pad_drives_its_own_bat() {
    let mut pong = make_pong();
    pong.handle_input(&pad(&[Button::Up]), &pad(&[Button::Down]));
    assert_eq!(pong.left.y, 102);
    assert_eq!(pong.right.y, 106);
}

#[test]
fn ball_rests_until_kicked() {
    let mut pong = make_pong();
    assert_eq!(pong.update(), None);
    assert_eq!((pong.ball.x, pong.ball.y), (158, 118));

    pong.handle_input(&Pad::default(), &pad(&[Button::Start]));
    assert!(pong.ball.in_play);
    pong.update();
    assert_eq!((pong.ball.x, pong.ball.y), (160, 119));
}

#[test]
fn kick_is_ignored_while_moving() {
    let mut pong = make_pong();
    pong.kick();
    pong.ball.speed_x = -7;
    pong.kick();
    assert_eq!(pong.ball.speed_x, -7);
}

#[test]
fn ball_bounces_off_boundary_lines() {
    let mut pong = make_pong();
    pong.kick();
    pong.ball.y = 21;
    pong.ball.speed_y = -3;
    pong.update();
    assert_eq!(pong.ball.y, 20);
    assert_eq!(pong.ball.speed_y, 3);

    pong.ball.y = 240 - 20 - 3 - 1;
    pong.ball.speed_y = 3;
    pong.update();
    assert_eq!(pong.ball.y, 240 - 20 - 3);
    assert_eq!(pong.ball.speed_y, -3);
}

#[test]
fn ball_bounces_off_bats() {
    let mut pong = make_pong();
    pong.kick();
    let bat = pong.bat_rect(Side::Left);
    pong.ball.x = bat.right() + 1;
    pong.ball.y = bat.y + 10;
    pong.ball.speed_x = -2;
    pong.ball.speed_y = 0;
    pong.update();
    assert_eq!(pong.ball.speed_x, 2);
    assert_eq!(pong.ball.x, bat.right());

    let bat = pong.bat_rect(Side::Right);
    pong.ball.x = bat.x - 4;
    pong.ball.y = bat.y + 10;
    pong.ball.speed_x = 2;
    pong.update();
    assert_eq!(pong.ball.speed_x, -2);
    assert_eq!(pong.ball.x, bat.x - 3);
}

#[test]
fn missed_ball_scores_for_the_other_side() {
    let mut pong = make_pong();
    pong.kick();
    pong.ball.x = 2;
    pong.ball.y = 30;
    pong.ball.speed_x = -6;
    pong.ball.speed_y = 0;

    assert_eq!(pong.update(), Some(Side::Right));
    assert_eq!(pong.score.right, 1);
    assert!(!pong.ball.in_play);
    assert_eq!((pong.ball.x, pong.ball.y), (158, 118));

    // Next serve heads back towards the left player.
    pong.kick();
    assert!(pong.ball.speed_x < 0);
}

#[test]
fn right_miss_scores_left() {
    let mut pong = make_pong();
    pong.kick();
    pong.ball.x = 318;
    pong.ball.y = 30;
    pong.ball.speed_x = 4;
    pong.ball.speed_y = 0;
    assert_eq!(pong.update(), Some(Side::Left));
    assert_eq!(pong.score.left, 1);
}

#[test]
fn draw_shows_field_and_score() {
    let mut pong = make_pong();
    pong.score.left = 3;
    pong.score.right = 1;
    let mut renderer = RecordingRenderer::default();
    pong.draw(&mut renderer);

    assert_eq!(renderer.texts(), vec!["3:1"]);
    assert_eq!(renderer.rects().len(), 3);
    assert!(renderer
        .calls
        .contains(&DrawCall::Line(160, 0, 160, 240, Rgb::GREY)));
    assert!(renderer
        .calls
        .contains(&DrawCall::Line(0, 20, 320, 20, Rgb::WHITE)));
}
