/// Terminal frontend shared by the demo binaries.
///
/// `Session` owns the terminal modes and the input thread, `Keyboard` turns
/// key events into pad states, and `run_demo` is the fixed-step frame loop:
/// poll → tick (as many times as the clock says) → draw → present → wait.
/// `run_shooter` and `run_sandbox` wrap that loop with asset loading.

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Stdout};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;

use crate::config::DemoConfig;
use crate::display::{TerminalAudio, TerminalRenderer};
use crate::input::{Button, Pad, PadState};
use crate::loop_counter::LoopCounter;
use crate::platform::{Audio, Renderer};
use crate::pong::Pong;
use crate::sandbox::{Sandbox, SandboxAssets};
use crate::scheduler::FrameClock;
use crate::shooter::{play_events, Shooter, ShooterAssets};

pub type Screen = TerminalRenderer<BufWriter<Stdout>>;

/// Once a key is auto-repeating, it counts as held while repeats keep arriving
/// within this window. OS key repeat runs at 15 Hz or faster.
const HOLD_WINDOW: Duration = Duration::from_millis(140);

/// A fresh press counts as held at least this long. Terminals without
/// key-release events go quiet for the OS repeat delay (up to ~500 ms)
/// between the first press and the first repeat.
const REPEAT_DELAY: Duration = Duration::from_millis(600);

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode, alternate screen and the input thread. Dropping the session
/// puts the terminal back the way it was.
pub struct Session {
    rx: mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    restored: bool,
}

impl Session {
    pub fn start() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Event>();
        // Built first so an early `?` still drops it and restores the terminal.
        let mut session = Session {
            rx,
            keyboard_enhanced: false,
            restored: false,
        };

        let mut out = stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back gracefully.
        session.keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        // Blocking reads live on their own thread so the frame loop never waits on input.
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        log::info!(
            "terminal session started (keyboard enhancement: {})",
            session.keyboard_enhanced
        );
        Ok(session)
    }

    pub fn screen(&self, config: &DemoConfig) -> io::Result<Screen> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalRenderer::new(
            BufWriter::new(stdout()),
            config.screen,
            cols,
            rows,
        ))
    }

    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.restore();
    }
}

// ── Keyboard → pads ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct KeyBindings {
    pads: [Vec<(KeyCode, Button)>; 2],
}

impl KeyBindings {
    /// Arrows or WASD to move, Space to fire, Enter to start.
    pub fn one_player() -> Self {
        let pad1 = vec![
            (KeyCode::Left, Button::Left),
            (KeyCode::Right, Button::Right),
            (KeyCode::Up, Button::Up),
            (KeyCode::Down, Button::Down),
            (KeyCode::Char('a'), Button::Left),
            (KeyCode::Char('d'), Button::Right),
            (KeyCode::Char('w'), Button::Up),
            (KeyCode::Char('s'), Button::Down),
            (KeyCode::Char(' '), Button::Cross),
            (KeyCode::Enter, Button::Start),
        ];
        KeyBindings {
            pads: [pad1, Vec::new()],
        }
    }

    /// W/S for the left player, arrows for the right one, Enter serves.
    pub fn two_players() -> Self {
        let pad1 = vec![
            (KeyCode::Char('w'), Button::Up),
            (KeyCode::Char('s'), Button::Down),
            (KeyCode::Enter, Button::Start),
        ];
        let pad2 = vec![
            (KeyCode::Up, Button::Up),
            (KeyCode::Down, Button::Down),
            (KeyCode::Enter, Button::Start),
        ];
        KeyBindings { pads: [pad1, pad2] }
    }
}

pub enum Poll {
    Continue,
    Resized(u16, u16),
    Quit,
}

#[derive(Clone, Copy, Debug)]
struct KeyHold {
    last: u64,
    repeating: bool,
}

/// Tracks which keys are held, frame by frame.
///
/// Each key maps to the tick its last press/repeat arrived on. Keys drop out
/// on release (keyboard-enhanced terminals) or when no repeat arrives in
/// time (classic terminals): `REPEAT_DELAY` after the first press,
/// `HOLD_WINDOW` once the key is repeating.
pub struct Keyboard {
    bindings: KeyBindings,
    keys: HashMap<KeyCode, KeyHold>,
    frame: u64,
    hold_ticks: u64,
    delay_ticks: u64,
}

impl Keyboard {
    pub fn new(bindings: KeyBindings, tick: Duration) -> Self {
        let ticks = |window: Duration| {
            let n = window.as_nanos() / tick.as_nanos().max(1);
            (n as u64).max(1)
        };
        Keyboard {
            bindings,
            keys: HashMap::new(),
            frame: 0,
            hold_ticks: ticks(HOLD_WINDOW),
            delay_ticks: ticks(REPEAT_DELAY),
        }
    }

    /// Drain pending events for this tick.
    pub fn poll(&mut self, rx: &mpsc::Receiver<Event>) -> Poll {
        self.frame += 1;
        let mut result = Poll::Continue;
        while let Ok(ev) = rx.try_recv() {
            match self.handle(ev) {
                Poll::Continue => {}
                Poll::Quit => return Poll::Quit,
                resized => result = resized,
            }
        }
        result
    }

    pub fn handle(&mut self, ev: Event) -> Poll {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => {
                let code = normalize(code);
                match kind {
                    KeyEventKind::Press => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Esc => return Poll::Quit,
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Poll::Quit;
                            }
                            _ => {}
                        }
                        // A press on a key that is still down is an OS repeat.
                        let repeating = self.is_held(&code);
                        self.keys.insert(
                            code,
                            KeyHold {
                                last: self.frame,
                                repeating,
                            },
                        );
                    }
                    KeyEventKind::Repeat => {
                        self.keys.insert(
                            code,
                            KeyHold {
                                last: self.frame,
                                repeating: true,
                            },
                        );
                    }
                    KeyEventKind::Release => {
                        self.keys.remove(&code);
                    }
                }
                Poll::Continue
            }
            Event::Resize(cols, rows) => Poll::Resized(cols, rows),
            _ => Poll::Continue,
        }
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.keys
            .get(key)
            .map(|hold| {
                let window = if hold.repeating {
                    self.hold_ticks
                } else {
                    self.delay_ticks
                };
                self.frame.saturating_sub(hold.last) <= window
            })
            .unwrap_or(false)
    }

    /// Buttons down on pad `player` (0 or 1) this tick.
    pub fn pad_state(&self, player: usize) -> PadState {
        let mut state = PadState::empty();
        if let Some(bindings) = self.bindings.pads.get(player) {
            for (key, button) in bindings {
                if self.is_held(key) {
                    state.set(*button, true);
                }
            }
        }
        state
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Demos ─────────────────────────────────────────────────────────────────────

pub trait Demo {
    /// One simulation tick with this tick's pad states.
    fn tick(&mut self, pads: &[Pad; 2]);
    fn draw(&mut self, renderer: &mut dyn Renderer);
}

/// The shooter plus everything it needs from the outside world.
pub struct ShooterDemo<'a, A: ?Sized> {
    pub game: Shooter,
    pub assets: ShooterAssets,
    audio: &'a mut A,
    rng: ThreadRng,
}

impl<'a, A: Audio + ?Sized> ShooterDemo<'a, A> {
    pub fn new(game: Shooter, assets: ShooterAssets, audio: &'a mut A) -> Self {
        ShooterDemo {
            game,
            assets,
            audio,
            rng: rand::thread_rng(),
        }
    }
}

impl<A: Audio + ?Sized> Demo for ShooterDemo<'_, A> {
    fn tick(&mut self, pads: &[Pad; 2]) {
        self.game.handle_input(&pads[0]);
        self.game.update(&mut self.rng);
        play_events(&mut *self.audio, &self.assets, self.game.drain_events());
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.game.draw(renderer, &self.assets);
    }
}

/// The movement sandbox and the two images it shows.
pub struct SandboxDemo {
    pub sandbox: Sandbox,
    pub assets: SandboxAssets,
}

impl Demo for SandboxDemo {
    fn tick(&mut self, pads: &[Pad; 2]) {
        self.sandbox.handle_input(&pads[0]);
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.sandbox.draw(renderer, &self.assets);
    }
}

impl Demo for Pong {
    fn tick(&mut self, pads: &[Pad; 2]) {
        self.handle_input(&pads[0], &pads[1]);
        self.update();
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) {
        Pong::draw(self, renderer);
    }
}

impl Demo for LoopCounter {
    fn tick(&mut self, _pads: &[Pad; 2]) {
        self.update();
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) {
        LoopCounter::draw(self, renderer);
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Run `demo` until the player quits.
pub fn run_demo<D: Demo>(
    demo: &mut D,
    session: &Session,
    screen: &mut Screen,
    config: &DemoConfig,
    bindings: KeyBindings,
) -> io::Result<()> {
    let tick = config.video.tick_duration();
    let mut clock = FrameClock::new(tick, config.max_catch_up);
    let mut keyboard = Keyboard::new(bindings, tick);
    let mut pads = [Pad::default(); 2];

    loop {
        for _ in 0..clock.ticks() {
            match keyboard.poll(&session.rx) {
                Poll::Quit => return Ok(()),
                Poll::Resized(cols, rows) => screen.resize(cols, rows),
                Poll::Continue => {}
            }
            for (player, pad) in pads.iter_mut().enumerate() {
                pad.update(keyboard.pad_state(player));
            }
            demo.tick(&pads);
        }

        demo.draw(screen);
        screen.present()?;
        clock.wait();
    }
}

/// Load the shooter's assets, start the music, run `body`, then free the
/// assets again whether `body` succeeded or not.
pub fn with_shooter_assets<R, A, T, F>(renderer: &mut R, audio: &mut A, body: F) -> Result<T>
where
    R: Renderer + ?Sized,
    A: Audio + ?Sized,
    F: FnOnce(&mut R, &mut A, &ShooterAssets) -> Result<T>,
{
    let assets = ShooterAssets::load(renderer, audio).context("failed to load shooter assets")?;
    audio.play(assets.music);

    let result = body(renderer, audio, &assets);

    assets.free(renderer, audio);
    log::info!("shooter assets released");
    result
}

pub fn run_shooter(session: &Session, config: &DemoConfig) -> Result<()> {
    let mut screen = session.screen(config)?;
    let mut audio = TerminalAudio::new();
    with_shooter_assets(&mut screen, &mut audio, |screen, audio, assets| {
        let game = Shooter::new(config.shooter, config.screen);
        let mut demo = ShooterDemo::new(game, *assets, audio);
        run_demo(
            &mut demo,
            session,
            screen,
            config,
            KeyBindings::one_player(),
        )
        .context("shooter frame loop failed")
    })
}

pub fn run_sandbox(session: &Session, config: &DemoConfig) -> Result<()> {
    let mut screen = session.screen(config)?;
    let assets = SandboxAssets::load(&mut screen).context("failed to load sandbox images")?;
    let mut demo = SandboxDemo {
        sandbox: Sandbox::new(config.screen),
        assets,
    };
    let result = run_demo(
        &mut demo,
        session,
        &mut screen,
        config,
        KeyBindings::one_player(),
    );
    demo.assets.free(&mut screen);
    result.context("sandbox frame loop failed")
}
