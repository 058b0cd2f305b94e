mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use display::{Dialog, CELL_H, CELL_W};
use dodge_game::compute::{
    acknowledge_game_over, game_over_report, init_state, move_player, resize, return_to_menu,
    start_game, toggle_pause, toggle_theme, Direction,
};
use dodge_game::config::{load_config, GameConfig};
use dodge_game::entities::{GameState, Screen};
use dodge_game::timer::Clock;

const LOG_FILE: &str = "dodge_game.log";

/// Same width the menu's name field accepts.
const MAX_NAME_LEN: usize = 20;

// ── Logging ───────────────────────────────────────────────────────────────────

/// stderr is the game screen, so log records go to a file.  If the file
/// cannot be opened the game runs without a logger.
fn init_logging() {
    use env_logger::{Builder, Env, Target};

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .init();
    }
}

// ── Application shell ─────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

/// Everything the frame loop owns: the simulation, its timers, and the
/// bits of UI state the simulation does not care about.
struct App {
    state: GameState,
    clock: Clock,
    name_input: String,
    dialog: Option<Dialog>,
    /// Set when a dialog paused a running game and should unpause it on close.
    resume_on_close: bool,
}

impl App {
    fn new(rules: GameConfig, cols: u16, rows: u16) -> Self {
        let clock = Clock::new(&rules);
        let (width, height) = world_size(cols, rows);
        Self {
            state: init_state(rules, width, height),
            clock,
            name_input: String::new(),
            dialog: None,
            resume_on_close: false,
        }
    }

    fn handle_event(&mut self, ev: Event) -> Flow {
        match ev {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => {
                let (width, height) = world_size(cols, rows);
                self.state = resize(&self.state, width, height);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) -> Flow {
        // Release events only arrive on keyboard-enhanced terminals; repeats
        // count as presses so held arrows keep moving.
        if kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        if let Some(dialog) = self.dialog.clone() {
            self.handle_dialog_key(dialog, code);
            return Flow::Continue;
        }

        match self.state.screen {
            Screen::Menu => self.handle_menu_key(code),
            Screen::Playing | Screen::Paused => self.handle_game_key(code),
            Screen::GameOver => Flow::Continue,
        }
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, code: KeyCode) {
        match (dialog, code) {
            (Dialog::Paused, KeyCode::Char('p') | KeyCode::Char('P')) => {
                self.state = toggle_pause(&self.state);
                self.dialog = None;
            }
            (Dialog::GameOver(_), KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                self.state = acknowledge_game_over(&self.state);
                self.dialog = None;
            }
            (_, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                self.dialog = None;
                if self.resume_on_close {
                    self.resume_on_close = false;
                    self.state = toggle_pause(&self.state);
                }
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter => {
                self.state = start_game(&self.state, &self.name_input);
                self.clock.start_game_timers();
            }
            KeyCode::F(1) => self.dialog = Some(Dialog::About),
            KeyCode::F(2) => self.dialog = Some(Dialog::Credits),
            KeyCode::F(3) | KeyCode::Tab => self.state = toggle_theme(&self.state),
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_game_key(&mut self, code: KeyCode) -> Flow {
        let direction = match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            self.state = move_player(&self.state, direction);
            return Flow::Continue;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.state = toggle_pause(&self.state);
                if self.state.screen == Screen::Paused {
                    self.dialog = Some(Dialog::Paused);
                }
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.clock.stop_game_timers();
                self.state = return_to_menu(&self.state);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => self.state = toggle_theme(&self.state),
            KeyCode::F(1) => {
                // The dialog takes the keyboard, so the game must not run under it.
                if self.state.screen == Screen::Playing {
                    self.state = toggle_pause(&self.state);
                    self.resume_on_close = true;
                }
                self.dialog = Some(Dialog::About);
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Pop the game-over dialog the first frame the game has ended.
    fn report_game_over(&mut self) {
        if matches!(self.dialog, Some(Dialog::GameOver(_))) {
            return;
        }
        if let Some(report) = game_over_report(&self.state) {
            self.resume_on_close = false;
            self.dialog = Some(Dialog::GameOver(report));
        }
    }
}

fn world_size(cols: u16, rows: u16) -> (i32, i32) {
    (cols as i32 * CELL_W, rows as i32 * CELL_H)
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, rules: GameConfig) -> std::io::Result<()> {
    let frame = Duration::from_millis(rules.tick_ms);
    let (cols, rows) = terminal::size()?;
    let mut app = App::new(rules, cols, rows);
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Flow::Quit = app.handle_event(ev) {
                return Ok(());
            }
        }

        app.state = app.clock.step(&app.state, &mut rng);
        app.report_game_over();

        display::render(out, &app.state, &app.name_input, app.dialog.as_ref())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let rules = load_config();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events so holding a key does not look like a
    // stream of presses; other terminals fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, rules);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    result
}
