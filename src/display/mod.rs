/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only projects the
/// pixel-space world onto character cells and emits terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use dodge_game::entities::{GameOverReport, GameState, Screen, Sprite, SpriteColor, Theme};

/// Virtual pixels per terminal column / row.
pub const CELL_W: i32 = 8;
pub const CELL_H: i32 = 16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BUTTON_BG: Color = Color::Rgb { r: 70, g: 130, b: 180 };
const C_BUTTON_FG: Color = Color::White;
const C_TITLE: Color = Color::White;
const C_PLACEHOLDER: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;
const C_MENU_BG: Color = Color::Rgb { r: 40, g: 44, b: 52 };
const C_DIALOG_BG: Color = Color::Rgb { r: 238, g: 238, b: 238 };
const C_DIALOG_FG: Color = Color::Black;

/// (top, bottom) of the play-field gradient.
fn gradient(theme: Theme) -> ((u8, u8, u8), (u8, u8, u8)) {
    match theme {
        Theme::Dark => ((18, 18, 25), (40, 44, 52)),
        Theme::Light => ((230, 240, 255), (200, 230, 255)),
    }
}

fn hud_color(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::White,
        Theme::Light => Color::Black,
    }
}

fn sprite_color(color: SpriteColor) -> Color {
    match color {
        SpriteColor::Orange => Color::Rgb { r: 255, g: 200, b: 0 },
        SpriteColor::Red => Color::Red,
        SpriteColor::Green => Color::Green,
        SpriteColor::Cyan => Color::Cyan,
    }
}

// ── Modal dialogs ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Dialog {
    About,
    Credits,
    Paused,
    GameOver(GameOverReport),
}

impl Dialog {
    fn title(&self) -> &'static str {
        match self {
            Dialog::About => "Mini Game - Demo",
            Dialog::Credits => "Credits",
            Dialog::Paused => "Paused",
            Dialog::GameOver(_) => "GAME OVER",
        }
    }

    fn lines(&self) -> Vec<String> {
        match self {
            Dialog::About => vec![
                "Sample game built from custom-drawn components.".to_string(),
                "Arrows/WASD to move. P to pause.".to_string(),
            ],
            Dialog::Credits => vec![
                "Practice repository - Course".to_string(),
                "Custom components, timers, collisions.".to_string(),
            ],
            Dialog::Paused => vec![
                "Game paused.".to_string(),
                "Press P to continue.".to_string(),
            ],
            Dialog::GameOver(report) => vec![
                "End of the game.".to_string(),
                format!("{} scored: {}", report.player_name, report.score),
                "Back to the menu?".to_string(),
            ],
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: the current screen, then any open dialog.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    name_input: &str,
    dialog: Option<&Dialog>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Menu => draw_menu(out, state, name_input)?,
        Screen::Playing | Screen::Paused | Screen::GameOver => draw_game(out, state)?,
    }

    if let Some(dialog) = dialog {
        draw_dialog(out, state, dialog)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows(state).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn cols(state: &GameState) -> u16 {
    (state.width / CELL_W).clamp(0, u16::MAX as i32) as u16
}

fn rows(state: &GameState) -> u16 {
    (state.height / CELL_H).clamp(0, u16::MAX as i32) as u16
}

// ── Game screen ───────────────────────────────────────────────────────────────

fn draw_game<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    draw_background(out, state)?;

    for reward in &state.rewards {
        draw_sprite(out, state, &reward.sprite)?;
    }
    for enemy in &state.enemies {
        draw_sprite(out, state, &enemy.sprite)?;
    }
    draw_sprite(out, state, &state.player.sprite)?;

    draw_hud(out, state)
}

/// Vertical gradient, one background colour per row.
fn draw_background<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let ((r0, g0, b0), (r1, g1, b1)) = gradient(state.theme);
    let h = rows(state);
    let blank = " ".repeat(cols(state) as usize);
    let lerp = |a: u8, b: u8, t: f32| (a as f32 + (b as f32 - a as f32) * t).round() as u8;

    for row in 0..h {
        let t = if h > 1 { row as f32 / (h - 1) as f32 } else { 0.0 };
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(style::SetBackgroundColor(Color::Rgb {
            r: lerp(r0, r1, t),
            g: lerp(g0, g1, t),
            b: lerp(b0, b1, t),
        }))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

/// Fill the sprite's (scaled, centred) box with blocks, clipped to the screen.
fn draw_sprite<W: Write>(out: &mut W, state: &GameState, sprite: &Sprite) -> std::io::Result<()> {
    let b = sprite.bounds;
    let scale = sprite.scale();
    let sw = (b.w as f32 * scale) as i32;
    let sh = (b.h as f32 * scale) as i32;
    let sx = b.x + (b.w - sw) / 2;
    let sy = b.y + (b.h - sh) / 2;

    let c0 = (sx / CELL_W).max(0);
    let c1 = ((sx + sw + CELL_W - 1) / CELL_W).min(cols(state) as i32);
    let r0 = (sy / CELL_H).max(0);
    let r1 = ((sy + sh + CELL_H - 1) / CELL_H).min(rows(state) as i32);
    if c0 >= c1 || r0 >= r1 {
        return Ok(());
    }

    out.queue(style::SetForegroundColor(sprite_color(sprite.color)))?;
    let fill = "█".repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        out.queue(Print(&fill))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(hud_color(state.theme)))?;
    out.queue(style::SetAttribute(Attribute::Bold))?;
    out.queue(Print(format!(
        "Player: {}  Score: {}  Lives: {}",
        state.player_name, state.score, state.lives
    )))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;

    let width = cols(state);
    let pause = " Pause (P) ";
    let menu = " Menu (M) ";
    let menu_x = width.saturating_sub(menu.len() as u16 + 1);
    let pause_x = menu_x.saturating_sub(pause.len() as u16 + 1);
    draw_button(out, pause_x, 0, pause)?;
    draw_button(out, menu_x, 0, menu)?;

    out.queue(cursor::MoveTo(1, rows(state).saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   P : Pause   T : Theme   M : Menu   Q : Quit"))?;
    Ok(())
}

// ── Widgets ───────────────────────────────────────────────────────────────────

/// A filled, rounded-looking push button on a single row.
fn draw_button<W: Write>(out: &mut W, col: u16, row: u16, label: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BUTTON_BG))?;
    out.queue(Print("◖"))?;
    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    out.queue(style::SetForegroundColor(C_BUTTON_FG))?;
    out.queue(style::SetAttribute(Attribute::Bold))?;
    out.queue(Print(label))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    out.queue(style::SetForegroundColor(C_BUTTON_BG))?;
    out.queue(Print("◗"))?;
    Ok(())
}

/// Single-line text field with a placeholder shown while empty.
fn draw_name_field<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    width: u16,
    text: &str,
    placeholder: &str,
) -> std::io::Result<()> {
    let inner = width.saturating_sub(2) as usize;
    out.queue(style::SetForegroundColor(Color::Grey))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(format!("╭{}╮", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(col, row + 1))?;
    out.queue(Print("│"))?;

    if text.is_empty() {
        out.queue(style::SetForegroundColor(C_PLACEHOLDER))?;
        out.queue(style::SetAttribute(Attribute::Italic))?;
        out.queue(Print(format!("{:<inner$}", placeholder, inner = inner)))?;
        out.queue(style::SetAttribute(Attribute::Reset))?;
    } else {
        // Show the tail when the name outgrows the box.
        let shown: String = {
            let chars: Vec<char> = text.chars().collect();
            let keep = inner.saturating_sub(1);
            chars[chars.len().saturating_sub(keep)..].iter().collect()
        };
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:<inner$}", format!("{}▏", shown), inner = inner)))?;
    }

    out.queue(style::SetForegroundColor(Color::Grey))?;
    out.queue(Print("│"))?;
    out.queue(cursor::MoveTo(col, row + 2))?;
    out.queue(Print(format!("╰{}╯", "─".repeat(inner))))?;
    Ok(())
}

// ── Menu screen ───────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameState, name_input: &str) -> std::io::Result<()> {
    // Flat menu background
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;
    let blank = " ".repeat(cols(state) as usize);
    for row in 0..rows(state) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }

    out.queue(cursor::MoveTo(4, 1))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(style::SetAttribute(Attribute::Bold))?;
    out.queue(Print("MINI COMPONENTS GAME"))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;

    draw_name_field(out, 4, 3, 30, name_input, "Your name...")?;
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;
    draw_button(out, 36, 4, " Play (Enter) ")?;
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;

    // Power-up list with alternating colour icons
    let powers = ["Power: Extra life", "Power: Shield", "Power: Speed"];
    for (i, power) in powers.iter().enumerate() {
        let row = 7 + i as u16;
        let (bg, fg) = if i == 0 {
            (Color::Rgb { r: 80, g: 120, b: 160 }, Color::White)
        } else {
            (Color::White, Color::DarkGrey)
        };
        let icon = if i % 2 == 0 { Color::Magenta } else { Color::Cyan };
        out.queue(cursor::MoveTo(4, row))?;
        out.queue(style::SetBackgroundColor(bg))?;
        out.queue(style::SetForegroundColor(icon))?;
        out.queue(Print(" ● "))?;
        out.queue(style::SetForegroundColor(fg))?;
        out.queue(Print(format!("{:<27}", power)))?;
    }
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;

    draw_button(out, 4, 11, " Credits (F2) ")?;
    out.queue(style::SetBackgroundColor(C_MENU_BG))?;

    out.queue(style::SetBackgroundColor(Color::Reset))?;
    draw_sprite(out, state, &state.logo)?;

    out.queue(cursor::MoveTo(4, rows(state).saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Enter : Play   F1 : About   F2 : Credits   F3 : Theme   Esc : Quit"))?;
    Ok(())
}

// ── Dialog overlay ────────────────────────────────────────────────────────────

fn draw_dialog<W: Write>(out: &mut W, state: &GameState, dialog: &Dialog) -> std::io::Result<()> {
    let title = dialog.title();
    let lines = dialog.lines();
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0)
        + 4;
    let height = lines.len() as u16 + 5;
    let width = inner as u16 + 2;
    let left = (cols(state) / 2).saturating_sub(width / 2);
    let top = (rows(state) / 2).saturating_sub(height / 2);

    out.queue(style::SetBackgroundColor(C_DIALOG_BG))?;
    out.queue(style::SetForegroundColor(C_DIALOG_FG))?;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{:─^inner$}┐", format!(" {} ", title), inner = inner)))?;
    for row in 1..height - 1 {
        out.queue(cursor::MoveTo(left, top + row))?;
        out.queue(Print(format!("│{}│", " ".repeat(inner))))?;
    }
    out.queue(cursor::MoveTo(left, top + height - 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(left + 3, top + 1 + i as u16))?;
        out.queue(Print(line))?;
    }

    let ok = " OK ";
    draw_button(out, left + width - ok.len() as u16 - 4, top + height - 2, ok)?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}
