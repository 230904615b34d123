mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};

use alien_invasion::audio::{Audio, Silent};
use alien_invasion::game::Game;
use alien_invasion::input::Flow;
use alien_invasion::settings::Settings;
use alien_invasion::terminal::{TerminalInput, Viewport};

use display::TerminalCanvas;

/// Shoot down the alien fleet before it reaches the ground.
///
/// Logs go to stderr; redirect it (`2>invaders.log`) and set `RUST_LOG` to
/// see them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML file overriding the default settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding laser.wav, explosion.wav, player_dead.wav and
    /// game_over.wav.
    #[arg(long, default_value = "sounds")]
    sounds: PathBuf,

    /// Disable sound cues.
    #[arg(long)]
    mute: bool,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let audio = open_audio(&cli);
    let mut game = Game::new(settings, audio).context("invalid settings")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    info!("terminal reports key releases: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let (cols, rows) = terminal::size()?;
    let viewport = Viewport::new(
        cols,
        rows,
        game.settings.screen_width,
        game.settings.screen_height,
    );
    let mut input = TerminalInput::new(viewport, keyboard_enhanced, &game.play_button.rect);
    let mut canvas = TerminalCanvas::new(out, viewport);

    let result = run(&mut canvas, &mut input, &mut game, &rx, cli.fps);

    // Always restore the terminal
    let out = canvas.writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("final score {}, high score {}", game.stats.score, game.stats.high_score);
    result
}

fn open_audio(cli: &Cli) -> Box<dyn Audio> {
    if cli.mute {
        return Box::new(Silent);
    }
    open_device(&cli.sounds).unwrap_or_else(|| Box::new(Silent))
}

#[cfg(feature = "sound")]
fn open_device(dir: &Path) -> Option<Box<dyn Audio>> {
    let manager = alien_invasion::audio::SoundManager::new(dir)?;
    Some(Box::new(manager))
}

#[cfg(not(feature = "sound"))]
fn open_device(dir: &Path) -> Option<Box<dyn Audio>> {
    warn!(
        "built without the `sound` feature, ignoring sounds in {}",
        dir.display()
    );
    None
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Drain input, advance the game, draw, then sleep out the rest of the frame.
/// Returns when the player quits.
fn run<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    input: &mut TerminalInput,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
) -> anyhow::Result<()> {
    let frame = Duration::from_secs(1) / fps.max(1);
    let mut pointer_visible = None;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.extend(input.translate(&ev, frame_start));
        }
        events.extend(input.expire(frame_start));

        if game.tick(events, frame_start) == Flow::Quit {
            info!("player quit");
            return Ok(());
        }

        canvas.viewport = input.viewport;
        game.render(canvas).context("failed to draw frame")?;

        // Show the pointer only while the Play button is up.
        let visible = game.pointer_visible();
        if pointer_visible != Some(visible) {
            if visible {
                canvas.writer().execute(cursor::Show)?;
            } else {
                canvas.writer().execute(cursor::Hide)?;
            }
            pointer_visible = Some(visible);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}
