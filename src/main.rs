//! DROPTRIS - a falling-block puzzle for the terminal
//!
//! The engine lives in the library; this binary only wires keys, a frame
//! clock and a renderer around it.

mod input;
mod settings;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use droptris::{Command, Game, GameEvent};
use input::{Input, InputHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::Alert;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// How long an alert stays on screen
const ALERT_DURATION: Duration = Duration::from_secs(5);

/// Level past which level-up alerts turn red
const ON_FIRE_LEVEL: u32 = 15;

/// Get the droptris temp directory, creating it if needed
fn droptris_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("droptris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let droptris_dir = droptris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&droptris_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "droptris=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "DROPTRIS starting up, session={:08x}, log={}",
        session_id,
        droptris_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    let seed = settings.recording.seed.unwrap_or_else(rand::random);
    tracing::info!("seed={}", seed);
    let mut game = Game::with_rules(seed, settings.rules);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if settings.recording.save_last_game {
        let path = droptris_dir.join("last_game.json");
        match game.recording().save(&path) {
            Ok(()) => tracing::info!("Recording saved to {}", path.display()),
            Err(e) => {
                tracing::warn!("{}", e);
                eprintln!("Warning: Could not save recording: {}", e);
            }
        }
    }

    if result.is_ok() {
        let score = game.score();
        println!("\nThanks for playing DROPTRIS!");
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let mut input = InputHandler::from_settings(settings);
    let mut alert: Option<(Alert, Instant)> = None;
    let mut last_frame = Instant::now();

    loop {
        let snapshot = game.snapshot();
        let shown = alert
            .as_ref()
            .filter(|(_, since)| since.elapsed() < ALERT_DURATION)
            .map(|(alert, _)| alert);
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings, shown))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                let handled = match key.kind {
                    KeyEventKind::Release => input.key_up(key),
                    _ => input.key_down(key, game.phase()),
                };

                match handled {
                    Some(Input::Quit) => return Ok(()),
                    Some(Input::Command(command)) => {
                        if matches!(command, Command::Pause | Command::Replay) {
                            input.clear();
                        }
                        game.apply(command);
                    }
                    None => {}
                }
            }
        }

        if let Some(Input::Command(command)) = input.update() {
            game.apply(command);
        }

        let now = Instant::now();
        game.advance(now.duration_since(last_frame));
        last_frame = now;

        for event in game.take_events() {
            if let Some(next) = alert_for(&event) {
                alert = Some((next, Instant::now()));
            }
            if matches!(event, GameEvent::Started) {
                alert = None;
            }
        }
    }
}

/// Alert to show for an engine event, if any
fn alert_for(event: &GameEvent) -> Option<Alert> {
    match *event {
        GameEvent::LevelUp { level, fall_interval_ms } => {
            tracing::info!("level up: {} ({} ms)", level, fall_interval_ms);
            let on_fire = level > ON_FIRE_LEVEL;
            let message = if on_fire {
                format!("LEVEL {} - ON FIRE!", level)
            } else {
                format!("LEVEL {}!", level)
            };
            Some(Alert { message, on_fire })
        }
        GameEvent::LinesCleared { count: 4, .. } => Some(Alert {
            message: "TETRIS!".to_string(),
            on_fire: false,
        }),
        GameEvent::GameOver { score, .. } => Some(Alert {
            message: format!("Final {}", score),
            on_fire: false,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_up_alert_catches_fire() {
        let calm = alert_for(&GameEvent::LevelUp { level: 3, fall_interval_ms: 450 });
        assert_eq!(calm.map(|a| a.on_fire), Some(false));

        let hot = alert_for(&GameEvent::LevelUp { level: 16, fall_interval_ms: 150 });
        assert!(hot.is_some_and(|a| a.on_fire && a.message.contains("16")));
    }

    #[test]
    fn test_quiet_events_have_no_alert() {
        assert_eq!(alert_for(&GameEvent::Paused), None);
        assert_eq!(
            alert_for(&GameEvent::LinesCleared { count: 1, points: 40 }),
            None
        );
    }
}
