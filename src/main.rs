//! A portfolio page for the terminal.
//!
//! Run the binary to browse the bundled portfolio, with the hero headline
//! cycling through phrases like a typewriter.  Run with `--content` to show
//! your own TOML file; `--print-content` prints the bundled one as a start.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::sync::watch;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{clamp_interval_ms, clamp_pause_ms, AppConfig};
use crate::core::content::{Portfolio, BUILTIN_TOML};
use crate::core::typewriter::{Snapshot, TypewriterConfig, TypewriterHandle};
use crate::ui::{
    layout::AppLayout, nav::NavBar, page::PageWidget, popup::HelpPopup, progress::ProgressBar,
    theme::Theme,
};

/// Animation frame interval (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Portfolio page for the terminal")]
struct Cli {
    /// Portfolio content file (TOML).  Defaults to `content_path` from the
    /// config file, then to the bundled page.
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Milliseconds between typed characters.
    #[arg(long, value_name = "MS")]
    typing_ms: Option<u64>,

    /// Milliseconds between deleted characters.
    #[arg(long, value_name = "MS")]
    deleting_ms: Option<u64>,

    /// Milliseconds a fully typed phrase stays on screen.
    #[arg(long, value_name = "MS")]
    pause_ms: Option<u64>,

    /// Print the bundled portfolio TOML and exit.
    #[arg(long)]
    print_content: bool,

    /// Print the first N headline texts, one per line, and exit.
    #[arg(long, value_name = "N")]
    frames: Option<usize>,

    /// Write the effective config (defaults merged with the config file) and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Headline timings: CLI flags win over the config file.
    fn typewriter_config(&self, portfolio: &Portfolio, config: &AppConfig) -> TypewriterConfig {
        // Flags go through the same bounds as the config file.
        let interval = |flag: Option<u64>, fallback: Duration| {
            flag.map(|ms| Duration::from_millis(clamp_interval_ms(ms)))
                .unwrap_or(fallback)
        };
        portfolio
            .headline_config()
            .typing_interval(interval(self.typing_ms, config.typing_interval()))
            .deleting_interval(interval(self.deleting_ms, config.deleting_interval()))
            .pause_after_typed(
                self.pause_ms
                    .map(|ms| Duration::from_millis(clamp_pause_ms(ms)))
                    .unwrap_or(config.pause_after_typed()),
            )
    }
}

fn load_portfolio(cli: &Cli, config: &AppConfig) -> Result<Portfolio> {
    let portfolio = match cli.content.as_ref().or(config.content_path.as_ref()) {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::builtin().context("bundled portfolio is invalid")?,
    };
    tracing::info!(
        name = %portfolio.profile.name,
        phrases = portfolio.profile.headline_phrases.len(),
        "portfolio loaded"
    );
    Ok(portfolio)
}

// ───────────────────────────────────────── headless ─────────

/// Run the typewriter and write the text after each of the first `count`
/// ticks to `out`, one per line, then stop it.  Reads the lossless tick
/// stream so a slow writer never skips a state.
async fn print_frames<W: Write>(
    config: TypewriterConfig,
    count: usize,
    out: &mut W,
) -> Result<()> {
    let (handle, mut ticks) = TypewriterHandle::spawn_with_ticks(config)?;
    for _ in 0..count {
        let Some(snapshot) = ticks.recv().await else {
            break;
        };
        writeln!(out, "{}", snapshot.text)?;
    }
    out.flush()?;
    handle.shutdown().await;
    Ok(())
}

// ───────────────────────────────────────── interactive ───────

async fn run<W: Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    state: &mut AppState,
    mut headline: watch::Receiver<Snapshot>,
) -> Result<()> {
    let mut events = spawn_event_reader(FRAME_INTERVAL);
    let mut last_frame = Instant::now();
    // Cleared once the typewriter stops publishing.
    let mut headline_live = true;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::from_area(area);
            state.fit_to(&layout);

            frame.render_widget(
                ProgressBar {
                    progress: state.progress.value(),
                },
                layout.progress_area,
            );
            frame.render_widget(
                NavBar {
                    name: state.portfolio.profile.display_name(),
                    current: state.current_section(),
                },
                layout.nav_area,
            );
            frame.render_widget(
                PageWidget {
                    document: &state.document,
                    offset: state.scroll.offset(),
                    headline: &state.headline.text,
                    cursor_visible: state.cursor_visible(),
                    reveal: &state.reveal,
                    frame: state.frame,
                },
                layout.page_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Page => {
                    let percent = (state.scroll.progress() * 100.0).round();
                    let message = state.status_message.as_deref().unwrap_or(&hint);
                    format!(" {message}  {percent:>3}%")
                }
                ActiveView::Help => String::new(),
            };
            frame.render_widget(
                Paragraph::new(status_text).style(Theme::status_bar_style()),
                layout.status_area,
            );

            if state.active_view == ActiveView::Help {
                frame.render_widget(
                    HelpPopup {
                        config: &state.config,
                    },
                    area,
                );
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => {
                        let layout = AppLayout::from_area(terminal.get_frame().area());
                        handler::handle_mouse(state, &layout, m);
                    }
                    // `draw` picks up the new size.
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {}
                }
            }

            changed = headline.changed(), if headline_live => {
                match changed {
                    Ok(()) => state.headline = headline.borrow_and_update().clone(),
                    Err(_) => headline_live = false,
                }
            }

            else => {
                tracing::warn!("terminal event reader stopped");
                break;
            }
        }

        // Animations advance on a fixed cadence whichever event woke us;
        // idle ticks keep them moving without input.
        let elapsed = last_frame.elapsed();
        if elapsed >= FRAME_INTERVAL {
            state.on_frame(elapsed.as_secs_f64());
            last_frame = Instant::now();
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is opt-in.  The page draws on stdout, so `2>folio.log` keeps
    // log lines off the screen.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr) // never pollute stdout
            .init();
    }

    let cli = Cli::parse();

    // ── one-shot modes ────────────────────────────────────────
    if cli.print_content {
        print!("{BUILTIN_TOML}");
        return Ok(());
    }

    let user_config = AppConfig::load();
    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let portfolio = load_portfolio(&cli, &user_config)?;
    let headline_config = cli.typewriter_config(&portfolio, &user_config);

    if let Some(count) = cli.frames {
        return print_frames(headline_config, count, &mut stdout()).await;
    }

    let typewriter = TypewriterHandle::spawn(headline_config)?;

    let mut state = AppState::new(portfolio, user_config);
    state.headline = typewriter.current();
    let headline = typewriter.subscribe();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, headline).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed, then report.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    typewriter.shutdown().await;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hi_config() -> TypewriterConfig {
        TypewriterConfig::new(["Hi"])
            .typing_interval(Duration::from_millis(10))
            .deleting_interval(Duration::from_millis(10))
            .pause_after_typed(Duration::ZERO)
    }

    #[tokio::test(start_paused = true)]
    async fn frames_prints_the_text_after_each_tick() {
        let mut out = Vec::new();
        print_frames(hi_config(), 7, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "H\nHi\nH\n\nH\nHi\nH\n");
    }

    #[tokio::test(start_paused = true)]
    async fn frames_zero_prints_nothing() {
        let mut out = Vec::new();
        print_frames(hi_config(), 0, &mut out).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn frames_rejects_an_empty_phrase_list() {
        let mut out = Vec::new();
        let config = TypewriterConfig::new(Vec::<String>::new());
        assert!(print_frames(config, 3, &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn timing_flags_override_config_within_the_same_bounds() {
        let portfolio = Portfolio::builtin().unwrap();
        let config = AppConfig::default();

        let cli = Cli::parse_from([
            "folio",
            "--typing-ms",
            "0",
            "--deleting-ms",
            "5000",
            "--pause-ms",
            "99999",
        ]);
        let tw = cli.typewriter_config(&portfolio, &config);
        assert_eq!(tw.typing_interval, Duration::from_millis(1));
        assert_eq!(tw.deleting_interval, Duration::from_millis(1000));
        assert_eq!(tw.pause_after_typed, Duration::from_millis(10_000));

        let cli = Cli::parse_from(["folio"]);
        let tw = cli.typewriter_config(&portfolio, &config);
        assert_eq!(tw.typing_interval, config.typing_interval());
        assert_eq!(tw.deleting_interval, config.deleting_interval());
        assert_eq!(tw.pause_after_typed, config.pause_after_typed());
    }
}
