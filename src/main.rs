//! Harvester terminal runner (default binary).
//!
//! `harvester` flies the ship interactively; `harvester sim` reads a JSON
//! script on stdin and prints the resulting snapshot and grid.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use harvester::config::HostConfig;
use harvester::core::{Engine, EngineConfig, GlyphGrid};
use harvester::input::{should_quit, should_restart, InputHandler};
use harvester::term::{FrameBuffer, GridView, TerminalRenderer, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Interactive,
    Sim,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Interactive),
        [cmd] if cmd == "sim" => Ok(Command::Sim),
        [cmd, rest @ ..] if cmd == "sim" => Err(anyhow!("sim: unexpected argument: {}", rest[0])),
        [other, ..] => Err(anyhow!("unknown command: {other} (usage: harvester [sim])")),
    }
}

fn main() -> Result<()> {
    let config = HostConfig::from_env()?;
    harvester::logging::init(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Interactive => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run(&mut term, &config);

            // Always try to restore terminal state.
            let _ = term.exit();
            if let Err(e) = &result {
                warn!("interactive session failed: {e:#}");
            }
            result
        }
        Command::Sim => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("sim: read stdin")?;
            println!("{}", harvester::sim::run_json(&script, config.seed)?);
            Ok(())
        }
    }
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// (Re)build the world for `viewport`. A viewport too small to hold a grid
/// leaves the engine uninitialized until the next resize.
fn start(engine: &mut Engine, view: &GridView, viewport: Viewport) {
    engine.reset();
    let (w, h) = view.playfield(viewport);
    match engine.initialize(i32::from(w), i32::from(h)) {
        Ok(()) => info!(width = w, height = h, "engine initialized"),
        Err(e) => warn!("cannot start engine at {w}x{h}: {e}"),
    }
}

fn run(term: &mut TerminalRenderer, config: &HostConfig) -> Result<()> {
    let mut engine = Engine::with_config(EngineConfig::default().with_seed(config.seed));
    let mut view = GridView::default();
    let mut input = InputHandler::new();

    let mut viewport = current_viewport();
    start(&mut engine, &view, viewport);
    info!(
        tick_hz = config.tick_hz,
        enhanced_keys = term.enhanced_keys(),
        "interactive session started"
    );

    let empty = GlyphGrid::new(0, 0);
    let mut grid = GlyphGrid::new(0, 0);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let tick = config.tick_duration();
    let tick_ms = config.tick_ms();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let snapshot = if engine.is_ready() {
            engine.render_into(&mut grid)?;
            Some(engine.snapshot()?)
        } else {
            None
        };
        let shown = if snapshot.is_some() { &grid } else { &empty };
        view.render_into(shown, snapshot.as_ref(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!("quit requested");
                            return Ok(());
                        }
                        if should_restart(key) {
                            info!("restart requested");
                            input.clear();
                            start(&mut engine, &view, viewport);
                            continue;
                        }
                        if let Some(intent) = input.handle_key_press(key.code) {
                            debug!(?intent, "key press");
                        }
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    debug!(width = w, height = h, "terminal resized");
                    start(&mut engine, &view, viewport);
                    term.invalidate();
                }
                Event::FocusLost => input.clear(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let control = input.sample(tick_ms);
            if engine.is_ready() {
                engine.step(elapsed.as_secs_f32(), control)?;
            }
        }
    }
}
