mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use origami_invaders::camera::{self, FrameSource};
use origami_invaders::compute;
use origami_invaders::entities::GameStatus;
use origami_invaders::mapping::Geometry;
use origami_invaders::menu::{Menu, MenuEvent, Screen};
use origami_invaders::settings::{self, DISPLAY_MODES, RED_RANGES, TICK};
use origami_invaders::vision::Frame;
use origami_invaders::{overlay, vision};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(version, about = "Webcam-controlled arcade shooter", long_about = None)]
struct Cli {
    /// Capture device index
    #[arg(short = 'c', long = "camera", value_name = "INDEX", default_value_t = 0)]
    camera: u32,

    /// Display resolution (one of the supported modes), e.g. 800x600
    #[arg(short = 'r', long = "resolution", value_name = "WxH", default_value = "800x600")]
    resolution: String,

    /// Minimum blob area in px² before a detection counts
    #[arg(long = "min-area", value_name = "PX2", default_value_t = settings::MIN_BLOB_AREA)]
    min_area: u32,

    /// Use the built-in synthetic sweep source instead of a capture device
    #[arg(long = "synthetic", default_value_t = false)]
    synthetic: bool,
}

fn parse_resolution(s: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .context("expected WxH, e.g. 800x600")?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".origami_invaders_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let requested = parse_resolution(&cli.resolution)?;
    let mode_index = DISPLAY_MODES
        .iter()
        .position(|m| *m == requested)
        .unwrap_or_else(|| {
            log::warn!(
                "unsupported resolution {}x{}, falling back to default mode",
                requested.0,
                requested.1
            );
            settings::DEFAULT_MODE_INDEX
        });
    let (dw, dh) = DISPLAY_MODES[mode_index];
    let geom = Geometry::new(dw, dh);

    // A device that cannot be opened is a startup error, not a crash later.
    let (cw, ch) = geom.camera_resolution();
    let source = camera::open_source(cli.camera, cw, ch, cli.synthetic)
        .context("opening capture device")?;
    log::info!("capture source ready at {cw}x{ch}");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the tick loop never has to block on input I/O.
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

    let result = run(&mut out, source, geom, mode_index, &cli, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Frame orchestrator ────────────────────────────────────────────────────────

/// Each tick, in order: drain input, capture, detect → map → steer, advance
/// the simulation, composite the overlay, present, pace.
fn run<W: Write>(
    out: &mut W,
    mut source: Box<dyn FrameSource>,
    mut geom: Geometry,
    mode_index: usize,
    cli: &Cli,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let clock = Instant::now();

    let mut menu = Menu::new(mode_index);
    let mut high_score = load_high_score();
    let mut state = compute::init_state(&geom, 0, &mut rng);
    state.high_score = high_score;

    let mut last_frame: Option<Frame> = None;
    let mut running = true;

    while running {
        let tick_start = Instant::now();
        let now = clock.elapsed().as_millis() as u64;

        // ── 1. Drain pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, .. }) = ev else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match (menu.screen, code) {
                (_, KeyCode::Char('q') | KeyCode::Char('Q')) => running = false,

                (Screen::Playing, KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P')) => {
                    menu.toggle_pause();
                }
                (Screen::Playing, KeyCode::Left) if !menu.paused => {
                    state = compute::nudge_ship(&state, -1, &geom);
                }
                (Screen::Playing, KeyCode::Right) if !menu.paused => {
                    state = compute::nudge_ship(&state, 1, &geom);
                }

                (Screen::Options, KeyCode::Esc) => menu.back(),

                (_, KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W')) => menu.select_prev(),
                (_, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')) => menu.select_next(),

                (_, KeyCode::Enter | KeyCode::Char(' ')) => match menu.confirm() {
                    MenuEvent::StartGame => {
                        state = compute::init_state(&geom, now, &mut rng);
                        state.high_score = high_score;
                        log::info!("round started");
                    }
                    MenuEvent::ApplyMode(i) => {
                        apply_mode(i, &mut geom, source.as_mut());
                        last_frame = None;
                    }
                    MenuEvent::Quit => running = false,
                    _ => {}
                },

                _ => {}
            }
        }

        // ── 2. Capture and track ─────────────────────────────────────────────
        match source.frame() {
            Some(frame) => {
                if menu.is_playing() {
                    if let Some(cam_x) = vision::detect(&frame, &RED_RANGES, cli.min_area) {
                        let target = geom.to_display_x(cam_x);
                        state = compute::steer_ship(&state, target, &geom);
                    }
                }
                last_frame = Some(frame);
            }
            // Device hiccup: no input this tick, keep the last ship position.
            None => log::debug!("no camera frame this tick"),
        }

        // ── 3. Advance the simulation ────────────────────────────────────────
        if menu.is_playing() {
            state = compute::tick(&state, &geom, now, &mut rng);
            if state.status == GameStatus::GameOver {
                menu.game_over();
                if state.score > high_score {
                    high_score = state.score;
                    save_high_score(high_score);
                }
                state.high_score = high_score;
                log::info!("round over, score {}", state.score);
            }
        }

        // ── 4. Composite and present ─────────────────────────────────────────
        let mut shown = last_frame.clone();
        if menu.screen == Screen::Playing {
            if let Some(frame) = shown.as_mut() {
                overlay::paint_sprites(frame, &state, &geom);
            }
        }
        display::render(out, shown.as_ref(), &state, &menu)?;

        // ── 5. Enforce the tick period ───────────────────────────────────────
        let elapsed = tick_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }

    Ok(())
}

/// Resolution change from the options screen: re-derive the geometry, then
/// release and reopen the camera at the matching capture resolution.
fn apply_mode(index: usize, geom: &mut Geometry, source: &mut dyn FrameSource) {
    let (w, h) = DISPLAY_MODES[index];
    geom.set_display(w, h);
    let (cw, ch) = geom.camera_resolution();
    match source.reconfigure(cw, ch) {
        Ok(()) => log::info!("display {w}x{h}, camera reconfigured to {cw}x{ch}"),
        Err(e) => log::error!("camera reconfigure failed: {e}"),
    }
}
