use anyhow::{Context, Result};
use brazil_fires::app::{load_scene, App};
use brazil_fires::config::{Args, Config};
use brazil_fires::ui;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use log::{info, LevelFilter};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::time::{Duration, Instant};

/// One display tick; playback advances every `cadence` of these
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = Config::from_args(&args)?;
    let scene = load_scene(&config)?;
    let (width, height) = crossterm::terminal::size()?;
    let app = App::new(scene, &config, width, height);

    // stderr shares the screen with the TUI
    if args.log_file.is_none() {
        log::set_max_level(LevelFilter::Warn);
    }

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, app);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(args: &Args) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Hover tracking, control clicks and timeline scrubbing
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.press(mouse.column, mouse.row),
        // Dragging along a timeline scrubs through it
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(hit) = app.layout.hit_test(mouse.column, mouse.row) {
                if app.pressed != Some(hit) {
                    app.pressed = Some(hit);
                    app.apply(hit);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.release(),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    info!("Starting at {}", app.scene.time.label(app.playback.frame()));
    let mut last_tick = Instant::now();

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            KeyCode::Char(' ') => app.toggle_play(),
                            KeyCode::Char('s') | KeyCode::Char('S') => app.stop(),

                            KeyCode::Left | KeyCode::Char('h') => app.step_month(-1),
                            KeyCode::Right | KeyCode::Char('l') => app.step_month(1),
                            KeyCode::Up | KeyCode::Char('k') => app.step_year(1),
                            KeyCode::Down | KeyCode::Char('j') => app.step_year(-1),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
