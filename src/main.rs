use std::fs::{self, File};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geoscii::app::App;
use geoscii::bridge::{BufferedChannel, ChannelSpec, FileChannel};
use geoscii::config::{self, Config, MapDetail};
use geoscii::controller::AnnotationController;
use geoscii::file_io;
use geoscii::geo::LatLng;
use geoscii::toolkit::Scene;
use geoscii::{input, ui};

/// Polygon annotation over a terminal map
#[derive(Parser, Debug)]
#[command(name = "geoscii")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (defaults to $XDG_CONFIG_HOME/geoscii/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial map center latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Initial map center longitude
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Initial zoom level
    #[arg(long)]
    zoom: Option<u8>,

    /// Start editing the polygon in this [[lat, lng], ...] file
    #[arg(long, value_name = "FILE")]
    coords: Option<PathBuf>,

    /// Where saved coordinates go: none, stdout or file:<path>
    #[arg(long, value_name = "CHANNEL")]
    channel: Option<ChannelSpec>,

    /// Write the final coordinate list here on exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Draw coastlines at low resolution
    #[arg(long)]
    low_detail: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(lat) = args.lat {
        config.center.lat = lat;
    }
    if let Some(lng) = args.lng {
        config.center.lng = lng;
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    if let Some(channel) = args.channel {
        config.channel = channel;
    }
    if args.low_detail {
        config.map_detail = MapDetail::Low;
    }
    if let Some(path) = &args.coords {
        config.initial_coordinates = file_io::load_coordinates(path)?;
    }
    config.validate()?;

    // Build the controller and its host channel
    let mut controller = AnnotationController::new(Scene::new(), config.palette.clone())
        .with_default_shape_style(config.polygon_style);
    let mut stdout_messages = None;
    match &config.channel {
        ChannelSpec::None => {}
        ChannelSpec::Stdout => {
            let channel = BufferedChannel::new();
            stdout_messages = Some(channel.messages());
            controller = controller.with_channel(Box::new(channel));
        }
        ChannelSpec::File(path) => {
            controller = controller.with_channel(Box::new(FileChannel::new(path)));
        }
    }
    controller.start(&config.initial_coordinates);
    info!(channel = %config.channel, "geoscii starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, &config);

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(messages) = stdout_messages {
        for message in messages.borrow().iter() {
            println!("{message}");
        }
    }

    if let Some(path) = &args.export {
        let coordinates: Vec<LatLng> = app.controller.coordinates().to_vec();
        if !coordinates.is_empty() {
            file_io::save_coordinates(path, &coordinates)?;
        }
    }

    if let Err(e) = result {
        eprintln!("Error: {:?}", e);
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let path = config::log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path).with_context(|| format!("creating log {}", path.display()))?;

    let filter = EnvFilter::try_from_env("GEOSCII_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        let size = terminal.size()?;
        app.resize(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
