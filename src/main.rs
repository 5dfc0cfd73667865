use clap::{Parser, Subcommand};
use glyphfield::colors::{preset_names, theme_by_name};
use glyphfield::config::{CellSize, DisplayConfig, PrintConfig};
use glyphfield::patterns::{Registry, DEFAULT_PATTERN};
use glyphfield::render::{Renderer, Theme};
use glyphfield::scheduler::DEFAULT_FPS;
use glyphfield::settings::Settings;
use glyphfield::terminal::Terminal;
use glyphfield::{logging, viz};
use std::io;

#[derive(Parser)]
#[command(name = "glyphfield")]
#[command(version)]
#[command(about = "Ambient full-screen character patterns, with microphone-reactive Voice modes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write a debug log to /tmp/glyphfield.log
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full-screen display
    Show {
        /// Pattern to start on (name, slug or index)
        #[arg(short = 'P', long)]
        pattern: Option<String>,

        /// Generator runs per second
        #[arg(short, long)]
        fps: Option<u32>,

        /// Pixel size of one character cell, WIDTHxHEIGHT
        #[arg(short, long)]
        cell: Option<CellSize>,

        /// Colour theme (lobby, night, matrix, ice, amber, rose, mono, paper, neon, ember)
        #[arg(short, long)]
        theme: Option<String>,

        /// Advance to another pattern every N seconds
        #[arg(long)]
        cycle: Option<f64>,

        /// Pick a random pattern when cycling
        #[arg(long)]
        shuffle: bool,

        /// Random seed for reproducible shuffling
        #[arg(short, long)]
        seed: Option<u64>,

        /// Never open the microphone
        #[arg(long)]
        no_audio: bool,
    },

    /// Print a single frame to stdout
    Print {
        /// Pattern to print (name, slug or index)
        #[arg(short = 'P', long)]
        pattern: Option<String>,

        /// Frame value to generate
        #[arg(short, long, default_value = "0")]
        frame: f64,

        /// Width in characters
        #[arg(long, default_value = "80")]
        cols: u16,

        /// Height in characters
        #[arg(long, default_value = "24")]
        rows: u16,

        /// Colour theme
        #[arg(short, long)]
        theme: Option<String>,

        /// Emit 24-bit ANSI colour through the renderer
        #[arg(long)]
        color: bool,
    },

    /// List available patterns
    List,
}

/// Resolve a pattern query, falling back to the default with a warning
fn resolve_pattern(registry: &Registry, query: Option<&str>) -> usize {
    let Some(query) = query else {
        return DEFAULT_PATTERN;
    };
    registry.find(query).unwrap_or_else(|| {
        eprintln!("Unknown pattern: {}. Using {}.", query, registry.resolve(DEFAULT_PATTERN).map(|p| p.name).unwrap_or("default"));
        eprintln!("Run `glyphfield list` to see the available patterns.");
        DEFAULT_PATTERN
    })
}

/// Named preset with the settings file's custom colours applied on top
fn resolve_theme(settings: &Settings, name: Option<&str>) -> Theme {
    let base = match name {
        Some(name) => theme_by_name(name).unwrap_or_else(|| {
            eprintln!("Unknown theme: {}. Using lobby.", name);
            eprintln!("Available: {}", preset_names().collect::<Vec<_>>().join(", "));
            Theme::default()
        }),
        None => Theme::default(),
    };
    settings.theme_custom.to_override().apply(base)
}

fn build_registry(settings: &Settings) -> io::Result<Registry> {
    let registry = match settings.logo_text.as_deref() {
        Some(text) => Registry::new(text),
        None => Registry::standard(),
    };
    registry
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    Ok(registry)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    // before settings, so a malformed file is reported in the log
    logging::init(cli.debug)?;
    let settings = Settings::load();

    match cli.command {
        Commands::Show {
            pattern,
            fps,
            cell,
            theme,
            cycle,
            shuffle,
            seed,
            no_audio,
        } => {
            let registry = build_registry(&settings)?;

            let default_cell = CellSize::default();
            let cell = cell.unwrap_or(CellSize {
                width: settings.cell_width.filter(|w| *w > 0).unwrap_or(default_cell.width),
                height: settings.cell_height.filter(|h| *h > 0).unwrap_or(default_cell.height),
            });

            let config = DisplayConfig {
                pattern: resolve_pattern(&registry, pattern.as_deref().or(settings.pattern.as_deref())),
                fps: fps.or(settings.fps).unwrap_or(DEFAULT_FPS).clamp(1, 120),
                cell,
                theme: resolve_theme(&settings, theme.as_deref().or(settings.theme.as_deref())),
                cycle: cycle.or(settings.cycle_seconds),
                shuffle: shuffle || settings.shuffle.unwrap_or(false),
                seed,
                audio: !no_audio && settings.audio.unwrap_or(true),
            };
            viz::run(config, registry)?;
        }
        Commands::Print {
            pattern,
            frame,
            cols,
            rows,
            theme,
            color,
        } => {
            let registry = build_registry(&settings)?;
            let config = PrintConfig {
                pattern: resolve_pattern(&registry, pattern.as_deref()),
                frame,
                cols,
                rows,
                cell: CellSize::default(),
                theme: resolve_theme(&settings, theme.as_deref().or(settings.theme.as_deref())),
                color,
            };
            print_frame(&registry, &config)?;
        }
        Commands::List => {
            let registry = build_registry(&settings)?;
            for (i, p) in registry.iter().enumerate() {
                let audio = if p.audio_reactive { "  (audio)" } else { "" };
                println!("{:2}  {:<20} {}{}", i, p.slug, p.name, audio);
            }
        }
    }

    Ok(())
}

fn print_frame(registry: &Registry, config: &PrintConfig) -> io::Result<()> {
    let grid = registry.generate(config.pattern, config.cols as usize, config.rows as usize, config.frame, None);
    if !config.color {
        print!("{}", grid.to_text());
        return Ok(());
    }

    let mut term = Terminal::offscreen(config.cols, config.rows, config.cell.width, config.cell.height);
    let renderer = Renderer::new(config.theme, config.cell.width, config.cell.height);
    renderer.paint(&grid, config.frame, &mut term);
    term.print_to_stdout(true)
}
