//! OLED Control
//!
//! Command-line front end for SSD1306 128×64 panels on a Linux `i2c-dev` bus.
//!
//! # Usage
//!
//! ```bash
//! # Blank the panel
//! oled-ctl clear
//!
//! # Draw the shape demo on a panel at 0x3D on bus 0
//! oled-ctl --device /dev/i2c-0 --address 0x3D shapes
//!
//! # Dim the panel
//! oled-ctl contrast 16
//!
//! # Preview a scene in the terminal without touching hardware
//! oled-ctl preview tile
//!
//! # Show the effective settings as TOML
//! oled-ctl --config oled.toml config
//! ```

mod config;
mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::{debug, info};
use ssd1306_i2c::display::ssd1306::{HEIGHT, WIDTH};
use ssd1306_i2c::{Bitmap, DisplayControl, I2cDevice, PixelBuffer, Ssd1306};
use std::path::PathBuf;

use config::{parse_address, OledConfig};

/// OLED Control
///
/// Drive an SSD1306 OLED panel over I2C
#[derive(Parser)]
#[command(name = "oled-ctl")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Control SSD1306 I2C OLED panels")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// i2c-dev node (default: /dev/i2c-1)
    #[arg(short, long, global = true)]
    device: Option<PathBuf>,

    /// 7-bit slave address, decimal or 0x hex (default: 0x3C)
    #[arg(short, long, global = true, value_parser = parse_address)]
    address: Option<u8>,

    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn every pixel off
    Clear,

    /// Turn every pixel on
    Fill,

    /// Wake the panel
    On,

    /// Put the panel to sleep
    Off,

    /// Invert the panel
    Invert,

    /// Undo invert
    Normal,

    /// Set the contrast
    Contrast {
        /// 0 (dim) to 255 (bright)
        value: u8,
    },

    /// Draw boxes and lines
    Shapes,

    /// Tile a 16x16 sprite across the panel
    Tile,

    /// Render a scene in the terminal instead of on the panel
    Preview {
        /// Scene to render
        #[arg(value_enum)]
        scene: Scene,
    },

    /// Print the effective settings as TOML
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    Shapes,
    Tile,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = resolve_config(&cli)?;
    debug!("settings: {:?}", config);

    match cli.command {
        Commands::Clear => with_panel(&config, |oled| {
            oled.clear();
            oled.display_update()
        }),
        Commands::Fill => with_panel(&config, |oled| {
            oled.fill();
            oled.display_update()
        }),
        Commands::On => with_panel(&config, |oled| oled.display_on()),
        Commands::Off => with_panel(&config, |oled| oled.display_off()),
        Commands::Invert => with_panel(&config, |oled| oled.display_inverse()),
        Commands::Normal => with_panel(&config, |oled| oled.display_normal()),
        Commands::Contrast { value } => {
            with_panel(&config, |oled| oled.display_set_contrast(value))
        }
        Commands::Shapes => with_panel(&config, |oled| {
            demo::draw_shapes(oled);
            oled.display_update()
        }),
        Commands::Tile => with_panel(&config, |oled| {
            demo::draw_tiles(oled, &demo::sprite());
            oled.display_update()
        }),
        Commands::Preview { scene } => {
            preview(scene);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// File settings first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<OledConfig> {
    let mut config = match &cli.config {
        Some(path) => OledConfig::load(path)?,
        None => OledConfig::default(),
    };
    if let Some(device) = &cli.device {
        config = config.with_device(device.clone());
    }
    if let Some(address) = cli.address {
        config = config.with_address(address);
    }
    Ok(config)
}

fn open_panel(config: &OledConfig) -> Result<Ssd1306<I2cDevice>> {
    let mut oled = Ssd1306::open(&config.device, config.address).with_context(|| {
        format!(
            "Failed to open SSD1306 at 0x{:02X} on {}",
            config.address,
            config.device.display()
        )
    })?;

    if let Some(contrast) = config.contrast {
        oled.display_set_contrast(contrast)
            .context("Failed to apply configured contrast")?;
    }
    Ok(oled)
}

/// Open the panel, run `action` against it, report the outcome
fn with_panel<F>(config: &OledConfig, action: F) -> Result<()>
where
    F: FnOnce(&mut Ssd1306<I2cDevice>) -> ssd1306_i2c::Result<()>,
{
    let mut oled = open_panel(config)?;
    action(&mut oled)
        .with_context(|| format!("Command failed on {}", config.device.display()))?;

    info!("{} done", config.device.display());
    Ok(())
}

fn preview(scene: Scene) {
    let mut canvas = Bitmap::new(WIDTH, HEIGHT);
    match scene {
        Scene::Shapes => demo::draw_shapes(&mut canvas),
        Scene::Tile => demo::draw_tiles(&mut canvas, &demo::sprite()),
    }

    let border = format!("+{}+", "-".repeat(canvas.width() as usize));
    println!("{}", border.dimmed());
    for row in demo::render_rows(&canvas, '#', ' ') {
        println!("{}{}{}", "|".dimmed(), row.cyan(), "|".dimmed());
    }
    println!("{}", border.dimmed());
}
