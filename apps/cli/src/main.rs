use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use preset_design::{build_preset, color_palette, ConfigStore, Options};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = Cli::parse().run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Parser)]
#[command(
    name = "preset-design",
    about = "Generate CSS custom properties from design tokens and themes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the token and theme preflights.
    Css {
        /// JSON file holding the preset options.
        config: PathBuf,
        /// Write the CSS to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail on invalid colors and unknown token references.
        #[arg(long)]
        strict: bool,
    },
    /// Print the framework theme object as JSON.
    Theme {
        /// JSON file holding the preset options.
        config: PathBuf,
    },
    /// Print the shade palette generated for a color.
    Palette {
        /// Base color literal, e.g. `#646cff`.
        color: String,
        /// Name recorded on the palette.
        #[arg(long, default_value = "color")]
        name: String,
        /// Print the palette as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate colors and token references strictly.
    Check {
        /// JSON file holding the preset options.
        config: PathBuf,
    },
}

impl Cli {
    fn run(self) -> Result<(), Box<dyn Error>> {
        match self.command {
            Command::Css {
                config,
                out,
                strict,
            } => {
                let options = load_options(&config, strict)?;
                let css = build_preset(&options)?.css();
                match out {
                    Some(path) => {
                        write_output(&path, &css)?;
                        info!(path = %path.display(), "wrote preset css");
                    }
                    None => println!("{css}"),
                }
                Ok(())
            }
            Command::Theme { config } => {
                let options = Options {
                    token_to_theme: true,
                    ..load_options(&config, false)?
                };
                let theme = build_preset(&options)?.theme.unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&theme)?);
                Ok(())
            }
            Command::Palette { color, name, json } => {
                let palette = color_palette(&color, &name)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&palette)?);
                } else {
                    for shade in &palette.palettes {
                        println!("{}: {}", shade.number, shade.hexcode);
                    }
                }
                Ok(())
            }
            Command::Check { config } => {
                let options = load_options(&config, true)?;
                build_preset(&options)?;
                println!("{} is valid", config.display());
                Ok(())
            }
        }
    }
}

fn load_options(path: &Path, strict: bool) -> Result<Options, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("config file '{}' not found", path.display()).into());
    }
    let mut user = ConfigStore::new(path).load()?;
    if strict {
        user.strict_colors = Some(true);
    }
    Ok(Options::resolve(user))
}

fn write_output(path: &Path, css: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut contents = css.to_owned();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}
