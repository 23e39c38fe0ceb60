use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3A;
use log::LevelFilter;

use umbra::config::RenderSettings;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parse "x,y,z" into a vector.
fn parse_vec3(s: &str) -> Result<Vec3A, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("'{}': {}", p.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3A::new(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated numbers, got {}", parts.len())),
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "umbra")]
#[command(about = "A minimal shadow-casting ray tracer for spherical scenes")]
pub struct Args {
    /// Scene description (TOML); the built-in one-sphere scene is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels [default: 800]
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels [default: 600]
    #[arg(long)]
    pub height: Option<u32>,

    /// Eye position as x,y,z [default: 0,0,0]
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub eye: Option<Vec3A>,

    /// Light position as x,y,z [default: 10,10,10]
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub light: Option<Vec3A>,

    /// Light brightness applied to lit object colors [default: 1.0]
    #[arg(long, short = 'b')]
    pub brightness: Option<f32>,

    /// Number of render threads (0 uses all cores)
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Send image to TEV for real-time visualization
    #[arg(long, help = "Send image to TEV for real-time visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit clamped, .exr for linear f32)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,
}

impl Args {
    /// Render settings given explicitly on the command line.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            eye: self.eye,
            light_position: self.light,
            brightness: self.brightness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_negative_and_spaces() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3A::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn only_explicit_flags_become_settings() {
        let args = Args::parse_from(["umbra", "--width", "64", "--light", "-1,2,3"]);
        let settings = args.settings();
        assert_eq!(settings.width, Some(64));
        assert_eq!(settings.height, None);
        assert_eq!(settings.light_position, Some(Vec3A::new(-1.0, 2.0, 3.0)));
        assert_eq!(settings.brightness, None);
        assert_eq!(args.output, PathBuf::from("output.png"));
    }
}
