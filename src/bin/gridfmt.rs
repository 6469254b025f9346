//! Formats values from the command line.
//!
//! ```text
//! gridfmt '[>0][Green]#,##0.00;[Red](#,##0.00)' 1234.5 -42 abc
//! gridfmt --json --theme dark '[Bold]0%' 0.25
//! gridfmt --width 12 '#,##0.00' 1234.5 -42
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gridformat::{
    render_ansi, render_ansi_aligned, CompiledFormat, StyleMap, ThemeChoice, Value,
};
use log::debug;

#[derive(Debug, Parser)]
#[command(name = "gridfmt", version, about = "Format values with Excel-style format strings")]
struct Cli {
    /// The format string, e.g. '#,##0.00;[Red](#,##0.00)'
    format: String,

    /// Values to format; numeric text is treated as a number, `null` as empty
    #[arg(required = true, allow_hyphen_values = true)]
    values: Vec<String>,

    /// Color theme: auto, light or dark
    #[arg(long, default_value = "auto")]
    theme: ThemeChoice,

    /// Print one JSON object per value instead of styled text
    #[arg(long)]
    json: bool,

    /// Pad each cell to this many display columns, honoring text-align
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Base style as a JSON object, e.g. '{"font-size":"12px"}'
    #[arg(long, value_name = "JSON")]
    base_style: Option<String>,
}

fn parse_value(raw: &str) -> Value<'_> {
    if raw == "null" {
        return Value::Null;
    }
    match raw.trim().parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(raw),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base: StyleMap = match &cli.base_style {
        Some(json) => serde_json::from_str(json).context("--base-style must be a JSON object")?,
        None => StyleMap::new(),
    };
    let mode = cli.theme.resolve();
    debug!("formatting {} value(s) in {:?} mode", cli.values.len(), mode);

    let format = CompiledFormat::with_base_style(&cli.format, base);
    if let Some(err) = format.error() {
        eprintln!("warning: {}", err);
    }

    for raw in &cli.values {
        let value = parse_value(raw);
        if cli.json {
            let line = serde_json::json!({
                "value": raw,
                "text": format.format(&value),
                "style": format.style_for_mode(&value, format.base_style(), mode),
            });
            println!("{}", line);
        } else if let Some(width) = cli.width {
            println!("{}", render_ansi_aligned(&format, &value, width, mode));
        } else {
            println!("{}", render_ansi(&format, &value, mode));
        }
    }
    Ok(())
}
