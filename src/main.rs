//! Mailform - a terminal email composer with a tag toggle editor.
//!
//! # Usage
//!
//! ```bash
//! SMTP_HOST=smtp.example.com SMTP_USER=me@example.com SMTP_PASS=... mailform
//! mailform --to friend@example.com --font-size 16
//! mailform --dry-run
//! mailform --relay-url http://localhost:4000
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mailform::app::App;
use mailform::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use mailform::form::FontSize;
use mailform::perf;
use mailform::relay::{ConsoleRelay, HttpRelay, Relay, SmtpConfig, SmtpRelay};
use mailform::ui::style::Theme;

/// A terminal email composer with a tag toggle editor
#[derive(Parser, Debug)]
#[command(name = "mailform", version, about, long_about = None)]
struct Cli {
    /// Prefill the recipient address
    #[arg(long, value_name = "EMAIL")]
    to: Option<String>,

    /// Font size applied to the whole message, in px
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u8).range(10..=48))]
    font_size: Option<u8>,

    /// Log submissions instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// SMTP host (overrides SMTP_HOST)
    #[arg(long, value_name = "HOST")]
    smtp_host: Option<String>,

    /// SMTP port (overrides SMTP_PORT)
    #[arg(long, value_name = "PORT")]
    smtp_port: Option<u16>,

    /// Post submissions to a relay service instead of talking SMTP
    #[arg(long, value_name = "URL")]
    relay_url: Option<String>,

    /// Color theme (light, dark or auto-detect)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed frame/event debug lines to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Write tracing output to a file (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            dry_run: self.dry_run,
            perf: self.perf,
            theme: self.theme,
            font_size: self.font_size.and_then(FontSize::new),
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            relay_url: self.relay_url.clone(),
            render_debug_log: self.render_debug_log.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    }
    Ok(())
}

/// Build the relay: the console relay for dry runs, the HTTP relay when a
/// relay URL is set, SMTP otherwise.
///
/// CLI host/port take precedence over `SMTP_HOST`/`SMTP_PORT`.
fn make_relay(flags: &ConfigFlags) -> Result<Box<dyn Relay>> {
    if flags.dry_run {
        return Ok(Box::new(ConsoleRelay));
    }
    if let Some(url) = &flags.relay_url {
        let relay = HttpRelay::new(url).context("Failed to set up the HTTP relay client")?;
        tracing::info!(endpoint = relay.endpoint(), "using HTTP relay");
        return Ok(Box::new(relay));
    }
    let config = SmtpConfig::from_lookup(|key| {
        let overridden = match key {
            "SMTP_HOST" => flags.smtp_host.clone(),
            "SMTP_PORT" => flags.smtp_port.map(|port| port.to_string()),
            _ => None,
        };
        overridden.or_else(|| std::env::var(key).ok())
    })
    .context("SMTP is not configured (set SMTP_HOST, SMTP_USER and SMTP_PASS, or use --dry-run)")?;
    tracing::info!(host = %config.host, port = config.port, "using SMTP relay");
    let relay = SmtpRelay::new(config).context("Failed to set up the SMTP transport")?;
    Ok(Box::new(relay))
}

const OSC_REPLY_TIMEOUT: Duration = Duration::from_millis(75);

// Query the terminal background with OSC 11 on /dev/tty so the answer
// arrives even when stdout is redirected. The tty is opened non-blocking and
// closed before the UI starts reading input.
#[cfg(unix)]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut tty = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NONBLOCK)
        .open("/dev/tty")?;
    tty.write_all(b"\x1b]11;?\x07")?;
    tty.flush()?;

    let reply = read_osc_reply(&mut tty, Instant::now() + OSC_REPLY_TIMEOUT)?;
    Ok(parse_osc11_reply(&String::from_utf8_lossy(&reply)))
}

#[cfg(not(unix))]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    Ok(None)
}

/// Read until a BEL/ST-terminated reply, end of input, or `deadline`.
#[cfg_attr(not(unix), allow(dead_code))]
fn read_osc_reply(reader: &mut impl Read, deadline: Instant) -> std::io::Result<Vec<u8>> {
    let mut buf = [0u8; 256];
    let mut reply = Vec::new();
    while Instant::now() < deadline {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                reply.extend_from_slice(&buf[..n]);
                if reply.contains(&b'\x07') || reply.windows(2).any(|w| w == b"\x1b\\") {
                    break;
                }
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(reply)
}

fn parse_osc11_reply(reply: &str) -> Option<(u8, u8, u8)> {
    // ESC ] 11 ; rgb:RRRR/GGGG/BBBB followed by BEL or ST
    let data = &reply[reply.find("rgb:")? + 4..];
    let mut parts = data.split(['/', '\x07', '\x1b']);
    let mut next = || parts.next().and_then(parse_osc_component);
    Some((next()?, next()?, next()?))
}

fn parse_osc_component(s: &str) -> Option<u8> {
    let hex = s.trim();
    match hex.len() {
        2 => u8::from_str_radix(hex, 16).ok(),
        n if n >= 4 => u16::from_str_radix(&hex[..4], 16)
            .ok()
            .and_then(|v| u8::try_from(v >> 8).ok()),
        _ => None,
    }
}

fn detect_theme() -> Theme {
    let _raw = crossterm::terminal::enable_raw_mode();
    let background = query_terminal_background().ok().flatten();
    let _ = crossterm::terminal::disable_raw_mode();
    match background {
        Some((r, g, b)) => {
            let luma =
                0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
            if luma >= 140.0 {
                Theme::light()
            } else {
                Theme::dark()
            }
        }
        None => Theme::dark(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    perf::set_enabled(effective.perf);
    if let Err(err) = perf::set_debug_log_path(effective.render_debug_log.as_deref()) {
        tracing::warn!(error = %err, "failed to initialize render debug log");
        eprintln!("[warn] Failed to initialize render debug log: {err}");
    }

    let theme = match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => detect_theme(),
        ThemeMode::Light => Theme::light(),
        ThemeMode::Dark => Theme::dark(),
    };

    let relay = make_relay(&effective)?;

    let mut app = App::new(relay)
        .with_recipient(cli.to)
        .with_font_size(effective.font_size.unwrap_or_default())
        .with_theme(theme)
        .with_dry_run(effective.dry_run)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
