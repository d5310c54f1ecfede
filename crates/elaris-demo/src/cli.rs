#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand. `ELARIS_DEMO_*` variables set defaults that explicit
//! flags override; the loop's own `ELARIS_*` variables are read by
//! `AppConfig::from_env`.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Elaris demo

USAGE:
    elaris-demo [OPTIONS]

OPTIONS:
    --fps=N              Target frames per second (default: 30)
    --mouse              Enable mouse capture (click the buttons)
    --no-alt-screen      Draw on the main screen instead of the alternate one
    --log=PATH           Append logs to PATH (filter via ELARIS_LOG)
    --exit-after-ms=N    Quit automatically after N milliseconds
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab      Move focus between buttons
    Enter / Space        Press the focused button
    Esc / Ctrl+C         Quit

ENVIRONMENT VARIABLES:
    ELARIS_DEMO_LOG            Default for --log
    ELARIS_DEMO_EXIT_AFTER_MS  Default for --exit-after-ms";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub fps: Option<u32>,
    pub mouse: bool,
    pub alt_screen: bool,
    pub log_path: Option<String>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fps: None,
            mouse: false,
            alt_screen: true,
            log_path: None,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad flag.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |name| env::var(name).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("elaris-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}\n\n{HELP_TEXT}");
                process::exit(2);
            }
        }
    }

    fn parse_from(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Result<Parsed, String> {
        let mut opts = Self::default();

        if let Some(val) = lookup("ELARIS_DEMO_LOG") {
            opts.log_path = Some(val);
        }
        if let Some(val) = lookup("ELARIS_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--mouse" => opts.mouse = true,
                "--no-alt-screen" => opts.alt_screen = false,
                other => {
                    if let Some(val) = other.strip_prefix("--fps=") {
                        let fps = val.parse().map_err(|_| format!("invalid --fps value: {val}"))?;
                        opts.fps = Some(fps);
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log_path = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("unknown argument: {other}"));
                    }
                }
            }
        }
        Ok(Parsed::Run(opts))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Opts),
    Help,
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Parsed, String> {
        let args: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();
        Opts::parse_from(&args, |_| None)
    }

    #[test]
    fn defaults_without_args() {
        assert_eq!(parse(&[]), Ok(Parsed::Run(Opts::default())));
    }

    #[test]
    fn flags_override_defaults() {
        let Ok(Parsed::Run(opts)) = parse(&["--fps=60", "--mouse", "--no-alt-screen", "--log=x.log"])
        else {
            panic!("expected options");
        };
        assert_eq!(opts.fps, Some(60));
        assert!(opts.mouse);
        assert!(!opts.alt_screen);
        assert_eq!(opts.log_path.as_deref(), Some("x.log"));
    }

    #[test]
    fn env_defaults_yield_to_flags() {
        let args = vec!["--exit-after-ms=5".to_string()];
        let lookup = |name: &str| match name {
            "ELARIS_DEMO_EXIT_AFTER_MS" => Some("900".to_string()),
            "ELARIS_DEMO_LOG" => Some("env.log".to_string()),
            _ => None,
        };
        let Ok(Parsed::Run(opts)) = Opts::parse_from(&args, lookup) else {
            panic!("expected options");
        };
        assert_eq!(opts.exit_after_ms, 5);
        assert_eq!(opts.log_path.as_deref(), Some("env.log"));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse(&["--fps=lots"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert_eq!(parse(&["-h"]), Ok(Parsed::Help));
        assert_eq!(parse(&["--version"]), Ok(Parsed::Version));
    }
}
