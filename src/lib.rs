//! Pairs Duel - two-player memory matching in the terminal
//!
//! Game rules, dealing and reveal timing live in [`pairs_core`]. This crate
//! adds the configuration layer and the terminal front end.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **TUI**: frame loop, mouse and keyboard input, header/sidebar/footer
//!
//! # Example
//!
//! ```
//! use pairs_duel::{App, GameConfig};
//! use std::time::{Duration, Instant};
//!
//! let config = GameConfig::default()
//!     .with_overrides(None, None, Some(7), None)
//!     .unwrap();
//! let mut app = App::new(&config).unwrap();
//! app.tick(Instant::now(), Duration::from_millis(16));
//! assert_eq!(app.session().seed(), 7);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigSource, GameConfig};

// Crate-level exports - Terminal front end
pub use tui::{App, Footer, Header, Hit, ScreenLayout, Sidebar, TurnIndicator, format_layout, run_tui};
