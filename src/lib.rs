//! # happy-ui
//!
//! Two presentational building blocks of the Happy app shell:
//!
//! - [`scanner`]: a QR scanning overlay. It subscribes to a platform
//!   [`Camera`](scanner::Camera), keeps only payloads that start with a
//!   required prefix, and hands the first one to the caller before asking to
//!   be closed.
//! - [`layout`]: the maximum widths of content and headers for the running
//!   device, computed once per process.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use happy_ui::scanner::{ChannelCamera, DecodeEvent, ScannerOverlay};
//!
//! let camera = ChannelCamera::new();
//! let scanned = Rc::new(RefCell::new(None));
//! let sink = scanned.clone();
//! let mounted = ScannerOverlay::new(|| {}, move |data| *sink.borrow_mut() = Some(data))
//!     .mount(&camera);
//!
//! camera.sender().send(DecodeEvent::qr("http://example.com"));
//! camera.sender().send(DecodeEvent::qr("happy://terminal?abc123"));
//! camera.poll();
//!
//! assert!(mounted.has_scanned());
//! assert_eq!(scanned.borrow().as_deref(), Some("happy://terminal?abc123"));
//! ```
//!
//! The theme, strings and configuration around the overlay live in [`theme`],
//! [`l10n`] and [`config`]. With the `ui` feature, [`view`] renders the overlay
//! with floem.

pub mod config;
pub mod error;
pub mod l10n;
pub mod layout;
pub mod scanner;
pub mod theme;
#[cfg(feature = "ui")]
pub mod view;

pub use error::{Error, Result};
pub use layout::{WidthPolicy, layout};
pub use scanner::{DecodeOutcome, MountedScanner, ScannerOverlay};
