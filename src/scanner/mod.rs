//! The QR scanning overlay.
//!
//! A [`ScannerOverlay`] is built with a close callback and a scanned callback,
//! then [mounted](ScannerOverlay::mount) on a [`Camera`]. Decoded payloads that
//! start with the configured prefix are handed to the scanned callback, after
//! which the overlay asks to be closed. Only the first such payload counts;
//! everything else is dropped without any visible effect.

pub mod camera;
mod session;

use std::{fmt, rc::Rc};

use tracing::{debug, info, trace};

pub use camera::{
    BarcodeType, Camera, CameraFacing, ChannelCamera, DecodeEvent, DecodeListener, DecodeSender,
    ScannerSettings, Subscription,
};
pub use session::ScanSession;

/// Prefix of terminal connection codes, accepted when no other is configured.
pub const TERMINAL_PREFIX: &str = "happy://terminal?";
/// Prefix of account linking codes.
pub const ACCOUNT_PREFIX: &str = "happy:///account?";

/// What happened to a decode event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The payload matched and both callbacks ran.
    Accepted,
    /// A payload was already accepted during this mount.
    AlreadyScanned,
    /// The payload does not start with the required prefix.
    PrefixMismatch,
}

pub struct ScannerOverlay {
    url_prefix: String,
    settings: ScannerSettings,
    session: ScanSession,
    on_close: Rc<dyn Fn()>,
    on_scanned: Rc<dyn Fn(String)>,
}

impl ScannerOverlay {
    /// A fresh overlay accepting [`TERMINAL_PREFIX`] codes.
    ///
    /// `on_scanned` receives the full matched payload; `on_close` is asked to
    /// dismiss the overlay, either after a scan or when the user cancels.
    pub fn new(on_close: impl Fn() + 'static, on_scanned: impl Fn(String) + 'static) -> Self {
        Self {
            url_prefix: TERMINAL_PREFIX.to_string(),
            settings: ScannerSettings::qr_only(),
            session: ScanSession::new(),
            on_close: Rc::new(on_close),
            on_scanned: Rc::new(on_scanned),
        }
    }

    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    pub fn has_scanned(&self) -> bool {
        self.session.has_scanned()
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Handles one decoded payload.
    ///
    /// The session is marked consumed before either callback runs, so a
    /// decode delivered from inside `on_scanned` is already a no-op.
    pub fn handle_decode(&self, data: &str) -> DecodeOutcome {
        trace!(len = data.len(), "decode event");
        if self.session.has_scanned() {
            debug!("ignoring decode event, code already scanned");
            return DecodeOutcome::AlreadyScanned;
        }
        if !data.starts_with(self.url_prefix.as_str()) {
            debug!(
                len = data.len(),
                "ignoring decode event without required prefix"
            );
            return DecodeOutcome::PrefixMismatch;
        }
        if !self.session.consume() {
            return DecodeOutcome::AlreadyScanned;
        }
        info!(prefix = %self.url_prefix, "accepted scanned code");
        (self.on_scanned)(data.to_string());
        (self.on_close)();
        DecodeOutcome::Accepted
    }

    /// Dismisses the overlay without scanning anything.
    pub fn cancel(&self) {
        debug!("scanner cancelled");
        (self.on_close)();
    }

    /// Attaches the overlay to `camera` until the returned handle is dropped.
    pub fn mount(self, camera: &dyn Camera) -> MountedScanner {
        let overlay = Rc::new(self);
        let listener: Rc<dyn DecodeListener> = Rc::new(OverlayListener(overlay.clone()));
        let subscription = camera.subscribe(overlay.settings.clone(), listener);
        debug!(prefix = %overlay.url_prefix, "scanner mounted");
        MountedScanner {
            overlay,
            subscription: Some(subscription),
        }
    }
}

impl fmt::Debug for ScannerOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScannerOverlay")
            .field("url_prefix", &self.url_prefix)
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

struct OverlayListener(Rc<ScannerOverlay>);

impl DecodeListener for OverlayListener {
    fn on_decode(&self, event: &DecodeEvent) {
        self.0.handle_decode(&event.data);
    }
}

/// A scanner attached to a camera.
///
/// Dropping it (or calling [`unmount`](MountedScanner::unmount)) unsubscribes
/// from the camera; the session is released once the last reference to the
/// overlay goes away.
pub struct MountedScanner {
    overlay: Rc<ScannerOverlay>,
    subscription: Option<Subscription>,
}

impl MountedScanner {
    pub fn overlay(&self) -> &Rc<ScannerOverlay> {
        &self.overlay
    }

    pub fn has_scanned(&self) -> bool {
        self.overlay.has_scanned()
    }

    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("scanner unmounted");
        }
    }
}

impl Drop for MountedScanner {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for MountedScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedScanner")
            .field("overlay", &self.overlay)
            .field("mounted", &self.subscription.is_some())
            .finish()
    }
}
