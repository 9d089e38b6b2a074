//! Width caps for layout containers.
//!
//! The caps depend only on the [`HostEnvironment`]: what class of device this
//! is, whether it runs on the web, and whether it is a desktop-class shell.
//! [`layout`] exposes the caps for the running process, computed once.

use std::{ops::Range, sync::OnceLock};

use serde::Deserialize;
use tracing::{debug, warn};

/// Cap applied to content on tablets and on the web.
pub const CONTENT_CAP: f64 = 800.0;
/// Cap applied to headers on desktop hosts.
pub const DESKTOP_HEADER_CAP: f64 = 1400.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Phone,
    Tablet,
    /// Desktop-like devices and anything else that is neither.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Ios,
    Android,
    Macos,
    Windows,
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub const fn is_web(self) -> bool {
        matches!(self, Platform::Web)
    }
}

/// Supplies the device class of the running device, if it is known.
pub trait DeviceClassifier {
    fn device_class(&self) -> Option<DeviceClass>;
}

impl DeviceClassifier for DeviceClass {
    fn device_class(&self) -> Option<DeviceClass> {
        Some(*self)
    }
}

/// Logical screen size in the shell's units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn shortest_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Shortest-side breakpoints used to tell phones from tablets.
#[derive(Clone, Debug)]
pub struct Breakpoints {
    phone: Range<f64>,
    tablet: Range<f64>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(576.0, 992.0)
    }
}

impl Breakpoints {
    /// Phones below `tablet_from`, tablets below `other_from`, anything wider
    /// is [`DeviceClass::Other`].
    pub fn new(tablet_from: f64, other_from: f64) -> Self {
        Self {
            phone: 0.0..tablet_from,
            tablet: tablet_from..other_from,
        }
    }

    pub fn classify(&self, size: ScreenSize) -> Option<DeviceClass> {
        let side = size.shortest_side();
        if !side.is_finite() || side < 0.0 {
            return None;
        }
        if self.phone.contains(&side) {
            Some(DeviceClass::Phone)
        } else if self.tablet.contains(&side) {
            Some(DeviceClass::Tablet)
        } else {
            Some(DeviceClass::Other)
        }
    }
}

/// Classifies the device from its screen size.
#[derive(Clone, Debug)]
pub struct ScreenClassifier {
    pub size: ScreenSize,
    pub breakpoints: Breakpoints,
}

impl ScreenClassifier {
    pub fn new(size: ScreenSize) -> Self {
        Self {
            size,
            breakpoints: Breakpoints::default(),
        }
    }
}

impl DeviceClassifier for ScreenClassifier {
    fn device_class(&self) -> Option<DeviceClass> {
        self.breakpoints.classify(self.size)
    }
}

/// Everything the width caps depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostEnvironment {
    pub device_class: Option<DeviceClass>,
    pub platform: Platform,
    /// Running as a desktop-class application shell.
    pub desktop_host: bool,
}

impl HostEnvironment {
    /// What can be told about the host without asking the shell. The device
    /// class stays unknown until a classifier provides it.
    pub fn detect() -> Self {
        let platform = Platform::current();
        Self {
            device_class: None,
            platform,
            desktop_host: matches!(platform, Platform::Macos),
        }
    }

    pub fn with_classifier(mut self, classifier: &dyn DeviceClassifier) -> Self {
        self.device_class = classifier.device_class();
        self
    }

    fn is_native_phone(&self) -> bool {
        self.device_class == Some(DeviceClass::Phone) && !self.platform.is_web()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaxWidth {
    /// No cap; the container's own width governs.
    Unbounded,
    Fixed(f64),
}

impl MaxWidth {
    pub fn as_f64(self) -> f64 {
        match self {
            MaxWidth::Unbounded => f64::INFINITY,
            MaxWidth::Fixed(width) => width,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, MaxWidth::Unbounded)
    }
}

pub fn content_max_width(env: &HostEnvironment) -> MaxWidth {
    if env.is_native_phone() || env.desktop_host {
        return MaxWidth::Unbounded;
    }
    MaxWidth::Fixed(CONTENT_CAP)
}

pub fn header_max_width(env: &HostEnvironment) -> MaxWidth {
    if env.is_native_phone() {
        return MaxWidth::Unbounded;
    }
    if env.desktop_host {
        return MaxWidth::Fixed(DESKTOP_HEADER_CAP);
    }
    MaxWidth::Fixed(CONTENT_CAP)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthPolicy {
    pub content_max_width: MaxWidth,
    pub header_max_width: MaxWidth,
}

impl WidthPolicy {
    pub fn for_host(env: &HostEnvironment) -> Self {
        Self {
            content_max_width: content_max_width(env),
            header_max_width: header_max_width(env),
        }
    }
}

static LAYOUT: OnceLock<WidthPolicy> = OnceLock::new();

/// The width caps for this process, computed from [`HostEnvironment::detect`]
/// unless [`init_layout`] ran first.
pub fn layout() -> &'static WidthPolicy {
    LAYOUT.get_or_init(|| compute(&HostEnvironment::detect()))
}

/// Fixes the process-wide caps to those of `env`.
///
/// Only the first computation counts; later calls return the existing value.
pub fn init_layout(env: &HostEnvironment) -> &'static WidthPolicy {
    let mut fresh = false;
    let policy = LAYOUT.get_or_init(|| {
        fresh = true;
        compute(env)
    });
    if !fresh && *policy != WidthPolicy::for_host(env) {
        warn!(
            ?env,
            "layout already computed, keeping the existing width policy"
        );
    }
    policy
}

fn compute(env: &HostEnvironment) -> WidthPolicy {
    let policy = WidthPolicy::for_host(env);
    debug!(?env, ?policy, "computed width policy");
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(
        device_class: Option<DeviceClass>,
        platform: Platform,
        desktop_host: bool,
    ) -> HostEnvironment {
        HostEnvironment {
            device_class,
            platform,
            desktop_host,
        }
    }

    #[test]
    fn native_phone_is_unbounded() {
        let policy = WidthPolicy::for_host(&env(Some(DeviceClass::Phone), Platform::Ios, false));
        assert!(policy.content_max_width.is_unbounded());
        assert!(policy.header_max_width.is_unbounded());
    }

    #[test]
    fn native_phone_wins_over_desktop_host() {
        let policy = WidthPolicy::for_host(&env(Some(DeviceClass::Phone), Platform::Ios, true));
        assert_eq!(policy.content_max_width, MaxWidth::Unbounded);
        assert_eq!(policy.header_max_width, MaxWidth::Unbounded);
    }

    #[test]
    fn web_phone_is_capped() {
        let policy = WidthPolicy::for_host(&env(Some(DeviceClass::Phone), Platform::Web, false));
        assert_eq!(policy.content_max_width, MaxWidth::Fixed(800.0));
        assert_eq!(policy.header_max_width, MaxWidth::Fixed(800.0));
    }

    #[test]
    fn tablet_on_web() {
        let policy = WidthPolicy::for_host(&env(Some(DeviceClass::Tablet), Platform::Web, false));
        assert_eq!(policy.content_max_width, MaxWidth::Fixed(800.0));
        assert_eq!(policy.header_max_width, MaxWidth::Fixed(800.0));
    }

    #[test]
    fn desktop_host_any_class() {
        for class in [None, Some(DeviceClass::Tablet), Some(DeviceClass::Other)] {
            let policy = WidthPolicy::for_host(&env(class, Platform::Macos, true));
            assert!(policy.content_max_width.is_unbounded());
            assert_eq!(policy.header_max_width, MaxWidth::Fixed(1400.0));
        }
    }

    #[test]
    fn unknown_class_uses_the_default_cap() {
        let policy = WidthPolicy::for_host(&env(None, Platform::Android, false));
        assert_eq!(policy.content_max_width, MaxWidth::Fixed(CONTENT_CAP));
        assert_eq!(policy.header_max_width, MaxWidth::Fixed(CONTENT_CAP));
    }

    #[test]
    fn unbounded_as_infinity() {
        assert_eq!(MaxWidth::Unbounded.as_f64(), f64::INFINITY);
        assert_eq!(MaxWidth::Fixed(800.0).as_f64(), 800.0);
    }

    #[test]
    fn breakpoints() {
        let bp = Breakpoints::default();
        let class = |w, h| bp.classify(ScreenSize::new(w, h));
        assert_eq!(class(390.0, 844.0), Some(DeviceClass::Phone));
        assert_eq!(class(1024.0, 768.0), Some(DeviceClass::Tablet));
        assert_eq!(class(576.0, 1000.0), Some(DeviceClass::Tablet));
        assert_eq!(class(1920.0, 1080.0), Some(DeviceClass::Other));
        assert_eq!(class(-1.0, 100.0), None);
    }

    #[test]
    fn custom_breakpoints() {
        let classifier = ScreenClassifier {
            size: ScreenSize::new(700.0, 1000.0),
            breakpoints: Breakpoints::new(720.0, 1100.0),
        };
        assert_eq!(classifier.device_class(), Some(DeviceClass::Phone));

        let bp = Breakpoints::new(720.0, 1100.0);
        let class = |w, h| bp.classify(ScreenSize::new(w, h));
        assert_eq!(class(800.0, 1280.0), Some(DeviceClass::Tablet));
        assert_eq!(class(1200.0, 1920.0), Some(DeviceClass::Other));
    }

    #[test]
    fn classifier_feeds_environment() {
        let env = env(None, Platform::Android, false)
            .with_classifier(&ScreenClassifier::new(ScreenSize::new(360.0, 780.0)));
        assert_eq!(env.device_class, Some(DeviceClass::Phone));
        assert!(WidthPolicy::for_host(&env).content_max_width.is_unbounded());
    }

    #[test]
    fn process_policy_is_computed_once() {
        let phone = env(Some(DeviceClass::Phone), Platform::Android, false);
        let first = init_layout(&phone);
        let second = init_layout(&env(Some(DeviceClass::Tablet), Platform::Web, false));
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, layout()));
    }
}
