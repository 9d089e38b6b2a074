use floem_reactive::{RwSignal, Scope, SignalGet, SignalUpdate};

/// One-shot state of a mounted scanner.
///
/// The flag lives in its own reactive [`Scope`] so views can observe it, and
/// the scope is disposed together with the session.
pub struct ScanSession {
    scope: Scope,
    has_scanned: RwSignal<bool>,
}

impl ScanSession {
    pub fn new() -> Self {
        let scope = Scope::new();
        let has_scanned = scope.create_rw_signal(false);
        Self { scope, has_scanned }
    }

    pub fn has_scanned(&self) -> bool {
        self.has_scanned.get_untracked()
    }

    /// The reactive flag, for views that render differently once consumed.
    pub fn signal(&self) -> RwSignal<bool> {
        self.has_scanned
    }

    /// Moves the session to the consumed state.
    ///
    /// Returns `false` if it was already consumed; the transition never
    /// reverses.
    pub(crate) fn consume(&self) -> bool {
        if self.has_scanned.get_untracked() {
            return false;
        }
        self.has_scanned.set(true);
        true
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

impl std::fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSession")
            .field("has_scanned", &self.has_scanned())
            .finish()
    }
}
