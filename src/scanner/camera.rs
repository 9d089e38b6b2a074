//! The camera capability the scanner subscribes to.
//!
//! Decoding itself happens on the platform side. This module only describes
//! what the scanner asks for ([`ScannerSettings`]), what it receives
//! ([`DecodeEvent`]), and how a subscription is torn down ([`Subscription`]).

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
    sync::mpsc::{self, Receiver, Sender},
};

use tracing::{debug, trace};

/// Barcode symbologies a camera capability may be asked to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarcodeType {
    Qr,
    Aztec,
    DataMatrix,
    Pdf417,
    Ean13,
    Code128,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

/// What the scanner asks of the camera when it subscribes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerSettings {
    pub barcode_types: Vec<BarcodeType>,
    pub facing: CameraFacing,
}

impl ScannerSettings {
    pub fn qr_only() -> Self {
        Self {
            barcode_types: vec![BarcodeType::Qr],
            facing: CameraFacing::Back,
        }
    }

    pub fn accepts(&self, kind: BarcodeType) -> bool {
        self.barcode_types.contains(&kind)
    }
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self::qr_only()
    }
}

/// A payload decoded from a visual code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeEvent {
    pub data: String,
    pub kind: BarcodeType,
}

impl DecodeEvent {
    pub fn qr(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            kind: BarcodeType::Qr,
        }
    }
}

/// Receives decode events for as long as its subscription is alive.
pub trait DecodeListener {
    fn on_decode(&self, event: &DecodeEvent);
}

impl<F: Fn(&DecodeEvent)> DecodeListener for F {
    fn on_decode(&self, event: &DecodeEvent) {
        self(event)
    }
}

/// A platform camera that can be mounted by a scanner.
pub trait Camera {
    /// Starts delivering decode events matching `settings` to `listener`.
    /// Delivery stops when the returned [`Subscription`] is dropped.
    fn subscribe(
        &self,
        settings: ScannerSettings,
        listener: Rc<dyn DecodeListener>,
    ) -> Subscription;
}

/// Keeps a listener attached to a camera. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct Subscriber {
    id: u64,
    settings: ScannerSettings,
    listener: Rc<dyn DecodeListener>,
}

#[derive(Default)]
struct Subscribers {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Subscriber>>,
}

/// Sending half of a [`ChannelCamera`]. It can be moved to the thread that
/// runs the platform decoder.
#[derive(Clone, Debug)]
pub struct DecodeSender(Sender<DecodeEvent>);

impl DecodeSender {
    /// Queues an event for the UI thread. Returns `false` once the camera
    /// itself is gone.
    pub fn send(&self, event: DecodeEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// A camera fed through a channel by a decoder running elsewhere.
///
/// Events are queued by [`DecodeSender::send`] and delivered, one at a time
/// and in order, when the UI thread calls [`ChannelCamera::poll`].
pub struct ChannelCamera {
    rx: Receiver<DecodeEvent>,
    tx: Sender<DecodeEvent>,
    subscribers: Rc<Subscribers>,
}

impl ChannelCamera {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            tx,
            subscribers: Rc::new(Subscribers::default()),
        }
    }

    pub fn sender(&self) -> DecodeSender {
        DecodeSender(self.tx.clone())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.borrow().len()
    }

    /// Delivers every queued event and returns how many were taken off the
    /// channel. Events arriving with no subscriber are dropped.
    pub fn poll(&self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.rx.try_recv() {
            drained += 1;
            self.dispatch(&event);
        }
        drained
    }

    fn dispatch(&self, event: &DecodeEvent) {
        // Snapshot so listeners may unsubscribe while being notified.
        let targets: Vec<Rc<dyn DecodeListener>> = self
            .subscribers
            .entries
            .borrow()
            .iter()
            .filter(|s| s.settings.accepts(event.kind))
            .map(|s| s.listener.clone())
            .collect();
        trace!(kind = ?event.kind, listeners = targets.len(), "dispatching decode event");
        for listener in targets {
            listener.on_decode(event);
        }
    }
}

impl Default for ChannelCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for ChannelCamera {
    fn subscribe(
        &self,
        settings: ScannerSettings,
        listener: Rc<dyn DecodeListener>,
    ) -> Subscription {
        let id = self.subscribers.next_id.get();
        self.subscribers.next_id.set(id + 1);
        debug!(id, ?settings, "camera subscriber added");
        self.subscribers.entries.borrow_mut().push(Subscriber {
            id,
            settings,
            listener,
        });

        let subscribers: Weak<Subscribers> = Rc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers.entries.borrow_mut().retain(|s| s.id != id);
                debug!(id, "camera subscriber removed");
            }
        })
    }
}

impl fmt::Debug for ChannelCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelCamera")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
