#![forbid(unsafe_code)]

//! Subscribable widget signals.
//!
//! A [`Signal`] is the notification point a widget exposes for one kind of
//! state change (text edited, cursor moved, focus gained/lost). Observers
//! [`connect`](Signal::connect) a callback and receive a [`SignalHandle`];
//! the connection lives until the handle is disconnected or dropped.
//!
//! Handles are plain owned values, so every subscriber keeps its own set and
//! two console instances cannot clobber each other's connections.
//!
//! Emission snapshots the slot list and invokes callbacks with the lock
//! released, so a callback may connect or disconnect slots on the same
//! signal without deadlocking. Slots added during an emission are not
//! invoked for that emission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// A subscribable event source carrying payloads of type `T`.
///
/// Cloning a `Signal` yields another handle to the same slot list; widgets
/// derive `Clone` and share their signals across threads.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct SignalInner<T> {
    slots: Mutex<Vec<Slot<T>>>,
    next_id: AtomicU64,
}

struct Slot<T> {
    id: u64,
    callback: Arc<dyn Fn(&T) + Send + Sync>,
}

impl<T> Signal<T> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                slots: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Connect a callback. It runs synchronously on the emitting thread for
    /// every [`emit`](Self::emit) until the returned handle disconnects.
    pub fn connect(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SignalHandle
    where
        T: 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut slots = self
                .inner
                .slots
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            slots.push(Slot {
                id,
                callback: Arc::new(callback),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(slot_id = id, "signal slot connected");

        let weak: Weak<SignalInner<T>> = Arc::downgrade(&self.inner);
        SignalHandle {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut slots = inner.slots.lock().unwrap_or_else(|e| e.into_inner());
                    slots.retain(|slot| slot.id != id);
                }
            })),
        }
    }

    /// Invoke every connected callback with `value`.
    pub fn emit(&self, value: &T) {
        let callbacks: Vec<Arc<dyn Fn(&T) + Send + Sync>> = {
            let slots = self
                .inner
                .slots
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            slots.iter().map(|slot| Arc::clone(&slot.callback)).collect()
        };
        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.inner
            .slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .finish()
    }
}

/// An owned connection to a [`Signal`].
///
/// Dropping the handle disconnects the slot. [`disconnect`](Self::disconnect)
/// does the same eagerly and is a no-op on repeat calls or when the signal
/// itself is already gone.
pub struct SignalHandle {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl SignalHandle {
    /// Remove the slot from the signal. Safe to call more than once.
    pub fn disconnect(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Whether this handle still holds its connection.
    pub fn is_connected(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for SignalHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for SignalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalHandle")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AO};

    #[test]
    fn emit_reaches_connected_callback() {
        let signal = Signal::<i32>::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let _handle = signal.connect(move |v| {
            seen_clone.fetch_add(*v as usize, AO::SeqCst);
        });

        signal.emit(&3);
        signal.emit(&4);
        assert_eq!(seen.load(AO::SeqCst), 7);
    }

    #[test]
    fn disconnect_stops_delivery() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let mut handle = signal.connect(move |()| {
            count_clone.fetch_add(1, AO::SeqCst);
        });

        signal.emit(&());
        handle.disconnect();
        signal.emit(&());
        assert_eq!(count.load(AO::SeqCst), 1);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let signal = Signal::<()>::new();
        let mut handle = signal.connect(|()| {});
        handle.disconnect();
        handle.disconnect();
        assert!(!handle.is_connected());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn drop_disconnects() {
        let signal = Signal::<()>::new();
        {
            let _handle = signal.connect(|()| {});
            assert_eq!(signal.connection_count(), 1);
        }
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn disconnect_after_signal_dropped_is_noop() {
        let signal = Signal::<()>::new();
        let mut handle = signal.connect(|()| {});
        drop(signal);
        handle.disconnect();
        assert!(!handle.is_connected());
    }

    #[test]
    fn multiple_slots_all_fire() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));
        let handles: Vec<SignalHandle> = (0..3)
            .map(|_| {
                let count = count.clone();
                signal.connect(move |()| {
                    count.fetch_add(1, AO::SeqCst);
                })
            })
            .collect();

        signal.emit(&());
        assert_eq!(count.load(AO::SeqCst), 3);
        drop(handles);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn callback_may_disconnect_another_slot() {
        let signal = Signal::<()>::new();
        let victim = Arc::new(Mutex::new(None::<SignalHandle>));
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        *victim.lock().unwrap() = Some(signal.connect(move |()| {
            count_clone.fetch_add(1, AO::SeqCst);
        }));

        let victim_clone = victim.clone();
        let _killer = signal.connect(move |()| {
            if let Some(mut handle) = victim_clone.lock().unwrap().take() {
                handle.disconnect();
            }
        });

        // Both slots were connected for this emission; the snapshot means the
        // victim still fires once even though the killer runs first or second.
        signal.emit(&());
        signal.emit(&());
        assert_eq!(count.load(AO::SeqCst), 1);
    }

    #[test]
    fn clone_shares_slot_list() {
        let signal = Signal::<()>::new();
        let twin = signal.clone();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let _handle = twin.connect(move |()| {
            count_clone.fetch_add(1, AO::SeqCst);
        });

        signal.emit(&());
        assert_eq!(count.load(AO::SeqCst), 1);
    }

    #[test]
    fn signal_is_send_across_threads() {
        let signal = Signal::<u32>::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let _handle = signal.connect(move |v| {
            count_clone.fetch_add(*v as usize, AO::SeqCst);
        });

        let twin = signal.clone();
        let t = std::thread::spawn(move || twin.emit(&5));
        t.join().unwrap();
        assert_eq!(count.load(AO::SeqCst), 5);
    }
}
