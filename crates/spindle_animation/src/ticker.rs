//! Frame ticker
//!
//! Drives registered frame callbacks at a steady cadence. Callbacks receive
//! the elapsed time in seconds and return `true` while they still need
//! frames; an idle callback stays registered and is simply cheap to call.
//!
//! Registration goes through a [`TickerHandle`] holding a weak reference, so
//! a dropped ticker turns every handle operation into a no-op, and a widget
//! that cancels its callback (or is dropped) is guaranteed never to be
//! ticked again: cancellation takes effect before the next frame.

use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to a registered frame callback
    pub struct TickId;
}

/// A frame callback: `dt` seconds in, keep-ticking flag out
pub type TickFn = Box<dyn FnMut(f32) -> bool + Send>;

struct TickerInner {
    callbacks: SlotMap<TickId, TickFn>,
    last_frame: Instant,
}

/// The frame driver
///
/// Tick manually from a host event loop, or run `start_background()` to
/// drive frames from a dedicated thread. The background thread stops on
/// `stop_background()` and on drop.
pub struct Ticker {
    inner: Arc<Mutex<TickerInner>>,
    stop_flag: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TickerInner {
                callbacks: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Get a weak handle for registering callbacks
    pub fn handle(&self) -> TickerHandle {
        TickerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all callbacks by the elapsed time since the previous tick
    ///
    /// Returns true if any callback still wants frames.
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        let dt = (now - inner.last_frame).as_secs_f32();
        inner.last_frame = now;

        let mut any_active = false;
        for (_, callback) in inner.callbacks.iter_mut() {
            if callback(dt) {
                any_active = true;
            }
        }
        any_active
    }

    /// Number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.inner.lock().unwrap().callbacks.len()
    }

    /// Start ticking from a background thread at the given frame rate
    pub fn start_background(&mut self, fps: u32) {
        if self.thread_handle.is_some() {
            return;
        }
        tracing::debug!(fps, "ticker: starting background thread");

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        let frame_duration = Duration::from_micros(1_000_000 / fps.max(1) as u64);

        self.thread_handle = Some(thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();
                {
                    let mut inner = inner.lock().unwrap();
                    let now = Instant::now();
                    let dt = (now - inner.last_frame).as_secs_f32();
                    inner.last_frame = now;
                    for (_, callback) in inner.callbacks.iter_mut() {
                        callback(dt);
                    }
                }
                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread, if running
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            tracing::debug!("ticker: background thread stopped");
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop_background();
    }
}

/// A weak handle to the ticker
///
/// Does not keep the ticker alive. All operations no-op once the ticker is
/// dropped.
#[derive(Clone)]
pub struct TickerHandle {
    inner: Weak<Mutex<TickerInner>>,
}

impl TickerHandle {
    /// Register a frame callback, returning its id
    ///
    /// Returns `None` if the ticker has been dropped. Resets the frame clock
    /// so the callback's first `dt` does not include time spent idle.
    pub fn register<F>(&self, callback: F) -> Option<TickId>
    where
        F: FnMut(f32) -> bool + Send + 'static,
    {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock().unwrap();
            guard.last_frame = Instant::now();
            guard.callbacks.insert(Box::new(callback))
        })
    }

    /// Remove a callback; it will not run again after this returns
    pub fn cancel(&self, id: TickId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().callbacks.remove(id);
        }
    }

    /// Whether the ticker is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_callbacks() {
        let ticker = Ticker::new();
        let handle = ticker.handle();

        let count = Arc::new(Mutex::new(0u32));
        let count_clone = Arc::clone(&count);
        handle
            .register(move |_dt| {
                *count_clone.lock().unwrap() += 1;
                true
            })
            .unwrap();

        ticker.tick();
        ticker.tick();
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_cancel_stops_callback() {
        let ticker = Ticker::new();
        let handle = ticker.handle();

        let count = Arc::new(Mutex::new(0u32));
        let count_clone = Arc::clone(&count);
        let id = handle
            .register(move |_dt| {
                *count_clone.lock().unwrap() += 1;
                true
            })
            .unwrap();

        ticker.tick();
        handle.cancel(id);
        ticker.tick();
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(ticker.callback_count(), 0);
    }

    #[test]
    fn test_idle_callback_stays_registered() {
        let ticker = Ticker::new();
        let handle = ticker.handle();
        handle.register(|_dt| false).unwrap();

        assert!(!ticker.tick());
        assert_eq!(ticker.callback_count(), 1);
    }

    #[test]
    fn test_background_thread_ticks_and_stops() {
        let mut ticker = Ticker::new();
        let handle = ticker.handle();

        let count = Arc::new(Mutex::new(0u32));
        let count_clone = Arc::clone(&count);
        handle
            .register(move |_dt| {
                *count_clone.lock().unwrap() += 1;
                true
            })
            .unwrap();

        ticker.start_background(240);
        std::thread::sleep(std::time::Duration::from_millis(50));
        ticker.stop_background();

        let ticked = *count.lock().unwrap();
        assert!(ticked > 0, "background thread should have ticked");

        // No further ticks after stop.
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(*count.lock().unwrap(), ticked);
    }

    #[test]
    fn test_handle_outliving_ticker_is_inert() {
        let handle = {
            let ticker = Ticker::new();
            ticker.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle.register(|_dt| true).is_none());
    }
}
