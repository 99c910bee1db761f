//! Spindle Animation System
//!
//! Time-based animation primitives for the carousel widgets:
//!
//! - **Easing**: standard curves plus arbitrary cubic beziers
//! - **Springs**: RK4-integrated spring physics with preset configurations
//! - **Tweens**: finite, eased interpolation between two values
//! - **Ticker**: a cancellable frame driver with weak registration handles
//!
//! Animations are plain values advanced by `tick`/`step` calls; the ticker is
//! the only component that touches wall-clock time, so everything else stays
//! deterministic under test.

pub mod easing;
pub mod spring;
pub mod ticker;
pub mod tween;

pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use ticker::{TickId, Ticker, TickerHandle};
pub use tween::Tween;
