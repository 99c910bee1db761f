//! Spindle Widget Library
//!
//! A draggable, inertially scrolling carousel selector for mobile-style UIs.
//!
//! The carousel renders a list of items arranged horizontally around a
//! floating-point focal center. Every item's transform (offset, scale,
//! opacity, stacking order, selection blend) is a pure function of its
//! distance from that center. Dragging pans the set with elastic resistance
//! at the ends; a flick coasts with decaying inertia; every cycle snaps to
//! the nearest item and glides into place.
//!
//! The widget computes transforms and owns gesture state; drawing and event
//! delivery belong to the host:
//!
//! ```ignore
//! use spindle_widgets::prelude::*;
//!
//! let mut picker = carousel(vec![
//!     item("book", "Reading").on_activate(|| start_reading_session()),
//!     item("coffee", "Coffee"),
//! ]);
//!
//! picker.attach(&ticker.handle()); // animations advance with the frame loop
//!
//! // Per host event:
//! picker.handle_event(&event);
//!
//! // Per frame:
//! for item in picker.frame().items {
//!     draw(item.icon, item.visual);
//! }
//! ```

pub mod carousel;
pub mod icon;
pub mod item;
pub mod physics;
pub mod style;

pub use carousel::{carousel, Carousel, CarouselFrame, ItemFrame};
pub use icon::{IconAsset, IconError, IconSet};
pub use item::{item, ActivateFn, CarouselItem};
pub use physics::{
    CarouselConfig, CarouselPhysics, CommitRecord, GestureState, ReleaseOutcome, SettleStyle,
};
pub use style::ItemVisual;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::carousel::{carousel, Carousel, CarouselFrame, ItemFrame};
    pub use crate::icon::IconSet;
    pub use crate::item::{item, CarouselItem};
    pub use crate::physics::{CarouselConfig, GestureState, SettleStyle};
    pub use crate::style::ItemVisual;
}
