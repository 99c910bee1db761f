//! Carousel selector widget
//!
//! Composes the gesture physics, the distance styling, and the animation
//! primitives into the caller-facing widget. The carousel consumes pointer
//! events through [`Carousel::handle_event`], advances time through the
//! ticker (or manual [`Carousel::tick`] calls), and exposes a [`frame`]
//! snapshot the host renderer draws from. The widget computes transforms;
//! it never draws.
//!
//! Pointer x coordinates are widget-local with 0 at the widget's horizontal
//! center, matching the item offsets in the emitted frames.
//!
//! [`frame`]: Carousel::frame
//!
//! # Example
//!
//! ```
//! use spindle_widgets::prelude::*;
//!
//! let mut picker = carousel(vec![
//!     item("book", "Reading").on_activate(|| println!("reading session")),
//!     item("coffee", "Coffee"),
//!     item("face", "Face to face"),
//! ]);
//!
//! // Tap the centered item: its activation callback fires.
//! picker.handle_event(&spindle_core::Event::pointer(
//!     spindle_core::events::event_types::POINTER_DOWN, 0.0, 0.0, 0,
//! ));
//! picker.handle_event(&spindle_core::Event::pointer(
//!     spindle_core::events::event_types::POINTER_UP, 0.0, 0.0, 80,
//! ));
//! ```

use std::sync::{Arc, Mutex, Weak};

use spindle_animation::{Easing, Spring, TickId, TickerHandle, Tween};
use spindle_core::events::{event_types, Event};

use crate::icon::{IconAsset, IconSet};
use crate::item::{ActivateFn, CarouselItem};
use crate::physics::{
    CarouselConfig, CarouselPhysics, GestureState, ReleaseOutcome, SettleStyle,
};
use crate::style::{self, ItemVisual};

// ============================================================================
// Settle animation
// ============================================================================

enum SettleDriver {
    Eased(Tween),
    Sprung(Spring),
}

impl SettleDriver {
    fn new(settle: SettleStyle) -> Self {
        match settle {
            SettleStyle::Eased { easing, duration_ms } => {
                SettleDriver::Eased(Tween::new(0.0, 1.0, duration_ms, easing))
            }
            SettleStyle::Spring(config) => {
                let mut spring = Spring::new(config, 0.0);
                spring.set_target(1.0);
                SettleDriver::Sprung(spring)
            }
        }
    }

    fn tick(&mut self, dt: f32) -> bool {
        match self {
            SettleDriver::Eased(tween) => tween.tick(dt),
            SettleDriver::Sprung(spring) => {
                spring.step(dt);
                !spring.is_settled()
            }
        }
    }

    fn progress(&self) -> f32 {
        match self {
            SettleDriver::Eased(tween) => tween.value(),
            SettleDriver::Sprung(spring) => spring.value(),
        }
    }
}

/// Per-item interpolation from the pre-commit visuals to the rest visuals
///
/// This is the post-commit easing: the committer snaps the physics state, and
/// the rendered transforms glide after it.
struct SettleAnimation {
    driver: SettleDriver,
    from: Vec<ItemVisual>,
    to: Vec<ItemVisual>,
}

impl SettleAnimation {
    fn new(settle: SettleStyle, from: Vec<ItemVisual>, to: Vec<ItemVisual>) -> Self {
        Self {
            driver: SettleDriver::new(settle),
            from,
            to,
        }
    }

    fn tick(&mut self, dt: f32) -> bool {
        self.driver.tick(dt)
    }

    fn visual(&self, index: usize) -> ItemVisual {
        let t = self.driver.progress();
        let a = &self.from[index];
        let b = &self.to[index];
        let lerp = |x: f32, y: f32| x + (y - x) * t;

        ItemVisual {
            offset_x: lerp(a.offset_x, b.offset_x),
            scale: lerp(a.scale, b.scale).max(0.0),
            opacity: lerp(a.opacity, b.opacity).clamp(0.0, 1.0),
            // Stacking switches to the destination order immediately
            z_index: b.z_index,
            selection_blend: lerp(a.selection_blend, b.selection_blend).clamp(0.0, 1.0),
        }
    }
}

// ============================================================================
// Frame snapshot
// ============================================================================

/// One renderable item in a frame
#[derive(Clone, Debug)]
pub struct ItemFrame {
    /// The item's slot in the caller's list
    pub index: usize,
    /// Display label
    pub label: String,
    /// Resolved normal/selected assets
    pub icon: IconAsset,
    /// Computed transform
    pub visual: ItemVisual,
    /// False while a drag or coast is in flight; the renderer should not
    /// deliver its own hit events to the item layer then
    pub interactive: bool,
}

/// A full snapshot of the carousel's renderable state
#[derive(Clone, Debug)]
pub struct CarouselFrame {
    /// Whole-widget opacity (the reveal fade)
    pub opacity: f32,
    /// True while any animation (coast, settle, reveal) is running
    pub animating: bool,
    /// Renderable items; entries with unresolved icons are omitted
    pub items: Vec<ItemFrame>,
}

// ============================================================================
// Widget internals
// ============================================================================

struct CarouselInner {
    items: Vec<CarouselItem>,
    /// Resolved per-item assets; `None` marks an item hidden at construction
    icons: Vec<Option<IconAsset>>,
    physics: CarouselPhysics,
    settle: Option<SettleAnimation>,
    reveal_elapsed_ms: f32,
}

impl CarouselInner {
    fn config(&self) -> CarouselConfig {
        *self.physics.config()
    }

    fn pointer_down(&mut self, x: f32, timestamp_ms: u64) {
        // A grab takes over from any in-flight settle; rendering switches to
        // the live drag transforms.
        self.settle = None;
        self.physics.begin_drag(x, timestamp_ms);
    }

    fn pointer_move(&mut self, x: f32, timestamp_ms: u64) {
        self.physics.drag_to(x, timestamp_ms);
    }

    fn pointer_up(&mut self, x: f32) -> Option<ActivateFn> {
        let travel = self.physics.travel();
        let outcome = self.physics.release()?;

        let mut activation = None;
        if outcome == ReleaseOutcome::Snapped && travel <= self.config().tap_slop {
            activation = self.handle_tap(x);
        }
        self.consume_commit();
        activation
    }

    /// Pointer left the widget: end the gesture like a release, never a tap
    fn pointer_cancel(&mut self) {
        if self.physics.release().is_some() {
            self.consume_commit();
        }
    }

    fn handle_tap(&mut self, x: f32) -> Option<ActivateFn> {
        let index = self.item_at(x)?;
        if index == self.physics.current_index() {
            tracing::debug!(index, "carousel: item activated");
            self.items[index].on_activate.clone()
        } else {
            self.physics.recenter(index);
            None
        }
    }

    /// Hit-test a widget-local x against the rendered item boxes
    fn item_at(&self, x: f32) -> Option<usize> {
        let item_size = self.config().item_size;
        let mut best: Option<(usize, f32)> = None;

        for index in 0..self.items.len() {
            if self.icons[index].is_none() {
                continue;
            }
            let visual = self.visual(index);
            let dx = (x - visual.offset_x).abs();
            if dx > item_size * visual.scale * 0.5 {
                continue;
            }
            // Overlapping boxes resolve to the one nearest its own center,
            // which is also the one stacked on top.
            if best.map_or(true, |(_, best_dx)| dx < best_dx) {
                best = Some((index, dx));
            }
        }
        best.map(|(index, _)| index)
    }

    /// The rendered transform for one item right now
    fn visual(&self, index: usize) -> ItemVisual {
        if let Some(settle) = &self.settle {
            return settle.visual(index);
        }
        style::item_visual(
            self.config().base_spacing,
            index,
            self.physics.current_index(),
            self.physics.effective_center(),
            self.physics.drag_offset(),
        )
    }

    /// Turn a finished selection cycle into a settle animation
    fn consume_commit(&mut self) {
        let Some(record) = self.physics.take_commit() else {
            return;
        };
        let config = self.config();
        let len = self.items.len();
        let from_center =
            record.prior_index as f32 - record.prior_offset / config.base_spacing;

        let from: Vec<ItemVisual> = match self.settle.take() {
            // A commit can land mid-settle (tap recentering during the
            // previous glide); start from the currently rendered transforms.
            Some(previous) => (0..len).map(|i| previous.visual(i)).collect(),
            None => {
                if (from_center - record.index as f32).abs() < 1e-3 {
                    // Nothing visibly moved (e.g. an empty drag); no glide.
                    return;
                }
                (0..len)
                    .map(|i| {
                        style::item_visual(
                            config.base_spacing,
                            i,
                            record.prior_index,
                            from_center,
                            record.prior_offset,
                        )
                    })
                    .collect()
            }
        };
        let to: Vec<ItemVisual> = (0..len)
            .map(|i| {
                style::item_visual(config.base_spacing, i, record.index, record.index as f32, 0.0)
            })
            .collect();

        self.settle = Some(SettleAnimation::new(config.settle, from, to));
    }

    fn reveal_opacity(&self) -> f32 {
        let delay = self.config().reveal_delay_ms as f32;
        let fade = self.config().reveal_fade_ms as f32;
        if self.reveal_elapsed_ms < delay {
            return 0.0;
        }
        if fade <= 0.0 {
            return 1.0;
        }
        Easing::EaseOut.apply((self.reveal_elapsed_ms - delay) / fade)
    }

    fn reveal_running(&self) -> bool {
        let config = self.config();
        self.reveal_elapsed_ms < (config.reveal_delay_ms + config.reveal_fade_ms) as f32
    }

    fn is_animating(&self) -> bool {
        self.physics.state() == GestureState::Coasting
            || self.settle.is_some()
            || self.reveal_running()
    }

    fn tick(&mut self, dt: f32) -> bool {
        let mut active = false;

        if self.reveal_running() {
            self.reveal_elapsed_ms += dt * 1000.0;
            active = true;
        }

        if self.physics.tick(dt) {
            active = true;
        }
        // A coast that just finished leaves a commit to pick up.
        self.consume_commit();

        if let Some(mut settle) = self.settle.take() {
            if settle.tick(dt) {
                active = true;
                self.settle = Some(settle);
            }
        }

        active
    }

    fn frame(&self) -> CarouselFrame {
        let interactive = !self.physics.state().is_active();
        let items = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let icon = self.icons[index].clone()?;
                Some(ItemFrame {
                    index,
                    label: item.label.clone(),
                    icon,
                    visual: self.visual(index),
                    interactive,
                })
            })
            .collect();

        CarouselFrame {
            opacity: self.reveal_opacity(),
            animating: self.is_animating(),
            items,
        }
    }
}

// ============================================================================
// Widget
// ============================================================================

/// The carousel selector widget
///
/// Owns its state behind a shared lock so the ticker can advance animations
/// from the frame driver while the host feeds pointer events. Dropping the
/// widget cancels its ticker registration; no callback runs afterwards.
pub struct Carousel {
    inner: Arc<Mutex<CarouselInner>>,
    ticker: Option<(TickerHandle, TickId)>,
}

impl Carousel {
    /// Create a carousel with the default configuration and icon set
    pub fn new(items: Vec<CarouselItem>) -> Self {
        Self::with_icons(items, CarouselConfig::default(), &IconSet::default())
    }

    /// Create a carousel with a custom configuration
    pub fn with_config(items: Vec<CarouselItem>, config: CarouselConfig) -> Self {
        Self::with_icons(items, config, &IconSet::default())
    }

    /// Create a carousel resolving icons against a custom set
    ///
    /// Items whose icon cannot be resolved are logged and hidden; they keep
    /// their slot so the remaining indices are unaffected.
    pub fn with_icons(items: Vec<CarouselItem>, config: CarouselConfig, icons: &IconSet) -> Self {
        let resolved = items
            .iter()
            .map(|item| match icons.resolve(&item.icon) {
                Ok(asset) => Some(asset.clone()),
                Err(err) => {
                    tracing::warn!(label = %item.label, %err, "carousel: hiding item");
                    None
                }
            })
            .collect();

        let physics = CarouselPhysics::new(items.len(), config);
        Self {
            inner: Arc::new(Mutex::new(CarouselInner {
                items,
                icons: resolved,
                physics,
                settle: None,
                reveal_elapsed_ms: 0.0,
            })),
            ticker: None,
        }
    }

    /// Register this carousel's animations with a frame ticker
    ///
    /// The registration holds only a weak reference; dropping the carousel
    /// cancels it.
    pub fn attach(&mut self, ticker: &TickerHandle) {
        if self.ticker.is_some() {
            return;
        }
        let weak: Weak<Mutex<CarouselInner>> = Arc::downgrade(&self.inner);
        if let Some(id) = ticker.register(move |dt| match weak.upgrade() {
            Some(inner) => inner.lock().unwrap().tick(dt),
            None => false,
        }) {
            self.ticker = Some((ticker.clone(), id));
        }
    }

    /// Feed a pointer event through the input adapter
    ///
    /// Coordinates are widget-local with 0 at the horizontal center.
    /// Activation callbacks run after internal state is released, so they
    /// may call back into the carousel.
    pub fn handle_event(&mut self, event: &Event) {
        let activation = {
            let mut inner = self.inner.lock().unwrap();
            match event.event_type {
                event_types::POINTER_DOWN => {
                    if let Some(x) = event.pointer_x() {
                        inner.pointer_down(x, event.timestamp);
                    }
                    None
                }
                event_types::POINTER_MOVE => {
                    if let Some(x) = event.pointer_x() {
                        inner.pointer_move(x, event.timestamp);
                    }
                    None
                }
                event_types::POINTER_UP => {
                    event.pointer_x().and_then(|x| inner.pointer_up(x))
                }
                event_types::POINTER_LEAVE => {
                    inner.pointer_cancel();
                    None
                }
                _ => None,
            }
        };

        if let Some(activation) = activation {
            activation();
        }
    }

    /// Advance animations manually by `dt` seconds
    ///
    /// Hosts without a ticker can drive frames directly. Returns true while
    /// anything is still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.inner.lock().unwrap().tick(dt)
    }

    /// Snapshot the renderable state
    pub fn frame(&self) -> CarouselFrame {
        self.inner.lock().unwrap().frame()
    }

    /// The committed selection
    pub fn current_index(&self) -> usize {
        self.inner.lock().unwrap().physics.current_index()
    }

    /// The current gesture state
    pub fn gesture_state(&self) -> GestureState {
        self.inner.lock().unwrap().physics.state()
    }

    /// Whether any coast, settle, or reveal animation is running
    pub fn is_animating(&self) -> bool {
        self.inner.lock().unwrap().is_animating()
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if let Some((handle, id)) = self.ticker.take() {
            handle.cancel(id);
        }
    }
}

/// Create a carousel with the default configuration
pub fn carousel(items: Vec<CarouselItem>) -> Carousel {
    Carousel::new(items)
}
