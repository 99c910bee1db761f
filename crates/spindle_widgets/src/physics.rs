//! Carousel gesture physics
//!
//! Owns the committed selection, the transient drag offset, and the gesture
//! state machine (Idle / Dragging / Coasting). Pointer input arrives through
//! `begin_drag` / `drag_to` / `release`; a flick past the velocity threshold
//! hands off to the coasting simulation advanced by `tick`. Every cycle ends
//! in the committer, which rounds the effective center to the nearest valid
//! slot and zeroes the offset in the same step.
//!
//! All horizontal quantities are pixels; the effective center is the
//! committed index minus the drag offset in spacing units. Velocity is
//! sampled in px/ms while dragging and simulated in px/s while coasting.

use spindle_animation::{Easing, SpringConfig};
use spindle_core::events::event_types;
use spindle_core::fsm::StateTransitions;

use crate::style;

// ============================================================================
// Configuration
// ============================================================================

/// How the rendered positions ease into place after a commit
#[derive(Clone, Copy, Debug)]
pub enum SettleStyle {
    /// Fixed-duration eased interpolation
    Eased { easing: Easing, duration_ms: u32 },
    /// Spring-driven interpolation
    Spring(SpringConfig),
}

impl SettleStyle {
    /// The stock settle: 400 ms along a gentle ease-out
    pub fn eased() -> Self {
        SettleStyle::Eased {
            easing: Easing::settle(),
            duration_ms: 400,
        }
    }

    /// Snap into place with no animation
    pub fn instant() -> Self {
        SettleStyle::Eased {
            easing: Easing::Linear,
            duration_ms: 0,
        }
    }
}

impl Default for SettleStyle {
    fn default() -> Self {
        Self::eased()
    }
}

/// Configuration for carousel behavior
#[derive(Clone, Copy, Debug)]
pub struct CarouselConfig {
    /// Nominal pixel distance between adjacent slots
    pub base_spacing: f32,
    /// Item hit-box width/height at scale 1.0
    pub item_size: f32,
    /// Velocity retained per coast tick (0.0-1.0)
    pub friction: f32,
    /// Release velocity that starts a coast instead of snapping (px/ms)
    pub flick_threshold: f32,
    /// Seed velocity below which a coast is skipped entirely (px/ms)
    pub min_coast_velocity: f32,
    /// Coast speed below which the selection commits (px/s)
    pub stop_velocity: f32,
    /// Resistance lost per item-unit of boundary overflow
    pub boundary_falloff: f32,
    /// Minimum resistance; the carousel never becomes fully rigid
    pub boundary_floor: f32,
    /// Extra per-tick velocity multiplier while past the ends
    pub out_of_bounds_brake: f32,
    /// Hard limit on overscroll, in item units
    pub max_overflow: f32,
    /// Pointer travel within which a gesture still counts as a tap (px)
    pub tap_slop: f32,
    /// Post-commit settle animation
    pub settle: SettleStyle,
    /// Delay before the widget starts fading in (ms)
    pub reveal_delay_ms: u32,
    /// Duration of the fade-in once it starts (ms)
    pub reveal_fade_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            base_spacing: 80.0,
            item_size: 80.0,
            friction: 0.95,
            flick_threshold: 0.3,
            min_coast_velocity: 0.1,
            stop_velocity: 10.0,
            boundary_falloff: 0.3,
            boundary_floor: 0.1,
            out_of_bounds_brake: 0.8,
            max_overflow: 1.5,
            tap_slop: 4.0,
            settle: SettleStyle::default(),
            reveal_delay_ms: 0,
            reveal_fade_ms: 500,
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nominal slot spacing
    pub fn base_spacing(mut self, px: f32) -> Self {
        self.base_spacing = px;
        self
    }

    /// Set the item hit-box size
    pub fn item_size(mut self, px: f32) -> Self {
        self.item_size = px;
        self
    }

    /// Set the per-tick friction coefficient (clamped to 0.0-1.0)
    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    /// Set the settle animation style
    pub fn settle(mut self, style: SettleStyle) -> Self {
        self.settle = style;
        self
    }

    /// Delay the widget's fade-in by `ms` milliseconds
    pub fn reveal_delay(mut self, ms: u32) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Set the tap slop radius
    pub fn tap_slop(mut self, px: f32) -> Self {
        self.tap_slop = px;
        self
    }
}

// ============================================================================
// Gesture state machine
// ============================================================================

/// The carousel's gesture state; exactly one holds at any instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    /// At rest, selection committed
    #[default]
    Idle,
    /// Pointer down, tracking horizontal movement
    Dragging,
    /// Post-release inertial movement
    Coasting,
}

impl GestureState {
    /// Whether a drag or coast is in flight
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }
}

/// Internal gesture events (pointer events come from `spindle_core`)
pub mod gesture_events {
    /// Released with enough velocity to coast
    pub const RELEASE_FLICK: u32 = 10000;
    /// Released below the flick threshold; snap immediately
    pub const RELEASE_SNAP: u32 = 10001;
    /// Coast velocity decayed or boundary reached
    pub const COAST_DONE: u32 = 10002;
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use gesture_events::*;

        match (self, event) {
            // A pointer grab starts a drag, stealing from an in-flight coast
            (GestureState::Idle, event_types::POINTER_DOWN) => Some(GestureState::Dragging),
            (GestureState::Coasting, event_types::POINTER_DOWN) => Some(GestureState::Dragging),

            (GestureState::Dragging, RELEASE_SNAP) => Some(GestureState::Idle),
            (GestureState::Dragging, RELEASE_FLICK) => Some(GestureState::Coasting),

            (GestureState::Coasting, COAST_DONE) => Some(GestureState::Idle),

            _ => None,
        }
    }
}

// ============================================================================
// Physics state
// ============================================================================

/// What a pointer release turned into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Committed immediately to the nearest slot
    Snapped,
    /// Inertial coast started
    Coasting,
}

/// A finished selection cycle, consumed by the widget to drive the settle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommitRecord {
    /// Committed index before this cycle ended
    pub prior_index: usize,
    /// Drag offset at the moment of the commit
    pub prior_offset: f32,
    /// Newly committed index
    pub index: usize,
}

/// Gesture physics for one carousel
#[derive(Clone, Debug)]
pub struct CarouselPhysics {
    config: CarouselConfig,
    len: usize,
    current_index: usize,
    drag_offset: f32,
    state: GestureState,
    /// Pointer x that maps to a zero offset for the active drag
    start_x: f32,
    /// Pointer x at pointer-down, for tap-slop tracking
    down_x: f32,
    /// Maximum pointer travel seen during the active drag
    travel: f32,
    /// Rolling velocity estimate while dragging (px/ms)
    velocity: f32,
    last_sample_x: f32,
    last_sample_ms: u64,
    /// Simulated velocity while coasting (px/s)
    coast_velocity: f32,
    pending_commit: Option<CommitRecord>,
}

impl CarouselPhysics {
    pub fn new(len: usize, config: CarouselConfig) -> Self {
        Self {
            config,
            len,
            current_index: 2.min(len.saturating_sub(1)),
            drag_offset: 0.0,
            state: GestureState::Idle,
            start_x: 0.0,
            down_x: 0.0,
            travel: 0.0,
            velocity: 0.0,
            last_sample_x: 0.0,
            last_sample_ms: 0,
            coast_velocity: 0.0,
            pending_commit: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Rolling drag velocity estimate in px/ms
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Simulated coast velocity in px/s
    pub fn coast_velocity(&self) -> f32 {
        self.coast_velocity
    }

    /// Maximum pointer travel of the active (or last) drag
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// The fractional slot currently in visual focus
    pub fn effective_center(&self) -> f32 {
        self.current_index as f32 - self.drag_offset / self.config.base_spacing
    }

    fn max_index(&self) -> f32 {
        self.len.saturating_sub(1) as f32
    }

    // ========================================================================
    // Drag tracking
    // ========================================================================

    /// Pointer down: start tracking a drag
    ///
    /// Steals from an in-flight coast without moving anything; the start
    /// anchor accounts for the current offset so the content does not jump.
    pub fn begin_drag(&mut self, x: f32, timestamp_ms: u64) {
        if !self.state.advance(event_types::POINTER_DOWN) {
            return;
        }
        self.coast_velocity = 0.0;
        self.start_x = x - self.drag_offset;
        self.down_x = x;
        self.travel = 0.0;
        self.velocity = 0.0;
        self.last_sample_x = x;
        self.last_sample_ms = timestamp_ms;
    }

    /// Pointer move: update the offset and the velocity estimate
    pub fn drag_to(&mut self, x: f32, timestamp_ms: u64) {
        if self.state != GestureState::Dragging {
            return;
        }

        let raw = x - self.start_x;
        let damped = raw * self.boundary_resistance(raw);
        self.drag_offset = self.constrain_offset(damped);

        self.travel = self.travel.max((x - self.down_x).abs());

        // Velocity comes from raw pointer movement; resistance does not
        // slow the estimate. A zero elapsed time keeps the prior sample.
        let dt_ms = timestamp_ms.saturating_sub(self.last_sample_ms);
        if dt_ms > 0 {
            self.velocity = (x - self.last_sample_x) / dt_ms as f32;
            self.last_sample_x = x;
            self.last_sample_ms = timestamp_ms;
        }
    }

    /// Pointer up: either snap to the nearest slot or start coasting
    pub fn release(&mut self) -> Option<ReleaseOutcome> {
        if self.state != GestureState::Dragging {
            return None;
        }

        if self.velocity.abs() > self.config.flick_threshold {
            Some(self.start_coast(self.velocity))
        } else {
            self.state.advance(gesture_events::RELEASE_SNAP);
            self.commit();
            Some(ReleaseOutcome::Snapped)
        }
    }

    fn start_coast(&mut self, velocity_px_ms: f32) -> ReleaseOutcome {
        if velocity_px_ms.abs() < self.config.min_coast_velocity {
            self.state.advance(gesture_events::RELEASE_SNAP);
            self.commit();
            return ReleaseOutcome::Snapped;
        }

        self.coast_velocity = velocity_px_ms * 1000.0;
        self.state.advance(gesture_events::RELEASE_FLICK);
        ReleaseOutcome::Coasting
    }

    // ========================================================================
    // Coasting
    // ========================================================================

    /// Advance the coast by `dt` seconds
    ///
    /// Returns true while still coasting; on the terminal tick the selection
    /// commits and the state returns to idle. A no-op outside of coasting,
    /// so a drag that stole the gesture has already made this inert.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != GestureState::Coasting {
            return false;
        }

        let resistance = self.boundary_resistance(self.drag_offset);
        self.coast_velocity *= self.config.friction * resistance;
        self.drag_offset = self.constrain_offset(self.drag_offset + self.coast_velocity * dt);

        let center = self.effective_center();
        let in_bounds = (0.0..=self.max_index()).contains(&center);
        if !in_bounds {
            // Extra brake once visually against the wall
            self.coast_velocity *= self.config.out_of_bounds_brake;
        }

        if self.coast_velocity.abs() > self.config.stop_velocity && in_bounds {
            true
        } else {
            self.state.advance(gesture_events::COAST_DONE);
            self.commit();
            false
        }
    }

    // ========================================================================
    // Boundary behavior
    // ========================================================================

    /// Damping multiplier for a candidate offset
    ///
    /// 1.0 inside the slot range; decays with overflow distance past either
    /// end, floored so the carousel always yields a little.
    pub fn boundary_resistance(&self, candidate_offset: f32) -> f32 {
        let center = self.current_index as f32 - candidate_offset / self.config.base_spacing;
        let overflow = if center < 0.0 {
            -center
        } else if center > self.max_index() {
            center - self.max_index()
        } else {
            return 1.0;
        };

        (1.0 - overflow * self.config.boundary_falloff).max(self.config.boundary_floor)
    }

    /// Hard-limit a candidate offset to the maximum overscroll
    ///
    /// Past the limit the offset pins to the scale-weighted span between the
    /// committed slot and the overflow boundary, keeping the visual
    /// overscroll distance consistent with on-screen spacing.
    pub fn constrain_offset(&self, candidate: f32) -> f32 {
        let base = self.config.base_spacing;
        let center = self.current_index as f32 - candidate / base;
        let low = -self.config.max_overflow;
        let high = self.max_index() + self.config.max_overflow;

        if center < low {
            style::span_between(base, low, self.current_index as f32, low)
        } else if center > high {
            -style::span_between(base, self.current_index as f32, high, high)
        } else {
            candidate
        }
    }

    // ========================================================================
    // Committing
    // ========================================================================

    /// Round the effective center to the nearest valid slot and zero the
    /// offset. The only place the committed index changes.
    fn commit(&mut self) {
        let prior_index = self.current_index;
        let prior_offset = self.drag_offset;

        let nearest = self.effective_center().round();
        let index = nearest.clamp(0.0, self.max_index()) as usize;

        self.current_index = index;
        self.drag_offset = 0.0;
        self.pending_commit = Some(CommitRecord {
            prior_index,
            prior_offset,
            index,
        });
        tracing::debug!(index, prior_index, "carousel: committed selection");
    }

    /// Re-center on a slot directly, bypassing drag and coast
    ///
    /// Used for taps on off-center items; only valid while idle.
    pub fn recenter(&mut self, index: usize) {
        if self.state != GestureState::Idle {
            return;
        }

        let prior_index = self.current_index;
        let index = index.min(self.len.saturating_sub(1));
        self.current_index = index;
        self.drag_offset = 0.0;
        self.pending_commit = Some(CommitRecord {
            prior_index,
            prior_offset: 0.0,
            index,
        });
    }

    /// Consume the most recent commit, if one happened
    pub fn take_commit(&mut self) -> Option<CommitRecord> {
        self.pending_commit.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics(len: usize) -> CarouselPhysics {
        CarouselPhysics::new(len, CarouselConfig::default())
    }

    #[test]
    fn test_default_index_is_safe_middle() {
        assert_eq!(physics(5).current_index(), 2);
        assert_eq!(physics(2).current_index(), 1);
        assert_eq!(physics(1).current_index(), 0);
        assert_eq!(physics(0).current_index(), 0);
    }

    #[test]
    fn test_drag_moves_effective_center() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(-80.0, 16);

        assert_eq!(p.state(), GestureState::Dragging);
        assert_eq!(p.drag_offset(), -80.0);
        assert!((p.effective_center() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_slow_release_snaps_to_nearest_slot() {
        // 5 items, default slot 2; drag left 200px, release at ~0.05 px/ms.
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(-100.0, 100);
        p.drag_to(-200.0, 2000);
        assert!(p.velocity().abs() < 0.3);

        let outcome = p.release().unwrap();
        assert_eq!(outcome, ReleaseOutcome::Snapped);
        assert_eq!(p.current_index(), 4);
        assert_eq!(p.drag_offset(), 0.0);
        assert_eq!(p.state(), GestureState::Idle);
    }

    #[test]
    fn test_flick_coasts_then_commits_in_range() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(-50.0, 50);
        assert!((p.velocity() - (-1.0)).abs() < 1e-5);

        let outcome = p.release().unwrap();
        assert_eq!(outcome, ReleaseOutcome::Coasting);
        assert_eq!(p.state(), GestureState::Coasting);

        let mut ticks = 0;
        while p.tick(1.0 / 60.0) {
            ticks += 1;
            assert!(ticks < 600, "coast must terminate");
        }

        assert_eq!(p.state(), GestureState::Idle);
        assert!(p.current_index() <= 4);
        assert_eq!(p.drag_offset(), 0.0);
    }

    #[test]
    fn test_coast_friction_is_monotonic_in_bounds() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(30.0, 30);
        assert_eq!(p.release(), Some(ReleaseOutcome::Coasting));

        // In bounds, resistance is 1: each tick retains exactly the friction
        // share of the previous velocity.
        let before = p.coast_velocity();
        p.tick(1.0 / 60.0);
        let after = p.coast_velocity();
        assert!((after - before * 0.95).abs() < 1e-3);
        assert!(after.abs() <= before.abs() * 0.95 + 1e-3);
    }

    #[test]
    fn test_out_of_bounds_coast_brakes_and_stops() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        // Strong leftward flick from slot 2 towards the last slot.
        p.drag_to(-120.0, 40);
        assert_eq!(p.release(), Some(ReleaseOutcome::Coasting));

        let mut ticks = 0;
        while p.tick(1.0 / 60.0) {
            ticks += 1;
            assert!(ticks < 600);
        }

        // Crossing the end stops the coast and commits to the last slot.
        assert_eq!(p.current_index(), 4);
        assert_eq!(p.state(), GestureState::Idle);
    }

    #[test]
    fn test_resistance_stays_within_bounds() {
        let p = physics(5);
        // In range: no damping.
        assert_eq!(p.boundary_resistance(0.0), 1.0);
        assert_eq!(p.boundary_resistance(-160.0), 1.0);

        // Past the ends: damped, floored at 0.1.
        for raw in [200.0, 400.0, 1000.0, 10_000.0, -1000.0, -10_000.0] {
            let r = p.boundary_resistance(raw);
            assert!((0.1..=1.0).contains(&r), "resistance {r} out of bounds");
        }
    }

    #[test]
    fn test_hard_clamp_pins_to_weighted_span() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        // A huge rightward drag: even damped, the candidate center shoots
        // past the -1.5 unit limit and must pin to the weighted span.
        p.drag_to(4000.0, 100);

        let pinned = style::span_between(80.0, -1.5, 2.0, -1.5);
        assert!((p.drag_offset() - pinned).abs() < 1e-3);
        // Specifically not the resistance-damped raw value.
        assert!((p.drag_offset() - 400.0).abs() > 1.0);
    }

    #[test]
    fn test_zero_elapsed_sample_keeps_prior_velocity() {
        let mut p = physics(5);
        p.begin_drag(0.0, 100);
        p.drag_to(10.0, 100); // same timestamp: estimate untouched
        assert_eq!(p.velocity(), 0.0);

        p.drag_to(20.0, 105); // measured from the pre-skip anchor
        assert!((p.velocity() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_drag_commits_in_place() {
        let mut p = physics(5);
        p.begin_drag(12.0, 0);
        let outcome = p.release().unwrap();

        assert_eq!(outcome, ReleaseOutcome::Snapped);
        assert_eq!(p.current_index(), 2);
        assert_eq!(p.drag_offset(), 0.0);
        assert_eq!(p.travel(), 0.0);
    }

    #[test]
    fn test_new_drag_steals_coast_without_jumping() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(-50.0, 50);
        p.release();
        p.tick(1.0 / 60.0);
        let offset = p.drag_offset();
        assert!(p.state() == GestureState::Coasting);

        p.begin_drag(200.0, 200);
        assert_eq!(p.state(), GestureState::Dragging);
        assert_eq!(p.drag_offset(), offset);
        assert_eq!(p.coast_velocity(), 0.0);

        // Ticking while dragging must not move anything.
        assert!(!p.tick(1.0 / 60.0));
        assert_eq!(p.drag_offset(), offset);
    }

    #[test]
    fn test_commit_record_reports_prior_state() {
        let mut p = physics(5);
        p.begin_drag(0.0, 0);
        p.drag_to(-100.0, 100);
        p.drag_to(-160.0, 2000);
        p.release();

        let record = p.take_commit().unwrap();
        assert_eq!(record.prior_index, 2);
        assert_eq!(record.prior_offset, -160.0);
        assert_eq!(record.index, 4);
        assert!(p.take_commit().is_none());
    }

    #[test]
    fn test_recenter_clamps_and_records() {
        let mut p = physics(5);
        p.recenter(4);
        assert_eq!(p.current_index(), 4);
        let record = p.take_commit().unwrap();
        assert_eq!(record.prior_index, 2);
        assert_eq!(record.index, 4);

        p.recenter(99);
        assert_eq!(p.current_index(), 4);
    }

    #[test]
    fn test_empty_list_never_panics() {
        let mut p = physics(0);
        p.begin_drag(0.0, 0);
        p.drag_to(-500.0, 50);
        p.release();
        for _ in 0..10 {
            p.tick(1.0 / 60.0);
        }
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.drag_offset(), 0.0);
    }

    #[test]
    fn test_commits_always_land_in_range() {
        // Property sweep: a variety of drags and flicks never commit out of
        // range, and the offset is always zero afterwards.
        for len in [1usize, 2, 3, 5, 8] {
            for drag in [-600.0f32, -90.0, -10.0, 10.0, 90.0, 600.0] {
                let mut p = physics(len);
                p.begin_drag(0.0, 0);
                p.drag_to(drag, 20);
                p.release();
                let mut ticks = 0;
                while p.tick(1.0 / 60.0) {
                    ticks += 1;
                    assert!(ticks < 1000);
                }
                assert!(p.current_index() < len.max(1));
                assert_eq!(p.drag_offset(), 0.0);
                assert_eq!(p.state(), GestureState::Idle);
            }
        }
    }
}
