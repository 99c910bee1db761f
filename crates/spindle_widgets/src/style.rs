//! Per-item visual styling
//!
//! Everything here is a pure function of an item's signed distance from the
//! carousel's fractional focal point. Scale and opacity fall off linearly
//! with floors; stacking order favors items near the focus; the selection
//! blend eases out to zero at a fixed distance threshold.
//!
//! Horizontal placement is not a flat `index * spacing`: each unit step
//! between two slots is weighted by the mean rendered scale of its two
//! endpoints, so visual gaps stay proportionate to on-screen item sizes at
//! every instant of a drag.

/// Scale lost per unit of distance from the focal point
const SCALE_FALLOFF: f32 = 0.2;
/// Minimum rendered scale
const SCALE_FLOOR: f32 = 0.5;
/// Opacity lost per unit of distance
const OPACITY_FALLOFF: f32 = 0.25;
/// Minimum rendered opacity
const OPACITY_FLOOR: f32 = 0.4;
/// Distance beyond which the selected rendition is fully faded out
const BLEND_THRESHOLD: f32 = 0.8;
/// Exponent shaping the blend falloff (concave ease-out)
const BLEND_EXPONENT: f32 = 0.8;
/// Share of the base spacing every step keeps regardless of scale
const SPACING_FLOOR_RATIO: f32 = 0.7;
/// Share of the base spacing modulated by the endpoints' mean scale
const SPACING_SCALE_WEIGHT: f32 = 0.3;

/// The computed visual transform for one item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemVisual {
    /// Horizontal offset from the widget center, in pixels
    pub offset_x: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Stacking order; higher draws on top
    pub z_index: i32,
    /// Crossfade intensity for the selected rendition, `[0, 1]`
    pub selection_blend: f32,
}

/// Rendered scale at a given distance from the focal point
pub fn scale_at(distance: f32) -> f32 {
    (1.0 - distance * SCALE_FALLOFF).max(SCALE_FLOOR)
}

/// Rendered opacity at a given distance from the focal point
pub fn opacity_at(distance: f32) -> f32 {
    (1.0 - distance * OPACITY_FALLOFF).max(OPACITY_FLOOR)
}

/// Stacking order at a given distance from the focal point
pub fn z_index_at(distance: f32) -> i32 {
    (10 - distance.floor() as i32).max(1)
}

/// Selected-rendition crossfade intensity at a given distance
pub fn selection_blend_at(distance: f32) -> f32 {
    if distance > BLEND_THRESHOLD {
        return 0.0;
    }
    (1.0 - distance / BLEND_THRESHOLD).max(0.0).powf(BLEND_EXPONENT)
}

/// Pixel width of the unit step from slot `step` to `step + 1`
///
/// Weighted by the mean scale of the two slots, evaluated against `center`.
pub fn step_spacing(base_spacing: f32, step: f32, center: f32) -> f32 {
    let lower = scale_at((step - center).abs());
    let upper = scale_at((step + 1.0 - center).abs());
    let avg_scale = (lower + upper) * 0.5;
    base_spacing * (SPACING_FLOOR_RATIO + SPACING_SCALE_WEIGHT * avg_scale)
}

/// Signed scale-weighted span from slot `from` to slot `to`
///
/// Accumulates whole unit steps plus a pro-rated fractional tail, all
/// evaluated against `center`. Positive when `to > from`.
pub fn span_between(base_spacing: f32, from: f32, to: f32, center: f32) -> f32 {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };

    let mut total = 0.0;
    let mut pos = lo;
    while pos < hi - 1e-6 {
        let step = pos.floor();
        let segment_end = (step + 1.0).min(hi);
        let fraction = segment_end - pos;
        total += step_spacing(base_spacing, step, center) * fraction;
        pos = segment_end;
    }

    if from <= to {
        total
    } else {
        -total
    }
}

/// Compute the full visual transform for item `index`
///
/// `committed` anchors the placement accumulation; `center` is the fractional
/// focal point the distance styling derives from; `drag_offset` is the live
/// pixel displacement added on top.
pub fn item_visual(
    base_spacing: f32,
    index: usize,
    committed: usize,
    center: f32,
    drag_offset: f32,
) -> ItemVisual {
    let distance = (index as f32 - center).abs();
    let placement = span_between(base_spacing, committed as f32, index as f32, center);

    ItemVisual {
        offset_x: placement + drag_offset,
        scale: scale_at(distance),
        opacity: opacity_at(distance),
        z_index: z_index_at(distance),
        selection_blend: selection_blend_at(distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_opacity_floors() {
        assert_eq!(scale_at(0.0), 1.0);
        assert_eq!(scale_at(1.0), 0.8);
        assert_eq!(scale_at(10.0), 0.5);
        assert_eq!(opacity_at(0.0), 1.0);
        assert_eq!(opacity_at(2.0), 0.5);
        assert_eq!(opacity_at(10.0), 0.4);
    }

    #[test]
    fn test_z_order_prefers_center() {
        assert_eq!(z_index_at(0.0), 10);
        assert_eq!(z_index_at(0.4), 10);
        assert_eq!(z_index_at(1.2), 9);
        assert_eq!(z_index_at(50.0), 1);
    }

    #[test]
    fn test_selection_blend_threshold() {
        assert_eq!(selection_blend_at(0.0), 1.0);
        assert_eq!(selection_blend_at(0.81), 0.0);
        assert_eq!(selection_blend_at(3.0), 0.0);

        // Strictly decreasing inside the threshold
        let near = selection_blend_at(0.1);
        let far = selection_blend_at(0.7);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_spacing_compresses_away_from_center() {
        let center_step = step_spacing(80.0, 0.0, 0.5);
        let edge_step = step_spacing(80.0, 4.0, 0.5);
        assert!(center_step > edge_step);

        // Both endpoints at the scale floor gives the minimum spacing.
        assert!((edge_step - 80.0 * (0.7 + 0.3 * 0.5)).abs() < 1e-4);
        // Spacing never exceeds the full base spacing.
        assert!(center_step <= 80.0);
    }

    #[test]
    fn test_span_is_signed_and_symmetric() {
        let forward = span_between(80.0, 1.0, 4.0, 2.0);
        let backward = span_between(80.0, 4.0, 1.0, 2.0);
        assert!(forward > 0.0);
        assert_eq!(forward, -backward);
        assert_eq!(span_between(80.0, 3.0, 3.0, 2.0), 0.0);
    }

    #[test]
    fn test_span_handles_fractional_endpoints() {
        let whole = span_between(80.0, 0.0, 2.0, 1.0);
        let partial = span_between(80.0, 0.5, 2.0, 1.0);
        assert!(partial < whole);
        assert!(partial > 0.0);

        // A half step costs half of that step's spacing.
        let half = span_between(80.0, 0.0, 0.5, 0.0);
        assert!((half - step_spacing(80.0, 0.0, 0.0) * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_committed_item_sits_at_drag_offset() {
        let visual = item_visual(80.0, 2, 2, 1.4, -37.0);
        assert_eq!(visual.offset_x, -37.0);
    }

    #[test]
    fn test_centered_item_fully_selected() {
        let visual = item_visual(80.0, 2, 2, 2.0, 0.0);
        assert_eq!(visual.scale, 1.0);
        assert_eq!(visual.opacity, 1.0);
        assert_eq!(visual.z_index, 10);
        assert_eq!(visual.selection_blend, 1.0);
    }
}
