//! Transform state: zoom, pan, and filter selection for the current image.
//!
//! Every mutator is total. Out-of-range input is clamped, non-finite input is
//! ignored, and nothing here can fail.
//!
//! # Drag protocol
//!
//! Panning is a two-phase gesture. While a drag is in flight the live
//! offset is `committed + translation`; when it ends the live offset becomes
//! the new committed baseline, so consecutive drags accumulate.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterEffect, FilterKind};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f32 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_SCALE: f32 = 5.0;

/// Increment used by the zoom in/out buttons.
pub const SCALE_STEP: f32 = 0.1;

/// Filter intensity after a reset.
pub const DEFAULT_INTENSITY: f32 = 0.5;

/// A 2D pan offset in view-space units (viewport pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// View parameters applied to the displayed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformState {
    scale: f32,
    offset: Offset,
    committed_offset: Offset,
    filter: FilterKind,
    intensity: f32,
    #[serde(skip)]
    dragging: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Offset::ZERO,
            committed_offset: Offset::ZERO,
            filter: FilterKind::None,
            intensity: DEFAULT_INTENSITY,
            dragging: false,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Live pan offset, including any drag in flight.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Baseline the next drag starts from.
    pub fn committed_offset(&self) -> Offset {
        self.committed_offset
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Stored intensity. Kept even while the filter is `None`.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The filter effect the render pipeline should apply.
    pub fn effect(&self) -> FilterEffect {
        self.filter.effect(self.intensity)
    }

    /// Check if the state equals the post-reset state.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Set the zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Add `delta` to the zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn step_scale(&mut self, delta: f32) {
        self.set_scale(self.scale + delta);
    }

    pub fn zoom_in(&mut self) {
        self.step_scale(SCALE_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.step_scale(-SCALE_STEP);
    }

    /// Start a pan gesture from the committed baseline.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.offset = self.committed_offset;
    }

    /// Move the live offset to `committed + translation`.
    ///
    /// `translation` is the total movement since the drag began, not a
    /// per-event delta. Starts a drag if none is active.
    pub fn update_drag(&mut self, translation: Offset) {
        if !translation.is_finite() {
            return;
        }
        self.dragging = true;
        self.offset = self.committed_offset + translation;
    }

    /// Commit the live offset as the new baseline. No-op without a drag.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.committed_offset = self.offset;
        self.dragging = false;
    }

    /// Restore identity zoom, zero pan, no filter and default intensity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
    }

    /// Set the filter intensity, clamped to `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.intensity = intensity.clamp(0.0, 1.0);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: set_scale always stores the clamped input.
        #[test]
        fn prop_set_scale_is_clamp(s in -100.0f32..100.0) {
            let mut state = TransformState::new();
            state.set_scale(s);
            prop_assert_eq!(state.scale(), s.clamp(MIN_SCALE, MAX_SCALE));
        }

        /// Property: stepping never leaves the allowed range and moves in
        /// the direction of the delta.
        #[test]
        fn prop_step_scale_monotonic(start in 0.1f32..=5.0, delta in -1.0f32..1.0) {
            let mut state = TransformState::new();
            state.set_scale(start);
            let before = state.scale();
            state.step_scale(delta);
            let after = state.scale();
            prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&after));
            if delta >= 0.0 {
                prop_assert!(after >= before);
            } else {
                prop_assert!(after <= before);
            }
        }

        /// Property: the committed offset is the sum of all completed drags.
        #[test]
        fn prop_drags_accumulate(
            drags in prop::collection::vec((-100i32..100, -100i32..100), 0..8),
        ) {
            let mut state = TransformState::new();
            let (mut sum_x, mut sum_y) = (0i32, 0i32);
            for (dx, dy) in drags {
                state.begin_drag();
                state.update_drag(Offset::new(dx as f32, dy as f32));
                state.end_drag();
                sum_x += dx;
                sum_y += dy;
            }
            prop_assert_eq!(state.committed_offset(), Offset::new(sum_x as f32, sum_y as f32));
        }

        /// Property: reset yields the default state from anywhere.
        #[test]
        fn prop_reset_from_any_state(
            scale in -10.0f32..10.0,
            dx in -500.0f32..500.0,
            index in 0u8..5,
            intensity in 0.0f32..=1.0,
        ) {
            let mut state = TransformState::new();
            state.set_scale(scale);
            state.update_drag(Offset::new(dx, -dx));
            state.set_filter(FilterKind::from_index(index));
            state.set_intensity(intensity);
            state.reset();
            prop_assert!(state.is_default());
        }
    }
}
