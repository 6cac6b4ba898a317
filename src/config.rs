//! Engine configuration: zoom limits, element sizing and minimap geometry.
//!
//! Every field defaults to the values in [`crate::consts`]. Hosts may pass a
//! partial JSON object to [`EngineConfig::from_json`]; missing keys keep their
//! defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::camera::Size;
use crate::consts::{
    FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH, MAX_SCALE, MIN_ELEMENT_SIZE, MIN_SCALE, MINIMAP_FALLBACK_EXTENT,
    MINIMAP_HEIGHT, MINIMAP_MARGIN, MINIMAP_PADDING, MINIMAP_SCALE, MINIMAP_WIDTH, RESIZE_HANDLE_SIZE, ZOOM_STEP,
};
use crate::error::CanvasError;

/// Minimap geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    /// Width in screen pixels.
    pub width: f64,
    /// Height in screen pixels.
    pub height: f64,
    /// World-to-minimap scale factor.
    pub scale: f64,
    /// World-unit padding around the element bounds.
    pub padding: f64,
    /// Half-extent of the bounds used when the canvas is empty.
    pub fallback_extent: f64,
    /// Gap from the bottom-right corner of the viewport, in screen pixels.
    pub margin: f64,
    /// Project the viewport rectangle relative to `bounds.min`, like elements are.
    /// When false the rectangle is `visible_world * scale` with no bounds offset.
    pub viewport_relative_to_bounds: bool,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            width: MINIMAP_WIDTH,
            height: MINIMAP_HEIGHT,
            scale: MINIMAP_SCALE,
            padding: MINIMAP_PADDING,
            fallback_extent: MINIMAP_FALLBACK_EXTENT,
            margin: MINIMAP_MARGIN,
            viewport_relative_to_bounds: false,
        }
    }
}

/// Tunable engine limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    /// Lower bound for width and height applied while resizing.
    pub min_element_size: f64,
    /// Side of the resize handle square, in world units.
    pub resize_handle_size: f64,
    /// Divide drag/resize pointer deltas by the scale so elements track the cursor 1:1.
    /// When false, deltas are applied at screen rate.
    pub scale_corrected_gestures: bool,
    /// Viewport size assumed for element placement before the host reports a layout.
    pub fallback_viewport: Size,
    pub minimap: MinimapConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            min_element_size: MIN_ELEMENT_SIZE,
            resize_handle_size: RESIZE_HANDLE_SIZE,
            scale_corrected_gestures: true,
            fallback_viewport: Size::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT),
            minimap: MinimapConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConfigParse`] for malformed JSON and
    /// [`CanvasError::InvalidConfig`] when a limit is out of range.
    pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(raw).map_err(CanvasError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CanvasError> {
        require_positive("min_scale", self.min_scale)?;
        require_positive("zoom_step", self.zoom_step)?;
        require_positive("min_element_size", self.min_element_size)?;
        require_positive("resize_handle_size", self.resize_handle_size)?;
        require_positive("fallback_viewport.width", self.fallback_viewport.width)?;
        require_positive("fallback_viewport.height", self.fallback_viewport.height)?;
        require_positive("minimap.width", self.minimap.width)?;
        require_positive("minimap.height", self.minimap.height)?;
        require_positive("minimap.scale", self.minimap.scale)?;
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(CanvasError::InvalidConfig {
                field: "max_scale",
                reason: format!("{} is below min_scale {}", self.max_scale, self.min_scale),
            });
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.minimap.padding) || !non_negative(self.minimap.margin) {
            return Err(CanvasError::InvalidConfig {
                field: "minimap",
                reason: "padding and margin must be non-negative".into(),
            });
        }
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), CanvasError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidConfig { field, reason: format!("{value} must be a positive number") })
    }
}
