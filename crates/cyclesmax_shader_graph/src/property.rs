// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node properties that live outside the socket list.
//!
//! Enum selectors, flags and numeric settings are stored by property name.
//! Image references, curve mappings and color ramps are structured values.

use serde::{Deserialize, Serialize};

/// Value of a node property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Enum item identifier as the host stores it (e.g. `MULTI_GGX`)
    Enum(String),
    /// Boolean flag
    Bool(bool),
    /// Integer setting
    Int(i32),
    /// Float setting
    Float(f32),
    /// Image datablock reference
    Image(ImageRef),
    /// Per-channel tone curves
    Curves(CurveMapping),
    /// Color ramp stops
    Ramp(ColorRamp),
}

/// Reference to an image used by an image texture node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// File path of the image, if it has been resolved
    #[serde(default)]
    pub filepath: Option<String>,
}

impl ImageRef {
    /// Create a reference to an image on disk
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: Some(filepath.into()),
        }
    }
}

/// Handle kind of a curve control point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleType {
    /// Smooth automatic handle
    #[default]
    Auto,
    /// Automatic handle clamped to avoid overshoot
    AutoClamped,
    /// Straight (vector) handle
    Vector,
}

/// A control point on a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Position in curve space
    pub location: [f32; 2],
    /// Handle kind
    #[serde(default)]
    pub handle_type: HandleType,
}

impl CurvePoint {
    /// Create a point with an automatic handle
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            location: [x, y],
            handle_type: HandleType::Auto,
        }
    }

    /// Set the handle kind
    pub fn with_handle(mut self, handle_type: HandleType) -> Self {
        self.handle_type = handle_type;
        self
    }
}

/// One channel of a curve mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Control points in host order
    pub points: Vec<CurvePoint>,
}

impl Curve {
    /// The identity line from (0, 0) to (1, 1)
    pub fn identity() -> Self {
        Self {
            points: vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)],
        }
    }
}

/// Tone curves of an RGB curves node, in host order: red, green, blue, combined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveMapping {
    /// Channel curves
    pub curves: Vec<Curve>,
}

impl CurveMapping {
    /// Identity mapping with all four channels
    pub fn identity() -> Self {
        Self {
            curves: vec![Curve::identity(); 4],
        }
    }
}

/// A stop on a color ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampElement {
    /// Position along the ramp
    pub position: f32,
    /// Color with alpha
    pub color: [f32; 4],
}

impl RampElement {
    /// Alpha of the stop
    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

/// Color ramp of a color ramp node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Stops in host order
    pub elements: Vec<RampElement>,
}

impl ColorRamp {
    /// Black to white ramp
    pub fn black_to_white() -> Self {
        Self {
            elements: vec![
                RampElement {
                    position: 0.0,
                    color: [0.0, 0.0, 0.0, 1.0],
                },
                RampElement {
                    position: 1.0,
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            ],
        }
    }
}
