// SPDX-License-Identifier: MIT OR Apache-2.0
//! Internal node records and their typed attribute maps.

use crate::kind::NodeKind;
use indexmap::IndexMap;

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Scalar
    Float(f32),
    /// 3-vector
    Float3([f32; 3]),
    /// 4-vector (color with alpha)
    Float4([f32; 4]),
    /// String
    String(String),
    /// Integer
    Int(i32),
}

/// The five typed attribute maps of a node
///
/// A field name lives in at most one map; setting it again replaces the old
/// value wherever it was. Maps keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    floats: IndexMap<String, f32>,
    float3s: IndexMap<String, [f32; 3]>,
    float4s: IndexMap<String, [f32; 4]>,
    strings: IndexMap<String, String>,
    ints: IndexMap<String, i32>,
}

impl AttributeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, moving it to the map matching the value's type
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) {
        let name = name.into();
        self.remove(&name);
        match value {
            AttributeValue::Float(v) => {
                self.floats.insert(name, v);
            }
            AttributeValue::Float3(v) => {
                self.float3s.insert(name, v);
            }
            AttributeValue::Float4(v) => {
                self.float4s.insert(name, v);
            }
            AttributeValue::String(v) => {
                self.strings.insert(name, v);
            }
            AttributeValue::Int(v) => {
                self.ints.insert(name, v);
            }
        }
    }

    /// Set a scalar field
    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.set(name, AttributeValue::Float(value));
    }

    /// Set a 3-vector field
    pub fn set_float3(&mut self, name: impl Into<String>, value: [f32; 3]) {
        self.set(name, AttributeValue::Float3(value));
    }

    /// Set a 4-vector field
    pub fn set_float4(&mut self, name: impl Into<String>, value: [f32; 4]) {
        self.set(name, AttributeValue::Float4(value));
    }

    /// Set a string field
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, AttributeValue::String(value.into()));
    }

    /// Set an integer field
    pub fn set_int(&mut self, name: impl Into<String>, value: i32) {
        self.set(name, AttributeValue::Int(value));
    }

    /// Set a 0/1 integer flag
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.set_int(name, i32::from(value));
    }

    /// Remove a field from whichever map holds it
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        if let Some(v) = self.floats.shift_remove(name) {
            return Some(AttributeValue::Float(v));
        }
        if let Some(v) = self.float3s.shift_remove(name) {
            return Some(AttributeValue::Float3(v));
        }
        if let Some(v) = self.float4s.shift_remove(name) {
            return Some(AttributeValue::Float4(v));
        }
        if let Some(v) = self.strings.shift_remove(name) {
            return Some(AttributeValue::String(v));
        }
        self.ints.shift_remove(name).map(AttributeValue::Int)
    }

    /// Look up a field in any map
    pub fn get(&self, name: &str) -> Option<AttributeValue> {
        self.floats
            .get(name)
            .map(|v| AttributeValue::Float(*v))
            .or_else(|| self.float3s.get(name).map(|v| AttributeValue::Float3(*v)))
            .or_else(|| self.float4s.get(name).map(|v| AttributeValue::Float4(*v)))
            .or_else(|| self.strings.get(name).map(|v| AttributeValue::String(v.clone())))
            .or_else(|| self.ints.get(name).map(|v| AttributeValue::Int(*v)))
    }

    /// Scalar map
    pub fn floats(&self) -> &IndexMap<String, f32> {
        &self.floats
    }

    /// 3-vector map
    pub fn float3s(&self) -> &IndexMap<String, [f32; 3]> {
        &self.float3s
    }

    /// 4-vector map
    pub fn float4s(&self) -> &IndexMap<String, [f32; 4]> {
        &self.float4s
    }

    /// String map
    pub fn strings(&self) -> &IndexMap<String, String> {
        &self.strings
    }

    /// Integer map
    pub fn ints(&self) -> &IndexMap<String, i32> {
        &self.ints
    }

    /// Total number of fields
    pub fn len(&self) -> usize {
        self.floats.len()
            + self.float3s.len()
            + self.float4s.len()
            + self.strings.len()
            + self.ints.len()
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into alternating field/value tokens.
    ///
    /// Map order is scalar, 3-vector, 4-vector, string, integer. Vector
    /// components use four decimals; 4-vectors write only their color part.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.len() * 2);
        for (name, v) in &self.floats {
            tokens.push(name.clone());
            tokens.push(format!("{v:.4}"));
        }
        for (name, [x, y, z]) in &self.float3s {
            tokens.push(name.clone());
            tokens.push(format!("{x:.4},{y:.4},{z:.4}"));
        }
        for (name, [r, g, b, _]) in &self.float4s {
            tokens.push(name.clone());
            tokens.push(format!("{r:.4},{g:.4},{b:.4}"));
        }
        for (name, v) in &self.strings {
            tokens.push(name.clone());
            tokens.push(v.clone());
        }
        for (name, v) in &self.ints {
            tokens.push(name.clone());
            tokens.push(v.to_string());
        }
        tokens
    }
}

/// Integer grid position of a node in the target editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPosition {
    /// Horizontal position
    pub x: i32,
    /// Vertical position, pointing down
    pub y: i32,
}

impl GridPosition {
    /// Convert a host location: floor both axes, then flip y
    pub fn from_host(location: [f32; 2]) -> Self {
        // `as` saturates for out-of-range floats and maps NaN to 0
        let x = location[0].floor() as i32;
        let y = location[1].floor() as i32;
        Self {
            x,
            y: y.saturating_neg(),
        }
    }
}

/// A node translated for the target schema
#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    /// Generated name (`node1`, `node2`, ...)
    pub name: String,
    /// Classification
    pub kind: NodeKind,
    /// Grid position
    pub position: GridPosition,
    /// Typed attributes
    pub attributes: AttributeSet,
}

impl InternalNode {
    /// Create a node without attributes
    pub fn new(name: impl Into<String>, kind: NodeKind, position: GridPosition) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            attributes: AttributeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lives_in_one_map() {
        let mut attrs = AttributeSet::new();
        attrs.set_float("value", 1.0);
        attrs.set_float4("value", [1.0, 0.0, 0.0, 1.0]);

        assert!(attrs.floats().is_empty());
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("value"), Some(AttributeValue::Float4([1.0, 0.0, 0.0, 1.0])));
    }

    #[test]
    fn test_tokens_follow_map_order() {
        let mut attrs = AttributeSet::new();
        attrs.set_int("use_clamp", 0);
        attrs.set_string("type", "add");
        attrs.set_float4("color", [0.8, 0.8, 0.8, 1.0]);
        attrs.set_float3("vector", [0.0, -1.0, 0.5]);
        attrs.set_float("fac", 0.5);
        attrs.set_flag("inside", true);

        assert_eq!(
            attrs.tokens(),
            [
                "fac", "0.5000",
                "vector", "0.0000,-1.0000,0.5000",
                "color", "0.8000,0.8000,0.8000",
                "type", "add",
                "use_clamp", "0",
                "inside", "1",
            ]
        );
    }

    #[test]
    fn test_grid_position_flips_y_after_floor() {
        assert_eq!(GridPosition::from_host([10.7, 20.2]), GridPosition { x: 10, y: -20 });
        assert_eq!(GridPosition::from_host([-0.5, -0.5]), GridPosition { x: -1, y: 1 });
        assert_eq!(GridPosition::from_host([0.0, 0.0]), GridPosition { x: 0, y: 0 });
    }
}
