// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host node definitions and the node template registry.

use crate::property::{ColorRamp, CurveMapping, ImageRef, PropertyValue};
use crate::socket::{Socket, SocketDirection};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Input nodes (constants, geometry data)
    Input,
    /// Output nodes
    Output,
    /// Shader closures
    Shader,
    /// Procedural and image textures
    Texture,
    /// Color adjustments
    Color,
    /// Vector operations
    Vector,
    /// Type and value converters
    Converter,
}

/// Node template: a host type with its default sockets and properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Host type identifier (e.g. `ShaderNodeMath`)
    pub type_id: String,
    /// Default display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
    /// Default properties
    pub properties: IndexMap<String, PropertyValue>,
}

/// A node instance in the host graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostNode {
    /// Host type identifier
    pub type_id: String,
    /// Node name, unique within its graph
    pub name: String,
    /// Position in the host editor
    #[serde(default)]
    pub location: [f32; 2],
    /// Input sockets
    #[serde(default)]
    pub inputs: Vec<Socket>,
    /// Output sockets
    #[serde(default)]
    pub outputs: Vec<Socket>,
    /// Kind-specific properties
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
}

impl HostNode {
    /// Create an empty node of the given type
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            location: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Create a node from a template
    pub fn from_template(template: &NodeTemplate, name: impl Into<String>) -> Self {
        Self {
            type_id: template.type_id.clone(),
            name: name.into(),
            location: [0.0, 0.0],
            inputs: template.inputs.clone(),
            outputs: template.outputs.clone(),
            properties: template.properties.clone(),
        }
    }

    /// Set the position
    pub fn with_location(mut self, x: f32, y: f32) -> Self {
        self.location = [x, y];
        self
    }

    /// Append an input socket
    pub fn with_input(mut self, socket: Socket) -> Self {
        self.inputs.push(socket);
        self
    }

    /// Append an output socket
    pub fn with_output(mut self, socket: Socket) -> Self {
        self.outputs.push(socket);
        self
    }

    /// Set a property, replacing any previous value
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set a property in place
    pub fn set_property(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.properties.insert(name.into(), value);
    }

    /// Mutable input socket by identifier
    pub fn input_mut(&mut self, identifier: &str) -> Option<&mut Socket> {
        self.inputs.iter_mut().find(|s| s.identifier == identifier)
    }

    /// Mutable output socket by identifier
    pub fn output_mut(&mut self, identifier: &str) -> Option<&mut Socket> {
        self.outputs.iter_mut().find(|s| s.identifier == identifier)
    }

    /// Socket by direction and identifier
    pub fn socket(&self, direction: SocketDirection, identifier: &str) -> Option<&Socket> {
        let sockets = match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        };
        sockets.iter().find(|s| s.identifier == identifier)
    }

    /// Raw property
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Enum property item identifier
    pub fn enum_property(&self, name: &str) -> Option<&str> {
        match self.property(name)? {
            PropertyValue::Enum(item) => Some(item),
            _ => None,
        }
    }

    /// Boolean property
    pub fn bool_property(&self, name: &str) -> Option<bool> {
        match self.property(name)? {
            PropertyValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Integer property
    pub fn int_property(&self, name: &str) -> Option<i32> {
        match self.property(name)? {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float property
    pub fn float_property(&self, name: &str) -> Option<f32> {
        match self.property(name)? {
            PropertyValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Image reference held in the `image` property
    pub fn image(&self) -> Option<&ImageRef> {
        match self.property("image")? {
            PropertyValue::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Curve mapping held in the `mapping` property
    pub fn curves(&self) -> Option<&CurveMapping> {
        match self.property("mapping")? {
            PropertyValue::Curves(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Color ramp held in the `color_ramp` property
    pub fn ramp(&self) -> Option<&ColorRamp> {
        match self.property("color_ramp")? {
            PropertyValue::Ramp(ramp) => Some(ramp),
            _ => None,
        }
    }
}

/// Registry of host node templates
pub struct NodeRegistry {
    /// Registered templates by host type identifier
    templates: IndexMap<String, NodeTemplate>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Register a template
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates.insert(template.type_id.clone(), template);
    }

    /// Get a template by host type identifier
    pub fn get(&self, type_id: &str) -> Option<&NodeTemplate> {
        self.templates.get(type_id)
    }

    /// Get all registered templates
    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }

    /// Get templates by category
    pub fn templates_in_category(
        &self,
        category: NodeCategory,
    ) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values().filter(move |t| t.category == category)
    }

    /// Create a named node from a host type identifier
    pub fn create_node(&self, type_id: &str, name: impl Into<String>) -> Option<HostNode> {
        self.get(type_id).map(|t| HostNode::from_template(t, name))
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
