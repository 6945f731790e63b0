// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// Declared value type of a socket, as the host reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketType {
    /// Single float
    Value,
    /// Color with alpha
    Rgba,
    /// 3D vector
    Vector,
    /// Shader closure
    Shader,
    /// Integer
    Int,
    /// Boolean
    Boolean,
    /// String
    String,
    /// Any other host socket type
    Custom(String),
}

/// Default value carried by a socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Float
    Float(f32),
    /// Color (RGBA)
    Rgba([f32; 4]),
    /// 3D vector
    Vector([f32; 3]),
    /// Integer
    Int(i32),
    /// Boolean
    Bool(bool),
    /// String
    String(String),
}

impl SocketValue {
    /// Get the socket type this value naturally belongs to
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Float(_) => SocketType::Value,
            Self::Rgba(_) => SocketType::Rgba,
            Self::Vector(_) => SocketType::Vector,
            Self::Int(_) => SocketType::Int,
            Self::Bool(_) => SocketType::Boolean,
            Self::String(_) => SocketType::String,
        }
    }
}

/// A socket on a host node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    /// Stable identifier, unique per node side (e.g. `Value_001`)
    pub identifier: String,
    /// Display label (e.g. `Value`)
    pub name: String,
    /// Declared type
    pub socket_type: SocketType,
    /// Default value, if the socket has one
    #[serde(default)]
    pub default_value: Option<SocketValue>,
}

impl Socket {
    /// Create a socket without a default value.
    ///
    /// The display name starts out equal to the identifier.
    pub fn new(identifier: impl Into<String>, socket_type: SocketType) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
            socket_type,
            default_value: None,
        }
    }

    /// Create a float socket
    pub fn value(identifier: impl Into<String>, default: f32) -> Self {
        Self::new(identifier, SocketType::Value).with_default(SocketValue::Float(default))
    }

    /// Create a color socket
    pub fn rgba(identifier: impl Into<String>, default: [f32; 4]) -> Self {
        Self::new(identifier, SocketType::Rgba).with_default(SocketValue::Rgba(default))
    }

    /// Create a vector socket
    pub fn vector(identifier: impl Into<String>, default: [f32; 3]) -> Self {
        Self::new(identifier, SocketType::Vector).with_default(SocketValue::Vector(default))
    }

    /// Create a shader closure socket
    pub fn shader(identifier: impl Into<String>) -> Self {
        Self::new(identifier, SocketType::Shader)
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Default float, if this is a float socket with a float default
    pub fn default_float(&self) -> Option<f32> {
        match (&self.socket_type, &self.default_value) {
            (SocketType::Value, Some(SocketValue::Float(v))) => Some(*v),
            _ => None,
        }
    }

    /// Default color, if this is a color socket with a color default
    pub fn default_rgba(&self) -> Option<[f32; 4]> {
        match (&self.socket_type, &self.default_value) {
            (SocketType::Rgba, Some(SocketValue::Rgba(v))) => Some(*v),
            _ => None,
        }
    }

    /// Default vector, if this is a vector socket with a vector default
    pub fn default_vector(&self) -> Option<[f32; 3]> {
        match (&self.socket_type, &self.default_value) {
            (SocketType::Vector, Some(SocketValue::Vector(v))) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_defaults_to_identifier() {
        let socket = Socket::value("Value_001", 0.5);
        assert_eq!(socket.name, "Value_001");
        assert_eq!(socket.named("Value").name, "Value");
    }

    #[test]
    fn test_typed_defaults_require_matching_type() {
        let socket =
            Socket::new("Fac", SocketType::Value).with_default(SocketValue::Rgba([1.0; 4]));
        assert_eq!(socket.default_float(), None);
        assert_eq!(socket.default_rgba(), None);

        let socket = Socket::rgba("Color", [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(socket.default_rgba(), Some([0.1, 0.2, 0.3, 1.0]));
        assert_eq!(SocketValue::Vector([0.0; 3]).socket_type(), SocketType::Vector);
    }
}
