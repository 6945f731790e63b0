// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host shader node graph model.
//!
//! This crate describes the node graph the exporter reads from:
//! - Nodes with typed input/output sockets and kind-specific properties
//! - Links between output and input sockets
//! - Structured properties (images, curve mappings, color ramps)
//! - A catalog of common host node templates
//!
//! The exporter never mutates a graph; everything here is plain data that can
//! be built in code or loaded from a scene document.

pub mod catalog;
pub mod graph;
pub mod link;
pub mod node;
pub mod property;
pub mod socket;

pub use catalog::create_shader_registry;
pub use graph::{Graph, GraphError, LinkEndpoints, LinkError};
pub use link::Link;
pub use node::{HostNode, NodeCategory, NodeRegistry, NodeTemplate};
pub use property::{
    ColorRamp, Curve, CurveMapping, CurvePoint, HandleType, ImageRef, PropertyValue, RampElement,
};
pub use socket::{Socket, SocketDirection, SocketType, SocketValue};
