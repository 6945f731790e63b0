// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph serializer producing the `.shader` token stream.
//!
//! A pass runs in four steps:
//! 1. Name every host node `node1`, `node2`, ... in graph order
//! 2. Translate every node; unknown and incompatible types are set aside
//!    as diagnostics instead of being written
//! 3. Resolve every link between written nodes
//! 4. Join header, node section and connection section into one stream
//!
//! Nothing in a pass fails: anomalies drop the smallest unit (a field, a
//! node or a connection) and the pass carries on.

use crate::attributes::InternalNode;
use crate::connection::{resolve_link, Connection};
use crate::error::ExportError;
use crate::kind::{NodeKind, NodeKindRegistry};
use crate::texture::TextureSlotTable;
use crate::translate::translate_node;
use cyclesmax_shader_graph::Graph;
use indexmap::{IndexMap, IndexSet};
use std::path::Path;

/// Format name, first header token
pub const FORMAT_NAME: &str = "cycles_shader";
/// Format version, second header token
pub const FORMAT_VERSION: u32 = 1;
/// Opens the node section
pub const NODE_SECTION: &str = "section_nodes";
/// Closes each node record
pub const NODE_END: &str = "node_end";
/// Opens the connection section
pub const CONNECTION_SECTION: &str = "section_connections";
/// Token separator; also ends the stream
pub const DELIMITER: &str = "|";

/// Serializes host graphs
#[derive(Debug, Clone, Copy)]
pub struct ShaderSerializer<'a> {
    registry: &'a NodeKindRegistry,
}

impl Default for ShaderSerializer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderSerializer<'static> {
    /// Serializer backed by the global kind registry
    pub fn new() -> Self {
        Self {
            registry: NodeKindRegistry::global(),
        }
    }
}

impl<'a> ShaderSerializer<'a> {
    /// Serializer backed by a specific kind registry
    pub fn with_registry(registry: &'a NodeKindRegistry) -> Self {
        Self { registry }
    }

    /// Serialize one graph.
    ///
    /// Every call starts from a fresh texture slot table, so serializing the
    /// same graph twice gives identical output.
    pub fn serialize(&self, graph: &Graph) -> SerializationResult {
        let mut slots = TextureSlotTable::new();
        let mut nodes = IndexMap::new();
        let mut names = IndexMap::new();
        let mut unsupported_types = IndexSet::new();
        let mut incompatible_types = IndexSet::new();

        for (index, host) in graph.nodes().enumerate() {
            let name = format!("node{}", index + 1);
            let node = translate_node(host, name, self.registry, &mut slots);
            match node.kind {
                NodeKind::Invalid => {
                    unsupported_types.insert(host.type_id.clone());
                }
                NodeKind::Incompatible => {
                    incompatible_types.insert(host.type_id.clone());
                }
                _ => {
                    names.insert(host.name.clone(), node.name.clone());
                    nodes.insert(host.name.clone(), node);
                }
            }
        }

        let mut connections = Vec::with_capacity(graph.link_count());
        for link in graph.links() {
            match resolve_link(graph, link, &names) {
                Some(connection) => connections.push(connection),
                None => tracing::trace!(
                    "Dropped link {}:{} -> {}:{}",
                    link.from_node,
                    link.from_socket,
                    link.to_node,
                    link.to_socket
                ),
            }
        }

        tracing::debug!(
            "Serialized '{}': {} nodes, {} connections, {} texture slots",
            graph.name,
            nodes.len(),
            connections.len(),
            slots.len()
        );

        let stream = emit(nodes.values(), &connections);
        SerializationResult {
            stream,
            nodes,
            connections,
            unsupported_types,
            incompatible_types,
            texture_slots: slots,
        }
    }
}

/// Join all records into the delimited stream, trailing delimiter included
fn emit<'n>(nodes: impl Iterator<Item = &'n InternalNode>, connections: &[Connection]) -> String {
    let mut tokens = vec![
        FORMAT_NAME.to_string(),
        FORMAT_VERSION.to_string(),
        NODE_SECTION.to_string(),
    ];
    for node in nodes {
        tokens.push(node.kind.tag().to_string());
        tokens.push(node.name.clone());
        tokens.push(node.position.x.to_string());
        tokens.push(node.position.y.to_string());
        tokens.extend(node.attributes.tokens());
        tokens.push(NODE_END.to_string());
    }
    tokens.push(CONNECTION_SECTION.to_string());
    for connection in connections {
        tokens.extend([
            connection.source_node.clone(),
            connection.source_socket.clone(),
            connection.dest_node.clone(),
            connection.dest_socket.clone(),
        ]);
    }

    let mut stream = tokens.join(DELIMITER);
    stream.push_str(DELIMITER);
    stream
}

/// Outcome of one serialization pass
#[derive(Debug, Clone)]
pub struct SerializationResult {
    stream: String,
    /// Written nodes keyed by host node name
    pub nodes: IndexMap<String, InternalNode>,
    /// Resolved connections in link order
    pub connections: Vec<Connection>,
    /// Host types with no known kind, first-seen order
    pub unsupported_types: IndexSet<String>,
    /// Host types from a newer host generation, first-seen order
    pub incompatible_types: IndexSet<String>,
    /// Image slots assigned during the pass
    pub texture_slots: TextureSlotTable,
}

impl SerializationResult {
    /// The token stream
    pub fn as_str(&self) -> &str {
        &self.stream
    }

    /// Whether any node was left out
    pub fn has_diagnostics(&self) -> bool {
        !self.unsupported_types.is_empty() || !self.incompatible_types.is_empty()
    }

    /// Write the stream to a file, replacing its contents
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, &self.stream).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Wrote {} bytes to {}", self.stream.len(), path.display());
        Ok(())
    }
}

impl std::fmt::Display for SerializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclesmax_shader_graph::{
        create_shader_registry, HostNode, ImageRef, Link, PropertyValue, SocketValue,
    };

    fn value_to_output() -> Graph {
        let registry = create_shader_registry();
        let mut graph = Graph::default();

        let mut value = registry.create_node("ShaderNodeValue", "Value").unwrap();
        value.output_mut("Value").unwrap().default_value = Some(SocketValue::Float(1.0));
        graph.add_node(value).unwrap();

        let output = registry
            .create_node("ShaderNodeOutputMaterial", "Material Output")
            .unwrap()
            .with_location(300.0, 0.0);
        graph.add_node(output).unwrap();

        graph.add_link(Link::new("Value", "Value", "Material Output", "Displacement"));
        graph
    }

    #[test]
    fn test_value_to_output_stream() {
        let result = ShaderSerializer::new().serialize(&value_to_output());
        assert_eq!(
            result.as_str(),
            "cycles_shader|1|section_nodes\
             |value|node1|0|0|value|1.0000|node_end\
             |out_material|node2|300|0|node_end\
             |section_connections|node1|Value|node2|Displacement|"
        );
        assert!(!result.has_diagnostics());

        let tokens: Vec<_> = result.as_str().split(DELIMITER).collect();
        assert_eq!(tokens.iter().filter(|t| **t == NODE_END).count(), 2);
        assert_eq!(tokens.last(), Some(&""));
    }

    #[test]
    fn test_empty_graph() {
        let result = ShaderSerializer::new().serialize(&Graph::default());
        assert_eq!(result.as_str(), "cycles_shader|1|section_nodes|section_connections|");
        assert!(result.nodes.is_empty());
        assert!(result.texture_slots.is_empty());
    }

    #[test]
    fn test_rejected_nodes_keep_their_index() {
        let mut graph = value_to_output();
        graph.add_node(HostNode::new("ShaderNodeAttribute", "Attribute")).unwrap();
        graph.add_node(HostNode::new("ShaderNodeMix", "Mix")).unwrap();
        graph.add_node(HostNode::new("ShaderNodeMix", "Mix.001")).unwrap();
        graph
            .add_node(create_shader_registry().create_node("ShaderNodeValue", "Value.001").unwrap())
            .unwrap();
        graph.add_link(Link::new("Attribute", "Fac", "Material Output", "Displacement"));

        let result = ShaderSerializer::new().serialize(&graph);

        let kept: Vec<_> = result.nodes.values().map(|n| n.name.as_str()).collect();
        assert_eq!(kept, ["node1", "node2", "node6"]);
        assert_eq!(result.unsupported_types.iter().collect::<Vec<_>>(), ["ShaderNodeAttribute"]);
        assert_eq!(result.incompatible_types.iter().collect::<Vec<_>>(), ["ShaderNodeMix"]);
        assert_eq!(result.connections.len(), 1);
        assert!(!result.as_str().contains("ShaderNodeMix"));
        assert!(result.has_diagnostics());
    }

    #[test]
    fn test_serialization_is_repeatable() {
        let registry = create_shader_registry();
        let mut graph = Graph::default();
        for (name, path) in [("A", Some("//a.png")), ("B", None), ("C", Some("//a.png"))] {
            let mut node = registry.create_node("ShaderNodeTexImage", name).unwrap();
            if let Some(path) = path {
                node.set_property("image", PropertyValue::Image(ImageRef::new(path)));
            }
            graph.add_node(node).unwrap();
        }

        let first = ShaderSerializer::new().serialize(&graph);
        let second = ShaderSerializer::new().serialize(&graph);
        assert_eq!(first.as_str(), second.as_str());
        assert!(first.texture_slots.iter().eq(second.texture_slots.iter()));
        assert_eq!(
            first.as_str(),
            "cycles_shader|1|section_nodes\
             |max_tex|node1|0|0|slot|1|node_end\
             |max_tex|node2|0|0|slot|2|node_end\
             |max_tex|node3|0|0|slot|1|node_end\
             |section_connections|"
        );
    }

    #[test]
    fn test_reused_serializer_sees_graph_edits() {
        let mut graph = value_to_output();
        let serializer = ShaderSerializer::new();
        let before = serializer.serialize(&graph);

        let value = graph.node_mut("Value").unwrap();
        value.location = [40.0, 120.0];
        value.output_mut("Value").unwrap().default_value = Some(SocketValue::Float(0.25));
        let after = serializer.serialize(&graph);

        assert!(before.as_str().contains("|value|node1|0|0|value|1.0000|node_end"));
        assert!(after.as_str().contains("|value|node1|40|-120|value|0.2500|node_end"));
        assert_eq!(after.connections, before.connections);
    }

    #[test]
    fn test_links_into_image_textures_are_kept() {
        let registry = create_shader_registry();
        let mut graph = Graph::default();
        graph
            .add_node(registry.create_node("ShaderNodeTexCoord", "Texture Coordinate").unwrap())
            .unwrap();
        graph
            .add_node(registry.create_node("ShaderNodeTexImage", "Image Texture").unwrap())
            .unwrap();
        graph.add_link(Link::new("Texture Coordinate", "UV", "Image Texture", "Vector"));

        let result = ShaderSerializer::new().serialize(&graph);
        assert_eq!(
            result.connections,
            [Connection {
                source_node: "node1".into(),
                source_socket: "UV".into(),
                dest_node: "node2".into(),
                dest_socket: "Vector".into(),
            }]
        );
    }

    #[test]
    fn test_write_to_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("material.shader");
        let old = "old contents that are longer than the new stream".repeat(10);
        std::fs::write(&path, old).unwrap();

        let result = ShaderSerializer::new().serialize(&value_to_output());
        result.write_to(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), result.to_string());
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("material.shader");

        let err = ShaderSerializer::new()
            .serialize(&Graph::default())
            .write_to(&path)
            .unwrap_err();
        match err {
            ExportError::Io { path: failed, .. } => assert_eq!(failed, path),
        }
    }

    #[test]
    fn test_custom_registry() {
        let registry = NodeKindRegistry::new();
        let serializer = ShaderSerializer::with_registry(&registry);
        let result = serializer.serialize(&value_to_output());
        assert_eq!(result.nodes.len(), 2);
    }
}
