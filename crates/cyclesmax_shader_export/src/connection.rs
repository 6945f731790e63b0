// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolution of host links into connection records.

use crate::translate::normalize_identifier;
use cyclesmax_shader_graph::{Graph, Link, SocketDirection};
use indexmap::IndexMap;

/// A link between two exported nodes, in target naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Internal name of the source node
    pub source_node: String,
    /// Source socket name
    pub source_socket: String,
    /// Internal name of the destination node
    pub dest_node: String,
    /// Destination socket name
    pub dest_socket: String,
}

/// Socket rename: host type, side, normalized identifier, target name
type SocketRename = (&'static str, SocketDirection, &'static str, &'static str);

/// Every renamed socket.
///
/// Nodes with repeated structurally identical sockets address them by
/// position in the target schema. Anything not listed keeps its label.
const SOCKET_RENAMES: &[SocketRename] = &[
    ("ShaderNodeMixShader", SocketDirection::Output, "Shader", "Closure"),
    ("ShaderNodeMixShader", SocketDirection::Input, "Shader", "Closure1"),
    ("ShaderNodeMixShader", SocketDirection::Input, "Shader_001", "Closure2"),
    ("ShaderNodeAddShader", SocketDirection::Output, "Shader", "Closure"),
    ("ShaderNodeAddShader", SocketDirection::Input, "Shader", "Closure1"),
    ("ShaderNodeAddShader", SocketDirection::Input, "Shader_001", "Closure2"),
    ("ShaderNodeMath", SocketDirection::Input, "Value", "Value1"),
    ("ShaderNodeMath", SocketDirection::Input, "Value_001", "Value2"),
    ("ShaderNodeMath", SocketDirection::Input, "Value_002", "Value3"),
    ("ShaderNodeVectorMath", SocketDirection::Input, "Vector", "Vector1"),
    ("ShaderNodeVectorMath", SocketDirection::Input, "Vector_001", "Vector2"),
    ("ShaderNodeVectorMath", SocketDirection::Input, "Vector_002", "Vector3"),
];

/// Target socket name for a socket of a host node type
pub fn socket_name<'a>(
    type_id: &str,
    direction: SocketDirection,
    identifier: &str,
    label: &'a str,
) -> &'a str {
    let identifier = normalize_identifier(identifier);
    SOCKET_RENAMES
        .iter()
        .find(|(host, side, id, _)| *host == type_id && *side == direction && *id == identifier)
        .map_or(label, |(_, _, _, target)| *target)
}

/// Resolve a host link against the exported nodes.
///
/// `names` maps host node names to internal names and holds only the nodes
/// that are written out. Returns `None` for links the host flags invalid,
/// links whose nodes or sockets do not exist, and links touching a node
/// missing from `names`.
pub fn resolve_link(
    graph: &Graph,
    link: &Link,
    names: &IndexMap<String, String>,
) -> Option<Connection> {
    if !link.is_valid {
        return None;
    }
    let source_node = names.get(&link.from_node)?;
    let dest_node = names.get(&link.to_node)?;
    let ends = graph.link_endpoints(link)?;

    Some(Connection {
        source_node: source_node.clone(),
        source_socket: socket_name(
            &ends.from_node.type_id,
            SocketDirection::Output,
            &ends.from_socket.identifier,
            &ends.from_socket.name,
        )
        .to_string(),
        dest_node: dest_node.clone(),
        dest_socket: socket_name(
            &ends.to_node.type_id,
            SocketDirection::Input,
            &ends.to_socket.identifier,
            &ends.to_socket.name,
        )
        .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclesmax_shader_graph::{create_shader_registry, HostNode, Socket};

    fn graph_of(type_ids: &[(&str, &str)]) -> Graph {
        let registry = create_shader_registry();
        let mut graph = Graph::default();
        for (type_id, name) in type_ids {
            graph.add_node(registry.create_node(type_id, *name).unwrap()).unwrap();
        }
        graph
    }

    fn all_names(graph: &Graph) -> IndexMap<String, String> {
        graph
            .nodes()
            .enumerate()
            .map(|(i, node)| (node.name.clone(), format!("node{}", i + 1)))
            .collect()
    }

    #[test]
    fn test_labels_are_default_names() {
        let graph = graph_of(&[("ShaderNodeValue", "Value"), ("ShaderNodeBsdfDiffuse", "Diffuse")]);
        let link = Link::new("Value", "Value", "Diffuse", "Roughness");
        let connection = resolve_link(&graph, &link, &all_names(&graph)).unwrap();
        assert_eq!(
            connection,
            Connection {
                source_node: "node1".into(),
                source_socket: "Value".into(),
                dest_node: "node2".into(),
                dest_socket: "Roughness".into(),
            }
        );
    }

    #[test]
    fn test_math_operands_are_indexed() {
        let graph = graph_of(&[("ShaderNodeValue", "Value"), ("ShaderNodeMath", "Math")]);
        let names = all_names(&graph);

        let first_link = Link::new("Value", "Value", "Math", "Value");
        let second_link = Link::new("Value", "Value", "Math", "Value_001");
        let first = resolve_link(&graph, &first_link, &names).unwrap();
        let second = resolve_link(&graph, &second_link, &names).unwrap();
        assert_eq!(first.dest_socket, "Value1");
        assert_eq!(second.dest_socket, "Value2");

        // The math output keeps its label
        let graph = graph_of(&[("ShaderNodeMath", "Math"), ("ShaderNodeMath", "Math.001")]);
        let link = Link::new("Math", "Value", "Math.001", "Value_002");
        let connection = resolve_link(&graph, &link, &all_names(&graph)).unwrap();
        assert_eq!(connection.source_socket, "Value");
        assert_eq!(connection.dest_socket, "Value3");
    }

    #[test]
    fn test_closure_names() {
        let graph = graph_of(&[
            ("ShaderNodeBsdfDiffuse", "Diffuse"),
            ("ShaderNodeMixShader", "Mix"),
            ("ShaderNodeOutputMaterial", "Output"),
        ]);
        let names = all_names(&graph);

        let link = Link::new("Diffuse", "BSDF", "Mix", "Shader_001");
        let into_mix = resolve_link(&graph, &link, &names).unwrap();
        assert_eq!(into_mix.source_socket, "BSDF");
        assert_eq!(into_mix.dest_socket, "Closure2");

        let link = Link::new("Mix", "Shader", "Output", "Surface");
        let out_of_mix = resolve_link(&graph, &link, &names).unwrap();
        assert_eq!(out_of_mix.source_socket, "Closure");
        assert_eq!(out_of_mix.dest_socket, "Surface");
    }

    #[test]
    fn test_dotted_identifiers_are_renamed() {
        let mut graph = Graph::default();
        graph
            .add_node(
                HostNode::new("ShaderNodeValue", "Value")
                    .with_output(Socket::value("Value", 1.0)),
            )
            .unwrap();
        graph
            .add_node(
                HostNode::new("ShaderNodeVectorMath", "Vector Math")
                    .with_input(Socket::vector("Vector", [0.0; 3]))
                    .with_input(Socket::vector("Vector.001", [0.0; 3]).named("Vector")),
            )
            .unwrap();
        let link = Link::new("Value", "Value", "Vector Math", "Vector.001");
        let connection = resolve_link(&graph, &link, &all_names(&graph)).unwrap();
        assert_eq!(connection.dest_socket, "Vector2");
    }

    #[test]
    fn test_dropped_links() {
        let graph = graph_of(&[("ShaderNodeValue", "Value"), ("ShaderNodeMath", "Math")]);
        let names = all_names(&graph);

        // Host flagged it invalid
        let link = Link::new("Value", "Value", "Math", "Value").invalid();
        assert_eq!(resolve_link(&graph, &link, &names), None);

        // Unknown socket
        let link = Link::new("Value", "Nope", "Math", "Value");
        assert_eq!(resolve_link(&graph, &link, &names), None);

        // Endpoint was not exported
        let mut kept = names.clone();
        kept.shift_remove("Math");
        let link = Link::new("Value", "Value", "Math", "Value");
        assert_eq!(resolve_link(&graph, &link, &kept), None);
    }

    #[test]
    fn test_rename_is_scoped_to_host_type() {
        assert_eq!(
            socket_name("ShaderNodeSeparateXYZ", SocketDirection::Input, "Vector", "Vector"),
            "Vector"
        );
        assert_eq!(
            socket_name("ShaderNodeMath", SocketDirection::Output, "Value", "Value"),
            "Value"
        );
    }
}
