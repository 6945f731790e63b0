// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing host nodes and links.

use crate::link::Link;
use crate::node::HostNode;
use crate::socket::{Socket, SocketDirection};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A host shader node graph
///
/// Nodes keep the order in which they were added; that order is the
/// traversal order exposed to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes keyed by node name
    nodes: IndexMap<String, HostNode>,
    /// Links between nodes
    links: Vec<Link>,
}

/// Both ends of a link, resolved against the graph
#[derive(Debug, Clone, Copy)]
pub struct LinkEndpoints<'a> {
    /// Source node
    pub from_node: &'a HostNode,
    /// Source output socket
    pub from_socket: &'a Socket,
    /// Target node
    pub to_node: &'a HostNode,
    /// Target input socket
    pub to_socket: &'a Socket,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            links: Vec::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: HostNode) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.name) {
            return Err(GraphError::DuplicateNode(node.name));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Remove a node and its links
    pub fn remove_node(&mut self, name: &str) -> Option<HostNode> {
        self.links.retain(|l| !l.involves_node(name));
        self.nodes.shift_remove(name)
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> Option<&HostNode> {
        self.nodes.get(name)
    }

    /// Get a mutable node by name
    pub fn node_mut(&mut self, name: &str) -> Option<&mut HostNode> {
        self.nodes.get_mut(name)
    }

    /// Get all nodes in traversal order
    pub fn nodes(&self) -> impl Iterator<Item = &HostNode> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Link an output socket to an input socket
    pub fn connect(
        &mut self,
        from_node: &str,
        from_socket: &str,
        to_node: &str,
        to_socket: &str,
    ) -> Result<(), LinkError> {
        let link = Link::new(from_node, from_socket, to_node, to_socket);
        self.validate_link(&link)?;
        self.links.push(link);
        Ok(())
    }

    fn validate_link(&self, link: &Link) -> Result<(), LinkError> {
        let source = self.nodes.get(&link.from_node)
            .ok_or_else(|| LinkError::NodeNotFound(link.from_node.clone()))?;
        let target = self.nodes.get(&link.to_node)
            .ok_or_else(|| LinkError::NodeNotFound(link.to_node.clone()))?;

        if source.socket(SocketDirection::Output, &link.from_socket).is_none() {
            return Err(LinkError::SocketNotFound {
                node: link.from_node.clone(),
                socket: link.from_socket.clone(),
                direction: SocketDirection::Output,
            });
        }
        if target.socket(SocketDirection::Input, &link.to_socket).is_none() {
            return Err(LinkError::SocketNotFound {
                node: link.to_node.clone(),
                socket: link.to_socket.clone(),
                direction: SocketDirection::Input,
            });
        }

        if link.from_node == link.to_node {
            return Err(LinkError::SelfLoop(link.from_node.clone()));
        }

        Ok(())
    }

    /// Append a link without validation.
    ///
    /// Hosts hand over links as they are, including ones they flag as
    /// invalid; consumers decide what to do with them.
    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Get all links in order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Resolve both ends of a link.
    ///
    /// Returns `None` if either node or socket does not exist.
    pub fn link_endpoints<'a>(&'a self, link: &Link) -> Option<LinkEndpoints<'a>> {
        let from_node = self.nodes.get(&link.from_node)?;
        let to_node = self.nodes.get(&link.to_node)?;
        Some(LinkEndpoints {
            from_node,
            from_socket: from_node.socket(SocketDirection::Output, &link.from_socket)?,
            to_node,
            to_socket: to_node.socket(SocketDirection::Input, &link.to_socket)?,
        })
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Shader Nodetree")
    }
}

/// On-disk shape of a graph: nodes as an ordered list
#[derive(Serialize, Deserialize)]
struct GraphDocument {
    name: String,
    #[serde(default)]
    nodes: Vec<HostNode>,
    #[serde(default)]
    links: Vec<Link>,
}

impl TryFrom<GraphDocument> for Graph {
    type Error = GraphError;

    fn try_from(document: GraphDocument) -> Result<Self, Self::Error> {
        let mut graph = Graph::new(document.name);
        for node in document.nodes {
            graph.add_node(node)?;
        }
        graph.links = document.links;
        Ok(graph)
    }
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        Self {
            name: graph.name,
            nodes: graph.nodes.into_values().collect(),
            links: graph.links,
        }
    }
}

/// Error when building a graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node with this name already exists
    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),
}

/// Error when creating a link
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Socket not found on the node
    #[error("{direction:?} socket {socket} not found on node {node}")]
    SocketNotFound {
        /// Node name
        node: String,
        /// Socket identifier
        socket: String,
        /// Side that was searched
        direction: SocketDirection,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed on node {0}")]
    SelfLoop(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::Socket;

    fn value_and_output() -> Graph {
        let mut graph = Graph::new("Material");
        graph
            .add_node(
                HostNode::new("ShaderNodeValue", "Value")
                    .with_output(Socket::value("Value", 1.0)),
            )
            .unwrap();
        graph
            .add_node(
                HostNode::new("ShaderNodeOutputMaterial", "Material Output")
                    .with_input(Socket::shader("Surface")),
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = value_and_output();
        let err = graph.add_node(HostNode::new("ShaderNodeValue", "Value")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode(name) if name == "Value"));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_connect_validates_sockets() {
        let mut graph = value_and_output();
        graph.connect("Value", "Value", "Material Output", "Surface").unwrap();
        assert_eq!(graph.link_count(), 1);

        // Wrong direction: Surface is an input
        let err = graph.connect("Material Output", "Surface", "Value", "Value").unwrap_err();
        assert!(matches!(err, LinkError::SocketNotFound { .. }));

        let err = graph.connect("Missing", "Value", "Material Output", "Surface").unwrap_err();
        assert!(matches!(err, LinkError::NodeNotFound(_)));
    }

    #[test]
    fn test_remove_node_drops_links() {
        let mut graph = value_and_output();
        graph.connect("Value", "Value", "Material Output", "Surface").unwrap();
        assert!(graph.remove_node("Value").is_some());
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.nodes().map(|n| n.name.as_str()).collect::<Vec<_>>(), ["Material Output"]);
    }

    #[test]
    fn test_link_endpoints() {
        let mut graph = value_and_output();
        graph.add_link(Link::new("Value", "Value", "Material Output", "Volume"));
        let link = graph.links().next().unwrap().clone();
        assert!(graph.link_endpoints(&link).is_none());

        let link = Link::new("Value", "Value", "Material Output", "Surface");
        let endpoints = graph.link_endpoints(&link).unwrap();
        assert_eq!(endpoints.from_node.type_id, "ShaderNodeValue");
        assert_eq!(endpoints.to_socket.identifier, "Surface");
    }

    #[test]
    fn test_ron_document_keeps_node_order() {
        let mut graph = value_and_output();
        graph.connect("Value", "Value", "Material Output", "Surface").unwrap();

        let text = ron::ser::to_string_pretty(&graph, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Graph = ron::from_str(&text).unwrap();
        assert_eq!(loaded, graph);

        let names: Vec<_> = loaded.nodes().map(|n| n.name.clone()).collect();
        assert_eq!(names, ["Value", "Material Output"]);
    }
}
