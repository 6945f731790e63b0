// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the host graph.

use serde::{Deserialize, Serialize};

fn valid_by_default() -> bool {
    true
}

/// A link from an output socket to an input socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source node name
    pub from_node: String,
    /// Source socket identifier
    pub from_socket: String,
    /// Target node name
    pub to_node: String,
    /// Target socket identifier
    pub to_socket: String,
    /// Whether the host considers the link usable
    #[serde(default = "valid_by_default")]
    pub is_valid: bool,
}

impl Link {
    /// Create a new valid link
    pub fn new(
        from_node: impl Into<String>,
        from_socket: impl Into<String>,
        to_node: impl Into<String>,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node: from_node.into(),
            from_socket: from_socket.into(),
            to_node: to_node.into(),
            to_socket: to_socket.into(),
            is_valid: true,
        }
    }

    /// Mark the link as invalid
    pub fn invalid(mut self) -> Self {
        self.is_valid = false;
        self
    }

    /// Check if this link involves a specific node
    pub fn involves_node(&self, name: &str) -> bool {
        self.from_node == name || self.to_node == name
    }
}
