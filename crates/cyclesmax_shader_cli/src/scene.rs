// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene documents handed to the exporter.
//!
//! A scene document is a snapshot of what the exporter reads from the host:
//! the render engine and the selected objects with their active materials.

use cyclesmax_shader_graph::Graph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading a scene document
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// File could not be read
    #[error("Failed to read scene {}: {source}", path.display())]
    Io {
        /// Scene path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// RON scene did not parse
    #[error("Invalid RON scene {}: {source}", path.display())]
    Ron {
        /// Scene path
        path: PathBuf,
        /// Parser error with position
        source: ron::error::SpannedError,
    },

    /// JSON scene did not parse
    #[error("Invalid JSON scene {}: {source}", path.display())]
    Json {
        /// Scene path
        path: PathBuf,
        /// Parser error
        source: serde_json::Error,
    },

    /// Extension is neither `.ron` nor `.json`
    #[error("Unsupported scene format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A material with an optional shader node tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Shader node tree, absent for materials without nodes
    #[serde(default)]
    pub node_tree: Option<Graph>,
}

/// A selected scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name
    pub name: String,
    /// Active material slot
    #[serde(default)]
    pub active_material: Option<Material>,
}

impl SceneObject {
    /// Node tree of the active material, if it has any nodes
    pub fn shader_graph(&self) -> Option<&Graph> {
        self.active_material
            .as_ref()?
            .node_tree
            .as_ref()
            .filter(|graph| !graph.is_empty())
    }
}

/// Scene state relevant to shader export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Render engine identifier, e.g. `CYCLES`
    pub render_engine: String,
    /// Selected objects in selection order
    #[serde(default)]
    pub selected_objects: Vec<SceneObject>,
}

impl SceneDocument {
    /// Load a scene from a `.ron` or `.json` file
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        if !matches!(extension.as_deref(), Some("ron" | "json")) {
            return Err(SceneError::UnsupportedFormat(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if extension.as_deref() == Some("json") {
            serde_json::from_str(&content).map_err(|source| SceneError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            ron::from_str(&content).map_err(|source| SceneError::Ron {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclesmax_shader_graph::{create_shader_registry, Link};

    fn sample_scene() -> SceneDocument {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Shader Nodetree");
        graph
            .add_node(registry.create_node("ShaderNodeBsdfDiffuse", "Diffuse BSDF").unwrap())
            .unwrap();
        graph
            .add_node(registry.create_node("ShaderNodeOutputMaterial", "Material Output").unwrap())
            .unwrap();
        graph.add_link(Link::new("Diffuse BSDF", "BSDF", "Material Output", "Surface"));

        SceneDocument {
            render_engine: "CYCLES".to_string(),
            selected_objects: vec![
                SceneObject {
                    name: "Empty".to_string(),
                    active_material: None,
                },
                SceneObject {
                    name: "Cube".to_string(),
                    active_material: Some(Material {
                        name: "Material".to_string(),
                        node_tree: Some(graph),
                    }),
                },
            ],
        }
    }

    #[test]
    fn test_shader_graph_requires_nodes() {
        let scene = sample_scene();
        assert!(scene.selected_objects[0].shader_graph().is_none());
        assert_eq!(scene.selected_objects[1].shader_graph().unwrap().node_count(), 2);

        let empty = SceneObject {
            name: "Plane".to_string(),
            active_material: Some(Material {
                name: "Blank".to_string(),
                node_tree: Some(Graph::default()),
            }),
        };
        assert!(empty.shader_graph().is_none());
    }

    #[test]
    fn test_load_ron_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let scene = sample_scene();

        let ron_path = dir.path().join("scene.ron");
        let ron_text =
            ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        std::fs::write(&ron_path, ron_text).unwrap();
        assert_eq!(SceneDocument::load(&ron_path).unwrap(), scene);

        let json_path = dir.path().join("scene.JSON");
        std::fs::write(&json_path, serde_json::to_string_pretty(&scene).unwrap()).unwrap();
        assert_eq!(SceneDocument::load(&json_path).unwrap(), scene);
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.blend");
        std::fs::write(&path, "BLENDER").unwrap();
        assert!(matches!(SceneDocument::load(&path), Err(SceneError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, "{\"render_engine\": 3}").unwrap();
        assert!(matches!(SceneDocument::load(&path), Err(SceneError::Json { .. })));
    }
}
