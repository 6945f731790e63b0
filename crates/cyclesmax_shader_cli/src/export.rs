// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export of the first shader found on the selected objects.

use crate::scene::SceneDocument;
use crate::settings::ExportSettings;
use cyclesmax_shader_export::{ExportError, SerializationResult, ShaderSerializer};
use std::path::{Path, PathBuf};

/// Why an export did not produce a file
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    /// The scene render engine is not in the allowed list
    #[error("Shader export is only compatible with {allowed}, not {engine}")]
    UnsupportedRenderEngine {
        /// Engine of the scene
        engine: String,
        /// Allowed engines, comma separated
        allowed: String,
    },

    /// No selected object has a material with shader nodes
    #[error("Failed to find shader on selected objects")]
    NoShaderFound,

    /// The output file could not be written
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What an export wrote and what it left out
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Object whose material was exported
    pub object: String,
    /// Exported material
    pub material: String,
    /// File written
    pub output_path: PathBuf,
    /// Serialization outcome
    pub result: SerializationResult,
    /// Warnings about skipped node types
    pub warnings: Vec<String>,
}

/// Exports selected-object shaders according to the settings
#[derive(Debug, Clone)]
pub struct ExportOperator<'a> {
    settings: &'a ExportSettings,
    serializer: ShaderSerializer<'static>,
}

impl<'a> ExportOperator<'a> {
    /// Create an operator using the global kind registry
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self {
            settings,
            serializer: ShaderSerializer::new(),
        }
    }

    /// Serialize the first selected object's shader and write it to
    /// `output_path`.
    ///
    /// Objects without an active material, without a node tree or with an
    /// empty node tree are skipped. Only one shader is ever written.
    pub fn execute(
        &self,
        scene: &SceneDocument,
        output_path: &Path,
    ) -> Result<ExportReport, OperatorError> {
        if !self.settings.allows_render_engine(&scene.render_engine) {
            return Err(OperatorError::UnsupportedRenderEngine {
                engine: scene.render_engine.clone(),
                allowed: self.settings.allowed_render_engines.join(", "),
            });
        }

        for object in &scene.selected_objects {
            let Some(graph) = object.shader_graph() else {
                tracing::debug!("Skipping object '{}' without shader nodes", object.name);
                continue;
            };
            let material = object
                .active_material
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default();

            let result = self.serializer.serialize(graph);
            let warnings = diagnostics(&result);
            for warning in &warnings {
                tracing::warn!("{warning}");
            }

            let output_path = with_extension(output_path, &self.settings.file_extension);
            result.write_to(&output_path)?;
            tracing::info!(
                "Exported material '{}' of '{}' to {}",
                material,
                object.name,
                output_path.display()
            );

            return Ok(ExportReport {
                object: object.name.clone(),
                material,
                output_path,
                result,
                warnings,
            });
        }

        Err(OperatorError::NoShaderFound)
    }
}

const INCOMPATIBLE_HINT: &str =
    "Load this .blend file in Blender 2.81 or newer to correct this.";

/// User-facing warnings for node types left out of a serialization
pub fn diagnostics(result: &SerializationResult) -> Vec<String> {
    let mut warnings = Vec::new();
    if !result.unsupported_types.is_empty() {
        warnings.push(format!(
            "Ignored unsupported node types: {}",
            join(result.unsupported_types.iter())
        ));
    }
    if !result.incompatible_types.is_empty() {
        warnings.push(format!(
            "Ignored incompatible node types: {}. {INCOMPATIBLE_HINT}",
            join(result.incompatible_types.iter())
        ));
    }
    warnings
}

fn join<'s>(types: impl Iterator<Item = &'s String>) -> String {
    types.map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Append `.{extension}` unless the path already ends with it
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if has_extension || extension.is_empty() {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}
