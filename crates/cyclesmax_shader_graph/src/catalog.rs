// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog of common host shader nodes.
//!
//! Templates carry the default sockets and properties the host creates for
//! each node type, so graphs built from them look like the ones a user would
//! author by hand.

use crate::node::{NodeCategory, NodeRegistry, NodeTemplate};
use crate::property::{ColorRamp, CurveMapping, ImageRef, PropertyValue};
use crate::socket::Socket;
use indexmap::IndexMap;

fn template(
    type_id: &str,
    name: &str,
    category: NodeCategory,
    inputs: Vec<Socket>,
    outputs: Vec<Socket>,
    properties: &[(&str, PropertyValue)],
) -> NodeTemplate {
    NodeTemplate {
        type_id: type_id.to_string(),
        name: name.to_string(),
        category,
        inputs,
        outputs,
        properties: properties
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<IndexMap<_, _>>(),
    }
}

fn enum_item(item: &str) -> PropertyValue {
    PropertyValue::Enum(item.to_string())
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GREY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Create the host shader node registry with the built-in templates
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Output
    // ========================================================================

    registry.register(template(
        "ShaderNodeOutputMaterial",
        "Material Output",
        NodeCategory::Output,
        vec![
            Socket::shader("Surface"),
            Socket::shader("Volume"),
            Socket::vector("Displacement", [0.0, 0.0, 0.0]),
        ],
        vec![],
        &[("target", enum_item("ALL"))],
    ));

    // ========================================================================
    // Input
    // ========================================================================

    registry.register(template(
        "ShaderNodeValue",
        "Value",
        NodeCategory::Input,
        vec![],
        vec![Socket::value("Value", 0.5)],
        &[],
    ));

    registry.register(template(
        "ShaderNodeRGB",
        "RGB",
        NodeCategory::Input,
        vec![],
        vec![Socket::rgba("Color", [0.5, 0.5, 0.5, 1.0])],
        &[],
    ));

    registry.register(template(
        "ShaderNodeTexCoord",
        "Texture Coordinate",
        NodeCategory::Input,
        vec![],
        ["Generated", "Normal", "UV", "Object", "Camera", "Window", "Reflection"]
            .into_iter()
            .map(|id| Socket::vector(id, [0.0, 0.0, 0.0]))
            .collect(),
        &[("from_instancer", PropertyValue::Bool(false))],
    ));

    registry.register(template(
        "ShaderNodeFresnel",
        "Fresnel",
        NodeCategory::Input,
        vec![
            Socket::value("IOR", 1.45),
            Socket::vector("Normal", [0.0, 0.0, 0.0]),
        ],
        vec![Socket::value("Fac", 0.0)],
        &[],
    ));

    // ========================================================================
    // Shader
    // ========================================================================

    registry.register(template(
        "ShaderNodeBsdfPrincipled",
        "Principled BSDF",
        NodeCategory::Shader,
        vec![
            Socket::rgba("Base Color", GREY),
            Socket::value("Subsurface", 0.0),
            Socket::vector("Subsurface Radius", [1.0, 0.2, 0.1]),
            Socket::rgba("Subsurface Color", GREY),
            Socket::value("Metallic", 0.0),
            Socket::value("Specular", 0.5),
            Socket::value("Specular Tint", 0.0),
            Socket::value("Roughness", 0.5),
            Socket::value("Anisotropic", 0.0),
            Socket::value("Anisotropic Rotation", 0.0),
            Socket::value("Sheen", 0.0),
            Socket::value("Sheen Tint", 0.5),
            Socket::value("Clearcoat", 0.0),
            Socket::value("Clearcoat Roughness", 0.03),
            Socket::value("IOR", 1.45),
            Socket::value("Transmission", 0.0),
            Socket::rgba("Emission", [0.0, 0.0, 0.0, 1.0]),
            Socket::value("Alpha", 1.0),
            Socket::vector("Normal", [0.0, 0.0, 0.0]),
        ],
        vec![Socket::shader("BSDF")],
        &[
            ("distribution", enum_item("GGX")),
            ("subsurface_method", enum_item("BURLEY")),
        ],
    ));

    registry.register(template(
        "ShaderNodeBsdfDiffuse",
        "Diffuse BSDF",
        NodeCategory::Shader,
        vec![
            Socket::rgba("Color", GREY),
            Socket::value("Roughness", 0.0),
            Socket::vector("Normal", [0.0, 0.0, 0.0]),
        ],
        vec![Socket::shader("BSDF")],
        &[],
    ));

    registry.register(template(
        "ShaderNodeBsdfGlossy",
        "Glossy BSDF",
        NodeCategory::Shader,
        vec![
            Socket::rgba("Color", GREY),
            Socket::value("Roughness", 0.5),
            Socket::vector("Normal", [0.0, 0.0, 0.0]),
        ],
        vec![Socket::shader("BSDF")],
        &[("distribution", enum_item("GGX"))],
    ));

    registry.register(template(
        "ShaderNodeEmission",
        "Emission",
        NodeCategory::Shader,
        vec![Socket::rgba("Color", WHITE), Socket::value("Strength", 1.0)],
        vec![Socket::shader("Emission")],
        &[],
    ));

    registry.register(template(
        "ShaderNodeMixShader",
        "Mix Shader",
        NodeCategory::Shader,
        vec![
            Socket::value("Fac", 0.5),
            Socket::shader("Shader"),
            Socket::shader("Shader_001").named("Shader"),
        ],
        vec![Socket::shader("Shader")],
        &[],
    ));

    registry.register(template(
        "ShaderNodeAddShader",
        "Add Shader",
        NodeCategory::Shader,
        vec![
            Socket::shader("Shader"),
            Socket::shader("Shader_001").named("Shader"),
        ],
        vec![Socket::shader("Shader")],
        &[],
    ));

    // ========================================================================
    // Texture
    // ========================================================================

    registry.register(template(
        "ShaderNodeTexImage",
        "Image Texture",
        NodeCategory::Texture,
        vec![Socket::vector("Vector", [0.0, 0.0, 0.0])],
        vec![Socket::rgba("Color", [0.0, 0.0, 0.0, 1.0]), Socket::value("Alpha", 0.0)],
        &[
            ("image", PropertyValue::Image(ImageRef::default())),
            ("interpolation", enum_item("Linear")),
        ],
    ));

    registry.register(template(
        "ShaderNodeTexNoise",
        "Noise Texture",
        NodeCategory::Texture,
        vec![
            Socket::vector("Vector", [0.0, 0.0, 0.0]),
            Socket::value("W", 0.0),
            Socket::value("Scale", 5.0),
            Socket::value("Detail", 2.0),
            Socket::value("Roughness", 0.5),
            Socket::value("Distortion", 0.0),
        ],
        vec![Socket::value("Fac", 0.0), Socket::rgba("Color", [0.0, 0.0, 0.0, 1.0])],
        &[("noise_dimensions", enum_item("3D"))],
    ));

    registry.register(template(
        "ShaderNodeTexVoronoi",
        "Voronoi Texture",
        NodeCategory::Texture,
        vec![
            Socket::vector("Vector", [0.0, 0.0, 0.0]),
            Socket::value("W", 0.0),
            Socket::value("Scale", 5.0),
            Socket::value("Smoothness", 1.0),
            Socket::value("Exponent", 0.5),
            Socket::value("Randomness", 1.0),
        ],
        vec![
            Socket::value("Distance", 0.0),
            Socket::rgba("Color", [0.0, 0.0, 0.0, 1.0]),
            Socket::vector("Position", [0.0, 0.0, 0.0]),
        ],
        &[
            ("voronoi_dimensions", enum_item("3D")),
            ("distance", enum_item("EUCLIDEAN")),
            ("feature", enum_item("F1")),
        ],
    ));

    // ========================================================================
    // Color
    // ========================================================================

    registry.register(template(
        "ShaderNodeMixRGB",
        "Mix",
        NodeCategory::Color,
        vec![
            Socket::value("Fac", 0.5),
            Socket::rgba("Color1", [0.5, 0.5, 0.5, 1.0]),
            Socket::rgba("Color2", [0.5, 0.5, 0.5, 1.0]),
        ],
        vec![Socket::rgba("Color", [0.0, 0.0, 0.0, 1.0])],
        &[
            ("blend_type", enum_item("MIX")),
            ("use_clamp", PropertyValue::Bool(false)),
        ],
    ));

    registry.register(template(
        "ShaderNodeRGBCurve",
        "RGB Curves",
        NodeCategory::Color,
        vec![Socket::value("Fac", 1.0), Socket::rgba("Color", WHITE)],
        vec![Socket::rgba("Color", WHITE)],
        &[("mapping", PropertyValue::Curves(CurveMapping::identity()))],
    ));

    // ========================================================================
    // Vector
    // ========================================================================

    registry.register(template(
        "ShaderNodeBump",
        "Bump",
        NodeCategory::Vector,
        vec![
            Socket::value("Strength", 1.0),
            Socket::value("Distance", 1.0),
            Socket::value("Height", 1.0),
            Socket::vector("Normal", [0.0, 0.0, 0.0]),
        ],
        vec![Socket::vector("Normal", [0.0, 0.0, 0.0])],
        &[("invert", PropertyValue::Bool(false))],
    ));

    registry.register(template(
        "ShaderNodeNormalMap",
        "Normal Map",
        NodeCategory::Vector,
        vec![
            Socket::value("Strength", 1.0),
            Socket::rgba("Color", [0.5, 0.5, 1.0, 1.0]),
        ],
        vec![Socket::vector("Normal", [0.0, 0.0, 0.0])],
        &[("space", enum_item("TANGENT"))],
    ));

    // ========================================================================
    // Converter
    // ========================================================================

    registry.register(template(
        "ShaderNodeMath",
        "Math",
        NodeCategory::Converter,
        vec![
            Socket::value("Value", 0.5),
            Socket::value("Value_001", 0.5).named("Value"),
            Socket::value("Value_002", 0.5).named("Value"),
        ],
        vec![Socket::value("Value", 0.0)],
        &[
            ("operation", enum_item("ADD")),
            ("use_clamp", PropertyValue::Bool(false)),
        ],
    ));

    registry.register(template(
        "ShaderNodeVectorMath",
        "Vector Math",
        NodeCategory::Converter,
        vec![
            Socket::vector("Vector", [0.0, 0.0, 0.0]),
            Socket::vector("Vector_001", [0.0, 0.0, 0.0]).named("Vector"),
            Socket::vector("Vector_002", [0.0, 0.0, 0.0]).named("Vector"),
            Socket::value("Scale", 1.0),
        ],
        vec![Socket::vector("Vector", [0.0, 0.0, 0.0]), Socket::value("Value", 0.0)],
        &[("operation", enum_item("ADD"))],
    ));

    registry.register(template(
        "ShaderNodeValToRGB",
        "ColorRamp",
        NodeCategory::Converter,
        vec![Socket::value("Fac", 0.5)],
        vec![Socket::rgba("Color", [0.0, 0.0, 0.0, 1.0]), Socket::value("Alpha", 0.0)],
        &[("color_ramp", PropertyValue::Ramp(ColorRamp::black_to_white()))],
    ));

    registry.register(template(
        "ShaderNodeSeparateXYZ",
        "Separate XYZ",
        NodeCategory::Converter,
        vec![Socket::vector("Vector", [0.0, 0.0, 0.0])],
        vec![Socket::value("X", 0.0), Socket::value("Y", 0.0), Socket::value("Z", 0.0)],
        &[],
    ));

    registry.register(template(
        "ShaderNodeRGBToBW",
        "RGB to BW",
        NodeCategory::Converter,
        vec![Socket::rgba("Color", [0.5, 0.5, 0.5, 1.0])],
        vec![Socket::value("Val", 0.0)],
        &[],
    ));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node_from_catalog() {
        let registry = create_shader_registry();
        let node = registry.create_node("ShaderNodeMath", "Math.001").unwrap();
        assert_eq!(node.name, "Math.001");
        assert_eq!(node.inputs.len(), 3);
        assert_eq!(node.inputs[1].name, "Value");
        assert_eq!(node.enum_property("operation"), Some("ADD"));
        assert!(registry.create_node("ShaderNodeDoesNotExist", "x").is_none());
    }

    #[test]
    fn test_categories() {
        let registry = create_shader_registry();
        assert!(registry
            .templates_in_category(NodeCategory::Output)
            .all(|t| t.outputs.is_empty()));
        assert!(registry.templates_in_category(NodeCategory::Shader).count() >= 5);
    }
}
