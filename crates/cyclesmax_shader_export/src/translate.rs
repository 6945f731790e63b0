// SPDX-License-Identifier: MIT OR Apache-2.0
//! Translation of host nodes into internal node records.
//!
//! Each kind is described by two independent pieces:
//! - a socket copy table (host input identifier to target field name), see
//!   [`copy_table`]
//! - an extractor for attributes that are not sockets (enum selectors,
//!   flags, settings, curves, ramps), see [`extract_attributes`]
//!
//! [`translate_node`] runs classification, socket copying and extraction as
//! one pipeline. Unknown types, unlisted sockets and unsupported socket types
//! are skipped without error.

use crate::attributes::{AttributeSet, GridPosition, InternalNode};
use crate::encode::{encode_curves, encode_ramp};
use crate::kind::{NodeKind, NodeKindRegistry, IMAGE_TEXTURE_TYPE};
use crate::texture::TextureSlotTable;
use cyclesmax_shader_graph::{HostNode, SocketType};
use std::borrow::Cow;

/// Host input socket identifier and the target field it is copied into
pub type SocketCopy = (&'static str, &'static str);

/// Rewrite a dotted duplicate-socket suffix (`Value.001`) to the underscore
/// form (`Value_001`) used by the copy and rename tables.
///
/// Older and newer hosts disagree on which separator they use.
pub fn normalize_identifier(identifier: &str) -> Cow<'_, str> {
    let bytes = identifier.as_bytes();
    let n = bytes.len();
    if n > 4 && bytes[n - 4] == b'.' && bytes[n - 3..].iter().all(u8::is_ascii_digit) {
        Cow::Owned(format!("{}_{}", &identifier[..n - 4], &identifier[n - 3..]))
    } else {
        Cow::Borrowed(identifier)
    }
}

/// Socket copy table of a kind.
///
/// Identifiers are in normalized form. Kinds without copyable inputs get an
/// empty table.
pub fn copy_table(kind: NodeKind) -> &'static [SocketCopy] {
    match kind {
        // Color
        NodeKind::BrightContrast => {
            &[("Color", "color"), ("Bright", "bright"), ("Contrast", "contrast")]
        }
        NodeKind::Gamma => &[("Color", "color"), ("Gamma", "gamma")],
        NodeKind::Hsv => &[
            ("Hue", "hue"),
            ("Saturation", "saturation"),
            ("Value", "value"),
            ("Fac", "fac"),
            ("Color", "color"),
        ],
        NodeKind::Invert | NodeKind::RgbCurves => &[("Fac", "fac"), ("Color", "color")],
        NodeKind::LightFalloff => &[("Strength", "strength"), ("Smooth", "smooth")],
        NodeKind::MixRgb => &[("Fac", "fac"), ("Color1", "color1"), ("Color2", "color2")],

        // Converter
        NodeKind::Blackbody => &[("Temperature", "temperature")],
        NodeKind::Clamp => &[("Value", "value"), ("Min", "min"), ("Max", "max")],
        NodeKind::ColorRamp | NodeKind::MixShader => &[("Fac", "fac")],
        NodeKind::CombineHsv => &[("H", "h"), ("S", "s"), ("V", "v")],
        NodeKind::CombineRgb => &[("R", "r"), ("G", "g"), ("B", "b")],
        NodeKind::CombineXyz => &[("X", "x"), ("Y", "y"), ("Z", "z")],
        NodeKind::Math => &[("Value", "value1"), ("Value_001", "value2"), ("Value_002", "value3")],
        NodeKind::RgbToBw
        | NodeKind::SeparateHsv
        | NodeKind::TransparentBsdf
        | NodeKind::TranslucentBsdf => &[("Color", "color")],
        NodeKind::SeparateRgb => &[("Image", "image")],
        NodeKind::SeparateXyz | NodeKind::VectorTransform => &[("Vector", "vector")],
        NodeKind::VectorMath => {
            &[("Vector", "vector1"), ("Vector_001", "vector2"), ("Vector_002", "vector3")]
        }
        NodeKind::Wavelength => &[("Wavelength", "wavelength")],

        // Shader
        NodeKind::AmbientOcclusion => &[("Color", "color"), ("Distance", "distance")],
        NodeKind::PrincipledBsdf => &[
            ("Base Color", "base_color"),
            ("Subsurface", "subsurface"),
            ("Subsurface Radius", "subsurface_radius"),
            ("Subsurface Color", "subsurface_color"),
            ("Metallic", "metallic"),
            ("Specular", "specular"),
            ("Specular Tint", "specular_tint"),
            ("Roughness", "roughness"),
            ("Anisotropic", "anisotropic"),
            ("Anisotropic Rotation", "anisotropic_rotation"),
            ("Sheen", "sheen"),
            ("Sheen Tint", "sheen_tint"),
            ("Clearcoat", "clearcoat"),
            ("Clearcoat Roughness", "clearcoat_roughness"),
            ("IOR", "ior"),
            ("Transmission", "transmission"),
        ],
        NodeKind::DiffuseBsdf | NodeKind::GlossyBsdf => {
            &[("Color", "color"), ("Roughness", "roughness")]
        }
        NodeKind::RefractionBsdf | NodeKind::GlassBsdf => {
            &[("Color", "color"), ("Roughness", "roughness"), ("IOR", "IOR")]
        }
        NodeKind::AnisotropicBsdf => &[
            ("Color", "color"),
            ("Roughness", "roughness"),
            ("Anisotropy", "anisotropy"),
            ("Rotation", "rotation"),
        ],
        NodeKind::VelvetBsdf => &[("Color", "color"), ("Sigma", "sigma")],
        NodeKind::ToonBsdf => &[("Color", "color"), ("Size", "size"), ("Smooth", "smooth")],
        NodeKind::SubsurfaceScatter => &[
            ("Color", "color"),
            ("Scale", "scale"),
            ("Radius", "radius"),
            ("Texture Blur", "texture_blur"),
        ],
        NodeKind::Emission => &[("Color", "color"), ("Strength", "strength")],
        NodeKind::HairBsdf => &[
            ("Color", "color"),
            ("Offset", "offset"),
            ("RoughnessU", "roughness_U"),
            ("RoughnessV", "roughness_v"),
        ],
        NodeKind::VolAbsorb => &[("Color", "color"), ("Density", "density")],
        NodeKind::VolScatter => {
            &[("Color", "color"), ("Density", "density"), ("Anisotropy", "anisotropy")]
        }

        // Texture
        NodeKind::BrickTex => &[
            ("Color1", "color1"),
            ("Color2", "color2"),
            ("Mortar", "mortar"),
            ("Scale", "scale"),
            ("Mortar Size", "mortar_size"),
            ("Mortar Smooth", "mortar_smooth"),
            ("Bias", "bias"),
            ("Brick Width", "brick_width"),
            ("Row Height", "row_height"),
        ],
        NodeKind::CheckerTex => &[("Color1", "color1"), ("Color2", "color2"), ("Scale", "scale")],
        NodeKind::MagicTex => &[("Scale", "scale"), ("Distortion", "distortion")],
        NodeKind::MusgraveTex => &[
            ("Scale", "scale"),
            ("Detail", "detail"),
            ("Dimension", "dimension"),
            ("Lacunarity", "lacunarity"),
            ("Offset", "offset"),
            ("Gain", "gain"),
        ],
        NodeKind::NoiseTex => {
            &[("Scale", "scale"), ("Detail", "detail"), ("Distortion", "distortion")]
        }
        NodeKind::VoronoiTex => &[
            ("Scale", "scale"),
            ("W", "w"),
            ("Smoothness", "smoothness"),
            ("Randomness", "randomness"),
        ],
        NodeKind::WaveTex => &[
            ("Scale", "scale"),
            ("Distortion", "distortion"),
            ("Detail", "detail"),
            ("Detail Scale", "detail_scale"),
        ],

        // Input
        NodeKind::Bevel => &[("Radius", "radius")],
        NodeKind::Fresnel => &[("IOR", "IOR")],
        NodeKind::LayerWeight => &[("Blend", "blend")],
        NodeKind::Wireframe => &[("Size", "size")],

        // Vector
        NodeKind::Bump => &[("Strength", "strength"), ("Distance", "distance")],
        NodeKind::Displacement => {
            &[("Height", "height"), ("Midlevel", "midlevel"), ("Scale", "scale")]
        }
        NodeKind::NormalMap => &[("Strength", "strength"), ("Color", "color")],

        NodeKind::Invalid
        | NodeKind::Incompatible
        | NodeKind::AddShader
        | NodeKind::Holdout
        | NodeKind::MaxTex
        | NodeKind::GradientTex
        | NodeKind::LightPath
        | NodeKind::CameraData
        | NodeKind::Tangent
        | NodeKind::TexCoord
        | NodeKind::Geometry
        | NodeKind::ObjectInfo
        | NodeKind::Rgb
        | NodeKind::Value
        | NodeKind::MaterialOutput => &[],
    }
}

/// Reads host properties into attribute fields. A missing or mistyped
/// property leaves its field unset.
struct Extractor<'a> {
    node: &'a HostNode,
    attrs: &'a mut AttributeSet,
}

impl Extractor<'_> {
    /// Enum item, lower-cased
    fn lower(&mut self, field: &str, property: &str) {
        self.mapped(field, property, &[]);
    }

    /// Enum item through an override table, lower-cased otherwise
    fn mapped(&mut self, field: &str, property: &str, overrides: &[(&str, &str)]) {
        let Some(item) = self.node.enum_property(property) else {
            return;
        };
        let value = overrides
            .iter()
            .find(|(from, _)| *from == item)
            .map_or_else(|| item.to_lowercase(), |(_, to)| (*to).to_string());
        self.attrs.set_string(field, value);
    }

    fn flag(&mut self, field: &str, property: &str) {
        if let Some(flag) = self.node.bool_property(property) {
            self.attrs.set_flag(field, flag);
        }
    }

    fn int(&mut self, field: &str, property: &str) {
        if let Some(value) = self.node.int_property(property) {
            self.attrs.set_int(field, value);
        }
    }

    fn float(&mut self, field: &str, property: &str) {
        if let Some(value) = self.node.float_property(property) {
            self.attrs.set_float(field, value);
        }
    }

    fn distribution(&mut self) {
        self.mapped("distribution", "distribution", &[("MULTI_GGX", "multiscatter_ggx")]);
    }
}

/// Extract the non-socket attributes of a kind
pub fn extract_attributes(kind: NodeKind, node: &HostNode, attrs: &mut AttributeSet) {
    let mut x = Extractor { node, attrs };
    match kind {
        // Color
        NodeKind::MixRgb => {
            x.lower("type", "blend_type");
            x.flag("use_clamp", "use_clamp");
        }
        NodeKind::RgbCurves => {
            if let Some(curves) = node.curves().and_then(encode_curves) {
                x.attrs.set_string("curves", curves);
            }
        }

        // Converter
        NodeKind::Clamp => x.lower("type", "clamp_type"),
        NodeKind::Math => {
            x.lower("type", "operation");
            x.flag("use_clamp", "use_clamp");
        }
        NodeKind::VectorMath => x.lower("type", "operation"),
        NodeKind::ColorRamp => {
            if let Some(ramp) = node.ramp() {
                x.attrs.set_string("ramp", encode_ramp(ramp));
            }
        }

        // Shader
        NodeKind::AmbientOcclusion => {
            x.int("samples", "samples");
            x.flag("inside", "inside");
            x.flag("only_local", "only_local");
        }
        NodeKind::GlossyBsdf | NodeKind::GlassBsdf | NodeKind::AnisotropicBsdf => x.distribution(),
        NodeKind::RefractionBsdf => x.lower("distribution", "distribution"),
        NodeKind::ToonBsdf | NodeKind::HairBsdf => x.lower("component", "component"),
        NodeKind::SubsurfaceScatter => x.lower("falloff", "falloff"),

        // Texture
        NodeKind::BrickTex => {
            x.float("offset", "offset");
            x.int("offset_frequency", "offset_frequency");
            x.float("squash", "squash");
            x.int("squash_frequency", "squash_frequency");
        }
        NodeKind::GradientTex => x.lower("type", "gradient_type"),
        NodeKind::MagicTex => x.int("depth", "turbulence_depth"),
        NodeKind::MusgraveTex => x.mapped("type", "musgrave_type", &[("FBM", "fBM")]),
        NodeKind::VoronoiTex => {
            let dimensions = match node.enum_property("voronoi_dimensions") {
                Some("1D") => Some(1),
                Some("2D") => Some(2),
                Some("3D") => Some(3),
                Some("4D") => Some(4),
                _ => None,
            };
            if let Some(dimensions) = dimensions {
                x.attrs.set_int("dimensions", dimensions);
            }
            x.lower("metric", "distance");
            x.lower("feature", "feature");
        }
        NodeKind::WaveTex => {
            x.lower("type", "wave_type");
            x.mapped("profile", "wave_profile", &[("SIN", "sine")]);
        }

        // Input
        NodeKind::Bevel => x.int("samples", "samples"),
        NodeKind::Tangent => {
            x.lower("direction", "direction_type");
            x.lower("axis", "axis");
        }
        NodeKind::Rgb => {
            if let Some(color) = node.outputs.first().and_then(|s| s.default_rgba()) {
                x.attrs.set_float4("value", color);
            }
        }
        NodeKind::Value => {
            if let Some(value) = node.outputs.first().and_then(|s| s.default_float()) {
                x.attrs.set_float("value", value);
            }
        }
        NodeKind::Wireframe => x.flag("use_pixel_size", "use_pixel_size"),

        // Vector
        NodeKind::Displacement => x.lower("space", "space"),
        NodeKind::NormalMap => x.mapped(
            "space",
            "space",
            &[("BLENDER_OBJECT", "object"), ("BLENDER_WORLD", "world")],
        ),
        NodeKind::VectorTransform => {
            x.lower("type", "vector_type");
            x.lower("convert_from", "convert_from");
            x.lower("convert_to", "convert_to");
        }

        NodeKind::Invalid
        | NodeKind::Incompatible
        | NodeKind::BrightContrast
        | NodeKind::Gamma
        | NodeKind::Hsv
        | NodeKind::Invert
        | NodeKind::LightFalloff
        | NodeKind::Blackbody
        | NodeKind::CombineHsv
        | NodeKind::CombineRgb
        | NodeKind::CombineXyz
        | NodeKind::RgbToBw
        | NodeKind::SeparateHsv
        | NodeKind::SeparateRgb
        | NodeKind::SeparateXyz
        | NodeKind::Wavelength
        | NodeKind::PrincipledBsdf
        | NodeKind::MixShader
        | NodeKind::AddShader
        | NodeKind::DiffuseBsdf
        | NodeKind::TransparentBsdf
        | NodeKind::TranslucentBsdf
        | NodeKind::VelvetBsdf
        | NodeKind::Emission
        | NodeKind::Holdout
        | NodeKind::VolAbsorb
        | NodeKind::VolScatter
        | NodeKind::MaxTex
        | NodeKind::CheckerTex
        | NodeKind::NoiseTex
        | NodeKind::LightPath
        | NodeKind::Fresnel
        | NodeKind::LayerWeight
        | NodeKind::CameraData
        | NodeKind::TexCoord
        | NodeKind::Geometry
        | NodeKind::ObjectInfo
        | NodeKind::Bump
        | NodeKind::MaterialOutput => {}
    }
}

/// Copy listed input sockets into the typed maps
fn copy_sockets(table: &[SocketCopy], node: &HostNode, attrs: &mut AttributeSet) {
    if table.is_empty() {
        return;
    }
    for socket in &node.inputs {
        let identifier = normalize_identifier(&socket.identifier);
        let Some((_, field)) = table.iter().find(|(host, _)| *host == identifier) else {
            continue;
        };
        match socket.socket_type {
            SocketType::Value => {
                if let Some(v) = socket.default_float() {
                    attrs.set_float(*field, v);
                }
            }
            SocketType::Rgba => {
                if let Some(v) = socket.default_rgba() {
                    attrs.set_float4(*field, v);
                }
            }
            SocketType::Vector => {
                if let Some(v) = socket.default_vector() {
                    attrs.set_float3(*field, v);
                }
            }
            _ => {}
        }
    }
}

/// Classify a host type.
///
/// Registry first, then the image texture special case, then the
/// incompatible list; anything else is [`NodeKind::Invalid`].
pub fn classify(type_id: &str, registry: &NodeKindRegistry) -> NodeKind {
    if let Some(kind) = registry.lookup(type_id) {
        kind
    } else if type_id == IMAGE_TEXTURE_TYPE {
        NodeKind::MaxTex
    } else if registry.is_incompatible(type_id) {
        NodeKind::Incompatible
    } else {
        NodeKind::Invalid
    }
}

/// Translate one host node.
///
/// Image textures only receive a texture slot. Invalid and incompatible
/// nodes come back without attributes; the caller decides what to do
/// with them.
pub fn translate_node(
    node: &HostNode,
    name: impl Into<String>,
    registry: &NodeKindRegistry,
    slots: &mut TextureSlotTable,
) -> InternalNode {
    let kind = classify(&node.type_id, registry);
    let mut output = InternalNode::new(name, kind, GridPosition::from_host(node.location));

    match kind {
        NodeKind::Invalid | NodeKind::Incompatible => {}
        NodeKind::MaxTex => {
            let path = node
                .image()
                .and_then(|image| image.filepath.as_deref())
                .filter(|path| !path.is_empty());
            let slot = match path {
                Some(path) => slots.slot_for(path),
                None => slots.empty_slot(),
            };
            output.attributes.set_int("slot", i32::try_from(slot).unwrap_or(i32::MAX));
        }
        _ => {
            copy_sockets(copy_table(kind), node, &mut output.attributes);
            extract_attributes(kind, node, &mut output.attributes);
        }
    }

    output
}
