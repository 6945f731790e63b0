// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node kinds and the host type registry.
//!
//! Every supported host type maps to exactly one [`NodeKind`]. The mapping is
//! a flat table so adding a kind means adding one row here, one copy table in
//! [`crate::translate`] and, if the kind has non-socket attributes, one
//! extractor arm.

use indexmap::IndexMap;
use std::sync::LazyLock;

/// Host type of image texture nodes, exported as external texture slots
pub const IMAGE_TEXTURE_TYPE: &str = "ShaderNodeTexImage";

/// Closed classification of a node for the target schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Host type not recognized
    Invalid,
    /// Host type from a newer host generation than this schema supports
    Incompatible,

    // Color
    /// Brightness/contrast
    BrightContrast,
    /// Gamma
    Gamma,
    /// Hue/saturation/value
    Hsv,
    /// Invert
    Invert,
    /// Light falloff
    LightFalloff,
    /// Mix RGB
    MixRgb,
    /// RGB curves
    RgbCurves,

    // Converter
    /// Blackbody
    Blackbody,
    /// Clamp
    Clamp,
    /// Color ramp
    ColorRamp,
    /// Combine HSV
    CombineHsv,
    /// Combine RGB
    CombineRgb,
    /// Combine XYZ
    CombineXyz,
    /// Math
    Math,
    /// RGB to BW
    RgbToBw,
    /// Separate HSV
    SeparateHsv,
    /// Separate RGB
    SeparateRgb,
    /// Separate XYZ
    SeparateXyz,
    /// Vector math
    VectorMath,
    /// Wavelength
    Wavelength,

    // Shader
    /// Ambient occlusion
    AmbientOcclusion,
    /// Principled BSDF
    PrincipledBsdf,
    /// Mix shader
    MixShader,
    /// Add shader
    AddShader,
    /// Diffuse BSDF
    DiffuseBsdf,
    /// Glossy BSDF
    GlossyBsdf,
    /// Transparent BSDF
    TransparentBsdf,
    /// Refraction BSDF
    RefractionBsdf,
    /// Glass BSDF
    GlassBsdf,
    /// Translucent BSDF
    TranslucentBsdf,
    /// Anisotropic BSDF
    AnisotropicBsdf,
    /// Velvet BSDF
    VelvetBsdf,
    /// Toon BSDF
    ToonBsdf,
    /// Subsurface scattering
    SubsurfaceScatter,
    /// Emission
    Emission,
    /// Hair BSDF
    HairBsdf,
    /// Holdout
    Holdout,
    /// Volume absorption
    VolAbsorb,
    /// Volume scatter
    VolScatter,

    // Texture
    /// External (3ds Max) texture slot
    MaxTex,
    /// Brick texture
    BrickTex,
    /// Checker texture
    CheckerTex,
    /// Gradient texture
    GradientTex,
    /// Magic texture
    MagicTex,
    /// Musgrave texture
    MusgraveTex,
    /// Noise texture
    NoiseTex,
    /// Voronoi texture
    VoronoiTex,
    /// Wave texture
    WaveTex,

    // Input
    /// Bevel
    Bevel,
    /// Light path
    LightPath,
    /// Fresnel
    Fresnel,
    /// Layer weight
    LayerWeight,
    /// Camera data
    CameraData,
    /// Tangent
    Tangent,
    /// Texture coordinate
    TexCoord,
    /// Geometry
    Geometry,
    /// Object info
    ObjectInfo,
    /// RGB constant
    Rgb,
    /// Value constant
    Value,
    /// Wireframe
    Wireframe,

    // Vector
    /// Bump
    Bump,
    /// Displacement
    Displacement,
    /// Normal map
    NormalMap,
    /// Vector transform
    VectorTransform,

    // Output
    /// Material output
    MaterialOutput,
}

impl NodeKind {
    /// Tag written as the first token of a node record
    pub fn tag(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Incompatible => "incompatible",
            Self::BrightContrast => "bright_contrast",
            Self::Gamma => "gamma",
            Self::Hsv => "hsv",
            Self::Invert => "invert",
            Self::LightFalloff => "light_falloff",
            Self::MixRgb => "mix_rgb",
            Self::RgbCurves => "rgb_curves",
            Self::Blackbody => "blackbody",
            Self::Clamp => "clamp",
            Self::ColorRamp => "color_ramp",
            Self::CombineHsv => "combine_hsv",
            Self::CombineRgb => "combine_rgb",
            Self::CombineXyz => "combine_xyz",
            Self::Math => "math",
            Self::RgbToBw => "rgb_to_bw",
            Self::SeparateHsv => "separate_hsv",
            Self::SeparateRgb => "separate_rgb",
            Self::SeparateXyz => "separate_xyz",
            Self::VectorMath => "vector_math",
            Self::Wavelength => "wavelength",
            Self::AmbientOcclusion => "ambient_occlusion",
            Self::PrincipledBsdf => "principled_bsdf",
            Self::MixShader => "mix_shader",
            Self::AddShader => "add_shader",
            Self::DiffuseBsdf => "diffuse_bsdf",
            Self::GlossyBsdf => "glossy_bsdf",
            Self::TransparentBsdf => "transparent_bsdf",
            Self::RefractionBsdf => "refraction_bsdf",
            Self::GlassBsdf => "glass_bsdf",
            Self::TranslucentBsdf => "translucent_bsdf",
            Self::AnisotropicBsdf => "anisotropic_bsdf",
            Self::VelvetBsdf => "velvet_bsdf",
            Self::ToonBsdf => "toon_bsdf",
            Self::SubsurfaceScatter => "subsurface_scatter",
            Self::Emission => "emission",
            Self::HairBsdf => "hair_bsdf",
            Self::Holdout => "holdout",
            Self::VolAbsorb => "vol_absorb",
            Self::VolScatter => "vol_scatter",
            Self::MaxTex => "max_tex",
            Self::BrickTex => "brick_tex",
            Self::CheckerTex => "checker_tex",
            Self::GradientTex => "gradient_tex",
            Self::MagicTex => "magic_tex",
            Self::MusgraveTex => "musgrave_tex",
            Self::NoiseTex => "noise_tex",
            Self::VoronoiTex => "voronoi_tex",
            Self::WaveTex => "wave_tex",
            Self::Bevel => "bevel",
            Self::LightPath => "light_path",
            Self::Fresnel => "fresnel",
            Self::LayerWeight => "layer_weight",
            Self::CameraData => "camera_data",
            Self::Tangent => "tangent",
            Self::TexCoord => "texture_coordinate",
            Self::Geometry => "geometry",
            Self::ObjectInfo => "object_info",
            Self::Rgb => "rgb",
            Self::Value => "value",
            Self::Wireframe => "wireframe",
            Self::Bump => "bump",
            Self::Displacement => "displacement",
            Self::NormalMap => "normal_map",
            Self::VectorTransform => "vector_transform",
            Self::MaterialOutput => "out_material",
        }
    }

    /// Whether nodes of this kind are written to the output
    pub fn is_exported(self) -> bool {
        !matches!(self, Self::Invalid | Self::Incompatible)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Host type identifier to kind, one row per supported host type
const HOST_KINDS: &[(&str, NodeKind)] = &[
    // Color
    ("ShaderNodeBrightContrast", NodeKind::BrightContrast),
    ("ShaderNodeGamma", NodeKind::Gamma),
    ("ShaderNodeHueSaturation", NodeKind::Hsv),
    ("ShaderNodeInvert", NodeKind::Invert),
    ("ShaderNodeLightFalloff", NodeKind::LightFalloff),
    ("ShaderNodeMixRGB", NodeKind::MixRgb),
    ("ShaderNodeRGBCurve", NodeKind::RgbCurves),
    // Converter
    ("ShaderNodeBlackbody", NodeKind::Blackbody),
    ("ShaderNodeClamp", NodeKind::Clamp),
    ("ShaderNodeValToRGB", NodeKind::ColorRamp),
    ("ShaderNodeCombineHSV", NodeKind::CombineHsv),
    ("ShaderNodeCombineRGB", NodeKind::CombineRgb),
    ("ShaderNodeCombineXYZ", NodeKind::CombineXyz),
    ("ShaderNodeMath", NodeKind::Math),
    ("ShaderNodeRGBToBW", NodeKind::RgbToBw),
    ("ShaderNodeSeparateHSV", NodeKind::SeparateHsv),
    ("ShaderNodeSeparateRGB", NodeKind::SeparateRgb),
    ("ShaderNodeSeparateXYZ", NodeKind::SeparateXyz),
    ("ShaderNodeVectorMath", NodeKind::VectorMath),
    ("ShaderNodeWavelength", NodeKind::Wavelength),
    // Shader
    ("ShaderNodeAmbientOcclusion", NodeKind::AmbientOcclusion),
    ("ShaderNodeBsdfPrincipled", NodeKind::PrincipledBsdf),
    ("ShaderNodeMixShader", NodeKind::MixShader),
    ("ShaderNodeAddShader", NodeKind::AddShader),
    ("ShaderNodeBsdfDiffuse", NodeKind::DiffuseBsdf),
    ("ShaderNodeBsdfGlossy", NodeKind::GlossyBsdf),
    ("ShaderNodeBsdfTransparent", NodeKind::TransparentBsdf),
    ("ShaderNodeBsdfRefraction", NodeKind::RefractionBsdf),
    ("ShaderNodeBsdfGlass", NodeKind::GlassBsdf),
    ("ShaderNodeBsdfTranslucent", NodeKind::TranslucentBsdf),
    ("ShaderNodeBsdfAnisotropic", NodeKind::AnisotropicBsdf),
    ("ShaderNodeBsdfVelvet", NodeKind::VelvetBsdf),
    ("ShaderNodeBsdfToon", NodeKind::ToonBsdf),
    ("ShaderNodeSubsurfaceScattering", NodeKind::SubsurfaceScatter),
    ("ShaderNodeEmission", NodeKind::Emission),
    ("ShaderNodeBsdfHair", NodeKind::HairBsdf),
    ("ShaderNodeHoldout", NodeKind::Holdout),
    ("ShaderNodeVolumeAbsorption", NodeKind::VolAbsorb),
    ("ShaderNodeVolumeScatter", NodeKind::VolScatter),
    // Texture
    ("ShaderNodeTexBrick", NodeKind::BrickTex),
    ("ShaderNodeTexChecker", NodeKind::CheckerTex),
    ("ShaderNodeTexGradient", NodeKind::GradientTex),
    ("ShaderNodeTexMagic", NodeKind::MagicTex),
    ("ShaderNodeTexMusgrave", NodeKind::MusgraveTex),
    ("ShaderNodeTexNoise", NodeKind::NoiseTex),
    ("ShaderNodeTexVoronoi", NodeKind::VoronoiTex),
    ("ShaderNodeTexWave", NodeKind::WaveTex),
    // Input
    ("ShaderNodeBevel", NodeKind::Bevel),
    ("ShaderNodeLightPath", NodeKind::LightPath),
    ("ShaderNodeFresnel", NodeKind::Fresnel),
    ("ShaderNodeLayerWeight", NodeKind::LayerWeight),
    ("ShaderNodeCameraData", NodeKind::CameraData),
    ("ShaderNodeTangent", NodeKind::Tangent),
    ("ShaderNodeTexCoord", NodeKind::TexCoord),
    ("ShaderNodeNewGeometry", NodeKind::Geometry),
    ("ShaderNodeObjectInfo", NodeKind::ObjectInfo),
    ("ShaderNodeRGB", NodeKind::Rgb),
    ("ShaderNodeValue", NodeKind::Value),
    ("ShaderNodeWireframe", NodeKind::Wireframe),
    // Vector
    ("ShaderNodeBump", NodeKind::Bump),
    ("ShaderNodeDisplacement", NodeKind::Displacement),
    ("ShaderNodeNormalMap", NodeKind::NormalMap),
    ("ShaderNodeVectorTransform", NodeKind::VectorTransform),
    // Output
    ("ShaderNodeOutputMaterial", NodeKind::MaterialOutput),
];

/// Host types introduced by newer host generations that replace nodes this
/// schema expresses differently. Re-saving the file in a matching host
/// version converts them back.
const INCOMPATIBLE_TYPES: &[&str] = &[
    "ShaderNodeMix",
    "ShaderNodeSeparateColor",
    "ShaderNodeCombineColor",
    "ShaderNodeBsdfSheen",
];

static GLOBAL_REGISTRY: LazyLock<NodeKindRegistry> = LazyLock::new(NodeKindRegistry::new);

/// Lookup from host type identifier to [`NodeKind`]
///
/// Read-only once built; one instance can back any number of serializations.
#[derive(Debug)]
pub struct NodeKindRegistry {
    kinds: IndexMap<&'static str, NodeKind>,
}

impl NodeKindRegistry {
    /// Build the registry from the built-in table
    pub fn new() -> Self {
        Self {
            kinds: HOST_KINDS.iter().copied().collect(),
        }
    }

    /// Shared registry instance
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Kind registered for a host type, if any
    pub fn lookup(&self, type_id: &str) -> Option<NodeKind> {
        self.kinds.get(type_id).copied()
    }

    /// Whether a host type is on the fixed incompatible list
    pub fn is_incompatible(&self, type_id: &str) -> bool {
        INCOMPATIBLE_TYPES.contains(&type_id)
    }

    /// All registered host types with their kinds, in table order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, NodeKind)> + '_ {
        self.kinds.iter().map(|(id, kind)| (*id, *kind))
    }

    /// Number of registered host types
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for NodeKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_no_duplicates() {
        let registry = NodeKindRegistry::new();
        assert_eq!(registry.len(), HOST_KINDS.len());

        let kinds: HashSet<_> = registry.entries().map(|(_, kind)| kind).collect();
        assert_eq!(kinds.len(), registry.len());
    }

    #[test]
    fn test_registry_only_holds_exported_kinds() {
        let registry = NodeKindRegistry::global();
        assert!(registry.entries().all(|(_, kind)| kind.is_exported()));
        // Image textures are handled as a special case, never through the table
        assert_eq!(registry.lookup(IMAGE_TEXTURE_TYPE), None);
        assert!(registry.entries().all(|(_, kind)| kind != NodeKind::MaxTex));
    }

    #[test]
    fn test_lookup() {
        let registry = NodeKindRegistry::global();
        assert_eq!(registry.lookup("ShaderNodeValue"), Some(NodeKind::Value));
        assert_eq!(registry.lookup("ShaderNodeOutputMaterial"), Some(NodeKind::MaterialOutput));
        assert_eq!(registry.lookup("ShaderNodeUnknown"), None);
        assert_eq!(NodeKind::TexCoord.tag(), "texture_coordinate");
        assert_eq!(NodeKind::MaterialOutput.to_string(), "out_material");
    }

    #[test]
    fn test_incompatible_types_are_not_registered() {
        let registry = NodeKindRegistry::global();
        for type_id in INCOMPATIBLE_TYPES {
            assert!(registry.is_incompatible(type_id));
            assert_eq!(registry.lookup(type_id), None);
        }
        assert!(!registry.is_incompatible("ShaderNodeMixRGB"));
    }
}
