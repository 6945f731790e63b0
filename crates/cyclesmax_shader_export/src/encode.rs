// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compact string encodings for curve mappings and color ramps.

use cyclesmax_shader_graph::{ColorRamp, Curve, CurveMapping, HandleType};

/// Leading tokens of an encoded curve set
const CURVE_HEADER: [&str; 2] = ["curve_rgb_00", "00"];

/// Leading token of an encoded ramp
const RAMP_HEADER: &str = "ramp00";

/// Shortest decimal form of a float that still reads back to the same value.
///
/// Whole numbers keep a trailing `.0`.
fn number(value: f32) -> String {
    format!("{value:?}")
}

fn in_unit_range(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Encode one curve channel as comma-joined `x,y,h|l` triples.
///
/// Points outside the unit square are dropped.
pub fn encode_curve(curve: &Curve) -> String {
    let mut parts = Vec::with_capacity(curve.points.len() * 3);
    for point in &curve.points {
        let [x, y] = point.location;
        if !in_unit_range(x) || !in_unit_range(y) {
            continue;
        }
        parts.push(number(x));
        parts.push(number(y));
        parts.push(match point.handle_type {
            HandleType::Vector => "l".to_string(),
            HandleType::Auto | HandleType::AutoClamped => "h".to_string(),
        });
    }
    parts.join(",")
}

/// Encode an RGB curve mapping.
///
/// The host stores channels as red, green, blue, combined; the encoding
/// writes combined first. Returns `None` unless exactly four channels exist.
pub fn encode_curves(mapping: &CurveMapping) -> Option<String> {
    let [red, green, blue, combined] = mapping.curves.as_slice() else {
        return None;
    };

    let mut parts: Vec<String> = CURVE_HEADER.iter().map(ToString::to_string).collect();
    parts.extend([combined, red, green, blue].into_iter().map(encode_curve));
    Some(parts.join("/"))
}

/// Encode a color ramp as `ramp00,` followed by `position,r,g,b,alpha` per stop.
///
/// Stops are written in position order; stops sharing a position keep their
/// host order.
pub fn encode_ramp(ramp: &ColorRamp) -> String {
    let mut elements: Vec<_> = ramp.elements.iter().collect();
    elements.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut parts = Vec::with_capacity(1 + elements.len() * 5);
    parts.push(RAMP_HEADER.to_string());
    for element in elements {
        let [r, g, b, _] = element.color;
        parts.extend([element.position, r, g, b, element.alpha()].map(number));
    }
    parts.join(",")
}
