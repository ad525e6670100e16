//! # Primitive Shape Generation
//!
//! All shapes are centered at the origin, Y-up, with outward normals and
//! counter-clockwise front faces.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate an axis-aligned box centered at the origin
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, four corners counter-clockwise as seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // Front (+Z)
        ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
        // Back (-Z)
        ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
        // Left (-X)
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
        // Right (+X)
        ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
        // Top (+Y)
        ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
        // Bottom (-Y)
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
    ];

    let mut data = GeometryData::new();
    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.push_vertex(corner, normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a closed cone with its apex on +Y
///
/// # Arguments
/// * `radius` - Base radius
/// * `height` - Apex-to-base height; the base sits at `-height / 2`
/// * `radial_segments` - Number of sides (clamped to at least 3)
///
/// The first rim vertex lies on +Z and the rim proceeds towards +X, so a
/// four-segment cone has its corners on the axes. Side normals are smoothed
/// around the circumference; the base cap is flat.
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = if height > 0.0 { radius / height } else { 0.0 };

    // Side: an apex ring and a rim ring, both with a duplicated seam vertex
    // so each side face gets its own normal pair.
    let mut apex = Vec::with_capacity(segs as usize + 1);
    let mut rim = Vec::with_capacity(segs as usize + 1);
    for i in 0..=segs {
        let theta = i as f32 / segs as f32 * 2.0 * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        let normal = normalize([sin_t, slope, cos_t]);

        apex.push(data.push_vertex([0.0, half_height, 0.0], normal));
        rim.push(data.push_vertex([radius * sin_t, -half_height, radius * cos_t], normal));
    }

    for i in 0..segs as usize {
        data.indices.extend_from_slice(&[rim[i], rim[i + 1], apex[i + 1]]);
    }

    // Base cap
    let center = data.push_vertex([0.0, -half_height, 0.0], [0.0, -1.0, 0.0]);
    let cap_start = data.vertices.len() as u32;
    for i in 0..segs {
        let theta = i as f32 / segs as f32 * 2.0 * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        data.push_vertex([radius * sin_t, -half_height, radius * cos_t], [0.0, -1.0, 0.0]);
    }
    for i in 0..segs {
        let current = cap_start + i;
        let next = cap_start + (i + 1) % segs;
        data.indices.extend_from_slice(&[next, current, center]);
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for row in 0..=h_segs {
        let pos_y = (row as f32 / h_segs as f32 - 0.5) * height;
        for col in 0..=w_segs {
            let pos_x = (col as f32 / w_segs as f32 - 0.5) * width;
            data.push_vertex([pos_x, pos_y, 0.0], [0.0, 0.0, 1.0]);
        }
    }

    for row in 0..h_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let above = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, above]);
            data.indices.extend_from_slice(&[i + 1, above + 1, above]);
        }
    }

    data
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every triangle's winding must agree with its vertex normals
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| data.vertices[tri[k] as usize]);
            let face = cross(sub(b, a), sub(c, a));
            let normal = data.normals[tri[0] as usize];
            assert!(dot(face, normal) > 0.0, "triangle {:?} is wound inwards", tri);
        }
    }

    #[test]
    fn test_box_generation() {
        let walls = generate_box(2.0, 1.5, 2.0);
        assert_eq!(walls.vertex_count(), 24);
        assert_eq!(walls.triangle_count(), 12);
        assert_outward_winding(&walls);

        let max_y = walls.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_y = walls.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 0.75);
        assert_eq!(min_y, -0.75);
    }

    #[test]
    fn test_cone_generation() {
        let roof = generate_cone(1.8, 1.0, 4);
        // 2 side rings of 5, cap center + 4 rim vertices
        assert_eq!(roof.vertex_count(), 15);
        // 4 side faces + 4 cap triangles
        assert_eq!(roof.triangle_count(), 8);
        assert_eq!(roof.vertices.len(), roof.normals.len());
        assert_outward_winding(&roof);
    }

    #[test]
    fn cone_corners_start_on_positive_z() {
        let roof = generate_cone(1.8, 1.0, 4);
        let first_rim = roof.vertices[1];
        assert!(first_rim[0].abs() < 1e-6);
        assert!((first_rim[2] - 1.8).abs() < 1e-6);
        assert_eq!(first_rim[1], -0.5);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_outward_winding(&plane);
    }

    #[test]
    fn degenerate_segments_are_clamped() {
        assert_eq!(generate_cone(1.0, 1.0, 1).triangle_count(), 6);
        assert_eq!(generate_plane(1.0, 1.0, 0, 0).triangle_count(), 2);
    }
}
