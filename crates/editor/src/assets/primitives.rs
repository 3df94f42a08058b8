//! Box geometry for fallback and loading primitives, for hosts that render
//! primitives without their own geometry library.

use glam::Vec3;

/// Interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }
}

/// Line list: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Debug, Clone, PartialEq)]
pub struct LineMeshData {
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 14
    }
}

fn corners(w: f32, h: f32, d: f32) -> [Vec3; 8] {
    let (hw, hh, hd) = (w * 0.5, h * 0.5, d * 0.5);
    [
        Vec3::new(-hw, -hh, -hd),
        Vec3::new(hw, -hh, -hd),
        Vec3::new(hw, -hh, hd),
        Vec3::new(-hw, -hh, hd),
        Vec3::new(-hw, hh, -hd),
        Vec3::new(hw, hh, -hd),
        Vec3::new(hw, hh, hd),
        Vec3::new(-hw, hh, hd),
    ]
}

/// Solid box centered at the origin
pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            vertices.extend_from_slice(&[v.x, v.y, v.z, normal.x, normal.y, normal.z, color[0], color[1], color[2]]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// The 12 edges of a box, for wireframe placeholders
pub fn wire_box(w: f32, h: f32, d: f32, color: [f32; 4]) -> LineMeshData {
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let c = corners(w, h, d);
    let mut vertices = Vec::with_capacity(EDGES.len() * 14);
    for (a, b) in EDGES {
        for p in [c[a], c[b]] {
            vertices.extend_from_slice(&[p.x, p.y, p.z, color[0], color[1], color[2], color[3]]);
        }
    }
    LineMeshData { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_24_vertices() {
        let m = cube(2.0, 0.6, 2.2, [1.0, 0.0, 0.0]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.indices.len(), 36);
        let max_y = m.vertices.chunks(9).map(|v| v[1]).fold(f32::MIN, f32::max);
        assert!((max_y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn wire_box_edges() {
        let l = wire_box(1.0, 1.0, 1.0, [0.67, 0.67, 0.67, 0.5]);
        assert_eq!(l.segment_count(), 12);
    }
}
