use glam::{Vec2, Vec3};
use morph_core::{star_outline, STAR_DEPTH, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list in model space.
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn push(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }

    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = corners.map(|c| self.push(c, normal));
        self.indices
            .extend_from_slice(&[base[0], base[1], base[2], base[0], base[2], base[3]]);
    }
}

/// Unit-radius UV sphere for baubles.
pub fn sphere(segments: u16, rings: u16) -> Mesh {
    let mut mesh = Mesh::new();
    for ring in 0..=rings {
        let polar = ring as f32 / rings as f32 * std::f32::consts::PI;
        for seg in 0..=segments {
            let azimuth = seg as f32 / segments as f32 * std::f32::consts::TAU;
            let n = Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            );
            mesh.push(n, n);
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Unit cube centred on the origin for gifts.
pub fn cube() -> Mesh {
    let mut mesh = Mesh::new();
    let h = 0.5;
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for sign in [1.0, -1.0] {
            let n = axis * sign;
            // two tangents spanning the face
            let u = if axis == Vec3::Y { Vec3::Z } else { Vec3::Y };
            let v = n.cross(u);
            let c = n * h;
            mesh.quad(
                [
                    c - u * h - v * h,
                    c + u * h - v * h,
                    c + u * h + v * h,
                    c - u * h + v * h,
                ],
                n,
            );
        }
    }
    mesh
}

/// Extruded star prism facing +Z.
pub fn star() -> Mesh {
    let outline = star_outline(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS);
    let half = STAR_DEPTH * 0.5;
    let mut mesh = Mesh::new();

    for (z, n) in [(half, Vec3::Z), (-half, -Vec3::Z)] {
        let centre = mesh.push(Vec3::new(0.0, 0.0, z), n);
        let ring: Vec<u16> = outline
            .iter()
            .map(|p| mesh.push(p.extend(z), n))
            .collect();
        for i in 0..ring.len() {
            let next = ring[(i + 1) % ring.len()];
            mesh.indices.extend_from_slice(&[centre, ring[i], next]);
        }
    }

    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        let edge: Vec2 = b - a;
        let n = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
        mesh.quad(
            [a.extend(half), a.extend(-half), b.extend(-half), b.extend(half)],
            n,
        );
    }
    mesh
}
