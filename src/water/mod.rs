//! Water surface mesh displaced by traveling wavefronts and ambient swell.

mod heightfield;

use glam::Vec3;

use crate::mesh::Vertex;
use crate::params::WaterParams;

pub use heightfield::{front_contribution, swell_height, HeightField};

/// Square water grid in the XZ plane, centered on the origin
pub struct WaterGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    resolution: usize,
    spacing: f32,
}

impl WaterGrid {
    /// Create a flat grid with specified parameters
    pub fn new(params: &WaterParams) -> Self {
        let resolution = params.resolution;
        let spacing = params.grid_spacing_m();
        let half_size = params.size_m / 2.0;

        let mut vertices = Vec::with_capacity((resolution + 1).pow(2));
        let mut indices = Vec::with_capacity(resolution.pow(2) * 6);

        // Row-major: z outer, x inner
        for z in 0..=resolution {
            for x in 0..=resolution {
                vertices.push(Vertex {
                    position: [
                        x as f32 * spacing - half_size,
                        0.0,
                        z as f32 * spacing - half_size,
                    ],
                    normal: [0.0, 1.0, 0.0],
                });
            }
        }

        // Counter-clockwise seen from above (+Y)
        for z in 0..resolution {
            for x in 0..resolution {
                let top_left = (z * (resolution + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (resolution + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            resolution,
            spacing,
        }
    }

    /// Vertices per side
    pub fn side(&self) -> usize {
        self.resolution + 1
    }

    pub fn height(&self, x: usize, z: usize) -> f32 {
        self.vertices[z * self.side() + x].position[1]
    }

    /// Write a height for every vertex from its (x, z) position, then refresh normals
    pub fn displace(&mut self, mut height_at: impl FnMut(f32, f32) -> f32) {
        for vertex in &mut self.vertices {
            vertex.position[1] = height_at(vertex.position[0], vertex.position[2]);
        }
        self.recompute_normals();
    }

    /// Central-difference normals (one-sided at the borders)
    pub fn recompute_normals(&mut self) {
        let side = self.side();
        for z in 0..side {
            for x in 0..side {
                let (left, right) = (x.saturating_sub(1), (x + 1).min(side - 1));
                let (up, down) = (z.saturating_sub(1), (z + 1).min(side - 1));

                let dx = (right - left) as f32 * self.spacing;
                let dz = (down - up) as f32 * self.spacing;
                let slope_x = (self.height(right, z) - self.height(left, z)) / dx;
                let slope_z = (self.height(x, down) - self.height(x, up)) / dz;

                let normal = Vec3::new(-slope_x, 1.0, -slope_z).normalize();
                self.vertices[z * side + x].normal = normal.to_array();
            }
        }
    }
}
