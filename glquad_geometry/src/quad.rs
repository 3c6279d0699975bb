use core::mem::size_of;

use crate::layout::{DrawMode, VertexAttribute, POSITION_ATTRIBUTE};

/// The corners of the quad in normalized device coordinates.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

/// Two triangles sharing the top-right/bottom-left diagonal, referring into [`QUAD_VERTICES`].
#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

/// The same two triangles with every vertex written out, for drawing without an element buffer.
#[rustfmt::skip]
pub const QUAD_TRIANGLES: [f32; 18] = [
     0.5,  0.5, 0.0,
     0.5, -0.5, 0.0,
    -0.5,  0.5, 0.0,

     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.5,  0.5, 0.0,
];

/// Vertex data ready to be copied into GPU buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh<'a> {
    pub vertices: &'a [f32],
    pub indices: Option<&'a [u32]>,
    pub layout: VertexAttribute,
}

impl Mesh<'static> {
    pub fn quad(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Indexed => Mesh {
                vertices: &QUAD_VERTICES,
                indices: Some(&QUAD_INDICES),
                layout: POSITION_ATTRIBUTE,
            },
            DrawMode::Arrays => Mesh {
                vertices: &QUAD_TRIANGLES,
                indices: None,
                layout: POSITION_ATTRIBUTE,
            },
        }
    }
}

impl<'a> Mesh<'a> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride
    }

    /// The count to hand to the draw call: indices when there's an element buffer, vertices
    /// otherwise.
    pub fn element_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    pub fn vertex_bytes(&self) -> usize {
        self.vertices.len() * size_of::<f32>()
    }

    pub fn index_bytes(&self) -> usize {
        self.indices.map_or(0, |i| i.len() * size_of::<u32>())
    }

    /// The attribute data of the `n`-th corner drawn, resolving indices if present. `None` past
    /// the last corner, or if an index points outside the vertex data.
    pub fn triangle_corner(&self, n: usize) -> Option<&'a [f32]> {
        let vertex = match self.indices {
            Some(indices) => *indices.get(n)? as usize,
            None if n < self.vertex_count() => n,
            None => return None,
        };
        let start = vertex * self.layout.stride + self.layout.offset;
        self.vertices.get(start..start + self.layout.components as usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indexed_quad_reuses_four_vertices() {
        let mesh = Mesh::quad(DrawMode::Indexed);

        assert!(mesh.is_indexed());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.element_count(), 6);
        assert_eq!(mesh.vertex_bytes(), 48);
        assert_eq!(mesh.index_bytes(), 24);
    }

    #[test]
    fn array_quad_spells_out_six_vertices() {
        let mesh = Mesh::quad(DrawMode::Arrays);

        assert!(!mesh.is_indexed());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.element_count(), 6);
        assert_eq!(mesh.vertex_bytes(), 72);
        assert_eq!(mesh.index_bytes(), 0);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = Mesh::quad(DrawMode::Indexed);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn vertices_are_in_ndc() {
        let all = QUAD_VERTICES.iter().chain(QUAD_TRIANGLES.iter());
        for v in all {
            assert!(*v >= -1.0 && *v <= 1.0);
        }
        assert_eq!(QUAD_VERTICES.len() % POSITION_ATTRIBUTE.components as usize, 0);
        assert_eq!(QUAD_TRIANGLES.len() % POSITION_ATTRIBUTE.components as usize, 0);
    }

    #[test]
    fn both_modes_draw_the_same_triangles() {
        let indexed = Mesh::quad(DrawMode::Indexed);
        let arrays = Mesh::quad(DrawMode::Arrays);

        for n in 0..6 {
            assert!(indexed.triangle_corner(n).is_some());
            assert_eq!(indexed.triangle_corner(n), arrays.triangle_corner(n));
        }
    }

    #[test]
    fn first_triangle_is_top_right_bottom_right_top_left() {
        let mesh = Mesh::quad(DrawMode::Indexed);
        assert_eq!(mesh.triangle_corner(0), Some(&[0.5, 0.5, 0.0][..]));
        assert_eq!(mesh.triangle_corner(1), Some(&[0.5, -0.5, 0.0][..]));
        assert_eq!(mesh.triangle_corner(2), Some(&[-0.5, 0.5, 0.0][..]));
    }

    #[test]
    fn corners_past_the_end_are_none() {
        for mode in [DrawMode::Indexed, DrawMode::Arrays].iter() {
            let mesh = Mesh::quad(*mode);
            assert!(mesh.triangle_corner(mesh.element_count() - 1).is_some());
            assert_eq!(mesh.triangle_corner(mesh.element_count()), None);
            assert_eq!(mesh.triangle_corner(usize::MAX), None);
        }
    }

    #[test]
    fn corners_follow_the_layout() {
        // position + uv, reading only the two uv floats
        let vertices = [0.1, 0.2, 0.3, 0.0, 1.0, 0.4, 0.5, 0.6, 1.0, 0.0];
        let mesh = Mesh {
            vertices: &vertices,
            indices: Some(&[1, 0, 7][..]),
            layout: VertexAttribute::new(1, 2, 5, 3),
        };

        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.triangle_corner(0), Some(&[1.0, 0.0][..]));
        assert_eq!(mesh.triangle_corner(1), Some(&[0.0, 1.0][..]));
        assert_eq!(mesh.triangle_corner(2), None);
    }
}
