use core::fmt;
use core::mem::size_of;
use core::str::FromStr;

/// Describes one attribute of a vertex buffer made entirely of `f32`s. This is the information
/// OpenGL needs in `glVertexAttribPointer` to know how to walk the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The `layout (location = N)` the shader reads this attribute from
    pub index: u32,
    /// Number of floats per vertex for this attribute (1 to 4)
    pub components: i32,
    /// Distance between consecutive vertices, in floats
    pub stride: usize,
    /// Where the attribute starts inside a vertex, in floats
    pub offset: usize,
}

impl VertexAttribute {
    pub const fn new(index: u32, components: i32, stride: usize, offset: usize) -> Self {
        Self { index, components, stride, offset }
    }

    pub const fn stride_bytes(&self) -> usize {
        self.stride * size_of::<f32>()
    }

    pub const fn offset_bytes(&self) -> usize {
        self.offset * size_of::<f32>()
    }
}

/// `aPos` in the vertex shader: three tightly packed floats per vertex.
pub const POSITION_ATTRIBUTE: VertexAttribute = VertexAttribute::new(0, 3, 3, 0);

/// How the quad gets submitted to the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Four shared vertices plus an element buffer, drawn with `glDrawElements`
    Indexed,
    /// Six vertices (two triangles spelled out in full), drawn with `glDrawArrays`
    Arrays,
}

impl DrawMode {
    pub const VARIANTS: [&'static str; 2] = ["indexed", "arrays"];

    pub fn name(self) -> &'static str {
        match self {
            DrawMode::Indexed => "indexed",
            DrawMode::Arrays => "arrays",
        }
    }
}

impl Default for DrawMode {
    fn default() -> Self {
        DrawMode::Indexed
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDrawModeError;

impl fmt::Display for ParseDrawModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw mode must be one of {:?}", DrawMode::VARIANTS)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDrawModeError {}

impl FromStr for DrawMode {
    type Err = ParseDrawModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("indexed") {
            Ok(DrawMode::Indexed)
        } else if s.eq_ignore_ascii_case("arrays") {
            Ok(DrawMode::Arrays)
        } else {
            Err(ParseDrawModeError)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn position_attribute_is_tightly_packed_vec3() {
        assert_eq!(POSITION_ATTRIBUTE.index, 0);
        assert_eq!(POSITION_ATTRIBUTE.components, 3);
        assert_eq!(POSITION_ATTRIBUTE.stride_bytes(), 12);
        assert_eq!(POSITION_ATTRIBUTE.offset_bytes(), 0);
    }

    #[test]
    fn interleaved_attribute_offsets_are_in_bytes() {
        // position + uv, uv starts after the three position floats
        let uv = VertexAttribute::new(1, 2, 5, 3);
        assert_eq!(uv.stride_bytes(), 20);
        assert_eq!(uv.offset_bytes(), 12);
    }

    #[test]
    fn draw_mode_parses_ignoring_case_and_whitespace() {
        assert_eq!("indexed".parse::<DrawMode>(), Ok(DrawMode::Indexed));
        assert_eq!(" Arrays ".parse::<DrawMode>(), Ok(DrawMode::Arrays));
        assert_eq!("INDEXED".parse::<DrawMode>(), Ok(DrawMode::Indexed));
        assert_eq!("strips".parse::<DrawMode>(), Err(ParseDrawModeError));
        assert_eq!("".parse::<DrawMode>(), Err(ParseDrawModeError));
    }

    #[test]
    fn draw_mode_names_parse_back() {
        for name in DrawMode::VARIANTS.iter() {
            let mode: DrawMode = name.parse().unwrap();
            assert_eq!(mode.name(), *name);
        }
        assert_eq!(DrawMode::default(), DrawMode::Indexed);
    }
}
