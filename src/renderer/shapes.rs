//! Shape primitives - triangles for dots and edges

use super::overlay::Overlay;

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[cfg(target_arch = "wasm32")]
impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Canvas pixels (origin top-left) to clip space (-1 to 1, Y up)
pub fn to_clip_space(pos: (f32, f32), canvas_size: f32) -> (f32, f32) {
    (pos.0 / canvas_size * 2.0 - 1.0, -(pos.1 / canvas_size * 2.0 - 1.0))
}

/// Generate vertices for a filled circle (triangle fan)
pub fn create_circle_vertices(
    cx: f32,
    cy: f32,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let angle1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let angle2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        vertices.push(Vertex { position: [cx, cy], color });
        vertices.push(Vertex {
            position: [cx + radius * angle1.cos(), cy + radius * angle1.sin()],
            color,
        });
        vertices.push(Vertex {
            position: [cx + radius * angle2.cos(), cy + radius * angle2.sin()],
            color,
        });
    }

    vertices
}

/// Generate vertices for a line segment (rendered as a quad of `width`)
pub fn create_line_vertices(
    x1: f32, y1: f32,
    x2: f32, y2: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 { return vec![]; }

    // Perpendicular offset, half the width on each side
    let px = -dy / len * width * 0.5;
    let py = dx / len * width * 0.5;

    vec![
        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x1 + px, y1 + py], color },
        Vertex { position: [x2 + px, y2 + py], color },

        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x2 + px, y2 + py], color },
        Vertex { position: [x2 - px, y2 - py], color },
    ]
}

/// Tessellate an overlay: edges first, dots on top
pub fn tessellate(overlay: &Overlay, canvas_size: f32) -> Vec<Vertex> {
    // one canvas pixel in clip units
    let px = 2.0 / canvas_size;
    let mut vertices = Vec::new();

    for seg in &overlay.segments {
        let (x1, y1) = to_clip_space(seg.from, canvas_size);
        let (x2, y2) = to_clip_space(seg.to, canvas_size);
        vertices.extend(create_line_vertices(x1, y1, x2, y2, seg.width * px, seg.color));
    }

    for dot in &overlay.dots {
        let (x, y) = to_clip_space(dot.center, canvas_size);
        let r = dot.radius * px;
        vertices.extend(create_circle_vertices(x, y, r, dot.color, 16));
    }

    vertices
}
