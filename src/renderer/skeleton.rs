//! Skeleton rendering - draws the pose overlay for the current frame

use log::warn;

use super::overlay::build_overlay;
use super::shapes::{tessellate, Vertex};
use super::state::{GPU_STATE, MAX_VERTICES};
use crate::bridge;

/// Transparent clear so the mirrored `<video>` underneath stays visible
const CLEAR: wgpu::Color = wgpu::Color::TRANSPARENT;

/// Build vertex data for the latest pose, empty before the first pose
fn build_frame_vertices() -> Vec<Vertex> {
    let (highlight, config) = bridge::with_session(|s| (s.highlight_back(), s.config().clone()));
    bridge::with_latest_pose(|pose| match pose {
        Some(pose) => tessellate(&build_overlay(pose, highlight, &config), config.canvas_size as f32),
        None => Vec::new(),
    })
}

/// Render one frame of keypoints and skeleton edges
pub fn render_frame() {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };

        let mut vertices = build_frame_vertices();
        if vertices.len() > MAX_VERTICES {
            warn!("overlay has {} vertices, clipping to {}", vertices.len(), MAX_VERTICES);
            vertices.truncate(MAX_VERTICES - MAX_VERTICES % 3);
        }

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Overlay Encoder") }
        );

        if !vertices.is_empty() {
            state.queue.write_buffer(
                &state.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
