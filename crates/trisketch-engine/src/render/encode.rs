use super::frame::FramePlan;
use super::pipeline::TrianglePipeline;
use super::vertex::VertexBuffer;

/// GPU objects a frame plan's draw call runs against.
///
/// `pipeline` is `None` when the program failed to compile or link; frames
/// are then cleared but nothing is drawn.
#[derive(Copy, Clone)]
pub struct DrawBindings<'a> {
    pub pipeline: Option<&'a TrianglePipeline>,
    pub vertices: &'a VertexBuffer,
}

/// Records `plan` into `encoder` as a single render pass targeting `view`.
///
/// `target_size` is the size of the texture behind `view`. Returns `true` if
/// the draw call was recorded.
pub fn encode_plan(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    target_size: (u32, u32),
    plan: &FramePlan,
    bindings: DrawBindings<'_>,
) -> bool {
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("trisketch frame pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(plan.clear.to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    let Some(draw) = plan.draw else { return false };
    let Some(pipeline) = bindings.pipeline else { return false };

    if draw.topology != pipeline.topology() {
        log::warn!(
            "draw topology {:?} does not match pipeline topology {:?}; skipped",
            draw.topology,
            pipeline.topology()
        );
        return false;
    }

    let Some(vp) = plan.viewport.clamped_to(target_size.0, target_size.1) else {
        return false;
    };

    let available = bindings.vertices.vertex_count();
    let mut range = draw.vertices();
    if range.end > available {
        log::warn!("draw of {:?} exceeds {available} uploaded vertices; clamped", range);
        range.end = available;
        range.start = range.start.min(available);
    }

    rpass.set_viewport(vp.x as f32, vp.y as f32, vp.width as f32, vp.height as f32, 0.0, 1.0);
    rpass.set_pipeline(pipeline.raw());
    rpass.set_vertex_buffer(0, bindings.vertices.slice());
    rpass.draw(range, 0..1);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{ColorRgba, Viewport};
    use crate::device::{GpuInit, GraphicsProfile, HeadlessGpu};
    use crate::render::readback::map_read;
    use crate::render::{build_triangle_program, DrawCall, TRIANGLE_VERTICES};

    const W: u32 = 400;
    const H: u32 = 300;
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn headless() -> HeadlessGpu {
        HeadlessGpu::block_on(&GpuInit {
            profile: GraphicsProfile::Compatibility,
            ..GpuInit::default()
        })
        .expect("no GPU adapter")
    }

    /// Renders one plan offscreen and returns tightly packed RGBA rows.
    fn render_offscreen(gpu: &HeadlessGpu, plan: &FramePlan, with_pipeline: bool) -> (Vec<u8>, bool) {
        let device = &gpu.device;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen target"),
            size: wgpu::Extent3d {
                width: W,
                height: H,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let vertices = VertexBuffer::upload(device, &TRIANGLE_VERTICES);
        let program = build_triangle_program().unwrap();
        let pipeline = TrianglePipeline::new(device, FORMAT, &program);

        let padded_row = (W * 4).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen staging"),
            size: (padded_row * H) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("offscreen encoder"),
        });
        let drew = encode_plan(
            &mut encoder,
            &view,
            (W, H),
            plan,
            DrawBindings {
                pipeline: with_pipeline.then_some(&pipeline),
                vertices: &vertices,
            },
        );
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(H),
                },
            },
            wgpu::Extent3d {
                width: W,
                height: H,
                depth_or_array_layers: 1,
            },
        );
        gpu.queue.submit(std::iter::once(encoder.finish()));

        let raw = map_read(device, &staging).unwrap();
        let mut packed = Vec::with_capacity((W * H * 4) as usize);
        for row in raw.chunks(padded_row as usize) {
            packed.extend_from_slice(&row[..(W * 4) as usize]);
        }
        (packed, drew)
    }

    fn pixel(rgba: &[u8], x: u32, y: u32) -> [u8; 4] {
        let i = ((y * W + x) * 4) as usize;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    fn close(a: [u8; 4], b: [u8; 4]) -> bool {
        a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
    }

    fn plan() -> FramePlan {
        FramePlan {
            viewport: Viewport::full(W, H),
            clear: ColorRgba::new(0.2, 0.3, 0.3, 1.0),
            draw: Some(DrawCall::triangles(3)),
        }
    }

    #[test]
    #[ignore = "needs a GPU adapter"]
    fn triangle_covers_center_and_clear_fills_corner() {
        let gpu = headless();

        let (rgba, drew) = render_offscreen(&gpu, &plan(), true);
        assert!(drew);

        let (cx, cy) = Viewport::full(W, H).ndc_to_pixel(0.0, 0.0);
        assert!(close(pixel(&rgba, cx as u32, cy as u32), [255, 128, 51, 255]));
        assert!(close(pixel(&rgba, 2, 2), [51, 77, 77, 255]));
    }

    #[test]
    #[ignore = "needs a GPU adapter"]
    fn missing_pipeline_clears_only() {
        let gpu = headless();

        let (rgba, drew) = render_offscreen(&gpu, &plan(), false);
        assert!(!drew);

        let (cx, cy) = Viewport::full(W, H).ndc_to_pixel(0.0, 0.0);
        assert!(close(pixel(&rgba, cx as u32, cy as u32), [51, 77, 77, 255]));
    }
}
