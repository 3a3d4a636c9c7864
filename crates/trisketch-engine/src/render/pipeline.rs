use super::shader::LinkedProgram;
use super::vertex::Vertex;

/// Render pipeline for the linked triangle program.
pub struct TrianglePipeline {
    pipeline: wgpu::RenderPipeline,
    topology: wgpu::PrimitiveTopology,
}

impl TrianglePipeline {
    pub const TOPOLOGY: wgpu::PrimitiveTopology = wgpu::PrimitiveTopology::TriangleList;

    /// Creates GPU shader modules from a linked program and binds them to
    /// the [`Vertex`] layout.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, program: &LinkedProgram) -> Self {
        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trisketch vertex stage"),
            source: wgpu::ShaderSource::Wgsl(program.vertex_source().into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trisketch fragment stage"),
            source: wgpu::ShaderSource::Wgsl(program.fragment_source().into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trisketch pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trisketch triangle pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(program.vertex_entry()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(program.fragment_entry()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: Self::TOPOLOGY,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("triangle pipeline created for {format:?}");

        // Shader modules drop here; the pipeline keeps what it needs.
        Self {
            pipeline,
            topology: Self::TOPOLOGY,
        }
    }

    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        self.topology
    }
}
