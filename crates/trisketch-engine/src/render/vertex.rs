use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::readback::{map_read, ReadBackError};

/// One vertex: a position in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    /// Shader input location of `position`.
    pub const POSITION_LOCATION: u32 = 0;

    const ATTRS: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![Self::POSITION_LOCATION => Float32x3];

    /// Tightly packed xyz floats, position bound to location 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The static triangle: x,y,z  x,y,z  x,y,z.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0] },
];

/// GPU-resident vertex data, uploaded once and never modified.
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl VertexBuffer {
    pub fn upload(device: &wgpu::Device, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trisketch vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            // COPY_SRC lets the contents be read back for verification.
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_SRC,
        });

        log::debug!("uploaded {} vertices ({} bytes)", vertices.len(), buffer.size());

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn size_bytes(&self) -> u64 {
        self.buffer.size()
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    /// Copies the buffer contents back to the CPU.
    pub fn read_back(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u8>, ReadBackError> {
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trisketch vertex staging"),
            size: self.size_bytes(),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("trisketch vertex read-back"),
        });
        encoder.copy_buffer_to_buffer(&self.buffer, 0, &staging, 0, self.size_bytes());
        queue.submit(std::iter::once(encoder.finish()));

        map_read(device, &staging)
    }

    /// Reads the buffer back and compares it byte for byte with `expected`.
    pub fn verify_contents(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        expected: &[Vertex],
    ) -> Result<bool, ReadBackError> {
        let bytes = self.read_back(device, queue)?;
        Ok(bytes.as_slice() == bytemuck::cast_slice::<Vertex, u8>(expected))
    }
}
