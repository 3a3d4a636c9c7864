use super::gpu::request_device;
use super::{GpuInit, LoaderError};

/// Device/queue pair without a window surface.
///
/// Used for offscreen rendering and for read-back checks.
pub struct HeadlessGpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: wgpu::AdapterInfo,
}

impl HeadlessGpu {
    pub async fn new(init: &GpuInit) -> Result<Self, LoaderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(LoaderError::Adapter)?;

        let (device, queue) = request_device(&adapter, init).await?;

        Ok(Self {
            device,
            queue,
            adapter_info: adapter.get_info(),
        })
    }

    /// Blocking variant of [`HeadlessGpu::new`].
    pub fn block_on(init: &GpuInit) -> Result<Self, LoaderError> {
        pollster::block_on(Self::new(init))
    }
}
