/// Limits profile requested from the adapter.
///
/// This is the wgpu counterpart of asking the windowing layer for a core or a
/// compatibility graphics context.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GraphicsProfile {
    /// Full WebGPU default limits.
    #[default]
    Core,
    /// Downlevel limits accepted by older GL/GLES drivers.
    Compatibility,
}

impl GraphicsProfile {
    pub fn limits(self) -> wgpu::Limits {
        match self {
            GraphicsProfile::Core => wgpu::Limits::default(),
            GraphicsProfile::Compatibility => wgpu::Limits::downlevel_defaults(),
        }
    }
}

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from.
    pub backends: wgpu::Backends,

    /// Limits profile requested from the device.
    pub profile: GraphicsProfile,

    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical sync and is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            profile: GraphicsProfile::Core,
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_profile_is_not_stricter_than_downlevel() {
        let limits = GraphicsProfile::Compatibility.limits();
        assert_eq!(limits, wgpu::Limits::downlevel_defaults());
    }

    #[test]
    fn default_requests_core_profile_with_vsync() {
        let init = GpuInit::default();
        assert_eq!(init.profile, GraphicsProfile::Core);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }
}
