mod app;

use trisketch_engine::device::GpuInit;
use trisketch_engine::logging::{init_logging, LoggingConfig};
use trisketch_engine::window::{FatalError, Runtime, RuntimeConfig};

use app::TriangleApp;

/// Exit status for any fatal setup failure.
const EXIT_FAILURE: i32 = -1;

fn main() {
    init_logging(LoggingConfig::default());

    // `run` owns every resource; they are released before the process exits.
    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            log::error!("demo01 stopped: {err}");
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

/// GPU hints for the demo window.
///
/// The surface is linear so the clear and fragment colors land in the
/// framebuffer unencoded.
fn gpu_init() -> GpuInit {
    GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    }
}

fn run() -> Result<(), FatalError> {
    let config = RuntimeConfig::default();
    let app = TriangleApp::new(config.size.width, config.size.height);

    Runtime::run(config, gpu_init(), app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trisketch_engine::device::choose_surface_format;

    #[test]
    fn window_surface_is_linear_when_both_kinds_are_offered() {
        let caps = wgpu::SurfaceCapabilities {
            formats: vec![wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Bgra8Unorm],
            ..Default::default()
        };

        let format = choose_surface_format(&caps, gpu_init().prefer_srgb);
        assert_eq!(format, Some(wgpu::TextureFormat::Bgra8Unorm));
        assert!(!format.is_some_and(|f| f.is_srgb()));
    }
}
