use winit::dpi::PhysicalSize;

/// Drawable-surface rectangle in physical pixels.
///
/// Recomputed from the surface size every frame; there is no cached
/// viewport to go stale across resizes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport covering the full drawable size. Zero dimensions
    /// are clamped to 1 so the GPU viewport stays well-formed while the
    /// surface reconfigure is deferred.
    pub fn from_size(size: PhysicalSize<u32>) -> Self {
        Self {
            width: size.width.max(1),
            height: size.height.max(1),
        }
    }
}

/// Renderer-facing context (device/queue + surface format + viewport).
///
/// This is intentionally small and stable.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }
}
