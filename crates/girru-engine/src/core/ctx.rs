use winit::window::Window;

use crate::device::{GpuContext, SurfaceErrorAction};
use crate::error::RenderError;
use crate::render::{RenderCtx, Viewport};

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `GpuContext<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut GpuContext<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Renders one frame: sizes the viewport to the current drawable
    /// surface, clears the color buffer to `clear`, calls `draw` with a
    /// ready [`RenderCtx`] and render pass, then presents.
    ///
    /// The viewport is recomputed from the drawable size on every frame,
    /// so a window resize takes effect on the next frame; no projection
    /// correction is applied, so geometry stretches with the window.
    ///
    /// Surface errors are triaged rather than propagated: lost/outdated
    /// surfaces reconfigure and the frame is retried next redraw, a
    /// timeout skips the frame, and out-of-memory exits. An `Err` from
    /// `draw` is logged and exits the loop.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut wgpu::RenderPass<'_>) -> Result<(), RenderError>,
    {
        let size = self.gpu.size();

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface error: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        AppControl::Continue
                    }
                };
            }
        };

        let result = {
            let viewport = Viewport::from_size(size);
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                viewport,
            );

            // One pass: clear, then the caller's draw calls on top.
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("girru frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(
                0.0,
                0.0,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );

            draw(&rctx, &mut rpass)
        };

        if let Err(err) = result {
            log::error!("frame aborted: {err}");
            return AppControl::Exit;
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
