//! Minimal quad viewer: one window, one static quad, one shader pair.
//!
//! All fallible setup (geometry validation, shader IO/compile/link) runs
//! before the window opens; a failure prints the diagnostic chain and
//! exits non-zero without entering the render loop.

use std::path::{Path, PathBuf};

use anyhow::Context;

use girru_engine::core::{App, AppControl, FrameCtx};
use girru_engine::logging::init_logging;
use girru_engine::mesh::{MeshData, StaticMesh};
use girru_engine::shader::ShaderPipeline;
use girru_engine::window::{Runtime, RuntimeConfig};

const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;
const WINDOW_TITLE: &str = "shader pipeline";
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

struct QuadViewer {
    data: MeshData,
    mesh: Option<StaticMesh>,
    pipeline: ShaderPipeline,
}

impl App for QuadViewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // The device only exists once the window is up, so the upload
        // happens on the first frame; the data was validated in main.
        if self.mesh.is_none() {
            match StaticMesh::create(ctx.gpu.device(), &self.data) {
                Ok(mesh) => self.mesh = Some(mesh),
                Err(err) => {
                    log::error!("failed to upload quad geometry: {err}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(mesh) = self.mesh.as_ref() else {
            return AppControl::Exit;
        };
        let pipeline = &mut self.pipeline;

        ctx.render(CLEAR_COLOR, |rctx, rpass| {
            pipeline.activate(rctx, rpass)?;
            mesh.bind(rpass);
            mesh.draw(rpass);
            Ok(())
        })
    }
}

fn shader_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let data = MeshData::quad();
    data.validate().context("quad geometry rejected")?;

    let shaders = shader_dir();
    let mut pipeline = ShaderPipeline::new();
    pipeline
        .load(
            &shaders.join("quad.vert.wgsl"),
            &shaders.join("quad.frag.wgsl"),
        )
        .context("shader pipeline failed to load")?;

    Runtime::run(
        RuntimeConfig {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            vsync: true,
        },
        QuadViewer {
            data,
            mesh: None,
            pipeline,
        },
    )
}
