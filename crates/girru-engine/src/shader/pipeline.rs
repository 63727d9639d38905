use std::fs;
use std::path::Path;

use crate::error::ShaderError;
use crate::mesh::StaticMesh;
use crate::render::RenderCtx;

use super::compile::{compile_stage, find_entry_point};
use super::ShaderStage;

/// A vertex + fragment shader pair, linked into one drawable program.
///
/// State machine: unlinked on construction, linked after a successful
/// [`load`](Self::load). Loading again re-links in place, dropping the
/// previous program. Activating an unlinked pipeline is rejected with
/// [`ShaderError::NotLinked`].
pub struct ShaderPipeline {
    linked: Option<LinkedProgram>,
}

/// Compiled + linked program state, kept CPU-side until first use.
struct LinkedProgram {
    vertex_source: String,
    fragment_source: String,
    vertex_entry: String,
    fragment_entry: String,
    /// GPU pipeline realized against a concrete surface format.
    realized: Option<RealizedPipeline>,
}

struct RealizedPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
}

impl ShaderPipeline {
    /// Creates an unlinked pipeline, unusable for drawing until `load`.
    pub fn new() -> Self {
        Self { linked: None }
    }

    pub fn is_linked(&self) -> bool {
        self.linked.is_some()
    }

    /// Reads both stage sources from disk, compiles each independently,
    /// and links them. On success the pipeline is linked; on an already
    /// linked pipeline the new program replaces the old one in place.
    pub fn load(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<(), ShaderError> {
        let vertex_source = read_stage_source(ShaderStage::Vertex, vertex_path)?;
        let fragment_source = read_stage_source(ShaderStage::Fragment, fragment_path)?;
        self.load_from_source(vertex_source, fragment_source)
    }

    /// Same as [`load`](Self::load) with in-memory sources.
    pub fn load_from_source(
        &mut self,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Result<(), ShaderError> {
        let vertex_source = vertex_source.into();
        let fragment_source = fragment_source.into();

        // Each stage compiles on its own so a diagnostic always names the
        // failing stage; the vertex stage is checked first.
        let vertex_module = compile_stage(ShaderStage::Vertex, &vertex_source)?;
        let fragment_module = compile_stage(ShaderStage::Fragment, &fragment_source)?;

        let vertex_entry = find_entry_point(&vertex_module, ShaderStage::Vertex)?;
        let fragment_entry = find_entry_point(&fragment_module, ShaderStage::Fragment)?;

        log::debug!("shader program linked ({vertex_entry} + {fragment_entry})");

        self.linked = Some(LinkedProgram {
            vertex_source,
            fragment_source,
            vertex_entry,
            fragment_entry,
            realized: None,
        });

        Ok(())
    }

    /// Makes this pipeline's program current on `rpass`.
    ///
    /// Realizes the GPU pipeline against the current surface format on
    /// first use (and again if the format ever changes). Fails with
    /// [`ShaderError::NotLinked`] before a successful `load`.
    pub fn activate(
        &mut self,
        ctx: &RenderCtx<'_>,
        rpass: &mut wgpu::RenderPass<'_>,
    ) -> Result<(), ShaderError> {
        let linked = self.require_linked()?;
        let pipeline = linked.realize(ctx.device, ctx.surface_format);
        rpass.set_pipeline(pipeline);
        Ok(())
    }

    fn require_linked(&mut self) -> Result<&mut LinkedProgram, ShaderError> {
        self.linked.as_mut().ok_or(ShaderError::NotLinked)
    }
}

impl Default for ShaderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedProgram {
    /// Builds (or rebuilds) the wgpu pipeline for `format`.
    ///
    /// Both sources were validated at link time, so module creation here
    /// does not produce user-facing diagnostics.
    fn realize(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> &wgpu::RenderPipeline {
        let stale = match &self.realized {
            Some(r) => r.format != format,
            None => true,
        };

        if stale {
            let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("girru vertex stage"),
                source: wgpu::ShaderSource::Wgsl(self.vertex_source.as_str().into()),
            });
            let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("girru fragment stage"),
                source: wgpu::ShaderSource::Wgsl(self.fragment_source.as_str().into()),
            });

            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("girru pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("girru pipeline"),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &vertex_shader,
                    entry_point: Some(&self.vertex_entry),
                    compilation_options: Default::default(),
                    buffers: &[StaticMesh::vertex_layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment_shader,
                    entry_point: Some(&self.fragment_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
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

            self.realized = Some(RealizedPipeline { format, pipeline });
        }

        // Realized just above when missing.
        &self.realized.as_ref().expect("pipeline realized").pipeline
    }
}

fn read_stage_source(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "
        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 1.0);
        }
    ";

    const FS: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.5, 0.2, 1.0);
        }
    ";

    const FS_BROKEN: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return missing_identifier;
        }
    ";

    #[test]
    fn load_links_the_pipeline() {
        let mut pipeline = ShaderPipeline::new();
        assert!(!pipeline.is_linked());

        pipeline.load_from_source(VS, FS).unwrap();
        assert!(pipeline.is_linked());

        let linked = pipeline.linked.as_ref().unwrap();
        assert_eq!(linked.vertex_entry, "vs_main");
        assert_eq!(linked.fragment_entry, "fs_main");
    }

    #[test]
    fn use_before_load_is_rejected() {
        let mut pipeline = ShaderPipeline::new();
        assert!(matches!(
            pipeline.require_linked(),
            Err(ShaderError::NotLinked)
        ));
    }

    #[test]
    fn vertex_error_names_the_vertex_stage() {
        let mut pipeline = ShaderPipeline::new();
        let err = pipeline.load_from_source("@vertex fn broken(", FS).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert!(!pipeline.is_linked());
    }

    #[test]
    fn fragment_error_names_the_fragment_stage() {
        let mut pipeline = ShaderPipeline::new();
        let err = pipeline.load_from_source(VS, FS_BROKEN).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
    }

    #[test]
    fn both_stages_broken_reports_vertex_first() {
        let mut pipeline = ShaderPipeline::new();
        let err = pipeline
            .load_from_source("@vertex fn broken(", FS_BROKEN)
            .unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn missing_fragment_entry_point_is_a_link_error() {
        // Compiles as a module, but contains no fragment entry point.
        let fragment_without_entry = "fn helper() -> f32 { return 1.0; }";

        let mut pipeline = ShaderPipeline::new();
        let err = pipeline
            .load_from_source(VS, fragment_without_entry)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
    }

    #[test]
    fn reload_relinks_in_place() {
        let mut pipeline = ShaderPipeline::new();
        pipeline.load_from_source(VS, FS).unwrap();

        let other_fs = "
            @fragment
            fn fs_color() -> @location(0) vec4<f32> {
                return vec4<f32>(0.0, 1.0, 0.0, 1.0);
            }
        ";
        pipeline.load_from_source(VS, other_fs).unwrap();

        assert!(pipeline.is_linked());
        let linked = pipeline.linked.as_ref().unwrap();
        assert_eq!(linked.fragment_entry, "fs_color");
        assert!(linked.realized.is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_program() {
        // Compilation happens before the swap, so a failed re-load leaves
        // the previously linked program in place.
        let mut pipeline = ShaderPipeline::new();
        pipeline.load_from_source(VS, FS).unwrap();
        pipeline.load_from_source(VS, FS_BROKEN).unwrap_err();
        assert!(pipeline.is_linked(), "previous program is kept on failure");
    }

    #[test]
    fn load_reads_sources_from_disk() {
        let dir = std::env::temp_dir().join("girru-shader-load-test");
        std::fs::create_dir_all(&dir).unwrap();
        let vs_path = dir.join("quad.vert.wgsl");
        let fs_path = dir.join("quad.frag.wgsl");
        std::fs::write(&vs_path, VS).unwrap();
        std::fs::write(&fs_path, FS).unwrap();

        let mut pipeline = ShaderPipeline::new();
        pipeline.load(&vs_path, &fs_path).unwrap();
        assert!(pipeline.is_linked());

        let missing = dir.join("does-not-exist.wgsl");
        let err = pipeline.load(&missing, &fs_path).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Io {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }
}
