//! End-to-end render check: draws the quad offscreen for one frame and
//! reads the pixels back.
//!
//! Needs a working GPU adapter; on machines without one the test logs a
//! note and passes vacuously.

use girru_engine::mesh::{MeshData, StaticMesh};
use girru_engine::render::{RenderCtx, Viewport};
use girru_engine::shader::ShaderPipeline;

const SIZE: u32 = 64;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const VS: &str = "
    @vertex
    fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
        return vec4<f32>(position, 1.0);
    }
";

const FS: &str = "
    @fragment
    fn fs_main() -> @location(0) vec4<f32> {
        return vec4<f32>(1.0, 0.0, 0.0, 1.0);
    }
";

fn pixel(frame: &[u8], x: u32, y: u32) -> [u8; 4] {
    let offset = ((y * SIZE + x) * 4) as usize;
    [
        frame[offset],
        frame[offset + 1],
        frame[offset + 2],
        frame[offset + 3],
    ]
}

#[test]
fn quad_fills_viewport_center_and_leaves_clear_color_elsewhere() {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let Ok(adapter) =
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
    else {
        eprintln!("no GPU adapter available; skipping render test");
        return;
    };
    let Ok((device, queue)) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("girru test device"),
        ..Default::default()
    })) else {
        eprintln!("no GPU device available; skipping render test");
        return;
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("girru test target"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
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

    let mesh = StaticMesh::create(&device, &MeshData::quad()).expect("quad upload");
    let mut pipeline = ShaderPipeline::new();
    pipeline.load_from_source(VS, FS).expect("shader load");

    let mut encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
        let viewport = Viewport::new(SIZE, SIZE);
        let rctx = RenderCtx::new(&device, &queue, FORMAT, viewport);

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("girru test pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_viewport(0.0, 0.0, SIZE as f32, SIZE as f32, 0.0, 1.0);

        pipeline.activate(&rctx, &mut rpass).expect("activate");
        mesh.bind(&mut rpass);
        mesh.draw(&mut rpass);
    }

    // 64 px * 4 bytes = 256, already a multiple of the copy alignment.
    let bytes_per_row = SIZE * 4;
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("girru test readback"),
        size: u64::from(bytes_per_row * SIZE),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).expect("map result channel");
    });
    device.poll(wgpu::PollType::wait_indefinitely()).expect("device poll");
    rx.recv().expect("map callback ran").expect("buffer mapped");

    let data = slice.get_mapped_range();

    // Quad spans NDC [-0.5, 0.5] in x and y: pixels 16..48 of 64.
    assert_eq!(pixel(&data, 32, 32), [255, 0, 0, 255], "center is shader color");
    assert_eq!(pixel(&data, 2, 2), [0, 0, 0, 255], "corner is clear color");
    assert_eq!(pixel(&data, 61, 61), [0, 0, 0, 255], "far corner is clear color");
    assert_eq!(pixel(&data, 24, 40), [255, 0, 0, 255], "off-center quad interior");
}
