//! WebGPU render pipeline setup
//!
//! One triangle-list pipeline with alpha blending. Scene vertices arrive in
//! grid units and are mapped to NDC on the CPU before upload.

use super::vertex::Vertex;

/// Vertices the buffer holds before its first growth
const INITIAL_VERTEX_CAPACITY: u64 = 4096;

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Capacity of `vertex_buffer` in vertices
    vertex_capacity: u64,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Board side in tiles, for coordinate mapping
    pub tile_count: i32,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        tile_count: i32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("snake-arcade-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Rgba8UnormSrgb);
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);
        log::info!("Render pipeline ready ({:?})", format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            tile_count,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Convert grid units to normalized device coordinates
    pub fn grid_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        grid_to_ndc(self.tile_count, self.size, x, y)
    }

    /// Upload the frame's vertices and draw them over `clear`
    pub fn render(
        &mut self,
        vertices: &[Vertex],
        clear: [f32; 4],
    ) -> Result<(), wgpu::SurfaceError> {
        let ndc: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = self.grid_to_ndc(v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        let needed = ndc.len() as u64;
        if let Some(capacity) = grown_capacity(self.vertex_capacity, needed) {
            self.vertex_capacity = capacity;
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = clear.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("board_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if needed > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..needed * Vertex::SIZE));
                pass.draw(0..needed as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// New capacity when `needed` vertices no longer fit, doubling to amortize growth
fn grown_capacity(current: u64, needed: u64) -> Option<u64> {
    (needed > current).then(|| needed.next_power_of_two())
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("board_vertices"),
        size: capacity * Vertex::SIZE,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("board_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("board_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("board_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Board-centered, aspect-preserving mapping with a 5% margin.
/// Grid y grows downward; NDC y grows upward.
pub fn grid_to_ndc(tile_count: i32, size: (u32, u32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = size;
    let aspect = w as f32 / h.max(1) as f32;
    let half = tile_count as f32 * 0.5;
    let scale = 1.0 / (half * 1.05);

    let nx = (x - half) * scale;
    let ny = (half - y) * scale;
    if aspect > 1.0 {
        (nx / aspect, ny)
    } else {
        (nx, ny * aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_center_maps_to_origin() {
        assert_eq!(grid_to_ndc(20, (800, 800), 10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_board_fits_inside_clip_space() {
        for size in [(800, 800), (1280, 720), (720, 1280)] {
            for (x, y) in [(0.0, 0.0), (20.0, 20.0), (0.0, 20.0)] {
                let (nx, ny) = grid_to_ndc(20, size, x, y);
                assert!(nx.abs() < 1.0 && ny.abs() < 1.0, "{size:?} {x},{y}");
            }
        }
        // Top-left of the board is up and to the left
        let (nx, ny) = grid_to_ndc(20, (800, 800), 0.0, 0.0);
        assert!(nx < 0.0 && ny > 0.0);
    }

    #[test]
    fn test_vertex_buffer_grows_only_when_full() {
        assert_eq!(grown_capacity(INITIAL_VERTEX_CAPACITY, 1200), None);
        assert_eq!(grown_capacity(4096, 4096), None);
        assert_eq!(grown_capacity(4096, 4097), Some(8192));
        assert_eq!(grown_capacity(4096, 20_000), Some(32_768));
    }
}
