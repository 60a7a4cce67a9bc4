use gallery_core::{FrameView, RenderSurface, SceneGraph, SurfaceError, TextureImage, Viewport};
use web_sys as web;

mod helpers;
mod panels;
mod points;

use panels::{create_panel_resources, PanelBatch, PanelResources};
use points::{create_point_resources, PointBatch, PointResources};

pub const GALLERY_WGSL: &str = include_str!("shaders/gallery.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    ring: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    viewport: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    ambient: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    point_pos: [[f32; 4]; 2],
    point_color: [[f32; 4]; 2],
    border: [f32; 4],
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

impl Globals {
    fn new(scene: &SceneGraph, view: &FrameView, width: u32, height: u32) -> Self {
        let l = &scene.lighting;
        let sun_dir = l.sun.position.normalize_or_zero();
        let [near, far] = [scene.fog.near, scene.fog.far];
        let [fr, fg, fb] = scene.fog.color;
        let [br, bg, bb] = scene.border_style.color;
        let point = |i: usize| {
            let p = &l.points[i];
            (
                p.position.extend(p.range).to_array(),
                scaled(p.color, p.intensity),
            )
        };
        let (p0, c0) = point(0);
        let (p1, c1) = point(1);
        Self {
            view_proj: view.camera.view_projection().to_cols_array_2d(),
            ring: view.ring.to_cols_array_2d(),
            camera_pos: view.camera.eye.extend(1.0).to_array(),
            viewport: [
                width as f32,
                height as f32,
                height as f32 * 0.5,
                0.0,
            ],
            fog_color: [fr, fg, fb, 1.0],
            fog_range: [near, far, 0.0, 0.0],
            ambient: scaled(l.ambient.color, l.ambient.intensity),
            sun_dir: sun_dir.extend(0.0).to_array(),
            sun_color: scaled(l.sun.color, l.sun.intensity),
            point_pos: [p0, p1],
            point_color: [c0, c1],
            border: [br, bg, bb, scene.border_style.opacity],
        }
    }
}

#[derive(Default)]
struct SceneBuffers {
    stars: Option<PointBatch>,
    particles: Option<PointBatch>,
    panels: Option<PanelBatch>,
}

/// WebGPU implementation of the gallery's drawing surface, bound to one canvas.
pub struct WebSurface {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    globals: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    points: PointResources,
    panels: PanelResources,
    scene: SceneBuffers,
    clear_color: wgpu::Color,
}

impl WebSurface {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
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
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (depth_tex, depth_view) = helpers::create_depth_target(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gallery_shader"),
            source: wgpu::ShaderSource::Wgsl(GALLERY_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let globals = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals.as_entire_binding(),
            }],
        });
        let points = create_point_resources(&device, &shader, &globals_bgl, format);
        let panels = create_panel_resources(&device, &queue, &shader, &globals_bgl, format);
        log::info!("[gpu] surface ready {width}x{height} {format:?}");

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            depth_tex,
            depth_view,
            globals,
            globals_bg,
            points,
            panels,
            scene: SceneBuffers::default(),
            clear_color: wgpu::Color::BLACK,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl RenderSurface for WebSurface {
    fn build(&mut self, scene: &SceneGraph) -> Result<(), SurfaceError> {
        let [r, g, b] = scene.fog.color;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
        self.scene = SceneBuffers {
            stars: self.points.batch(&self.device, "stars", &scene.stars),
            particles: self.points.batch(&self.device, "particles", &scene.particles),
            panels: self.panels.batch(&self.device, &scene.panels),
        };
        Ok(())
    }

    fn upload_texture(&mut self, panel: usize, image: &TextureImage) -> Result<(), SurfaceError> {
        if image.width == 0 || image.height == 0 {
            return Err(SurfaceError::Backend(format!("panel {panel}: empty image")));
        }
        let limit = self.device.limits().max_texture_dimension_2d;
        if image.width > limit || image.height > limit {
            return Err(SurfaceError::Backend(format!(
                "panel {panel}: {}x{} exceeds {limit}",
                image.width, image.height
            )));
        }
        let batch = self
            .scene
            .panels
            .as_mut()
            .ok_or_else(|| SurfaceError::Backend("no panels built".into()))?;
        if self
            .panels
            .upload(&self.device, &self.queue, batch, panel, image)
        {
            Ok(())
        } else {
            Err(SurfaceError::Backend(format!("no panel {panel}")))
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        let (width, height) = (viewport.width.max(1), viewport.height.max(1));
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.depth_tex.destroy();
        let (tex, view) = helpers::create_depth_target(&self.device, width, height);
        self.depth_tex = tex;
        self.depth_view = view;
    }

    fn render(&mut self, scene: &SceneGraph, view: &FrameView) -> Result<(), SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Err(SurfaceError::Lost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(SurfaceError::OutOfMemory),
            Err(e) => return Err(SurfaceError::Backend(e.to_string())),
        };
        let globals = Globals::new(scene, view, self.config.width, self.config.height);
        self.queue
            .write_buffer(&self.globals, 0, bytemuck::bytes_of(&globals));
        if let Some(stars) = &self.scene.stars {
            stars.update(&self.queue, view.stars);
        }
        if let Some(particles) = &self.scene.particles {
            particles.update(&self.queue, view.particles);
        }

        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            if let Some(batch) = &self.scene.panels {
                self.panels.draw(&mut rpass, batch, &scene.panels);
            }
            for batch in [&self.scene.stars, &self.scene.particles].into_iter().flatten() {
                self.points.draw(&mut rpass, batch);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn dispose(&mut self) {
        let scene = std::mem::take(&mut self.scene);
        for batch in [&scene.stars, &scene.particles].into_iter().flatten() {
            batch.destroy();
        }
        self.panels.destroy(scene.panels.as_ref());
        self.globals.destroy();
        self.depth_tex.destroy();
        self.canvas.remove();
        log::info!("[gpu] surface disposed");
    }
}
