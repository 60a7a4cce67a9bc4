use super::helpers::{self, ScenePipeline};
use gallery_core::{Panel, PanelTexture, TextureImage};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct QuadVertex {
    corner: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct QuadInstance {
    model: [[f32; 4]; 4],
}

// Unit quad in the xy plane, front face toward +z.
const QUAD: [QuadVertex; 6] = [
    QuadVertex { corner: [-0.5, -0.5], uv: [0.0, 1.0] },
    QuadVertex { corner: [0.5, -0.5], uv: [1.0, 1.0] },
    QuadVertex { corner: [0.5, 0.5], uv: [1.0, 0.0] },
    QuadVertex { corner: [-0.5, -0.5], uv: [0.0, 1.0] },
    QuadVertex { corner: [0.5, 0.5], uv: [1.0, 0.0] },
    QuadVertex { corner: [-0.5, 0.5], uv: [0.0, 0.0] },
];

const QUAD_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4
];

// Shown until a panel's image arrives, and for good if it never does.
const PLACEHOLDER_RGBA: [u8; 4] = [34, 34, 40, 255];

fn placeholder_image() -> TextureImage {
    TextureImage {
        width: 1,
        height: 1,
        rgba: PLACEHOLDER_RGBA.to_vec(),
    }
}

/// A sampled panel texture and its bind group.
pub(crate) struct TextureSlot {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Pipelines, quad mesh and sampler shared by every panel.
pub(crate) struct PanelResources {
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    quad: wgpu::Buffer,
    panel_pipeline: wgpu::RenderPipeline,
    border_pipeline: wgpu::RenderPipeline,
    placeholder: TextureSlot,
}

/// Per-scene panel data: instance transforms and one texture slot per panel.
pub(crate) struct PanelBatch {
    images: wgpu::Buffer,
    borders: wgpu::Buffer,
    slots: Vec<Option<TextureSlot>>,
}

pub(crate) fn create_panel_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    shader: &wgpu::ShaderModule,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> PanelResources {
    let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("panel_texture_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("panel_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });
    let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("panel_quad"),
        contents: bytemuck::cast_slice(&QUAD),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let panel_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("panel_pl"),
        bind_group_layouts: &[globals_bgl, &texture_bgl],
        push_constant_ranges: &[],
    });
    let border_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("border_pl"),
        bind_group_layouts: &[globals_bgl],
        push_constant_ranges: &[],
    });
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    let panel_pipeline = helpers::make_scene_pipeline(
        device,
        ScenePipeline {
            label: "panel_pipeline",
            layout: &panel_pl,
            shader,
            vs_entry: "vs_panel",
            fs_entry: "fs_panel",
            buffers: &buffers,
            color_format,
            blend: None,
            depth_write: true,
        },
    );
    let border_pipeline = helpers::make_scene_pipeline(
        device,
        ScenePipeline {
            label: "border_pipeline",
            layout: &border_pl,
            shader,
            vs_entry: "vs_panel",
            fs_entry: "fs_border",
            buffers: &buffers,
            color_format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_write: false,
        },
    );
    let placeholder = upload_slot(
        device,
        queue,
        &texture_bgl,
        &sampler,
        "panel_placeholder",
        &placeholder_image(),
    );
    PanelResources {
        texture_bgl,
        sampler,
        quad,
        panel_pipeline,
        border_pipeline,
        placeholder,
    }
}

fn upload_slot(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    image: &TextureImage,
) -> TextureSlot {
    let (texture, view) = helpers::create_texture_2d(
        device,
        label,
        image.width,
        image.height,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.bytes_per_row()),
            rows_per_image: Some(image.height),
        },
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    TextureSlot {
        texture,
        bind_group,
    }
}

fn instances<'a>(quads: impl Iterator<Item = &'a gallery_core::Quad>) -> Vec<QuadInstance> {
    quads
        .map(|q| QuadInstance {
            model: q.model_matrix().to_cols_array_2d(),
        })
        .collect()
}

impl PanelResources {
    /// Upload panel and border transforms. A ring without panels gets no batch.
    pub(crate) fn batch(&self, device: &wgpu::Device, panels: &[Panel]) -> Option<PanelBatch> {
        if panels.is_empty() {
            return None;
        }
        let images = instances(panels.iter().map(|p| &p.image));
        let borders = instances(panels.iter().map(|p| &p.border));
        Some(PanelBatch {
            images: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("panel_instances"),
                contents: bytemuck::cast_slice(&images),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            borders: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("border_instances"),
                contents: bytemuck::cast_slice(&borders),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            slots: panels.iter().map(|_| None).collect(),
        })
    }

    /// Decoded pixels for panel `index`. Returns `false` for an unknown panel.
    pub(crate) fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batch: &mut PanelBatch,
        index: usize,
        image: &TextureImage,
    ) -> bool {
        let Some(slot) = batch.slots.get_mut(index) else {
            return false;
        };
        let uploaded = upload_slot(
            device,
            queue,
            &self.texture_bgl,
            &self.sampler,
            "panel_texture",
            image,
        );
        if let Some(old) = slot.replace(uploaded) {
            old.texture.destroy();
        }
        true
    }

    /// Opaque panels first, then the translucent borders over them.
    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        batch: &PanelBatch,
        panels: &[Panel],
    ) {
        rpass.set_pipeline(&self.panel_pipeline);
        rpass.set_vertex_buffer(0, self.quad.slice(..));
        rpass.set_vertex_buffer(1, batch.images.slice(..));
        for (i, panel) in panels.iter().enumerate().take(batch.slots.len()) {
            let slot = match (panel.texture, &batch.slots[i]) {
                (PanelTexture::Ready, Some(slot)) => slot,
                _ => &self.placeholder,
            };
            rpass.set_bind_group(1, &slot.bind_group, &[]);
            let i = i as u32;
            rpass.draw(0..QUAD.len() as u32, i..i + 1);
        }
        rpass.set_pipeline(&self.border_pipeline);
        rpass.set_vertex_buffer(1, batch.borders.slice(..));
        rpass.draw(0..QUAD.len() as u32, 0..batch.slots.len() as u32);
    }

    pub(crate) fn destroy(&self, batch: Option<&PanelBatch>) {
        if let Some(batch) = batch {
            batch.images.destroy();
            batch.borders.destroy();
            for slot in batch.slots.iter().flatten() {
                slot.texture.destroy();
            }
        }
        self.quad.destroy();
        self.placeholder.texture.destroy();
    }
}
