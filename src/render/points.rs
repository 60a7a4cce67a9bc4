use super::helpers::{self, ScenePipeline, ADDITIVE_BLENDING};
use gallery_core::{Blend, PointField};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    pub(crate) position: [f32; 3],
    pub(crate) color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointParams {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color_opacity: [f32; 4],
    pub(crate) size: [f32; 4],
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Pipelines shared by every point field.
pub(crate) struct PointResources {
    bgl: wgpu::BindGroupLayout,
    alpha_pipeline: wgpu::RenderPipeline,
    additive_pipeline: wgpu::RenderPipeline,
}

/// GPU copy of one [`PointField`].
pub(crate) struct PointBatch {
    instances: wgpu::Buffer,
    params: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
    blend: Blend,
    opacity: f32,
    size: f32,
}

pub(crate) fn create_point_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> PointResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("points_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[globals_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }];
    let pipeline = |label, blend| {
        helpers::make_scene_pipeline(
            device,
            ScenePipeline {
                label,
                layout: &pl,
                shader,
                vs_entry: "vs_points",
                fs_entry: "fs_points",
                buffers: &buffers,
                color_format,
                blend: Some(blend),
                depth_write: false,
            },
        )
    };
    PointResources {
        alpha_pipeline: pipeline("points_alpha_pipeline", wgpu::BlendState::ALPHA_BLENDING),
        additive_pipeline: pipeline("points_additive_pipeline", ADDITIVE_BLENDING),
        bgl,
    }
}

impl PointResources {
    /// Upload `field`. Empty fields get no batch.
    pub(crate) fn batch(
        &self,
        device: &wgpu::Device,
        label: &str,
        field: &PointField,
    ) -> Option<PointBatch> {
        if field.is_empty() {
            return None;
        }
        let data: Vec<PointInstance> = field
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| PointInstance {
                position: p.to_array(),
                color: field.color_of(i),
            })
            .collect();
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point_params"),
            size: std::mem::size_of::<PointParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point_bg"),
            layout: &self.bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params.as_entire_binding(),
            }],
        });
        Some(PointBatch {
            instances,
            params,
            bind_group,
            count: data.len() as u32,
            blend: field.blend,
            opacity: field.opacity,
            size: field.size,
        })
    }

    fn pipeline(&self, blend: Blend) -> &wgpu::RenderPipeline {
        match blend {
            Blend::Alpha => &self.alpha_pipeline,
            Blend::Additive => &self.additive_pipeline,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, batch: &PointBatch) {
        rpass.set_pipeline(self.pipeline(batch.blend));
        rpass.set_bind_group(1, &batch.bind_group, &[]);
        rpass.set_vertex_buffer(0, batch.instances.slice(..));
        rpass.draw(0..6, 0..batch.count);
    }
}

impl PointBatch {
    pub(crate) fn update(&self, queue: &wgpu::Queue, model: Mat4) {
        let params = PointParams {
            model: model.to_cols_array_2d(),
            color_opacity: [1.0, 1.0, 1.0, self.opacity],
            size: [self.size, 0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.params, 0, bytemuck::bytes_of(&params));
    }

    pub(crate) fn destroy(&self) {
        self.instances.destroy();
        self.params.destroy();
    }
}
