use wgpu::util::DeviceExt;

use glam::{Mat4, Vec3};
use morph_core::{
    scene_offset_vec3, OrbitCamera, ParticleVertex, Pose, Scene, FOLIAGE_HIGH,
    FOLIAGE_LOW, FOLIAGE_POINT_ATTENUATION, STAR_EMISSIVE,
};

use crate::mesh::{self, Mesh, MeshVertex};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.02,
    b: 0.01,
    a: 1.0,
};
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const LIGHT_DIR: [f32; 4] = [0.4, 1.0, 0.6, 0.0];
const AMBIENT: [f32; 4] = [0.25, 0.25, 0.3, 0.0];
const BAUBLE_GLOW: f32 = 0.15;
const GIFT_GLOW: f32 = 0.0;
const STAR_GLOW: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FoliageUniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    color_low: [f32; 4],
    color_high: [f32; 4],
    offset: [f32; 4],
    time: f32,
    progress: f32,
    pixel_ratio: f32,
    point_scale: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OrnamentInstance {
    model: [[f32; 4]; 4],
    /// rgb plus emissive amount in alpha
    color: [f32; 4],
}

impl OrnamentInstance {
    fn new(pose: &Pose, offset: Vec3, color: [f32; 3], glow: f32) -> Self {
        Self {
            model: pose.model_matrix(offset).to_cols_array_2d(),
            color: [color[0], color[1], color[2], glow],
        }
    }
}

/// One instanced mesh: static geometry plus a per-frame instance buffer.
struct MeshBatch {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl MeshBatch {
    fn new(device: &wgpu::Device, label: &str, mesh: &Mesh, capacity: usize) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<OrnamentInstance>() * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            instance_buffer,
            instance_count: 0,
        }
    }

    fn upload(&mut self, queue: &wgpu::Queue, instances: &[OrnamentInstance]) {
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        self.instance_count = instances.len() as u32;
    }

    fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    foliage_pipeline: wgpu::RenderPipeline,
    foliage_uniforms: wgpu::Buffer,
    foliage_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    particle_vb: wgpu::Buffer,
    particle_count: u32,

    ornament_pipeline: wgpu::RenderPipeline,
    scene_uniforms: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    baubles: MeshBatch,
    gifts: MeshBatch,
    star: MeshBatch,
    instances: Vec<OrnamentInstance>,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window, scene: &Scene) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        // ---------------- Foliage ----------------
        let foliage_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("foliage"),
            source: wgpu::ShaderSource::Wgsl(morph_core::FOLIAGE_WGSL.into()),
        });
        let foliage_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("foliage_uniforms"),
            size: std::mem::size_of::<FoliageUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (foliage_bgl, foliage_bind_group) =
            uniform_bind_group(&device, "foliage", &foliage_uniforms);

        // Quad corners for two triangles; the shader scales them to sprite size
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // Endpoints never change, so the particle records are uploaded once
        let particles = scene.foliage().vertices();
        let particle_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_vb"),
            contents: bytemuck::cast_slice(&particles),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let foliage_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: scatter, tree, random per particle
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 24,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        };
        let foliage_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("foliage_pl"),
            bind_group_layouts: &[&foliage_bgl],
            push_constant_ranges: &[],
        });
        let foliage_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("foliage_pipeline"),
            layout: Some(&foliage_layout),
            vertex: wgpu::VertexState {
                module: &foliage_shader,
                entry_point: Some("vs_main"),
                buffers: &foliage_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            // particles are occluded by ornaments but do not occlude each other
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &foliage_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // ---------------- Ornaments ----------------
        let ornament_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ornament"),
            source: wgpu::ShaderSource::Wgsl(morph_core::ORNAMENT_WGSL.into()),
        });
        let scene_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (scene_bgl, scene_bind_group) = uniform_bind_group(&device, "scene", &scene_uniforms);

        let ornament_buffers = [
            // slot 0: mesh vertices
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 1,
                    },
                ],
            },
            // slot 1: model matrix columns and colour per instance
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<OrnamentInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 64,
                        shader_location: 6,
                    },
                ],
            },
        ];
        let ornament_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ornament_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let ornament_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ornament_pipeline"),
            layout: Some(&ornament_layout),
            vertex: wgpu::VertexState {
                module: &ornament_shader,
                entry_point: Some("vs_main"),
                buffers: &ornament_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &ornament_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let ornaments = scene.ornaments();
        let baubles = MeshBatch::new(
            &device,
            "baubles",
            &mesh::sphere(16, 12),
            ornaments.baubles().len(),
        );
        let gifts = MeshBatch::new(&device, "gifts", &mesh::cube(), ornaments.gifts().len());
        let star = MeshBatch::new(&device, "star", &mesh::star(), 1);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_view,
            foliage_pipeline,
            foliage_uniforms,
            foliage_bind_group,
            quad_vb,
            particle_vb,
            particle_count: particles.len() as u32,
            ornament_pipeline,
            scene_uniforms,
            scene_bind_group,
            baubles,
            gifts,
            star,
            instances: Vec::with_capacity(ornaments.baubles().len().max(ornaments.gifts().len())),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
    }

    fn write_uniforms(&self, scene: &Scene, orbit: &OrbitCamera) {
        let height = self.config.height as f32;
        let camera = orbit.camera(self.config.width as f32 / height);
        let view_proj: Mat4 = camera.view_proj();

        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let frame = scene.foliage().frame_uniforms();
        let foliage = FoliageUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            color_low: rgb(FOLIAGE_LOW),
            color_high: rgb(FOLIAGE_HIGH),
            offset: scene_offset_vec3().extend(0.0).to_array(),
            time: frame.time,
            progress: frame.progress,
            pixel_ratio: frame.pixel_ratio,
            point_scale: FOLIAGE_POINT_ATTENUATION / camera.focal_length_px(height),
        };
        self.queue
            .write_buffer(&self.foliage_uniforms, 0, bytemuck::bytes_of(&foliage));

        let ornaments = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: LIGHT_DIR,
            ambient: AMBIENT,
        };
        self.queue
            .write_buffer(&self.scene_uniforms, 0, bytemuck::bytes_of(&ornaments));
    }

    fn write_instances(&mut self, scene: &Scene) {
        let offset = scene_offset_vec3();
        let ornaments = scene.ornaments();

        self.instances.clear();
        self.instances.extend(
            ornaments
                .bauble_poses()
                .iter()
                .zip(ornaments.bauble_colors())
                .map(|(pose, color)| OrnamentInstance::new(pose, offset, color, BAUBLE_GLOW)),
        );
        self.baubles.upload(&self.queue, &self.instances);

        self.instances.clear();
        self.instances.extend(
            ornaments
                .gift_poses()
                .iter()
                .zip(ornaments.gift_colors())
                .map(|(pose, color)| OrnamentInstance::new(pose, offset, color, GIFT_GLOW)),
        );
        self.gifts.upload(&self.queue, &self.instances);

        let star = OrnamentInstance::new(&scene.star().pose(), offset, STAR_EMISSIVE, STAR_GLOW);
        self.star.upload(&self.queue, &[star]);
    }

    pub fn render(&mut self, scene: &Scene, orbit: &OrbitCamera) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_uniforms(scene, orbit);
        self.write_instances(scene);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // opaque ornaments first so the additive particles depth-test against them
            rpass.set_pipeline(&self.ornament_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            self.baubles.draw(&mut rpass);
            self.gifts.draw(&mut rpass);
            self.star.draw(&mut rpass);

            rpass.set_pipeline(&self.foliage_pipeline);
            rpass.set_bind_group(0, &self.foliage_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.particle_vb.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn rgb(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    buffer: &wgpu::Buffer,
) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (layout, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_records_match_shader_layouts() {
        assert_eq!(std::mem::size_of::<FoliageUniforms>(), 160);
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 80);
        assert_eq!(std::mem::size_of::<OrnamentInstance>(), 80);
    }
}
