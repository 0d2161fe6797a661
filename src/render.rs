use crate::constants::{CLEAR_COLOR, SHADOW_EXTENT_PAD, SHADOW_MIN_EXTENT};
use crate::loader::Rgba;
use crate::scene::{self, PartUniforms, SceneUniforms};
use folio_core::{Camera, LightRig, ModelGroup, SHADOW_MAP_SIZE};
use glam::Mat4;
use web_sys as web;

mod helpers;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

struct GpuPart {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
    cast_shadow: bool,
}

/// WebGPU resources of the model viewer: one shadow pass and one lit,
/// textured pass per frame.
pub struct ViewerGpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    main_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,
    _albedo: wgpu::Texture,
    _shadow_map: wgpu::Texture,
    shadow_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
    parts: Vec<GpuPart>,

    light_view_proj: Mat4,
    width: u32,
    height: u32,
}

impl ViewerGpu {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        model: &ModelGroup,
        texture: &Rgba,
        rig: &LightRig,
    ) -> anyhow::Result<Self> {
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
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("model_shader"),
            source: wgpu::ShaderSource::Wgsl(folio_core::MODEL_WGSL.into()),
        });

        // Textures and samplers
        let (albedo, albedo_view) = helpers::create_rgba_texture(
            &device,
            &queue,
            "albedo",
            texture.width,
            texture.height,
            &texture.pixels,
        );
        let albedo_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("albedo_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (shadow_map, shadow_view) = helpers::create_depth_texture(
            &device,
            "shadow_map",
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let (depth, depth_view) = helpers::create_depth_texture(
            &device,
            "depth",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        // Bind group layouts
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let part_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("part_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });

        // Scene uniforms; the camera part is rewritten every frame
        let radius = scene::scene_radius(model.bounds(), model.scale, SHADOW_MIN_EXTENT);
        let light_view_proj = scene::light_view_proj(rig, radius * SHADOW_EXTENT_PAD);
        let initial = scene::scene_uniforms(
            &folio_core::OrbitCamera::default().camera(width as f32 / height as f32),
            model.model_matrix(0.0),
            light_view_proj,
            rig,
        );
        let scene_buffer = helpers::uniform_buffer(&device, "scene_uniforms", &initial);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&albedo_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&albedo_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bg"),
            layout: &shadow_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        // Pipelines
        let main_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("main_layout"),
            bind_group_layouts: &[&scene_bgl, &part_bgl],
            push_constant_ranges: &[],
        });
        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_layout"),
            bind_group_layouts: &[&shadow_bgl],
            push_constant_ranges: &[],
        });
        let main_pipeline = helpers::make_model_pipeline(
            &device,
            "main_pipeline",
            &main_layout,
            &shader,
            "vs_main",
            Some(("fs_main", format)),
            DEPTH_FORMAT,
            wgpu::DepthBiasState::default(),
        );
        let shadow_pipeline = helpers::make_model_pipeline(
            &device,
            "shadow_pipeline",
            &shadow_layout,
            &shader,
            "vs_shadow",
            None,
            DEPTH_FORMAT,
            wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        );

        let parts = model
            .parts
            .iter()
            .filter(|p| !p.indices.is_empty())
            .map(|p| {
                use wgpu::util::DeviceExt;
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(p.name.as_str()),
                    contents: bytemuck::cast_slice(&p.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(p.name.as_str()),
                    contents: bytemuck::cast_slice(&p.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let part_buffer = helpers::uniform_buffer(
                    &device,
                    "part_uniforms",
                    &PartUniforms::new(p.receive_shadow),
                );
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("part_bg"),
                    layout: &part_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: part_buffer.as_entire_binding(),
                    }],
                });
                GpuPart {
                    vertex_buffer,
                    index_buffer,
                    index_count: p.indices.len() as u32,
                    bind_group,
                    cast_shadow: p.cast_shadow,
                }
            })
            .collect();

        log::info!("[gpu] viewer ready {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            main_pipeline,
            shadow_pipeline,
            scene_buffer,
            scene_bind_group,
            shadow_bind_group,
            _albedo: albedo,
            _shadow_map: shadow_map,
            shadow_view,
            _depth: depth,
            depth_view,
            parts,
            light_view_proj,
            width,
            height,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (depth, depth_view) = helpers::create_depth_texture(
                &self.device,
                "depth",
                width,
                height,
                DEPTH_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
            );
            self._depth = depth;
            self.depth_view = depth_view;
        }
    }

    pub fn render(&mut self, camera: &Camera, model: Mat4, rig: &LightRig) -> Result<(), wgpu::SurfaceError> {
        let uniforms: SceneUniforms =
            scene::scene_uniforms(camera, model, self.light_view_proj, rig);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: depth from the light
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.shadow_pipeline);
            rpass.set_bind_group(0, &self.shadow_bind_group, &[]);
            for part in self.parts.iter().filter(|p| p.cast_shadow) {
                rpass.set_vertex_buffer(0, part.vertex_buffer.slice(..));
                rpass.set_index_buffer(part.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..part.index_count, 0, 0..1);
            }
        }

        // Pass 2: lit, textured model
        {
            let [r, g, b, a] = CLEAR_COLOR;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
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
            rpass.set_pipeline(&self.main_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            for part in &self.parts {
                rpass.set_bind_group(1, &part.bind_group, &[]);
                rpass.set_vertex_buffer(0, part.vertex_buffer.slice(..));
                rpass.set_index_buffer(part.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..part.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
