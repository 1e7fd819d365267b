//! The room renderer: one program, one mesh, one texture, one draw per frame.

use asset::{AssetPaths, MeshData, TextureData};
use bytemuck::{Pod, Zeroable};
use corelib::{
    Mat4,
    camera::Camera,
    frame::FrameMatrices,
    transform::{DEFAULT_FLOOR_HEIGHT, Transform},
};
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, Color, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, FragmentState, LoadOp,
    Operations, PipelineLayoutDescriptor, RenderPassColorAttachment, RenderPassDescriptor,
    RenderPipeline, RenderPipelineDescriptor, ShaderStages, StoreOp, SurfaceError, VertexState,
    util::DeviceExt,
};

use crate::{
    SurfaceRenderer,
    context::{DEPTH_FORMAT, GpuContext},
    mesh::{GpuMesh, Vertex},
    shader::{ROOM_SHADER, compile_program},
    texture::GpuTexture,
};

/// Maps OpenGL clip depth [-1,1] onto wgpu's [0,1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Camera UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraUniform {
    mvp: [[f32; 4]; 4],
}

impl CameraUniform {
    fn from_gl_mvp(mvp: Mat4) -> Self {
        Self {
            mvp: (OPENGL_TO_WGPU_MATRIX * mvp).to_cols_array_2d(),
        }
    }
}

/// Pipeline plus the uniform it reads, created once per surface.
struct RoomProgram {
    pipeline: RenderPipeline,
    camera_buf: Buffer,
    camera_bg: BindGroup,
    texture_bgl: BindGroupLayout,
}

pub struct RoomRenderer {
    assets: AssetPaths,
    clear_color: Color,
    camera: Camera,
    model: Transform,
    matrices: FrameMatrices,
    program: Option<RoomProgram>,
    room: Option<GpuMesh>,
    room_tex: Option<GpuTexture>,
    missing: MissingResources,
}

impl RoomRenderer {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            assets,
            clear_color: Color::TRANSPARENT,
            camera: Camera::room_default(),
            model: Transform::identity(),
            matrices: FrameMatrices::default(),
            program: None,
            room: None,
            room_tex: None,
            missing: MissingResources::default(),
        }
    }

    /// Matrices used by the most recent frame.
    pub fn matrices(&self) -> &FrameMatrices {
        &self.matrices
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// `true` once program, mesh and texture are all available.
    pub fn is_ready(&self) -> bool {
        self.program.is_some() && self.room.is_some() && self.room_tex.is_some()
    }

    fn build_program(gpu: &GpuContext) -> anyhow::Result<RoomProgram> {
        let device = &gpu.device;
        let shader = compile_program(device, "Room WGSL", ROOM_SHADER)?;

        let camera_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Camera BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let camera_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera UBO"),
            contents: bytemuck::bytes_of(&CameraUniform::from_gl_mvp(Mat4::IDENTITY)),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera BG"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buf.as_entire_binding(),
            }],
        });
        let texture_bgl = GpuTexture::bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Room PipelineLayout"),
            bind_group_layouts: &[&camera_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Room Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: gpu.format(),
                    blend: Some(BlendState::REPLACE),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            // The room is seen from inside; no culling, as GLES defaults.
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(RoomProgram {
            pipeline,
            camera_buf,
            camera_bg,
            texture_bgl,
        })
    }
}

impl SurfaceRenderer for RoomRenderer {
    fn on_surface_created(&mut self, gpu: &GpuContext) {
        self.clear_color = Color::TRANSPARENT;
        self.model = Transform::on_floor(DEFAULT_FLOOR_HEIGHT);
        self.missing.reset();

        self.program = match Self::build_program(gpu) {
            Ok(program) => Some(program),
            Err(e) => {
                log::error!("Unable to build room program: {e:#}");
                None
            }
        };

        self.room = None;
        self.room_tex = None;
        if let Some((mesh, image)) = load_room_assets(&self.assets) {
            self.room = Some(GpuMesh::upload(&gpu.device, "Room", &mesh));
            if let Some(program) = &self.program {
                let tex = GpuTexture::upload(
                    &gpu.device,
                    &gpu.queue,
                    &program.texture_bgl,
                    "Room Diffuse",
                    image,
                );
                log::info!(
                    "Room ready: {} indices, {} texture mips",
                    self.room.as_ref().map_or(0, GpuMesh::index_count),
                    tex.mip_level_count()
                );
                self.room_tex = Some(tex);
            }
        }
    }

    fn on_surface_changed(&mut self, _gpu: &GpuContext, width: u32, height: u32) {
        match self.camera.set_viewport(width, height) {
            Ok(()) => log::debug!("Projection updated for {}x{}", width, height),
            Err(e) => log::warn!("Keeping previous projection: {e}"),
        }
    }

    fn on_draw_frame(&mut self, gpu: &GpuContext) -> Result<(), SurfaceError> {
        let frame = gpu.acquire_frame()?;
        let view = frame.texture.create_view(&Default::default());

        self.matrices =
            FrameMatrices::compose(self.model.matrix(), self.camera.view(), self.camera.proj());

        let mut encoder = gpu
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: gpu.depth_view(),
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let ready = self.is_ready();
            if self.missing.allows_draw(ready) {
                if let (Some(program), Some(room), Some(room_tex)) =
                    (&self.program, &self.room, &self.room_tex)
                {
                    gpu.queue.write_buffer(
                        &program.camera_buf,
                        0,
                        bytemuck::bytes_of(&CameraUniform::from_gl_mvp(self.matrices.mvp)),
                    );
                    rpass.set_pipeline(&program.pipeline);
                    rpass.set_bind_group(0, &program.camera_bg, &[]);
                    room_tex.bind(&mut rpass, 1);
                    room.draw(&mut rpass);
                }
            }
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Decides per frame whether the room can be drawn, warning once per
/// surface when it cannot.
#[derive(Debug, Default)]
struct MissingResources {
    warned: bool,
}

impl MissingResources {
    fn allows_draw(&mut self, ready: bool) -> bool {
        if ready {
            return true;
        }
        if !self.warned {
            log::warn!("Room resources missing; drawing background only");
            self.warned = true;
        }
        false
    }

    fn reset(&mut self) {
        self.warned = false;
    }
}

/// Load the room assets, logging instead of propagating a failure.
pub fn load_room_assets(paths: &AssetPaths) -> Option<(MeshData, TextureData)> {
    match asset::load_room(paths) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            log::error!("Unable to initialize objects: {e}");
            None
        }
    }
}
