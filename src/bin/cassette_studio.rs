//! Cassette Assembly Studio
//!
//! Run with: `cargo run --bin cassette-studio`
//!
//! Interactive viewer for the cassette assembly. Builds the parametric
//! model once at startup, then drives the assembly animation and
//! visibility toggles while an orbit camera with inertial damping flies
//! around the model. The camera pose persists across sessions.
//!
//! Controls:
//! - Left-drag: Orbit
//! - Right-drag: Pan
//! - Scroll: Zoom
//! - 1-6: Toggle component visibility (base, chip, lid, carts, cap)
//! - L: Lock sliders (slide carts home)
//! - Enter: Assemble (lower the cap)
//! - R: Reset assembly to exploded state
//! - C: Reset camera
//! - P / G / H: Export PLY / GLB / HTML viewer
//! - ESC: Exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use cassette_engine::camera::{OrbitCamera, OrbitMouseButton};
use cassette_engine::dims::Dimensions;
use cassette_engine::export;
use cassette_engine::scene::{CassetteScene, ComponentId};
use cassette_engine::view_state::{self, ViewState, VIEW_STATE_FILE};

// ============================================================================
// GPU DATA STRUCTURES
// ============================================================================

/// Per-frame uniforms shared by every draw. Must match
/// `shaders/cassette.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    key_light_dir: [f32; 4],
    fill_light_dir: [f32; 4],
    light_params: [f32; 4],
}

static_assertions::assert_eq_size!(FrameUniforms, [u8; 128]);

/// Per-component uniforms: the group's model matrix.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ModelUniforms {
    model: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(ModelUniforms, [u8; 64]);

/// GPU buffers for one component group.
struct ComponentBuffers {
    id: ComponentId,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    translucent: bool,
}

// ============================================================================
// APP STATE
// ============================================================================

struct AppState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    opaque_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,

    components: Vec<ComponentBuffers>,

    scene: CassetteScene,
    camera: OrbitCamera,
    view_state_path: PathBuf,

    // Timing
    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_time: Instant,
    current_fps: f32,
}

impl AppState {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to find suitable GPU adapter");

        println!("[Cassette Studio] Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Shader and bind group layouts
        let shader_source = include_str!("../../shaders/cassette.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cassette Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let uniform_layout_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_layout_entry],
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[uniform_layout_entry],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cassette Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<cassette_engine::MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        };

        let make_pipeline = |label: &str, blend: Option<wgpu::BlendState>, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout.clone()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None, // see into the open cassette
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let opaque_pipeline =
            make_pipeline("Opaque Pipeline", Some(wgpu::BlendState::REPLACE), true);
        // Glass renders after everything else, blended, without writing
        // depth so the chip stays visible through it.
        let glass_pipeline =
            make_pipeline("Glass Pipeline", Some(wgpu::BlendState::ALPHA_BLENDING), false);

        let depth_texture = create_depth_texture(&device, &config);

        // Build the model
        println!("[Cassette Studio] Building cassette model...");
        let build_start = Instant::now();
        let scene = CassetteScene::new(&Dimensions::default());
        let mut components = Vec::new();
        let mut total_triangles = 0usize;
        for group in scene.groups() {
            let mesh = group.merged_mesh();
            total_triangles += mesh.triangle_count();

            let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Component Vertex Buffer"),
                size: (mesh.vertices.len() * std::mem::size_of::<cassette_engine::MeshVertex>())
                    as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));

            let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Component Index Buffer"),
                size: (mesh.indices.len() * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            queue.write_buffer(&index_buffer, 0, bytemuck::cast_slice(&mesh.indices));

            let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Component Model Buffer"),
                size: std::mem::size_of::<ModelUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Component Model Bind Group"),
                layout: &model_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                }],
            });

            components.push(ComponentBuffers {
                id: group.id,
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                model_buffer,
                model_bind_group,
                translucent: group.solids.iter().any(|s| s.material.is_transparent()),
            });
        }
        println!(
            "[Cassette Studio] Model ready: {} components, {} triangles ({:.0} ms)",
            components.len(),
            total_triangles,
            build_start.elapsed().as_secs_f32() * 1000.0
        );

        // Camera, with persisted view state if present
        let mut camera = OrbitCamera::new(config.width as f32 / config.height as f32);
        let view_state_path = PathBuf::from(VIEW_STATE_FILE);
        if let Some(saved) = view_state::load(&view_state_path) {
            saved.apply(&mut camera);
            println!("[Cassette Studio] Restored saved camera view");
        }

        let now = Instant::now();

        Self {
            window,
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            glass_pipeline,
            frame_buffer,
            frame_bind_group,
            depth_texture,
            components,
            scene,
            camera,
            view_state_path,
            start_time: now,
            last_frame_time: now,
            frame_count: 0,
            fps_update_time: now,
            current_fps: 0.0,
        }
    }

    /// Seconds since launch; the time base for every animation.
    fn now(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
            self.camera.resize(new_size.width, new_size.height);
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let delta_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        // Advance animations and camera damping once per frame.
        self.scene.tick(self.now());
        self.camera.update(delta_time);

        // FPS tracking in the window title
        self.frame_count += 1;
        let fps_elapsed = (now - self.fps_update_time).as_secs_f32();
        if fps_elapsed >= 1.0 {
            self.current_fps = self.frame_count as f32 / fps_elapsed;
            self.frame_count = 0;
            self.fps_update_time = now;

            let status = if self.scene.controls_enabled() {
                "ready"
            } else {
                "animating"
            };
            self.window.set_title(&format!(
                "Cassette Studio | FPS: {:.0} | {}",
                self.current_fps, status
            ));
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Frame uniforms: camera plus the two-light rig (warm key from
        // the upper left, dim fill from behind right, strong ambient).
        let frame = FrameUniforms {
            view_proj: self.camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: self.camera.eye_position().extend(1.0).to_array(),
            key_light_dir: Vec3::new(-15.0, 25.0, 20.0).normalize().extend(0.0).to_array(),
            fill_light_dir: Vec3::new(15.0, 10.0, -20.0).normalize().extend(0.0).to_array(),
            light_params: [0.9, 0.4, 0.7, 0.0],
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        // Per-component model matrices follow the animated positions.
        for component in &self.components {
            let position = self.scene.group(component.id).position;
            let model = ModelUniforms {
                model: Mat4::from_translation(position).to_cols_array_2d(),
            };
            self.queue
                .write_buffer(&component.model_buffer, 0, bytemuck::bytes_of(&model));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.94,
                            g: 0.95,
                            b: 0.96,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            // Opaque components first, then translucent ones on top.
            render_pass.set_pipeline(&self.opaque_pipeline);
            for component in &self.components {
                if component.translucent || !self.scene.group(component.id).visible {
                    continue;
                }
                draw_component(&mut render_pass, component);
            }

            render_pass.set_pipeline(&self.glass_pipeline);
            for component in &self.components {
                if !component.translucent || !self.scene.group(component.id).visible {
                    continue;
                }
                draw_component(&mut render_pass, component);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn save_view_state(&self) {
        let state = ViewState::capture(&self.camera);
        if let Err(e) = view_state::save(&self.view_state_path, &state) {
            eprintln!("[Cassette Studio] Failed to save view state: {e}");
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }

        let toggle = |scene: &mut CassetteScene, id: ComponentId| {
            let visible = scene.group(id).visible;
            scene.set_visible(id, !visible);
            println!(
                "[Cassette Studio] {} {}",
                id.label(),
                if visible { "hidden" } else { "shown" }
            );
        };

        match key {
            KeyCode::Digit1 => toggle(&mut self.scene, ComponentId::Base),
            KeyCode::Digit2 => toggle(&mut self.scene, ComponentId::Chip),
            KeyCode::Digit3 => toggle(&mut self.scene, ComponentId::GlassLid),
            KeyCode::Digit4 => toggle(&mut self.scene, ComponentId::SliderRight),
            KeyCode::Digit5 => toggle(&mut self.scene, ComponentId::SliderLeft),
            KeyCode::Digit6 => toggle(&mut self.scene, ComponentId::Cap),
            KeyCode::KeyL => {
                if self.scene.controls_enabled() {
                    println!("[Cassette Studio] Locking slider carts");
                    self.scene.lock_sliders(self.now());
                }
            }
            KeyCode::Enter => {
                if self.scene.controls_enabled() {
                    println!("[Cassette Studio] Assembling top cap");
                    self.scene.assemble_cap(self.now());
                }
            }
            KeyCode::KeyR => {
                // No-op while an animation is in flight, by contract.
                self.scene.reset();
            }
            KeyCode::KeyC => {
                self.camera.reset();
                self.save_view_state();
            }
            KeyCode::KeyP => {
                report_export("cassette.ply", export::ply::write_ply(&self.scene, "cassette.ply"));
            }
            KeyCode::KeyG => {
                report_export("cassette.glb", export::glb::write_glb(&self.scene, "cassette.glb"));
            }
            KeyCode::KeyH => {
                report_export(
                    "cassette_viewer.html",
                    export::html::write_html(&self.scene, "cassette_viewer.html"),
                );
            }
            _ => {}
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let mapped = match button {
            MouseButton::Left => Some(OrbitMouseButton::Left),
            MouseButton::Right => Some(OrbitMouseButton::Right),
            _ => None,
        };
        if let Some(mapped) = mapped {
            // A release ending a gesture persists the camera pose.
            if self.camera.handle_mouse_button(mapped, pressed) {
                self.save_view_state();
            }
        }
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.05,
        };
        self.camera.handle_scroll(amount);
        // Every scroll tick ends a zoom gesture.
        self.save_view_state();
    }
}

fn draw_component(render_pass: &mut wgpu::RenderPass<'_>, component: &ComponentBuffers) {
    if component.index_count == 0 {
        return;
    }
    render_pass.set_bind_group(1, &component.model_bind_group, &[]);
    render_pass.set_vertex_buffer(0, component.vertex_buffer.slice(..));
    render_pass.set_index_buffer(component.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    render_pass.draw_indexed(0..component.index_count, 0, 0..1);
}

fn report_export(name: &str, result: Result<(), export::ExportError>) {
    match result {
        Ok(()) => println!("[Cassette Studio] Exported {name}"),
        Err(e) => eprintln!("[Cassette Studio] Export of {name} failed: {e}"),
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

// ============================================================================
// APPLICATION HANDLER
// ============================================================================

struct App {
    state: Option<AppState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        println!("[Cassette Studio] Creating window...");
        let window_attrs = WindowAttributes::default()
            .with_title("Cassette Studio")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.state = Some(pollster::block_on(AppState::new(window)));

        println!("[Cassette Studio] Ready! Controls:");
        println!("  Left-drag - Orbit, Right-drag - Pan, Scroll - Zoom");
        println!("  1-6 - Toggle base / chip / lid / cart R / cart L / cap");
        println!("  L - Lock sliders, Enter - Assemble cap, R - Reset");
        println!("  P / G / H - Export PLY / GLB / HTML viewer");
        println!("  C - Reset camera, ESC - Exit");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.resize(new_size);
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;

                if key == KeyCode::Escape && pressed {
                    event_loop.exit();
                    return;
                }

                state.handle_key(key, pressed);
            }
            WindowEvent::MouseInput {
                button,
                state: btn_state,
                ..
            } => {
                state.handle_mouse_button(button, btn_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                state
                    .camera
                    .handle_mouse_move(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                state.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                state.update();

                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                    Err(e) => eprintln!("Render error: {:?}", e),
                }

                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    println!("=== Cassette Assembly Studio ===");

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App { state: None };
    event_loop.run_app(&mut app).unwrap();
}
