//! A window that shows rendered frames through `wgpu`.

use std::num::NonZeroU32;

use bytemuck::{Pod, Zeroable};
use fractal_explorer::{render::Surface, screen};
use log::{debug, trace, warn};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::Window,
};

use crate::uniform::Uniform;

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<u32> for Rgba {
    fn from(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 0xFF,
        }
    }
}

pub struct Display {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    render_bind_group: wgpu::BindGroup,
    frame_texture: wgpu::Texture,
    screen_size: Uniform<[f32; 2]>,
    size: screen::Size,
    staging: Vec<Rgba>,
    // Declared last so the surface is dropped before the window it draws to.
    window: Window,
}

impl Display {
    pub fn new(window: Window, size: screen::Size) -> Self {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let window_size = window.inner_size();
        let surface = unsafe { instance.create_surface(&window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .expect("no compatible graphics adapter");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))
        .expect("failed to open graphics device");

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface.get_supported_formats(&adapter)[0],
            width: window_size.width,
            height: window_size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("display-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("display.wgsl").into()),
        });

        let render_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("render-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: false },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("render-pipeline-layout"),
                bind_group_layouts: &[&render_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let frame_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: frame_extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: frame_texture_format(surface_configuration.format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        });
        let frame_texture_view = frame_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let screen_size = Uniform::new(
            &device,
            "screen-size-buffer",
            [window_size.width as f32, window_size.height as f32],
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        let render_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("render-bind-group"),
            layout: &render_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&frame_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: screen_size.binding_resource(),
                },
            ],
        });

        Self {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            render_bind_group,
            frame_texture,
            screen_size,
            size,
            staging: vec![Rgba::default(); size.pixel_count()],
            window,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The display pixel under a cursor position, if the cursor is on the
    /// window at all. Positions past the bottom or right edge are returned
    /// as-is so the caller can reject them.
    pub fn pixel_at(&self, position: PhysicalPosition<f64>) -> Option<(u32, u32)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let window_size = self.window.inner_size();
        let x = position.x / window_size.width as f64 * self.size.width() as f64;
        let y = position.y / window_size.height as f64 * self.size.height() as f64;
        Some((x as u32, y as u32))
    }

    pub fn resize(&mut self, window_size: PhysicalSize<u32>) {
        if window_size.width == 0 || window_size.height == 0 {
            return;
        }
        debug!("resizing to {:?}", window_size);

        self.surface_configuration.width = window_size.width;
        self.surface_configuration.height = window_size.height;
        self.surface.configure(&self.device, &self.surface_configuration);

        self.screen_size.write(
            &self.queue,
            [window_size.width as f32, window_size.height as f32],
        );
        self.window.request_redraw();
    }

    pub fn draw(&mut self) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_configuration);
                self.window.request_redraw();
                return;
            }
            Err(error) => {
                warn!("skipping redraw: {}", error);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut command_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let mut render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..4, 0..1);
        }

        self.queue.submit([command_encoder.finish()]);
        surface_texture.present();
    }
}

impl Surface for Display {
    fn set_pixel(&mut self, x: u32, y: u32, rgb: u32) {
        self.staging[y as usize * self.size.width() as usize + x as usize] = rgb.into();
    }

    fn repaint(&mut self) {
        trace!("uploading frame");
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&self.staging),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * self.size.width()),
                rows_per_image: NonZeroU32::new(self.size.height()),
            },
            frame_extent(self.size),
        );
        self.window.request_redraw();
    }
}

/// Frames hold sRGB-encoded colours. On an sRGB surface the texture has to
/// decode them when sampled, or the surface would encode them a second time.
fn frame_texture_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface_format.describe().srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

fn frame_extent(size: screen::Size) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width(),
        height: size.height(),
        depth_or_array_layers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_texture_matches_surface_encoding() {
        assert_eq!(
            frame_texture_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            frame_texture_format(wgpu::TextureFormat::Rgba8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            frame_texture_format(wgpu::TextureFormat::Bgra8Unorm),
            wgpu::TextureFormat::Rgba8Unorm
        );
    }

    #[test]
    fn test_rgba_from_packed_rgb() {
        let rgba = Rgba::from(0x3300FF);
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0x33, 0x00, 0xFF, 0xFF));
        assert_eq!(bytemuck::cast::<Rgba, [u8; 4]>(rgba), [0x33, 0x00, 0xFF, 0xFF]);
    }
}
