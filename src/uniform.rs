use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `A`.
pub struct Uniform<A> {
    buffer: wgpu::Buffer,
    phantom_data: PhantomData<A>,
}

impl<A: bytemuck::Pod + bytemuck::Zeroable> Uniform<A> {
    pub fn new(device: &wgpu::Device, label: &str, contents: A) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[contents]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            phantom_data: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, contents: A) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[contents]));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: None,
        })
    }
}
