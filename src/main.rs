mod display;
mod uniform;

use fractal_explorer::{render::Frame, Config, Explorer};
use log::{debug, info, warn};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent},
    event_loop::EventLoopBuilder,
    window::WindowBuilder,
};

use crate::display::Display;

fn main() {
    env_logger::init();

    let config = Config::default();
    let mut explorer = Explorer::new(&config).expect("invalid configuration");
    let size = explorer.size();

    let event_loop = EventLoopBuilder::<Frame>::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title("Fractal Explorer")
        .with_inner_size(PhysicalSize::new(size.width(), size.height()))
        .with_resizable(false)
        .build(&event_loop)
        .unwrap();
    let mut display = Display::new(window, size);

    // Finished frames are sent back to the event loop; stale ones are
    // dropped there, after the viewport check.
    let proxy = event_loop.create_proxy();
    let render = move |explorer: &Explorer| {
        let proxy = proxy.clone();
        explorer.spawn_render(move |frame| {
            if proxy.send_event(frame).is_err() {
                debug!("event loop closed before frame arrived");
            }
        });
    };

    info!("left click zooms in, right click zooms out, R resets, C changes colouring");
    render(&explorer);

    let mut cursor = PhysicalPosition::new(0.0, 0.0);
    event_loop.run(move |event, _, control_flow| {
        control_flow.set_wait();

        match event {
            Event::WindowEvent { window_id, event } if window_id == display.window().id() => {
                match event {
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    WindowEvent::Resized(window_size) => display.resize(window_size),
                    WindowEvent::CursorMoved { position, .. } => cursor = position,
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button,
                        ..
                    } => {
                        let (x, y) = match display.pixel_at(cursor) {
                            Some(pixel) => pixel,
                            None => return,
                        };
                        let clicked = match button {
                            MouseButton::Left => explorer.point_clicked(x, y),
                            MouseButton::Right => explorer.point_clicked_zoom_out(x, y),
                            _ => return,
                        };
                        match clicked {
                            Ok(()) => render(&explorer),
                            Err(error) => warn!("ignoring click: {}", error),
                        }
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(keycode),
                                ..
                            },
                        ..
                    } => match keycode {
                        VirtualKeyCode::R => {
                            explorer.reset_requested();
                            render(&explorer);
                        }
                        VirtualKeyCode::C => {
                            let colouring = explorer.cycle_colouring();
                            debug!("colouring is now {:?}", colouring);
                            render(&explorer);
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
            Event::UserEvent(frame) => {
                if explorer.is_current(&frame) {
                    frame.present(&mut display);
                } else {
                    debug!("dropping stale frame {}", frame.generation);
                }
            }
            Event::RedrawRequested(window_id) if window_id == display.window().id() => {
                display.draw();
            }
            _ => {}
        }
    });
}
