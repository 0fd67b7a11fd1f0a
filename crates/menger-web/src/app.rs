use std::cell::RefCell;
use std::rc::Rc;

use menger_core::config::ViewerConfig;
use menger_geometry::{Floor, MengerSponge};
use menger_render::Renderer;
use wasm_bindgen::prelude::*;

use crate::camera::Camera;
use crate::gpu::GpuContext;
use crate::input::InputState;

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Main application struct. Owns all subsystems.
pub struct Application {
    gpu: GpuContext,
    renderer: Renderer,
    camera: Camera,
    sponge: MengerSponge,
    floor: Floor,
    config: ViewerConfig,
    input: Rc<RefCell<InputState>>,
    last_frame_time: f64,
}

impl Application {
    pub fn new(gpu: GpuContext, config: ViewerConfig, input: Rc<RefCell<InputState>>) -> Self {
        // Building the initial sponge is synchronous and can take a
        // while at high levels; it happens once, before the first frame.
        let mut sponge = MengerSponge::new(config.initial_level);
        let floor = Floor::new();
        let camera = Camera::new(config.clone());

        let renderer = Renderer::new(
            &gpu.device,
            gpu.surface_format,
            gpu.surface_config.width,
            gpu.surface_config.height,
            &mut sponge,
            &floor,
        );

        Self {
            gpu,
            renderer,
            camera,
            sponge,
            floor,
            config,
            input,
            last_frame_time: 0.0,
        }
    }

    /// Start the requestAnimationFrame loop.
    /// Creates the rAF closure ONCE (no closure leak per frame).
    pub fn start_loop(app: Rc<RefCell<Self>>) {
        let closure: RafClosure = Rc::new(RefCell::new(None));
        let closure_clone = closure.clone();

        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let mut app_ref = app.borrow_mut();

            let delta = timestamp - app_ref.last_frame_time;

            // Skip frame if the tab was backgrounded (>100ms gap)
            if app_ref.last_frame_time > 0.0 && delta > 100.0 {
                app_ref.last_frame_time = timestamp;
                Self::schedule(&closure_clone);
                return;
            }

            app_ref.last_frame_time = timestamp;
            app_ref.process_input();
            app_ref.render_frame();

            Self::schedule(&closure_clone);
        }) as Box<dyn FnMut(f64)>));

        // Kick off first frame
        Self::schedule(&closure);
    }

    fn schedule(closure: &RafClosure) {
        let window = web_sys::window().expect("no global window");
        window
            .request_animation_frame(
                closure
                    .borrow()
                    .as_ref()
                    .expect("rAF closure missing")
                    .as_ref()
                    .unchecked_ref(),
            )
            .expect("rAF registration failed");
    }

    /// Drain accumulated input into camera and sponge updates.
    fn process_input(&mut self) {
        let mut input = self.input.borrow_mut();

        if input.left_button_down && (input.mouse_dx != 0.0 || input.mouse_dy != 0.0) {
            self.camera.drag_rotate(input.mouse_dx, input.mouse_dy);
        }

        let codes: Vec<String> = input.key_codes.drain(..).collect();
        input.clear_frame();
        drop(input);

        for code in codes {
            match code.as_str() {
                "KeyW" => self.camera.dolly(1.0),
                "KeyS" => self.camera.dolly(-1.0),
                "KeyA" => self.camera.strafe(-1.0),
                "KeyD" => self.camera.strafe(1.0),
                "ArrowLeft" => self.camera.roll(1.0),
                "ArrowRight" => self.camera.roll(-1.0),
                "ArrowUp" => self.camera.pan_vertical(1.0),
                "ArrowDown" => self.camera.pan_vertical(-1.0),
                "KeyR" => self.camera.reset(),
                "Digit1" => self.request_level(1),
                "Digit2" => self.request_level(2),
                "Digit3" => self.request_level(3),
                "Digit4" => self.request_level(4),
                other => log::debug!("key '{other}' is not bound"),
            }
        }
    }

    /// Forward a digit-key level request if the config allows it.
    /// The rebuild inside `set_level` is synchronous; level 4 is a
    /// noticeable pause and that is accepted (key-driven, infrequent).
    fn request_level(&mut self, level: i32) {
        if self.config.level_in_range(level) {
            self.sponge.set_level(level);
        } else {
            log::warn!("level {level} outside configured range, ignored");
        }
    }

    /// Render a single frame.
    fn render_frame(&mut self) {
        // Destructure for disjoint field borrows.
        let Application {
            gpu,
            renderer,
            camera,
            sponge,
            floor,
            ..
        } = self;

        // Dirty contract: re-upload the sponge only when it changed.
        renderer.sync_sponge(&gpu.device, sponge);

        let width = gpu.surface_config.width as f32;
        let height = gpu.surface_config.height as f32;
        renderer.update_camera(
            &gpu.queue,
            camera.view_proj(width, height),
            sponge.u_matrix(),
            floor.u_matrix(),
        );

        // Get surface texture, handle Lost by reconfiguring
        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => {
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                return;
            }
            Err(e) => {
                log::warn!("surface texture error: {e:?}");
                return;
            }
        };

        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        renderer.render(&mut encoder, &surface_view);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}
