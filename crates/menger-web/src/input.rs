use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Accumulated input state read each frame by the application.
pub struct InputState {
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    pub left_button_down: bool,
    pub right_button_down: bool,
    /// Key codes (KeyboardEvent.code) pressed since the last frame,
    /// in arrival order. Auto-repeat events are included on purpose:
    /// holding W keeps dollying, exactly like repeated presses.
    pub key_codes: Vec<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            mouse_dx: 0.0,
            mouse_dy: 0.0,
            left_button_down: false,
            right_button_down: false,
            key_codes: Vec::new(),
        }
    }

    /// Clear per-frame deltas and the key queue (called after the
    /// application consumes them).
    pub fn clear_frame(&mut self) {
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
        self.key_codes.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Register mouse/keyboard event listeners ONCE at init.
/// Closures are leaked via `.forget()` since they live for the app lifetime.
pub fn register_input_listeners(
    canvas: &web_sys::HtmlCanvasElement,
    state: Rc<RefCell<InputState>>,
) {
    let target: &web_sys::EventTarget = canvas.as_ref();

    // mousemove
    {
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                let mut s = state.borrow_mut();
                s.mouse_dx += e.movement_x() as f32;
                s.mouse_dy += e.movement_y() as f32;
            });
        target
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .expect("failed to add mousemove listener");
        closure.forget();
    }

    // mousedown
    {
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                let mut s = state.borrow_mut();
                match e.button() {
                    0 => s.left_button_down = true,
                    2 => s.right_button_down = true,
                    _ => {}
                }
            });
        target
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .expect("failed to add mousedown listener");
        closure.forget();
    }

    // mouseup
    {
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                let mut s = state.borrow_mut();
                match e.button() {
                    0 => s.left_button_down = false,
                    2 => s.right_button_down = false,
                    _ => {}
                }
            });
        target
            .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
            .expect("failed to add mouseup listener");
        closure.forget();
    }

    // contextmenu: keep right-drag usable
    {
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(|e: web_sys::MouseEvent| {
            e.prevent_default();
        });
        target
            .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())
            .expect("failed to add contextmenu listener");
        closure.forget();
    }

    // keydown goes on the window so the canvas never needs focus
    {
        let window = web_sys::window().expect("no global window");
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                state.borrow_mut().key_codes.push(e.code());
            });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .expect("failed to add keydown listener");
        closure.forget();
    }
}
