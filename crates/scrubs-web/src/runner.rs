use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use glam::Vec2;
use scrubs::{
    Capabilities, FrameHandle, FrameScheduler, InputEvent, InstanceId, Pointer, Scrubber,
    ScrubsOptions,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

use crate::callbacks::JsCallbacks;
use crate::dom::{self, DomSurface};

pub type DomScrubber = Scrubber<DomSurface, RafScheduler>;

/// Events the built-in input handlers listen to on the container.
const INPUT_EVENTS: [&str; 8] = [
    "mousedown",
    "mousemove",
    "mouseup",
    "mouseleave",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
];

/// Milliseconds on the clock shared by input timestamps and frames.
fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// `requestAnimationFrame`-backed scheduler. Dropping a stored
/// [`AnimationFrame`] cancels it.
pub struct RafScheduler {
    owner: Weak<Shared>,
    next_id: u32,
    frames: Vec<(FrameHandle, AnimationFrame)>,
}

impl RafScheduler {
    fn new(owner: Weak<Shared>) -> Self {
        Self {
            owner,
            next_id: 0,
            frames: Vec::new(),
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let owner = self.owner.clone();
        let frame = request_animation_frame(move |_| {
            if let Some(shared) = owner.upgrade() {
                shared.frame(handle);
            }
        });
        self.frames.push((handle, frame));
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.frames.retain(|(h, _)| *h != handle);
    }

    fn fired(&mut self, handle: FrameHandle) {
        self.frames.retain(|(h, _)| *h != handle);
    }
}

/// State reachable from listeners and frame callbacks.
pub struct Shared {
    container: HtmlElement,
    scrubber: RefCell<DomScrubber>,
    callbacks: JsCallbacks,
}

impl Shared {
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Run `op` against the scrubber, then hand queued events to the page
    /// callbacks once the scrubber is released, so callbacks may call back in.
    pub fn run<R>(
        &self,
        op: impl FnOnce(&mut DomScrubber) -> scrubs::Result<R>,
    ) -> scrubs::Result<R> {
        let (result, events) = {
            let mut scrubber = self.scrubber.borrow_mut();
            let result = op(&mut scrubber);
            (result, scrubber.drain_events().collect::<Vec<_>>())
        };
        for event in events {
            self.callbacks.dispatch(&self.container, event);
        }
        result
    }

    fn frame(&self, handle: FrameHandle) {
        let result = self.run(|scrubber| {
            scrubber.on_frame(handle, now_ms());
            Ok(())
        });
        if let Err(err) = result {
            log::error!("scrubs: frame failed: {err}");
        }
    }

    fn input(&self, event: InputEvent) {
        if let Err(err) = self.run(|scrubber| scrubber.handle_input(event)) {
            log::warn!("scrubs: input dropped: {err}");
        }
    }
}

/// A bound scrubber as held by the registry: shared state plus the
/// listeners that feed it. Dropping it detaches the listeners.
pub struct WebScrubber {
    shared: Rc<Shared>,
    _listeners: Vec<EventListener>,
}

impl WebScrubber {
    pub fn new(
        id: InstanceId,
        container: HtmlElement,
        options: ScrubsOptions,
        capabilities: Capabilities,
        surface: DomSurface,
        callbacks: JsCallbacks,
    ) -> Self {
        let input = options.input;
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| Shared {
            container,
            scrubber: RefCell::new(Scrubber::new(
                id,
                options,
                capabilities,
                surface,
                RafScheduler::new(weak.clone()),
            )),
            callbacks,
        });
        let listeners = if input {
            install_listeners(&shared)
        } else {
            Vec::new()
        };
        Self {
            shared,
            _listeners: listeners,
        }
    }

    pub fn shared(&self) -> Rc<Shared> {
        Rc::clone(&self.shared)
    }
}

fn install_listeners(shared: &Rc<Shared>) -> Vec<EventListener> {
    INPUT_EVENTS
        .iter()
        .map(|&kind| {
            let owner = Rc::downgrade(shared);
            EventListener::new_with_options(
                &shared.container,
                kind,
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    let Some(shared) = owner.upgrade() else {
                        return;
                    };
                    let Some(input) = to_input(kind, event, &shared.container) else {
                        return;
                    };
                    event.prevent_default();
                    shared.input(input);
                },
            )
        })
        .collect()
}

fn to_input(kind: &str, event: &Event, container: &HtmlElement) -> Option<InputEvent> {
    let time_ms = now_ms();
    match kind {
        "mousedown" => mouse_pointer(event, container, time_ms).map(InputEvent::PointerDown),
        "mousemove" => mouse_pointer(event, container, time_ms).map(InputEvent::PointerMove),
        "touchstart" => touch_pointer(event, container, time_ms).map(InputEvent::PointerDown),
        "touchmove" => touch_pointer(event, container, time_ms).map(InputEvent::PointerMove),
        "mouseup" | "touchend" => Some(InputEvent::PointerUp { time_ms }),
        "mouseleave" | "touchcancel" => Some(InputEvent::PointerCancel { time_ms }),
        _ => None,
    }
}

fn mouse_pointer(event: &Event, container: &HtmlElement, time_ms: f64) -> Option<Pointer> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    if event.type_() == "mousedown" && mouse.button() != 0 {
        return None;
    }
    let position = Vec2::new(mouse.page_x() as f32, mouse.page_y() as f32);
    Some(Pointer::new(position, dom::page_bounds(container), time_ms))
}

fn touch_pointer(event: &Event, container: &HtmlElement, time_ms: f64) -> Option<Pointer> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    let position = Vec2::new(touch.page_x() as f32, touch.page_y() as f32);
    Some(Pointer::new(position, dom::page_bounds(container), time_ms))
}
