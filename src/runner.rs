//! Frame scheduling and the game loop
//!
//! The host calls back once per display refresh. `GameLoop` chains those
//! callbacks, steps the `World`, and hands a snapshot to a frame hook.
//!
//! A callback the host already queued can still fire after `stop()` has
//! cancelled it. Each callback therefore carries the run generation it was
//! scheduled under and does nothing if the loop stopped or restarted since.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::input::Command;
use crate::renderer::Snapshot;
use crate::sim::World;

/// Work to run on the next frame, given the host timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies a scheduled frame so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The host's per-frame callback primitive
pub trait FrameScheduler {
    /// Monotonic time in milliseconds
    fn now(&self) -> f64;

    /// Queue `callback` for the next frame. None if the host refused.
    fn schedule(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Drop a queued callback. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

/// Called after every tick with the fresh snapshot. Must not call back into the loop.
pub type FrameHook = Box<dyn FnMut(&Snapshot<'_>)>;

struct LoopState {
    world: World,
    running: bool,
    /// Bumped on every start so callbacks from earlier runs can tell they are stale
    generation: u64,
    pending: Option<FrameHandle>,
    on_frame: Option<FrameHook>,
}

/// Drives a `World` from a `FrameScheduler`
pub struct GameLoop<S: FrameScheduler + 'static> {
    scheduler: Rc<S>,
    state: Rc<RefCell<LoopState>>,
}

impl<S: FrameScheduler + 'static> GameLoop<S> {
    pub fn new(world: World, scheduler: Rc<S>) -> Self {
        Self {
            scheduler,
            state: Rc::new(RefCell::new(LoopState {
                world,
                running: false,
                generation: 0,
                pending: None,
                on_frame: None,
            })),
        }
    }

    /// Install the per-frame hook (usually the renderer)
    pub fn set_frame_hook(&self, hook: impl FnMut(&Snapshot<'_>) + 'static) {
        self.state.borrow_mut().on_frame = Some(Box::new(hook));
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Begin ticking. The current time becomes the baseline and the first tick
    /// runs immediately with a zero-length frame. No-op if already running.
    pub fn start(&self) {
        let (now, generation) = {
            let mut state = self.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
            state.generation += 1;
            let now = self.scheduler.now();
            state.world.reset_clock(now);
            (now, state.generation)
        };
        log::info!("Game loop started (run {})", generation);
        Self::animate(&self.state, &self.scheduler, generation, now);
    }

    /// Stop ticking. Any frame already queued becomes a no-op.
    pub fn stop(&self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            if !state.running {
                return;
            }
            state.running = false;
            state.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        log::info!("Game loop stopped");
    }

    /// Deliver an input command between frames. Returns false if it was refused.
    pub fn command(&self, command: Command) -> bool {
        self.state.borrow_mut().world.apply(command)
    }

    /// Read the world outside of a tick
    pub fn with_world<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.state.borrow().world)
    }

    fn animate(state: &Rc<RefCell<LoopState>>, scheduler: &Rc<S>, generation: u64, time: f64) {
        {
            let mut guard = state.borrow_mut();
            if !guard.running || guard.generation != generation {
                log::warn!("Ignoring stale frame callback from run {}", generation);
                return;
            }
            guard.pending = None;

            let LoopState {
                world, on_frame, ..
            } = &mut *guard;
            let dt = world.tick(time);
            if let Some(hook) = on_frame {
                hook(&world.snapshot(dt));
            }
        }

        let next_state = Rc::clone(state);
        let next_scheduler = Rc::clone(scheduler);
        let handle = scheduler.schedule(Box::new(move |time: f64| {
            Self::animate(&next_state, &next_scheduler, generation, time);
        }));

        let mut guard = state.borrow_mut();
        match handle {
            Some(handle) => guard.pending = Some(handle),
            None => {
                log::error!("Host refused to schedule the next frame; stopping");
                guard.running = false;
            }
        }
    }
}

/// A scheduler driven by hand: callbacks wait in a queue until fired.
/// Used headless (native builds) and in tests.
#[derive(Default)]
pub struct ManualScheduler {
    clock: Cell<f64>,
    next_id: Cell<i32>,
    queue: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ms`
    pub fn advance(&self, ms: f64) {
        self.clock.set(self.clock.get() + ms);
    }

    /// Number of callbacks waiting
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Remove the oldest queued callback without running it
    pub fn take_next(&self) -> Option<(FrameHandle, FrameCallback)> {
        self.queue.borrow_mut().pop_front()
    }

    /// Run the oldest queued callback at the current clock. False if none was queued.
    pub fn fire_next(&self) -> bool {
        // Release the queue before running: the callback schedules the next frame
        let Some((_, callback)) = self.take_next() else {
            return false;
        };
        callback(self.clock.get());
        true
    }

    /// Advance by `frame_ms` and fire one callback, `frames` times.
    /// Returns how many callbacks actually ran.
    pub fn run_frames(&self, frames: usize, frame_ms: f64) -> usize {
        let mut fired = 0;
        for _ in 0..frames {
            self.advance(frame_ms);
            if !self.fire_next() {
                break;
            }
            fired += 1;
        }
        fired
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.clock.get()
    }

    fn schedule(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.queue.borrow_mut().push_back((handle, callback));
        Some(handle)
    }

    fn cancel(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

/// `requestAnimationFrame` / `cancelAnimationFrame`
#[cfg(target_arch = "wasm32")]
pub struct BrowserScheduler {
    window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl BrowserScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn schedule(&self, callback: FrameCallback) -> Option<FrameHandle> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        // Frees itself after the single invocation
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        match self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}
