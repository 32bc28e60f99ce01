//! Canvas Platformer entry point
//!
//! Handles platform-specific initialization and starts the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use canvas_platformer::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use canvas_platformer::renderer::CanvasRenderer;
    use canvas_platformer::runner::BrowserScheduler;
    use canvas_platformer::sim::World;
    use canvas_platformer::{GameLoop, KeyBindings, Settings};

    type BrowserGame = Rc<GameLoop<BrowserScheduler>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Canvas Platformer starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        // Without a drawing surface there is nothing to run
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas context unavailable")?
            .dyn_into()?;

        let settings = Settings::load();
        let world = World::with_default_level(settings.tuning);
        let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
        let game: BrowserGame = Rc::new(GameLoop::new(world, scheduler));

        let mut renderer = CanvasRenderer::new(ctx, &settings)?;
        game.set_frame_hook(move |snap| {
            if let Err(e) = renderer.render(snap) {
                log::warn!("Render error: {:?}", e);
            }
        });

        setup_keyboard(&window, game.clone(), settings.bindings.clone())?;
        setup_page_lifecycle(&window, game.clone())?;

        game.start();
        log::info!("Canvas Platformer running!");
        Ok(())
    }

    fn setup_keyboard(
        window: &web_sys::Window,
        game: BrowserGame,
        bindings: KeyBindings,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(command) = bindings.command_for(&event.code()) else {
                return;
            };
            // Keep Space and the arrows from scrolling the page
            event.prevent_default();
            if !game.command(command) {
                log::debug!("{:?} refused", command);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Stop scheduling frames when the page is hidden and resume when it is
    /// shown again (including restores from the back/forward cache)
    fn setup_page_lifecycle(window: &web_sys::Window, game: BrowserGame) -> Result<(), JsValue> {
        let hide_game = game.clone();
        let on_hide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            hide_game.stop();
        });
        window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
        on_hide.forget();

        // start() is a no-op while running and rebases the clock after a pause
        let on_show = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.start();
        });
        window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref())?;
        on_show.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Platformer (native) starting...");
    log::info!("Drawing needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning headless session...");
    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the default level for a few seconds on a hand-cranked scheduler
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use std::rc::Rc;

    use canvas_platformer::sim::World;
    use canvas_platformer::{Command, GameLoop, ManualScheduler, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: usize = 300;
    // (frame, command): walk right off the spawn ledge and double jump
    const SCRIPT: [(usize, Command); 5] = [
        (60, Command::MoveRight),
        (66, Command::MoveRight),
        (72, Command::Jump),
        (90, Command::Jump),
        (100, Command::Jump),
    ];

    let settings = Settings::load();
    let scheduler = Rc::new(ManualScheduler::new());
    let game = GameLoop::new(
        World::with_default_level(settings.tuning),
        Rc::clone(&scheduler),
    );

    game.start();
    for frame in 0..FRAMES {
        for &(at, command) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            let accepted = game.command(command);
            log::info!("frame {at}: {command:?} -> {accepted}");
        }
        scheduler.run_frames(1, FRAME_MS);
    }
    game.stop();

    game.with_world(|world| {
        let p = &world.player;
        println!(
            "After {} frames: pos=({:.1}, {:.1}) rot={:.2} jumps_left={}",
            world.frame(),
            p.pos.x,
            p.pos.y,
            p.rotation,
            p.jumps_left()
        );
    });
}
