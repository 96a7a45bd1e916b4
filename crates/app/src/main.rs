//! Dogglands - mock metaverse land-marketplace viewer.

mod animation;
mod config;
mod events;
mod filter;
mod render;
mod state;
mod store;
mod update;

use anyhow::Result;
use engine_core::Time;
use glam::Vec3;
use input::{GestureClassifier, PointerState};
use picking::PickingWorld;
use renderer::{OrbitCamera, Renderer};
use state::UiState;
use std::sync::Arc;
use store::MarketStore;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};
use worldgen::{GridConfig, Island, PARCEL_FOOTPRINT, PARCEL_HEIGHT};

/// Main application state: one world, one camera, one store.
pub struct AppState {
    // Core systems
    time: Time,
    input: PointerState,
    gestures: GestureClassifier,
    picking: PickingWorld,

    // Renderer
    renderer: Renderer,
    camera: OrbitCamera,

    // Marketplace
    store: MarketStore,
    ui: UiState,

    // Static scene data
    islands: Vec<Island>,
    grid_size: u32,

    running: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &config::ViewerConfig) -> Result<Self> {
        let renderer = Renderer::new(window).await?;

        let mut camera = OrbitCamera::new();
        camera.set_aspect(renderer.size.width, renderer.size.height);
        camera.rotation_speed *= config.sensitivity;

        let mode = config.scene_mode();
        let seed = config.seed.unwrap_or_else(rand::random);
        let parcels = worldgen::generate(&GridConfig {
            mode,
            seed,
            ..Default::default()
        });

        // Static pick targets: one cuboid per parcel at its rest pose.
        let mut picking = PickingWorld::new();
        let half = Vec3::new(
            PARCEL_FOOTPRINT / 2.0,
            PARCEL_HEIGHT / 2.0,
            PARCEL_FOOTPRINT / 2.0,
        );
        for (index, parcel) in parcels.iter().enumerate() {
            picking.add_parcel_box(parcel.position, half, index);
        }
        picking.update_query_pipeline();

        let store = MarketStore::new(parcels);
        log::info!(
            "World ready: {} parcels, wallet {} ({} DOGG)",
            store.parcels.len(),
            store.wallet.address,
            store.wallet.balance
        );

        Ok(Self {
            time: Time::new(),
            input: PointerState::new(),
            gestures: GestureClassifier::new(),
            picking,
            renderer,
            camera,
            store,
            ui: UiState::new(),
            islands: mode.islands(),
            grid_size: mode.grid_size(),
            running: true,
        })
    }
}

/// Application handler for winit.
struct App {
    state: Option<AppState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = config::ViewerConfig::load();
            config.save();
            let window_attrs = Window::default_attributes()
                .with_title("Dogglands")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(AppState::new(window.clone(), &config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize viewer: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                      Dogglands                       ║");
    println!("╠══════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                           ║");
    println!("║    Drag        - Orbit camera                        ║");
    println!("║    Scroll      - Zoom                                ║");
    println!("║    Click/Tap   - Select parcel                       ║");
    println!("║    F           - Cycle filter                        ║");
    println!("║    M           - Missions    │  T - Transactions     ║");
    println!("║    Enter       - Buy / Claim │  Esc - Close / Quit   ║");
    println!("╚══════════════════════════════════════════════════════╝");

    log::info!("Starting Dogglands viewer");

    let event_loop = EventLoop::new()?;
    // Poll continuously so gestures and the idle-bob animation stay smooth.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
