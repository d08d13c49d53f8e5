use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use morph_core::{OrbitCamera, Scene, SceneParams, TreeState, MAX_PIXEL_RATIO};

mod mesh;
mod render;

use render::GpuState;

const SEED_ENV: &str = "TREE_MORPH_SEED";
const PIXEL_RATIO_ENV: &str = "TREE_MORPH_PIXEL_RATIO";
const TITLE: &str = "Tree Morph";

/// Scene parameters with the optional seed and pixel ratio taken from the environment.
fn params_from_env() -> SceneParams {
    let seed = std::env::var(SEED_ENV)
        .ok()
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(err) => {
                log::warn!("ignoring {SEED_ENV}={raw:?}: {err}");
                None
            }
        });
    let pixel_ratio = std::env::var(PIXEL_RATIO_ENV)
        .ok()
        .and_then(|raw| match raw.trim().parse::<f32>() {
            Ok(ratio) if ratio.is_finite() => Some(ratio),
            _ => {
                log::warn!("ignoring {PIXEL_RATIO_ENV}={raw:?}");
                None
            }
        })
        .unwrap_or(1.0)
        .clamp(1.0, MAX_PIXEL_RATIO);
    SceneParams {
        seed,
        pixel_ratio,
        ..SceneParams::default()
    }
}

fn window_title(state: TreeState) -> String {
    format!("{TITLE} | {} | [Space] {}", state.status_label(), state.action_label())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let params = params_from_env();
    let mut scene = Scene::new(&params)?;
    let mut orbit = OrbitCamera::default();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(scene.state()))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, &scene))?;
    let start = Instant::now();
    let mut last_frame = start;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => gpu.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => match logical_key {
            Key::Named(NamedKey::Space | NamedKey::Enter) => {
                let state = scene.toggle();
                gpu.window.set_title(&window_title(state));
            }
            Key::Named(NamedKey::Escape) => elwt.exit(),
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let delta = (now - last_frame).as_secs_f32();
            last_frame = now;
            let frame = scene.frame(start.elapsed().as_secs_f32(), delta);
            orbit.advance(scene.state(), frame.delta);

            match gpu.render(&scene, &orbit) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, exiting");
                    elwt.exit()
                }
                Err(err) => log::warn!("frame skipped: {err:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
