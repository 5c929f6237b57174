//! yna2d playground.
//!
//! A small scene exercising the sprite layer on raylib:
//! - bouncing balls driven by [`SpritePhysics`] with wraparound; clicking one
//!   marks it dead and the scene sweeps it away
//! - an animated hero whose animation switches on click
//! - a sprite group orbiting the screen centre, moved as a unit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --assets ./assets/textures --sprites 64
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

use yna2d::components::animator::{AnimationSet, SpriteAnimator};
use yna2d::components::mousedispatcher::MouseEventDispatcher;
use yna2d::components::physics::SpritePhysics;
use yna2d::components::touchdispatcher::TouchEventDispatcher;
use yna2d::entity::SceneNode;
use yna2d::entity::group::SpriteGroup;
use yna2d::entity::sprite::Sprite;
use yna2d::error::Result;
use yna2d::resources::camera::ViewportCamera;
use yna2d::resources::content::ContentLoader;
use yna2d::resources::framecontext::FrameContext;
use yna2d::resources::gameconfig::GameConfig;
use yna2d::resources::mouse::MouseState;
use yna2d::resources::screensize::ScreenSize;
use yna2d::resources::texturestore::{RaylibContent, TextureStore};
use yna2d::resources::touch::TouchState;
use yna2d::resources::worldtime::WorldTime;
use yna2d::states::manager::StateManager;
use yna2d::states::scene::SceneState;
use yna2d::systems::input::{poll_mouse_state, poll_touch_state};
use yna2d::systems::render::RaylibSink;

const HERO: &str = "hero";
const ORBIT: &str = "orbit";
const ORBIT_RADIUS: f32 = 90.0;

/// Used when no animation file is given: a 4x1 strip of 32px frames.
const DEFAULT_HERO_ANIMATIONS: &str = r#"{
    "frame_width": 32,
    "frame_height": 32,
    "animations": [
        { "name": "walk", "start": 0, "end": 3, "fps": 8 },
        { "name": "back", "start": 0, "end": 3, "fps": 8, "reversed": true }
    ]
}"#;

/// yna2d sprite playground
#[derive(Parser)]
#[command(version, about = "Sprite and entity composition playground on raylib")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Texture directory. Overrides the configured asset root.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Animation set (JSON) for the hero sprite.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Number of bouncing sprites.
    #[arg(long, default_value_t = 32)]
    sprites: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    if let Some(assets) = cli.assets.clone() {
        config.asset_root = assets;
    }

    let animations = match &cli.animations {
        Some(path) => AnimationSet::load(path)?,
        None => AnimationSet::from_json(DEFAULT_HERO_ANIMATIONS)?,
    };

    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("yna2d");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    let (render_width, render_height) = config.render_size();
    let screen = ScreenSize::new(render_width as i32, render_height as i32);

    let mut textures = TextureStore::new(&config.asset_root);
    let mut states = StateManager::new();
    states.clear_color = Color::DARKBLUE;
    {
        let mut content = RaylibContent::new(&mut rl, &thread, &mut textures);
        let scene = build_scene(&mut content, &animations, cli.sprites, screen)?;
        states.add(Box::new(scene), &mut content)?;
        states.initialize();
        states.load_content(&mut content)?;
    }
    info!("Playground ready: {} textures", textures.len());

    let camera = ViewportCamera::new();
    let mut time = WorldTime::default();
    let mut mouse = MouseState::default();
    let mut touch = TouchState::new();

    while !rl.window_should_close() {
        let window = ScreenSize::new(rl.get_screen_width(), rl.get_screen_height());
        let camera2d = camera.to_window_camera2d(screen, window);

        time.advance(rl.get_frame_time());
        poll_mouse_state(&rl, camera2d, &mut mouse);
        poll_touch_state(&rl, camera2d, &mut touch, config.max_touch_points);

        let ctx = FrameContext::new(&time, &mouse, &touch, screen);
        states.update(&ctx);

        let mut sink = RaylibSink::new(&textures);
        states.draw(&ctx, &mut sink);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(states.clear_color);
        {
            let mut d2 = d.begin_mode2D(camera2d);
            sink.flush(&mut d2);
        }
        d.draw_fps(10, 10);
    }

    let mut content = RaylibContent::new(&mut rl, &thread, &mut textures);
    states.unload_content(&mut content);
    info!("Bye");
    Ok(())
}

fn build_scene(
    content: &mut dyn ContentLoader,
    animations: &AnimationSet,
    count: usize,
    screen: ScreenSize,
) -> Result<SceneState> {
    let center = Vector2 {
        x: screen.w as f32 / 2.0,
        y: screen.h as f32 / 2.0,
    };
    let mut scene = SceneState::new("playground").with_update_hook(move |root, ctx| {
        for node in root.iter_mut() {
            let Some(sprite) = (**node).as_any_mut().downcast_mut::<Sprite>() else {
                continue;
            };
            if !sprite.state().clicked {
                continue;
            }
            if sprite.state().name() == HERO {
                let next = sprite
                    .component::<SpriteAnimator>()
                    .and_then(|a| a.current_animation_name())
                    .map(|name| if name == "walk" { "back" } else { "walk" })
                    .unwrap_or("walk");
                if let Err(e) = sprite.play_animation(next) {
                    warn!("{e}");
                }
            } else {
                sprite.lifecycle_mut().die();
            }
        }

        if let Some(orbit) = root.child_by_name_mut(ORBIT) {
            let angle = ctx.time.elapsed;
            orbit.set_position(Vector2 {
                x: center.x + angle.cos() * ORBIT_RADIUS,
                y: center.y + angle.sin() * ORBIT_RADIUS,
            });
            orbit.set_rotation(angle);
        }
    });

    for i in 0..count {
        let position = Vector2 {
            x: fastrand::f32() * screen.w as f32,
            y: fastrand::f32() * screen.h as f32,
        };
        let velocity = Vector2 {
            x: fastrand::f32() * 4.0 - 2.0,
            y: fastrand::f32() * 4.0 - 2.0,
        };
        let mut ball = Sprite::with_asset(format!("ball{i}"), position, "ball");
        ball.state_mut().layer_depth = 1.0;
        ball.insert_component(SpritePhysics::new().with_velocity(velocity))
            .set_allow_wraparound(true);
        ball.add_component::<MouseEventDispatcher>();
        ball.add_component::<TouchEventDispatcher>();
        scene.add(Box::new(ball), content)?;
    }

    let mut hero = Sprite::with_asset(HERO, center, "hero");
    hero.state_mut().layer_depth = 2.0;
    hero.add_component::<SpriteAnimator>().flip_reversed = true;
    hero.add_component::<MouseEventDispatcher>();
    hero.load_content(content)?;
    hero.with_component(|animator: &mut SpriteAnimator, state| {
        animator.apply_set(state, animations)?;
        animator.play(state, "walk")
    })
    .transpose()?;
    hero.insert_component(SpritePhysics::new().with_velocity(Vector2 { x: 1.5, y: 0.0 }))
        .set_force_inside_screen(true);
    scene.add(Box::new(hero), content)?;

    let mut orbit = SpriteGroup::new(ORBIT);
    for i in 0..3 {
        let offset = Vector2 {
            x: (i as f32 - 1.0) * 24.0,
            y: 0.0,
        };
        let mut moon = Sprite::with_asset(format!("moon{i}"), offset, "ball");
        moon.state_mut().color = Color::GOLD;
        orbit.add(Box::new(moon), content)?;
    }
    orbit.set_position(center);
    scene.add(Box::new(orbit), content)?;

    Ok(scene)
}
