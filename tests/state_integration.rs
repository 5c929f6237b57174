//! Integration tests for the state manager driving scene states.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test state_integration
//! ```

use std::cell::Cell;
use std::rc::Rc;

use raylib::prelude::Vector2;

use yna2d::components::mousedispatcher::MouseEventDispatcher;
use yna2d::components::physics::SpritePhysics;
use yna2d::entity::SceneNode;
use yna2d::entity::sprite::Sprite;
use yna2d::error::{EngineError, Result};
use yna2d::resources::content::{ContentLoader, TextureHandle};
use yna2d::resources::framecontext::FrameContext;
use yna2d::resources::mouse::{MouseButton, MouseState};
use yna2d::resources::screensize::ScreenSize;
use yna2d::resources::touch::TouchState;
use yna2d::resources::worldtime::WorldTime;
use yna2d::states::GameState;
use yna2d::states::manager::StateManager;
use yna2d::states::scene::SceneState;
use yna2d::systems::render::{DrawCommand, DrawSink};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Default)]
struct RecordingSink {
    commands: Vec<DrawCommand>,
}

impl DrawSink for RecordingSink {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[derive(Default)]
struct CountingLoader {
    loads: usize,
}

impl ContentLoader for CountingLoader {
    fn load_texture(&mut self, asset: &str) -> Result<TextureHandle> {
        self.loads += 1;
        Ok(TextureHandle::new(asset, 20, 20))
    }

    fn unload_texture(&mut self, _handle: &TextureHandle) {}
}

struct Host {
    time: WorldTime,
    mouse: MouseState,
    touch: TouchState,
}

impl Host {
    fn new() -> Self {
        Self {
            time: WorldTime::from_delta(1.0 / 60.0),
            mouse: MouseState::at(-50.0, -50.0),
            touch: TouchState::new(),
        }
    }

    fn ctx(&self) -> FrameContext<'_> {
        FrameContext::new(&self.time, &self.mouse, &self.touch, ScreenSize::new(320, 200))
    }
}

fn scene_with(name: &str, sprites: &[(&str, f32, f32)], loader: &mut CountingLoader) -> Box<SceneState> {
    let mut scene = SceneState::new(name);
    for (sprite, x, y) in sprites {
        scene
            .add(Box::new(Sprite::with_asset(*sprite, Vector2 { x: *x, y: *y }, "tile")), loader)
            .unwrap();
    }
    Box::new(scene)
}

fn ready_manager(loader: &mut CountingLoader) -> StateManager {
    let mut manager = StateManager::new();
    manager
        .add(scene_with("level", &[("a", 0.0, 0.0), ("b", 40.0, 0.0)], loader), loader)
        .unwrap();
    manager
        .add(scene_with("hud", &[("score", 0.0, 180.0)], loader), loader)
        .unwrap();
    manager.initialize();
    manager.load_content(loader).unwrap();
    manager
}

#[test]
fn states_draw_in_insertion_order() {
    let mut loader = CountingLoader::default();
    let mut manager = ready_manager(&mut loader);
    assert_eq!(loader.loads, 3);

    let host = Host::new();
    let mut sink = RecordingSink::default();
    manager.update(&host.ctx());
    manager.draw(&host.ctx(), &mut sink);

    let ys: Vec<f32> = sink.commands.iter().map(|c| c.position.y).collect();
    assert_eq!(ys.len(), 3);
    assert!(approx_eq(ys[2], 180.0));
}

#[test]
fn loading_the_manager_twice_loads_nothing_new() {
    let mut loader = CountingLoader::default();
    let mut manager = ready_manager(&mut loader);
    manager.load_content(&mut loader).unwrap();
    manager.initialize();
    assert_eq!(loader.loads, 3);
}

#[test]
fn hidden_states_are_not_drawn_and_disabled_ones_not_updated() {
    let mut loader = CountingLoader::default();
    let mut manager = StateManager::new();
    let mut level = SceneState::new("level");
    let mut mover = Sprite::with_asset("mover", Vector2::zero(), "tile");
    mover.insert_component(SpritePhysics::new().with_velocity(Vector2 { x: 2.0, y: 0.0 }));
    level.add(Box::new(mover), &mut loader).unwrap();
    manager.add(Box::new(level), &mut loader).unwrap();
    manager.initialize();
    manager.load_content(&mut loader).unwrap();

    manager.get_mut("level").unwrap().lifecycle_mut().set_enabled(false);
    let host = Host::new();
    manager.update(&host.ctx());
    let scene = manager.get_as_mut::<SceneState>("level").unwrap();
    let mover = scene.root().child_as::<Sprite>("mover").unwrap();
    assert!(approx_eq(mover.state().position.x, 0.0));

    manager.get_mut("level").unwrap().lifecycle_mut().set_visible(false);
    let mut sink = RecordingSink::default();
    manager.draw(&host.ctx(), &mut sink);
    assert!(sink.commands.is_empty());
}

#[test]
fn late_state_is_loaded_on_arrival() {
    let mut loader = CountingLoader::default();
    let mut manager = ready_manager(&mut loader);
    manager
        .add(scene_with("pause", &[("panel", 0.0, 0.0)], &mut loader), &mut loader)
        .unwrap();
    assert_eq!(loader.loads, 4);
    assert!(manager.get("pause").unwrap().lifecycle().content_loaded());
}

#[test]
fn switching_states_by_name() {
    let mut loader = CountingLoader::default();
    let mut manager = ready_manager(&mut loader);

    manager.set_active_by_name("hud", true).unwrap();
    assert!(!manager.get("level").unwrap().lifecycle().active());
    assert!(manager.get("hud").unwrap().lifecycle().active());

    let err = manager.set_active_by_name("credits", true).unwrap_err();
    assert!(matches!(err, EngineError::UnknownState(name) if name == "credits"));
}

#[test]
fn replacing_a_state_keeps_its_slot() {
    let mut loader = CountingLoader::default();
    let mut manager = ready_manager(&mut loader);
    let replaced = manager
        .replace("level", scene_with("level2", &[("x", 0.0, 0.0)], &mut loader), &mut loader)
        .unwrap();
    assert!(replaced);
    assert_eq!(manager.index_of("level2"), Some(0));
    assert!(manager.get("level").is_none());
    assert_eq!(loader.loads, 4);

    let clash = manager.replace("level2", scene_with("hud", &[], &mut loader), &mut loader);
    assert!(matches!(clash, Err(EngineError::DuplicateName(_))));
}

#[test]
fn clicked_sprite_dies_through_the_scene_hook_and_is_swept() {
    let mut loader = CountingLoader::default();
    let hook_runs = Rc::new(Cell::new(0));
    let runs = Rc::clone(&hook_runs);
    let mut scene = SceneState::new("level").with_update_hook(move |root, _ctx| {
        runs.set(runs.get() + 1);
        for node in root.iter_mut() {
            let clicked = (**node)
                .as_any()
                .downcast_ref::<Sprite>()
                .is_some_and(|s| s.state().clicked);
            if clicked {
                node.die();
            }
        }
    });
    let mut target = Sprite::with_asset("target", Vector2 { x: 100.0, y: 100.0 }, "tile");
    target.add_component::<MouseEventDispatcher>();
    scene.add(Box::new(target), &mut loader).unwrap();
    scene
        .add(Box::new(Sprite::with_asset("bystander", Vector2::zero(), "tile")), &mut loader)
        .unwrap();

    let mut manager = StateManager::new();
    manager.add(Box::new(scene), &mut loader).unwrap();
    manager.initialize();
    manager.load_content(&mut loader).unwrap();

    let mut host = Host::new();
    host.mouse = MouseState::at(105.0, 105.0);
    host.mouse.press(MouseButton::Left);
    manager.update(&host.ctx());

    assert_eq!(hook_runs.get(), 1);
    let scene = manager.get_as_mut::<SceneState>("level").unwrap();
    assert_eq!(scene.root().len(), 1);
    assert!(scene.root().child_by_name("target").is_none());
}
