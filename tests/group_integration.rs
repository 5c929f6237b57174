//! Integration tests for sprite groups: transform broadcast, screen
//! positions of nested children, content loading and the dirty sweep.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test group_integration
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use raylib::prelude::{Color, Vector2};

use yna2d::components::SpriteComponent;
use yna2d::components::mousedispatcher::MouseEventDispatcher;
use yna2d::entity::SceneNode;
use yna2d::entity::group::SpriteGroup;
use yna2d::entity::sprite::{Sprite, SpriteState};
use yna2d::error::Result;
use yna2d::resources::content::{ContentLoader, TextureHandle};
use yna2d::resources::framecontext::FrameContext;
use yna2d::resources::mouse::{MouseButton, MouseState};
use yna2d::resources::screensize::ScreenSize;
use yna2d::resources::touch::TouchState;
use yna2d::resources::worldtime::WorldTime;
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
    loads: Vec<String>,
}

impl ContentLoader for CountingLoader {
    fn load_texture(&mut self, asset: &str) -> Result<TextureHandle> {
        self.loads.push(asset.to_string());
        Ok(TextureHandle::new(asset, 16, 16))
    }

    fn unload_texture(&mut self, _handle: &TextureHandle) {}
}

fn sprite_at(name: &str, x: f32, y: f32) -> Box<Sprite> {
    Box::new(Sprite::with_asset(name, Vector2 { x, y }, name))
}

fn group_of_three(loader: &mut CountingLoader) -> SpriteGroup {
    let mut group = SpriteGroup::new("squad");
    group.add(sprite_at("a", 0.0, 0.0), loader).unwrap();
    group.add(sprite_at("b", 10.0, -5.0), loader).unwrap();
    group.add(sprite_at("c", -20.0, 7.5), loader).unwrap();
    group
}

fn positions(group: &SpriteGroup) -> Vec<Vector2> {
    group.iter().map(|c| c.position()).collect()
}

fn keys(sink: &RecordingSink) -> Vec<String> {
    sink.commands.iter().map(|c| c.texture.key.to_string()).collect()
}

/// Appends the owning sprite's name on every update.
struct UpdateLog {
    log: Rc<RefCell<Vec<String>>>,
}

impl SpriteComponent for UpdateLog {
    fn enabled(&self) -> bool {
        true
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn update(&mut self, sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {
        self.log.borrow_mut().push(sprite.name().to_string());
    }
}

#[test]
fn setting_group_position_translates_every_child_by_the_delta() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    group.set_position(Vector2 { x: 5.0, y: 5.0 });
    let before = positions(&group);

    group.set_position(Vector2 { x: 105.0, y: -45.0 });
    let after = positions(&group);

    for (b, a) in before.iter().zip(after.iter()) {
        assert!(approx_eq(a.x - b.x, 100.0));
        assert!(approx_eq(a.y - b.y, -50.0));
    }
    // Offsets between siblings are preserved.
    assert!(approx_eq(after[1].x - after[0].x, 10.0));
    assert!(approx_eq(after[2].y - after[0].y, 7.5));
}

#[test]
fn move_to_and_translate_broadcast_the_same_way() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    group.move_to(3.0, 4.0);
    group.translate(1.0, 1.0);

    assert!(approx_eq(group.position().x, 4.0));
    let b = group.child_by_name("b").unwrap().position();
    assert!(approx_eq(b.x, 14.0));
    assert!(approx_eq(b.y, 0.0));
}

#[test]
fn loading_a_group_loads_each_child_once() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    assert!(loader.loads.is_empty());

    group.load_content(&mut loader).unwrap();
    group.load_content(&mut loader).unwrap();
    assert_eq!(loader.loads, vec!["a", "b", "c"]);

    // Late children are loaded on arrival.
    group.add(sprite_at("d", 0.0, 0.0), &mut loader).unwrap();
    assert_eq!(loader.loads.len(), 4);
    assert!(approx_eq(group.width(), 16.0));
}

#[test]
fn children_hit_test_against_their_screen_position() {
    let mut loader = CountingLoader::default();
    let mut outer = SpriteGroup::new("outer");
    outer.set_position(Vector2 { x: 100.0, y: 100.0 });

    let mut button = Sprite::with_asset("button", Vector2 { x: 10.0, y: 10.0 }, "button");
    let clicked = button.add_component::<MouseEventDispatcher>().clicked.channel();
    outer.add(Box::new(button), &mut loader).unwrap();
    outer.load_content(&mut loader).unwrap();

    let time = WorldTime::from_delta(0.016);
    let touch = TouchState::new();
    let mut mouse = MouseState::at(115.0, 115.0);
    mouse.press(MouseButton::Left);
    let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));

    outer.update(&ctx, None);
    outer.post_update(&ctx);

    let button = outer.child_as::<Sprite>("button").unwrap();
    assert!(approx_eq(button.state().screen_position().x, 110.0));
    assert!(button.state().clicked);
    assert_eq!(clicked.try_iter().count(), 1);
}

#[test]
fn nested_groups_stack_screen_positions() {
    let mut loader = CountingLoader::default();
    let mut outer = SpriteGroup::new("outer");
    outer.set_position(Vector2 { x: 100.0, y: 100.0 });

    let mut inner = SpriteGroup::new("inner");
    inner.set_position(Vector2 { x: 10.0, y: 10.0 });
    let mut leaf = Sprite::with_asset("leaf", Vector2 { x: 1.0, y: 1.0 }, "leaf");
    let clicked = leaf.add_component::<MouseEventDispatcher>().clicked.channel();
    inner.add(Box::new(leaf), &mut loader).unwrap();
    outer.add(Box::new(inner), &mut loader).unwrap();
    outer.load_content(&mut loader).unwrap();
    assert_eq!(loader.loads, vec!["leaf"]);

    let time = WorldTime::from_delta(0.016);
    let touch = TouchState::new();
    let mut mouse = MouseState::at(112.0, 112.0);
    mouse.press(MouseButton::Left);
    let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));

    outer.update(&ctx, None);
    outer.post_update(&ctx);

    let inner = outer.child_as::<SpriteGroup>("inner").unwrap();
    assert!(approx_eq(inner.screen_position().x, 110.0));
    let leaf = inner.child_as::<Sprite>("leaf").unwrap();
    let screen = leaf.state().screen_position();
    assert!(approx_eq(screen.x, 111.0));
    assert!(approx_eq(screen.y, 111.0));
    assert!(leaf.state().clicked);
    assert_eq!(clicked.try_iter().count(), 1);

    // Moving the outer group reaches the grandchild through the inner one.
    outer.set_position(Vector2 { x: 150.0, y: 80.0 });
    let inner = outer.child_as::<SpriteGroup>("inner").unwrap();
    assert!(approx_eq(inner.position().x, 60.0));
    assert!(approx_eq(inner.position().y, -10.0));
    let leaf = inner.child_as::<Sprite>("leaf").unwrap().position();
    assert!(approx_eq(leaf.x, 51.0));
    assert!(approx_eq(leaf.y, -19.0));
}

#[test]
fn children_draw_in_insertion_order_every_frame() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    group.load_content(&mut loader).unwrap();

    let time = WorldTime::from_delta(0.016);
    let mouse = MouseState::default();
    let touch = TouchState::new();
    let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));

    for _ in 0..2 {
        let mut sink = RecordingSink::default();
        group.update(&ctx, None);
        group.post_update(&ctx);
        group.draw(&ctx, &mut sink);
        assert_eq!(keys(&sink), vec!["a", "b", "c"]);
    }

    group.child_by_name_mut("b").unwrap().die();
    group.remove_dirty();
    let mut sink = RecordingSink::default();
    group.update(&ctx, None);
    group.post_update(&ctx);
    group.draw(&ctx, &mut sink);
    assert_eq!(keys(&sink), vec!["a", "c"]);
}

#[test]
fn children_update_in_insertion_order_until_reordered() {
    let mut loader = CountingLoader::default();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut group = SpriteGroup::new("squad");
    for name in ["a", "b", "c"] {
        let mut sprite = Sprite::with_asset(name, Vector2::zero(), name);
        sprite.insert_component(UpdateLog { log: Rc::clone(&log) });
        group.add(Box::new(sprite), &mut loader).unwrap();
    }

    let time = WorldTime::from_delta(0.016);
    let mouse = MouseState::default();
    let touch = TouchState::new();
    let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));

    group.update(&ctx, None);
    group.update(&ctx, None);
    assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "b", "c"]);

    // Removing and re-adding moves the child to the end.
    let b = group.remove("b").unwrap();
    group.add(b, &mut loader).unwrap();
    log.borrow_mut().clear();
    group.update(&ctx, None);
    assert_eq!(*log.borrow(), vec!["a", "c", "b"]);
    assert_eq!(group.child_at(2).unwrap().name(), "b");
}

#[test]
fn dead_children_are_swept_and_not_drawn() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    group.load_content(&mut loader).unwrap();
    group.child_by_name_mut("b").unwrap().die();

    let time = WorldTime::from_delta(0.016);
    let mouse = MouseState::default();
    let touch = TouchState::new();
    let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));
    let mut sink = RecordingSink::default();
    group.update(&ctx, None);
    group.post_update(&ctx);
    group.draw(&ctx, &mut sink);
    assert_eq!(sink.commands.len(), 2);

    assert_eq!(group.remove_dirty(), 1);
    assert_eq!(group.len(), 2);
    assert!(group.child_by_name("b").is_none());
    assert_eq!(group.child_at(1).unwrap().name(), "c");
}

#[test]
fn color_reaches_every_child() {
    let mut loader = CountingLoader::default();
    let mut group = group_of_three(&mut loader);
    group.set_color(Color::RED);
    let red = Color::RED;
    for child in group.iter() {
        let c = child.color();
        assert_eq!((c.r, c.g, c.b, c.a), (red.r, red.g, red.b, red.a));
    }
}
