//! Pluggable sprite behaviours.
//!
//! A [`Sprite`](crate::entity::sprite::Sprite) owns a [`ComponentList`] of
//! boxed [`SpriteComponent`]s. Each frame the sprite runs every enabled
//! component's `update`, in attachment order, and only then every enabled
//! component's `post_update`. A sprite carries at most one component of a
//! given type.
//!
//! Components never hold a reference to their sprite. Callbacks receive the
//! sprite's data as `&mut SpriteState` instead, which also keeps a component
//! from touching the component list while it is being iterated.
//!
//! Submodules overview:
//! - [`animator`] – named spritesheet animations and frame playback
//! - [`physics`] – velocity integration with screen clamp or wraparound
//! - [`mousedispatcher`] – pointer hit-testing and hover/click/leave events
//! - [`touchdispatcher`] – multi-touch hit-testing and per-finger events

pub mod animator;
pub mod mousedispatcher;
pub mod physics;
pub mod touchdispatcher;

use std::any::{Any, type_name};

use raylib::prelude::Rectangle;
use smallvec::SmallVec;

use crate::entity::sprite::SpriteState;
use crate::resources::framecontext::FrameContext;

/// Downcasting support for trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Behaviour attached to a sprite.
///
/// Disabled components are skipped in both phases.
pub trait SpriteComponent: AsAny {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    /// Called once, when the component is attached.
    fn initialize(&mut self, _sprite: &mut SpriteState) {}

    /// First phase. Runs after the sprite refreshed its screen position.
    fn update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>);

    /// Second phase. Runs after every component's `update`.
    fn post_update(&mut self, _sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {}
}

/// Whole-pixel containment test: left/top edges inclusive, right/bottom
/// exclusive. The point is truncated to integer pixels first.
pub fn hit_contains(bounds: &Rectangle, x: f32, y: f32) -> bool {
    let (px, py) = (x.trunc(), y.trunc());
    bounds.x <= px && px < bounds.x + bounds.width && bounds.y <= py && py < bounds.y + bounds.height
}

type ComponentBox = Box<dyn SpriteComponent>;

/// Ordered, type-unique component collection of one sprite.
#[derive(Default)]
pub struct ComponentList {
    components: SmallVec<[ComponentBox; 4]>,
}

impl std::fmt::Debug for ComponentList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentList")
            .field("len", &self.components.len())
            .finish()
    }
}

impl ComponentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a default `T`, or return the one already attached.
    pub fn add<T>(&mut self, sprite: &mut SpriteState) -> &mut T
    where
        T: SpriteComponent + Default,
    {
        match self.index_of::<T>() {
            Some(index) => self.typed_mut(index),
            None => self.attach(T::default(), sprite),
        }
    }

    /// Attach a pre-configured `T`. If a `T` is already attached, `component`
    /// is dropped and the existing one is returned.
    pub fn insert<T>(&mut self, component: T, sprite: &mut SpriteState) -> &mut T
    where
        T: SpriteComponent,
    {
        match self.index_of::<T>() {
            Some(index) => self.typed_mut(index),
            None => self.attach(component, sprite),
        }
    }

    pub fn get<T: SpriteComponent>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| (**c).as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: SpriteComponent>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| (**c).as_any_mut().downcast_mut::<T>())
    }

    /// Detach and return the `T`, if any.
    pub fn remove<T: SpriteComponent>(&mut self) -> Option<Box<T>> {
        let index = self.index_of::<T>()?;
        self.components.remove(index).into_any().downcast::<T>().ok()
    }

    pub fn contains<T: SpriteComponent>(&self) -> bool {
        self.index_of::<T>().is_some()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Run `update` on enabled components in attachment order.
    pub fn update_all(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        for component in self.components.iter_mut() {
            if component.enabled() {
                component.update(sprite, ctx);
            }
        }
    }

    /// Run `post_update` on enabled components in attachment order.
    pub fn post_update_all(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        for component in self.components.iter_mut() {
            if component.enabled() {
                component.post_update(sprite, ctx);
            }
        }
    }

    fn index_of<T: SpriteComponent>(&self) -> Option<usize> {
        self.components
            .iter()
            .position(|c| (**c).as_any().is::<T>())
    }

    fn attach<T: SpriteComponent>(&mut self, mut component: T, sprite: &mut SpriteState) -> &mut T {
        component.initialize(sprite);
        self.components.push(Box::new(component));
        self.typed_mut(self.components.len() - 1)
    }

    fn typed_mut<T: SpriteComponent>(&mut self, index: usize) -> &mut T {
        match (*self.components[index]).as_any_mut().downcast_mut::<T>() {
            Some(component) => component,
            None => unreachable!("component slot {index} does not hold a {}", type_name::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::mouse::MouseState;
    use crate::resources::screensize::ScreenSize;
    use crate::resources::touch::TouchState;
    use crate::resources::worldtime::WorldTime;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct Recorder {
        tag: &'static str,
        log: Log,
        enabled: bool,
        initialized: u32,
    }

    impl Recorder {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self {
                tag,
                log: Rc::clone(log),
                enabled: true,
                initialized: 0,
            }
        }
    }

    impl SpriteComponent for Recorder {
        fn enabled(&self) -> bool {
            self.enabled
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn initialize(&mut self, _sprite: &mut SpriteState) {
            self.initialized += 1;
        }
        fn update(&mut self, _sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {
            self.log.borrow_mut().push(format!("{}.update", self.tag));
        }
        fn post_update(&mut self, _sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {
            self.log.borrow_mut().push(format!("{}.post_update", self.tag));
        }
    }

    // Second type so two distinct components can be attached.
    struct Other(Recorder);

    impl SpriteComponent for Other {
        fn enabled(&self) -> bool {
            self.0.enabled
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.0.enabled = enabled;
        }
        fn update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
            self.0.update(sprite, ctx);
        }
        fn post_update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
            self.0.post_update(sprite, ctx);
        }
    }

    fn with_ctx(f: impl FnOnce(&FrameContext<'_>)) {
        let time = WorldTime::from_delta(1.0 / 60.0);
        let mouse = MouseState::default();
        let touch = TouchState::new();
        let ctx = FrameContext::new(&time, &mouse, &touch, ScreenSize::new(640, 360));
        f(&ctx);
    }

    #[test]
    fn test_hit_contains_edges() {
        let r = Rectangle {
            x: 10.0,
            y: 10.0,
            width: 5.0,
            height: 5.0,
        };
        assert!(hit_contains(&r, 10.0, 10.0));
        assert!(hit_contains(&r, 14.9, 14.9));
        assert!(!hit_contains(&r, 15.0, 12.0));
        assert!(!hit_contains(&r, 9.5, 12.0));
    }

    #[test]
    fn test_add_twice_returns_same_instance() {
        let mut state = SpriteState::new("s");
        let mut list = ComponentList::new();
        list.add::<Recorder>(&mut state).tag = "first";
        let again = list.add::<Recorder>(&mut state);
        assert_eq!(again.tag, "first");
        assert_eq!(again.initialized, 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_insert_keeps_existing_instance() {
        let log = Log::default();
        let mut state = SpriteState::new("s");
        let mut list = ComponentList::new();
        list.insert(Recorder::new("a", &log), &mut state);
        let kept = list.insert(Recorder::new("b", &log), &mut state);
        assert_eq!(kept.tag, "a");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_and_remove_absent_is_none() {
        let mut list = ComponentList::new();
        assert!(list.get::<Recorder>().is_none());
        assert!(list.get_mut::<Recorder>().is_none());
        assert!(list.remove::<Recorder>().is_none());
        assert!(!list.contains::<Recorder>());
    }

    #[test]
    fn test_remove_returns_component() {
        let log = Log::default();
        let mut state = SpriteState::new("s");
        let mut list = ComponentList::new();
        list.insert(Recorder::new("a", &log), &mut state);
        let removed = list.remove::<Recorder>().unwrap();
        assert_eq!(removed.tag, "a");
        assert!(list.is_empty());
    }

    #[test]
    fn test_phases_never_interleave() {
        let log = Log::default();
        let mut state = SpriteState::new("s");
        let mut list = ComponentList::new();
        list.insert(Recorder::new("a", &log), &mut state);
        list.insert(Other(Recorder::new("b", &log)), &mut state);

        with_ctx(|ctx| {
            list.update_all(&mut state, ctx);
            list.post_update_all(&mut state, ctx);
        });

        assert_eq!(
            *log.borrow(),
            vec!["a.update", "b.update", "a.post_update", "b.post_update"]
        );
    }

    #[test]
    fn test_disabled_component_is_skipped() {
        let log = Log::default();
        let mut state = SpriteState::new("s");
        let mut list = ComponentList::new();
        list.insert(Recorder::new("a", &log), &mut state)
            .set_enabled(false);
        list.insert(Other(Recorder::new("b", &log)), &mut state);

        with_ctx(|ctx| {
            list.update_all(&mut state, ctx);
            list.post_update_all(&mut state, ctx);
        });

        assert_eq!(*log.borrow(), vec!["b.update", "b.post_update"]);
    }
}
