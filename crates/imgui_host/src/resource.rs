//! Resource lifecycle registry
//!
//! Long-lived objects that must be revalidated periodically (windows, for now)
//! live in a thread-wide slot map and are addressed through generation-checked
//! [`ResourceHandle`]s. A handle that outlived its resource, or one that was
//! forged from a raw integer by a binding layer, simply fails the lookup: the
//! registry checks membership first and the stored type second, so a
//! destroyed object is never touched.
//!
//! Every registered resource gets a [`Resource::heartbeat`] call on each
//! watchdog tick (see [`crate::watchdog`]).

use slotmap::{new_key_type, Key, KeyData, SlotMap};
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

new_key_type! {
    /// Untyped registry key
    pub struct ResourceKey;
}

/// Type-erased access to a concrete resource
pub trait AsAny: Any {
    /// Shared downcast access
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// What a resource wants after its heartbeat
pub enum Heartbeat {
    /// Nothing further to do
    Keep,
    /// Run this task once the resource is no longer borrowed
    ///
    /// The task may re-enter the registry, typically to unregister the
    /// resource itself.
    Retire(Box<dyn FnOnce()>),
}

impl fmt::Debug for Heartbeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("Keep"),
            Self::Retire(_) => f.write_str("Retire"),
        }
    }
}

/// Object kept alive and revalidated by the registry
pub trait Resource: AsAny {
    /// Periodic revalidation hook
    fn heartbeat(&mut self) -> Heartbeat;
}

/// Generation-checked handle to a resource of type `T`
pub struct ResourceHandle<T> {
    key: ResourceKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ResourceHandle<T> {
    const fn new(key: ResourceKey) -> Self {
        Self { key, _marker: PhantomData }
    }

    /// Untyped key
    pub const fn key(&self) -> ResourceKey {
        self.key
    }

    /// Opaque integer form for binding layers
    pub fn to_raw(self) -> u64 {
        self.key.data().as_ffi()
    }

    /// Rebuild a handle from [`ResourceHandle::to_raw`]
    ///
    /// Any value is accepted; use [`exists`] before trusting it.
    pub fn from_raw(raw: u64) -> Self {
        Self::new(KeyData::from_ffi(raw).into())
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceHandle<T> {}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> Hash for ResourceHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceHandle").field(&self.key).finish()
    }
}

struct Entry {
    type_id: TypeId,
    object: Rc<RefCell<dyn Resource>>,
}

thread_local! {
    static REGISTRY: RefCell<SlotMap<ResourceKey, Entry>> = RefCell::new(SlotMap::with_key());
}

/// Take ownership of `resource` and return its handle
pub fn register<T: Resource>(resource: T) -> ResourceHandle<T> {
    let object: Rc<RefCell<dyn Resource>> = Rc::new(RefCell::new(resource));
    let entry = Entry { type_id: TypeId::of::<T>(), object };
    let key = REGISTRY.with(|registry| registry.borrow_mut().insert(entry));
    ResourceHandle::new(key)
}

/// Remove and drop a resource
///
/// Returns `false` if the handle does not refer to a live `T`. The resource
/// is dropped after the registry is released, so its `Drop` may use the
/// registry.
pub fn unregister<T: Resource>(handle: ResourceHandle<T>) -> bool {
    let removed = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let matches = registry
            .get(handle.key)
            .is_some_and(|entry| entry.type_id == TypeId::of::<T>());
        if matches {
            registry.remove(handle.key)
        } else {
            None
        }
    });

    removed.is_some()
}

/// Whether `handle` refers to a live resource of exactly type `T`
pub fn exists<T: Resource>(handle: ResourceHandle<T>) -> bool {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(handle.key)
            .is_some_and(|entry| entry.type_id == TypeId::of::<T>())
    })
}

/// Run `f` on the live resource behind `handle`
///
/// Returns `None` when the handle is stale, of the wrong type, or the
/// resource is already borrowed further up the call stack.
pub fn with<T: Resource, R>(handle: ResourceHandle<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let object = lookup(handle.key, Some(TypeId::of::<T>()))?;

    let Ok(mut guard) = object.try_borrow_mut() else {
        log::debug!("Resource {:?} is busy, skipping access", handle.key);
        return None;
    };

    let resource: &mut dyn Resource = &mut *guard;
    resource.as_any_mut().downcast_mut::<T>().map(f)
}

/// Handles of every live resource of type `T`
pub fn handles<T: Resource>() -> Vec<ResourceHandle<T>> {
    keys(Some(TypeId::of::<T>())).into_iter().map(ResourceHandle::new).collect()
}

/// Number of live resources of type `T`
pub fn count<T: Resource>() -> usize {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .values()
            .filter(|entry| entry.type_id == TypeId::of::<T>())
            .count()
    })
}

/// Heartbeat every live resource
pub fn heartbeat_all() {
    run_heartbeats(&keys(None), None);
}

/// Heartbeat every live resource of type `T`
pub fn heartbeat<T: Resource>() {
    let type_id = TypeId::of::<T>();
    run_heartbeats(&keys(Some(type_id)), Some(type_id));
}

fn run_heartbeats(keys: &[ResourceKey], type_id: Option<TypeId>) {
    for &key in keys {
        // an earlier retirement may already have removed this one
        let Some(object) = lookup(key, type_id) else {
            continue;
        };

        let outcome = match object.try_borrow_mut() {
            Ok(mut resource) => resource.heartbeat(),
            Err(_) => {
                log::debug!("Resource {:?} is busy, skipping heartbeat", key);
                continue;
            }
        };

        if let Heartbeat::Retire(task) = outcome {
            task();
        }
    }
}

fn lookup(key: ResourceKey, type_id: Option<TypeId>) -> Option<Rc<RefCell<dyn Resource>>> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(key)
            .filter(|entry| type_id.map_or(true, |expected| entry.type_id == expected))
            .map(|entry| Rc::clone(&entry.object))
    })
}

fn keys(type_id: Option<TypeId>) -> Vec<ResourceKey> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .iter()
            .filter(|(_, entry)| type_id.map_or(true, |expected| entry.type_id == expected))
            .map(|(key, _)| key)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counter {
        handle: Option<ResourceHandle<Counter>>,
        beats: u32,
        retire_after: u32,
        dropped: Rc<Cell<bool>>,
    }

    impl Resource for Counter {
        fn heartbeat(&mut self) -> Heartbeat {
            self.beats += 1;
            match self.handle {
                Some(handle) if self.beats >= self.retire_after => {
                    Heartbeat::Retire(Box::new(move || {
                        unregister(handle);
                    }))
                }
                _ => Heartbeat::Keep,
            }
        }
    }

    impl Drop for Counter {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    struct Other;

    impl Resource for Other {
        fn heartbeat(&mut self) -> Heartbeat {
            Heartbeat::Keep
        }
    }

    fn counter(retire_after: u32) -> (Counter, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        let counter = Counter { handle: None, beats: 0, retire_after, dropped: Rc::clone(&dropped) };
        (counter, dropped)
    }

    fn register_counter(retire_after: u32) -> (ResourceHandle<Counter>, Rc<Cell<bool>>) {
        let (resource, dropped) = counter(retire_after);
        let handle = register(resource);
        with(handle, |counter| counter.handle = Some(handle));
        (handle, dropped)
    }

    #[test]
    fn test_register_and_unregister() {
        let (resource, dropped) = counter(u32::MAX);
        let handle = register(resource);
        assert!(exists(handle));
        assert_eq!(count::<Counter>(), 1);

        assert!(unregister(handle));
        assert!(dropped.get());
        assert!(!exists(handle));
        assert_eq!(count::<Counter>(), 0);
        assert!(!unregister(handle));
    }

    #[test]
    fn test_stale_handle_fails_after_slot_reuse() {
        let (first, _) = counter(u32::MAX);
        let stale = register(first);
        unregister(stale);

        let (second, _) = counter(u32::MAX);
        let fresh = register(second);
        assert!(exists(fresh));
        assert!(!exists(stale));
        assert!(with(stale, |_| ()).is_none());
        unregister(fresh);
    }

    #[test]
    fn test_exists_checks_exact_type() {
        let other = register(Other);
        let forged = ResourceHandle::<Counter>::from_raw(other.to_raw());
        assert!(!exists(forged));
        assert!(with(forged, |counter| counter.beats).is_none());
        assert!(exists(ResourceHandle::<Other>::from_raw(other.to_raw())));
        unregister(other);
    }

    #[test]
    fn test_unknown_raw_handles_are_rejected() {
        assert!(!exists(ResourceHandle::<Other>::from_raw(0)));
        assert!(!exists(ResourceHandle::<Other>::from_raw(0xDEAD_BEEF_0000_0001)));
    }

    #[test]
    fn test_heartbeat_retires_from_inside_the_pass() {
        let (keeper, keeper_dropped) = register_counter(u32::MAX);
        let (_, quitter_dropped) = register_counter(2);
        let other = register(Other);

        heartbeat_all();
        assert_eq!(count::<Counter>(), 2);

        heartbeat_all();
        assert_eq!(count::<Counter>(), 1);
        assert!(quitter_dropped.get());
        assert!(!keeper_dropped.get());
        assert_eq!(with(keeper, |counter| counter.beats), Some(2));
        assert!(exists(other));

        unregister(keeper);
        unregister(other);
    }

    #[test]
    fn test_typed_heartbeat_skips_other_types() {
        let (resource, _) = counter(u32::MAX);
        let handle = register(resource);
        register(Other);

        heartbeat::<Other>();
        assert_eq!(with(handle, |counter| counter.beats), Some(0));

        heartbeat::<Counter>();
        assert_eq!(with(handle, |counter| counter.beats), Some(1));
    }

    #[test]
    fn test_with_is_not_reentrant() {
        let handle = register(Other);
        let nested = with(handle, |_| with(handle, |_| ()));
        assert_eq!(nested, Some(None));
        unregister(handle);
    }
}
