//! Typed singleton storage shared by all components

use core::any::{Any, TypeId};
use std::collections::HashMap;

/// Resources keyed by type, e.g. the spatial index
#[derive(Default)]
pub struct Resources {
    data: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<R: Any>(&mut self, resource: R) {
        self.data.insert(TypeId::of::<R>(), Box::new(resource));
    }

    pub fn remove<R: Any>(&mut self) -> Option<R> {
        self.data
            .remove(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast::<R>().ok())
            .map(|b| *b)
    }

    pub fn get<R: Any>(&self) -> Option<&R> {
        self.data
            .get(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_ref::<R>())
    }

    pub fn get_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.data
            .get_mut(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_mut::<R>())
    }

    pub fn contains<R: Any>(&self) -> bool {
        self.data.contains_key(&TypeId::of::<R>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Gravity(f32);

    #[test]
    fn test_insert_get_remove() {
        let mut resources = Resources::new();
        resources.insert(Gravity(9.8));
        assert!(resources.contains::<Gravity>());

        if let Some(g) = resources.get_mut::<Gravity>() {
            g.0 = 1.6;
        }
        assert_eq!(resources.get::<Gravity>(), Some(&Gravity(1.6)));
        assert_eq!(resources.remove::<Gravity>(), Some(Gravity(1.6)));
        assert!(resources.get::<Gravity>().is_none());
    }
}
