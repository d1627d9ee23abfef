//! Composite of intersectables.

use lumen_math::Ray;

use super::{Intersectable, Intersection};

/// A flat collection of intersectables queried as one.
#[derive(Default)]
pub struct Geometries {
    items: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intersectable to the collection.
    pub fn add(&mut self, item: impl Intersectable + 'static) {
        self.items.push(Box::new(item));
    }

    /// Builder-style [`Geometries::add`].
    pub fn with(mut self, item: impl Intersectable + 'static) -> Self {
        self.add(item);
        self
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Intersectable for Geometries {
    fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>> {
        let mut all: Option<Vec<Intersection<'_>>> = None;
        for item in &self.items {
            if let Some(hits) = item.calculate_intersections(ray) {
                all.get_or_insert_with(Vec::new).extend(hits);
            }
        }
        all
    }
}

impl std::fmt::Debug for Geometries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geometries")
            .field("items", &self.items.len())
            .finish()
    }
}
