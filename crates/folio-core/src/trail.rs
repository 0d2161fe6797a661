//! Bounded cursor trail.
//!
//! Items leave the trail along two independent paths: capacity eviction
//! when a new item pushes the count over the bound, and expiry once their
//! lifetime has passed. Both go through [`Trail::remove`], which is keyed
//! by id and reports whether anything was actually removed, so an item
//! evicted early is simply not found again when its lifetime ends.

use crate::constants::{TRAIL_CAPACITY, TRAIL_FADE_AFTER_SEC, TRAIL_LIFETIME_SEC};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrailId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct TrailItem {
    pub id: TrailId,
    pub x: f32,
    pub y: f32,
    pub created_at: f64,
    /// Index into the trail's image set.
    pub image: usize,
    pub faded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub capacity: usize,
    pub image_count: usize,
    pub fade_after: f64,
    pub lifetime: f64,
}

impl TrailConfig {
    pub fn with_images(image_count: usize) -> Self {
        Self {
            capacity: TRAIL_CAPACITY,
            image_count,
            fade_after: TRAIL_FADE_AFTER_SEC,
            lifetime: TRAIL_LIFETIME_SEC,
        }
    }
}

/// What changed during a [`Trail::tick`].
#[derive(Debug, Default, PartialEq)]
pub struct TrailTick {
    pub faded: Vec<TrailId>,
    pub removed: Vec<TrailId>,
}

pub struct Trail {
    config: TrailConfig,
    items: VecDeque<TrailItem>,
    next_id: u64,
    next_image: usize,
}

impl Trail {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            items: VecDeque::with_capacity(config.capacity + 1),
            config,
            next_id: 0,
            next_image: 0,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn items(&self) -> impl Iterator<Item = &TrailItem> {
        self.items.iter()
    }

    pub fn contains(&self, id: TrailId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Spawn an item at the pointer. Returns the ids evicted to stay within
    /// capacity, oldest first.
    pub fn push(&mut self, x: f32, y: f32, now: f64) -> (TrailId, Vec<TrailId>) {
        let id = TrailId(self.next_id);
        self.next_id += 1;
        let image = self.next_image;
        if self.config.image_count > 0 {
            self.next_image = (self.next_image + 1) % self.config.image_count;
        }
        self.items.push_back(TrailItem {
            id,
            x,
            y,
            created_at: now,
            image,
            faded: false,
        });
        let mut evicted = Vec::new();
        while self.items.len() > self.config.capacity {
            if let Some(oldest) = self.items.front().map(|i| i.id) {
                if self.remove(oldest) {
                    evicted.push(oldest);
                }
            }
        }
        (id, evicted)
    }

    /// Fade items past `fade_after` and drop items past `lifetime`.
    pub fn tick(&mut self, now: f64) -> TrailTick {
        let mut out = TrailTick::default();
        for item in self.items.iter_mut() {
            if !item.faded && now - item.created_at >= self.config.fade_after {
                item.faded = true;
                out.faded.push(item.id);
            }
        }
        let expired: Vec<TrailId> = self
            .items
            .iter()
            .filter(|i| now - i.created_at >= self.config.lifetime)
            .map(|i| i.id)
            .collect();
        for id in expired {
            if self.remove(id) {
                out.removed.push(id);
            }
        }
        out
    }

    /// Remove one item. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: TrailId) -> bool {
        match self.items.iter().position(|i| i.id == id) {
            Some(pos) => self.items.remove(pos).is_some(),
            None => false,
        }
    }

    /// Drop every item, returning their ids.
    pub fn clear(&mut self) -> Vec<TrailId> {
        self.items.drain(..).map(|i| i.id).collect()
    }
}
