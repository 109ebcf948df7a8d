//! Recycling entity pools.
//!
//! An [`EntityPool`] owns a `Vec` of records that are created once and reused
//! for the whole session. Slots are addressed by generational [`PoolId`]s: a
//! handle kept past its record's release stops resolving instead of aliasing
//! whatever reuses the slot next.

use danmaku_core::components::{HostileProjectile, Hostile, Particle, Projectile};

/// A record that can live in an [`EntityPool`].
pub trait Poolable: Default {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

macro_rules! impl_poolable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Poolable for $ty {
                fn is_active(&self) -> bool {
                    self.active
                }
                fn set_active(&mut self, active: bool) {
                    self.active = active;
                }
            }
        )*
    };
}

impl_poolable!(Projectile, HostileProjectile, Hostile, Particle);

/// Generational handle to a pooled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId {
    index: u32,
    generation: u32,
}

impl PoolId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Fixed-capacity recycler that grows on overflow instead of failing.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    label: &'static str,
    items: Vec<T>,
    generations: Vec<u32>,
    /// Inactive slot indices, reused LIFO.
    free: Vec<u32>,
    active_count: usize,
}

impl<T: Poolable> EntityPool<T> {
    /// Warm a pool with `capacity` inactive records.
    pub fn new(label: &'static str, capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, T::default);
        Self {
            label,
            items,
            generations: vec![0; capacity],
            free: (0..capacity as u32).rev().collect(),
            active_count: 0,
        }
    }

    /// Take an inactive record, growing the pool when none is left. Only the
    /// active flag is set; the caller initializes every other field it needs.
    pub fn acquire(&mut self) -> (PoolId, &mut T) {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.items.push(T::default());
                self.generations.push(0);
                log::debug!("{} pool grew to {} records", self.label, self.items.len());
                (self.items.len() - 1) as u32
            }
        };
        let slot = index as usize;
        self.active_count += 1;
        let item = &mut self.items[slot];
        item.set_active(true);
        let id = PoolId {
            index,
            generation: self.generations[slot],
        };
        (id, item)
    }

    /// Return a record to the pool. Releasing an inactive record or a stale
    /// handle is a no-op; returns whether anything was released.
    pub fn release(&mut self, id: PoolId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let slot = id.index();
        self.items[slot].set_active(false);
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(id.index);
        self.active_count -= 1;
        true
    }

    /// Release every handle that is still live; returns how many were.
    pub fn release_batch<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = PoolId>,
    {
        ids.into_iter().filter(|&id| self.release(id)).count()
    }

    /// Release every active record matching `pred`.
    pub fn release_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut released = 0;
        for slot in 0..self.items.len() {
            if self.items[slot].is_active() && pred(&self.items[slot]) {
                let id = PoolId {
                    index: slot as u32,
                    generation: self.generations[slot],
                };
                if self.release(id) {
                    released += 1;
                }
            }
        }
        released
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.release_where(|_| true);
    }

    pub fn get(&self, id: PoolId) -> Option<&T> {
        self.is_live(id).then(|| &self.items[id.index()])
    }

    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut T> {
        if self.is_live(id) {
            Some(&mut self.items[id.index()])
        } else {
            None
        }
    }

    /// Lazily iterate the live records. No ordering guarantee.
    pub fn active(&self) -> impl Iterator<Item = (PoolId, &T)> + '_ {
        self.items
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter(|(_, (item, _))| item.is_active())
            .map(|(slot, (item, &generation))| {
                (
                    PoolId {
                        index: slot as u32,
                        generation,
                    },
                    item,
                )
            })
    }

    /// Mutable counterpart of [`EntityPool::active`].
    pub fn active_mut(&mut self) -> impl Iterator<Item = (PoolId, &mut T)> + '_ {
        self.items
            .iter_mut()
            .zip(&self.generations)
            .enumerate()
            .filter(|(_, (item, _))| item.is_active())
            .map(|(slot, (item, &generation))| {
                (
                    PoolId {
                        index: slot as u32,
                        generation,
                    },
                    item,
                )
            })
    }

    /// Write the handles of all live records into `out` (cleared first).
    pub fn collect_active_ids(&self, out: &mut Vec<PoolId>) {
        out.clear();
        out.extend(self.active().map(|(id, _)| id));
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Records owned, live or not.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn is_live(&self, id: PoolId) -> bool {
        let slot = id.index();
        slot < self.items.len()
            && self.generations[slot] == id.generation
            && self.items[slot].is_active()
    }
}
