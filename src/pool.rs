/// Fixed-capacity object pool with circular-index allocation.
///
/// Slots are allocated round-robin from a cursor that wraps at `capacity`.
/// Releasing a slot only clears its active flag; the stale value stays in
/// place and is never handed out by the enumeration methods.

use serde::{Deserialize, Serialize};

/// What `allocate` does once the slot at the cursor is still live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationPolicy {
    /// Overwrite the slot at the cursor even if it is active. The entity that
    /// lived there is lost.
    Recycle,
    /// Skip forward to the next inactive slot; fail when none is left.
    Reject,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    active: bool,
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    cursor: usize,
    policy: SaturationPolicy,
}

impl<T: Default> Pool<T> {
    /// Build a pool with every slot inactive.
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, policy: SaturationPolicy) -> Self {
        assert!(capacity > 0, "pool capacity must be non-zero");
        let slots = (0..capacity)
            .map(|_| Slot {
                value: T::default(),
                active: false,
            })
            .collect();
        Pool {
            slots,
            cursor: 0,
            policy,
        }
    }
}

impl<T> Pool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index the next allocation starts from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Store `value` in a slot, mark it active and return its index.
    ///
    /// Returns `None` only under [`SaturationPolicy::Reject`] when every slot
    /// is active.
    pub fn allocate(&mut self, value: T) -> Option<usize> {
        let index = match self.policy {
            SaturationPolicy::Recycle => self.cursor,
            SaturationPolicy::Reject => self.next_inactive()?,
        };
        self.slots[index] = Slot {
            value,
            active: true,
        };
        self.cursor = (index + 1) % self.slots.len();
        Some(index)
    }

    fn next_inactive(&self) -> Option<usize> {
        let cap = self.slots.len();
        (0..cap)
            .map(|offset| (self.cursor + offset) % cap)
            .find(|&i| !self.slots[i].active)
    }

    /// Deactivate a slot. Out-of-range or already inactive indices are ignored.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }

    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).map(|s| s.active).unwrap_or(false)
    }

    /// The value in an active slot.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|s| s.active)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|s| s.active)
            .map(|s| &mut s.value)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Active slots in array order (not allocation order).
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.value))
    }

    pub fn for_each_active<F: FnMut(usize, &T)>(&self, mut f: F) {
        for (i, value) in self.iter_active() {
            f(i, value);
        }
    }

    pub fn for_each_active_mut<F: FnMut(usize, &mut T)>(&mut self, mut f: F) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.active {
                f(i, &mut slot.value);
            }
        }
    }

    /// Run `f` on every active value and release the ones it returns `false` for.
    pub fn retain_active<F: FnMut(&mut T) -> bool>(&mut self, mut f: F) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if !f(&mut slot.value) {
                slot.active = false;
            }
        }
    }
}
