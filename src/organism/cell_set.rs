//! Live-cell storage for `Organism`.
//!
//! An open-addressed linear-probing hash set keyed by `CellKey`. Slots are
//! lazily cleared with a generation stamp, so a retired generation's set can be
//! emptied in O(1) and refilled with the next one without touching the backing
//! array.

use super::cell::CellKey;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;
const MIN_SLOTS: usize = 16;

#[derive(Clone, Copy)]
#[repr(C)]
struct Slot {
    key: u64,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self { key: 0, stamp: 0 };
}

const MX: u64 = 0x517c_c1b7_2722_0a95;
const MY: u64 = 0x6c62_272e_07bb_0142;

#[inline(always)]
fn key_hash(key: u64) -> u64 {
    let x = key as u32 as u64;
    let y = key >> 32;
    // Per-axis multiply with y's lane rotated, then a finalizer fold so strided
    // layouts along either axis still spread over the low bucket bits.
    let mut h = x.wrapping_mul(MX) ^ y.wrapping_mul(MY).rotate_right(31);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^ (h >> 33)
}

#[inline]
fn slots_for(keys: usize) -> usize {
    keys.saturating_mul(LOAD_DEN)
        .div_ceil(LOAD_NUM)
        .next_power_of_two()
        .max(MIN_SLOTS)
}

pub struct CellSet {
    slots: Vec<Slot>,
    mask: usize,
    stamp: u32,
    len: usize,
}

impl Default for CellSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSet {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = slots_for(cap);
        Self {
            slots: vec![Slot::EMPTY; slots],
            mask: slots - 1,
            stamp: 1,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of keys the set holds before it has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len() * LOAD_NUM / LOAD_DEN
    }

    /// Forget every key. O(1) unless the stamp wraps around.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = slots_for(keys);
        if needed > self.slots.len() {
            self.resize(needed);
        }
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        (self.len + 1) * LOAD_DEN > self.slots.len() * LOAD_NUM
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_slots]);
        let old_stamp = self.stamp;
        self.mask = new_slots - 1;
        self.stamp = 1;
        self.len = 0;

        for slot in old_slots {
            if slot.stamp == old_stamp {
                self.insert_rehash(slot.key);
            }
        }
    }

    #[inline(always)]
    fn insert_rehash(&mut self, key: u64) {
        let mut pos = key_hash(key) as usize & self.mask;
        loop {
            let slot = &mut self.slots[pos];
            if slot.stamp != self.stamp {
                *slot = Slot {
                    key,
                    stamp: self.stamp,
                };
                self.len += 1;
                return;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    #[inline]
    pub fn contains(&self, key: CellKey) -> bool {
        let key = key.as_u64();
        let mut pos = key_hash(key) as usize & self.mask;
        loop {
            let slot = &self.slots[pos];
            if slot.stamp != self.stamp {
                return false;
            }
            if slot.key == key {
                return true;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Insert a key.
    /// Returns `true` if newly inserted, `false` if it already existed.
    #[inline]
    pub fn insert(&mut self, key: CellKey) -> bool {
        if self.needs_grow() {
            self.resize(self.slots.len() * 2);
        }

        let key = key.as_u64();
        let mut pos = key_hash(key) as usize & self.mask;
        loop {
            let slot = &mut self.slots[pos];
            if slot.stamp != self.stamp {
                *slot = Slot {
                    key,
                    stamp: self.stamp,
                };
                self.len += 1;
                return true;
            }
            if slot.key == key {
                return false;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Iterate live keys in slot order (unspecified, but stable for a given set).
    pub fn iter(&self) -> impl Iterator<Item = CellKey> + '_ {
        let stamp = self.stamp;
        self.slots
            .iter()
            .filter(move |slot| slot.stamp == stamp)
            .map(|slot| CellKey::from_raw(slot.key))
    }
}

impl Extend<CellKey> for CellSet {
    fn extend<I: IntoIterator<Item = CellKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<CellKey> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellKey>>(iter: I) -> Self {
        let mut set = CellSet::new();
        set.extend(iter);
        set
    }
}
