//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Id-keyed storage whose entries remember the last frame they were used, so stale ones can be collected.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

struct PoolItem<PO> {
    object: PO,
    frame: u64,
}

/// Map from id to object, tagged with the frame each entry was last touched.
pub struct Pool<ID, PO> {
    items: HashMap<ID, PoolItem<PO>>,
}

impl<ID: Copy + Eq + Hash + core::fmt::Debug, PO> Pool<ID, PO> {
    /// Inserts `object` unless `id` is present; either way the entry is touched at `frame`.
    pub fn insert(&mut self, id: ID, object: PO, frame: u64) -> &mut PO {
        let item = self.items.entry(id).or_insert_with(|| {
            debug!("pool object {:?} created", id);
            PoolItem { object, frame }
        });
        item.frame = frame;
        &mut item.object
    }

    pub fn get(&self, id: ID) -> Option<&PO> { self.items.get(&id).map(|pi| &pi.object) }

    pub fn get_mut(&mut self, id: ID) -> Option<&mut PO> { self.items.get_mut(&id).map(|pi| &mut pi.object) }

    pub fn contains(&self, id: ID) -> bool { self.items.contains_key(&id) }

    /// Marks `id` as used at `frame`.
    pub fn touch(&mut self, id: ID, frame: u64) {
        if let Some(item) = self.items.get_mut(&id) {
            item.frame = frame;
        }
    }

    pub fn remove(&mut self, id: ID) -> Option<PO> { self.items.remove(&id).map(|pi| pi.object) }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn ids(&self) -> impl Iterator<Item = ID> + '_ { self.items.keys().copied() }

    pub fn values(&self) -> impl Iterator<Item = &PO> { self.items.values().map(|pi| &pi.object) }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut PO> { self.items.values_mut().map(|pi| &mut pi.object) }

    /// Removes every entry untouched for more than `max_age` frames and hands them back.
    pub fn gc(&mut self, current_frame: u64, max_age: u64) -> Vec<(ID, PO)> {
        let stale: Vec<ID> = self.items.iter().filter(|(_, pi)| current_frame.saturating_sub(pi.frame) > max_age).map(|(id, _)| *id).collect();
        stale.into_iter().filter_map(|id| self.items.remove(&id).map(|pi| (id, pi.object))).collect()
    }
}

impl<ID, PO> Default for Pool<ID, PO> {
    fn default() -> Self { Self { items: HashMap::default() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_the_first_object() {
        let mut pool: Pool<u32, &str> = Pool::default();
        pool.insert(1, "a", 0);
        assert_eq!(*pool.insert(1, "b", 3), "a");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn gc_returns_stale_entries() {
        let mut pool: Pool<u32, u32> = Pool::default();
        pool.insert(1, 10, 0);
        pool.insert(2, 20, 0);
        pool.touch(2, 5);
        assert!(pool.gc(5, 5).is_empty());
        let removed = pool.gc(6, 5);
        assert_eq!(removed, vec![(1, 10)]);
        assert!(pool.contains(2));
        assert!(!pool.contains(1));
    }
}
