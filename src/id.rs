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
//! Hashed widget identity. Ids are FNV-1a hashes of the label bytes seeded with the top of the id stack.

use log::warn;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Hashed identifier for a widget or window. Zero means "no id".
pub struct Id(pub u32);

const FNV_OFFSET: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

impl Id {
    /// The null id.
    pub const NONE: Id = Id(0);

    /// Returns `true` for the null id.
    pub fn is_none(&self) -> bool { self.0 == 0 }

    /// Returns `true` for any id other than the null id.
    pub fn is_some(&self) -> bool { self.0 != 0 }

    /// Hashes `bytes` starting from this id.
    pub fn hash_bytes(self, bytes: &[u8]) -> Id { Id(bytes.iter().fold(self.0, |h, b| hash_step(h, *b))) }

    /// Hashes a label, honouring the `###` override: only the text from `###` onward takes part in the hash.
    pub fn hash_label(self, label: &str) -> Id {
        match label.find("###") {
            Some(pos) => self.hash_bytes(&label.as_bytes()[pos..]),
            None => self.hash_bytes(label.as_bytes()),
        }
    }

    /// Root id for a top-level name (window names, popup names).
    pub fn from_name(name: &str) -> Id { Id(FNV_OFFSET).hash_label(name) }
}

#[inline]
fn hash_step(h: u32, b: u8) -> u32 { (h ^ b as u32).wrapping_mul(FNV_PRIME) }

/// Returns the display part of `label`: everything before the first `##`.
pub fn find_rendered_text_end(label: &str) -> &str {
    match label.find("##") {
        Some(pos) => &label[..pos],
        None => label,
    }
}

#[derive(Clone, Debug)]
/// Stack of id scopes. The bottom entry is the owning window id and is never popped.
pub struct IdStack {
    stack: Vec<Id>,
}

impl IdStack {
    /// Creates a stack seeded with `root`.
    pub fn new(root: Id) -> Self { Self { stack: vec![root] } }

    /// Drops every pushed scope and reseeds the stack.
    pub fn reset(&mut self, root: Id) {
        self.stack.clear();
        self.stack.push(root);
    }

    /// Current top of the stack.
    pub fn top(&self) -> Id { self.stack.last().copied().unwrap_or(Id(FNV_OFFSET)) }

    /// Number of entries, including the root seed.
    pub fn depth(&self) -> usize { self.stack.len() }

    /// Id of `label` in the current scope.
    pub fn get_id_str(&self, label: &str) -> Id { self.top().hash_label(label) }

    /// Id of an integer in the current scope, hashed from its little-endian bytes.
    pub fn get_id_int(&self, n: i32) -> Id { self.top().hash_bytes(&n.to_le_bytes()) }

    /// Id of an address in the current scope.
    pub fn get_id_ptr<T: ?Sized>(&self, ptr: &T) -> Id {
        let addr = ptr as *const T as *const u8 as usize;
        self.top().hash_bytes(&addr.to_le_bytes())
    }

    /// Pushes the id of `label`.
    pub fn push_id_str(&mut self, label: &str) {
        let id = self.get_id_str(label);
        self.stack.push(id);
    }

    /// Pushes the id of an integer.
    pub fn push_id_int(&mut self, n: i32) {
        let id = self.get_id_int(n);
        self.stack.push(id);
    }

    /// Pushes the id of an address.
    pub fn push_id_ptr<T: ?Sized>(&mut self, ptr: &T) {
        let id = self.get_id_ptr(ptr);
        self.stack.push(id);
    }

    /// Pushes an already computed id.
    pub fn push_raw(&mut self, id: Id) { self.stack.push(id) }

    /// Pops the last pushed scope. Popping the root seed is reported and ignored.
    pub fn pop_id(&mut self) {
        if self.stack.len() <= 1 {
            debug_assert!(false, "pop_id() called more times than push_id()");
            warn!("id stack underflow ignored");
            return;
        }
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv_matches_reference() {
        // FNV-1a of "a" from the offset basis
        assert_eq!(Id(FNV_OFFSET).hash_bytes(b"a"), Id(0xe40c292c));
    }

    #[test]
    fn triple_hash_overrides_prefix() {
        let s = IdStack::new(Id::from_name("W"));
        assert_eq!(s.get_id_str("Play###anim"), s.get_id_str("Stop###anim"));
        assert_ne!(s.get_id_str("Play##a"), s.get_id_str("Play##b"));
        assert_eq!(find_rendered_text_end("Play##a"), "Play");
        assert_eq!(find_rendered_text_end("##hidden"), "");
        assert_eq!(find_rendered_text_end("plain"), "plain");
    }

    #[test]
    fn pushed_scopes_change_ids() {
        let mut s = IdStack::new(Id::from_name("W"));
        let outer = s.get_id_str("OK");
        s.push_id_int(3);
        let inner = s.get_id_str("OK");
        assert_ne!(outer, inner);
        s.pop_id();
        assert_eq!(outer, s.get_id_str("OK"));
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn empty_label_is_the_scope_id() {
        let s = IdStack::new(Id::from_name("W"));
        assert_eq!(s.get_id_str(""), s.top());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ids_are_deterministic(seed in any::<u32>(), label in "[a-zA-Z0-9 ]{0,24}") {
                let mut a = IdStack::new(Id(seed));
                let mut b = IdStack::new(Id(seed));
                prop_assert_eq!(a.get_id_str(&label), b.get_id_str(&label));
                a.push_id_int(1);
                b.push_id_int(1);
                prop_assert_eq!(a.get_id_str(&label), b.get_id_str(&label));
            }

            #[test]
            fn pushed_frame_changes_the_id(label in "[a-z]{1,12}", n in 0i32..1000) {
                let mut s = IdStack::new(Id::from_name("root"));
                s.push_id_int(n);
                let a = s.get_id_str(&label);
                s.pop_id();
                s.push_id_int(n + 1);
                prop_assert_ne!(a, s.get_id_str(&label));
            }
        }
    }
}
