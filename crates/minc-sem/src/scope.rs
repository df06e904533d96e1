//! Scope stack for identifier resolution.
//!
//! A pure stack of frames, each a name-to-symbol map. Lookup walks from the
//! innermost frame outward and returns the first hit. The parser pushes a
//! frame on `{` and pops it on `}`; the bottom frame holds globals and
//! function names and is never popped.

use minc_util::FxHashMap;

use crate::obj::ObjId;

#[derive(Debug, Default)]
struct Frame {
    bindings: FxHashMap<String, ObjId>,
}

/// The scope chain.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// Create a scope stack holding only the top-level frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Push a frame.
    pub fn enter(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics if only the top-level frame remains; an unbalanced pop is a
    /// parser bug.
    pub fn leave(&mut self) {
        assert!(self.frames.len() > 1, "cannot pop the top-level scope");
        self.frames.pop();
    }

    /// Current nesting depth, counting the top-level frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame.
    pub fn bind(&mut self, name: impl Into<String>, obj: ObjId) {
        self.frames
            .last_mut()
            .expect("scope stack is never empty")
            .bindings
            .insert(name.into(), obj);
    }

    /// Bind `name` in the top-level frame, regardless of current depth.
    pub fn bind_global(&mut self, name: impl Into<String>, obj: ObjId) {
        self.frames[0].bindings.insert(name.into(), obj);
    }

    /// Resolve `name`, walking innermost-out.
    pub fn resolve(&self, name: &str) -> Option<ObjId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name).copied())
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
