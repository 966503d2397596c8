// Lexical scope chain shared by the analyzer and the interpreter

use rustc_hash::FxHashMap;

/// Index of a frame inside a [`Scope`] arena.
pub type FrameId = usize;

/// One link in the scope chain.
#[derive(Debug, Clone)]
pub struct Frame<V, F> {
    variables: FxHashMap<String, V>,
    functions: FxHashMap<(String, usize), F>,
    parent: Option<FrameId>,
}

impl<V, F> Frame<V, F> {
    fn new(parent: Option<FrameId>) -> Self {
        Frame {
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }
}

/// Arena of frames; the active frame is always the last one pushed.
///
/// A frame's parent is not necessarily the frame below it on the stack: a
/// function call pushes a frame whose parent is the frame the function was
/// defined in, so callee bodies never see the caller's locals.
#[derive(Debug, Clone)]
pub struct Scope<V, F> {
    frames: Vec<Frame<V, F>>,
}

impl<V, F> Scope<V, F> {
    pub const ROOT: FrameId = 0;

    /// Create a scope holding only the root frame.
    pub fn new() -> Self {
        Scope {
            frames: vec![Frame::new(None)],
        }
    }

    /// The frame new definitions go into.
    pub fn current(&self) -> FrameId {
        self.frames.len() - 1
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a frame nested in the current one.
    pub fn push_frame(&mut self) -> FrameId {
        let parent = self.current();
        self.push_frame_under(parent)
    }

    /// Push a frame whose lookups continue in `parent`.
    pub fn push_frame_under(&mut self, parent: FrameId) -> FrameId {
        self.frames.push(Frame::new(Some(parent)));
        tracing::trace!(depth = self.frames.len(), parent, "push frame");
        self.current()
    }

    /// Discard the current frame. The root frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind a variable in the current frame, shadowing outer bindings.
    pub fn define_variable(&mut self, name: impl Into<String>, binding: V) {
        let current = self.current();
        self.frames[current].variables.insert(name.into(), binding);
    }

    /// Bind a function by name and arity in the current frame.
    pub fn define_function(&mut self, name: impl Into<String>, arity: usize, binding: F) {
        let current = self.current();
        self.frames[current]
            .functions
            .insert((name.into(), arity), binding);
    }

    /// Whether `name` is bound directly in the current frame.
    pub fn defines_variable_here(&self, name: &str) -> bool {
        self.frames[self.current()].variables.contains_key(name)
    }

    /// Whether a function with this name and arity is bound directly in the current frame.
    pub fn defines_function_here(&self, name: &str, arity: usize) -> bool {
        self.frames[self.current()]
            .functions
            .contains_key(&(name.to_string(), arity))
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&V> {
        let frame = self.resolve(|frame| frame.variables.contains_key(name))?;
        self.frames[frame].variables.get(name)
    }

    pub fn lookup_variable_mut(&mut self, name: &str) -> Option<&mut V> {
        let frame = self.resolve(|frame| frame.variables.contains_key(name))?;
        self.frames[frame].variables.get_mut(name)
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<&F> {
        let key = (name.to_string(), arity);
        let frame = self.resolve(|frame| frame.functions.contains_key(&key))?;
        self.frames[frame].functions.get(&key)
    }

    /// Walk from the current frame through its parents; first match wins.
    fn resolve(&self, found: impl Fn(&Frame<V, F>) -> bool) -> Option<FrameId> {
        let mut id = Some(self.current());
        while let Some(frame) = id {
            if found(&self.frames[frame]) {
                return Some(frame);
            }
            id = self.frames[frame].parent;
        }
        None
    }
}

impl<V, F> Default for Scope<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestScope = Scope<i32, &'static str>;

    #[test]
    fn test_lookup_walks_outward() {
        let mut scope = TestScope::new();
        scope.define_variable("x", 1);
        scope.push_frame();
        scope.define_variable("y", 2);

        assert_eq!(scope.lookup_variable("x"), Some(&1));
        assert_eq!(scope.lookup_variable("y"), Some(&2));
        assert_eq!(scope.lookup_variable("z"), None);
    }

    #[test]
    fn test_shadowing_and_pop() {
        let mut scope = TestScope::new();
        scope.define_variable("x", 1);
        scope.push_frame();
        scope.define_variable("x", 2);
        assert_eq!(scope.lookup_variable("x"), Some(&2));

        scope.pop_frame();
        assert_eq!(scope.lookup_variable("x"), Some(&1));
    }

    #[test]
    fn test_mutation_hits_defining_frame() {
        let mut scope = TestScope::new();
        scope.define_variable("x", 1);
        scope.push_frame();
        if let Some(x) = scope.lookup_variable_mut("x") {
            *x = 5;
        }
        scope.pop_frame();
        assert_eq!(scope.lookup_variable("x"), Some(&5));
    }

    #[test]
    fn test_functions_keyed_by_arity() {
        let mut scope = TestScope::new();
        scope.define_function("f", 0, "nullary");
        scope.define_function("f", 2, "binary");
        scope.push_frame();

        assert_eq!(scope.lookup_function("f", 0), Some(&"nullary"));
        assert_eq!(scope.lookup_function("f", 2), Some(&"binary"));
        assert_eq!(scope.lookup_function("f", 1), None);
    }

    #[test]
    fn test_push_under_skips_caller_frames() {
        let mut scope = TestScope::new();
        scope.define_variable("global", 0);
        scope.push_frame();
        scope.define_variable("caller_local", 1);

        scope.push_frame_under(TestScope::ROOT);
        assert_eq!(scope.lookup_variable("global"), Some(&0));
        assert_eq!(scope.lookup_variable("caller_local"), None);

        scope.pop_frame();
        assert_eq!(scope.lookup_variable("caller_local"), Some(&1));
    }

    #[test]
    fn test_root_is_never_popped() {
        let mut scope = TestScope::new();
        scope.define_variable("x", 1);
        scope.pop_frame();
        assert_eq!(scope.depth(), 1);
        assert_eq!(scope.lookup_variable("x"), Some(&1));
    }
}
