//! Texture collaborator interface.
//!
//! Decoding lives outside the simulation. Layout code asks a
//! [`TextureSource`] for a handle and builds renderables with it right away;
//! the pixels may arrive later.

use std::collections::HashMap;

/// Opaque handle to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Fire-and-forget texture loading.
pub trait TextureSource {
    /// Returns a handle for `path` immediately. Loading the same path twice
    /// should yield the same handle.
    fn load(&mut self, path: &str) -> TextureHandle;
}

/// Hands out sequential handles and remembers which paths were requested.
///
/// Used by the headless runner and by tests; a renderer-backed source can
/// take the recorded paths and decode them.
#[derive(Debug, Default)]
pub struct PlaceholderTextures {
    handles: HashMap<String, TextureHandle>,
    requested: Vec<String>,
}

impl PlaceholderTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths in the order they were first requested.
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    pub fn handle_of(&self, path: &str) -> Option<TextureHandle> {
        self.handles.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

impl TextureSource for PlaceholderTextures {
    fn load(&mut self, path: &str) -> TextureHandle {
        if let Some(handle) = self.handles.get(path) {
            return *handle;
        }
        let handle = TextureHandle(self.requested.len() as u32);
        self.handles.insert(path.to_string(), handle);
        self.requested.push(path.to_string());
        log::debug!("Texture requested: {path} -> {handle:?}");
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_same_handle() {
        let mut textures = PlaceholderTextures::new();
        let a = textures.load("assets/github.png");
        let b = textures.load("assets/linkedin.png");
        let c = textures.load("assets/github.png");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(textures.len(), 2);
        assert_eq!(textures.requested()[1], "assets/linkedin.png");
        assert_eq!(textures.handle_of("assets/linkedin.png"), Some(b));
    }
}
