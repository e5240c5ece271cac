//! Fixed-capacity attribute buffer with an upload flag.

use bytemuck::Pod;

/// A pre-allocated vertex attribute buffer mutated in place every frame.
///
/// Length is fixed at creation. Any mutable access marks the buffer dirty;
/// the renderer re-uploads dirty buffers before the next draw and then
/// clears the flag.
#[derive(Clone, Debug)]
pub struct DynamicBuffer<T: Pod> {
    label: &'static str,
    data: Vec<T>,
    dirty: bool,
    /// Bumped on every mark_dirty, lets backends skip redundant uploads
    version: u64,
}

impl<T: Pod> DynamicBuffer<T> {
    /// Allocate `len` elements filled with `fill`. Starts dirty.
    pub fn new(label: &'static str, len: usize, fill: T) -> Self {
        Self::from_vec(label, vec![fill; len])
    }

    /// Wrap existing data. Starts dirty.
    pub fn from_vec(label: &'static str, data: Vec<T>) -> Self {
        Self {
            label,
            data,
            dirty: true,
            version: 1,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view; marks the buffer dirty.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.mark_dirty();
        &mut self.data
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.version = self.version.wrapping_add(1);
    }

    /// Called by the uploader once the GPU copy matches.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
