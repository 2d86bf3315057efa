/// Limits applied when decoding a whole value tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Maximum number of nested `Array` / `Dict` values.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
