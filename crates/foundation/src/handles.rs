/// Opaque handle to a renderer-owned layer.
///
/// Intentionally a small, copyable id so it can be pushed through the
/// catalog and the per-frame time update without heap allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(pub u64);
