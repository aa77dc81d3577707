// storefront_admin/src/workflow/context_data.rs

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lock-protected state that every step of a workflow run sees.
///
/// Cloning is cheap (an `Arc` bump); all clones observe the same data. The
/// guards returned by [`read`](Self::read) and [`write`](Self::write) are
/// blocking `parking_lot` guards and must be dropped before the next `.await`.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Read guard narrowed to one field, e.g. `ctx.map_read(|d| &d.persisted)`.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Replaces a field with its default and hands back the previous value.
  /// Handy for moving work lists out of the context before awaiting.
  pub fn take<U, F>(&self, f: F) -> U
  where
    U: Default,
    F: FnOnce(&mut T) -> &mut U,
  {
    let mut guard = self.write();
    std::mem::take(f(&mut *guard))
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for ContextData<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
