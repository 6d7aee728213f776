/// Behavior every persistable resource brings to the generic CRUD layer.
///
/// The two hooks are the per-resource business rules that run before the
/// repository is touched: identifier assignment, derived fields and
/// timestamp stamping on create; derived-field recomputation and the
/// updated-at stamp on update.
pub trait Entity: Sized + Send + Sync {
  /// Merge payload for partial updates. A `None` field keeps the stored
  /// value untouched; a `Some` field overwrites it.
  type Patch: Send + Sync;

  /// Runs immediately before `Repository::create`.
  fn prepare_create(&mut self);

  /// Runs immediately before `Repository::update`.
  fn prepare_update(patch: &mut Self::Patch);
}
