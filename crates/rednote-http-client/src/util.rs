/// `Clone + Send + Sync` type-erased service
///
/// The client is shared across tasks, so the plain `BoxCloneService` (which is `!Sync`) doesn't cut it
pub type BoxCloneService<T, U, E> = tower::util::BoxCloneSyncService<T, U, E>;
