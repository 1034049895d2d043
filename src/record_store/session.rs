use super::error::StoreResult;
use super::trait_def::RecordStore;
use std::ops::Deref;
use tracing::warn;

/// Scoped acquisition of a [`RecordStore`].
///
/// Opening connects the store, dropping the guard closes it again, also when
/// the unit of work bails out early with `?`.
pub struct Session<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> Session<'a, S> {
    pub fn open(store: &'a S) -> StoreResult<Self> {
        store.connect()?;
        Ok(Self { store })
    }
}

impl<S: RecordStore + ?Sized> Deref for Session<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: RecordStore + ?Sized> Drop for Session<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.store.close() {
            warn!("Failed to close record store session: {}", err);
        }
    }
}
