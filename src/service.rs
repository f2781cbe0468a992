// ── Serialized dialog service ─────────────────────────────────────────────────
//
// `DialogLibrary` alone expects one owner driving initialize → invoke →
// release in order.  `DialogService` is for programs that share the dialog
// between threads: one mutex guards the whole triad, so calls never overlap
// and a call outside the initialized window is an error value, not UB.
//
// The mutex stays locked while the dialog is open; a second caller blocks
// until the first dialog closes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    comdlg::{invoke::OpenFileDialog, invoke::Selection, DialogLibrary},
    error::{OfnError, Result},
    filter::FilterString,
    flags::OpenFileFlags,
    platform::{LibraryLoader, NativeModule, SystemLoader, SystemModule},
};

/// Shared, lazily initialized access to the dialog library.
pub struct DialogService<M: NativeModule = SystemModule> {
    state: Mutex<Option<DialogLibrary<M>>>,
}

impl<M: NativeModule> Default for DialogService<M> {
    fn default() -> Self {
        Self { state: Mutex::new(None) }
    }
}

impl DialogService {
    /// Load the system library.  See `initialize_with`.
    pub fn initialize(&self) -> Result<()> {
        self.initialize_with(&SystemLoader)
    }
}

impl<M: NativeModule> DialogService<M> {
    pub const fn new() -> Self {
        Self { state: Mutex::new(None) }
    }

    fn lock(&self) -> MutexGuard<'_, Option<DialogLibrary<M>>> {
        // A panic while holding the lock cannot leave the Option half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the library through `loader`.
    ///
    /// Fails with `AlreadyInitialized` if a library is held; release it first.
    pub fn initialize_with<L>(&self, loader: &L) -> Result<()>
    where
        L: LibraryLoader<Module = M>,
    {
        let mut state = self.lock();
        if state.is_some() {
            return Err(OfnError::AlreadyInitialized);
        }
        *state = Some(DialogLibrary::initialize_with(loader)?);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// `DialogLibrary::choose_file` under the lock.
    pub fn choose_file(
        &self,
        filter: &FilterString,
        flags: OpenFileFlags,
        output: &mut [u16],
    ) -> Result<bool> {
        let state = self.lock();
        let lib = state.as_ref().ok_or(OfnError::NotInitialized)?;
        Ok(lib.choose_file(filter, flags, output))
    }

    /// `OpenFileDialog::show` under the lock.
    pub fn show(&self, dialog: &OpenFileDialog) -> Result<Selection> {
        let state = self.lock();
        let lib = state.as_ref().ok_or(OfnError::NotInitialized)?;
        dialog.show(lib)
    }

    /// Unload the library.  Fails with `NotInitialized` if none is held.
    ///
    /// The service is empty afterwards even if the unload itself failed.
    pub fn release(&self) -> Result<()> {
        let lib = self.lock().take().ok_or(OfnError::NotInitialized)?;
        lib.release()
    }
}
