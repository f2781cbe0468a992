// ── Loader for targets without comdlg32 ───────────────────────────────────────

use std::ffi::c_void;
use std::ptr::NonNull;

use super::{LibraryLoader, NativeModule};
use crate::error::{OfnError, Result};

/// Win32 `ERROR_MOD_NOT_FOUND`, reported so callers see the same code they
/// would get from a Windows install missing the library.
const ERROR_MOD_NOT_FOUND: u32 = 126;

/// The OS loader.  There is no common-dialog library on this target, so
/// loading always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

/// Uninhabited: no module can be loaded on this target.
#[derive(Debug)]
pub enum SystemModule {}

impl LibraryLoader for SystemLoader {
    type Module = SystemModule;

    fn load(&self, name: &str) -> Result<SystemModule> {
        log::debug!("{name} is not available on this platform");
        Err(OfnError::Load { library: name.to_owned(), code: ERROR_MOD_NOT_FOUND })
    }
}

impl NativeModule for SystemModule {
    fn symbol(&self, _name: &str) -> Result<NonNull<c_void>> {
        match *self {}
    }

    fn free(self) -> Result<()> {
        match self {}
    }
}
