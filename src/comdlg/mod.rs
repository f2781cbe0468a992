// ── comdlg32 binding ──────────────────────────────────────────────────────────
//
// This is one of exactly two places in the crate where `unsafe` is permitted
// (the other is `platform::win32`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment.
//
// ── Ownership model ───────────────────────────────────────────────────────────
//
// `DialogLibrary` owns the loaded module together with the entry points
// resolved from it.  The function pointers are only reachable through
// `&DialogLibrary`, and `release` consumes the value, so no call can reach a
// pointer into an unloaded module.  An unreleased library is freed on drop.

#![allow(unsafe_code)]

pub mod block;
pub mod invoke;

use std::ffi::c_void;
use std::fmt;

use crate::{
    error::{DialogErrorCode, Result},
    platform::{LibraryLoader, NativeModule, SystemLoader, SystemModule},
};

use block::OpenFileNameW;

// ── Library identity ──────────────────────────────────────────────────────────

pub const LIBRARY_NAME: &str = "comdlg32.dll";
pub const GET_OPEN_FILE_NAME: &str = "GetOpenFileNameW";
pub const COMM_DLG_EXTENDED_ERROR: &str = "CommDlgExtendedError";

/// `BOOL GetOpenFileNameW(LPOPENFILENAMEW)`.
pub(crate) type GetOpenFileNameFn = unsafe extern "system" fn(*mut OpenFileNameW) -> i32;

/// `DWORD CommDlgExtendedError(void)`.
pub(crate) type CommDlgExtendedErrorFn = unsafe extern "system" fn() -> u32;

// ── DialogLibrary ─────────────────────────────────────────────────────────────

/// The loaded common-dialog library and its resolved entry points.
///
/// Each call to `initialize` loads the library again and yields an
/// independent handle; the OS reference-counts the module, so handles may be
/// created and released in any order.
pub struct DialogLibrary<M: NativeModule = SystemModule> {
    /// `None` only after `release` has taken it.
    module: Option<M>,
    get_open_file_name: GetOpenFileNameFn,
    extended_error: Option<CommDlgExtendedErrorFn>,
}

impl DialogLibrary {
    /// Load `comdlg32.dll` and resolve `GetOpenFileNameW`.
    ///
    /// Always fails with `OfnError::Load` on targets other than Windows.
    pub fn initialize() -> Result<Self> {
        Self::initialize_with(&SystemLoader)
    }
}

impl<M: NativeModule> DialogLibrary<M> {
    /// Load the library through `loader`.
    ///
    /// On `SymbolNotFound` the module is freed again before returning.
    pub fn initialize_with<L>(loader: &L) -> Result<Self>
    where
        L: LibraryLoader<Module = M>,
    {
        let module = loader.load(LIBRARY_NAME)?;

        let entry = match module.symbol(GET_OPEN_FILE_NAME) {
            Ok(entry) => entry,
            Err(e) => {
                if let Err(free_err) = module.free() {
                    log::warn!("{free_err} after failed symbol lookup");
                }
                return Err(e);
            }
        };
        // SAFETY: the export named GetOpenFileNameW has this signature in
        // every comdlg32 release; fn pointers and data pointers share a
        // representation on all Windows targets.
        let get_open_file_name =
            unsafe { std::mem::transmute::<*mut c_void, GetOpenFileNameFn>(entry.as_ptr()) };

        let extended_error = match module.symbol(COMM_DLG_EXTENDED_ERROR) {
            // SAFETY: as above, for CommDlgExtendedError.
            Ok(sym) => Some(unsafe {
                std::mem::transmute::<*mut c_void, CommDlgExtendedErrorFn>(sym.as_ptr())
            }),
            Err(e) => {
                log::debug!("extended errors unavailable: {e}");
                None
            }
        };

        log::debug!("resolved {GET_OPEN_FILE_NAME} in {LIBRARY_NAME}");
        Ok(Self { module: Some(module), get_open_file_name, extended_error })
    }

    /// Unload the library.
    pub fn release(mut self) -> Result<()> {
        match self.module.take() {
            Some(module) => module.free(),
            None => Ok(()),
        }
    }

    /// Call `GetOpenFileNameW` with `block`.  Blocks until the dialog closes.
    pub(crate) fn invoke(&self, block: &mut block::ParamBlock<'_>) -> bool {
        // SAFETY: the entry point belongs to self.module, which is loaded for
        // as long as &self exists.  block is fully initialised and every
        // pointer in it borrows a buffer that outlives the block.
        let ok = unsafe { (self.get_open_file_name)(block.as_mut_ptr()) };
        ok != 0
    }

    /// The extended error code for the most recent failed dialog call on this
    /// thread.
    ///
    /// `None` means the user cancelled, or the library does not export
    /// `CommDlgExtendedError`.
    pub fn extended_error(&self) -> Option<DialogErrorCode> {
        let query = self.extended_error?;
        // SAFETY: query belongs to self.module, loaded while &self exists.
        // CommDlgExtendedError takes no arguments and reads thread state.
        let code = unsafe { query() };
        (code != 0).then_some(DialogErrorCode(code))
    }

    pub fn has_extended_error(&self) -> bool {
        self.extended_error.is_some()
    }
}

impl<M: NativeModule> Drop for DialogLibrary<M> {
    fn drop(&mut self) {
        if let Some(module) = self.module.take() {
            if let Err(e) = module.free() {
                log::warn!("{e}");
            }
        }
    }
}

impl<M: NativeModule> fmt::Debug for DialogLibrary<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogLibrary")
            .field("library", &LIBRARY_NAME)
            .field("entry", &(self.get_open_file_name as *const c_void))
            .field("extended_error", &self.extended_error.is_some())
            .finish()
    }
}
