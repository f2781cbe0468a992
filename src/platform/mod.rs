// ── Platform abstraction layer ────────────────────────────────────────────────
//
// The rest of the crate reaches the OS loader only through the two traits
// below.  No `unsafe` lives here; the Win32 calls are confined to the `win32`
// sub-module and never leak outward.
//
// On non-Windows targets `SystemLoader` still exists but every `load` fails
// with `OfnError::Load`, so the lifecycle contract can be exercised (and
// stubbed) on any host.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::error::Result;

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub use win32::module::{SystemLoader, SystemModule};

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub use unsupported::{SystemLoader, SystemModule};

#[cfg(test)]
pub(crate) mod stub;

/// Something that can load a shared library by file name.
pub trait LibraryLoader {
    type Module: NativeModule;

    /// Load `name`.  Fails with `OfnError::Load`.
    fn load(&self, name: &str) -> Result<Self::Module>;
}

/// A loaded shared library.
pub trait NativeModule {
    /// Address of the export `name`.  Fails with `OfnError::SymbolNotFound`.
    fn symbol(&self, name: &str) -> Result<NonNull<c_void>>;

    /// Unload the library.  Every address returned by `symbol` is dangling
    /// afterwards.  Fails with `OfnError::Release`.
    fn free(self) -> Result<()>;
}
