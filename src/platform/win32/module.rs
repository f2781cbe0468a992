// ── Runtime DLL loading ───────────────────────────────────────────────────────
//
// `SystemModule` owns one `LoadLibraryW` reference.  It does not free itself
// on drop; `comdlg::DialogLibrary` decides when `free` runs so it can report
// the result.
//
// ── Security note ─────────────────────────────────────────────────────────────
//
// `load("comdlg32.dll")` passes a bare file name.  comdlg32 is a KnownDLL, so
// Windows maps the System32 copy regardless of the search order.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::ptr::NonNull;

use windows::{
    core::{PCSTR, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HMODULE},
        System::LibraryLoader::{FreeLibrary, GetProcAddress, LoadLibraryW},
    },
};

use crate::{
    error::{OfnError, Result},
    platform::{LibraryLoader, NativeModule},
    wide,
};

/// The Win32 loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

/// A module handle returned by a successful `LoadLibraryW`.
#[derive(Debug)]
pub struct SystemModule {
    handle: HMODULE,
    name: String,
}

// SAFETY: an HMODULE is a process-wide value, not tied to the thread that
// loaded it.  GetProcAddress and FreeLibrary may be called from any thread.
unsafe impl Send for SystemModule {}

impl LibraryLoader for SystemLoader {
    type Module = SystemModule;

    fn load(&self, name: &str) -> Result<SystemModule> {
        let path = wide::to_wide_null(name);
        // SAFETY: path is a valid null-terminated UTF-16 string that outlives
        // the call.
        let handle = unsafe { LoadLibraryW(PCWSTR(path.as_ptr())) }.map_err(|e| OfnError::Load {
            library: name.to_owned(),
            // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
            code: e.code().0 as u32,
        })?;
        log::debug!("loaded {name}");
        Ok(SystemModule { handle, name: name.to_owned() })
    }
}

impl NativeModule for SystemModule {
    fn symbol(&self, name: &str) -> Result<NonNull<c_void>> {
        let ansi: Vec<u8> = name.bytes().chain(std::iter::once(0)).collect();
        // SAFETY: self.handle came from LoadLibraryW and has not been freed
        // (free consumes self).  ansi is null-terminated and outlives the call.
        let proc = unsafe { GetProcAddress(self.handle, PCSTR(ansi.as_ptr())) };

        let not_found = |code| OfnError::SymbolNotFound {
            library: self.name.clone(),
            symbol: name.to_owned(),
            code,
        };
        match proc {
            Some(f) => NonNull::new(f as *mut c_void).ok_or_else(|| not_found(0)),
            None => {
                // SAFETY: GetLastError reads thread-local state set by the
                // just-failed GetProcAddress; no Win32 calls between them.
                let code = unsafe { GetLastError().0 };
                Err(not_found(code))
            }
        }
    }

    fn free(self) -> Result<()> {
        // SAFETY: self.handle was returned by a successful LoadLibraryW and is
        // freed exactly once, here, because free consumes self.
        unsafe { FreeLibrary(self.handle) }.map_err(|e| OfnError::Release {
            library: self.name.clone(),
            code: e.code().0 as u32,
        })?;
        log::debug!("released {}", self.name);
        Ok(())
    }
}
