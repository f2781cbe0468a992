// ── In-process stand-in for the OS loader (tests only) ───────────────────────

use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{LibraryLoader, NativeModule};
use crate::error::{OfnError, Result};

/// Serves a fixed table of exported functions from this test binary.
#[derive(Clone, Default)]
pub(crate) struct StubLoader {
    symbols: Vec<(&'static str, usize)>,
    fail_load: bool,
    fail_free: bool,
    loads: Arc<AtomicUsize>,
    frees: Arc<AtomicUsize>,
}

pub(crate) struct StubModule {
    name: String,
    symbols: Vec<(&'static str, usize)>,
    fail_free: bool,
    frees: Arc<AtomicUsize>,
}

impl StubLoader {
    /// Export the function at `addr` as `name`.
    pub(crate) fn export(mut self, name: &'static str, addr: *const ()) -> Self {
        self.symbols.push((name, addr as usize));
        self
    }

    pub(crate) fn failing_load() -> Self {
        Self { fail_load: true, ..Self::default() }
    }

    pub(crate) fn failing_free(mut self) -> Self {
        self.fail_free = true;
        self
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub(crate) fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }
}

impl LibraryLoader for StubLoader {
    type Module = StubModule;

    fn load(&self, name: &str) -> Result<StubModule> {
        if self.fail_load {
            return Err(OfnError::Load { library: name.to_owned(), code: 126 });
        }
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(StubModule {
            name: name.to_owned(),
            symbols: self.symbols.clone(),
            fail_free: self.fail_free,
            frees: Arc::clone(&self.frees),
        })
    }
}

impl NativeModule for StubModule {
    fn symbol(&self, name: &str) -> Result<NonNull<c_void>> {
        self.symbols
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|&(_, addr)| NonNull::new(addr as *mut c_void))
            .ok_or_else(|| OfnError::SymbolNotFound {
                library: self.name.clone(),
                symbol: name.to_owned(),
                code: 127,
            })
    }

    fn free(self) -> Result<()> {
        self.frees.fetch_add(1, Ordering::SeqCst);
        if self.fail_free {
            return Err(OfnError::Release { library: self.name, code: 5 });
        }
        Ok(())
    }
}
