// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is one of exactly two places in the crate where `unsafe` code is
// permitted (the other is `comdlg`, which calls through the resolved entry
// point).  Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.

#![allow(unsafe_code)]

pub mod module; // LoadLibraryW / GetProcAddress / FreeLibrary
