// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – LoadLibraryW / GetProcAddress / FreeLibrary
//   • `comdlg`          – calls through the resolved dialog entry points
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Runtime-loaded binding for the Win32 "Open File" common dialog.
//!
//! `comdlg32.dll` is loaded on demand and `GetOpenFileNameW` is resolved by
//! name, so the crate builds and links on every target; on anything other
//! than Windows, [`DialogLibrary::initialize`] fails with
//! [`OfnError::Load`].
//!
//! ```no_run
//! use ofn::{DialogLibrary, FilterString, OpenFileFlags};
//!
//! let lib = DialogLibrary::initialize()?;
//! let filter = FilterString::parse("PNG file (*.png)\0*.PNG\0\0")?;
//! let mut path = vec![0u16; 256];
//! if lib.choose_file(&filter, OpenFileFlags::NONE, &mut path) {
//!     println!("{}", ofn::wide::string_from_wide(&path));
//! }
//! lib.release()?;
//! # Ok::<(), ofn::OfnError>(())
//! ```

pub mod comdlg;
pub mod config;
pub mod error;
pub mod filter;
pub mod flags;
pub mod platform;
pub mod service;
pub mod wide;

pub use comdlg::block::WindowHandle;
pub use comdlg::invoke::{OpenFileDialog, Selection, PATH_BUF_LEN};
pub use comdlg::DialogLibrary;
pub use config::DialogConfig;
pub use error::{DialogErrorCode, OfnError, Result};
pub use filter::{FileFilter, FilterString};
pub use flags::OpenFileFlags;
pub use service::DialogService;
