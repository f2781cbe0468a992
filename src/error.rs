// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in the crate return `error::Result<T>`.  A dialog
// the user dismissed is an ordinary outcome: `choose_file` reports it as
// `false`, and `OpenFileDialog::show` as `DialogCancelledOrFailed` with
// `is_cancelled() == true`.

use std::fmt;

/// Every error the binding can produce.
#[derive(Debug)]
pub enum OfnError {
    /// The native dialog library could not be loaded.
    Load {
        /// File name passed to the loader, e.g. `"comdlg32.dll"`.
        library: String,
        /// Raw Win32 error code or HRESULT bits.
        code: u32,
    },

    /// The library loaded but the requested export is missing.
    SymbolNotFound {
        library: String,
        symbol: String,
        code: u32,
    },

    /// The native call returned FALSE.
    ///
    /// `extended` is `None` when the user cancelled or when the library does
    /// not export `CommDlgExtendedError`.
    DialogCancelledOrFailed { extended: Option<DialogErrorCode> },

    /// `FreeLibrary` failed.  Results obtained before the failure stay valid.
    Release { library: String, code: u32 },

    /// A `DialogService` was used before `initialize` or after `release`.
    NotInitialized,

    /// `DialogService::initialize` was called on a service that is already
    /// holding a loaded library.
    AlreadyInitialized,

    /// A filter list or raw filter text does not have the
    /// `Label\0Patterns\0...\0\0` shape.
    InvalidFilter(String),

    /// A configuration names a flag that is not an `OFN_*` bit.
    UnknownFlag(String),

    /// `OpenFileDialog::show` was asked for, or got back, more than one file.
    /// Only `choose_file` passes `ALLOWMULTISELECT` through.
    MultipleSelection,

    /// A path buffer cannot be described to the native side (empty, larger
    /// than `u32::MAX` units, or too small for its initial contents).
    InvalidBuffer(String),

    /// A dialog configuration file failed to parse.
    Config(serde_json::Error),

    /// A standard I/O error (reading a configuration file, …).
    Io(std::io::Error),
}

impl OfnError {
    /// `true` for a falsy dialog result with no extended error code, which is
    /// what the native side reports when the user closes the dialog.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::DialogCancelledOrFailed { extended: None })
    }
}

impl fmt::Display for OfnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { library, code } => {
                write!(f, "could not load {library} (error {code:#010x})")
            }
            Self::SymbolNotFound { library, symbol, code } => {
                write!(f, "{library} does not export {symbol} (error {code:#010x})")
            }
            Self::DialogCancelledOrFailed { extended: None } => {
                write!(f, "no file was chosen")
            }
            Self::DialogCancelledOrFailed { extended: Some(code) } => {
                write!(f, "open file dialog failed: {code}")
            }
            Self::Release { library, code } => {
                write!(f, "could not release {library} (error {code:#010x})")
            }
            Self::NotInitialized => write!(f, "dialog library is not initialized"),
            Self::AlreadyInitialized => write!(f, "dialog library is already initialized"),
            Self::InvalidFilter(why) => write!(f, "invalid filter: {why}"),
            Self::UnknownFlag(name) => write!(f, "unknown dialog flag {name:?}"),
            Self::MultipleSelection => {
                write!(f, "the dialog returns a single file; multi-select is not supported")
            }
            Self::InvalidBuffer(why) => write!(f, "invalid path buffer: {why}"),
            Self::Config(e) => write!(f, "invalid dialog configuration: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for OfnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OfnError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for OfnError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OfnError>;

// ── Extended dialog errors ────────────────────────────────────────────────────

/// A nonzero value returned by `CommDlgExtendedError` after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogErrorCode(pub u32);

impl DialogErrorCode {
    pub const DIALOG_FAILURE: Self = Self(0xFFFF);
    pub const STRUCT_SIZE: Self = Self(0x0001);
    pub const INITIALIZATION: Self = Self(0x0002);
    pub const NO_TEMPLATE: Self = Self(0x0003);
    pub const NO_HINSTANCE: Self = Self(0x0004);
    pub const LOAD_STR_FAILURE: Self = Self(0x0005);
    pub const FIND_RES_FAILURE: Self = Self(0x0006);
    pub const LOAD_RES_FAILURE: Self = Self(0x0007);
    pub const LOCK_RES_FAILURE: Self = Self(0x0008);
    pub const MEM_ALLOC_FAILURE: Self = Self(0x0009);
    pub const MEM_LOCK_FAILURE: Self = Self(0x000A);
    pub const NO_HOOK: Self = Self(0x000B);
    pub const REGISTER_MSG_FAIL: Self = Self(0x000C);
    pub const SUBCLASS_FAILURE: Self = Self(0x3001);
    pub const INVALID_FILENAME: Self = Self(0x3002);
    pub const BUFFER_TOO_SMALL: Self = Self(0x3003);

    /// Header name of the code, or `None` for values outside the
    /// file-dialog range.
    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0xFFFF => "CDERR_DIALOGFAILURE",
            0x0001 => "CDERR_STRUCTSIZE",
            0x0002 => "CDERR_INITIALIZATION",
            0x0003 => "CDERR_NOTEMPLATE",
            0x0004 => "CDERR_NOHINSTANCE",
            0x0005 => "CDERR_LOADSTRFAILURE",
            0x0006 => "CDERR_FINDRESFAILURE",
            0x0007 => "CDERR_LOADRESFAILURE",
            0x0008 => "CDERR_LOCKRESFAILURE",
            0x0009 => "CDERR_MEMALLOCFAILURE",
            0x000A => "CDERR_MEMLOCKFAILURE",
            0x000B => "CDERR_NOHOOK",
            0x000C => "CDERR_REGISTERMSGFAIL",
            0x3001 => "FNERR_SUBCLASSFAILURE",
            0x3002 => "FNERR_INVALIDFILENAME",
            0x3003 => "FNERR_BUFFERTOOSMALL",
            _ => return None,
        })
    }
}

impl fmt::Display for DialogErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#06x})", self.0),
            None => write!(f, "unknown dialog error {:#06x}", self.0),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_distinguished_from_failure() {
        let cancelled = OfnError::DialogCancelledOrFailed { extended: None };
        let failed = OfnError::DialogCancelledOrFailed {
            extended: Some(DialogErrorCode::BUFFER_TOO_SMALL),
        };
        assert!(cancelled.is_cancelled());
        assert!(!failed.is_cancelled());
        assert!(!OfnError::NotInitialized.is_cancelled());
    }

    #[test]
    fn load_error_display_names_library_and_code() {
        let e = OfnError::Load { library: "comdlg32.dll".to_owned(), code: 126 };
        assert_eq!(e.to_string(), "could not load comdlg32.dll (error 0x0000007e)");
    }

    #[test]
    fn extended_code_display() {
        assert_eq!(
            DialogErrorCode::BUFFER_TOO_SMALL.to_string(),
            "FNERR_BUFFERTOOSMALL (0x3003)"
        );
        assert_eq!(DialogErrorCode(0x4242).to_string(), "unknown dialog error 0x4242");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;
        let e = OfnError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
    }
}
