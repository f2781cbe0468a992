// ── Showing the dialog ────────────────────────────────────────────────────────
//
// Two entry points share `DialogLibrary::invoke`:
//   • `choose_file`  – the minimal form: caller-owned buffer, boolean result.
//   • `OpenFileDialog::show` – owns its buffers and decodes the selection.
//
// Both block the calling thread until the user closes the dialog.

use std::path::{Path, PathBuf};

use crate::{
    comdlg::{block::ParamBlock, block::WindowHandle, DialogLibrary},
    error::{OfnError, Result},
    filter::{FileFilter, FilterString},
    flags::OpenFileFlags,
    platform::NativeModule,
    wide,
};

/// Path buffer `OpenFileDialog` allocates unless told otherwise, in UTF-16
/// units with the terminator.  Long enough for any `\\?\`-prefixed path.
pub const PATH_BUF_LEN: usize = 32_768;

/// Buffer for the file-title member: a bare file name fits in `MAX_PATH`.
const TITLE_BUF_LEN: usize = 260;

// ── Minimal form ──────────────────────────────────────────────────────────────

impl<M: NativeModule> DialogLibrary<M> {
    /// Show the open dialog with `filter` and `flags`, writing the chosen path
    /// into `output`.
    ///
    /// `output` doubles as the initial file name (leave it zeroed for none)
    /// and is described to the native side with capacity `output.len()`.
    /// Returns `true` if a file was chosen; `output` then holds a
    /// NUL-terminated UTF-16 path.  On `false` (cancelled or failed) the
    /// buffer contents are unspecified; see `extended_error` for the cause.
    ///
    /// An empty `output`, or one longer than `u32::MAX` units, returns `false`
    /// without showing the dialog.
    pub fn choose_file(
        &self,
        filter: &FilterString,
        flags: OpenFileFlags,
        output: &mut [u16],
    ) -> bool {
        let mut block = ParamBlock::new();
        block.set_filter(filter);
        block.set_flags(flags);
        if let Err(e) = block.set_file(output) {
            log::warn!("{e}; dialog not shown");
            return false;
        }
        self.invoke(&mut block)
    }
}

// ── Builder form ──────────────────────────────────────────────────────────────

/// A file chosen in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Full path as returned by the dialog.
    pub path: PathBuf,
    /// The file-name part of `path` (from the native file offset).
    pub file_name: String,
    /// Extension without the dot, if the name has one.
    pub extension: Option<String>,
    /// The name as the dialog displayed it (the file-title member).
    pub display_name: String,
    /// 1-based index of the filter active when the dialog closed.
    pub filter_index: u32,
    /// Whether the "open as read-only" box was checked.
    pub read_only: bool,
}

/// Everything needed to show an open dialog, with owned buffers.
#[derive(Debug, Clone)]
pub struct OpenFileDialog {
    filters: Vec<FileFilter>,
    filter_index: u32,
    flags: OpenFileFlags,
    title: Option<String>,
    initial_dir: Option<PathBuf>,
    default_extension: Option<String>,
    file_name: Option<String>,
    buffer_len: usize,
    owner: WindowHandle,
}

impl Default for OpenFileDialog {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            filter_index: 0,
            flags: OpenFileFlags::NONE,
            title: None,
            initial_dir: None,
            default_extension: None,
            file_name: None,
            buffer_len: PATH_BUF_LEN,
            owner: WindowHandle::NONE,
        }
    }
}

impl OpenFileDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file-type filter.  With no filters the dialog shows all files.
    pub fn filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters<I: IntoIterator<Item = FileFilter>>(mut self, filters: I) -> Self {
        self.filters.extend(filters);
        self
    }

    /// 1-based index of the initially selected filter; 0 means the first.
    pub fn filter_index(mut self, index: u32) -> Self {
        self.filter_index = index;
        self
    }

    pub fn flags(mut self, flags: OpenFileFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Window title; the system default ("Open") when unset.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn initial_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.initial_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Appended when the user types a name without an extension.  A leading
    /// dot is stripped.
    pub fn default_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.default_extension = Some(ext.trim_start_matches('.').to_owned());
        self
    }

    /// Pre-fill the file-name box.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Path buffer length in UTF-16 units, terminator included.
    pub fn buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = len;
        self
    }

    pub fn owner(mut self, owner: WindowHandle) -> Self {
        self.owner = owner;
        self
    }

    pub fn get_flags(&self) -> OpenFileFlags {
        self.flags
    }

    pub fn get_buffer_len(&self) -> usize {
        self.buffer_len
    }

    pub fn get_filters(&self) -> &[FileFilter] {
        &self.filters
    }

    pub fn get_file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The path buffer: the initial file name, zero-padded to `buffer_len`.
    fn file_buffer(&self) -> Result<Vec<u16>> {
        let mut buf: Vec<u16> = self
            .file_name
            .as_deref()
            .map(|name| name.encode_utf16().collect())
            .unwrap_or_default();
        if buf.len() >= self.buffer_len.max(1) {
            return Err(OfnError::InvalidBuffer(format!(
                "initial file name needs {} units, buffer holds {}",
                buf.len() + 1,
                self.buffer_len
            )));
        }
        buf.resize(self.buffer_len, 0);
        Ok(buf)
    }

    /// Show the dialog.  Blocks until it closes.
    ///
    /// A falsy native result becomes `OfnError::DialogCancelledOrFailed`;
    /// `is_cancelled()` on it is `true` when the user simply closed the
    /// dialog.
    ///
    /// `show` decodes exactly one file.  `ALLOWMULTISELECT` is rejected with
    /// `MultipleSelection` before the dialog opens, and so is a result whose
    /// file offset points past the first terminator.
    pub fn show<M: NativeModule>(&self, lib: &DialogLibrary<M>) -> Result<Selection> {
        if self.flags.contains(OpenFileFlags::ALLOWMULTISELECT) {
            return Err(OfnError::MultipleSelection);
        }
        let filter = if self.filters.is_empty() {
            None
        } else {
            Some(FilterString::new(&self.filters)?)
        };
        let title = self.title.as_deref().map(wide::to_wide_null);
        let initial_dir = self.initial_dir.as_deref().map(wide::path_to_wide_null);
        let default_ext = self.default_extension.as_deref().map(wide::to_wide_null);
        let mut file = self.file_buffer()?;
        let mut file_title = vec![0u16; TITLE_BUF_LEN];

        let mut block = ParamBlock::new();
        block.set_owner(self.owner);
        if let Some(filter) = &filter {
            block.set_filter(filter);
            block.set_filter_index(self.filter_index);
        }
        block.set_flags(self.flags);
        block.set_file(&mut file)?;
        block.set_file_title(&mut file_title)?;
        if let Some(title) = &title {
            block.set_title(title);
        }
        if let Some(dir) = &initial_dir {
            block.set_initial_dir(dir);
        }
        if let Some(ext) = &default_ext {
            block.set_default_ext(ext);
        }

        if !lib.invoke(&mut block) {
            let extended = lib.extended_error();
            log::debug!("open dialog returned FALSE (extended: {extended:?})");
            return Err(OfnError::DialogCancelledOrFailed { extended });
        }

        let (file_offset, ext_offset) = block.offsets();
        let filter_index = block.filter_index();
        let read_only = block.flags().contains(OpenFileFlags::READONLY);

        let units = wide::until_nul(&file);
        if usize::from(file_offset) > units.len() {
            // Directory first, then NUL-separated names.
            return Err(OfnError::MultipleSelection);
        }
        let tail = |offset: u16| {
            let offset = usize::from(offset);
            (offset > 0 && offset < units.len()).then(|| String::from_utf16_lossy(&units[offset..]))
        };
        let file_name = tail(file_offset).unwrap_or_else(|| String::from_utf16_lossy(units));

        Ok(Selection {
            path: wide::path_from_wide(&file),
            extension: tail(ext_offset),
            file_name,
            display_name: wide::string_from_wide(&file_title),
            filter_index,
            read_only,
        })
    }
}
