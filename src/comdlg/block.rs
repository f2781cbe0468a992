// ── OPENFILENAMEW parameter block ─────────────────────────────────────────────
//
// `OpenFileNameW` mirrors commdlg.h field for field.  Order and widths are
// the ABI: a missing or mis-sized member shifts every member after it.
// Layout tests at the bottom pin the offsets for both pointer widths.
//
// The raw struct never leaves the crate.  `ParamBlock<'a>` borrows every
// buffer it points into for `'a`, so a block cannot outlive its strings.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr;

use crate::{
    error::{OfnError, Result},
    filter::FilterString,
    flags::OpenFileFlags,
};

/// `OPENFILENAMEW`.
#[repr(C)]
#[derive(Debug)]
pub(crate) struct OpenFileNameW {
    pub(crate) struct_size: u32,
    pub(crate) owner: *mut c_void,
    pub(crate) instance: *mut c_void,
    pub(crate) filter: *const u16,
    pub(crate) custom_filter: *mut u16,
    pub(crate) max_custom_filter: u32,
    pub(crate) filter_index: u32,
    pub(crate) file: *mut u16,
    pub(crate) max_file: u32,
    pub(crate) file_title: *mut u16,
    pub(crate) max_file_title: u32,
    pub(crate) initial_dir: *const u16,
    pub(crate) title: *const u16,
    pub(crate) flags: u32,
    pub(crate) file_offset: u16,
    pub(crate) file_extension: u16,
    pub(crate) default_ext: *const u16,
    pub(crate) cust_data: isize,
    pub(crate) hook: *const c_void,
    pub(crate) template_name: *const u16,
    pub(crate) reserved_ptr: *mut c_void,
    pub(crate) reserved: u32,
    pub(crate) flags_ex: u32,
}

impl OpenFileNameW {
    /// All members zero / null except `struct_size`.
    fn zeroed() -> Self {
        Self {
            struct_size: std::mem::size_of::<Self>() as u32,
            owner: ptr::null_mut(),
            instance: ptr::null_mut(),
            filter: ptr::null(),
            custom_filter: ptr::null_mut(),
            max_custom_filter: 0,
            filter_index: 0,
            file: ptr::null_mut(),
            max_file: 0,
            file_title: ptr::null_mut(),
            max_file_title: 0,
            initial_dir: ptr::null(),
            title: ptr::null(),
            flags: 0,
            file_offset: 0,
            file_extension: 0,
            default_ext: ptr::null(),
            cust_data: 0,
            hook: ptr::null(),
            template_name: ptr::null(),
            reserved_ptr: ptr::null_mut(),
            reserved: 0,
            flags_ex: 0,
        }
    }
}

/// An owner window for the dialog.  Null means "no owner".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(*mut c_void);

impl WindowHandle {
    pub const NONE: Self = Self(ptr::null_mut());

    /// Wrap a raw `HWND`.
    ///
    /// # Safety
    /// `hwnd` must be null or a window that stays valid for every dialog
    /// shown with it.  The native side dereferences it.
    pub unsafe fn from_raw(hwnd: *mut c_void) -> Self {
        Self(hwnd)
    }

    pub fn as_raw(self) -> *mut c_void {
        self.0
    }
}

impl Default for WindowHandle {
    fn default() -> Self {
        Self::NONE
    }
}

// SAFETY: a window handle is a plain identifier; using it from another thread
// is governed by the Win32 rules for the call made with it, not by Rust
// aliasing.
unsafe impl Send for WindowHandle {}
unsafe impl Sync for WindowHandle {}

/// A parameter block whose pointers borrow from buffers living at least `'a`.
pub(crate) struct ParamBlock<'a> {
    raw: OpenFileNameW,
    _buffers: PhantomData<&'a mut [u16]>,
}

/// Native capacity for a caller buffer: 1..=u32::MAX units.
fn capacity(buf: &[u16], what: &str) -> Result<u32> {
    if buf.is_empty() {
        return Err(OfnError::InvalidBuffer(format!("{what} buffer is empty")));
    }
    u32::try_from(buf.len()).map_err(|_| {
        OfnError::InvalidBuffer(format!("{what} buffer exceeds {} units", u32::MAX))
    })
}

impl<'a> ParamBlock<'a> {
    pub(crate) fn new() -> Self {
        Self { raw: OpenFileNameW::zeroed(), _buffers: PhantomData }
    }

    pub(crate) fn set_owner(&mut self, owner: WindowHandle) {
        self.raw.owner = owner.as_raw();
    }

    pub(crate) fn set_filter(&mut self, filter: &'a FilterString) {
        self.raw.filter = filter.as_ptr();
    }

    /// 1-based; 0 selects the first filter.
    pub(crate) fn set_filter_index(&mut self, index: u32) {
        self.raw.filter_index = index;
    }

    pub(crate) fn set_flags(&mut self, flags: OpenFileFlags) {
        self.raw.flags = flags.bits();
    }

    /// Point the file-name member at `buf`; `max_file` becomes `buf.len()`.
    pub(crate) fn set_file(&mut self, buf: &'a mut [u16]) -> Result<()> {
        self.raw.max_file = capacity(buf, "file")?;
        self.raw.file = buf.as_mut_ptr();
        Ok(())
    }

    pub(crate) fn set_file_title(&mut self, buf: &'a mut [u16]) -> Result<()> {
        self.raw.max_file_title = capacity(buf, "file title")?;
        self.raw.file_title = buf.as_mut_ptr();
        Ok(())
    }

    /// `dir` must be NUL-terminated.
    pub(crate) fn set_initial_dir(&mut self, dir: &'a [u16]) {
        debug_assert_eq!(dir.last(), Some(&0));
        self.raw.initial_dir = dir.as_ptr();
    }

    /// `title` must be NUL-terminated.
    pub(crate) fn set_title(&mut self, title: &'a [u16]) {
        debug_assert_eq!(title.last(), Some(&0));
        self.raw.title = title.as_ptr();
    }

    /// `ext` must be NUL-terminated, without the leading dot.
    pub(crate) fn set_default_ext(&mut self, ext: &'a [u16]) {
        debug_assert_eq!(ext.last(), Some(&0));
        self.raw.default_ext = ext.as_ptr();
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut OpenFileNameW {
        &mut self.raw
    }

    // ── Read-back ─────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &OpenFileNameW {
        &self.raw
    }

    pub(crate) fn flags(&self) -> OpenFileFlags {
        OpenFileFlags::from_bits(self.raw.flags)
    }

    pub(crate) fn filter_index(&self) -> u32 {
        self.raw.filter_index
    }

    /// Offsets of the file name and extension within the returned path, as
    /// reported by the native call.
    pub(crate) fn offsets(&self) -> (u16, u16) {
        (self.raw.file_offset, self.raw.file_extension)
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn new_block_is_zeroed_with_size() {
        let block = ParamBlock::new();
        let raw = block.raw();
        assert_eq!(raw.struct_size as usize, size_of::<OpenFileNameW>());
        assert!(raw.owner.is_null());
        assert!(raw.instance.is_null());
        assert!(raw.filter.is_null());
        assert!(raw.custom_filter.is_null());
        assert_eq!(raw.max_custom_filter, 0);
        assert_eq!(raw.filter_index, 0);
        assert!(raw.file.is_null());
        assert_eq!(raw.max_file, 0);
        assert!(raw.file_title.is_null());
        assert_eq!(raw.max_file_title, 0);
        assert!(raw.initial_dir.is_null());
        assert!(raw.title.is_null());
        assert_eq!(raw.flags, 0);
        assert_eq!((raw.file_offset, raw.file_extension), (0, 0));
        assert!(raw.default_ext.is_null());
        assert_eq!(raw.cust_data, 0);
        assert!(raw.hook.is_null());
        assert!(raw.template_name.is_null());
        assert!(raw.reserved_ptr.is_null());
        assert_eq!(raw.reserved, 0);
        assert_eq!(raw.flags_ex, 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn layout_64() {
        assert_eq!(size_of::<OpenFileNameW>(), 152);
        assert_eq!(offset_of!(OpenFileNameW, owner), 8);
        assert_eq!(offset_of!(OpenFileNameW, filter), 24);
        assert_eq!(offset_of!(OpenFileNameW, max_custom_filter), 40);
        assert_eq!(offset_of!(OpenFileNameW, filter_index), 44);
        assert_eq!(offset_of!(OpenFileNameW, file), 48);
        assert_eq!(offset_of!(OpenFileNameW, max_file), 56);
        assert_eq!(offset_of!(OpenFileNameW, file_title), 64);
        assert_eq!(offset_of!(OpenFileNameW, initial_dir), 80);
        assert_eq!(offset_of!(OpenFileNameW, flags), 96);
        assert_eq!(offset_of!(OpenFileNameW, file_offset), 100);
        assert_eq!(offset_of!(OpenFileNameW, file_extension), 102);
        assert_eq!(offset_of!(OpenFileNameW, default_ext), 104);
        assert_eq!(offset_of!(OpenFileNameW, hook), 120);
        assert_eq!(offset_of!(OpenFileNameW, reserved_ptr), 136);
        assert_eq!(offset_of!(OpenFileNameW, reserved), 144);
        assert_eq!(offset_of!(OpenFileNameW, flags_ex), 148);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn layout_32() {
        assert_eq!(size_of::<OpenFileNameW>(), 88);
        assert_eq!(offset_of!(OpenFileNameW, flags), 52);
        assert_eq!(offset_of!(OpenFileNameW, file_offset), 56);
        assert_eq!(offset_of!(OpenFileNameW, flags_ex), 84);
    }

    #[cfg(windows)]
    #[test]
    fn layout_matches_windows_bindings() {
        use windows::Win32::UI::Controls::Dialogs::OPENFILENAMEW;
        assert_eq!(size_of::<OpenFileNameW>(), size_of::<OPENFILENAMEW>());
        assert_eq!(offset_of!(OpenFileNameW, flags), offset_of!(OPENFILENAMEW, Flags));
        assert_eq!(offset_of!(OpenFileNameW, max_file), offset_of!(OPENFILENAMEW, nMaxFile));
        assert_eq!(offset_of!(OpenFileNameW, flags_ex), offset_of!(OPENFILENAMEW, FlagsEx));
    }

    #[test]
    fn file_capacity_is_exact_length() {
        for n in [1usize, 2, 255, 256, 260, 32_768] {
            let mut buf = vec![0u16; n];
            let mut block = ParamBlock::new();
            block.set_file(&mut buf).expect("non-empty buffer");
            assert_eq!(block.raw().max_file as usize, n);
        }
    }

    #[test]
    fn empty_file_buffer_is_rejected() {
        let mut buf: Vec<u16> = Vec::new();
        let mut block = ParamBlock::new();
        assert!(matches!(block.set_file(&mut buf), Err(OfnError::InvalidBuffer(_))));
        assert!(block.raw().file.is_null());
    }

    #[test]
    fn flags_are_stored_verbatim() {
        let mut block = ParamBlock::new();
        for bits in [0, 1, 0x0008_1804, 0x1000_0000, u32::MAX] {
            block.set_flags(OpenFileFlags::from_bits(bits));
            assert_eq!(block.raw().flags, bits);
        }
    }
}
