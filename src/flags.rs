// ── OFN_* flag bits ───────────────────────────────────────────────────────────
//
// `OpenFileFlags` is the `Flags` member of `OPENFILENAMEW`.  The binding never
// interprets these bits; whatever the caller combines is written to the
// parameter block unchanged, including bits not listed here.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask passed as the dialog's `Flags` field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OpenFileFlags(u32);

impl OpenFileFlags {
    pub const NONE: Self = Self(0);

    pub const READONLY: Self = Self(0x0000_0001);
    pub const OVERWRITEPROMPT: Self = Self(0x0000_0002);
    pub const HIDEREADONLY: Self = Self(0x0000_0004);
    pub const NOCHANGEDIR: Self = Self(0x0000_0008);
    pub const SHOWHELP: Self = Self(0x0000_0010);
    pub const ENABLEHOOK: Self = Self(0x0000_0020);
    pub const ENABLETEMPLATE: Self = Self(0x0000_0040);
    pub const ENABLETEMPLATEHANDLE: Self = Self(0x0000_0080);
    pub const NOVALIDATE: Self = Self(0x0000_0100);
    pub const ALLOWMULTISELECT: Self = Self(0x0000_0200);
    pub const EXTENSIONDIFFERENT: Self = Self(0x0000_0400);
    pub const PATHMUSTEXIST: Self = Self(0x0000_0800);
    pub const FILEMUSTEXIST: Self = Self(0x0000_1000);
    pub const CREATEPROMPT: Self = Self(0x0000_2000);
    pub const SHAREAWARE: Self = Self(0x0000_4000);
    pub const NOREADONLYRETURN: Self = Self(0x0000_8000);
    pub const NOTESTFILECREATE: Self = Self(0x0001_0000);
    pub const NONETWORKBUTTON: Self = Self(0x0002_0000);
    pub const NOLONGNAMES: Self = Self(0x0004_0000);
    pub const EXPLORER: Self = Self(0x0008_0000);
    pub const NODEREFERENCELINKS: Self = Self(0x0010_0000);
    pub const LONGNAMES: Self = Self(0x0020_0000);
    pub const ENABLEINCLUDENOTIFY: Self = Self(0x0040_0000);
    pub const ENABLESIZING: Self = Self(0x0080_0000);
    pub const DONTADDTORECENT: Self = Self(0x0200_0000);
    pub const FORCESHOWHIDDEN: Self = Self(0x1000_0000);

    /// Every named bit, in ascending order.
    pub const ALL_NAMED: [(&'static str, Self); 26] = [
        ("READONLY", Self::READONLY),
        ("OVERWRITEPROMPT", Self::OVERWRITEPROMPT),
        ("HIDEREADONLY", Self::HIDEREADONLY),
        ("NOCHANGEDIR", Self::NOCHANGEDIR),
        ("SHOWHELP", Self::SHOWHELP),
        ("ENABLEHOOK", Self::ENABLEHOOK),
        ("ENABLETEMPLATE", Self::ENABLETEMPLATE),
        ("ENABLETEMPLATEHANDLE", Self::ENABLETEMPLATEHANDLE),
        ("NOVALIDATE", Self::NOVALIDATE),
        ("ALLOWMULTISELECT", Self::ALLOWMULTISELECT),
        ("EXTENSIONDIFFERENT", Self::EXTENSIONDIFFERENT),
        ("PATHMUSTEXIST", Self::PATHMUSTEXIST),
        ("FILEMUSTEXIST", Self::FILEMUSTEXIST),
        ("CREATEPROMPT", Self::CREATEPROMPT),
        ("SHAREAWARE", Self::SHAREAWARE),
        ("NOREADONLYRETURN", Self::NOREADONLYRETURN),
        ("NOTESTFILECREATE", Self::NOTESTFILECREATE),
        ("NONETWORKBUTTON", Self::NONETWORKBUTTON),
        ("NOLONGNAMES", Self::NOLONGNAMES),
        ("EXPLORER", Self::EXPLORER),
        ("NODEREFERENCELINKS", Self::NODEREFERENCELINKS),
        ("LONGNAMES", Self::LONGNAMES),
        ("ENABLEINCLUDENOTIFY", Self::ENABLEINCLUDENOTIFY),
        ("ENABLESIZING", Self::ENABLESIZING),
        ("DONTADDTORECENT", Self::DONTADDTORECENT),
        ("FORCESHOWHIDDEN", Self::FORCESHOWHIDDEN),
    ];

    /// Wrap a raw value.  No bits are masked off.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Look up a bit by its header name, with or without the `OFN_` prefix,
    /// ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("OFN_").unwrap_or(&upper);
        Self::ALL_NAMED
            .iter()
            .find(|(n, _)| *n == bare)
            .map(|&(_, flag)| flag)
    }
}

impl BitOr for OpenFileFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OpenFileFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OpenFileFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<u32> for OpenFileFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<OpenFileFlags> for u32 {
    fn from(flags: OpenFileFlags) -> Self {
        flags.0
    }
}

impl fmt::Debug for OpenFileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        let mut names = Vec::new();
        for (name, flag) in Self::ALL_NAMED {
            if self.contains(flag) {
                names.push(name);
                rest &= !flag.0;
            }
        }
        write!(f, "OpenFileFlags({:#010x}", self.0)?;
        if !names.is_empty() {
            write!(f, ": {}", names.join(" | "))?;
        }
        if rest != 0 && !names.is_empty() {
            write!(f, " | {rest:#x}")?;
        }
        write!(f, ")")
    }
}
