/// A Vendor-Specific Attribute sub-attribute wire-format dialect. The
/// dialect is not self-describing on the wire; callers must supply it
/// identically on encode and on parse.
///
/// Name encodes the sub-header shape: `T<n>L<m>` is an `n`-byte Type field
/// and an `m`-byte Length field; `T1L1C` additionally carries a 1-byte
/// WiMAX-style continuation field (RFC 5090 / WiMAX Release 1.0 framework).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    T1L1,
    T1L0,
    T1L1C,
    T2L1,
    T2L0,
    T2L2,
    T4L1,
    T4L0,
    T4L2,
}

impl Dialect {
    /// Width in bytes of the sub-attribute's Type field.
    pub fn type_bytes(self) -> usize {
        match self {
            Dialect::T1L1 | Dialect::T1L0 | Dialect::T1L1C => 1,
            Dialect::T2L1 | Dialect::T2L0 | Dialect::T2L2 => 2,
            Dialect::T4L1 | Dialect::T4L0 | Dialect::T4L2 => 4,
        }
    }

    /// Width in bytes of the sub-attribute's Length field (0 if absent).
    pub fn length_bytes(self) -> usize {
        match self {
            Dialect::T1L0 | Dialect::T2L0 | Dialect::T4L0 => 0,
            Dialect::T1L1 | Dialect::T1L1C | Dialect::T2L1 | Dialect::T4L1 => 1,
            Dialect::T2L2 | Dialect::T4L2 => 2,
        }
    }

    /// Whether this dialect carries a 1-byte continuation field after the
    /// Length field (only the WiMAX `T1L1C` variant does).
    pub fn has_continuation(self) -> bool {
        matches!(self, Dialect::T1L1C)
    }

    /// Total width in bytes of Type + Length + Continuation, before Data.
    pub fn sub_header_len(self) -> usize {
        self.type_bytes() + self.length_bytes() + usize::from(self.has_continuation())
    }
}
