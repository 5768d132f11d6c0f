//! Memory-access descriptors for `qemu_ld` / `qemu_st`.
//!
//! Guest memory ops carry a single constant packing the memory operation
//! and the MMU index, laid out like TCG's `MemOpIdx`:
//!
//! ```text
//!   constant = (memop << 4) | mmu_idx
//!   memop    [1:0] size   [2] sign   [3] bswap   [5:4] alignment
//! ```
//!
//! Alignment is 0 (target default), 1 (unaligned) or 2 (aligned); 3 and
//! any bit above 5 are not a valid encoding and decode as
//! [`AccessKind::Unknown`].

/// Number of low bits of the constant holding the MMU index.
pub const MMU_IDX_BITS: u32 = 4;
pub const MMU_IDX_MASK: u64 = (1 << MMU_IDX_BITS) - 1;

/// Memory operation descriptor: size, signedness, endianness, alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemOp(u16);

impl MemOp {
    pub const SIZE_8: u16 = 0;
    pub const SIZE_16: u16 = 1;
    pub const SIZE_32: u16 = 2;
    pub const SIZE_64: u16 = 3;
    pub const SIZE_MASK: u16 = 0x3;

    pub const SIGN: u16 = 1 << 2;
    pub const BSWAP: u16 = 1 << 3;

    pub const ALIGN_SHIFT: u32 = 4;
    pub const ALIGN_MASK: u16 = 3 << Self::ALIGN_SHIFT;
    pub const UNALN: u16 = 1 << Self::ALIGN_SHIFT;
    pub const ALIGN: u16 = 2 << Self::ALIGN_SHIFT;

    /// Bits that make up the operation type (what is loaded/stored).
    pub const TYPE_MASK: u16 = Self::SIZE_MASK | Self::SIGN | Self::BSWAP;
    /// Every bit with a defined meaning.
    pub const VALID_MASK: u16 = Self::TYPE_MASK | Self::ALIGN_MASK;

    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn ub() -> Self {
        Self(Self::SIZE_8)
    }
    pub const fn sb() -> Self {
        Self(Self::SIZE_8 | Self::SIGN)
    }
    pub const fn uw() -> Self {
        Self(Self::SIZE_16)
    }
    pub const fn sw() -> Self {
        Self(Self::SIZE_16 | Self::SIGN)
    }
    pub const fn ul() -> Self {
        Self(Self::SIZE_32)
    }
    pub const fn sl() -> Self {
        Self(Self::SIZE_32 | Self::SIGN)
    }
    pub const fn uq() -> Self {
        Self(Self::SIZE_64)
    }

    /// Same access, byte-swapped (big-endian on a little-endian host).
    pub const fn bswap(self) -> Self {
        Self(self.0 | Self::BSWAP)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
    pub const fn size(self) -> u16 {
        self.0 & Self::SIZE_MASK
    }
    pub const fn is_signed(self) -> bool {
        self.0 & Self::SIGN != 0
    }
    pub const fn is_bswap(self) -> bool {
        self.0 & Self::BSWAP != 0
    }
    pub const fn size_bytes(self) -> u32 {
        1 << self.size()
    }

    /// The operation type alone, alignment stripped.
    pub const fn op_type(self) -> Self {
        Self(self.0 & Self::TYPE_MASK)
    }

    /// Short name of the operation type (`leul`, `sb`, `beq`...).
    ///
    /// `None` for combinations without a name: signed 64-bit and
    /// byte-swapped single bytes.
    pub const fn name(self) -> Option<&'static str> {
        const S: u16 = MemOp::SIGN;
        const BE: u16 = MemOp::BSWAP;
        let name = match self.0 & Self::TYPE_MASK {
            x if x == Self::SIZE_8 => "ub",
            x if x == Self::SIZE_8 | S => "sb",
            x if x == Self::SIZE_16 => "leuw",
            x if x == Self::SIZE_16 | S => "lesw",
            x if x == Self::SIZE_32 => "leul",
            x if x == Self::SIZE_32 | S => "lesl",
            x if x == Self::SIZE_64 => "leq",
            x if x == Self::SIZE_16 | BE => "beuw",
            x if x == Self::SIZE_16 | S | BE => "besw",
            x if x == Self::SIZE_32 | BE => "beul",
            x if x == Self::SIZE_32 | S | BE => "besl",
            x if x == Self::SIZE_64 | BE => "beq",
            _ => return None,
        };
        Some(name)
    }
}

/// Alignment/validity class of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Target default alignment policy.
    Normal,
    Unaligned,
    Aligned,
    /// Not a valid encoding.
    Unknown,
}

impl AccessKind {
    /// Dump prefix in front of the operation type name.
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            AccessKind::Normal => Some(""),
            AccessKind::Unaligned => Some("un+"),
            AccessKind::Aligned => Some("al+"),
            AccessKind::Unknown => None,
        }
    }

    /// Alignment field bits in a `MemOp`.
    pub const fn align_bits(self) -> Option<u16> {
        match self {
            AccessKind::Normal => Some(0),
            AccessKind::Unaligned => Some(MemOp::UNALN),
            AccessKind::Aligned => Some(MemOp::ALIGN),
            AccessKind::Unknown => None,
        }
    }
}

/// Decoded memory-access constant of a guest load/store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemAccessArg {
    pub kind: AccessKind,
    /// Operation type, alignment stripped.
    pub op: MemOp,
    pub mmu_idx: u32,
    /// The constant as carried by the op.
    pub raw: u64,
}

impl MemAccessArg {
    /// Pack a well-formed descriptor.
    pub fn new(kind: AccessKind, op: MemOp, mmu_idx: u32) -> Self {
        let Some(align) = kind.align_bits() else {
            panic!("cannot encode an unknown access kind");
        };
        assert!(
            (mmu_idx as u64) <= MMU_IDX_MASK,
            "mmu index {mmu_idx} does not fit in {MMU_IDX_BITS} bits"
        );
        let op = op.op_type();
        let raw = (((op.bits() | align) as u64) << MMU_IDX_BITS) | mmu_idx as u64;
        Self {
            kind,
            op,
            mmu_idx,
            raw,
        }
    }

    /// Unpack a raw constant. Never fails; malformed encodings come back
    /// with `kind == AccessKind::Unknown`.
    pub fn decode(raw: u64) -> Self {
        let mmu_idx = (raw & MMU_IDX_MASK) as u32;
        let memop = raw >> MMU_IDX_BITS;
        let kind = if memop & !(MemOp::VALID_MASK as u64) != 0 {
            AccessKind::Unknown
        } else {
            match memop as u16 & MemOp::ALIGN_MASK {
                0 => AccessKind::Normal,
                MemOp::UNALN => AccessKind::Unaligned,
                MemOp::ALIGN => AccessKind::Aligned,
                _ => AccessKind::Unknown,
            }
        };
        Self {
            kind,
            op: MemOp::new(memop as u16).op_type(),
            mmu_idx,
            raw,
        }
    }

    /// Repack into the constant form. For an unknown kind the original
    /// constant is returned untouched.
    pub fn pack(&self) -> u64 {
        match self.kind.align_bits() {
            Some(align) => {
                (((self.op.bits() | align) as u64) << MMU_IDX_BITS) | self.mmu_idx as u64
            }
            None => self.raw,
        }
    }

    /// The memop field (type and alignment) as carried in `raw`.
    pub fn raw_memop(&self) -> u64 {
        self.raw >> MMU_IDX_BITS
    }
}
