use crate::types::Type;

/// Lifetime/scope of a PTC temporary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TempKind {
    /// Scratch temp, live within a single extended basic block.
    Ebb,
    /// Function-local temp, live across the whole translation.
    Tb,
    /// Global: persists across translations, backed by a CPU state field.
    Global,
    /// Global pinned to a host register (e.g. `env`).
    Fixed,
}

/// Index into the list's temp pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempIdx(pub u32);

impl TempIdx {
    /// Encode as an op argument.
    pub const fn arg(self) -> u64 {
        self.0 as u64
    }
}

/// A PTC temporary variable.
///
/// Only the properties the dump needs are kept: the display name is
/// derived from `kind` and the position relative to the globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temp {
    pub idx: TempIdx,
    pub ty: Type,
    pub kind: TempKind,
    /// Intrinsic name, set for globals (e.g. "pc", "sp").
    pub name: Option<String>,
}

impl Temp {
    pub fn new_ebb(idx: TempIdx, ty: Type) -> Self {
        Self {
            idx,
            ty,
            kind: TempKind::Ebb,
            name: None,
        }
    }

    pub fn new_tb(idx: TempIdx, ty: Type) -> Self {
        Self {
            kind: TempKind::Tb,
            ..Self::new_ebb(idx, ty)
        }
    }

    pub fn new_global(idx: TempIdx, ty: Type, name: impl Into<String>) -> Self {
        Self {
            idx,
            ty,
            kind: TempKind::Global,
            name: Some(name.into()),
        }
    }

    pub fn new_fixed(idx: TempIdx, ty: Type, name: impl Into<String>) -> Self {
        Self {
            kind: TempKind::Fixed,
            ..Self::new_global(idx, ty, name)
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self.kind, TempKind::Global | TempKind::Fixed)
    }

    /// Function-local, as opposed to scratch.
    pub fn is_local(&self) -> bool {
        self.kind == TempKind::Tb
    }
}
