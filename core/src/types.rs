/// PTC IR value types.
///
/// Width of the integer operands of a type-polymorphic opcode. The dump
/// appends it to the opcode name (`add_i32`, `qemu_ld_i64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Type {
    I32 = 0,
    I64 = 1,
}

impl Type {
    /// Mnemonic suffix for type-polymorphic opcodes.
    pub const fn suffix(self) -> &'static str {
        match self {
            Type::I32 => "_i32",
            Type::I64 => "_i64",
        }
    }
}

/// Comparison conditions for branch/setcond operations.
///
/// Encoding matches TCG's `TCGCond`, so the raw constant carried by a
/// conditional op converts directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cond {
    Never = 0,
    Always = 1,
    Eq = 8,
    Ne = 9,
    // Signed
    Lt = 10,
    Ge = 11,
    Le = 12,
    Gt = 13,
    // Unsigned
    Ltu = 14,
    Geu = 15,
    Leu = 16,
    Gtu = 17,
    // Test (AND then compare vs 0)
    TstEq = 18,
    TstNe = 19,
}

impl Cond {
    /// Decode a raw condition constant. Returns `None` for values outside
    /// the known encoding.
    pub const fn from_raw(raw: u64) -> Option<Cond> {
        let c = match raw {
            0 => Cond::Never,
            1 => Cond::Always,
            8 => Cond::Eq,
            9 => Cond::Ne,
            10 => Cond::Lt,
            11 => Cond::Ge,
            12 => Cond::Le,
            13 => Cond::Gt,
            14 => Cond::Ltu,
            15 => Cond::Geu,
            16 => Cond::Leu,
            17 => Cond::Gtu,
            18 => Cond::TstEq,
            19 => Cond::TstNe,
            _ => return None,
        };
        Some(c)
    }

    /// Short symbolic name used in the dump.
    pub const fn name(self) -> &'static str {
        match self {
            Cond::Never => "never",
            Cond::Always => "always",
            Cond::Eq => "eq",
            Cond::Ne => "ne",
            Cond::Lt => "lt",
            Cond::Ge => "ge",
            Cond::Le => "le",
            Cond::Gt => "gt",
            Cond::Ltu => "ltu",
            Cond::Geu => "geu",
            Cond::Leu => "leu",
            Cond::Gtu => "gtu",
            Cond::TstEq => "tsteq",
            Cond::TstNe => "tstne",
        }
    }
}
