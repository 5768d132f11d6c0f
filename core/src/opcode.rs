/// PTC IR opcodes.
///
/// Integer ops flagged `INT` work on both I32 and I64; the actual type is
/// carried in `Op::op_type` and shows up as a `_i32`/`_i64` mnemonic
/// suffix. Ops that only exist at one width spell it in their name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // -- Markers and control --
    Discard = 0,
    SetLabel,
    Call,
    Br,
    Mb,        // memory barrier
    InsnStart, // marks guest instruction boundary
    ExitTb,
    GotoTb,
    GotoPtr,

    // -- Data movement --
    Mov,
    MovI, // load immediate
    SetCond,
    MovCond,

    // -- Host memory load/store (CPU state fields) --
    Ld8U,
    Ld8S,
    Ld16U,
    Ld16S,
    Ld32U,
    Ld32S,
    Ld,
    St8,
    St16,
    St32,
    St,

    // -- Arithmetic --
    Add,
    Sub,
    Mul,
    Neg,
    Div,
    DivU,
    Rem,
    RemU,
    Div2,  // signed double-width division
    DivU2, // unsigned double-width division
    MulU2, // unsigned multiply -> double width
    MulS2, // signed multiply -> double width
    MulUH, // unsigned multiply high
    MulSH, // signed multiply high
    Add2,  // double-width add on register pairs
    Sub2,

    // -- Logic --
    And,
    Or,
    Xor,
    Not,
    AndC, // a & ~b
    OrC,  // a | ~b
    Eqv,  // ~(a ^ b)
    Nand,
    Nor,

    // -- Shift/rotate --
    Shl,
    Shr,
    Sar,
    RotL,
    RotR,

    // -- Bit field --
    Deposit,
    Extract,
    SExtract,

    // -- Extension and byte swap --
    Ext8S,
    Ext16S,
    Ext32S,
    Ext8U,
    Ext16U,
    Ext32U,
    Bswap16,
    Bswap32,
    Bswap64,

    // -- Bit counting --
    Clz,
    Ctz,
    CtPop,

    // -- Conditional branch --
    BrCond,

    // -- 32-bit host: 64-bit ops on paired regs --
    BrCond2I32,
    SetCond2I32,

    // -- Width conversion --
    ExtI32I64,   // sign-extend i32 -> i64
    ExtUI32I64,  // zero-extend i32 -> i64
    ExtrlI64I32, // truncate i64 -> i32 (low)
    ExtrhI64I32, // extract i64 -> i32 (high)

    // -- Guest memory access (through the softmmu) --
    QemuLd,
    QemuSt,

    // Sentinel, must be last
    Count,
}

/// Flags describing properties of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpFlags(u16);

impl OpFlags {
    pub const NONE: OpFlags = OpFlags(0);
    /// Operands may be I32 or I64 (type-polymorphic).
    pub const INT: OpFlags = OpFlags(0x01);
    /// Argument counts are carried by the op, not by the definition.
    pub const VAR_ARGS: OpFlags = OpFlags(0x02);

    pub const fn contains(self, other: OpFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Rendering policy family of an opcode.
///
/// Every opcode belongs to exactly one family; the dump renders an op
/// with a single match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpFamily {
    /// Guest instruction boundary (`insn_start`).
    Marker,
    /// Helper call with variable arity.
    Call,
    /// First constant is a condition code.
    Cond,
    /// Condition code followed by a label.
    CondBranch,
    /// First constant is a packed memory-access descriptor.
    MemAccess,
    /// First constant is a label id.
    Label,
    /// Constants are opaque immediates.
    Generic,
}

/// Static definition of an opcode: argument counts, flags, family.
///
/// For `VAR_ARGS` opcodes the counts are upper bounds (`insn_start`) or
/// describe only the constant part (`call`).
#[derive(Debug, Clone, Copy)]
pub struct OpDef {
    pub name: &'static str,
    pub nb_oargs: u8,
    pub nb_iargs: u8,
    pub nb_cargs: u8,
    pub flags: OpFlags,
    pub family: OpFamily,
}

impl OpDef {
    pub const fn nb_args(&self) -> u8 {
        self.nb_oargs + self.nb_iargs + self.nb_cargs
    }
}

const fn def(
    name: &'static str,
    nb_oargs: u8,
    nb_iargs: u8,
    nb_cargs: u8,
    flags: OpFlags,
    family: OpFamily,
) -> OpDef {
    OpDef {
        name,
        nb_oargs,
        nb_iargs,
        nb_cargs,
        flags,
        family,
    }
}

const INT: OpFlags = OpFlags::INT;
const VA: OpFlags = OpFlags::VAR_ARGS;
const N: OpFlags = OpFlags::NONE;

use OpFamily::{Call, Cond, CondBranch, Generic, Label, Marker, MemAccess};

/// Static opcode definition table, indexed by `Opcode as usize`.
#[rustfmt::skip]
pub static OPCODE_DEFS: [OpDef; Opcode::Count as usize] = [
    def("discard",       1, 0, 0, N,                Generic),
    def("set_label",     0, 0, 1, N,                Label),
    def("call",          0, 0, 2, VA,               Call),
    def("br",            0, 0, 1, N,                Label),
    def("mb",            0, 0, 1, N,                Generic),
    def("insn_start",    0, 0, 2, VA,               Marker),
    def("exit_tb",       0, 0, 1, N,                Generic),
    def("goto_tb",       0, 0, 1, N,                Generic),
    def("goto_ptr",      0, 1, 0, N,                Generic),
    def("mov",           1, 1, 0, INT,              Generic),
    def("movi",          1, 0, 1, INT,              Generic),
    def("setcond",       1, 2, 1, INT,              Cond),
    def("movcond",       1, 4, 1, INT,              Cond),
    def("ld8u",          1, 1, 1, INT,              Generic),
    def("ld8s",          1, 1, 1, INT,              Generic),
    def("ld16u",         1, 1, 1, INT,              Generic),
    def("ld16s",         1, 1, 1, INT,              Generic),
    def("ld32u",         1, 1, 1, INT,              Generic),
    def("ld32s",         1, 1, 1, INT,              Generic),
    def("ld",            1, 1, 1, INT,              Generic),
    def("st8",           0, 2, 1, INT,              Generic),
    def("st16",          0, 2, 1, INT,              Generic),
    def("st32",          0, 2, 1, INT,              Generic),
    def("st",            0, 2, 1, INT,              Generic),
    def("add",           1, 2, 0, INT,              Generic),
    def("sub",           1, 2, 0, INT,              Generic),
    def("mul",           1, 2, 0, INT,              Generic),
    def("neg",           1, 1, 0, INT,              Generic),
    def("div",           1, 2, 0, INT,              Generic),
    def("divu",          1, 2, 0, INT,              Generic),
    def("rem",           1, 2, 0, INT,              Generic),
    def("remu",          1, 2, 0, INT,              Generic),
    def("div2",          2, 3, 0, INT,              Generic),
    def("divu2",         2, 3, 0, INT,              Generic),
    def("mulu2",         2, 2, 0, INT,              Generic),
    def("muls2",         2, 2, 0, INT,              Generic),
    def("muluh",         1, 2, 0, INT,              Generic),
    def("mulsh",         1, 2, 0, INT,              Generic),
    def("add2",          2, 4, 0, INT,              Generic),
    def("sub2",          2, 4, 0, INT,              Generic),
    def("and",           1, 2, 0, INT,              Generic),
    def("or",            1, 2, 0, INT,              Generic),
    def("xor",           1, 2, 0, INT,              Generic),
    def("not",           1, 1, 0, INT,              Generic),
    def("andc",          1, 2, 0, INT,              Generic),
    def("orc",           1, 2, 0, INT,              Generic),
    def("eqv",           1, 2, 0, INT,              Generic),
    def("nand",          1, 2, 0, INT,              Generic),
    def("nor",           1, 2, 0, INT,              Generic),
    def("shl",           1, 2, 0, INT,              Generic),
    def("shr",           1, 2, 0, INT,              Generic),
    def("sar",           1, 2, 0, INT,              Generic),
    def("rotl",          1, 2, 0, INT,              Generic),
    def("rotr",          1, 2, 0, INT,              Generic),
    def("deposit",       1, 2, 2, INT,              Generic),
    def("extract",       1, 1, 2, INT,              Generic),
    def("sextract",      1, 1, 2, INT,              Generic),
    def("ext8s",         1, 1, 0, INT,              Generic),
    def("ext16s",        1, 1, 0, INT,              Generic),
    def("ext32s_i64",    1, 1, 0, N,                Generic),
    def("ext8u",         1, 1, 0, INT,              Generic),
    def("ext16u",        1, 1, 0, INT,              Generic),
    def("ext32u_i64",    1, 1, 0, N,                Generic),
    def("bswap16",       1, 1, 0, INT,              Generic),
    def("bswap32",       1, 1, 0, INT,              Generic),
    def("bswap64_i64",   1, 1, 0, N,                Generic),
    def("clz",           1, 2, 0, INT,              Generic),
    def("ctz",           1, 2, 0, INT,              Generic),
    def("ctpop",         1, 1, 0, INT,              Generic),
    def("brcond",        0, 2, 2, INT,              CondBranch),
    def("brcond2_i32",   0, 4, 2, N,                CondBranch),
    def("setcond2_i32",  1, 4, 1, N,                Cond),
    def("ext_i32_i64",   1, 1, 0, N,                Generic),
    def("extu_i32_i64",  1, 1, 0, N,                Generic),
    def("extrl_i64_i32", 1, 1, 0, N,                Generic),
    def("extrh_i64_i32", 1, 1, 0, N,                Generic),
    def("qemu_ld",       1, 1, 1, INT,              MemAccess),
    def("qemu_st",       0, 2, 1, INT,              MemAccess),
];

impl Opcode {
    /// Look up the static definition for this opcode.
    pub fn def(self) -> &'static OpDef {
        &OPCODE_DEFS[self as usize]
    }

    /// Rendering family, from the definition table.
    pub fn family(self) -> OpFamily {
        self.def().family
    }

    /// Decode an opcode number as emitted by the translation engine.
    pub fn from_u8(v: u8) -> Option<Opcode> {
        if (v as usize) < Opcode::Count as usize {
            // SAFETY: Opcode is repr(u8), discriminants are dense from 0,
            // and v < Count.
            Some(unsafe { std::mem::transmute::<u8, Opcode>(v) })
        } else {
            None
        }
    }

    /// Whether this opcode is type-polymorphic (works on I32 or I64).
    pub fn is_int_polymorphic(self) -> bool {
        self.def().flags.contains(OpFlags::INT)
    }

    /// Whether argument counts are carried by the op itself.
    pub fn has_var_args(self) -> bool {
        self.def().flags.contains(OpFlags::VAR_ARGS)
    }
}
