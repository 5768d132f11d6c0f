use crate::opcode::Opcode;
use crate::temp::TempIdx;
use crate::types::Type;

/// Maximum number of arguments per IR operation.
pub const MAX_OP_ARGS: usize = 16;

/// Call input slot that carries no value (padding for helper ABIs that
/// pass 64-bit values in aligned register pairs).
pub const CALL_DUMMY_ARG: u64 = u64::MAX;

/// Index into the list's op sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpIdx(pub u32);

/// A single PTC IR operation.
///
/// Arguments are laid out as outputs, then inputs, then constants. Temp
/// arguments hold a `TempIdx`; constants are raw 64-bit values (labels,
/// immediates, condition codes, packed memory-access descriptors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub idx: OpIdx,
    pub opc: Opcode,
    /// Operand type for type-polymorphic ops (I32 or I64).
    pub op_type: Type,
    /// Call only: number of input arguments (CALLI).
    pub param1: u8,
    /// Call only: number of output arguments (CALLO).
    pub param2: u8,
    pub args: [u64; MAX_OP_ARGS],
    pub nargs: u8,
}

impl Op {
    pub fn new(idx: OpIdx, opc: Opcode, op_type: Type) -> Self {
        Self {
            idx,
            opc,
            op_type,
            param1: 0,
            param2: 0,
            args: [0; MAX_OP_ARGS],
            nargs: 0,
        }
    }

    /// Build an op from its flat argument list.
    ///
    /// Fixed-arity opcodes must receive exactly the number of arguments
    /// their definition declares; `insn_start` takes one or two words.
    pub fn with_args(idx: OpIdx, opc: Opcode, op_type: Type, args: &[u64]) -> Self {
        let def = opc.def();
        assert!(
            args.len() <= MAX_OP_ARGS,
            "{} has {} args, max {MAX_OP_ARGS}",
            def.name,
            args.len()
        );
        if opc.has_var_args() {
            assert!(
                args.len() <= def.nb_args() as usize,
                "{} takes at most {} args",
                def.name,
                def.nb_args()
            );
        } else {
            assert_eq!(
                args.len(),
                def.nb_args() as usize,
                "{} arg count",
                def.name
            );
        }
        let mut op = Self::new(idx, opc, op_type);
        op.args[..args.len()].copy_from_slice(args);
        op.nargs = args.len() as u8;
        op
    }

    /// Build a helper call. `None` inputs are dummy slots.
    pub fn new_call(
        idx: OpIdx,
        op_type: Type,
        oargs: &[TempIdx],
        iargs: &[Option<TempIdx>],
        func: u64,
        flags: u64,
    ) -> Self {
        let n = oargs.len() + iargs.len() + 2;
        assert!(n <= MAX_OP_ARGS, "call has {n} args, max {MAX_OP_ARGS}");
        let mut op = Self::new(idx, Opcode::Call, op_type);
        let args = oargs
            .iter()
            .map(|t| t.arg())
            .chain(iargs.iter().map(|t| t.map_or(CALL_DUMMY_ARG, TempIdx::arg)))
            .chain([func, flags]);
        for (slot, a) in op.args.iter_mut().zip(args) {
            *slot = a;
        }
        op.param1 = iargs.len() as u8;
        op.param2 = oargs.len() as u8;
        op.nargs = n as u8;
        op
    }

    pub fn nb_oargs(&self) -> usize {
        match self.opc {
            Opcode::Call => self.param2 as usize,
            opc => opc.def().nb_oargs as usize,
        }
    }

    pub fn nb_iargs(&self) -> usize {
        match self.opc {
            Opcode::Call => self.param1 as usize,
            opc => opc.def().nb_iargs as usize,
        }
    }

    /// Get the output arguments slice.
    pub fn oargs(&self) -> &[u64] {
        &self.args[..self.nb_oargs()]
    }

    /// Get the input arguments slice.
    pub fn iargs(&self) -> &[u64] {
        let start = self.nb_oargs();
        &self.args[start..start + self.nb_iargs()]
    }

    /// Get the constant arguments slice (everything after the inputs).
    pub fn cargs(&self) -> &[u64] {
        let start = self.nb_oargs() + self.nb_iargs();
        &self.args[start..self.nargs as usize]
    }

    /// Opcode name with the type suffix for polymorphic ops.
    pub fn mnemonic(&self) -> String {
        let name = self.opc.def().name;
        if self.opc.is_int_polymorphic() {
            format!("{name}{}", self.op_type.suffix())
        } else {
            name.to_string()
        }
    }
}
