use crate::list::InsnList;
use crate::memop::MemAccessArg;
use crate::op::Op;
use crate::opcode::Opcode;
use crate::temp::TempIdx;
use crate::types::{Cond, Type};

impl InsnList {
    // -- Internal helpers --

    fn emit(&mut self, opc: Opcode, ty: Type, args: &[u64]) {
        let idx = self.next_op_idx();
        self.emit_op(Op::with_args(idx, opc, ty, args));
    }

    fn emit_binary(
        &mut self,
        opc: Opcode,
        ty: Type,
        dst: TempIdx,
        a: TempIdx,
        b: TempIdx,
    ) -> TempIdx {
        self.emit(opc, ty, &[dst.arg(), a.arg(), b.arg()]);
        dst
    }

    fn emit_unary(&mut self, opc: Opcode, ty: Type, dst: TempIdx, src: TempIdx) -> TempIdx {
        self.emit(opc, ty, &[dst.arg(), src.arg()]);
        dst
    }

    // -- Data movement --

    pub fn gen_mov(&mut self, ty: Type, d: TempIdx, s: TempIdx) -> TempIdx {
        self.emit_unary(Opcode::Mov, ty, d, s)
    }

    /// MovI: 1 oarg, 0 iargs, 1 carg (immediate)
    pub fn gen_movi(&mut self, ty: Type, d: TempIdx, val: u64) -> TempIdx {
        self.emit(Opcode::MovI, ty, &[d.arg(), val]);
        d
    }

    /// SetCond: 1 oarg, 2 iargs, 1 carg (cond)
    pub fn gen_setcond(
        &mut self,
        ty: Type,
        d: TempIdx,
        a: TempIdx,
        b: TempIdx,
        cond: Cond,
    ) -> TempIdx {
        self.emit(
            Opcode::SetCond,
            ty,
            &[d.arg(), a.arg(), b.arg(), cond as u64],
        );
        d
    }

    /// MovCond: d = (c1 cond c2) ? v1 : v2
    #[allow(clippy::too_many_arguments)]
    pub fn gen_movcond(
        &mut self,
        ty: Type,
        d: TempIdx,
        c1: TempIdx,
        c2: TempIdx,
        v1: TempIdx,
        v2: TempIdx,
        cond: Cond,
    ) -> TempIdx {
        self.emit(
            Opcode::MovCond,
            ty,
            &[d.arg(), c1.arg(), c2.arg(), v1.arg(), v2.arg(), cond as u64],
        );
        d
    }

    // -- Binary ALU (1 oarg, 2 iargs) --

    pub fn gen_add(&mut self, ty: Type, d: TempIdx, a: TempIdx, b: TempIdx) -> TempIdx {
        self.emit_binary(Opcode::Add, ty, d, a, b)
    }

    // -- Bit field --

    /// Extract: 1 oarg, 1 iarg, 2 cargs (ofs, len)
    pub fn gen_extract(
        &mut self,
        ty: Type,
        d: TempIdx,
        src: TempIdx,
        ofs: u32,
        len: u32,
    ) -> TempIdx {
        self.emit(
            Opcode::Extract,
            ty,
            &[d.arg(), src.arg(), ofs as u64, len as u64],
        );
        d
    }

    // -- Width conversion --

    pub fn gen_ext_i32_i64(&mut self, d: TempIdx, s: TempIdx) -> TempIdx {
        self.emit_unary(Opcode::ExtI32I64, Type::I64, d, s)
    }

    // -- Host memory (CPU state) --

    /// Ld: 1 oarg (dst), 1 iarg (base), 1 carg (offset)
    pub fn gen_ld(&mut self, ty: Type, dst: TempIdx, base: TempIdx, offset: i64) -> TempIdx {
        self.emit(Opcode::Ld, ty, &[dst.arg(), base.arg(), offset as u64]);
        dst
    }

    /// St: 0 oargs, 2 iargs (src, base), 1 carg (offset)
    pub fn gen_st(&mut self, ty: Type, src: TempIdx, base: TempIdx, offset: i64) {
        self.emit(Opcode::St, ty, &[src.arg(), base.arg(), offset as u64]);
    }

    // -- Control flow --

    /// Unconditional branch to label.
    /// Br: 0 oargs, 0 iargs, 1 carg (label_id)
    pub fn gen_br(&mut self, label_id: u32) {
        self.emit(Opcode::Br, Type::I64, &[label_id as u64]);
    }

    /// Conditional branch.
    /// BrCond: 0 oargs, 2 iargs, 2 cargs (cond, label_id)
    pub fn gen_brcond(&mut self, ty: Type, a: TempIdx, b: TempIdx, cond: Cond, label_id: u32) {
        self.emit(
            Opcode::BrCond,
            ty,
            &[a.arg(), b.arg(), cond as u64, label_id as u64],
        );
    }

    /// 64-bit conditional branch on register pairs (32-bit host).
    /// BrCond2I32: 0 oargs, 4 iargs (al, ah, bl, bh), 2 cargs (cond, label_id)
    pub fn gen_brcond2_i32(
        &mut self,
        al: TempIdx,
        ah: TempIdx,
        bl: TempIdx,
        bh: TempIdx,
        cond: Cond,
        label_id: u32,
    ) {
        self.emit(
            Opcode::BrCond2I32,
            Type::I32,
            &[
                al.arg(),
                ah.arg(),
                bl.arg(),
                bh.arg(),
                cond as u64,
                label_id as u64,
            ],
        );
    }

    /// Define label position.
    /// SetLabel: 0 oargs, 0 iargs, 1 carg (label_id)
    pub fn gen_set_label(&mut self, label_id: u32) {
        self.emit(Opcode::SetLabel, Type::I64, &[label_id as u64]);
    }

    /// GotoTb: 0 oargs, 0 iargs, 1 carg (slot)
    pub fn gen_goto_tb(&mut self, slot: u32) {
        self.emit(Opcode::GotoTb, Type::I64, &[slot as u64]);
    }

    /// ExitTb: 0 oargs, 0 iargs, 1 carg (val)
    pub fn gen_exit_tb(&mut self, val: u64) {
        self.emit(Opcode::ExitTb, Type::I64, &[val]);
    }

    // -- Boundary --

    /// InsnStart with the PC in a single word.
    pub fn gen_insn_start(&mut self, pc: u64) {
        self.emit(Opcode::InsnStart, Type::I64, &[pc]);
    }

    /// InsnStart with the PC split into two 32-bit words (pc_lo, pc_hi).
    pub fn gen_insn_start_split(&mut self, pc: u64) {
        self.emit(
            Opcode::InsnStart,
            Type::I64,
            &[pc & 0xffff_ffff, pc >> 32],
        );
    }

    // -- Call --

    /// Call helper at `func`. `None` inputs are dummy slots.
    pub fn gen_call(
        &mut self,
        func: u64,
        flags: u64,
        outs: &[TempIdx],
        ins: &[Option<TempIdx>],
    ) {
        let idx = self.next_op_idx();
        self.emit_op(Op::new_call(idx, Type::I64, outs, ins, func, flags));
    }

    // -- Guest memory access --

    pub fn gen_qemu_ld(
        &mut self,
        ty: Type,
        dst: TempIdx,
        addr: TempIdx,
        access: MemAccessArg,
    ) -> TempIdx {
        self.emit(Opcode::QemuLd, ty, &[dst.arg(), addr.arg(), access.pack()]);
        dst
    }

    pub fn gen_qemu_st(&mut self, ty: Type, val: TempIdx, addr: TempIdx, access: MemAccessArg) {
        self.emit(Opcode::QemuSt, ty, &[val.arg(), addr.arg(), access.pack()]);
    }
}
