use crate::op::{Op, OpIdx};
use crate::temp::{Temp, TempIdx};
use crate::types::Type;

/// A translated instruction list, as handed over by the translation
/// engine.
///
/// Holds the temporaries referenced by the ops and the ops themselves.
/// Global temps always sit at the front of `temps`, so an index below
/// `nb_globals` identifies a global.
#[derive(Debug, Clone, Default)]
pub struct InsnList {
    temps: Vec<Temp>,
    ops: Vec<Op>,
    /// Number of global temps (always at the front of `temps`).
    nb_globals: u32,
    nb_labels: u32,
}

impl InsnList {
    pub fn new() -> Self {
        Self {
            temps: Vec::with_capacity(64),
            ops: Vec::with_capacity(256),
            nb_globals: 0,
            nb_labels: 0,
        }
    }

    /// Rebuild a list from parts produced elsewhere. Labels are counted
    /// from `nb_labels`; ops must be numbered by position.
    pub fn from_raw_parts(
        temps: Vec<Temp>,
        ops: Vec<Op>,
        nb_globals: u32,
        nb_labels: u32,
    ) -> Self {
        assert!(
            nb_globals as usize <= temps.len(),
            "{nb_globals} globals but only {} temps",
            temps.len()
        );
        for (i, op) in ops.iter().enumerate() {
            assert_eq!(op.idx.0 as usize, i, "op index out of order");
        }
        Self {
            temps,
            ops,
            nb_globals,
            nb_labels,
        }
    }

    // -- Temp allocation --

    pub fn nb_globals(&self) -> u32 {
        self.nb_globals
    }

    pub fn nb_temps(&self) -> u32 {
        self.temps.len() as u32
    }

    /// Allocate a scratch temporary.
    pub fn new_temp(&mut self, ty: Type) -> TempIdx {
        let idx = TempIdx(self.temps.len() as u32);
        self.temps.push(Temp::new_ebb(idx, ty));
        idx
    }

    /// Allocate a function-local temporary.
    pub fn new_temp_local(&mut self, ty: Type) -> TempIdx {
        let idx = TempIdx(self.temps.len() as u32);
        self.temps.push(Temp::new_tb(idx, ty));
        idx
    }

    /// Register a global temp (must be called before any
    /// non-global allocation).
    pub fn new_global(&mut self, ty: Type, name: &str) -> TempIdx {
        self.push_global(Temp::new_global(
            TempIdx(self.temps.len() as u32),
            ty,
            name,
        ))
    }

    /// Register a fixed-register global (must be called before any
    /// non-global allocation).
    pub fn new_fixed(&mut self, ty: Type, name: &str) -> TempIdx {
        self.push_global(Temp::new_fixed(
            TempIdx(self.temps.len() as u32),
            ty,
            name,
        ))
    }

    fn push_global(&mut self, temp: Temp) -> TempIdx {
        assert_eq!(
            self.temps.len() as u32,
            self.nb_globals,
            "globals must be registered before locals"
        );
        let idx = temp.idx;
        self.temps.push(temp);
        self.nb_globals += 1;
        idx
    }

    pub fn temp(&self, idx: TempIdx) -> &Temp {
        &self.temps[idx.0 as usize]
    }

    pub fn temps(&self) -> &[Temp] {
        &self.temps
    }

    /// Iterate over global temps only.
    pub fn globals(&self) -> &[Temp] {
        &self.temps[..self.nb_globals as usize]
    }

    // -- Op emission --

    pub fn emit_op(&mut self, op: Op) -> OpIdx {
        assert_eq!(op.idx, self.next_op_idx(), "op emitted out of order");
        let idx = op.idx;
        self.ops.push(op);
        idx
    }

    pub fn next_op_idx(&self) -> OpIdx {
        OpIdx(self.ops.len() as u32)
    }

    pub fn op(&self, idx: OpIdx) -> &Op {
        &self.ops[idx.0 as usize]
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    // -- Labels --

    pub fn new_label(&mut self) -> u32 {
        let id = self.nb_labels;
        self.nb_labels += 1;
        id
    }

    pub fn nb_labels(&self) -> u32 {
        self.nb_labels
    }
}
