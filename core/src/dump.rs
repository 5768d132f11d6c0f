//! IR dump: canonical text output for PTC instruction lists.
//!
//! Each op becomes one `<index>: <mnemonic> <fields>` line, fields joined
//! with `,` in argument order: outputs, inputs, then constants. Guest
//! instruction boundaries (`insn_start`) print as `<index>: ---- 0x<pc>`
//! followed by the disassembly of the guest instruction at `pc`.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

use log::{debug, trace};

use crate::config::DumpConfig;
use crate::disas::{Disassembler, NoDisas};
use crate::error::DumpError;
use crate::helper::{HelperLookup, UNKNOWN_HELPER};
use crate::list::InsnList;
use crate::memop::MemAccessArg;
use crate::op::{Op, CALL_DUMMY_ARG};
use crate::opcode::OpFamily;
use crate::temp::TempIdx;
use crate::types::Cond;

/// Display name of the temp referenced by an op argument.
///
/// Globals print their intrinsic name; locals print `loc<n>` and scratch
/// temps `tmp<n>`, numbered from the first non-global temp.
pub fn temp_name(list: &InsnList, arg: u64) -> Cow<'_, str> {
    assert!(
        arg < list.nb_temps() as u64,
        "temp {arg} out of range ({} temps)",
        list.nb_temps()
    );
    let t = list.temp(TempIdx(arg as u32));
    let nb_globals = list.nb_globals() as u64;
    if arg < nb_globals {
        match t.name.as_deref() {
            Some(name) => Cow::Borrowed(name),
            None => panic!("global temp {arg} has no name"),
        }
    } else if t.is_local() {
        Cow::Owned(format!("loc{}", arg - nb_globals))
    } else {
        Cow::Owned(format!("tmp{}", arg - nb_globals))
    }
}

/// Cursor over an op's constant arguments.
///
/// Family-specific constants are taken from the front; whatever is left
/// prints as plain immediates.
#[derive(Debug, Clone)]
pub struct ConstCursor<'a> {
    cargs: &'a [u64],
    pos: usize,
}

impl<'a> ConstCursor<'a> {
    pub fn new(cargs: &'a [u64]) -> Self {
        Self { cargs, pos: 0 }
    }

    /// Take the next unconsumed constant.
    pub fn consume(&mut self) -> Option<u64> {
        let c = self.cargs.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u64] {
        &self.cargs[self.pos..]
    }
}

/// Guest PC carried by an `insn_start` op.
pub fn insn_start_pc(op: &Op, split_pc: bool) -> Option<u64> {
    let cargs = op.cargs();
    let lo = *cargs.first()?;
    match cargs.get(1) {
        Some(&hi) if split_pc => Some((lo & 0xffff_ffff) | (hi << 32)),
        _ => Some(lo),
    }
}

fn boundary_line(pc: u64) -> String {
    format!("---- 0x{pc:x}")
}

fn cond_field(raw: u64) -> Cow<'static, str> {
    match Cond::from_raw(raw) {
        Some(c) => Cow::Borrowed(c.name()),
        None => Cow::Owned(format!("$0x{raw:x}")),
    }
}

fn missing_const(op: &Op) -> DumpError {
    DumpError::MissingConstArg {
        index: op.idx.0 as usize,
        opcode: op.opc.def().name,
    }
}

fn render_call(
    list: &InsnList,
    helpers: &(impl HelperLookup + ?Sized),
    op: &Op,
) -> Result<String, DumpError> {
    let mut cargs = ConstCursor::new(op.cargs());
    let func = cargs.consume().ok_or_else(|| missing_const(op))?;
    let flags = cargs.consume().ok_or_else(|| missing_const(op))?;
    let name = helpers.helper_name(func);
    if name == UNKNOWN_HELPER {
        match helpers.find_helper(func) {
            None => debug!("op {}: no helper registered at {func:#x}", op.idx.0),
            Some(_) => debug!("op {}: helper at {func:#x} has no name", op.idx.0),
        }
    }

    // call <name>,$0x<flags>,<nb_oargs>,<oargs...>,<iargs...>
    let mut line = format!("{} {name},$0x{flags:x},{}", op.mnemonic(), op.nb_oargs());
    for &a in op.oargs() {
        line.push(',');
        line.push_str(&temp_name(list, a));
    }
    for &a in op.iargs() {
        line.push(',');
        if a == CALL_DUMMY_ARG {
            line.push_str("<dummy>");
        } else {
            line.push_str(&temp_name(list, a));
        }
    }
    Ok(line)
}

/// Render one op, without the index prefix.
pub fn render_op(
    list: &InsnList,
    helpers: &(impl HelperLookup + ?Sized),
    config: &DumpConfig,
    op: &Op,
) -> Result<String, DumpError> {
    let family = op.opc.family();
    match family {
        OpFamily::Marker => {
            let pc = insn_start_pc(op, config.split_pc).ok_or_else(|| missing_const(op))?;
            return Ok(boundary_line(pc));
        }
        OpFamily::Call => return render_call(list, helpers, op),
        _ => {}
    }

    let mut fields: Vec<Cow<'_, str>> = op
        .oargs()
        .iter()
        .chain(op.iargs())
        .map(|&a| temp_name(list, a))
        .collect();

    let mut cargs = ConstCursor::new(op.cargs());
    match family {
        OpFamily::Cond | OpFamily::CondBranch => {
            let c = cargs.consume().ok_or_else(|| missing_const(op))?;
            fields.push(cond_field(c));
        }
        OpFamily::MemAccess => {
            let raw = cargs.consume().ok_or_else(|| missing_const(op))?;
            let access = MemAccessArg::decode(raw);
            let index = op.idx.0 as usize;
            let Some(prefix) = access.kind.prefix() else {
                return Err(DumpError::UnknownAccessKind { index, raw });
            };
            let Some(name) = access.op.name() else {
                return Err(DumpError::UnknownMemOpName {
                    index,
                    memop: access.op.bits(),
                });
            };
            fields.push(Cow::Owned(format!("{prefix}{name}")));
            fields.push(Cow::Owned(access.mmu_idx.to_string()));
        }
        _ => {}
    }
    if matches!(family, OpFamily::Label | OpFamily::CondBranch) {
        let label = cargs.consume().ok_or_else(|| missing_const(op))?;
        fields.push(Cow::Owned(format!("$L{label}")));
    }
    fields.extend(
        cargs
            .remaining()
            .iter()
            .map(|c| Cow::Owned(format!("$0x{c:x}"))),
    );

    let mut line = op.mnemonic();
    if !fields.is_empty() {
        line.push(' ');
        line.push_str(&fields.join(","));
    }
    Ok(line)
}

/// Dump all ops in `list` to the given writer, without guest disassembly.
pub fn dump_ops(
    list: &InsnList,
    helpers: &(impl HelperLookup + ?Sized),
    w: &mut impl Write,
) -> Result<(), DumpError> {
    dump_ops_with(list, helpers, &NoDisas, &DumpConfig::default(), w)
}

/// Dump all ops, disassembling the guest instruction at each
/// `insn_start` boundary.
///
/// The dump is rendered in full before anything reaches `w`: on error
/// the writer is left untouched.
pub fn dump_ops_with(
    list: &InsnList,
    helpers: &(impl HelperLookup + ?Sized),
    disas: &(impl Disassembler + ?Sized),
    config: &DumpConfig,
    w: &mut impl Write,
) -> Result<(), DumpError> {
    let text = dump_to_string(list, helpers, disas, config)?;
    w.write_all(text.as_bytes())?;
    Ok(())
}

/// Dump all ops into a `String`.
pub fn dump_to_string(
    list: &InsnList,
    helpers: &(impl HelperLookup + ?Sized),
    disas: &(impl Disassembler + ?Sized),
    config: &DumpConfig,
) -> Result<String, DumpError> {
    let mut buf = String::with_capacity(list.num_ops() * 32);
    let mut nb_insns = 0usize;
    for (index, op) in list.ops().iter().enumerate() {
        if op.opc.family() == OpFamily::Marker {
            let pc = insn_start_pc(op, config.split_pc).ok_or_else(|| missing_const(op))?;
            // writes to a String cannot fail
            let _ = writeln!(buf, "{index}: {}", boundary_line(pc));
            trace!("guest insn at {pc:#x}");
            let text = disas.disassemble(pc, config.disas_max_bytes, config.disas_insn_count);
            buf.push_str(&text);
            if !text.is_empty() && !text.ends_with('\n') {
                buf.push('\n');
            }
            nb_insns += 1;
        } else {
            let line = render_op(list, helpers, config, op)?;
            let _ = writeln!(buf, "{index}: {line}");
        }
    }
    debug!(
        "dumped {} ops covering {nb_insns} guest instructions",
        list.num_ops()
    );
    Ok(buf)
}
