pub mod config;
pub mod disas;
pub mod dump;
pub mod error;
pub mod helper;
pub mod ir_builder;
pub mod list;
pub mod memop;
pub mod op;
pub mod opcode;
pub mod temp;
pub mod types;

pub use config::{DumpConfig, DISAS_MAX_BYTES};
pub use disas::{Disassembler, NoDisas};
pub use dump::{dump_ops, dump_ops_with, dump_to_string, render_op, temp_name};
pub use error::{ConfigError, DumpError};
pub use helper::{HelperInfo, HelperLookup, HelperTable, UNKNOWN_HELPER};
pub use list::InsnList;
pub use memop::{AccessKind, MemAccessArg, MemOp};
pub use op::{Op, OpIdx, CALL_DUMMY_ARG, MAX_OP_ARGS};
pub use opcode::{OpDef, OpFamily, OpFlags, Opcode, OPCODE_DEFS};
pub use temp::{Temp, TempIdx, TempKind};
pub use types::{Cond, Type};
