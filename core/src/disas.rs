/// Guest machine-code disassembly service.
///
/// The dump calls it once per guest instruction boundary, in order, and
/// appends the returned text verbatim. Implementations terminate each
/// line they produce with `'\n'`.
pub trait Disassembler {
    /// Disassemble up to `count` instructions from at most `max_bytes`
    /// bytes of guest code at `pc`.
    fn disassemble(&self, pc: u64, max_bytes: usize, count: usize) -> String;
}

impl<F> Disassembler for F
where
    F: Fn(u64, usize, usize) -> String,
{
    fn disassemble(&self, pc: u64, max_bytes: usize, count: usize) -> String {
        self(pc, max_bytes, count)
    }
}

/// Disassembler that produces no text, for dumps without guest code.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisas;

impl Disassembler for NoDisas {
    fn disassemble(&self, _pc: u64, _max_bytes: usize, _count: usize) -> String {
        String::new()
    }
}
