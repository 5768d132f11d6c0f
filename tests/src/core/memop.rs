use ptc_core::memop::*;

#[test]
fn memop_names() {
    assert_eq!(MemOp::ub().name(), Some("ub"));
    assert_eq!(MemOp::sb().name(), Some("sb"));
    assert_eq!(MemOp::uw().name(), Some("leuw"));
    assert_eq!(MemOp::sw().name(), Some("lesw"));
    assert_eq!(MemOp::ul().name(), Some("leul"));
    assert_eq!(MemOp::sl().name(), Some("lesl"));
    assert_eq!(MemOp::uq().name(), Some("leq"));
    assert_eq!(MemOp::uw().bswap().name(), Some("beuw"));
    assert_eq!(MemOp::sw().bswap().name(), Some("besw"));
    assert_eq!(MemOp::ul().bswap().name(), Some("beul"));
    assert_eq!(MemOp::sl().bswap().name(), Some("besl"));
    assert_eq!(MemOp::uq().bswap().name(), Some("beq"));
}

#[test]
fn memop_unnamed_combinations() {
    assert_eq!(MemOp::new(MemOp::SIZE_64 | MemOp::SIGN).name(), None);
    assert_eq!(MemOp::ub().bswap().name(), None);
    assert_eq!(MemOp::sb().bswap().name(), None);
}

#[test]
fn memop_name_ignores_alignment() {
    assert_eq!(MemOp::new(MemOp::SIZE_32 | MemOp::ALIGN).name(), Some("leul"));
}

#[test]
fn memop_fields() {
    let op = MemOp::sl().bswap();
    assert_eq!(op.size(), MemOp::SIZE_32);
    assert_eq!(op.size_bytes(), 4);
    assert!(op.is_signed());
    assert!(op.is_bswap());
    assert_eq!(MemOp::uq().size_bytes(), 8);
}

#[test]
fn pack_layout() {
    let arg = MemAccessArg::new(AccessKind::Normal, MemOp::ul(), 1);
    assert_eq!(arg.pack(), (0x2 << 4) | 1);
    assert_eq!(arg.raw, arg.pack());

    let arg = MemAccessArg::new(AccessKind::Unaligned, MemOp::uq().bswap(), 3);
    assert_eq!(arg.pack(), ((0x3 | 0x8 | 0x10) << 4) | 3);

    let arg = MemAccessArg::new(AccessKind::Aligned, MemOp::ub(), 15);
    assert_eq!(arg.pack(), (0x20 << 4) | 15);
}

#[test]
fn decode_kinds() {
    assert_eq!(MemAccessArg::decode(0x21).kind, AccessKind::Normal);
    assert_eq!(MemAccessArg::decode(0x121).kind, AccessKind::Unaligned);
    assert_eq!(MemAccessArg::decode(0x221).kind, AccessKind::Aligned);
    // alignment field 3 is reserved
    assert_eq!(MemAccessArg::decode(0x321).kind, AccessKind::Unknown);
    // bits above the alignment field
    assert_eq!(MemAccessArg::decode(0x421).kind, AccessKind::Unknown);
    assert_eq!(MemAccessArg::decode(u64::MAX).kind, AccessKind::Unknown);
}

#[test]
fn decode_fields() {
    let arg = MemAccessArg::decode(0x1e7);
    assert_eq!(arg.kind, AccessKind::Unaligned);
    assert_eq!(arg.op, MemOp::sl().bswap());
    assert_eq!(arg.mmu_idx, 7);
    assert_eq!(arg.raw_memop(), 0x1e);
}

#[test]
fn unknown_packs_back_to_raw() {
    let raw = 0xffff_0000_0000_0123;
    assert_eq!(MemAccessArg::decode(raw).pack(), raw);
}

#[test]
fn prefixes() {
    assert_eq!(AccessKind::Normal.prefix(), Some(""));
    assert_eq!(AccessKind::Unaligned.prefix(), Some("un+"));
    assert_eq!(AccessKind::Aligned.prefix(), Some("al+"));
    assert_eq!(AccessKind::Unknown.prefix(), None);
}

#[test]
#[should_panic(expected = "unknown access kind")]
fn new_rejects_unknown_kind() {
    MemAccessArg::new(AccessKind::Unknown, MemOp::ub(), 0);
}

#[test]
#[should_panic(expected = "does not fit")]
fn new_rejects_wide_mmu_idx() {
    MemAccessArg::new(AccessKind::Normal, MemOp::ub(), 16);
}
