use ptc_core::helper::*;

#[test]
fn lookup_by_address() {
    let mut table = HelperTable::new();
    table.insert(0x4000, "helper_raise_exception");
    assert_eq!(table.len(), 1);
    assert_eq!(table.helper_name(0x4000), "helper_raise_exception");
    assert!(table.find_helper(0x4000).is_some());
}

#[test]
fn unknown_address_falls_back() {
    let table = HelperTable::new();
    assert!(table.is_empty());
    assert!(table.find_helper(0x1234).is_none());
    assert_eq!(table.helper_name(0x1234), UNKNOWN_HELPER);
}

#[test]
fn unnamed_entries_fall_back() {
    let mut table = HelperTable::new();
    table.register(HelperInfo {
        func: 0x10,
        name: None,
    });
    table.insert(0x20, "");
    assert_eq!(table.helper_name(0x10), "unknown_helper");
    assert_eq!(table.helper_name(0x20), "unknown_helper");
}

#[test]
fn register_replaces() {
    let mut table: HelperTable = [(0x10, "old")].into_iter().collect();
    table.insert(0x10, "new");
    assert_eq!(table.len(), 1);
    assert_eq!(table.helper_name(0x10), "new");
}

#[test]
fn load_from_toml() {
    let table = HelperTable::from_toml_str(
        r#"
        [[helper]]
        address = 0x1000
        name = "helper_cpuid"

        [[helper]]
        address = 4096000
        "#,
    )
    .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.helper_name(0x1000), "helper_cpuid");
    assert_eq!(table.helper_name(4096000), UNKNOWN_HELPER);
}

#[test]
fn load_upper_half_addresses() {
    let table = HelperTable::from_toml_str(
        r#"
        [[helper]]
        address = "0xffffffff81000000"
        name = "helper_kernel_entry"

        [[helper]]
        address = "18446744073709551615"
        name = "helper_top"

        [[helper]]
        address = "0x4000_0000"
        name = "helper_mid"
        "#,
    )
    .unwrap();
    assert_eq!(table.helper_name(0xffff_ffff_8100_0000), "helper_kernel_entry");
    assert_eq!(table.helper_name(u64::MAX), "helper_top");
    assert_eq!(table.helper_name(0x4000_0000), "helper_mid");
}

#[test]
fn load_rejects_bad_addresses() {
    assert!(HelperTable::from_toml_str("[[helper]]\naddress = -1\n").is_err());
    assert!(HelperTable::from_toml_str("[[helper]]\naddress = \"0xzz\"\n").is_err());
    assert!(HelperTable::from_toml_str("[[helper]]\naddress = \"0x1_0000_0000_0000_0000\"\n").is_err());
}

#[test]
fn parse_address_forms() {
    assert_eq!(parse_address("0x10"), Some(16));
    assert_eq!(parse_address("0X10"), Some(16));
    assert_eq!(parse_address(" 42 "), Some(42));
    assert_eq!(parse_address("0x"), None);
    assert_eq!(parse_address(""), None);
}

#[test]
fn load_from_empty_toml() {
    let table = HelperTable::from_toml_str("").unwrap();
    assert!(table.is_empty());
}

#[test]
fn load_rejects_bad_toml() {
    assert!(HelperTable::from_toml_str("[[helper]]\nname = \"x\"\n").is_err());
}

struct Fixed(HelperInfo);

impl HelperLookup for Fixed {
    fn find_helper(&self, func: u64) -> Option<&HelperInfo> {
        (func == self.0.func).then_some(&self.0)
    }
}

#[test]
fn custom_lookup_gets_default_name() {
    let lookup = Fixed(HelperInfo {
        func: 7,
        name: Some("helper_seven".into()),
    });
    assert_eq!(lookup.helper_name(7), "helper_seven");
    assert_eq!(lookup.helper_name(8), UNKNOWN_HELPER);
}
