mod common;

use std::collections::BTreeMap;

use common::*;
use enumutil::*;

#[test]
fn members_in_declaration_order() {
    assert_eq!(
        names::<Permissions>().collect::<Vec<_>>(),
        ["None", "Read", "Write", "Execute", "ReadWrite", "All"]
    );
    assert_eq!(
        values::<Signed>().map(Signed::bits).collect::<Vec<_>>(),
        [-1, 0, -1, i16::MAX]
    );
}

#[test]
fn names_and_descriptions() {
    assert_eq!(name_of(Signed::Alias), Some("Minus"));
    assert_eq!(name_of(Permissions::from_bits(6)), None);
    assert_eq!(description(Permissions::All), Some("Full access"));
    assert_eq!(description(Permissions::Execute), None);
    assert_eq!(description(Signed::Alias), None);
    assert_eq!(description(Signed::Max), Some("Largest value"));
    assert_eq!(description_by_name::<Signed>("Alias"), Some("Same as Minus"));
    assert_eq!(description_by_name::<Signed>("Minus"), None);
    assert_eq!(description_by_name::<Signed>("alias"), None);
}

enumeration! {
    /// Marker placed after the documentation.
    #[allow(dead_code)]
    #[flags]
    #[allow(clippy::all)]
    struct Documented: u8 {
        const A = 1;
        const B = 2;
    }
}

#[test]
fn kinds_and_flags_marker() {
    assert_eq!(underlying_kind::<U8Enum>(), UnderlyingKind::U8);
    assert_eq!(underlying_kind::<I64Enum>(), UnderlyingKind::I64);
    assert_eq!(underlying_kind::<Signed>(), UnderlyingKind::I16);
    assert!(has_flags_attribute::<Permissions>());
    assert!(has_flags_attribute::<Wide>());
    assert!(!has_flags_attribute::<Signed>());

    assert!(has_flags_attribute::<Documented>());
    assert_eq!(format(Documented::A | Documented::B), "A, B");
}

#[test]
fn formatting() {
    assert_eq!(format(Permissions::ReadWrite), "ReadWrite");
    assert_eq!(format(Permissions::from_bits(6)), "Write, Execute");
    assert_eq!(format(Permissions::from_bits(0x10)), "16");
    assert_eq!(format(Wide::Low | Wide::High), "Low, High");
    assert_eq!(format(Wide::from_bits(0)), "0");
    assert_eq!(format(U8Enum::from_bits(6)), "6");
    assert_eq!(format(Signed::from_bits(-7)), "-7");
    assert_eq!(format(Signed::Alias), "Minus");

    assert_eq!(Permissions::All.to_string(), "All");
    assert_eq!(format!("{:?}", Permissions::Read), "Permissions::Read");
    assert_eq!(format!("{:?}", U8Enum::from_bits(6)), "U8Enum(6)");
}

#[test]
fn dictionaries() {
    let by_name = name_value_map::<Signed>();
    assert_eq!(by_name.len(), 4);
    assert_eq!(by_name["Alias"], Signed::Minus);

    let by_value = value_name_map::<Signed>();
    assert_eq!(
        by_value,
        BTreeMap::from([
            (Signed::Minus, "Alias"),
            (Signed::Zero, "Zero"),
            (Signed::Max, "Max"),
        ])
    );

    let descriptions = value_description_map::<Permissions>();
    assert_eq!(
        descriptions,
        BTreeMap::from([
            (Permissions::None, "No access"),
            (Permissions::Read, "Read access"),
            (Permissions::Write, "Write access"),
            (Permissions::All, "Full access"),
        ])
    );
    assert_eq!(
        value_description_map::<Signed>(),
        BTreeMap::from([
            (Signed::Minus, "Same as Minus"),
            (Signed::Max, "Largest value"),
        ])
    );
}

#[test]
fn later_aliases_replace_earlier_members() {
    let entries = value_name_description_map::<Signed>();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[&Signed::Minus], ("Alias", Some("Same as Minus")));
    assert_eq!(entries[&Signed::Zero], ("Zero", None));
    assert_eq!(entries[&Signed::Max], ("Max", Some("Largest value")));

    let entries = value_name_description_map::<Permissions>();
    assert_eq!(entries[&Permissions::Execute], ("Execute", None));
    assert_eq!(entries[&Permissions::All], ("All", Some("Full access")));
    assert!(value_name_description_map::<Empty>().is_empty());
}
