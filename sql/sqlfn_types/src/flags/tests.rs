use super::*;
use crate::DataType;

#[test]
fn integral_types_are_numeric() {
    for t in [DataType::Byte, DataType::Short, DataType::Integer, DataType::Long] {
        let flags = t.flags();
        assert!(flags.is_numeric(), "{t} should be numeric");
        assert!(flags.contains(TypeFlags::IS_INTEGRAL), "{t} should be integral");
    }
}

#[test]
fn fractional_types_are_not_integral() {
    for t in [DataType::Float, DataType::Double, DataType::Numeric] {
        let flags = t.flags();
        assert!(flags.is_numeric());
        assert!(!flags.contains(TypeFlags::IS_INTEGRAL));
    }
}

#[test]
fn undefined_has_only_undefined_flag() {
    assert_eq!(DataType::Undefined.flags(), TypeFlags::IS_UNDEFINED);
    assert!(DataType::Undefined.flags().is_undefined());
}

#[test]
fn structured_types_do_not_render_to_text() {
    assert!(!DataType::Object.flags().contains(TypeFlags::TO_TEXT));
    assert!(!DataType::array(DataType::Text).flags().contains(TypeFlags::TO_TEXT));
    assert!(DataType::Ip.flags().contains(TypeFlags::TO_TEXT));
}
