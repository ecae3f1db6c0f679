#![cfg(test)]

use super::*;

#[test]
fn scalar_kinds_and_widths() {
    assert_eq!(Scalar::Boolean(true).kind(), TlvType::Boolean);
    assert_eq!(Scalar::Boolean(true).width(), 1);
    assert_eq!(Scalar::Sint8(-1).width(), 1);
    assert_eq!(Scalar::Uint16(0).width(), 2);
    assert_eq!(Scalar::Float32(0.0).width(), 4);
    assert_eq!(Scalar::Sint64(0).width(), 8);
    assert_eq!(Scalar::Float64(0.0).width(), 8);
}

#[test]
fn scalar_derived_wiretypes() {
    assert_eq!(Scalar::Uint8(0).wiretype().get(), 0);
    assert_eq!(Scalar::Sint16(0).wiretype().get(), 1);
    assert_eq!(Scalar::Float32(0.0).wiretype().get(), 2);
    assert_eq!(Scalar::Uint64(0).wiretype().get(), 3);
}

#[test]
fn scalar_packs_big_endian() {
    assert_eq!(Scalar::Boolean(true).to_be_bytes(), [0x01]);
    assert_eq!(Scalar::Boolean(false).to_be_bytes(), [0x00]);
    assert_eq!(Scalar::Uint16(0x1234).to_be_bytes(), [0x12, 0x34]);
    assert_eq!(Scalar::Sint16(-2).to_be_bytes(), [0xFF, 0xFE]);
    assert_eq!(
        Scalar::Uint64(0x0102_0304_0506_0708).to_be_bytes(),
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
    assert_eq!(Scalar::Float32(1.0).to_be_bytes(), [0x3F, 0x80, 0x00, 0x00]);
}

#[test]
fn from_integer_accepts_exact_ranges() {
    assert_eq!(
        Scalar::from_integer(TlvType::Uint8, 255),
        Ok(Scalar::Uint8(255))
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Sint8, -128),
        Ok(Scalar::Sint8(-128))
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Boolean, 1),
        Ok(Scalar::Boolean(true))
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Uint64, i128::from(u64::MAX)),
        Ok(Scalar::Uint64(u64::MAX))
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Float32, 2),
        Ok(Scalar::Float32(2.0))
    );
}

#[test]
fn from_integer_rejects_out_of_range_values() {
    assert_eq!(
        Scalar::from_integer(TlvType::Uint8, 256),
        Err(Error::ValueOutOfRange {
            kind: TlvType::Uint8,
            value: 256,
            min: 0,
            max: 255
        })
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Boolean, 2),
        Err(Error::ValueOutOfRange {
            kind: TlvType::Boolean,
            value: 2,
            min: 0,
            max: 1
        })
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Sint16, 40_000),
        Err(Error::ValueOutOfRange {
            kind: TlvType::Sint16,
            value: 40_000,
            min: -32_768,
            max: 32_767
        })
    );
    assert_eq!(
        Scalar::from_integer(TlvType::Uint32, -1),
        Err(Error::ValueOutOfRange {
            kind: TlvType::Uint32,
            value: -1,
            min: 0,
            max: i128::from(u32::MAX)
        })
    );
}

#[test]
fn from_integer_rejects_non_scalar_kinds() {
    assert_eq!(
        Scalar::from_integer(TlvType::Struct, 0),
        Err(Error::NotScalar(TlvType::Struct))
    );
    assert_eq!(
        Scalar::from_integer(TlvType::String, 0),
        Err(Error::NotScalar(TlvType::String))
    );
}

#[test]
fn from_f64_accepts_float_kinds() {
    assert_eq!(
        Scalar::from_f64(TlvType::Float64, 1.5),
        Ok(Scalar::Float64(1.5))
    );
    assert_eq!(
        Scalar::from_f64(TlvType::Float32, 1.5),
        Ok(Scalar::Float32(1.5))
    );
}

#[test]
fn from_f64_accepts_whole_numbers_on_integer_kinds() {
    assert_eq!(Scalar::from_f64(TlvType::Uint8, 3.0), Ok(Scalar::Uint8(3)));
    assert_eq!(
        Scalar::from_f64(TlvType::Sint32, -2.0),
        Ok(Scalar::Sint32(-2))
    );
}

#[test]
fn from_f64_rejects_fractions_on_integer_kinds() {
    assert_eq!(
        Scalar::from_f64(TlvType::Uint8, 3.5),
        Err(Error::TypeMismatch {
            expected: TlvType::Uint8,
            actual: TlvType::Float64
        })
    );
}

#[test]
fn from_bool_is_boolean_only() {
    assert_eq!(
        Scalar::from_bool(TlvType::Boolean, true),
        Ok(Scalar::Boolean(true))
    );
    assert_eq!(
        Scalar::from_bool(TlvType::Uint8, true),
        Err(Error::NotScalar(TlvType::Uint8))
    );
}

#[test]
fn node_serialization_with_tag() {
    let node = ScalarNode::uint16(7, Some(0)).unwrap();
    assert_eq!(node.length(), 2);
    assert_eq!(node.serialized_value(), Ok(vec![0x00, 0x07]));
    assert_eq!(node.serialization(), Ok(vec![0x10, 0x00, 0x00, 0x07]));
    assert_eq!(node.serialization_length(), 4);
    assert_eq!(node.lengthfield(), Ok(Vec::new()));
}

#[test]
fn node_serialization_without_tag() {
    let node = ScalarNode::uint32(0x0102_0304, None).unwrap();
    assert_eq!(node.serialization(), Ok(vec![0x01, 0x02, 0x03, 0x04]));
    assert_eq!(node.serialization_length(), 4);
}

#[test]
fn node_wiretype_override_changes_the_tag() {
    let mut node = ScalarNode::uint8(1, Some(3)).unwrap();
    assert_eq!(node.wiretype().get(), 0);
    assert_eq!(node.serialization(), Ok(vec![0x00, 0x03, 0x01]));
    node.set_wiretype(Some(7)).unwrap();
    assert_eq!(node.wiretype().get(), 7);
    assert_eq!(node.serialization(), Ok(vec![0x70, 0x03, 0x01]));
    node.set_wiretype(None).unwrap();
    assert_eq!(node.wiretype().get(), 0);
}

#[test]
fn node_set_value_keeps_the_kind() {
    let mut node = ScalarNode::uint8(1, None).unwrap();
    assert_eq!(node.set_value(Scalar::Uint8(2)), Ok(()));
    assert_eq!(node.value(), Scalar::Uint8(2));
    assert_eq!(
        node.set_value(Scalar::Sint8(2)),
        Err(Error::TypeMismatch {
            expected: TlvType::Uint8,
            actual: TlvType::Sint8
        })
    );
    assert_eq!(node.value(), Scalar::Uint8(2));
}

#[test]
fn node_length_override_does_not_change_the_value_bytes() {
    let mut node = ScalarNode::uint8(1, None).unwrap();
    assert_eq!(node.length(), 1);
    node.set_length(Some(4));
    assert_eq!(node.length(), 4);
    assert_eq!(node.serialized_value(), Ok(vec![0x01]));
    node.set_length(None);
    assert_eq!(node.length(), 1);
}

#[test]
fn node_rejects_invalid_attributes() {
    assert_eq!(
        ScalarNode::uint8(1, Some(0x1000)),
        Err(Error::InvalidDataId(0x1000))
    );
    let meta = Meta {
        wiretype: Some(16),
        ..Meta::default()
    };
    assert_eq!(
        ScalarNode::new(Scalar::Uint8(1), meta),
        Err(Error::InvalidWiretype(16))
    );
}

#[test]
fn node_data_id_can_be_cleared() {
    let mut node = ScalarNode::uint8(1, Some(5)).unwrap();
    assert_eq!(node.serialization_length(), 3);
    node.set_data_id(None).unwrap();
    assert_eq!(node.data_id(), None);
    assert_eq!(node.serialization(), Ok(vec![0x01]));
    assert_eq!(node.serialization_length(), 1);
}
