#![cfg(test)]

use super::*;
use crate::node::{ScalarNode, StringFlags, StringNode};

fn uint8_member(value: u8, data_id: u16) -> Node {
    ScalarNode::uint8(value, Some(data_id)).unwrap().into()
}

#[test]
fn struct_serialization() {
    let members = vec![
        uint8_member(1, 1),
        ScalarNode::uint16(0x0203, Some(2)).unwrap().into(),
    ];
    let node = StructNode::new(members, Meta::tagged(5, 6)).unwrap();
    assert_eq!(node.length(), 7);
    assert_eq!(node.lengthfield(), Ok(vec![0x00, 0x07]));
    assert_eq!(
        node.serialization(),
        Ok(vec![
            0x60, 0x05, 0x00, 0x07, // struct tag and length field
            0x00, 0x01, 0x01, // uint8 member
            0x10, 0x02, 0x02, 0x03, // uint16 member
        ])
    );
    assert_eq!(node.serialization_length(), 11);
}

#[test]
fn members_may_be_heterogeneous() {
    let flags = StringFlags {
        terminate: false,
        bom: false,
        padding: false,
    };
    let members = vec![
        uint8_member(1, 1),
        StringNode::new("AB", flags, Meta::tagged(2, 6))
            .unwrap()
            .into(),
    ];
    let node = StructNode::new(members, Meta::tagged(5, 6)).unwrap();
    // Three bytes for the scalar, six for the string with its tag and length field.
    assert_eq!(node.length(), 9);
}

#[test]
fn nested_structs_keep_their_framing() {
    let inner = StructNode::new(vec![uint8_member(4, 4)], Meta::tagged(3, 5)).unwrap();
    let outer = StructNode::new(vec![inner.into()], Meta::tagged(5, 6)).unwrap();
    assert_eq!(outer.length(), 6);
    assert_eq!(
        outer.serialization(),
        Ok(vec![
            0x60, 0x05, 0x00, 0x06, // outer tag and length field
            0x50, 0x03, 0x03, // inner tag and length field
            0x00, 0x04, 0x04, // inner member
        ])
    );
}

#[test]
fn wiretype_is_mandatory() {
    assert_eq!(
        StructNode::new(Vec::new(), Meta::with_data_id(1)),
        Err(Error::MissingWiretype(TlvType::Struct))
    );
}

#[test]
fn untagged_struct_with_no_length_field() {
    let meta = Meta {
        wiretype: Some(4),
        lengthfield_len: Some(0),
        ..Meta::default()
    };
    let node = StructNode::new(vec![uint8_member(1, 1)], meta).unwrap();
    assert_eq!(node.lengthfield(), Ok(Vec::new()));
    assert_eq!(node.serialization(), Ok(vec![0x00, 0x01, 0x01]));
    assert_eq!(node.serialization_length(), 3);
}

#[test]
fn mutators_edit_the_member_list() {
    let mut node = StructNode::new(vec![uint8_member(1, 1)], Meta::tagged(5, 6)).unwrap();
    node.append(uint8_member(3, 3));
    node.insert(1, uint8_member(2, 2));
    node.insert(10, uint8_member(4, 4));
    let ids: Vec<u16> = node
        .items()
        .iter()
        .filter_map(|item| item.data_id().map(DataId::get))
        .collect();
    assert_eq!(ids, [1, 2, 3, 4]);
    node.clear();
    assert_eq!(node.items().len(), 0);
    assert_eq!(node.length(), 0);
}

#[test]
fn length_override_drives_the_length_field() {
    let mut node = StructNode::new(vec![uint8_member(1, 1)], Meta::tagged(5, 6)).unwrap();
    node.set_length(Some(0x1234));
    assert_eq!(node.lengthfield(), Ok(vec![0x12, 0x34]));
    assert_eq!(node.serialization_length(), 7);
    node.set_length(None);
    assert_eq!(node.length(), 3);
}
