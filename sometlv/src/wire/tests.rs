#![cfg(test)]

use super::*;
use rand::Rng;

fn wiretype(value: u8) -> Wiretype {
    Wiretype::new(value).expect("wiretype should be valid")
}

fn data_id(value: u16) -> DataId {
    DataId::new(value).expect("data ID should be valid")
}

#[test]
fn generate_tag_packs_wiretype_and_data_id() {
    assert_eq!(generate_tag(wiretype(6), Some(data_id(2))), vec![0x60, 0x02]);
    assert_eq!(generate_tag(wiretype(1), Some(data_id(0))), vec![0x10, 0x00]);
    assert_eq!(
        generate_tag(wiretype(0xF), Some(data_id(0xFFF))),
        vec![0xFF, 0xFF]
    );
    assert_eq!(
        generate_tag(wiretype(0), Some(data_id(0xABC))),
        vec![0x0A, 0xBC]
    );
}

#[test]
fn generate_tag_without_data_id_is_empty() {
    assert_eq!(generate_tag(wiretype(6), None), Vec::<u8>::new());
}

#[test]
fn generate_tag_roundtrip() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let wt = rng.gen_range(0..=0xF_u8);
        let id = rng.gen_range(0..=0xFFF_u16);
        let tag = generate_tag(wiretype(wt), Some(data_id(id)));
        assert_eq!(tag.len(), 2);
        assert_eq!(tag[0] >> 4, wt);
        assert_eq!((u16::from(tag[0] & 0x0F) << 8) | u16::from(tag[1]), id);
    }
}

#[test]
fn lengthfield_width_mapping() {
    for wt in 0..=3 {
        assert_eq!(lengthfield_width(wiretype(wt)), Ok(0));
    }
    assert_eq!(lengthfield_width(wiretype(5)), Ok(1));
    assert_eq!(lengthfield_width(wiretype(6)), Ok(2));
    assert_eq!(lengthfield_width(wiretype(7)), Ok(4));
}

#[test]
fn lengthfield_width_rejects_wiretype_4() {
    assert_eq!(
        lengthfield_width(wiretype(WIRETYPE_COMPLEX_STATIC_LEN)),
        Err(Error::AmbiguousLengthField)
    );
}

#[test]
fn lengthfield_width_rejects_reserved_wiretypes() {
    for wt in 8..=0xF {
        assert_eq!(
            lengthfield_width(wiretype(wt)),
            Err(Error::UnsupportedWiretype(wt))
        );
    }
}

#[test]
fn check_lengthfield_len_accepts_supported_widths() {
    for width in [0, 1, 2, 4] {
        assert_eq!(check_lengthfield_len(width), Ok(()));
    }
}

#[test]
fn check_lengthfield_len_rejects_other_widths() {
    for width in [3, 5, 8, 9] {
        assert_eq!(
            check_lengthfield_len(width),
            Err(Error::InvalidLengthFieldWidth(width))
        );
    }
}

#[test]
fn serialize_lengthfield_widths() {
    assert_eq!(serialize_lengthfield(6, 0), Ok(Vec::new()));
    assert_eq!(serialize_lengthfield(6, 1), Ok(vec![0x06]));
    assert_eq!(serialize_lengthfield(6, 2), Ok(vec![0x00, 0x06]));
    assert_eq!(serialize_lengthfield(6, 4), Ok(vec![0x00, 0x00, 0x00, 0x06]));
    assert_eq!(serialize_lengthfield(0x1234, 2), Ok(vec![0x12, 0x34]));
}

#[test]
fn serialize_lengthfield_rejects_invalid_width() {
    assert_eq!(
        serialize_lengthfield(6, 3),
        Err(Error::InvalidLengthFieldWidth(3))
    );
}

#[test]
fn serialize_lengthfield_rejects_overflow() {
    assert_eq!(
        serialize_lengthfield(0x100, 1),
        Err(Error::LengthOverflow {
            length: 0x100,
            width: 1
        })
    );
    assert_eq!(
        serialize_lengthfield(0x10000, 2),
        Err(Error::LengthOverflow {
            length: 0x10000,
            width: 2
        })
    );
}
