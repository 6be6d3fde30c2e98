//! End-to-end decoding of the built-in record kinds.

use std::sync::Arc;
use std::thread;

use esp_codec::codec::encode_envelope;
use esp_codec::model::builder::RecordBuilder;
use esp_codec::schema::standard::layouts::{ARMOR_RATING, KEY_DATA, SOUND_TYPE};
use esp_codec::{
    check_round_trip, Decoder, ErrorKind, FieldValue, FormId, RecordKind, Registry, Scalar,
    SharedGroup, Tag, Value,
};
use proptest::prelude::*;

fn registry() -> &'static Registry {
    Registry::standard().unwrap()
}

fn kind(tag: &[u8; 4]) -> Arc<RecordKind> {
    Arc::clone(registry().get(Tag::new(tag)).unwrap())
}

fn envelope(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    encode_envelope(Tag::new(tag), payload).unwrap()
}

#[test]
fn armor_addon_data_layout() {
    let payload = envelope(
        b"DATA",
        &[0x64, 0, 0, 0, 0x64, 0, 0, 0, 0x00, 0x00, 0xb0, 0x40],
    );
    let record = kind(b"ARMA").decode(&payload).unwrap();
    let data = record.subrecords[0].value.as_fields().unwrap();
    assert_eq!(data.int("value"), Some(100));
    assert_eq!(data.int("max_condition"), Some(100));
    assert_eq!(data.float("weight"), Some(5.5));
    assert_eq!(record.encode().unwrap(), payload);
}

#[test]
fn creature_sound_type_enum() {
    let payload = envelope(b"CSDT", &[4, 0, 0, 0]);
    let record = kind(b"CREA").decode(&payload).unwrap();
    let value = record.subrecords[0].value.as_enum().unwrap();
    assert_eq!(value.name(), Some("Idle"));
    assert_eq!(value.table, &SOUND_TYPE);
    assert_eq!(record.encode().unwrap(), payload);

    let err = kind(b"CREA").decode(&envelope(b"CSDT", &[22, 0, 0, 0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueOutOfDomain);
}

#[test]
fn legacy_armor_rating_is_upgraded() {
    let payload = envelope(b"DNAM", &[0x10, 0x00, 0x01, 0x00]);
    let record = kind(b"ARMA").decode(&payload).unwrap();
    let rating = record.subrecords[0].value.as_fields().unwrap();
    assert_eq!(rating.layout(), &ARMOR_RATING);
    assert_eq!(rating.int("ar"), Some(16));
    assert_eq!(rating.int("flags"), Some(1));

    let encoded = record.encode().unwrap();
    assert_eq!(
        encoded,
        envelope(b"DNAM", &[0x10, 0x00, 0x01, 0x00, 0, 0, 0, 0, 0, 0, 0, 0])
    );

    // Canonical output is stable from here on.
    let again = kind(b"ARMA").decode(&encoded).unwrap();
    assert_eq!(again, record);
    assert_eq!(again.encode().unwrap(), encoded);
}

#[test]
fn full_name_text() {
    let payload = b"FULL\x05\x00Iron\0";
    let record = kind(b"ARMA").decode(payload).unwrap();
    assert_eq!(record.subrecords[0].value.as_text(), Some("Iron"));
    assert_eq!(record.encode().unwrap(), payload);
}

#[test]
fn unknown_tag_fails_the_record() {
    let mut payload = envelope(b"EDID", b"Key\0");
    payload.extend(envelope(b"ZZZZ", &[1, 2, 3]));
    payload.extend(envelope(b"FULL", b"Key\0"));

    let kind = kind(b"KEYM");
    let results: Vec<_> = kind.subrecords(&payload).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedSubrecordKind);
    assert_eq!(err.tag(), Some(Tag::new(b"ZZZZ")));
    assert_eq!(err.to_string(), "unsupported subrecord ZZZZ in KEYM");
}

#[test]
fn empty_array_round_trips() {
    let payload = b"NIFT\x00\x00";
    let record = kind(b"CREA").decode(payload).unwrap();
    assert_eq!(record.subrecords[0].value, Value::Array(Vec::new()));
    assert_eq!(record.encode().unwrap(), payload);
}

#[test]
fn empty_payload_is_an_empty_record() {
    for tag in registry().tags() {
        let kind = registry().get(tag).unwrap();
        assert!(kind.subrecords(&[]).next().is_none());
        assert!(kind.decode(&[]).unwrap().is_empty());
    }
}

#[test]
fn shared_groups_decode_in_every_kind() {
    let mut payload = envelope(b"EDID", b"Chest\0");
    payload.extend(envelope(b"MODL", b"clutter\\chest.nif\0"));
    payload.extend(envelope(b"CNTO", &[0x0f, 0, 0, 0, 5, 0, 0, 0]));
    payload.extend(envelope(b"DEST", &[100, 0, 0, 0, 1, 0, 0, 0]));
    payload.extend(envelope(b"DSTF", &[]));

    let cont = kind(b"CONT");
    let result = check_round_trip(&cont, &payload).unwrap();
    assert!(result.is_identical());
    assert_eq!(result.record.len(), 5);
    assert_eq!(cont.group_of(Tag::new(b"CNTO")).map(|g| g.name()), Some("Item"));

    // KEYM has no Item group.
    let err = kind(b"KEYM").decode(&payload).unwrap_err();
    assert_eq!(err.tag(), Some(Tag::new(b"CNTO")));
}

#[test]
fn creature_record_round_trips() {
    let mut payload = envelope(b"EDID", b"Mirelurk\0");
    payload.extend(envelope(b"OBND", &[0xf0, 0xff, 0xf0, 0xff, 0, 0, 16, 0, 16, 0, 32, 0]));
    payload.extend(envelope(b"FULL", b"Mirelurk\0"));
    payload.extend(envelope(b"NIFZ", b"mirelurk.nif\0claw.nif\0"));
    payload.extend(envelope(b"NIFT", &[1, 2, 3, 4]));
    payload.extend(envelope(
        b"DATA",
        &[2, 50, 0, 25, 0x2c, 0x01, 0, 0, 0x14, 0, 5, 5, 5, 5, 5, 5, 5],
    ));
    payload.extend(envelope(b"CSDT", &[10, 0, 0, 0]));
    payload.extend(envelope(b"CSDI", &[0x34, 0x12, 0, 0]));
    payload.extend(envelope(b"CSDC", &[100]));

    let result = check_round_trip(&kind(b"CREA"), &payload).unwrap();
    assert!(result.is_identical(), "diverged at {:?}", result.first_difference);

    let record = result.record;
    let models = record.first(Tag::new(b"NIFZ")).unwrap().value.as_string_list().unwrap();
    assert_eq!(models.len(), 3);
    assert!(models[2].is_empty());

    let data = record.first(Tag::new(b"DATA")).unwrap().value.as_fields().unwrap();
    assert_eq!(data.enum_name("creature_type"), Some("MutatedInsect"));
    assert_eq!(data.int("health"), Some(300));
    assert_eq!(data.int("damage"), Some(20));
}

#[test]
fn built_record_decodes_back() {
    let record = RecordBuilder::new(Tag::new(b"KEYM"))
        .editor_id("VaultKey")
        .text(Tag::new(b"FULL"), "Vault Key")
        .form_id(Tag::new(b"SCRI"), FormId::from_u32(0x0001_0203))
        .fields_with(Tag::new(b"DATA"), &KEY_DATA, |f| f.int("value", 5).float("weight", 0.0))
        .try_build()
        .unwrap();

    let bytes = record.encode().unwrap();
    let decoded = kind(b"KEYM").decode(&bytes).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn decoding_is_shareable_across_threads() {
    let mut payload = envelope(b"EDID", b"Key\0");
    payload.extend(envelope(b"DATA", &[1, 0, 0, 0, 0, 0, 0x80, 0x3f]));
    let payload = Arc::new(payload);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let kind = kind(b"KEYM");
            let payload = Arc::clone(&payload);
            thread::spawn(move || kind.decode(&payload).map(|r| r.len()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(2));
    }
}

#[test]
fn priority_rule_with_shadowing() {
    let first = Arc::new(SharedGroup::new("First").member(Tag::new(b"XXXX"), Decoder::Scalar(esp_codec::ScalarKind::U8)));
    let second = Arc::new(SharedGroup::new("Second").member(Tag::new(b"XXXX"), Decoder::Raw));

    let rejected = RecordKind::builder(Tag::new(b"TEST"))
        .group(Arc::clone(&first))
        .group(Arc::clone(&second))
        .build();
    assert!(rejected.is_err());

    let kind = RecordKind::builder(Tag::new(b"TEST"))
        .group(first)
        .group(second)
        .allow_shadowing()
        .build()
        .unwrap();
    let record = kind.decode(b"XXXX\x01\x00\x09").unwrap();
    assert_eq!(record.subrecords[0].value, Value::Scalar(Scalar::U8(9)));
}

fn key_record(editor_id: String, value: i32, weight: f32, sounds: Vec<u32>) -> Vec<u8> {
    let mut payload = envelope(b"EDID", format!("{}\0", editor_id).as_bytes());
    let mut data = value.to_le_bytes().to_vec();
    data.extend(weight.to_le_bytes());
    payload.extend(envelope(b"DATA", &data));
    for sound in sounds {
        payload.extend(envelope(b"YNAM", &sound.to_le_bytes()));
    }
    payload
}

proptest! {
    #[test]
    fn canonical_records_round_trip(
        editor_id in "[A-Za-z0-9_]{0,32}",
        value in any::<i32>(),
        weight in any::<f32>(),
        sounds in proptest::collection::vec(any::<u32>(), 0..4),
    ) {
        let payload = key_record(editor_id, value, weight, sounds);
        let kind = kind(b"KEYM");
        let record = kind.decode(&payload).unwrap();
        prop_assert_eq!(record.encode().unwrap(), payload.clone());
        prop_assert_eq!(kind.decode(&record.encode().unwrap()).unwrap(), record);
    }

    #[test]
    fn arrays_of_any_length_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let payload = envelope(b"NIFT", &bytes);
        let record = kind(b"CREA").decode(&payload).unwrap();
        let items = record.subrecords[0].value.as_array().unwrap();
        prop_assert_eq!(items.len(), bytes.len());
        prop_assert!(items.iter().all(|i| matches!(i, FieldValue::Scalar(Scalar::U8(_)))));
        prop_assert_eq!(record.encode().unwrap(), payload);
    }
}
