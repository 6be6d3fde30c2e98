//! Benchmark for subrecord decoding and encoding.
//!
//! Builds synthetic creature and container payloads with the builder API,
//! then times decoding, encoding and the round-trip check over them.
//!
//! Usage: `bench-subrecords [record-count]` (default 20000). Set `RUST_LOG`
//! to see the codec's own logging.

use std::time::{Duration, Instant};

use esp_codec::model::builder::RecordBuilder;
use esp_codec::model::FieldValue;
use esp_codec::schema::standard::layouts::{
    AI_DATA, CONTAINER_DATA, CONTAINER_ITEM, CREATURE_DATA, DESTRUCTION_HEADER, OBJECT_BOUNDS,
    SOUND_TYPE, STAGE_END,
};
use esp_codec::{check_round_trip, EnumValue, FormId, Record, Registry, Scalar, Tag};
use tracing_subscriber::EnvFilter;

const DEFAULT_RECORDS: usize = 20_000;
const ITERS: u32 = 5;

fn creature(i: usize) -> Record {
    let mut builder = RecordBuilder::new(Tag::new(b"CREA"))
        .editor_id(&format!("Creature{:05}", i))
        .fields_with(Tag::new(b"OBND"), &OBJECT_BOUNDS, |f| {
            f.int("x1", -16).int("y1", -16).int("x2", 16).int("y2", 16).int("z2", 32)
        })
        .text(Tag::new(b"FULL"), "Mirelurk")
        .string_list(Tag::new(b"NIFZ"), ["mirelurk.nif", "claw.nif", ""])
        .array(
            Tag::new(b"NIFT"),
            (0..16u8).map(|b| FieldValue::Scalar(Scalar::U8(b))),
        )
        .fields_with(Tag::new(b"AIDT"), &AI_DATA, |f| {
            f.variant("aggression", "Aggressive")
                .variant("mood", "Angry")
                .variant("teaches", "None")
                .int("aggro_radius", 500)
        })
        .fields_with(Tag::new(b"DATA"), &CREATURE_DATA, |f| {
            f.variant("creature_type", "MutatedAnimal")
                .int("health", (i % 1000) as i64)
                .int("damage", 20)
        });

    for (slot, sound) in ["Idle", "Aware", "Attack", "Death"].iter().enumerate() {
        if let Some(value) = EnumValue::named(&SOUND_TYPE, sound) {
            builder = builder
                .enum_value(Tag::new(b"CSDT"), value)
                .form_id(Tag::new(b"CSDI"), FormId::from_u32(0x0001_0000 + slot as u32))
                .scalar(Tag::new(b"CSDC"), Scalar::U8(100));
        }
    }

    builder.text(Tag::new(b"MODL"), "creatures\\mirelurk\\skeleton.nif").build()
}

fn container(i: usize) -> Record {
    let mut builder = RecordBuilder::new(Tag::new(b"CONT"))
        .editor_id(&format!("Container{:05}", i))
        .text(Tag::new(b"FULL"), "Footlocker")
        .text(Tag::new(b"MODL"), "clutter\\footlocker.nif")
        .fields_with(Tag::new(b"DATA"), &CONTAINER_DATA, |f| f.int("flags", 1).float("weight", 25.0));

    for item in 0..8u32 {
        builder = builder.fields_with(Tag::new(b"CNTO"), &CONTAINER_ITEM, |f| {
            f.form_id("item", FormId::from_u32(0x0002_0000 + item)).int("count", 1)
        });
    }

    builder
        .fields_with(Tag::new(b"DEST"), &DESTRUCTION_HEADER, |f| f.int("health", 100).int("stage_count", 1))
        .marker(Tag::new(b"DSTF"), &STAGE_END)
        .build()
}

fn throughput(bytes: usize, time: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / time.as_secs_f64()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_RECORDS,
    };
    let registry = Registry::standard()?;

    // Build synthetic payloads
    let build_start = Instant::now();
    let mut payloads = Vec::with_capacity(count);
    for i in 0..count {
        let record = if i % 2 == 0 { creature(i) } else { container(i) };
        payloads.push((record.kind, record.encode()?));
    }
    let total_bytes: usize = payloads.iter().map(|(_, p)| p.len()).sum();
    println!(
        "Built {} records ({} bytes) in {:?}",
        payloads.len(),
        total_bytes,
        build_start.elapsed()
    );

    // Warmup
    for (kind, payload) in payloads.iter().take(100) {
        registry.decode(*kind, payload)?;
    }

    // Benchmark decoding
    let decode_start = Instant::now();
    let mut subrecords = 0;
    for _ in 0..ITERS {
        subrecords = 0;
        for (kind, payload) in &payloads {
            subrecords += registry.decode(*kind, payload)?.len();
        }
    }
    let decode_time = decode_start.elapsed() / ITERS;
    println!("\nDecode: {:?} (avg of {} iterations)", decode_time, ITERS);
    println!("  Subrecords: {}", subrecords);
    println!("  Throughput: {:.2} MB/s", throughput(total_bytes, decode_time));

    // Benchmark encoding
    let records = payloads
        .iter()
        .map(|(kind, payload)| registry.decode(*kind, payload))
        .collect::<Result<Vec<_>, _>>()?;
    let encode_start = Instant::now();
    let mut encoded_bytes = 0;
    for _ in 0..ITERS {
        encoded_bytes = 0;
        for record in &records {
            encoded_bytes += record.encode()?.len();
        }
    }
    let encode_time = encode_start.elapsed() / ITERS;
    println!("\nEncode: {:?} (avg of {} iterations)", encode_time, ITERS);
    println!("  Throughput: {:.2} MB/s", throughput(encoded_bytes, encode_time));

    // Round-trip check
    let check_start = Instant::now();
    let mut diverged = 0;
    for (kind, payload) in &payloads {
        let Some(kind) = registry.get(*kind) else {
            continue;
        };
        if !check_round_trip(kind, payload)?.is_identical() {
            diverged += 1;
        }
    }
    println!("\nRound trip: {:?}", check_start.elapsed());
    println!("  Diverged: {} of {}", diverged, payloads.len());

    Ok(())
}
