//! Dumps the subrecords of one record payload.
//!
//! Usage: `cargo run --example dump_record -- <KIND> <payload-file>`
//!
//! The file holds the bytes after the record header, uncompressed. `KIND` is
//! one of the built-in record kinds (ARMA, CONT, CREA, KEYM).

use std::fs;

use esp_codec::{check_round_trip, FieldValue, Registry, Tag, Value};
use tracing_subscriber::EnvFilter;

fn format_bytes(bytes: &[u8]) -> String {
    let preview: Vec<String> = bytes.iter().take(16).map(|b| format!("{:02x}", b)).collect();
    if bytes.len() > 16 {
        format!("[{} ...] ({} bytes)", preview.join(" "), bytes.len())
    } else {
        format!("[{}]", preview.join(" "))
    }
}

fn format_field(v: &FieldValue) -> String {
    match v {
        FieldValue::Scalar(s) => s.to_string(),
        FieldValue::Bytes(b) => format_bytes(b),
        FieldValue::FormId(id) => id.to_string(),
        FieldValue::Enum(e) => format!("{:?}", e),
    }
}

fn format_value(v: &Value) -> String {
    match v {
        Value::Fields(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(name, value)| format!("{}={}", name, format_field(value)))
                .collect();
            format!("{} {{ {} }}", fields.layout().name, parts.join(", "))
        }
        Value::Scalar(s) => s.to_string(),
        Value::Text(t) => format!("\"{}\"", String::from_utf8_lossy(t)),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().take(8).map(format_field).collect();
            let more = if items.len() > 8 { ", ..." } else { "" };
            format!("[{}{}] ({} items)", parts.join(", "), more, items.len())
        }
        Value::StringList(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Enum(e) => format!("{:?}", e),
        Value::FormId(id) => id.to_string(),
        Value::Raw(b) => format_bytes(b),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(kind), Some(path)) = (args.next(), args.next()) else {
        eprintln!("usage: dump_record <KIND> <payload-file>");
        std::process::exit(2);
    };

    let registry = Registry::standard().expect("built-in schema is valid");
    let tag = match <[u8; 4]>::try_from(kind.as_bytes()) {
        Ok(bytes) => Tag::from(bytes),
        Err(_) => {
            eprintln!("record kind must be 4 characters: {}", kind);
            std::process::exit(2);
        }
    };
    let Some(kind) = registry.get(tag) else {
        let known: Vec<String> = registry.tags().iter().map(|t| t.to_string()).collect();
        eprintln!("unknown record kind {} (known: {})", tag, known.join(", "));
        std::process::exit(2);
    };

    println!("Reading: {}", path);
    let data = fs::read(&path).expect("Failed to read file");
    println!("Payload size: {} bytes", data.len());

    println!("\n=== Subrecords ===");
    let mut iter = kind.subrecords(&data);
    let mut offset = iter.position();
    while let Some(item) = iter.next() {
        match item {
            Ok(sub) => println!("{:>6}  {}  {}", offset, sub.tag, format_value(&sub.value)),
            Err(e) => println!("{:>6}  error: {} ({})", offset, e, e.kind().as_str()),
        }
        offset = iter.position();
    }

    println!("\n=== Round Trip ===");
    match check_round_trip(kind, &data) {
        Ok(result) => match result.first_difference {
            None => println!("identical ({} bytes)", result.encoded.len()),
            Some(at) => println!(
                "differs at offset {} ({} bytes in, {} bytes out)",
                at,
                data.len(),
                result.encoded.len()
            ),
        },
        Err(e) => println!("failed: {}", e),
    }
}
