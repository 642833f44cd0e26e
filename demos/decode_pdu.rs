//! PDU Decoding Example
//!
//! Decodes hex-encoded PDUs given on the command line, or a few built-in
//! samples when none are given, and prints the result.
//!
//! Run with: cargo run --example decode_pdu -- a00b02012a0201000201003000
//!
//! Set `RUST_LOG=snmp_pdu=debug` to see why rejected buffers failed.

use snmp_pdu::{Pdu, PduCodec, RawVarbindCodec};

const SAMPLES: &[(&str, &str)] = &[
    ("GetRequest, no bindings", "a00b02012a0201000201003000"),
    (
        "GetResponse, noSuchName",
        "a219020107020102020101300e300c06082b060102010101000500",
    ),
    ("Indefinite length", "a08002012a02010002010030000000"),
    ("Unknown PDU tag", "a90b0201010201000201003000"),
    ("Error status 19", "a20b0201010201130201003000"),
    ("Three elements", "a009020101020100020100"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snmp_pdu=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<(String, String)> = if args.is_empty() {
        SAMPLES
            .iter()
            .map(|(label, data)| (label.to_string(), data.to_string()))
            .collect()
    } else {
        args.into_iter().map(|a| (a.clone(), a)).collect()
    };

    let raw = PduCodec::new(RawVarbindCodec);

    for (label, data) in inputs {
        println!("=== {label} ===");
        let bytes = match hex::decode(data.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("  not hex: {e}\n");
                continue;
            }
        };

        match Pdu::decode(bytes.clone()) {
            Ok(pdu) => {
                println!("  type:        {} ({})", pdu.pdu_type, pdu.pdu_type.code());
                println!("  request-id:  {}", pdu.request_id);
                println!("  error:       {} ({})", pdu.error, pdu.error.code());
                println!("  error-index: {}", pdu.error_index);
                for vb in &pdu.varbinds {
                    println!("  {vb}");
                }
                if let Some(vb) = pdu.offending_varbind() {
                    println!("  offending:   {}", vb.oid);
                }
                println!("  re-encoded:  {}", hex::encode(pdu.encode()));
            }
            Err(e) => {
                println!("  rejected: {e}");
                // The raw codec skips binding parsing, which tells apart
                // framing problems from bad bindings.
                if let Ok(pdu) = raw.decode(bytes) {
                    println!("  framing is fine; {} raw binding(s)", pdu.varbinds.len());
                    for vb in &pdu.varbinds {
                        println!("    {}", hex::encode(vb));
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}
