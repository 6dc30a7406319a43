//! Decodes codes given on the command line and prints their fields.
//!
//! ```text
//! cargo run --example inspect_code -- 1041000000000006 1098122a13fab011
//! ```
//!
//! Checksum warnings are printed through `tracing`; set `RUST_LOG` to tune them.

use knowsys_code::{decode_code, CategoryType, DecodedCode};
use tracing_subscriber::EnvFilter;

fn format_flag(flag: Option<bool>) -> &'static str {
    match flag {
        None => "unset",
        Some(true) => "yes",
        Some(false) => "no",
    }
}

fn print_code(code: &DecodedCode) {
    println!("  Name: {}", code.describe());
    println!("  Category: {} (id {})", code.category_type, code.category_id);
    if code.category_type == CategoryType::Relation {
        println!(
            "  Entities: {:?} -> {:?}",
            code.from_entity_kind(),
            code.to_entity_kind()
        );
        println!("  Direction: {}", code.direction);
    }
    println!(
        "  Flags: property={}, group={}, term={}",
        format_flag(code.is_property),
        format_flag(code.is_group),
        format_flag(code.is_term)
    );
    println!("  Relation id: {:#04x}", code.relation_id);
    println!("  Property id: {:#05x}", code.property_id);
    println!(
        "  Extern ids: {:#04x} / {:#04x}",
        code.extern_l1_id, code.extern_l2_id
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let codes: Vec<String> = std::env::args().skip(1).collect();
    if codes.is_empty() {
        eprintln!("usage: inspect_code <code>...");
        std::process::exit(2);
    }

    let mut failures = 0;
    for text in &codes {
        println!("{}", text);
        match decode_code(text) {
            Ok(decoded) => {
                print_code(&decoded.code);
                match &decoded.checksum_mismatch {
                    None => println!("  Checksum: ok"),
                    Some(mismatch) => println!(
                        "  Checksum: expected {}, found {} (canonical: {})",
                        mismatch.expected, mismatch.found, decoded.code
                    ),
                }
            }
            Err(err) => {
                failures += 1;
                println!("  Error: {} ({})", err, err.code().code());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}
