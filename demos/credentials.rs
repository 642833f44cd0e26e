//! SNMPv3 Credential Example
//!
//! Builds USM credentials at each security level and shows which
//! combinations are rejected up front.
//!
//! Run with: cargo run --example credentials

use snmp_pdu::{AuthProtocol, PrivProtocol, SecurityCredential, SecurityLevel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snmp_pdu=info".parse()?),
        )
        .init();

    println!("=== Valid Credentials ===\n");

    let monitor = SecurityCredential::builder("monitor")
        .level(SecurityLevel::NoAuthNoPriv)
        .build()?;

    // Defaults: authNoPriv, SHA, DES
    let operator = SecurityCredential::builder("operator")
        .auth_key("authpass123")
        .build()?;

    let admin = SecurityCredential::builder("admin")
        .level(SecurityLevel::AuthPriv)
        .auth_protocol("MD5".parse::<AuthProtocol>()?)
        .auth_key("authpass123")
        .priv_protocol("AES-128".parse::<PrivProtocol>()?)
        .priv_key("privpass123")
        .build()?;

    for cred in [&monitor, &operator, &admin] {
        println!(
            "{:<10} level={:<13} auth={:<4} priv={:<4} msgFlags=0x{:02X}",
            cred.name(),
            cred.level(),
            cred.auth_protocol(),
            cred.priv_protocol(),
            cred.msg_flags(true),
        );
    }

    // Keys never show up in debug output
    println!("\n{admin:?}");

    println!("\n=== Rejected Credentials ===\n");

    let attempts = [
        ("empty name", SecurityCredential::builder("").level(SecurityLevel::NoAuthNoPriv)),
        ("authNoPriv without key", SecurityCredential::builder("operator")),
        (
            "authPriv without priv key",
            SecurityCredential::builder("admin")
                .level(SecurityLevel::AuthPriv)
                .auth_key("authpass123"),
        ),
        (
            "empty auth key",
            SecurityCredential::builder("operator").auth_key(""),
        ),
    ];

    for (label, builder) in attempts {
        match builder.build() {
            Ok(_) => println!("{label}: accepted"),
            Err(e) => println!("{label}: {e}"),
        }
    }

    Ok(())
}
