//! Example: Reading and writing I/O
//!
//! Run with: cargo run --example read_io -- <host>
//!
//! This example demonstrates:
//! - Reading single ports and ranges of ports
//! - Writing an output and checking whether the write was confirmed
//! - Simulating ports
//! - Mapping status codes to specific errors

use comet_rpc::{Client, ClientConfig, CometError, IoType};

fn main() -> comet_rpc::Result<()> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.1.10".to_string());

    // =========================================================================
    // Connect to controller
    // =========================================================================

    let client = Client::new(ClientConfig::new(host))?;

    // =========================================================================
    // Reading Ports
    // =========================================================================

    println!("=== Reading Ports ===\n");

    let value = client.iovalrd(IoType::DigitalIn, 1)?;
    println!("DI[1] = {value}");

    let value = client.iovalrd(IoType::GroupedOut, 1)?;
    println!("GO[1] = {value}");

    // Read a range, including comments and simulation state
    for port in client.iogtall(IoType::DigitalOut, 1, 8)? {
        println!(
            "DO[{}] = {} {}{}",
            port.index,
            port.value,
            if port.simulated { "(S) " } else { "" },
            port.comment
        );
    }

    // =========================================================================
    // Writing Ports
    // =========================================================================

    println!("\n=== Writing Ports ===\n");

    let reply = client.iovalset(IoType::DigitalOut, 1, 1)?;
    if reply.is_confirmed() {
        println!("DO[1] set");
    } else {
        println!("DO[1] set (unconfirmed by controller)");
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    println!("\n=== Simulation ===\n");

    client.iosim(IoType::DigitalIn, 2)?;
    let simulated = client.iocksim(IoType::DigitalIn, 2)?;
    println!("DI[2] simulated: {}", simulated.value);
    client.iounsim(IoType::DigitalIn, 2)?;

    // =========================================================================
    // Errors
    // =========================================================================

    println!("\n=== Errors ===\n");

    match client.iogetpn(IoType::DigitalIn, 9999) {
        Ok(comment) => println!("DI[9999]: {comment}"),
        Err(CometError::InvalidIoIndex { index }) => println!("no such port: DI[{index}]"),
        Err(CometError::NoCommentOnIoPort { index }) => println!("DI[{index}] has no comment"),
        Err(e) => return Err(e),
    }

    println!("\nI/O example completed!");
    Ok(())
}
