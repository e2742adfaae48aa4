//! Example: Variables, registers and programs
//!
//! Run with: cargo run --example variables -- <host>
//!
//! This example demonstrates:
//! - Reading and writing (system) variables
//! - Reading numeric and position registers
//! - Listing files and downloading one
//! - Appending to the console log

use comet_rpc::{Client, ClientConfig, RegisterValue};

fn main() -> comet_rpc::Result<()> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.1.10".to_string());

    let client = Client::new(ClientConfig::new(host))?;

    // =========================================================================
    // Variables
    // =========================================================================

    println!("=== Variables ===\n");

    let var = client.vmip_readva("*SYSTEM*", "$MCR.$GENOVERRIDE")?;
    println!("{} = {} (type {})", var.var_name, var.value, var.type_code);

    // Values are sent as text and converted by the controller
    let reply = client.vmip_writeva("*SYSTEM*", "$MNUTOOLNUM[1]", 2)?;
    println!("$MNUTOOLNUM[1] written (confirmed: {})", reply.is_confirmed());

    // =========================================================================
    // Registers
    // =========================================================================

    println!("\n=== Registers ===\n");

    let reg = client.regvalrd(1)?;
    match reg.value {
        RegisterValue::Int(v) => println!("R[1: {}] = {v}", reg.comment),
        RegisterValue::Real(v) => println!("R[1: {}] = {v:.3}", reg.comment),
    }

    let pr = client.posregvalrd(1, 1)?;
    println!("PR[1: {}] ({:?}) = {}", pr.comment, pr.pos_type, pr.value);

    // =========================================================================
    // Files
    // =========================================================================

    println!("\n=== Files ===\n");

    for file in client.gtfilist("MD:*.tp")? {
        println!("{file}");
    }

    let lines = client.get_raw_file("MD:ERRALL.LS")?;
    let contents: Vec<u8> = lines.into_iter().flat_map(|line| line.buf).collect();
    println!("ERRALL.LS: {} bytes", contents.len());

    // =========================================================================
    // Console Log
    // =========================================================================

    client.rprintf("hello from comet-rpc")?;

    println!("\nVariables example completed!");
    Ok(())
}
