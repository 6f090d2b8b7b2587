//! Talk to a LEIA reader over its serial port: configure the inserted card,
//! print its ATR and send a SELECT.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libleia --example leia_probe --features serial

use anyhow::{Context, bail};
use libleia::transport::SerialDiscovery;
use libleia::{Protocol, Reader, ReaderConfig, utils};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let reader = Reader::new(ReaderConfig::default());
    reader
        .open(&SerialDiscovery::new())
        .context("cannot open the LEIA reader")?;

    if !reader.is_card_inserted()? {
        println!("no card inserted");
        reader.close();
        return Ok(());
    }

    reader.configure(Some(Protocol::T1), 0, 0, true, true)?;
    let atr = reader.get_atr()?;
    match atr.protocol() {
        Some(p) => println!("protocol: {}", p),
        None => println!("protocol: unknown ({})", atr.t_protocol_curr),
    }
    println!("frequency: {} kHz", atr.frequency_khz());
    println!("historical bytes: {}", utils::bytes_to_hex_spaced(atr.historical_bytes()));

    reader.reset_trigger_strategy()?;
    reader.set_pre_send_apdu_trigger_strategy()?;

    let aid = [0x12, 0x34, 0x56, 0x78, 0x90, 0x01, 0x01];
    let resp = reader.send_apdu_raw(0x00, 0xA4, 0x04, 0x00, &aid)?;
    println!(
        "response: {} (delta_t={} delta_t_answer={})",
        utils::bytes_to_hex_spaced(&resp.to_bytes()),
        resp.delta_t,
        resp.delta_t_answer
    );

    reader.close();
    if !resp.is_success() {
        bail!("SELECT failed with status {:04X}", resp.sw());
    }
    println!("SELECT ok");
    Ok(())
}
