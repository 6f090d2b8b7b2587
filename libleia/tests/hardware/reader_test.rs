#![cfg(feature = "serial")]

#[path = "common.rs"]
mod common;

use serial_test::serial;

// These tests need a LEIA reader plugged in, and a card for the ones that
// talk to it. They are `#[ignore]`d so CI does not attempt to run them:
//
// cargo test -p libleia --test hardware --features serial -- --ignored --test-threads=1
//

#[test]
#[ignore]
#[serial]
fn open_and_probe() -> anyhow::Result<()> {
    if let Some(reader) = common::open_reader()? {
        assert!(reader.is_open());
        reader.is_card_inserted()?;
        reader.close();
        assert!(!reader.is_open());
    }
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn select_on_inserted_card() -> anyhow::Result<()> {
    let Some(reader) = common::open_reader()? else {
        return Ok(());
    };
    if !reader.is_card_inserted()? {
        return Ok(());
    }

    reader.configure(None, 0, 0, true, true)?;
    let atr = reader.get_atr()?;
    assert!(atr.protocol().is_some());

    reader.reset_trigger_strategy()?;
    let resp = reader.send_apdu(0x00, 0xA4, 0x04, 0x00, &hex::decode("12345678900101")?)?;
    assert!(resp.len() >= 2);
    Ok(())
}
