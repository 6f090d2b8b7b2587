// fixtures.rs — provides commonly used test payloads

use libleia::protocol::{ApduResponse, AtrInfo};

/// ATR of a T=1 card clocked at 4 MHz.
pub fn sample_atr() -> AtrInfo {
    let mut h = [0u8; 16];
    let hist = hex::decode("0073c00140009000").unwrap();
    h[..hist.len()].copy_from_slice(&hist);
    AtrInfo {
        ts: 0x3B,
        t0: 0xD8,
        ta: [0x18, 0, 0, 0],
        tb: [0; 4],
        tc: [0; 4],
        td: [0x81, 0x31, 0, 0],
        h,
        t_mask: [0x11, 0x08, 0, 0],
        h_num: hist.len() as u8,
        tck: 0x0C,
        tck_present: 1,
        di_curr: 1,
        fi_curr: 372,
        f_max_curr: 4_000_000,
        t_protocol_curr: 1,
        ifsc: 0xFE,
    }
}

pub fn sample_atr_bytes() -> Vec<u8> {
    sample_atr().pack()
}

/// SELECT by AID as sent by the demo.
pub fn select_aid() -> Vec<u8> {
    hex::decode("12345678900101").unwrap()
}

/// `le=0 sw=90 00 delta_t=0 delta_t_answer=0`, no data.
pub fn status_only_response() -> Vec<u8> {
    vec![0, 0, 0, 0, 0x90, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]
}

pub fn response_with_data(data: &[u8], sw1: u8, sw2: u8) -> Vec<u8> {
    ApduResponse {
        le: data.len() as u32,
        sw1,
        sw2,
        delta_t: 120,
        delta_t_answer: 3400,
        data: data.to_vec(),
    }
    .pack()
}
