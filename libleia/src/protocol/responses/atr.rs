// libleia/src/protocol/responses/atr.rs

use crate::constants::ATR_SIZE;
use crate::protocol::parser;
use crate::protocol::responses::Unpackable;
use crate::types::Protocol;
use crate::Result;

/// Parsed ATR as reported by the reader (`t` command response).
///
/// Layout (55 bytes, LE):
/// ts(1) t0(1) ta(4) tb(4) tc(4) td(4) h(16) t_mask(4) h_num(1) tck(1)
/// tck_present(1) di_curr(4) fi_curr(4) f_max_curr(4) t_protocol_curr(1) ifsc(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtrInfo {
    pub ts: u8,
    pub t0: u8,
    pub ta: [u8; 4],
    pub tb: [u8; 4],
    pub tc: [u8; 4],
    pub td: [u8; 4],
    pub h: [u8; 16],
    pub t_mask: [u8; 4],
    pub h_num: u8,
    pub tck: u8,
    pub tck_present: u8,
    pub di_curr: u32,
    pub fi_curr: u32,
    /// Maximum card clock frequency in Hz
    pub f_max_curr: u32,
    pub t_protocol_curr: u8,
    pub ifsc: u8,
}

impl AtrInfo {
    pub const T_PROTOCOL_CURR_OFFSET: usize = 53;
    pub const F_MAX_CURR_OFFSET: usize = 49;

    /// Negotiated protocol, if the reader reports a known one.
    pub fn protocol(&self) -> Option<Protocol> {
        Protocol::from_u8(self.t_protocol_curr)
    }

    pub fn frequency_khz(&self) -> u32 {
        self.f_max_curr / 1000
    }

    /// Historical bytes actually present in the ATR.
    pub fn historical_bytes(&self) -> &[u8] {
        let n = (self.h_num as usize).min(self.h.len());
        &self.h[..n]
    }

    pub fn tck(&self) -> Option<u8> {
        (self.tck_present != 0).then_some(self.tck)
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ATR_SIZE);
        out.push(self.ts);
        out.push(self.t0);
        out.extend_from_slice(&self.ta);
        out.extend_from_slice(&self.tb);
        out.extend_from_slice(&self.tc);
        out.extend_from_slice(&self.td);
        out.extend_from_slice(&self.h);
        out.extend_from_slice(&self.t_mask);
        out.push(self.h_num);
        out.push(self.tck);
        out.push(self.tck_present);
        out.extend_from_slice(&self.di_curr.to_le_bytes());
        out.extend_from_slice(&self.fi_curr.to_le_bytes());
        out.extend_from_slice(&self.f_max_curr.to_le_bytes());
        out.push(self.t_protocol_curr);
        out.push(self.ifsc);
        out
    }
}

impl Unpackable for AtrInfo {
    const MIN_SIZE: usize = ATR_SIZE;

    fn unpack(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, ATR_SIZE)?;
        Ok(Self {
            ts: data[0],
            t0: data[1],
            ta: parser::array_at(data, 2)?,
            tb: parser::array_at(data, 6)?,
            tc: parser::array_at(data, 10)?,
            td: parser::array_at(data, 14)?,
            h: parser::array_at(data, 18)?,
            t_mask: parser::array_at(data, 34)?,
            h_num: data[38],
            tck: data[39],
            tck_present: data[40],
            di_curr: parser::le_u32_at(data, 41)?,
            fi_curr: parser::le_u32_at(data, 45)?,
            f_max_curr: parser::le_u32_at(data, Self::F_MAX_CURR_OFFSET)?,
            t_protocol_curr: data[Self::T_PROTOCOL_CURR_OFFSET],
            ifsc: data[54],
        })
    }
}
