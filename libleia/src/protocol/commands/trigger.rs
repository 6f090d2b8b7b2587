// libleia/src/protocol/commands/trigger.rs

use crate::constants::{STRATEGY_MAX, TRIGGER_STRATEGY_SIZE};
use crate::protocol::commands::Packable;

/// Points in the reader firmware where a trigger signal can be raised.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPoint {
    GetAtrPre = 1 << 0,
    GetAtrPost = 1 << 1,
    PreSendApduShort = 1 << 2,
    PreSendApduFragmentedT0 = 1 << 3,
    PreSendApduT1 = 1 << 4,
    PreSendApdu = 1 << 5,
}

/// Trigger strategy selection (`O` command payload).
///
/// Layout: index(1) single(1) delay(4, LE) size(1) points(10 * 4, LE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerStrategyCommand {
    index: u8,
    single: u8,
    delay: u32,
    points: Vec<TriggerPoint>,
}

impl TriggerStrategyCommand {
    /// Strategy slot written by this driver
    const STRATEGY_INDEX: u8 = 1;

    /// Disable all triggers.
    pub fn reset() -> Self {
        Self::with_points(Vec::new())
    }

    /// Raise a trigger right before an APDU is sent to the card.
    pub fn pre_send_apdu() -> Self {
        Self::with_points(vec![TriggerPoint::PreSendApdu])
    }

    /// `true` selects [`reset`](Self::reset), `false` selects
    /// [`pre_send_apdu`](Self::pre_send_apdu).
    pub fn new(disable_all: bool) -> Self {
        if disable_all {
            Self::reset()
        } else {
            Self::pre_send_apdu()
        }
    }

    fn with_points(points: Vec<TriggerPoint>) -> Self {
        Self {
            index: Self::STRATEGY_INDEX,
            single: 0,
            delay: 0,
            points,
        }
    }

    pub fn points(&self) -> &[TriggerPoint] {
        &self.points
    }
}

impl Packable for TriggerStrategyCommand {
    fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TRIGGER_STRATEGY_SIZE);
        out.push(self.index);
        out.push(self.single);
        out.extend_from_slice(&self.delay.to_le_bytes());
        out.push(self.points.len() as u8);
        for slot in 0..STRATEGY_MAX {
            let point = self.points.get(slot).map_or(0, |p| *p as u32);
            out.extend_from_slice(&point.to_le_bytes());
        }
        out
    }
}
