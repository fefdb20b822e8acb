use std::time::Duration;

use parcl_v3_accounts::{MarginAccount, Position, DISCRIMINATOR_LEN};

/// Evenly strided set of one byte wide (or wider) flags, scanned one offset at
/// a time because the transport only supports equality at a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSlotScan {
    /// Raw account offset of the first slot, discriminator included.
    pub base_offset: usize,
    pub stride: usize,
    pub slots: usize,
    /// Bytes each slot is compared against.
    pub value: Vec<u8>,
}

impl SubSlotScan {
    /// Slot offsets in ascending order. Stops at the first offset that does
    /// not fit in `usize`, no account is that large.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.slots)
            .map_while(move |slot| slot.checked_mul(self.stride)?.checked_add(self.base_offset))
    }

    /// `MarginAccount::in_liquidation == 1`, offset derived from the layout.
    pub fn margin_account_in_liquidation() -> Self {
        Self {
            base_offset: DISCRIMINATOR_LEN + MarginAccount::IN_LIQUIDATION_OFFSET,
            stride: Position::LEN,
            slots: 1,
            value: vec![1],
        }
    }
}

/// Delay inserted between consecutive round trips of a multi scan.
#[derive(Debug, Clone)]
pub struct ScanPacing {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier applied after every wait, 1.0 keeps the delay fixed.
    pub backoff_multiplier: f64,
}

impl Default for ScanPacing {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(9))
    }
}

impl ScanPacing {
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            max_delay: delay,
            backoff_multiplier: 1.0,
        }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Delay before the round trip following `completed` finished ones.
    /// Never exceeds `max_delay`.
    pub fn delay_after(&self, completed: u32) -> Duration {
        if completed == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(completed - 1).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        if secs.is_nan() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(self.max_delay)
    }
}

#[derive(Debug, Clone, Default)]
pub enum LiquidationScanStrategy {
    /// One discriminator scan, flag checked on the decoded records.
    #[default]
    DecodeAll,
    /// One filtered scan per flag offset. Transfers only flagged accounts but
    /// costs a round trip per slot.
    PerSlot {
        scan: SubSlotScan,
        pacing: ScanPacing,
    },
}
