use std::collections::HashSet;

use chainlink_store_itf::{locate_round, StoreError};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Tiers {
    live_cursor: u32,
    live_length: u32,
    latest_round_id: u32,
    historical_cursor: u32,
    historical_length: u32,
    granularity: u8,
}

impl Tiers {
    fn locate(&self, round_id: u32) -> Result<(u64, u32), StoreError> {
        locate_round(
            round_id,
            self.live_cursor,
            self.live_length,
            self.latest_round_id,
            self.historical_cursor,
            self.historical_length,
            self.granularity,
        )
        .map(|location| (location.position, location.corrected_round_id))
    }

    fn live_oldest_round(&self) -> u32 {
        (self.latest_round_id + 1).saturating_sub(self.live_length)
    }
}

fn tiers() -> impl Strategy<Value = Tiers> {
    (1_u32..256, 0_u32..256, 1_u8..=60, 1_000_u32..1_000_000)
        .prop_flat_map(|(live_length, historical_length, granularity, latest_round_id)| {
            (
                0..live_length,
                0..historical_length.max(1),
                Just(live_length),
                Just(historical_length),
                Just(granularity),
                Just(latest_round_id),
            )
        })
        .prop_map(
            |(live_cursor, historical_cursor, live_length, historical_length, granularity, latest_round_id)| Tiers {
                live_cursor,
                live_length,
                latest_round_id,
                historical_cursor,
                historical_length,
                granularity,
            },
        )
}

proptest! {
    #[test]
    fn live_window_is_exact_and_injective(tiers in tiers()) {
        let mut positions = HashSet::new();
        for round_id in tiers.live_oldest_round()..=tiers.latest_round_id {
            let (position, corrected_round_id) = tiers.locate(round_id).unwrap();
            prop_assert_eq!(corrected_round_id, round_id);
            prop_assert!(position < u64::from(tiers.live_length));
            prop_assert!(positions.insert(position));
        }
    }

    #[test]
    fn latest_round_sits_before_live_cursor(tiers in tiers()) {
        let (position, _) = tiers.locate(tiers.latest_round_id).unwrap();
        let expected = (tiers.live_cursor + tiers.live_length - 1) % tiers.live_length;
        prop_assert_eq!(position, u64::from(expected));
    }

    #[test]
    fn retained_historical_rounds_are_found(tiers in tiers(), sample: u32, offset: u8) {
        prop_assume!(tiers.historical_length > 0);
        let granularity = u32::from(tiers.granularity);
        let historical_latest_round = tiers.latest_round_id - tiers.latest_round_id % granularity;
        let steps = sample % tiers.historical_length;
        let expected_round_id = historical_latest_round.checked_sub(steps * granularity);
        prop_assume!(expected_round_id.is_some());
        let expected_round_id = expected_round_id.unwrap();
        let round_id = expected_round_id + u32::from(offset) % granularity;
        prop_assume!(round_id < tiers.live_oldest_round());

        let (position, corrected_round_id) = tiers.locate(round_id).unwrap();
        prop_assert_eq!(corrected_round_id, expected_round_id);
        prop_assert!(position >= u64::from(tiers.live_length));
        prop_assert!(position < u64::from(tiers.live_length) + u64::from(tiers.historical_length));
        prop_assert_eq!(tiers.locate(corrected_round_id), Ok((position, corrected_round_id)));
    }

    #[test]
    fn historical_samples_are_injective(tiers in tiers()) {
        prop_assume!(tiers.historical_length > 0);
        let granularity = u32::from(tiers.granularity);
        let historical_latest_round = tiers.latest_round_id - tiers.latest_round_id % granularity;

        let mut positions = HashSet::new();
        for steps in 0..tiers.historical_length {
            let Some(round_id) = historical_latest_round.checked_sub(steps * granularity) else {
                break;
            };
            if round_id >= tiers.live_oldest_round() {
                continue;
            }
            let (position, corrected_round_id) = tiers.locate(round_id).unwrap();
            prop_assert_eq!(corrected_round_id, round_id);
            prop_assert!(positions.insert(position));
        }
    }

    #[test]
    fn rounds_older_than_history_have_no_data(tiers in tiers()) {
        let granularity = u32::from(tiers.granularity);
        let historical_latest_round = tiers.latest_round_id - tiers.latest_round_id % granularity;
        let retained = tiers.historical_length * granularity;
        prop_assume!(historical_latest_round >= retained);

        let round_id = historical_latest_round - retained;
        prop_assume!(round_id < tiers.live_oldest_round());
        prop_assert_eq!(tiers.locate(round_id), Err(StoreError::NoDataPresent));
    }

    #[test]
    fn future_rounds_are_out_of_range(tiers in tiers(), ahead in 1_u32..1_000) {
        prop_assert_eq!(tiers.locate(tiers.latest_round_id + ahead), Err(StoreError::OutOfRange));
    }
}
