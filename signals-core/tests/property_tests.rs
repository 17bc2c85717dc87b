//! Property tests for crossover and clock invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism: identical inputs give identical outcomes
//! 2. Settled states never fall back to neutral
//! 3. Session membership, including sessions that wrap midnight
//! 4. No lookahead: while the session is open, the forming bar never matters
//! 5. SMA values only depend on past bars

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use signals_core::clock;
use signals_core::crossover::{next_state, CrossoverEngine, CrossoverParams, ToleranceBand};
use signals_core::domain::{Bar, CrossoverState, TradingSession};
use signals_core::indicators::{Indicator, Sma};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_close() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_close(), min..max)
}

fn arb_tolerance() -> impl Strategy<Value = f64> {
    0.0..10.0_f64
}

fn arb_state() -> impl Strategy<Value = CrossoverState> {
    prop_oneof![
        Just(CrossoverState::Neutral),
        Just(CrossoverState::Above),
        Just(CrossoverState::Below),
    ]
}

fn arb_settled_state() -> impl Strategy<Value = CrossoverState> {
    prop_oneof![Just(CrossoverState::Above), Just(CrossoverState::Below)]
}

/// Minutes since midnight.
fn arb_minute() -> impl Strategy<Value = u32> {
    0..(24 * 60_u32)
}

// ── Helpers ──────────────────────────────────────────────────────────

fn last_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

fn bars_ending(last: NaiveDate, closes: &[f64]) -> Vec<Bar> {
    let n = closes.len();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::from_close("PROP", last - Duration::days((n - 1 - i) as i64), c))
        .collect()
}

fn utc_at(date: NaiveDate, minute: u32) -> DateTime<Utc> {
    let time = date.and_hms_opt(minute / 60, minute % 60, 0).unwrap();
    Utc.from_utc_datetime(&time)
}

fn hhmm(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

fn engine(lookback: usize, up: f64, down: f64) -> CrossoverEngine {
    CrossoverEngine::new(CrossoverParams {
        lookback,
        session: TradingSession::new("09:30", "16:00", "UTC").unwrap(),
        tolerance: ToleranceBand::new(up, down).unwrap(),
    })
    .unwrap()
}

// ── Crossover ────────────────────────────────────────────────────────

proptest! {
    /// The engine keeps nothing between calls.
    #[test]
    fn evaluation_is_deterministic(
        closes in arb_closes(5, 40),
        up in arb_tolerance(),
        down in arb_tolerance(),
        previous in arb_state(),
        minute in arb_minute(),
    ) {
        let engine = engine(5, up, down);
        let bars = bars_ending(last_day(), &closes);
        let now = utc_at(last_day(), minute);

        let first = engine.evaluate(&bars, previous, now);
        let second = engine.evaluate(&bars, previous, now);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "diverging results: {:?} vs {:?}", a, b),
        }
    }

    /// Once above or below, the state only ever flips; it never returns to neutral.
    #[test]
    fn settled_state_never_becomes_neutral(
        previous in arb_settled_state(),
        price in arb_close(),
        sma in arb_close(),
        up in arb_tolerance(),
        down in arb_tolerance(),
    ) {
        let band = ToleranceBand::new(up, down).unwrap();
        let next = next_state(previous, price, sma, &band);
        prop_assert_ne!(next, CrossoverState::Neutral);
    }

    /// With no tolerance, a neutral start follows the sign of price - sma.
    #[test]
    fn zero_band_follows_the_sign(price in arb_close(), sma in arb_close()) {
        let band = ToleranceBand::new(0.0, 0.0).unwrap();
        let next = next_state(CrossoverState::Neutral, price, sma, &band);
        let expected = if price > sma {
            CrossoverState::Above
        } else if price < sma {
            CrossoverState::Below
        } else {
            CrossoverState::Neutral
        };
        prop_assert_eq!(next, expected);
    }

    /// A price inside the band never changes a settled state.
    #[test]
    fn inside_band_keeps_state(
        previous in arb_settled_state(),
        sma in arb_close(),
        up in 0.5..10.0_f64,
        down in 0.5..10.0_f64,
        frac in 0.01..0.99_f64,
    ) {
        let band = ToleranceBand::new(up, down).unwrap();
        let (lower, upper) = (band.lower(sma), band.upper(sma));
        let price = lower + (upper - lower) * frac;
        prop_assert_eq!(next_state(previous, price, sma, &band), previous);
    }

    /// While the session is open, the bar for the current date is ignored,
    /// whatever its close.
    #[test]
    fn forming_bar_never_affects_outcome(
        closes in arb_closes(6, 30),
        forming_a in arb_close(),
        forming_b in arb_close(),
        previous in arb_state(),
        minute in (9 * 60 + 30)..=(16 * 60_u32),
    ) {
        let engine = engine(5, 1.0, 1.0);
        let now = utc_at(last_day(), minute);

        let mut with_a = bars_ending(last_day(), &closes);
        let mut with_b = with_a.clone();
        with_a.last_mut().unwrap().close = forming_a;
        with_b.last_mut().unwrap().close = forming_b;

        let a = engine.evaluate(&with_a, previous, now).unwrap();
        let b = engine.evaluate(&with_b, previous, now).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(a.as_of_date < last_day());
    }

    /// The SMA at index t only depends on bars 0..=t.
    #[test]
    fn sma_has_no_lookahead(
        closes in arb_closes(2, 60),
        period in 1..10_usize,
        cut in 0.0..1.0_f64,
    ) {
        let sma = Sma::new(period).unwrap();
        let bars = bars_ending(last_day(), &closes);
        let full = sma.compute(&bars);

        let len = ((bars.len() as f64) * cut).ceil().max(1.0) as usize;
        let prefix = sma.compute(&bars[..len]);
        prop_assert_eq!(prefix.len(), len);
        for (i, (p, f)) in prefix.iter().zip(&full).enumerate() {
            prop_assert!(
                (p.is_nan() && f.is_nan()) || p == f,
                "mismatch at {}: prefix={} full={}", i, p, f
            );
        }
    }
}

// ── Market clock ─────────────────────────────────────────────────────

proptest! {
    /// Same-day session: open exactly when open <= now <= close.
    #[test]
    fn same_day_session_membership(
        open in 0..(12 * 60_u32),
        length in 0..(12 * 60_u32),
        now in arb_minute(),
    ) {
        let close = open + length;
        let session = TradingSession::new(&hhmm(open), &hhmm(close), "UTC").unwrap();
        let expected = open <= now && now <= close;
        prop_assert_eq!(clock::is_open(&session, utc_at(last_day(), now)), expected);
    }

    /// Wrapping session: open everywhere except strictly between close and open.
    #[test]
    fn wrapping_session_membership(
        close in 0..(12 * 60_u32),
        gap in 1..(12 * 60_u32),
        now in arb_minute(),
    ) {
        let open = close + gap;
        let session = TradingSession::new(&hhmm(open), &hhmm(close), "UTC").unwrap();
        prop_assert!(session.wraps_midnight());
        let in_gap = close < now && now < open;
        prop_assert_eq!(clock::is_open(&session, utc_at(last_day(), now)), !in_gap);
    }
}
