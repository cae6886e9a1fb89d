//! Core booking price calculation functions.
//!
//! Pure functions for pricing math - no network access, no state.

use chrono::NaiveDateTime;
use rust_decimal::prelude::*;

use crate::pricing::models::AvailabilityRecord;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use aparte_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Number of nights between check-in and check-out.
///
/// Returns 0 when either end is missing or check-out is not after check-in;
/// callers treat 0 as "undetermined". Partial days always round up so a stay
/// is never undercharged.
pub fn calculate_nights(
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
) -> u32 {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return 0;
    };

    let millis = (check_out - check_in).num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    // ceil(millis / day) without going through floats
    let nights = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(nights).unwrap_or(u32::MAX)
}

/// Turn availability records into a date-specific nightly rate.
///
/// The first record carrying a positive price wins. Records without one carry
/// no rate, so the base price keeps applying.
pub fn date_specific_price(records: &[AvailabilityRecord]) -> Option<Decimal> {
    records
        .iter()
        .filter_map(|r| r.price)
        .find(|p| *p > Decimal::ZERO)
}

/// Pick the nightly rate to charge.
///
/// A date-specific price always wins over the base price. With neither, the
/// rate is zero, which means "price unknown".
pub fn resolve_effective_rate(base_price: Option<Decimal>, date_price: Option<Decimal>) -> Decimal {
    date_price.or(base_price).unwrap_or(Decimal::ZERO)
}

/// Total charge for a stay: `rate * nights + pets`.
///
/// Pets add a flat amount equal to the pet count, not a per-pet fee.
/// Returns `None` if the total does not fit in a `Decimal`.
pub fn calculate_total(rate: Decimal, nights: u32, pets: u32) -> Option<Decimal> {
    rate.checked_mul(Decimal::from(nights))?
        .checked_add(Decimal::from(pets))
}

/// Caution fee as a fraction of the total; zero without a rate
pub fn calculate_caution_fee(total: Decimal, caution_fee_rate: Option<Decimal>) -> Option<Decimal> {
    total.checked_mul(caution_fee_rate.unwrap_or(Decimal::ZERO))
}

/// Format an amount in Naira with no fractional digits, e.g. `₦150,001`
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_money(amount, 0).normalize();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₦{}", grouped)
    } else {
        format!("₦{}", grouped)
    }
}

/// Short stay summary such as `3 nights · 2 guests`
pub fn summary_line(nights: u32, guests: u32) -> String {
    format!(
        "{} night{} · {} guest{}",
        nights,
        if nights == 1 { "" } else { "s" },
        guests,
        if guests == 1 { "" } else { "s" },
    )
}
