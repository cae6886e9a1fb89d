//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{format_price, summary_line};
use super::models::{OccupancyCounts, PriceQuote};
use crate::booking::BookingPhase;

pub const CURRENCY: &str = "NGN";

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    /// Rounded display string, e.g. `₦150,001`
    pub display: String,
}

impl MoneyResponse {
    pub fn ngn(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
            display: format_price(amount),
        }
    }
}

/// Response for a live quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub phase: BookingPhase,
    pub nights: u32,
    pub display_nights: u32,
    pub nightly_rate: MoneyResponse,
    pub date_specific: bool,
    pub total: MoneyResponse,
    pub caution_fee: MoneyResponse,
    pub summary: String,
}

impl QuoteResponse {
    pub fn new(phase: BookingPhase, quote: &PriceQuote, occupancy: &OccupancyCounts) -> Self {
        Self {
            phase,
            nights: quote.nights,
            display_nights: quote.display_nights(),
            nightly_rate: MoneyResponse::ngn(quote.effective_rate),
            date_specific: quote.date_specific,
            total: MoneyResponse::ngn(quote.total),
            caution_fee: MoneyResponse::ngn(quote.caution_fee),
            summary: summary_line(quote.display_nights(), occupancy.guests()),
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_response_serializes_amounts_as_strings() {
        let quote = PriceQuote {
            nights: 3,
            effective_rate: dec!(50000),
            date_specific: false,
            total: dec!(150001),
            caution_fee: dec!(15000.1),
        };
        let body = QuoteResponse::new(
            BookingPhase::PriceResolved,
            &quote,
            &OccupancyCounts::new(2, 0, 1),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["phase"], "price_resolved");
        assert_eq!(json["total"]["amount"], "150001");
        assert_eq!(json["total"]["display"], "₦150,001");
        assert_eq!(json["caution_fee"]["amount"], "15000.1");
        assert_eq!(json["summary"], "3 nights · 2 guests");
    }
}
