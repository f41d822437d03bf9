//! Pricing engine: pure cost computation for a reservation.
//!
//! Every cost is derived from the owning event's current pricing
//! configuration (see [`EventPricing`]) at the moment of computation —
//! reservations never store a price. All amounts are whole euros; since no
//! component divides, no rounding ever takes place.

use serde::Serialize;
use utoipa::ToSchema;

use super::event::{EventPricing, MinimumSpendMode};

/// Itemized cost of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Minimum spend component in euros.
    pub minimum_spend: i64,
    /// Ticket component in euros (zero when no tickets are needed).
    pub tickets: i64,
    /// Sum of both components.
    pub total: i64,
}

/// Computes the minimum spend component.
///
/// The premium rate applies only when the reservation is premium *and* the
/// event defines a premium minimum spend; otherwise the base rate is used.
/// In [`MinimumSpendMode::PerCapita`] mode the rate is multiplied by the
/// number of guests, in [`MinimumSpendMode::PerTable`] mode it is charged
/// once regardless of group size.
#[must_use]
pub fn minimum_spend_component(people: u32, is_premium: bool, pricing: &EventPricing) -> i64 {
    let rate = if is_premium {
        pricing.minimum_spend_premium.unwrap_or(pricing.minimum_spend)
    } else {
        pricing.minimum_spend
    };
    match pricing.minimum_spend_mode {
        MinimumSpendMode::PerCapita => i64::from(people) * rate,
        MinimumSpendMode::PerTable => rate,
    }
}

/// Computes the ticket component.
///
/// Zero when `tickets_needed` is false; otherwise one ticket per guest at
/// the premium price when the reservation is premium and a premium price is
/// defined, else at the base price.
#[must_use]
pub fn ticket_component(
    people: u32,
    tickets_needed: bool,
    is_premium: bool,
    pricing: &EventPricing,
) -> i64 {
    if !tickets_needed {
        return 0;
    }
    let rate = if is_premium {
        pricing.ticket_price_premium.unwrap_or(pricing.ticket_price)
    } else {
        pricing.ticket_price
    };
    i64::from(people) * rate
}

/// Computes the full itemized cost of a reservation.
#[must_use]
pub fn reservation_cost(
    people: u32,
    tickets_needed: bool,
    is_premium: bool,
    pricing: &EventPricing,
) -> CostBreakdown {
    let minimum_spend = minimum_spend_component(people, is_premium, pricing);
    let tickets = ticket_component(people, tickets_needed, is_premium, pricing);
    CostBreakdown {
        minimum_spend,
        tickets,
        total: minimum_spend + tickets,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn per_capita(minimum_spend: i64, ticket_price: i64) -> EventPricing {
        EventPricing {
            minimum_spend,
            minimum_spend_premium: None,
            ticket_price,
            ticket_price_premium: None,
            minimum_spend_mode: MinimumSpendMode::PerCapita,
        }
    }

    #[test]
    fn no_tickets_means_zero_ticket_component() {
        let pricing = per_capita(50, 30);
        for people in [1, 2, 10, 25] {
            assert_eq!(ticket_component(people, false, false, &pricing), 0);
            assert_eq!(ticket_component(people, false, true, &pricing), 0);
        }
    }

    #[test]
    fn per_capita_scales_linearly_with_people() {
        let pricing = per_capita(50, 30);
        let single = minimum_spend_component(1, false, &pricing);
        for people in 1..=25 {
            assert_eq!(
                minimum_spend_component(people, false, &pricing),
                i64::from(people) * single
            );
        }
    }

    #[test]
    fn per_table_is_constant_regardless_of_people() {
        let pricing = EventPricing {
            minimum_spend_mode: MinimumSpendMode::PerTable,
            ..per_capita(200, 30)
        };
        for people in 1..=25 {
            assert_eq!(minimum_spend_component(people, false, &pricing), 200);
        }
    }

    #[test]
    fn premium_rate_used_only_when_defined() {
        let mut pricing = per_capita(50, 30);
        // Premium flag without premium prices falls back to base rates.
        assert_eq!(minimum_spend_component(4, true, &pricing), 4 * 50);
        assert_eq!(ticket_component(4, true, true, &pricing), 4 * 30);

        pricing.minimum_spend_premium = Some(80);
        pricing.ticket_price_premium = Some(45);
        assert_eq!(minimum_spend_component(4, true, &pricing), 4 * 80);
        assert_eq!(ticket_component(4, true, true, &pricing), 4 * 45);

        // Non-premium reservations never see the premium rates.
        assert_eq!(minimum_spend_component(4, false, &pricing), 4 * 50);
        assert_eq!(ticket_component(4, true, false, &pricing), 4 * 30);
    }

    #[test]
    fn worked_example_per_capita_with_tickets() {
        // people=10, minimumSpend=50 (PerCapita), ticketPrice=30, tickets
        // needed: total = 10*50 + 10*30 = 800.
        let pricing = per_capita(50, 30);
        let cost = reservation_cost(10, true, false, &pricing);
        assert_eq!(cost.minimum_spend, 500);
        assert_eq!(cost.tickets, 300);
        assert_eq!(cost.total, 800);
    }

    #[test]
    fn worked_example_per_table_without_tickets() {
        // PerTable, minimumSpend=200, people=8, no tickets: total = 200.
        let pricing = EventPricing {
            minimum_spend_mode: MinimumSpendMode::PerTable,
            ..per_capita(200, 30)
        };
        let cost = reservation_cost(8, false, false, &pricing);
        assert_eq!(cost.total, 200);
    }

    #[test]
    fn zero_minimum_spend_yields_zero_component() {
        let pricing = per_capita(0, 30);
        assert_eq!(minimum_spend_component(12, false, &pricing), 0);
        assert_eq!(reservation_cost(12, true, false, &pricing).total, 12 * 30);
    }
}
