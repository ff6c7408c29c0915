//! Per-turn usage reports.

use crate::cost::{Pricing, PricingTier, SessionCost, TurnCost, format_usd};
use crate::types::Model;

/// Everything the usage table shows for one turn.
///
/// Built after the turn's cost has been added to the session, so
/// `session_total` already includes `turn.cost`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    /// Model identifier, used in the table title.
    pub model_id: String,
    /// This turn's token counts and cost.
    pub turn: TurnCost,
    /// Cost of the whole session so far.
    pub session_total: f64,
    /// The price band in effect.
    pub tier: PricingTier,
    /// The unit prices in effect.
    pub pricing: Pricing,
}

impl UsageReport {
    /// Snapshot a turn against the session accumulator.
    pub fn new(model: &Model, turn: TurnCost, session: &SessionCost, tier: PricingTier) -> Self {
        Self {
            model_id: model.id().to_string(),
            turn,
            session_total: session.total(),
            tier,
            pricing: tier.pricing(),
        }
    }

    /// Table title.
    pub fn title(&self) -> String {
        format!("{} Usage & Cost", self.model_id)
    }

    /// Rows of (metric, current turn, session total).
    pub fn rows(&self) -> [[String; 3]; 4] {
        let dash = || "-".to_string();
        [
            ["Input Tokens".to_string(), self.turn.input_tokens.to_string(), dash()],
            ["Output Tokens".to_string(), self.turn.output_tokens.to_string(), dash()],
            ["Total Tokens".to_string(), self.turn.total_tokens.to_string(), dash()],
            [
                "Est. Cost (USD)".to_string(),
                format_usd(self.turn.cost),
                format_usd(self.session_total),
            ],
        ]
    }

    /// The line naming the pricing tier, shown under the table.
    pub fn pricing_note(&self) -> String {
        format!(
            "Pricing tier based on {}: {}",
            self.tier.context_label(),
            self.pricing
        )
    }
}
