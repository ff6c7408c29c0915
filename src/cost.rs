//! Token pricing and session cost accounting.
//!
//! Prices are quoted in USD per million tokens.  Costs are carried as `f64`
//! at full precision; rounding to six places happens only when a value is
//! formatted for display.

use std::fmt;

use crate::types::UsageMetadata;

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// The published price bands for Gemini 3 Pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingTier {
    /// Prompts of at most 200k tokens.
    #[default]
    Standard,
    /// Prompts longer than 200k tokens.
    LongContext,
}

impl PricingTier {
    /// The unit prices for this tier.
    pub fn pricing(self) -> Pricing {
        match self {
            PricingTier::Standard => Pricing::new(2.00, 12.00),
            PricingTier::LongContext => Pricing::new(4.00, 18.00),
        }
    }

    /// The context bound this tier applies to, as shown to the user.
    pub fn context_label(self) -> &'static str {
        match self {
            PricingTier::Standard => "<=200k context",
            PricingTier::LongContext => ">200k context",
        }
    }
}

/// A fixed pair of unit prices, in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// Price per million prompt tokens.
    pub input_per_million: f64,
    /// Price per million candidate tokens.
    pub output_per_million: f64,
}

impl Pricing {
    /// Create a pricing pair.
    pub const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    /// The cost of one turn.
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_cost = (input_tokens as f64 / TOKENS_PER_UNIT) * self.input_per_million;
        let output_cost = (output_tokens as f64 / TOKENS_PER_UNIT) * self.output_per_million;
        input_cost + output_cost
    }

    /// Price a turn from the usage the API reported.
    pub fn turn_cost(&self, usage: &UsageMetadata) -> TurnCost {
        TurnCost {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
            cost: self.cost(usage.prompt_token_count, usage.candidates_token_count),
        }
    }
}

impl fmt::Display for Pricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}/M in, ${}/M out",
            self.input_per_million, self.output_per_million
        )
    }
}

/// Token counts and cost for a single turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnCost {
    /// Prompt tokens billed at the input price.
    pub input_tokens: u64,
    /// Candidate tokens billed at the output price.
    pub output_tokens: u64,
    /// Total tokens as reported by the API.
    pub total_tokens: u64,
    /// Cost in USD.
    pub cost: f64,
}

/// Running cost for the whole session.
///
/// Starts at zero and only ever grows by the cost of a successful turn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionCost {
    total: f64,
    turns: u64,
}

impl SessionCost {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one turn's cost and return the new total.
    pub fn record(&mut self, turn: &TurnCost) -> f64 {
        self.total += turn.cost;
        self.turns += 1;
        self.total
    }

    /// Total cost so far in USD.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of turns that contributed to the total.
    pub fn turns(&self) -> u64 {
        self.turns
    }
}

/// Format a USD amount the way every cost is shown: `$0.000000`.
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn standard() -> Pricing {
        PricingTier::Standard.pricing()
    }

    #[test]
    fn zero_tokens_cost_nothing() {
        assert_eq!(standard().cost(0, 0), 0.0);
        assert_eq!(PricingTier::LongContext.pricing().cost(0, 0), 0.0);
    }

    #[test]
    fn cost_matches_formula() {
        let pricing = standard();
        for (i, o) in [(1, 0), (0, 1), (5, 2), (50, 20), (123_456, 7_890), (1_000_000, 1_000_000)] {
            let expected = i as f64 / 1e6 * 2.0 + o as f64 / 1e6 * 12.0;
            assert!((pricing.cost(i, o) - expected).abs() < EPSILON, "{i} {o}");
        }
        assert!((pricing.cost(1_000_000, 1_000_000) - 14.0).abs() < EPSILON);
    }

    #[test]
    fn cost_is_monotonic() {
        let pricing = standard();
        let mut last = 0.0;
        for i in (0..10_000).step_by(97) {
            let c = pricing.cost(i, 100);
            assert!(c >= last);
            last = c;
        }
        let mut last = 0.0;
        for o in (0..10_000).step_by(89) {
            let c = pricing.cost(100, o);
            assert!(c >= last);
            last = c;
        }
    }

    #[test]
    fn worked_turns() {
        let pricing = standard();
        let mut session = SessionCost::new();

        let first = pricing.turn_cost(&UsageMetadata::new(5, 2, 7));
        assert!((first.cost - 0.000034).abs() < EPSILON);
        session.record(&first);
        assert!((session.total() - 0.000034).abs() < EPSILON);

        let second = pricing.turn_cost(&UsageMetadata::new(50, 20, 70));
        assert!((second.cost - 0.00034).abs() < EPSILON);
        session.record(&second);
        assert!((session.total() - 0.000374).abs() < EPSILON);
        assert_eq!(session.turns(), 2);
        assert_eq!(format_usd(session.total()), "$0.000374");
    }

    #[test]
    fn summation_order_does_not_change_display() {
        let pricing = standard();
        let turns: Vec<TurnCost> = [(5, 2), (50, 20), (1_234, 567), (98_765, 4_321), (7, 0)]
            .iter()
            .map(|&(i, o)| pricing.turn_cost(&UsageMetadata::new(i, o, i + o)))
            .collect();

        let mut forward = SessionCost::new();
        turns.iter().for_each(|t| {
            forward.record(t);
        });
        let mut backward = SessionCost::new();
        turns.iter().rev().for_each(|t| {
            backward.record(t);
        });

        let exact: f64 = turns.iter().map(|t| t.cost).sum();
        assert!((forward.total() - exact).abs() < EPSILON);
        assert!((forward.total() - backward.total()).abs() < EPSILON);
        assert_eq!(format_usd(forward.total()), format_usd(backward.total()));
    }

    #[test]
    fn turn_cost_uses_prompt_and_candidates_only() {
        let usage = UsageMetadata::new(50, 20, 190).with_thoughts_token_count(120);
        let turn = standard().turn_cost(&usage);
        assert_eq!(turn.total_tokens, 190);
        assert!((turn.cost - 0.00034).abs() < EPSILON);
    }

    #[test]
    fn pricing_display() {
        assert_eq!(standard().to_string(), "$2/M in, $12/M out");
        assert_eq!(
            PricingTier::LongContext.pricing().to_string(),
            "$4/M in, $18/M out"
        );
        assert_eq!(PricingTier::default(), PricingTier::Standard);
    }
}
