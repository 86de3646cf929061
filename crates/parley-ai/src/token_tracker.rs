//! Token usage tracking per model.

use std::collections::HashMap;

use crate::TokenUsage;

/// Tracks cumulative token usage per model and overall.
pub struct TokenTracker {
    /// Total usage across all models.
    total: TokenUsage,
    /// Usage broken down by model identifier.
    by_model: HashMap<String, TokenUsage>,
    /// Number of successful API calls.
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self {
            total: TokenUsage::default(),
            by_model: HashMap::new(),
            call_count: 0,
        }
    }

    /// Record token usage from an API call.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        add(&mut self.total, usage);
        add(self.by_model.entry(model.to_string()).or_default(), usage);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_model(&self, model: &str) -> Option<&TokenUsage> {
        self.by_model.get(model)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        self.total = TokenUsage::default();
        self.by_model.clear();
        self.call_count = 0;
    }
}

fn add(acc: &mut TokenUsage, usage: &TokenUsage) {
    acc.input_tokens = acc.input_tokens.saturating_add(usage.input_tokens);
    acc.output_tokens = acc.output_tokens.saturating_add(usage.output_tokens);
}

impl Default for TokenTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u64, output: u64) -> TokenUsage {
        TokenUsage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn records_totals_and_per_model() {
        let mut tracker = TokenTracker::new();
        tracker.record("gemini-2.5-flash", &usage(10, 5));
        tracker.record("gemini-2.5-flash", &usage(3, 2));
        tracker.record("gemini-2.5-pro", &usage(1, 1));

        assert_eq!(tracker.call_count(), 3);
        assert_eq!(tracker.total_tokens(), 22);
        assert_eq!(tracker.for_model("gemini-2.5-flash"), Some(&usage(13, 7)));
        assert_eq!(tracker.for_model("gemini-2.5-pro"), Some(&usage(1, 1)));
        assert!(tracker.for_model("other").is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = TokenTracker::new();
        tracker.record("m", &usage(4, 4));
        tracker.reset();
        assert_eq!(tracker.call_count(), 0);
        assert_eq!(tracker.total(), &TokenUsage::default());
        assert!(tracker.for_model("m").is_none());
    }
}
