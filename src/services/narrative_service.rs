use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    CorrelationDirection, CorrelationStrength, EconomicRiskLevel, HealthComponents, HealthTrend,
    InsightTrend, Significance, TrendDirection, TrendResult,
};

/// Narratives are kept strictly below this many characters.
pub const MAX_NARRATIVE_CHARS: usize = 1000;

const TEMPORAL_WORDS: [&str; 6] = ["period", "month", "quarter", "year", "week", "recent"];

const PERIOD_SUFFIX: &str = " (latest period)";

/// Numbers an indicator insight is narrated from.
#[derive(Debug, Clone)]
pub struct InsightFacts<'a> {
    pub indicator_name: &'a str,
    pub category: &'a str,
    pub as_of: NaiveDate,
    pub current_value: f64,
    pub previous_value: f64,
    pub change_percent: f64,
    pub trend: InsightTrend,
    pub significance: Significance,
    pub trend_analysis: &'a TrendResult,
}

/// Summary of the full available history of an indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalStats {
    pub observations: usize,
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub percentile: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct HealthFacts {
    pub overall_score: u8,
    pub components: HealthComponents,
    pub trend: HealthTrend,
    pub risk_level: EconomicRiskLevel,
}

#[derive(Debug, Clone)]
pub struct CorrelationFacts<'a> {
    pub indicator_a: &'a str,
    pub indicator_b: &'a str,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    pub sample_size: usize,
}

/// Turns computed fields into prose. Implementations must be pure and
/// deterministic; output is passed through [`finalize`] by [`Narrator`].
pub trait NarrativeGenerator: Send + Sync {
    fn insight_narrative(&self, facts: &InsightFacts<'_>) -> String;
    fn investment_implication(&self, facts: &InsightFacts<'_>) -> String;
    fn historical_context(&self, indicator_name: &str, stats: Option<&HistoricalStats>) -> String;
    fn health_narrative(&self, facts: &HealthFacts) -> String;
    fn correlation_narrative(&self, facts: &CorrelationFacts<'_>) -> String;
}

/// Applies the narrative contract on top of any [`NarrativeGenerator`].
#[derive(Clone)]
pub struct Narrator {
    generator: Arc<dyn NarrativeGenerator>,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::new(Arc::new(TemplateNarrator))
    }
}

impl Narrator {
    pub fn new(generator: Arc<dyn NarrativeGenerator>) -> Self {
        Self { generator }
    }

    pub fn insight(&self, facts: &InsightFacts<'_>) -> (String, String) {
        (
            finalize(self.generator.insight_narrative(facts)),
            finalize(self.generator.investment_implication(facts)),
        )
    }

    pub fn historical_context(&self, indicator_name: &str, stats: Option<&HistoricalStats>) -> String {
        finalize(self.generator.historical_context(indicator_name, stats))
    }

    pub fn health(&self, facts: &HealthFacts) -> String {
        finalize(self.generator.health_narrative(facts))
    }

    /// The keyword check runs on the finalized text so truncation cannot drop it.
    pub fn correlation(&self, facts: &CorrelationFacts<'_>) -> String {
        let text = self.generator.correlation_narrative(facts);
        let out = finalize(text.clone());
        if out.to_lowercase().contains("correlation") {
            out
        } else {
            finalize(format!("Correlation note: {}", text))
        }
    }
}

/// Enforce the narrative contract: non-empty, starts with a capital letter,
/// references a period, and stays below [`MAX_NARRATIVE_CHARS`].
pub fn finalize(text: String) -> String {
    let trimmed = text.trim();
    let mut out = if trimmed.is_empty() {
        String::from("No notable change this period.")
    } else {
        lead_with_capital(trimmed)
    };

    let budget = MAX_NARRATIVE_CHARS - 1 - PERIOD_SUFFIX.len();
    if out.chars().count() > budget {
        out = out.chars().take(budget - 3).collect::<String>();
        out.push_str("...");
    }

    let lower = out.to_lowercase();
    if !TEMPORAL_WORDS.iter().any(|w| lower.contains(w)) {
        out.push_str(PERIOD_SUFFIX);
    }
    out
}

/// Text that cannot be capitalized (a leading digit or symbol, as in
/// "10-Year Treasury Yield") gets a capitalized lead-in instead.
fn lead_with_capital(text: &str) -> String {
    let capitalized = capitalize(text);
    if capitalized.chars().next().is_some_and(char::is_uppercase) {
        capitalized
    } else {
        format!("Latest period: {}", capitalized)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn describe_change(change_percent: f64) -> String {
    if change_percent.is_infinite() {
        "moved off a zero base".to_string()
    } else if change_percent.is_nan() {
        "was unchanged at zero".to_string()
    } else if change_percent > 0.0 {
        format!("rose {:.2}%", change_percent)
    } else if change_percent < 0.0 {
        format!("fell {:.2}%", change_percent.abs())
    } else {
        "held steady".to_string()
    }
}

/// 1 -> "1st", 22 -> "22nd", 13 -> "13th".
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Plain string templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl NarrativeGenerator for TemplateNarrator {
    fn insight_narrative(&self, facts: &InsightFacts<'_>) -> String {
        let trend_note = match facts.trend_analysis.direction {
            TrendDirection::Up if facts.trend_analysis.duration > 1 => format!(
                " It has now advanced for {} consecutive periods.",
                facts.trend_analysis.duration
            ),
            TrendDirection::Down if facts.trend_analysis.duration > 1 => format!(
                " It has now declined for {} consecutive periods.",
                facts.trend_analysis.duration
            ),
            TrendDirection::Sideways => " The broader trend remains range-bound.".to_string(),
            _ => String::new(),
        };

        format!(
            "{} {} in the latest period ending {}, from {:.2} to {:.2}. The move is rated {} significance for an indicator in the {} category.{}",
            facts.indicator_name,
            describe_change(facts.change_percent),
            facts.as_of.format("%Y-%m-%d"),
            facts.previous_value,
            facts.current_value,
            facts.significance.as_str(),
            facts.category.replace('_', " "),
            trend_note,
        )
    }

    fn investment_implication(&self, facts: &InsightFacts<'_>) -> String {
        if facts.significance == Significance::Low || facts.trend == InsightTrend::Stable {
            return format!(
                "This period's change in {} is within its normal range and is unlikely to shift positioning on its own.",
                facts.indicator_name
            );
        }

        let rising = facts.trend == InsightTrend::Rising;
        let category = facts.category.to_ascii_lowercase();
        let body = match (category.as_str(), rising) {
            ("employment", true) => "a softening labor market tends to favor defensive sectors and duration over cyclicals",
            ("employment", false) => "an improving labor market tends to support consumer spending and cyclical sectors",
            ("inflation", true) => "firmer price pressure raises the odds of tighter policy and weighs on long-duration assets",
            ("inflation", false) => "easing price pressure gives policymakers room and tends to support bonds and growth equities",
            ("market_indices", true) => "rising equity prices reflect improving risk appetite, though valuations deserve attention",
            ("market_indices", false) => "falling equity prices signal risk aversion; diversification and liquidity matter more",
            (_, true) => "an upward move of this size warrants reviewing exposure to related assets",
            (_, false) => "a downward move of this size warrants reviewing exposure to related assets",
        };

        format!(
            "With {} significance this period, {}. Consider how {} feeds into your allocation.",
            facts.significance.as_str(),
            body,
            facts.indicator_name
        )
    }

    fn historical_context(&self, indicator_name: &str, stats: Option<&HistoricalStats>) -> String {
        match stats {
            Some(s) => {
                let below_high = if s.latest >= s.max {
                    ", at the high for the period".to_string()
                } else if s.max != 0.0 {
                    format!(", {:.1}% below the period high", (s.max - s.latest) / s.max.abs() * 100.0)
                } else {
                    String::new()
                };
                format!(
                    "Over the period from {} to {} ({} observations), {} ranged from {:.2} to {:.2} with an average of {:.2}. The latest reading sits at the {} percentile of that history{}.",
                    s.first_date.format("%Y-%m-%d"),
                    s.last_date.format("%Y-%m-%d"),
                    s.observations,
                    indicator_name,
                    s.min,
                    s.max,
                    s.mean,
                    ordinal(s.percentile.round() as u32),
                    below_high,
                )
            }
            None => format!(
                "Limited history is available for {}, so the latest period cannot yet be placed in a long-run range.",
                indicator_name
            ),
        }
    }

    fn health_narrative(&self, facts: &HealthFacts) -> String {
        let labelled = facts.components.labelled();
        let strongest = labelled
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|c| c.0)
            .unwrap_or("labor market");
        let weakest = labelled
            .iter()
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|c| c.0)
            .unwrap_or("labor market");

        let spread = labelled
            .iter()
            .map(|c| c.1)
            .fold(f64::NEG_INFINITY, f64::max)
            - labelled.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let leaders = if spread > 0.0 {
            format!(
                " The {} component is the strongest contributor while {} is the weakest.",
                strongest, weakest
            )
        } else {
            " All five components sit at the same level.".to_string()
        };

        let outlook = match facts.trend {
            HealthTrend::Improving => "conditions lean favorable",
            HealthTrend::Deteriorating => "conditions lean unfavorable",
            HealthTrend::Stable => "conditions are broadly balanced",
        };

        format!(
            "The economy scores {}/100 for the current period with {} risk; {}.{}",
            facts.overall_score,
            facts.risk_level.as_str(),
            outlook,
            leaders,
        )
    }

    fn correlation_narrative(&self, facts: &CorrelationFacts<'_>) -> String {
        let movement = match facts.direction {
            CorrelationDirection::Positive => "tend to move together",
            CorrelationDirection::Negative => "tend to move in opposite directions",
        };
        format!(
            "{} and {} show a {} {} correlation (r = {:.2}) over the most recent {} aligned periods; they {}.",
            facts.indicator_a,
            facts.indicator_b,
            facts.strength.as_str(),
            facts.direction.as_str(),
            facts.coefficient,
            facts.sample_size,
            movement,
        )
    }
}
