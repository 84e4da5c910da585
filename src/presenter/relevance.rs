//! Relevance Column
//!
//! Unifies score / certainty / distance into one value and bands it.
//! Keyword (BM25) scores are unbounded, so they are banded relative to the
//! best score on the page; semantic and hybrid values are banded absolutely.

use crate::models::{ResultRow, SearchMode};

/// Quality tier, used for colour and label lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    High,
    Medium,
    Low,
}

impl Tier {
    /// Keyword tiers from the percentage of the page maximum
    fn relative(percent: f64) -> Self {
        if percent >= 80.0 {
            Tier::Top
        } else if percent >= 50.0 {
            Tier::High
        } else if percent >= 25.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// Semantic / hybrid tiers from the raw value
    fn absolute(value: f64) -> Self {
        if value >= 0.8 {
            Tier::Top
        } else if value >= 0.6 {
            Tier::High
        } else if value >= 0.4 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(&self, mode: SearchMode) -> &'static str {
        match (mode, self) {
            (SearchMode::Keyword, Tier::Top) => "Best Match",
            (SearchMode::Keyword, Tier::High) => "Good Match",
            (SearchMode::Keyword, Tier::Medium) => "Partial Match",
            (SearchMode::Keyword, Tier::Low) => "Weak Match",
            (_, Tier::Top) => "Excellent",
            (_, Tier::High) => "Good",
            (_, Tier::Medium) => "Fair",
            (_, Tier::Low) => "Weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    pub value: f64,
    /// Percentage of the page maximum (0 when the maximum is not positive)
    pub relative: f64,
    pub tier: Tier,
    pub mode: SearchMode,
    pub explanation: Option<String>,
}

impl Relevance {
    pub fn assess(row: &ResultRow, page_max: f64, mode: SearchMode) -> Option<Self> {
        let value = row.relevance()?;
        let relative = if page_max > 0.0 {
            value / page_max * 100.0
        } else {
            0.0
        };
        let tier = match mode {
            SearchMode::Keyword => Tier::relative(relative),
            SearchMode::Semantic | SearchMode::Hybrid => Tier::absolute(value),
        };

        Some(Self {
            value,
            relative,
            tier,
            mode,
            explanation: row.explain_score.clone().filter(|e| !e.is_empty()),
        })
    }

    pub fn label(&self) -> &'static str {
        self.tier.label(self.mode)
    }

    /// Bar fill percentage, capped at 100
    pub fn fill(&self) -> f64 {
        self.relative.clamp(0.0, 100.0)
    }

    /// Value as shown in the grid
    pub fn display_value(&self) -> String {
        format!("{:.2}", self.value)
    }

    /// Text bar of `width` cells
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.fill() / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }

    /// Multi-line detail: score, level, relative (keyword only) and explanation
    pub fn detail(&self) -> String {
        let mut lines = vec![
            format!("Score: {:.4}", self.value),
            format!("Level: {}", self.label()),
        ];
        if self.mode == SearchMode::Keyword {
            lines.push(format!("Relative: {:.1}%", self.relative));
        }
        if let Some(explanation) = &self.explanation {
            lines.push(String::new());
            lines.push("Explanation:".to_string());
            lines.push(explanation.clone());
        }
        lines.join("\n")
    }
}

/// Largest relevance value on the page, 0 when none is present
pub fn page_max(rows: &[ResultRow]) -> f64 {
    rows.iter()
        .filter_map(ResultRow::relevance)
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: f64) -> ResultRow {
        ResultRow {
            score: Some(score),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_band_is_relative_to_page_max() {
        let rows = vec![scored(10.0), scored(9.0), scored(5.0), scored(3.0), scored(1.0)];
        let max = page_max(&rows);
        assert_eq!(max, 10.0);

        let labels: Vec<&str> = rows
            .iter()
            .map(|r| Relevance::assess(r, max, SearchMode::Keyword).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            vec!["Best Match", "Best Match", "Good Match", "Partial Match", "Weak Match"]
        );
    }

    #[test]
    fn test_semantic_band_is_absolute() {
        let row = ResultRow {
            certainty: Some(0.75),
            ..Default::default()
        };
        // Page max does not matter for semantic banding
        let rel = Relevance::assess(&row, 0.75, SearchMode::Semantic).unwrap();
        assert_eq!(rel.label(), "Good");
        assert_eq!(rel.display_value(), "0.75");

        let labels: Vec<&str> = [0.85, 0.6, 0.45, 0.1]
            .iter()
            .map(|&v| Relevance::assess(&scored(v), 1.0, SearchMode::Hybrid).unwrap().label())
            .collect();
        assert_eq!(labels, vec!["Excellent", "Good", "Fair", "Weak"]);
    }

    #[test]
    fn test_missing_relevance() {
        assert!(Relevance::assess(&ResultRow::default(), 1.0, SearchMode::Semantic).is_none());
        assert_eq!(page_max(&[ResultRow::default()]), 0.0);
    }

    #[test]
    fn test_non_positive_max_gives_zero_relative() {
        let rel = Relevance::assess(&scored(0.0), 0.0, SearchMode::Keyword).unwrap();
        assert_eq!(rel.relative, 0.0);
        assert_eq!(rel.label(), "Weak Match");
        assert_eq!(rel.bar(4), "░░░░");
    }

    #[test]
    fn test_bar_and_detail() {
        let row = ResultRow {
            score: Some(4.0),
            explain_score: Some("BM25F_title_frequency:2".to_string()),
            ..Default::default()
        };
        let rel = Relevance::assess(&row, 8.0, SearchMode::Keyword).unwrap();
        assert_eq!(rel.bar(10), "█████░░░░░");
        assert_eq!(
            rel.detail(),
            "Score: 4.0000\nLevel: Good Match\nRelative: 50.0%\n\nExplanation:\nBM25F_title_frequency:2"
        );

        let semantic = Relevance::assess(&scored(0.9), 0.9, SearchMode::Semantic).unwrap();
        assert_eq!(semantic.detail(), "Score: 0.9000\nLevel: Excellent");
    }
}
