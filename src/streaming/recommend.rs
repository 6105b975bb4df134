// Recommendation aggregator: ranks opportunities and produces the summary.
// Pure presentation/ranking pass; no recomputation.

use serde::{Deserialize, Serialize};

use crate::streaming::optimizer::StreamingOpportunity;

/// Default cap on returned opportunities.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Terminal output artifact of one optimizer invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingRecommendation {
    /// Best first.
    pub opportunities: Vec<StreamingOpportunity>,
    pub total_opportunities: usize,
    pub droppable_players_analyzed: usize,
    pub pickup_candidates_analyzed: usize,
    pub summary: String,
}

impl StreamingRecommendation {
    /// Highest (improvement, total_games) opportunity, if any.
    pub fn best_opportunity(&self) -> Option<&StreamingOpportunity> {
        self.opportunities
            .iter()
            .max_by_key(|o| (o.improvement, o.total_games))
    }

    /// Opportunities involving a player on either side, case-insensitive
    /// substring match.
    pub fn opportunities_for_player(&self, name: &str) -> Vec<&StreamingOpportunity> {
        let name_lower = name.to_lowercase();
        self.opportunities
            .iter()
            .filter(|o| {
                o.drop_player.name.to_lowercase().contains(&name_lower)
                    || o.pickup_player.name.to_lowercase().contains(&name_lower)
            })
            .collect()
    }

    pub fn top_opportunities(&self, n: usize) -> Vec<&StreamingOpportunity> {
        let mut sorted: Vec<&StreamingOpportunity> = self.opportunities.iter().collect();
        sorted.sort_by(|a, b| {
            (b.improvement, b.total_games).cmp(&(a.improvement, a.total_games))
        });
        sorted.truncate(n);
        sorted
    }
}

fn summary_message(
    opportunities: &[StreamingOpportunity],
    drop_count: usize,
    pickup_count: usize,
) -> String {
    match opportunities.first() {
        Some(best) => format!(
            "Found {} streaming opportunities to maximize games played.\n\
             Best opportunity: {}\n\
             Total droppable players analyzed: {drop_count}\n\
             Total pickup candidates analyzed: {pickup_count}",
            opportunities.len(),
            best.reasoning
        ),
        None => format!(
            "No beneficial streaming opportunities found.\n\
             Analyzed {drop_count} droppable players and {pickup_count} pickup candidates."
        ),
    }
}

/// Sort opportunities by (improvement, total_games) descending, truncate to
/// `max_results`, and attach a human-readable summary. The sort is stable, so
/// fully tied opportunities keep their discovery order.
pub fn rank_and_summarize(
    mut opportunities: Vec<StreamingOpportunity>,
    drop_count: usize,
    pickup_count: usize,
    max_results: usize,
) -> StreamingRecommendation {
    opportunities.sort_by(|a, b| (b.improvement, b.total_games).cmp(&(a.improvement, a.total_games)));
    opportunities.truncate(max_results);

    let summary = summary_message(&opportunities, drop_count, pickup_count);
    StreamingRecommendation {
        total_opportunities: opportunities.len(),
        droppable_players_analyzed: drop_count,
        pickup_candidates_analyzed: pickup_count,
        summary,
        opportunities,
    }
}
