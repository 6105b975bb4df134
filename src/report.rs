// Plain-text report rendering for the weekly recommendation email. The
// transport (SMTP etc.) lives outside this crate; this module only builds the
// subject and body.

use chrono::NaiveDate;

use crate::streaming::recommend::StreamingRecommendation;

/// Email subject line for a window starting on `window_start`.
pub fn subject_line(window_start: NaiveDate) -> String {
    format!(
        "Fantasy Hockey Weekly Analysis - Week of {}",
        window_start.format("%b %-d")
    )
}

/// Render the recommendation into a plain-text email body with generous
/// spacing. Opportunities are listed best first with their reasoning and
/// tier context.
pub fn render_body(
    recommendation: &StreamingRecommendation,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> String {
    let mut body = String::new();

    body.push_str("Hi there!\n\n");
    body.push_str(&format!(
        "Here are this week's streaming recommendations for {window_start} through {window_end}.\n\n"
    ));

    if recommendation.opportunities.is_empty() {
        body.push_str("No beneficial streaming opportunities were found this week.\n\n");
    } else {
        for (i, opp) in recommendation.opportunities.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", i + 1, opp.reasoning));

            if let (Some(drop_q), Some(pickup_q)) =
                (&opp.drop_player.quality, &opp.pickup_player.quality)
            {
                body.push_str(&format!(
                    "   Dropping: {} ({}, {:.2} fantasy PPG). Picking up: {} ({}, {:.2} fantasy PPG).\n",
                    opp.drop_player.name,
                    drop_q.tier,
                    drop_q.ppg,
                    opp.pickup_player.name,
                    pickup_q.tier,
                    pickup_q.ppg,
                ));
            }
            body.push('\n');
        }
    }

    body.push_str("Summary:\n");
    body.push_str(&recommendation.summary);
    body.push('\n');

    body
}
