use anyhow::Result;
use galaxy_core::Config;
use galaxy_search::{recommend_for_query, Outcome, Recommendations, Request, ScoredCandidate};
use serde::Serialize;
use std::io::{self, Write};

use super::list::TrackRow;
use super::table::{cell, relevance_bar, BAR_WIDTH};
use crate::FilterArgs;

/// A recommended track with its score.
#[derive(Debug, Serialize)]
struct ScoredRow<'a> {
    #[serde(flatten)]
    track: TrackRow<'a>,
    distance: f64,
    relevance: f64,
}

impl<'a> From<&ScoredCandidate<'a>> for ScoredRow<'a> {
    fn from(candidate: &ScoredCandidate<'a>) -> Self {
        Self {
            track: TrackRow::from(candidate.track),
            distance: candidate.distance,
            relevance: candidate.relevance,
        }
    }
}

/// Search the filtered catalog for `query` and print recommendations.
pub fn run_recommend(
    config: &Config,
    query: &str,
    pick: usize,
    count: Option<usize>,
    filters: &FilterArgs,
    json: bool,
) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let criteria = super::criteria_from_args(catalog, config, filters)?;
    let filtered = criteria.apply(catalog);

    let request = Request {
        query,
        pick,
        count,
        max_recommendations: config.max_recommendations,
    };
    let outcome = recommend_for_query(&filtered, &request);

    if let Outcome::Recommendations(recs) = &outcome {
        if recs.pick != pick {
            log::warn!(
                "Only {} matches for \"{}\", using match {}",
                recs.matches.len(),
                query.trim(),
                recs.pick + 1
            );
        }
        if let Some(requested) = count.filter(|&c| c != recs.count) {
            log::warn!(
                "{} recommendations not offered, showing {}",
                requested,
                recs.count
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
    } else {
        write_outcome(&mut io::stdout().lock(), &outcome)?;
    }
    Ok(())
}

fn outcome_json(outcome: &Outcome<'_>) -> serde_json::Value {
    match outcome {
        Outcome::EmptyFilter => serde_json::json!({
            "status": "empty_filter",
            "message": outcome.message(),
        }),
        Outcome::NoQueryEntered => serde_json::json!({
            "status": "no_query",
            "message": outcome.message(),
        }),
        Outcome::NoMatchesFound { query } => serde_json::json!({
            "status": "no_matches",
            "query": query,
            "message": outcome.message(),
        }),
        Outcome::Recommendations(recs) => serde_json::json!({
            "status": "recommendations",
            "matches": recs.matches.iter().map(|t| TrackRow::from(*t)).collect::<Vec<_>>(),
            "selected": TrackRow::from(recs.selected),
            "count": recs.count,
            "count_options": recs.counts.options(),
            "recommendations": recs.ranked.iter().map(ScoredRow::from).collect::<Vec<_>>(),
        }),
    }
}

/// Write an outcome as text: the message, or matches plus a ranked table.
pub fn write_outcome(out: &mut impl Write, outcome: &Outcome<'_>) -> io::Result<()> {
    match outcome {
        Outcome::Recommendations(recs) => write_recommendations(out, recs),
        Outcome::NoMatchesFound { query } => {
            writeln!(out, "No songs found with a name containing \"{}\".", query)
        }
        _ => writeln!(out, "{}", outcome.message().unwrap_or_default()),
    }
}

fn write_recommendations(out: &mut impl Write, recs: &Recommendations<'_>) -> io::Result<()> {
    writeln!(out, "Matches ({}):", recs.matches.len())?;
    for (i, track) in recs.matches.iter().enumerate() {
        let marker = if i == recs.pick { "→" } else { " " };
        writeln!(out, "  {} {:>3}. {}", marker, i + 1, track.label())?;
    }
    writeln!(out)?;

    if recs.ranked.is_empty() {
        return writeln!(
            out,
            "No other tracks pass the current filters, so there is nothing to recommend for '{}'.",
            recs.selected.label()
        );
    }

    writeln!(
        out,
        "Top {} recommendations for '{}'",
        recs.ranked.len(),
        recs.selected.label()
    )?;
    if !recs.counts.options().is_empty() {
        let options: Vec<String> = recs.counts.options().iter().map(ToString::to_string).collect();
        writeln!(out, "(--count options: {})", options.join(", "))?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>4}  {}  {}  {}  {:>4}  {:>10}  Relevance",
        "#",
        cell("Name", 32),
        cell("Artist", 24),
        cell("Genre", 16),
        "Pop",
        "Distance"
    )?;
    for (i, candidate) in recs.ranked.iter().enumerate() {
        write_candidate_row(out, i + 1, candidate)?;
    }
    Ok(())
}

fn write_candidate_row(
    out: &mut impl Write,
    rank: usize,
    candidate: &ScoredCandidate<'_>,
) -> io::Result<()> {
    let track = candidate.track;
    writeln!(
        out,
        "{:>4}  {}  {}  {}  {:>4}  {:>10.5}  {} {:.2}",
        rank,
        cell(&track.name, 32),
        cell(&track.artist, 24),
        cell(&track.genre, 16),
        track.popularity,
        candidate.distance,
        relevance_bar(candidate.relevance, BAR_WIDTH),
        candidate.relevance
    )
}
