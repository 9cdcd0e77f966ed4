//! Scatter view of the filtered tracks, one dataset per genre.

use galaxy_core::model::Bounds;
use galaxy_search::Outcome;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap,
};

use super::App;

/// Fraction of the data span added on each side of the axes.
const PADDING: f64 = 0.05;

/// Points for one chart layer.
struct Layer {
    name: String,
    color: Color,
    marker: Marker,
    points: Vec<(f64, f64)>,
}

pub fn render(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Galaxy Explorer ");

    let Some(bounds) = Bounds::enclosing(app.filtered.iter().map(|t| t.position)) else {
        let message = Paragraph::new(app.outcome.message().unwrap_or_default())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(message, area);
        return;
    };

    let layers = layers(app);
    let datasets: Vec<Dataset<'_>> = layers
        .iter()
        .map(|layer| {
            Dataset::default()
                .name(layer.name.as_str())
                .marker(layer.marker)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(layer.color))
                .data(&layer.points)
        })
        .collect();

    let (x_min, x_max) = padded(bounds.min.x, bounds.max.x);
    let (y_min, y_max) = padded(bounds.min.y, bounds.max.y);

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .title("x")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels([format!("{x_min:.1}"), format!("{x_max:.1}")]),
        )
        .y_axis(
            Axis::default()
                .title("y")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels([format!("{y_min:.1}"), format!("{y_max:.1}")]),
        );
    frame.render_widget(chart, area);
}

/// Genre layers in catalog order, then the current recommendation on top.
fn layers(app: &App<'_>) -> Vec<Layer> {
    let mut layers: Vec<Layer> = app
        .genres
        .iter()
        .filter_map(|genre| {
            let points: Vec<(f64, f64)> = app
                .filtered
                .iter()
                .filter(|t| t.genre == *genre)
                .map(|t| (t.position.x, t.position.y))
                .collect();
            (!points.is_empty()).then(|| Layer {
                name: (*genre).to_string(),
                color: app.genre_color(genre),
                marker: Marker::Braille,
                points,
            })
        })
        .collect();

    if let Outcome::Recommendations(recs) = &app.outcome {
        layers.push(Layer {
            name: "neighbors".to_string(),
            color: Color::White,
            marker: Marker::Dot,
            points: recs
                .ranked
                .iter()
                .map(|c| (c.track.position.x, c.track.position.y))
                .collect(),
        });
        layers.push(Layer {
            name: recs.selected.label(),
            color: Color::LightRed,
            marker: Marker::Block,
            points: vec![(recs.selected.position.x, recs.selected.position.y)],
        });
    }

    layers
}

fn padded(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 { span * PADDING } else { 1.0 };
    (min - pad, max + pad)
}
