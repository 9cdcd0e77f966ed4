//! Search input, match selector and the ranked recommendation table.

use galaxy_search::{Outcome, Recommendations};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap};

use super::{App, Focus};
use crate::commands::table::{relevance_bar, BAR_WIDTH};

pub fn render(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Matches and results
        ])
        .split(area);

    render_input(frame, app, chunks[0]);

    match &app.outcome {
        Outcome::Recommendations(recs) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                .split(chunks[1]);
            render_matches(frame, recs, columns[0]);
            render_table(frame, app, recs, columns[1]);
        }
        other => {
            let color = match other {
                Outcome::EmptyFilter => Color::Red,
                Outcome::NoMatchesFound { .. } => Color::Yellow,
                _ => Color::DarkGray,
            };
            let message = Paragraph::new(other.message().unwrap_or_default())
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Recommendations "));
            frame.render_widget(message, chunks[1]);
        }
    }
}

fn render_input(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let editing = app.focus == Focus::Search;
    let border = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if editing {
        format!("{}_", app.query)
    } else {
        app.query.clone()
    };
    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search for a song "),
    );
    frame.render_widget(input, area);
}

fn render_matches(frame: &mut Frame, recs: &Recommendations<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = recs
        .matches
        .iter()
        .map(|track| ListItem::new(track.label()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Matches ({}) ", recs.matches.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(recs.pick));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_table(frame: &mut Frame, app: &App<'_>, recs: &Recommendations<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Artist"),
        Cell::from("Genre"),
        Cell::from("Pop"),
        Cell::from("Distance"),
        Cell::from("Relevance"),
    ])
    .height(1);

    let rows: Vec<Row<'_>> = recs
        .ranked
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let track = candidate.track;
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(track.name.clone()),
                Cell::from(track.artist.clone()),
                Cell::from(track.genre.clone())
                    .style(Style::default().fg(app.genre_color(&track.genre))),
                Cell::from(format!("{}", track.popularity)),
                Cell::from(format!("{:.5}", candidate.distance)),
                Cell::from(format!(
                    "{} {:.2}",
                    relevance_bar(candidate.relevance, BAR_WIDTH),
                    candidate.relevance
                ))
                .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Length(12),
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Length(16),
    ];

    let title = format!(
        " {} similar to {}  ({}) ",
        recs.ranked.len(),
        recs.selected.label(),
        count_label(recs)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// "count 10 of 5, 10, 15", or every candidate when no step fits.
fn count_label(recs: &Recommendations<'_>) -> String {
    let options = recs.counts.options();
    if options.is_empty() {
        return format!("all {} candidates", recs.counts.candidates());
    }
    let options: Vec<String> = options.iter().map(ToString::to_string).collect();
    format!("count {} of {}", recs.count, options.join(", "))
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use galaxy_core::Config;

    use galaxy_core::Track;
    use galaxy_search::{recommend_for_query, Outcome, Request};

    use super::super::tests::{catalog, press, screen, type_text};
    use super::super::App;
    use super::count_label;

    #[test]
    fn test_prompt_before_query() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('2'));
        assert!(screen(&app).contains("Type a song name to get recommendations."));
    }

    #[test]
    fn test_no_matches_warning() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "nothing like this");
        assert!(screen(&app).contains("No songs found with that name."));
    }

    #[test]
    fn test_results_table() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "the bells");
        let screen = screen(&app);
        assert!(screen.contains("The Bells by Jeff Mills"));
        assert!(screen.contains("Strings of Life"));
        assert!(screen.contains("Relevance"));
        assert!(screen.contains("count 5 of 5, 10"));
        assert!(!screen.contains("[5, 10]"));
    }

    #[test]
    fn test_count_label_with_few_candidates() {
        let tracks = [
            Track::new("a", "Alpha", "One", "techno", 50, (0.0, 0.0)),
            Track::new("b", "Beta", "Two", "techno", 50, (1.0, 0.0)),
            Track::new("c", "Gamma", "Three", "techno", 50, (2.0, 0.0)),
        ];
        let filtered: Vec<&Track> = tracks.iter().collect();
        let request = Request {
            query: "alpha",
            pick: 0,
            count: None,
            max_recommendations: 100,
        };
        let Outcome::Recommendations(recs) = recommend_for_query(&filtered, &request) else {
            panic!("expected recommendations");
        };
        assert_eq!(count_label(&recs), "all 2 candidates");
    }
}
