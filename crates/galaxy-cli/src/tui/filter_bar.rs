//! Genre chips and the popularity floor, shared by every tab.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::App;

pub fn render(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let mut chips: Vec<Span<'_>> = vec![Span::styled(
        "Genres: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (i, genre) in app.genres.iter().enumerate() {
        let selected = app.criteria.is_selected(genre);
        let marker = if selected { "[x]" } else { "[ ]" };
        let mut style = if selected {
            Style::default().fg(app.genre_color(genre))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if i == app.genre_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        chips.push(Span::styled(format!("{marker} {genre}"), style));
        chips.push(Span::raw("  "));
    }

    let status = Line::from(vec![
        Span::styled(
            format!("Min popularity: {}", app.criteria.min_popularity()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(
            "   Showing {} of {} tracks",
            app.filtered.len(),
            app.catalog().len()
        )),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(chips), status])
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use galaxy_core::Config;

    use super::super::tests::{catalog, press, screen};
    use super::super::App;

    #[test]
    fn test_shows_counts_and_genres() {
        let catalog = catalog();
        let app = App::new(&catalog, &Config::default());
        let screen = screen(&app);
        assert!(screen.contains("[x] techno"));
        assert!(screen.contains("[x] ambient"));
        assert!(screen.contains("Showing 15 of 16 tracks"));
    }

    #[test]
    fn test_deselected_genre_marker() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char(' '));
        let screen = screen(&app);
        assert!(screen.contains("[ ] techno"));
        assert!(screen.contains("Showing 1 of 16 tracks"));
    }
}
