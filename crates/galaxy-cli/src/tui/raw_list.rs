use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use super::App;

/// Render the filtered catalog as a scrollable table.
pub fn render(frame: &mut Frame, app: &App<'_>, area: Rect) {
    if app.filtered.is_empty() {
        let message = Paragraph::new(app.outcome.message().unwrap_or_default())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Raw List "));
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Track ID"),
        Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Artist"),
        Cell::from("Genre"),
        Cell::from("Pop"),
        Cell::from("x"),
        Cell::from("y"),
    ])
    .height(1);

    // area.height - 2 for borders - 1 for header
    let viewport_height = area.height.saturating_sub(3) as usize;
    let visible_start = app.list_offset;
    let visible_end = (visible_start + viewport_height).min(app.filtered.len());

    let rows: Vec<Row<'_>> = app
        .filtered
        .iter()
        .enumerate()
        .skip(visible_start)
        .take(viewport_height)
        .map(|(i, track)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(track.id.to_string()),
                Cell::from(track.name.clone()),
                Cell::from(track.artist.clone()),
                Cell::from(track.genre.clone())
                    .style(Style::default().fg(app.genre_color(&track.genre))),
                Cell::from(format!("{}", track.popularity)),
                Cell::from(format!("{:.3}", track.position.x)),
                Cell::from(format!("{:.3}", track.position.y)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(24),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Length(12),
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    let title = format!(
        " Raw List  {}-{} of {} ",
        visible_start + 1,
        visible_end,
        app.filtered.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use galaxy_core::Config;

    use super::super::tests::{catalog, press, screen};
    use super::super::App;

    #[test]
    fn test_lists_filtered_tracks() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('3'));
        let screen = screen(&app);
        assert!(screen.contains("The Bells"));
        assert!(screen.contains("Can You Feel It"));
        assert!(!screen.contains("Bells at Dawn"));
    }

    #[test]
    fn test_scrolling_stays_in_range() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.list_offset, 0);
        for _ in 0..40 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.list_offset, 14);
        assert!(screen(&app).contains("Raw List  15-15 of 15"));
    }

    #[test]
    fn test_empty_filter_message() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &Config::default());
        press(&mut app, KeyCode::Char('3'));
        for _ in 0..10 {
            press(&mut app, KeyCode::Char(']'));
        }
        assert!(screen(&app).contains("No tracks available"));
    }
}
