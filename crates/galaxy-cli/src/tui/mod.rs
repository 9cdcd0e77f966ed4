use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use galaxy_core::model::MAX_POPULARITY;
use galaxy_core::{Catalog, Config, FilterCriteria, Track};
use galaxy_search::{recommend_for_query, Outcome, Request};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

pub mod filter_bar;
pub mod galaxy;
pub mod raw_list;
pub mod recommend;

/// Colors assigned to genres by their position in the catalog.
const GENRE_COLORS: [Color; 10] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightGreen,
    Color::LightYellow,
    Color::Red,
];

/// Which tab the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Galaxy,
    Recommend,
    RawList,
}

impl Tab {
    const ALL: [Self; 3] = [Self::Galaxy, Self::Recommend, Self::RawList];

    pub fn title(self) -> &'static str {
        match self {
            Self::Galaxy => "Galaxy Explorer",
            Self::Recommend => "Search & Recommend",
            Self::RawList => "Raw List",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Galaxy => 0,
            Self::Recommend => 1,
            Self::RawList => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Keys drive navigation and filters.
    Browse,
    /// Keys edit the search text.
    Search,
}

/// Application state for the dashboard.
#[derive(Debug)]
pub struct App<'a> {
    catalog: &'a Catalog,
    /// Every catalog genre, in catalog order.
    pub genres: Vec<&'a str>,
    pub criteria: FilterCriteria,
    /// Tracks passing `criteria`, in catalog order.
    pub filtered: Vec<&'a Track>,
    pub tab: Tab,
    pub focus: Focus,
    pub genre_cursor: usize,
    pub query: String,
    pub pick: usize,
    /// Count chosen with c/C; `None` until the user picks one.
    pub count: Option<usize>,
    pub max_recommendations: usize,
    pub outcome: Outcome<'a>,
    pub list_offset: usize, // First visible row of the raw list
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog, config: &Config) -> Self {
        let criteria = FilterCriteria::all(catalog, config.min_popularity);
        let mut app = Self {
            catalog,
            genres: catalog.genres(),
            criteria,
            filtered: Vec::new(),
            tab: Tab::Galaxy,
            focus: Focus::Browse,
            genre_cursor: 0,
            query: String::new(),
            pick: 0,
            count: None,
            max_recommendations: config.max_recommendations,
            outcome: Outcome::NoQueryEntered,
            list_offset: 0,
            should_quit: false,
        };
        app.refilter();
        app
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Color for a genre, stable across filter changes.
    pub fn genre_color(&self, genre: &str) -> Color {
        self.genres
            .iter()
            .position(|g| *g == genre)
            .map(|i| GENRE_COLORS[i % GENRE_COLORS.len()])
            .unwrap_or(Color::Gray)
    }

    /// Re-apply the filters, then re-run the query against the new view.
    fn refilter(&mut self) {
        self.filtered = self.criteria.apply(self.catalog);
        self.list_offset = self.list_offset.min(self.filtered.len().saturating_sub(1));
        self.rescore();
    }

    fn rescore(&mut self) {
        let request = Request {
            query: &self.query,
            pick: self.pick,
            count: self.count,
            max_recommendations: self.max_recommendations,
        };
        self.outcome = recommend_for_query(&self.filtered, &request);
        if let Outcome::Recommendations(recs) = &self.outcome {
            self.pick = recs.pick;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Browse => self.handle_browse_key(key.code),
            Focus::Search => self.handle_search_key(key.code),
        }
    }

    fn handle_browse_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.previous(),
            KeyCode::Char('1') => self.tab = Tab::Galaxy,
            KeyCode::Char('2') => self.tab = Tab::Recommend,
            KeyCode::Char('3') => self.tab = Tab::RawList,
            KeyCode::Char('/') => {
                self.tab = Tab::Recommend;
                self.focus = Focus::Search;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.genre_cursor = self.genre_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.genre_cursor + 1 < self.genres.len() {
                    self.genre_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(genre) = self.genres.get(self.genre_cursor) {
                    self.criteria.toggle_genre(genre);
                    self.refilter();
                }
            }
            KeyCode::Char('a') => {
                if self.genres.iter().all(|g| self.criteria.is_selected(g)) {
                    self.criteria.clear_genres();
                } else {
                    self.criteria.select_genres(self.genres.iter().copied());
                }
                self.refilter();
            }
            KeyCode::Char('+' | '=') => self.adjust_min_popularity(1),
            KeyCode::Char('-') => self.adjust_min_popularity(-1),
            KeyCode::Char(']') => self.adjust_min_popularity(10),
            KeyCode::Char('[') => self.adjust_min_popularity(-10),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('c') => self.cycle_count(true),
            KeyCode::Char('C') => self.cycle_count(false),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::Browse,
            KeyCode::Char(c) => {
                self.query.push(c);
                self.pick = 0;
                self.rescore();
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.pick = 0;
                    self.rescore();
                }
            }
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            _ => {}
        }
    }

    fn adjust_min_popularity(&mut self, delta: i16) {
        let current = i16::from(self.criteria.min_popularity());
        let next = (current + delta).clamp(0, i16::from(MAX_POPULARITY));
        let next = u8::try_from(next).unwrap_or(MAX_POPULARITY);
        if next != self.criteria.min_popularity() {
            self.criteria.set_min_popularity(next);
            self.refilter();
        }
    }

    fn move_down(&mut self) {
        match self.tab {
            Tab::Recommend => {
                if let Outcome::Recommendations(recs) = &self.outcome {
                    if self.pick + 1 < recs.matches.len() {
                        self.pick += 1;
                        self.rescore();
                    }
                }
            }
            Tab::RawList => {
                if self.list_offset + 1 < self.filtered.len() {
                    self.list_offset += 1;
                }
            }
            Tab::Galaxy => {}
        }
    }

    fn move_up(&mut self) {
        match self.tab {
            Tab::Recommend => {
                if self.pick > 0 {
                    self.pick -= 1;
                    self.rescore();
                }
            }
            Tab::RawList => self.list_offset = self.list_offset.saturating_sub(1),
            Tab::Galaxy => {}
        }
    }

    fn cycle_count(&mut self, forward: bool) {
        if self.tab != Tab::Recommend {
            return;
        }
        if let Outcome::Recommendations(recs) = &self.outcome {
            let next = if forward {
                recs.counts.next(recs.count)
            } else {
                recs.counts.previous(recs.count)
            };
            self.count = Some(next);
            self.rescore();
        }
    }
}

/// Run the dashboard.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(catalog: &Catalog, config: &Config) -> Result<()> {
    let app = App::new(catalog, config);

    // Log lines would be drawn over the alternate screen.
    let log_level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::set_max_level(log_level);

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(4), // Filters
            Constraint::Min(8),    // Content
            Constraint::Length(3), // Help bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    filter_bar::render(frame, app, chunks[1]);
    match app.tab {
        Tab::Galaxy => galaxy::render(frame, app, chunks[2]),
        Tab::Recommend => recommend::render(frame, app, chunks[2]),
        Tab::RawList => raw_list::render(frame, app, chunks[2]),
    }
    render_help(frame, app, chunks[3]);
}

fn render_tabs(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let titles: Vec<Line<'_>> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("🌌 Galaxy"))
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_help(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let text = match (app.focus, app.tab) {
        (Focus::Search, _) => "  Type to search  \u{2191}/\u{2193} Pick match  Enter/Esc Done",
        (Focus::Browse, Tab::Recommend) => {
            "  / Search  \u{2191}/k \u{2193}/j Pick  c/C Count  \u{2190}/\u{2192} Genre  Space Toggle  a All  +/- ]/[ Popularity  Tab Next  q Quit"
        }
        (Focus::Browse, Tab::RawList) => {
            "  \u{2191}/k Up  \u{2193}/j Down  \u{2190}/\u{2192} Genre  Space Toggle  a All  +/- ]/[ Popularity  Tab Next  q Quit"
        }
        (Focus::Browse, Tab::Galaxy) => {
            "  \u{2190}/\u{2192} Genre  Space Toggle  a All  +/- ]/[ Popularity  / Search  Tab Next  q Quit"
        }
    };
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
