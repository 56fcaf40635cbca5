//! The application: event loop, intro, rain and page.

use std::time::{Duration, Instant};

use binrain_config::{Config, IntroSeenFlag};
use binrain_core::{ColorTheme, Viewport};
use binrain_intro::{Drawing, IntroDriver, IntroOutcome};
use binrain_rain::{GlyphGrid, RainAnimator, Ticker};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::page::{PageLayout, PortfolioContent};
use crate::scroll::{HeroStyle, NavState, active_section, hero_progress, section_indent};

/// Poll timeout when nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Redraw interval while a stroke or fade is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Left margin of the hero, in columns.
const HERO_MARGIN: u16 = 2;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Clock origin for the intro timeline and the rain ticker.
    started: Instant,
    config: Config,
    theme: ColorTheme,
    /// Terminal size in cells.
    size: (u16, u16),
    /// Created on the first rain start.
    rain: Option<RainAnimator>,
    grid: GlyphGrid,
    ticker: Ticker,
    seed: Option<u64>,
    drawing: Drawing,
    intro: IntroDriver,
    intro_seen: bool,
    seen_flag: Option<IntroSeenFlag>,
    content: PortfolioContent,
    scroll: u16,
    max_scroll: u16,
    page_rows: u16,
    nav: NavState,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: Config,
        content: PortfolioContent,
        drawing: Drawing,
        seen_flag: Option<IntroSeenFlag>,
        intro_seen: bool,
        seed: Option<u64>,
    ) -> Self {
        let settings = config.rain_settings();
        let intro = IntroDriver::new(drawing.clone(), config.intro_timing());
        Self {
            running: false,
            started: Instant::now(),
            theme: config.theme,
            size: (0, 0),
            rain: None,
            grid: GlyphGrid::new(0, 0, settings.cell_size),
            ticker: Ticker::new(settings.tick_interval),
            seed,
            drawing,
            intro,
            intro_seen,
            seen_flag,
            content,
            scroll: 0,
            max_scroll: 0,
            page_rows: 0,
            nav: NavState::default(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.on_resize(size.width, size.height);
        self.begin(self.elapsed());

        while self.running {
            self.update(self.elapsed());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Start the intro (or skip it) at `now`.
    fn begin(&mut self, now: Duration) {
        let outcomes = self.intro.start(now, self.intro_seen);
        self.handle_outcomes(now, outcomes);
    }

    /// Advance the intro and run any rain ticks due at `now`.
    fn update(&mut self, now: Duration) {
        let outcomes = self.intro.update(now);
        self.handle_outcomes(now, outcomes);

        let due = self.ticker.due(now);
        if let Some(rain) = &mut self.rain {
            for _ in 0..due {
                rain.tick(&mut self.grid);
            }
        }
    }

    fn handle_outcomes(&mut self, now: Duration, outcomes: Vec<IntroOutcome>) {
        for outcome in outcomes {
            match outcome {
                IntroOutcome::StartRain => self.start_rain(now),
                IntroOutcome::ShowMainContent => tracing::info!("showing main content"),
                IntroOutcome::PersistIntroSeen => self.persist_intro_seen(),
            }
        }
    }

    /// Start the rain. Only the first call creates the animator.
    fn start_rain(&mut self, now: Duration) {
        if self.rain.is_some() {
            return;
        }
        let settings = self.config.rain_settings();
        let viewport = Viewport::from_cells(self.size.0, self.size.1, settings.cell_size);
        let rain = match self.seed {
            Some(seed) => RainAnimator::with_seed(viewport, settings, seed),
            None => RainAnimator::new(viewport, settings),
        };
        if rain.columns().is_empty() {
            tracing::warn!(width = self.size.0, "terminal too narrow for rain");
        }
        self.rain = Some(rain);
        self.ticker.start(now);
    }

    fn persist_intro_seen(&mut self) {
        self.intro_seen = true;
        let Some(flag) = &self.seen_flag else {
            return;
        };
        if let Err(err) = flag.set() {
            tracing::warn!(%err, "could not persist intro flag");
        }
    }

    /// Play the intro again. The rain keeps falling.
    fn replay_intro(&mut self, now: Duration) {
        tracing::info!("replaying intro");
        self.intro = IntroDriver::new(self.drawing.clone(), self.config.intro_timing());
        let outcomes = self.intro.start(now, false);
        self.handle_outcomes(now, outcomes);
    }

    /// How long to wait for input before the next tick or intro deadline.
    fn poll_timeout(&self, now: Duration) -> Duration {
        let mut timeout = IDLE_POLL;
        if let Some(until_tick) = self.ticker.until_next(now) {
            timeout = timeout.min(until_tick);
        }
        if let Some(deadline) = self.intro.next_deadline() {
            timeout = timeout.min(deadline.saturating_sub(now));
        }
        if self.intro.is_animating(now) {
            timeout = timeout.min(ANIMATION_FRAME);
        }
        timeout
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let now = self.elapsed();
        self.render_at(frame, now);
    }

    fn render_at(&mut self, frame: &mut Frame, now: Duration) {
        let area = frame.area();
        frame.render_widget(Block::new().style(Style::new().bg(self.theme.background())), area);
        self.grid.render(frame, area, self.theme);

        let [body_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        if self.intro.is_main_visible() {
            self.render_page(frame, body_area);
        } else {
            self.intro.render(frame, body_area, now, self.theme);
        }
        self.render_help(frame, help_area);
    }

    fn render_page(&mut self, frame: &mut Frame, area: Rect) {
        let [nav_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let layout = PageLayout::compute(&self.content, body_area.height);
        self.page_rows = body_area.height;
        self.max_scroll = layout.max_scroll(body_area.height);
        self.scroll = self.scroll.min(self.max_scroll);

        let page = &self.config.page;
        let section_top = layout.first_section_top().unwrap_or(layout.total_height);
        let hero = HeroStyle::at(hero_progress(
            self.scroll,
            section_top,
            page.hero_start_rows,
            page.hero_distance_rows,
        ));
        self.nav
            .apply(active_section(self.scroll, &layout.spans, page.nav_offset_rows));

        self.render_nav(frame, nav_area);
        self.render_sections(frame, body_area, &layout, &hero);
        self.render_hero(frame, body_area, &layout, &hero);
    }

    fn render_nav(&self, frame: &mut Frame, area: Rect) {
        let color = self.theme.color();
        let mut spans = vec![Span::raw(" ")];
        for (id, title) in self.content.nav_entries() {
            let label = format!(" {title} ");
            if self.nav.active() == Some(id) {
                spans.push(label.bold().fg(self.theme.background()).bg(color));
            } else {
                spans.push(label.fg(color));
            }
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_sections(&self, frame: &mut Frame, area: Rect, layout: &PageLayout, hero: &HeroStyle) {
        let color = self.theme.color();
        let indent = if hero.indent_sections {
            section_indent(area.width)
        } else {
            HERO_MARGIN
        };
        let window_end = self.scroll.saturating_add(area.height);

        for (span, section) in layout.spans.iter().skip(1).zip(&self.content.sections) {
            let bottom = span.top.saturating_add(span.height);
            if bottom <= self.scroll || span.top >= window_end {
                continue;
            }
            let visible_top = span.top.max(self.scroll);
            let visible_bottom = bottom.min(window_end);
            let rect = Rect {
                x: area.x + indent.min(area.width),
                y: area.y + (visible_top - self.scroll),
                width: area.width.saturating_sub(indent + HERO_MARGIN),
                height: visible_bottom - visible_top,
            };

            let mut lines = vec![
                Line::from(section.title.clone().bold().fg(color)),
                Line::from("─".repeat(section.title.chars().count()).fg(color)),
            ];
            lines.extend(section.body.iter().map(|line| Line::from(line.as_str())));

            let paragraph = Paragraph::new(lines).scroll((visible_top - span.top, 0));
            frame.render_widget(paragraph, rect);
        }
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect, layout: &PageLayout, hero: &HeroStyle) {
        let color = self.theme.color();
        let mut lines = vec![
            Line::from(self.content.name.clone().bold().fg(color)),
            Line::from(self.content.tagline.clone().italic()),
            Line::default(),
        ];
        lines.extend(
            self.content
                .description
                .iter()
                .map(|line| Line::from(line.as_str()).dark_gray()),
        );
        let content_rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        if hero.pinned {
            let width = hero.sidebar_width(area.width).max(12).min(area.width);
            let height = content_rows.saturating_add(2).min(area.height);
            let rect = Rect {
                x: area.x + HERO_MARGIN.min(area.width.saturating_sub(width)),
                y: area.y + hero.top_offset.min(area.height.saturating_sub(height)),
                width,
                height,
            };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::new().fg(color))
                .style(Style::new().bg(self.theme.background()));
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(lines)
                    .block(block)
                    .wrap(Wrap { trim: true }),
                rect,
            );
            return;
        }

        // Unpinned: the hero scrolls with the document, content centered in
        // its first screen.
        let hero_height = layout.spans.first().map_or(area.height, |s| s.height);
        let content_top = hero_height.saturating_sub(content_rows) / 2;
        if content_top.saturating_add(content_rows) <= self.scroll {
            return;
        }
        let skip = self.scroll.saturating_sub(content_top);
        let y = content_top.saturating_sub(self.scroll);
        if y >= area.height {
            return;
        }
        let width = (f32::from(area.width) * hero.width_percent / 100.0 * hero.scale) as u16;
        let rect = Rect {
            x: area.x + HERO_MARGIN.min(area.width),
            y: area.y + y,
            width: width.min(area.width.saturating_sub(HERO_MARGIN)),
            height: (content_rows - skip).min(area.height - y),
        };
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .scroll((skip, 0)),
            rect,
        );
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let color = self.theme.color();
        let mut spans = vec!["q".bold().fg(color), " quit  ".dark_gray()];
        if self.intro.is_main_visible() {
            spans.extend([
                "j/k".bold().fg(color),
                " scroll  ".dark_gray(),
                "r".bold().fg(color),
                " replay intro  ".dark_gray(),
            ]);
        }
        spans.extend([
            "c".bold().fg(color),
            format!(" color ({})", self.theme.name()).dark_gray(),
        ]);
        frame.render_widget(Line::from(spans).centered(), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next tick or intro deadline.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout(self.elapsed()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ if !self.intro.is_main_visible() => {}
            (_, KeyCode::Char('j') | KeyCode::Down) => self.scroll_by(1),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.scroll_by(-1),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_by(self.page_step()),
            (_, KeyCode::PageUp) => self.scroll_by(-self.page_step()),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.scroll = 0,
            (_, KeyCode::End | KeyCode::Char('G')) => self.scroll = self.max_scroll,
            (_, KeyCode::Char('r')) => self.replay_intro(self.elapsed()),
            _ => {}
        }
    }

    fn page_step(&self) -> i32 {
        i32::from(self.page_rows.saturating_sub(2).max(1))
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll));
        self.scroll = next as u16;
    }

    /// Resize the glyph grid. Rain columns keep their original layout.
    fn on_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.grid.resize(width, height);
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
