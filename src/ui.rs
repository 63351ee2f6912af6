use crate::error::QueryError;
use crate::models::{Entry, Pokemon};
use crate::sprite::{render_sprite, Assets, Sprite};
use crate::utils::{clip, hidden_label, join_names, tenths, title_case};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};
use ratatui::{Frame, Terminal};
use std::borrow::Cow;
use std::io;

// The dex is a static layout. Panel geometry is written in the pixel units of
// a 1200x700 window and mapped onto a 120x35 cell canvas: 10px per column,
// 20px per row, heights rounded up so every bordered box keeps an inner row.
const fn px(x: u16, y: u16, w: u16, h: u16) -> Rect {
    Rect {
        x: x / 10,
        y: y / 20,
        width: w / 10,
        height: (h + 19) / 20,
    }
}

pub const CANVAS: Rect = px(0, 0, 1200, 700);
pub const NAME_BOX: Rect = px(450, 100, 300, 50);
pub const SPRITE_BOX: Rect = px(100, 100, 300, 300);
pub const ID_BOX: Rect = px(760, 100, 100, 50);
// Type and ability boxes run wider than the pixel layout: a cell is coarser
// than a glyph, and dual types or two long ability names must fit on a line.
pub const TYPE_BOX: Rect = px(460, 180, 500, 50);
pub const ABILITY_BOX: Rect = px(460, 250, 600, 100);
pub const STATS_BOX: Rect = px(510, 420, 300, 250);
pub const HEIGHT_BOX: Rect = px(930, 490, 200, 50);
pub const WEIGHT_BOX: Rect = px(880, 580, 200, 50);

const LOGO_BOX: Rect = Rect { x: 1, y: 0, width: 6, height: 3 };
const TITLE_LINE: Rect = Rect { x: 8, y: 1, width: 10, height: 1 };

// Search frame, anchored top-right.
pub const SEARCH_BOX: Rect = Rect { x: 76, y: 0, width: 44, height: 3 };
pub const ENTRY_FIELD: Rect = Rect { x: 77, y: 1, width: 31, height: 1 };
pub const SEARCH_BUTTON: Rect = Rect { x: 109, y: 1, width: 10, height: 1 };
const STATUS_LINE: Rect = Rect { x: 76, y: 3, width: 44, height: 2 };

const SEARCH_PROMPT: &str = "Enter a Pokemon's name (e.g. Togekiss)";

/// What the status strip under the search box says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Searching(String),
    Failed(String),
}

pub struct App {
    /// Text currently typed in the entry box.
    pub entry: String,
    /// Last successful search; `None` until one succeeds or after an empty submit.
    pub current: Option<Entry>,
    pub status: Status,
    pub assets: Assets,
}

impl App {
    pub fn new(assets: Assets) -> Self {
        Self {
            entry: String::new(),
            current: None,
            status: Status::Idle,
            assets,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.entry.push(c);
    }

    pub fn pop_char(&mut self) {
        self.entry.pop();
    }

    /// Take the entry text as a search term and clear the box.
    ///
    /// Returns the lowercased term to look up, or `None` for an empty submit,
    /// which puts the dex back in its empty state instead.
    pub fn submit(&mut self) -> Option<String> {
        let term = self.entry.to_lowercase();
        self.entry.clear();
        if term.is_empty() {
            self.current = None;
            self.status = Status::Idle;
            return None;
        }
        self.status = Status::Searching(term.clone());
        Some(term)
    }

    /// Record the outcome of a search. Failures leave the shown entry alone.
    pub fn finish(&mut self, result: Result<Entry, QueryError>) {
        match result {
            Ok(entry) => {
                self.current = Some(entry);
                self.status = Status::Idle;
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.status = Status::Failed(e.headline());
            }
        }
    }
}

/// Whether a mouse click at (`col`, `row`) lands on the Search button.
pub fn hits_search_button(col: u16, row: u16) -> bool {
    col >= SEARCH_BUTTON.x
        && col < SEARCH_BUTTON.x + SEARCH_BUTTON.width
        && row >= SEARCH_BUTTON.y
        && row < SEARCH_BUTTON.y + SEARCH_BUTTON.height
}

/// Draws a `Sprite` into its area with half-blocks.
struct SpriteView<'a> {
    sprite: &'a Sprite,
    backdrop: Option<Color>,
}

impl Widget for SpriteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_sprite(buf, area, self.sprite, self.backdrop);
    }
}

fn panel_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

fn panel() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(panel_style())
}

fn bold<'a>(s: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::styled(s, Style::default().add_modifier(Modifier::BOLD))
}

/// Clear `area` and draw `widget` there, clipped to the visible frame.
/// Panels are pinned to fixed cells; a small terminal just cuts them off.
fn place<B: Backend, W: Widget>(f: &mut Frame<B>, area: Rect, widget: W) {
    let Some(area) = clip(area, f.size()) else {
        return;
    };
    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}

pub fn draw_ui<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
    terminal.draw(|f| draw(f, app)).map(|_| ())
}

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &App) {
    if let Some(canvas) = clip(CANVAS, f.size()) {
        f.render_widget(
            SpriteView {
                sprite: &app.assets.background,
                backdrop: None,
            },
            canvas,
        );
    }

    draw_header(f, app);
    draw_search(f, app);

    match &app.current {
        None => draw_empty(f, app),
        Some(entry) => draw_entry(f, app, entry),
    }
}

fn draw_header<B: Backend>(f: &mut Frame<B>, app: &App) {
    place(
        f,
        LOGO_BOX,
        SpriteView {
            sprite: &app.assets.logo,
            backdrop: None,
        },
    );
    place(
        f,
        TITLE_LINE,
        Paragraph::new(vec![Spans::from(bold("Pokedex"))]).style(panel_style()),
    );
}

fn draw_search<B: Backend>(f: &mut Frame<B>, app: &App) {
    place(
        f,
        SEARCH_BOX,
        Block::default()
            .borders(Borders::ALL)
            .title(SEARCH_PROMPT)
            .style(panel_style()),
    );

    // show the tail of long input so the cursor stays inside the field
    let max = ENTRY_FIELD.width.saturating_sub(1) as usize;
    let typed: Vec<char> = app.entry.chars().collect();
    let visible: String = typed[typed.len().saturating_sub(max)..].iter().collect();
    let cursor_x = ENTRY_FIELD.x + visible.chars().count() as u16;
    place(
        f,
        ENTRY_FIELD,
        Paragraph::new(visible).style(Style::default().fg(Color::Black).bg(Color::Gray)),
    );
    place(
        f,
        SEARCH_BUTTON,
        Paragraph::new(vec![Spans::from(bold("[ Search ]"))]).style(panel_style()),
    );

    let status = match &app.status {
        Status::Idle => Span::styled(
            "Enter or click Search. Esc quits.",
            Style::default().fg(Color::DarkGray),
        ),
        Status::Searching(term) => Span::styled(
            format!("Searching {}...", term),
            Style::default().fg(Color::Yellow),
        ),
        Status::Failed(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
    };
    place(
        f,
        STATUS_LINE,
        Paragraph::new(vec![Spans::from(status)])
            .style(Style::default().bg(Color::Black))
            .wrap(Wrap { trim: true }),
    );

    let size = f.size();
    if cursor_x < size.width && ENTRY_FIELD.y < size.height {
        f.set_cursor(cursor_x, ENTRY_FIELD.y);
    }
}

fn draw_name<B: Backend>(f: &mut Frame<B>, term: &str) {
    place(
        f,
        NAME_BOX,
        Paragraph::new(vec![Spans::from(bold(title_case(term)))])
            .alignment(Alignment::Center)
            .block(panel()),
    );
}

/// Nothing searched yet: empty name box and the placeholder sprite only.
fn draw_empty<B: Backend>(f: &mut Frame<B>, app: &App) {
    draw_name(f, "");
    draw_sprite_box(f, &app.assets.default_sprite, None);
}

fn draw_sprite_box<B: Backend>(f: &mut Frame<B>, sprite: &Sprite, backdrop: Option<Color>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(match backdrop {
            Some(c) => Style::default().fg(Color::Black).bg(c),
            None => Style::default(),
        });
    let inner = block.inner(SPRITE_BOX);
    place(f, SPRITE_BOX, block);
    if let Some(inner) = clip(inner, f.size()) {
        f.render_widget(SpriteView { sprite, backdrop }, inner);
    }
}

fn draw_entry<B: Backend>(f: &mut Frame<B>, app: &App, entry: &Entry) {
    let p = &entry.pokemon;
    draw_name(f, &entry.term);
    match &entry.sprite {
        Some(sprite) => draw_sprite_box(f, sprite, Some(Color::White)),
        None => draw_sprite_box(f, &app.assets.default_sprite, Some(Color::White)),
    }
    draw_type(f, p);
    draw_abilities(f, p);
    draw_stats(f, p);
    draw_weight(f, p);
    draw_height(f, p);
    draw_id(f, p);
}

fn draw_type<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    let line = Spans::from(vec![bold("Type: "), Span::raw(join_names(&p.types))]);
    place(
        f,
        TYPE_BOX,
        Paragraph::new(vec![line])
            .wrap(Wrap { trim: true })
            .block(panel()),
    );
}

fn draw_abilities<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    // regular abilities may wrap onto the second row; the hidden one keeps the third
    let lines = vec![
        Spans::from(vec![bold("Abilities: "), Span::raw(join_names(&p.abilities))]),
        Spans::from(Span::raw(hidden_label(p.hidden_ability.as_deref()))),
    ];
    place(
        f,
        ABILITY_BOX,
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel()),
    );
}

/// One row of the two-column stat table.
fn stat_row(left: &str, lv: u32, right: &str, rv: u32) -> Spans<'static> {
    Spans::from(Span::raw(format!(
        "{:<7}{:>4}    {:<7}{:>4}",
        left, lv, right, rv
    )))
}

fn draw_stats<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    let s = &p.stats;
    let lines = vec![
        Spans::from(bold("Base stats:")),
        Spans::from(""),
        stat_row("HP:", s.hp, "spAtk:", s.special_attack),
        Spans::from(""),
        stat_row("Atk:", s.attack, "spDef:", s.special_defense),
        Spans::from(""),
        stat_row("Def:", s.defense, "Spd:", s.speed),
    ];
    place(
        f,
        STATS_BOX,
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel()),
    );
}

fn draw_weight<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    place(
        f,
        WEIGHT_BOX,
        Paragraph::new(format!("Weight: {} kg", tenths(p.weight)))
            .alignment(Alignment::Center)
            .block(panel()),
    );
}

fn draw_height<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    place(
        f,
        HEIGHT_BOX,
        Paragraph::new(format!("Height: {} m", tenths(p.height)))
            .alignment(Alignment::Center)
            .block(panel()),
    );
}

fn draw_id<B: Backend>(f: &mut Frame<B>, p: &Pokemon) {
    place(
        f,
        ID_BOX,
        Paragraph::new(vec![Spans::from(bold(format!("#{}", p.id)))])
            .alignment(Alignment::Center)
            .block(panel()),
    );
}
