use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use money_manager::{
    format_money, parse_hex, AppConfig, Category, Field, FormState, LedgerState, ThemeConfig,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

const TITLE: &str = "Monthly Money Manager";
const HELP_TEXT: &str = "Easily track your monthly expenses, loans, and credit card payments. \
Press 'Submit' to record your income and 'Add' to input new transactions. \
Stay on top of your finances effortlessly!";

/// Theme colours resolved for the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub button: Color,
    pub field_border: Color,
    pub field_fill: Color,
    pub text: Color,
}

impl Palette {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            background: rgb(&theme.background),
            button: rgb(&theme.button),
            field_border: rgb(&theme.field_border),
            field_fill: rgb(&theme.field_fill),
            text: rgb(&theme.text),
        }
    }
}

fn rgb(hex: &str) -> Color {
    let (r, g, b) = parse_hex(hex);
    Color::Rgb(r, g, b)
}

pub struct App {
    pub ledger: LedgerState,
    pub form: FormState,
    pub focus: Field,
    pub currency_symbol: String,
    pub palette: Palette,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            ledger: LedgerState::new(),
            form: FormState::new(),
            focus: Field::Income,
            currency_symbol: config.currency_symbol.clone(),
            palette: Palette::from_theme(&config.theme),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Submit the group the focused field belongs to.
    ///
    /// A rejected amount is dropped silently; the fields stay as typed.
    pub fn submit(&mut self) {
        if let Err(err) = self.form.submit(&mut self.ledger, self.focus) {
            tracing::debug!(field = ?self.focus, %err, "submission ignored");
        }
    }

    /// Apply one key press. Returns `false` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Backspace => {
                self.form.field_mut(self.focus).pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.field_mut(self.focus).push(c);
            }
            _ => {}
        }
        true
    }

    fn money(&self, value: rust_decimal::Decimal) -> String {
        format_money(value, &self.currency_symbol)
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let background = Block::default().style(
        Style::default()
            .bg(app.palette.background)
            .fg(app.palette.text),
    );
    f.render_widget(background, f.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Title and help text
            Constraint::Length(3), // Income input
            Constraint::Min(6),    // Home expenses
            Constraint::Min(6),    // Loans
            Constraint::Min(6),    // Credit card payments
            Constraint::Length(4), // Summary
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_income(f, chunks[1], app);
    for (category, area) in Category::ALL.iter().zip(&chunks[2..5]) {
        render_category(f, *area, app, *category);
    }
    render_summary(f, chunks[5], app);
    render_status_bar(f, chunks[6], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let text = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(app.palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(HELP_TEXT, Style::default().fg(app.palette.text))),
    ];

    let header = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(app.palette.field_border)),
    );
    f.render_widget(header, area);
}

fn render_income(f: &mut Frame, area: Rect, app: &App) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    render_input(f, row[0], app, Field::Income);
    render_button(f, row[1], app, "Submit", app.focus == Field::Income);
}

fn render_category(f: &mut Frame, area: Rect, app: &App, category: Category) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.palette.field_border))
        .title(Span::styled(
            format!(" {} ", category.title()),
            Style::default()
                .fg(app.palette.text)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    // Newest entries stay visible when the list outgrows its area
    let entries = app.ledger.entries(category);
    let visible = sections[0].height as usize;
    let lines: Vec<Line> = entries
        .iter()
        .skip(entries.len().saturating_sub(visible))
        .map(|entry| {
            Line::from(Span::styled(
                format!("{}: {}", entry.name, app.money(entry.amount)),
                Style::default()
                    .fg(app.palette.text)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), sections[0]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(sections[1]);

    render_input(f, row[0], app, Field::Name(category));
    render_input(f, row[1], app, Field::Amount(category));
    render_button(f, row[2], app, "Add", app.focus.category() == Some(category));
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: Field) {
    let focused = app.focus == field;
    let value = app.form.field(field);

    let text = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value.to_string(), Style::default().fg(app.palette.text))
    };

    let border = if focused {
        Style::default()
            .fg(app.palette.button)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.palette.field_border)
    };

    let input = Paragraph::new(Line::from(text))
        .style(Style::default().bg(app.palette.field_fill))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(input, area);

    if focused {
        let width = value.chars().count() as u16;
        let x = (area.x + 1 + width).min(area.x + area.width.saturating_sub(2));
        f.set_cursor(x, area.y + 1);
    }
}

fn render_button(f: &mut Frame, area: Rect, app: &App, label: &str, active: bool) {
    let mut style = Style::default().fg(app.palette.button);
    if active {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let button = Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
        .block(Block::default().borders(Borders::NONE));
    // Vertically align with the input text line
    let inner = Rect {
        y: area.y + area.height.min(1),
        height: area.height.saturating_sub(1),
        ..area
    };
    f.render_widget(button, inner);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.ledger.summary();

    let remaining_color = if summary.is_overspent() {
        Color::Red
    } else {
        app.palette.text
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Total: ", Style::default().fg(app.palette.text)),
            Span::styled(
                app.money(summary.total_amount),
                Style::default()
                    .fg(app.palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Remaining Income: ", Style::default().fg(app.palette.text)),
            Span::styled(
                app.money(summary.remaining_income),
                Style::default()
                    .fg(remaining_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(app.palette.field_border)),
    );
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(app.palette.button);
    let status_spans = vec![
        Span::styled(" Tab/↓", key),
        Span::raw(" Next | "),
        Span::styled("Shift-Tab/↑", key),
        Span::raw(" Prev | "),
        Span::styled("Enter", key),
        Span::raw(" Submit/Add | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.palette.field_border)),
    );
    f.render_widget(status_bar, area);
}
