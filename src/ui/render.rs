//! Frame rendering: header, per-screen body, footer, overlays.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::{format_updated_at, ApiError};
use crate::fetch::FetchState;
use crate::flash::{FlashKind, FlashMessage, FlashSlot};
use crate::ui::app::{App, Screen};
use crate::ui::layout::{centered_fixed_rect, centered_rect, layout_regions};
use crate::ui::screens::{EditorBody, EditorField, EditorForm, EditorMode, EditorScreen};
use crate::ui::search::SearchOverlay;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR,
    STATUS_INFO, STATUS_OK, STATUS_WARNING,
};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw<S: FlashSlot>(frame: &mut Frame<'_>, app: &App<S>) {
    let (header, body, footer) = layout_regions(frame.area());

    draw_header(frame, app, header);
    frame.render_widget(Clear, body);
    match app.screen() {
        Screen::Recent(recent) => draw_recent(frame, app, recent.state(), recent.selected(), body),
        Screen::Page(page) => {
            draw_page(frame, app, page.name(), page.state(), page.scroll(), body)
        }
        Screen::Editor(editor) => draw_editor(frame, app, editor, body),
    }
    draw_footer(frame, app, footer);

    if let Some(overlay) = app.search() {
        draw_search(frame, app, overlay, frame.area());
    }
    if let Some(message) = app.toast().active() {
        draw_toast(frame, message, frame.area());
    }
}

fn draw_header<S: FlashSlot>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let line = Line::from(vec![
        Span::styled("wikiterm", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", app.route()), Style::default().fg(MUTED_TEXT)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(widget, area);
}

fn draw_footer<S: FlashSlot>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let hints = if app.search().is_some() {
        "Type: Search  Up/Down: Move  Enter: Open  Esc: Close"
    } else {
        match app.screen() {
            Screen::Recent(_) => {
                "Up/Down: Move  Enter: Open  n: New page  Ctrl+K: Search  q: Quit"
            }
            Screen::Page(_) => "e: Edit  Up/Down: Scroll  Esc: Back  Ctrl+K: Search  q: Quit",
            Screen::Editor(editor) => match editor.mode() {
                EditorMode::Edit => "Tab: Field  Ctrl+S: Save  Ctrl+D: Delete  Esc: Cancel",
                EditorMode::New => "Tab: Field  Ctrl+S: Save  Esc: Cancel",
            },
        }
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(MUTED_TEXT),
    )));
    frame.render_widget(widget, area);
}

fn draw_recent<S: FlashSlot>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    state: FetchState<Vec<crate::api::PagePreview>, ApiError>,
    selected: usize,
    area: Rect,
) {
    match state {
        FetchState::Loading => draw_loading(frame, app, area),
        FetchState::Error(error) => draw_network_error(frame, &error, area),
        FetchState::Success(pages) => {
            let items: Vec<ListItem> = pages
                .iter()
                .enumerate()
                .map(|(idx, page)| {
                    let mut line = Line::from(vec![
                        Span::styled(page.page_name.clone(), Style::default().fg(HEADER_TEXT)),
                        Span::styled(
                            format!("  {}", page.preview_text),
                            Style::default().fg(MUTED_TEXT),
                        ),
                        Span::styled(
                            format!("  ({})", format_updated_at(&page.updated_at)),
                            Style::default().fg(MUTED_TEXT),
                        ),
                    ]);
                    if idx == selected {
                        line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
                    }
                    ListItem::new(line)
                })
                .collect();
            let list = List::new(items).block(titled_block("Recent pages"));
            frame.render_widget(list, area);
        }
    }
}

fn draw_page<S: FlashSlot>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    name: &str,
    state: FetchState<crate::api::Page, ApiError>,
    scroll: u16,
    area: Rect,
) {
    match state {
        FetchState::Loading => draw_loading(frame, app, area),
        FetchState::Error(error) => draw_network_error(frame, &error, area),
        FetchState::Success(page) => {
            let regions = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);

            let body = Paragraph::new(page.page_content.as_str())
                .block(titled_block(name))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            frame.render_widget(body, regions[0]);

            let stamp = Paragraph::new(Line::from(Span::styled(
                format_updated_at(&page.updated_at),
                Style::default().fg(MUTED_TEXT),
            )))
            .alignment(Alignment::Right);
            frame.render_widget(stamp, regions[1]);
        }
    }
}

fn draw_editor<S: FlashSlot>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    editor: &EditorScreen,
    area: Rect,
) {
    match editor.body() {
        EditorBody::Loading => draw_loading(frame, app, area),
        EditorBody::Failed(error) => draw_network_error(frame, error, area),
        EditorBody::Form(form) => draw_editor_form(frame, editor, form, area),
    }
}

fn draw_editor_form(frame: &mut Frame<'_>, editor: &EditorScreen, form: &EditorForm, area: Rect) {
    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    let field_border = |field: EditorField| {
        if form.focus == field {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(GLOBAL_BORDER)
        }
    };

    let name_text = if form.name.is_empty() {
        Span::styled(
            "Name of the wiki page, eg: MyWikiPage",
            Style::default().fg(MUTED_TEXT),
        )
    } else {
        Span::styled(form.name.clone(), Style::default().fg(HEADER_TEXT))
    };
    let name = Paragraph::new(Line::from(name_text)).block(
        Block::default()
            .title("Page name")
            .borders(Borders::ALL)
            .border_style(field_border(EditorField::Name)),
    );
    frame.render_widget(name, regions[0]);

    let content = Paragraph::new(form.content.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Content")
                .borders(Borders::ALL)
                .border_style(field_border(EditorField::Content)),
        );
    frame.render_widget(content, regions[1]);

    let mut status: Vec<Line> = Vec::new();
    if let Some(error) = &form.name_error {
        status.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    if let Some(error) = &form.content_error {
        status.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    if let Some(failure) = &form.failure {
        status.push(Line::from(Span::styled(
            format!("Failed to save page: {failure}"),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    if form.submitting {
        status.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(MUTED_TEXT),
        )));
    } else if form.confirm_delete {
        status.push(Line::from(Span::styled(
            format!(
                "Delete {}? Ctrl+D again to confirm, Esc to keep it.",
                editor.name()
            ),
            Style::default().fg(STATUS_WARNING),
        )));
    } else if form.confirm_discard {
        status.push(Line::from(Span::styled(
            "Unsaved changes. Esc again to discard them.",
            Style::default().fg(STATUS_WARNING),
        )));
    }
    frame.render_widget(Paragraph::new(status), regions[2]);
}

fn draw_search<S: FlashSlot>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    overlay: &SearchOverlay,
    area: Rect,
) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled("Search", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let query = if overlay.query().is_empty() {
        Line::from(Span::styled(
            "Type a command or search...",
            Style::default().fg(MUTED_TEXT),
        ))
    } else {
        Line::from(Span::styled(
            format!("> {}", overlay.query()),
            Style::default().fg(HEADER_TEXT),
        ))
    };
    frame.render_widget(Paragraph::new(query), regions[0]);

    match overlay.state() {
        None => {}
        Some(FetchState::Loading) => {
            let spinner = spinner_frame(app.animation_tick());
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{spinner} Searching..."),
                    Style::default().fg(MUTED_TEXT),
                ))),
                regions[1],
            );
        }
        Some(FetchState::Error(error)) => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(STATUS_ERROR),
                ))),
                regions[1],
            );
        }
        Some(FetchState::Success(hits)) if hits.is_empty() => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No results found.",
                    Style::default().fg(MUTED_TEXT),
                ))),
                regions[1],
            );
        }
        Some(FetchState::Success(hits)) => {
            let items: Vec<ListItem> = hits
                .iter()
                .enumerate()
                .map(|(idx, hit)| {
                    let mut line = Line::from(vec![
                        Span::styled(hit.title.clone(), Style::default().fg(HEADER_TEXT)),
                        Span::styled(format!("  {}", hit.body), Style::default().fg(MUTED_TEXT)),
                    ]);
                    if idx == overlay.selected() {
                        line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
                    }
                    ListItem::new(line)
                })
                .collect();
            frame.render_widget(List::new(items), regions[1]);
        }
    }
}

fn draw_toast(frame: &mut Frame<'_>, message: &FlashMessage, area: Rect) {
    let width = (message.title.len() + 4)
        .max(message.description.as_deref().map_or(0, str::len) + 4)
        .min(area.width.saturating_sub(4) as usize) as u16;
    let height = if message.description.is_some() { 4 } else { 3 };

    // Bottom-right corner, inset by one cell.
    let toast_area = Rect {
        x: area.right().saturating_sub(width + 2),
        y: area.bottom().saturating_sub(height + 1),
        width: width.min(area.width),
        height: height.min(area.height),
    };
    frame.render_widget(Clear, toast_area);

    let color = kind_color(message.kind);
    let mut lines = vec![Line::from(Span::styled(
        message.title.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = &message.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(HEADER_TEXT),
        )));
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(widget, toast_area);
}

fn draw_loading<S: FlashSlot>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let spinner = spinner_frame(app.animation_tick());
    let widget = Paragraph::new(Line::from(Span::styled(
        format!("{spinner} Loading..."),
        Style::default().fg(HEADER_TEXT),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(widget, centered_fixed_rect(20, 1, area));
}

fn draw_network_error(frame: &mut Frame<'_>, error: &ApiError, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Network error",
            Style::default()
                .fg(STATUS_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(HEADER_TEXT),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, centered_rect(70, 30, area));
}

fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn kind_color(kind: FlashKind) -> ratatui::style::Color {
    match kind {
        FlashKind::Success => STATUS_OK,
        FlashKind::Error => STATUS_ERROR,
        FlashKind::Warning => STATUS_WARNING,
        FlashKind::Info => STATUS_INFO,
        FlashKind::Default => HEADER_TEXT,
    }
}
