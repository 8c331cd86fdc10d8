use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::actions::{ActionRegistry, Command};
use crate::config::{Config, WINDOW_TITLE};
use crate::controller::Controller;
use crate::editor::TextEditor;
use crate::models::{InputMode, MainTab, PanelButton, Task, WindowState};
use crate::panel::TaskPanel;

const MENU_TITLE: &str = "Magic Prompt";
const TASK_LIST_WIDTH: u16 = 40;
const PANEL_HEIGHT: u16 = 11;
const BUTTON_COLUMN_WIDTH: u16 = 12;

/// Clickable regions recorded while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Menu,
    MenuEntry(usize),
    Tab(MainTab),
    Panel(usize),
    Desc(usize),
    Button(usize, PanelButton),
}

pub struct App {
    pub state: WindowState,
    pub current_tab: MainTab,
    pub mode: InputMode,
    pub actions: ActionRegistry,
    pub controller: Controller,
    pub panels: Vec<TaskPanel>,
    pub task_list_state: ListState,
    pub menu_state: ListState,
    log_view_height: usize,
    hit_areas: Vec<(Rect, Hit)>,
}

impl App {
    pub fn new(tasks: Vec<Task>) -> Self {
        let panels: Vec<TaskPanel> = tasks.into_iter().map(TaskPanel::new).collect();
        let mut task_list_state = ListState::default();
        if !panels.is_empty() {
            task_list_state.select(Some(0));
        }

        let mut app = App {
            state: WindowState::Running,
            current_tab: MainTab::Spell,
            mode: InputMode::Normal,
            actions: ActionRegistry::new(),
            controller: Controller::new(),
            panels,
            task_list_state,
            menu_state: ListState::default(),
            log_view_height: 1,
            hit_areas: Vec::new(),
        };
        app.controller.add_log("Started.");
        app
    }

    pub fn is_running(&self) -> bool {
        self.state == WindowState::Running
    }

    pub fn trigger(&mut self, command: Command) {
        match command {
            Command::Quit => {
                log::info!("Quit requested");
                self.state = WindowState::Closed;
            }
        }
    }

    pub fn selected_panel(&self) -> Option<usize> {
        self.task_list_state
            .selected()
            .filter(|&i| i < self.panels.len())
    }

    pub fn select_panel(&mut self, index: usize) {
        if index < self.panels.len() {
            self.task_list_state.select(Some(index));
        }
    }

    pub fn next_item(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        let i = match self.task_list_state.selected() {
            Some(i) if i + 1 < self.panels.len() => i + 1,
            _ => 0,
        };
        self.task_list_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        let i = match self.task_list_state.selected() {
            Some(0) | None => self.panels.len() - 1,
            Some(i) => i - 1,
        };
        self.task_list_state.select(Some(i));
    }

    pub fn press(&mut self, index: usize, button: PanelButton) {
        if let Some(panel) = self.panels.get_mut(index) {
            panel.press(button, &mut self.controller);
        }
    }

    fn press_selected(&mut self, button: PanelButton) {
        if let Some(i) = self.selected_panel() {
            self.press(i, button);
        }
    }

    fn selected_editor(&mut self) -> Option<&mut TextEditor> {
        let i = self.selected_panel()?;
        self.panels.get_mut(i).map(|panel| &mut panel.desc)
    }

    pub fn open_menu(&mut self) {
        self.mode = InputMode::Menu;
        self.menu_state.select(Some(0));
        self.show_menu_tip();
    }

    pub fn close_menu(&mut self) {
        self.mode = InputMode::Normal;
        self.menu_state.select(None);
        self.controller.clear_message();
    }

    fn show_menu_tip(&mut self) {
        let tip = self
            .menu_state
            .selected()
            .and_then(|i| self.actions.menu_entries().get(i).map(|a| a.status_tip));
        if let Some(tip) = tip {
            self.controller.show_message(tip);
        }
    }

    fn trigger_menu_entry(&mut self, index: usize) {
        let command = self.actions.menu_entries().get(index).map(|a| a.command);
        self.close_menu();
        if let Some(command) = command {
            self.trigger(command);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.actions.command_for(&key) {
            self.trigger(command);
            return;
        }

        match self.mode {
            InputMode::Menu => self.handle_menu_key(key),
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let count = self.actions.menu_entries().len();
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.close_menu(),
            KeyCode::Down if count > 0 => {
                let i = self.menu_state.selected().map_or(0, |i| (i + 1) % count);
                self.menu_state.select(Some(i));
                self.show_menu_tip();
            }
            KeyCode::Up if count > 0 => {
                let i = self
                    .menu_state
                    .selected()
                    .map_or(0, |i| if i == 0 { count - 1 } else { i - 1 });
                self.menu_state.select(Some(i));
                self.show_menu_tip();
            }
            KeyCode::Enter => {
                if let Some(i) = self.menu_state.selected() {
                    self.trigger_menu_entry(i);
                }
            }
            _ => {}
        }
    }

    /// Bracketed paste goes into the description being edited; ignored otherwise.
    pub fn handle_paste(&mut self, text: &str) {
        if self.mode != InputMode::Editing {
            return;
        }
        if let Some(editor) = self.selected_editor() {
            editor.insert_str(text);
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.mode = InputMode::Normal;
            return;
        }
        let Some(editor) = self.selected_editor() else {
            self.mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.insert_char(c);
            }
            KeyCode::Enter => editor.insert_newline(),
            KeyCode::Backspace => editor.delete_char(),
            KeyCode::Left => editor.move_cursor_left(),
            KeyCode::Right => editor.move_cursor_right(),
            KeyCode::Up => editor.move_cursor_up(),
            KeyCode::Down => editor.move_cursor_down(),
            KeyCode::Home => editor.move_to_start_of_line(),
            KeyCode::End => editor.move_to_end_of_line(),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.current_tab = self.current_tab.next();
                return;
            }
            KeyCode::F(10) => {
                self.open_menu();
                return;
            }
            _ => {}
        }

        match self.current_tab {
            MainTab::Spell => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.next_item(),
                KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
                KeyCode::Enter | KeyCode::Char('e') => {
                    if self.selected_panel().is_some() {
                        self.mode = InputMode::Editing;
                    }
                }
                KeyCode::Char('a') => self.press_selected(PanelButton::Accept),
                KeyCode::Char('x') => self.press_selected(PanelButton::Abort),
                KeyCode::Char('r') => self.press_selected(PanelButton::Reset),
                _ => {}
            },
            MainTab::Logs => {
                let page = self.log_view_height.max(1);
                let logs = &mut self.controller.logs;
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => logs.scroll_up(1),
                    KeyCode::Down | KeyCode::Char('j') => logs.scroll_down(1),
                    KeyCode::PageUp => logs.scroll_up(page),
                    KeyCode::PageDown => logs.scroll_down(page),
                    KeyCode::End => logs.scroll_to_bottom(),
                    _ => {}
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let hit = self
            .hit_areas
            .iter()
            .rev()
            .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))
            .map(|(_, hit)| *hit);

        if self.mode == InputMode::Menu && !matches!(hit, Some(Hit::MenuEntry(_))) {
            self.close_menu();
            return;
        }

        match hit {
            Some(Hit::Menu) => self.open_menu(),
            Some(Hit::MenuEntry(i)) => self.trigger_menu_entry(i),
            Some(Hit::Tab(tab)) => {
                self.current_tab = tab;
                self.mode = InputMode::Normal;
            }
            Some(Hit::Panel(i)) => {
                self.select_panel(i);
                self.mode = InputMode::Normal;
            }
            Some(Hit::Desc(i)) => {
                self.select_panel(i);
                self.mode = InputMode::Editing;
            }
            Some(Hit::Button(i, button)) => {
                self.select_panel(i);
                self.mode = InputMode::Normal;
                self.press(i, button);
            }
            None => {}
        }
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn run_tui(config: &Config, tasks: Vec<Task>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(tasks);
    let res = run_app(&mut terminal, &mut app, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(config.tick_rate)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Paste(text) => app.handle_paste(&text),
            _ => {}
        }
    }
    log::info!("Window closed");
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    app.hit_areas.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_menu_bar(f, app, chunks[0]);

    let body = Block::default()
        .borders(Borders::ALL)
        .title(WINDOW_TITLE)
        .style(Style::default().fg(Color::White));
    let inner = body.inner(chunks[1]);
    f.render_widget(body, chunks[1]);

    match app.current_tab {
        MainTab::Spell => render_spell(f, app, inner),
        MainTab::Logs => render_logs(f, app, inner),
    }

    render_tab_bar(f, app, chunks[2]);

    let status = Paragraph::new(app.controller.status().to_string())
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(status, chunks[3]);

    if app.mode == InputMode::Menu {
        render_menu(f, app, chunks[0]);
    }
}

fn render_menu_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let label = format!(" {MENU_TITLE} ");
    let style = if app.mode == InputMode::Menu {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let width = (label.chars().count() as u16).min(area.width);
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(label, style),
        Span::styled("  F10: menu", Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(bar, area);
    app.hit_areas.push((Rect { width, ..area }, Hit::Menu));
}

fn render_menu(f: &mut Frame, app: &mut App, bar: Rect) {
    let entries = app.actions.menu_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|action| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", action.label), Style::default().fg(Color::White)),
                Span::styled(action.shortcut.to_string(), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();
    let height = entries.len() as u16 + 2;
    let screen = f.area();
    let area = Rect {
        x: bar.x,
        y: bar.y + 1,
        width: 24.min(screen.width),
        height: height.min(screen.height.saturating_sub(bar.y + 1)),
    };

    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(MENU_TITLE))
        .style(Style::default().bg(Color::DarkGray))
        .highlight_style(Style::default().bg(Color::LightGreen).add_modifier(Modifier::BOLD));

    f.render_widget(Clear, area);
    f.render_stateful_widget(menu, area, &mut app.menu_state);

    for i in 0..entries.len() {
        let row = area.y + 1 + i as u16;
        if row + 1 < area.y + area.height {
            let rect = Rect::new(area.x + 1, row, area.width.saturating_sub(2), 1);
            app.hit_areas.push((rect, Hit::MenuEntry(i)));
        }
    }
}

fn render_tab_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let titles: Vec<Line> = MainTab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Black),
        );
    f.render_widget(tabs, area);

    // Mirrors the Tabs layout: one space of padding each side and a one-cell divider.
    let mut x = area.x;
    for tab in MainTab::ALL {
        let width = tab.title().chars().count() as u16 + 2;
        let rect = Rect::new(x, area.y, width.min(area.right().saturating_sub(x)), area.height);
        app.hit_areas.push((rect, Hit::Tab(tab)));
        x = x.saturating_add(width + 1);
    }
}

fn render_spell(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(TASK_LIST_WIDTH), Constraint::Min(0)])
        .split(area);

    let frame_style = Style::default().fg(Color::Gray);

    let items: Vec<ListItem> = app
        .panels
        .iter()
        .map(|panel| ListItem::new(Line::from(panel.task().name.clone())))
        .collect();
    let task_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(frame_style).title("Tasks"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(task_list, chunks[0], &mut app.task_list_state);

    let right = Block::default().borders(Borders::ALL).border_style(frame_style);
    let panels_area = right.inner(chunks[1]);
    f.render_widget(right, chunks[1]);

    if app.panels.is_empty() {
        let hint = Paragraph::new(
            "No tasks loaded.\n\nStart with --tasks <file.json> to review tasks.\n\nControls:\n• Tab: Switch tab\n• F10: Menu\n• Ctrl+Q: Quit",
        )
        .style(Style::default().fg(Color::White));
        f.render_widget(hint, panels_area);
        return;
    }

    let visible = (panels_area.height / PANEL_HEIGHT).max(1) as usize;
    let selected = app.selected_panel().unwrap_or(0);
    let first = (selected + 1).saturating_sub(visible);

    for (slot, index) in (first..app.panels.len()).take(visible).enumerate() {
        let y = panels_area.y + slot as u16 * PANEL_HEIGHT;
        let height = PANEL_HEIGHT.min(panels_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let rect = Rect::new(panels_area.x, y, panels_area.width, height);
        render_panel(f, app, index, rect);
    }
}

fn render_panel(f: &mut Frame, app: &mut App, index: usize, area: Rect) {
    let selected = app.selected_panel() == Some(index);
    let editing = selected && app.mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.hit_areas.push((area, Hit::Panel(index)));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_COLUMN_WIDTH)])
        .split(inner);
    let text_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(columns[0]);

    let panel = &mut app.panels[index];
    f.render_widget(
        Paragraph::new(panel.name_label()).style(Style::default().fg(Color::White)),
        text_rows[0],
    );

    let desc_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(if editing { "Description (Esc: done)" } else { "Description" });
    let desc_area = desc_block.inner(text_rows[1]);
    f.render_widget(desc_block, text_rows[1]);
    render_editor(f, &mut panel.desc, desc_area, editing);
    app.hit_areas.push((text_rows[1], Hit::Desc(index)));

    let buttons = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(3)])
        .split(columns[1]);
    for (button, rect) in PanelButton::ALL.into_iter().zip(buttons.iter()) {
        let color = match button {
            PanelButton::Accept => Color::Green,
            PanelButton::Abort => Color::Red,
            PanelButton::Reset => Color::Yellow,
        };
        let widget = Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(widget, *rect);
        app.hit_areas.push((*rect, Hit::Button(index, button)));
    }
}

fn render_editor(f: &mut Frame, editor: &mut TextEditor, area: Rect, show_cursor: bool) {
    let text_style = Style::default().fg(Color::White);
    if !show_cursor {
        let text = Paragraph::new(editor.get_content())
            .style(text_style)
            .wrap(Wrap { trim: false });
        f.render_widget(text, area);
        return;
    }

    let visible_height = area.height as usize;
    let visible_width = area.width as usize;
    editor.adjust_scroll_with_height(visible_height);
    editor.adjust_col_offset_with_width(visible_width);

    let start_line = editor.scroll_offset.min(editor.content.len());
    let end_line = (start_line + visible_height).min(editor.content.len());
    let start_col = editor.col_offset;

    let mut lines: Vec<Line> = Vec::new();
    for i in start_line..end_line {
        let chars: Vec<char> = editor.content[i]
            .chars()
            .skip(start_col)
            .take(visible_width)
            .collect();
        if i != editor.cursor_row {
            lines.push(Line::from(Span::styled(chars.iter().collect::<String>(), text_style)));
            continue;
        }

        let col = editor.cursor_col.saturating_sub(start_col).min(chars.len());
        let mut spans = Vec::new();
        if col > 0 {
            spans.push(Span::styled(chars[..col].iter().collect::<String>(), text_style));
        }
        let cursor_char = chars.get(col).map_or(" ".to_string(), |c| c.to_string());
        spans.push(Span::styled(cursor_char, Style::default().bg(Color::Cyan).fg(Color::Black)));
        if col + 1 < chars.len() {
            spans.push(Span::styled(chars[col + 1..].iter().collect::<String>(), text_style));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_logs(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let inner = block.inner(area);
    let visible_height = inner.height as usize;
    app.log_view_height = visible_height;

    let logs = &app.controller.logs;
    let offset = logs.scroll_offset(visible_height);
    let output = Paragraph::new(logs.rendered())
        .block(block)
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(output, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn click_on(app: &mut App, target: Hit) {
        let (rect, _) = *app
            .hit_areas
            .iter()
            .find(|(_, hit)| *hit == target)
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + rect.width / 2,
            row: rect.y + rect.height / 2,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn last_message(app: &App) -> String {
        app.controller.logs.entries().last().unwrap().message.clone()
    }

    #[test]
    fn startup_logs_started() {
        let app = App::new(Vec::new());
        assert_eq!(app.controller.logs.entries().len(), 1);
        assert_eq!(last_message(&app), "Started.");
        assert!(app.controller.status().ends_with("] Started."));
        assert!(app.is_running());
    }

    #[test]
    fn window_shows_title_tabs_and_panel() {
        let mut app = App::new(vec![Task::new("Fix bug", "Original text")]);
        let terminal = draw(&mut app);
        let text = screen(&terminal);

        assert!(text.contains(WINDOW_TITLE));
        assert!(text.contains("Magic Prompt"));
        assert!(text.contains("Spell"));
        assert!(text.contains("Logs"));
        assert!(text.contains("Name: Fix bug"));
        assert!(text.contains("Original text"));
        assert!(text.contains("Accept"));
        assert!(text.contains("Abort"));
        assert!(text.contains("Reset"));
        assert!(text.contains("Started."));
    }

    #[test]
    fn empty_task_list_shows_hint() {
        let mut app = App::new(Vec::new());
        let text = screen(&draw(&mut app));
        assert!(text.contains("No tasks loaded."));
    }

    #[test]
    fn edit_reset_accept_by_keyboard() {
        let mut app = App::new(vec![Task::new("Fix bug", "Original text")]);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, InputMode::Editing);
        app.handle_key(key(KeyCode::End));
        type_text(&mut app, " plus edits");
        assert_eq!(app.panels[0].desc_text(), "Original text plus edits");

        // While editing, letters are text, not shortcuts.
        assert_eq!(last_message(&app), "Started.");

        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.panels[0].desc_text(), "Original text");
        assert_eq!(last_message(&app), "Task reset: Fix bug");

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(last_message(&app), "Task accepted: Fix bug");

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(last_message(&app), "Task aborted: Fix bug");
    }

    #[test]
    fn ctrl_q_closes_window_from_any_mode() {
        let mut app = App::new(vec![Task::new("t", "d")]);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(app.state, WindowState::Closed);
        assert_eq!(app.panels[0].desc_text(), "d");
    }

    #[test]
    fn menu_quit_entry() {
        let mut app = App::new(Vec::new());
        app.handle_key(key(KeyCode::F(10)));
        assert_eq!(app.mode, InputMode::Menu);
        assert_eq!(app.controller.status(), "Quit");

        let text = screen(&draw(&mut app));
        assert!(text.contains("Ctrl+Q"));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, InputMode::Normal);
        assert!(app.controller.status().ends_with("] Started."));

        app.handle_key(key(KeyCode::F(10)));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, WindowState::Closed);
    }

    #[test]
    fn mouse_clicks_drive_panel_buttons() {
        let mut app = App::new(vec![
            Task::new("first", "one"),
            Task::new("second", "two"),
        ]);
        draw(&mut app);

        click_on(&mut app, Hit::Desc(1));
        assert_eq!(app.selected_panel(), Some(1));
        assert_eq!(app.mode, InputMode::Editing);
        type_text(&mut app, "X");
        assert_eq!(app.panels[1].desc_text(), "Xtwo");

        draw(&mut app);
        click_on(&mut app, Hit::Button(1, PanelButton::Accept));
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(last_message(&app), "Task accepted: second");

        draw(&mut app);
        click_on(&mut app, Hit::Button(1, PanelButton::Reset));
        assert_eq!(app.panels[1].desc_text(), "two");
        assert_eq!(app.panels[0].desc_text(), "one");
    }

    #[test]
    fn clicking_tabs_and_menu() {
        let mut app = App::new(Vec::new());
        draw(&mut app);
        click_on(&mut app, Hit::Tab(MainTab::Logs));
        assert_eq!(app.current_tab, MainTab::Logs);

        draw(&mut app);
        click_on(&mut app, Hit::Menu);
        assert_eq!(app.mode, InputMode::Menu);

        draw(&mut app);
        click_on(&mut app, Hit::MenuEntry(0));
        assert_eq!(app.state, WindowState::Closed);
    }

    #[test]
    fn log_tab_follows_newest_entry() {
        let mut app = App::new(Vec::new());
        app.current_tab = MainTab::Logs;
        for n in 1..=100 {
            app.controller.add_log(format!("entry {n:03}"));
        }
        let text = screen(&draw(&mut app));
        assert!(text.contains("entry 100"));
        assert!(!text.contains("entry 001"));

        app.handle_key(key(KeyCode::PageUp));
        let text = screen(&draw(&mut app));
        assert!(text.contains("entry 035"));
        assert!(!text.contains("entry 090"));

        app.controller.add_log("entry 101");
        let text = screen(&draw(&mut app));
        assert!(text.contains("entry 101"));
        assert!(text.contains("entry 090"));
        assert!(!text.contains("entry 035"));
    }

    fn cursor_cells(terminal: &Terminal<TestBackend>) -> usize {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .filter(|cell| cell.bg == Color::Cyan)
            .count()
    }

    #[test]
    fn cursor_stays_visible_past_panel_width() {
        let mut app = App::new(vec![Task::new("t", "y".repeat(300))]);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::End));
        let terminal = draw(&mut app);
        assert_eq!(cursor_cells(&terminal), 1);

        type_text(&mut app, "TAIL");
        let terminal = draw(&mut app);
        assert_eq!(cursor_cells(&terminal), 1);
        assert!(screen(&terminal).contains("yyTAIL"));
        assert!(app.panels[0].desc.col_offset > 0);

        app.handle_key(key(KeyCode::Home));
        let terminal = draw(&mut app);
        assert_eq!(cursor_cells(&terminal), 1);
        assert_eq!(app.panels[0].desc.col_offset, 0);
    }

    #[test]
    fn long_description_wraps_when_not_editing() {
        let desc = format!("{}tail", "word ".repeat(20));
        let mut app = App::new(vec![Task::new("t", desc)]);
        let terminal = draw(&mut app);
        assert!(screen(&terminal).contains("tail"));
        assert_eq!(cursor_cells(&terminal), 0);
    }

    #[test]
    fn paste_goes_into_edited_description() {
        let mut app = App::new(vec![Task::new("t", "")]);
        app.handle_paste("ignored");
        assert_eq!(app.panels[0].desc_text(), "");

        app.handle_key(key(KeyCode::Enter));
        app.handle_paste("line one\r\nline two");
        assert_eq!(app.panels[0].desc_text(), "line one\nline two");
    }

    #[test]
    fn selection_wraps_and_keeps_panel_visible() {
        let tasks = (0..6).map(|n| Task::new(format!("task {n}"), "")).collect();
        let mut app = App::new(tasks);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_panel(), Some(5));

        let text = screen(&draw(&mut app));
        assert!(text.contains("Name: task 5"));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_panel(), Some(0));
    }
}
