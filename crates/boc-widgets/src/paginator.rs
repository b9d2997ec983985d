//! Paging window over a row sequence.
//!
//! The paginator tracks the *current row* rather than the current page; the
//! page is always derived as `current_row / page_size`. A page size of zero
//! disables paging and the window spans every row.

use boc_core::command::Command;
use boc_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::ops::Range;

/// The type of page indicator to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorType {
    /// Render dots: ● for the current page, ○ for the others.
    Dots,
    /// Render "Page 2/5".
    Arabic,
}

/// Messages for the paginator component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    FirstPage,
    NextPage,
    PrevPage,
    LastPage,
    /// Jump to a page (zero-indexed, clamped).
    GotoPage(usize),
    /// Emitted after navigation moved to a different page.
    PageChanged(usize),
}

#[derive(Debug, Clone)]
pub struct PaginatorStyle {
    pub active_dot: Style,
    pub inactive_dot: Style,
    pub text: Style,
}

impl Default for PaginatorStyle {
    fn default() -> Self {
        Self {
            active_dot: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            inactive_dot: Style::default().fg(Color::DarkGray),
            text: Style::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    row_count: usize,
    current_row: usize,
    paginator_type: PaginatorType,
    style: PaginatorStyle,
}

impl Paginator {
    /// Create a paginator over `row_count` rows. A `page_size` of zero
    /// disables paging.
    pub fn new(page_size: usize, row_count: usize) -> Self {
        Self {
            page_size,
            row_count,
            current_row: 0,
            paginator_type: PaginatorType::Arabic,
            style: PaginatorStyle::default(),
        }
    }

    pub fn with_type(mut self, t: PaginatorType) -> Self {
        self.paginator_type = t;
        self
    }

    pub fn with_style(mut self, style: PaginatorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.page_size > 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size, keeping the current row.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Change the number of rows, clamping the current row into range.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.current_row = self.current_row.min(self.last_row());
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    /// Point at `row` (clamped). The page follows.
    pub fn set_current_row(&mut self, row: usize) {
        self.current_row = row.min(self.last_row());
    }

    /// Current page (zero-indexed). Always 0 while paging is disabled.
    pub fn page(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.current_row / self.page_size
        }
    }

    /// Number of pages, at least 1.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 || self.row_count == 0 {
            1
        } else {
            self.row_count.div_ceil(self.page_size)
        }
    }

    pub fn on_first_page(&self) -> bool {
        self.page() == 0
    }

    pub fn on_last_page(&self) -> bool {
        self.page() + 1 >= self.page_count()
    }

    pub fn first_page(&mut self) {
        self.current_row = 0;
    }

    pub fn last_page(&mut self) {
        self.current_row = self.last_row();
    }

    /// Advance one page. No-op on the last page; never moves past the last
    /// row.
    pub fn next_page(&mut self) {
        if self.on_last_page() {
            return;
        }
        self.current_row = (self.current_row + self.page_size).min(self.last_row());
    }

    /// Go back one page. No-op on the first page.
    pub fn prev_page(&mut self) {
        if self.on_first_page() {
            return;
        }
        self.current_row = self.current_row.saturating_sub(self.page_size);
    }

    /// Jump to the first row of page `page` (clamped to the last page).
    pub fn go_to_page(&mut self, page: usize) {
        let page = page.min(self.page_count() - 1);
        self.current_row = (page * self.page_size).min(self.last_row());
    }

    /// Row range visible on the current page.
    pub fn window(&self) -> Range<usize> {
        if self.page_size == 0 {
            return 0..self.row_count;
        }
        let start = (self.page() * self.page_size).min(self.row_count);
        let end = (start + self.page_size).min(self.row_count);
        start..end
    }

    fn last_row(&self) -> usize {
        self.row_count.saturating_sub(1)
    }
}

impl Component for Paginator {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let before = self.page();
        match msg {
            Message::FirstPage => self.first_page(),
            Message::NextPage => self.next_page(),
            Message::PrevPage => self.prev_page(),
            Message::LastPage => self.last_page(),
            Message::GotoPage(n) => self.go_to_page(n),
            Message::PageChanged(_) => return Command::none(),
        }
        let after = self.page();
        if after != before {
            Command::message(Message::PageChanged(after))
        } else {
            Command::none()
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 || !self.is_enabled() {
            return;
        }

        match self.paginator_type {
            PaginatorType::Dots => {
                let pages = self.page_count();
                let mut spans = Vec::with_capacity(pages * 2);
                for i in 0..pages {
                    if i > 0 {
                        spans.push(Span::raw(" "));
                    }
                    if i == self.page() {
                        spans.push(Span::styled("●", self.style.active_dot));
                    } else {
                        spans.push(Span::styled("○", self.style.inactive_dot));
                    }
                }
                frame.render_widget(Paragraph::new(Line::from(spans)), area);
            }
            PaginatorType::Arabic => {
                let text = format!("Page {}/{}", self.page() + 1, self.page_count());
                let span = Span::styled(text, self.style.text);
                frame.render_widget(Paragraph::new(span), area);
            }
        }
    }
}
