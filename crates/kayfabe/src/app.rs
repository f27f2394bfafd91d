//! The rank list controller.
//!
//! [`RankList`] owns the roster, the active filters and the current page.  It
//! recomputes the whole [`PageView`] through [`paginate`] whenever a filter or
//! the page changes, and keeps its child components in step with the result.
//!
//! Key routing: the terminal subscription maps each key straight to the child
//! that handles it.  Children report edits and selections back as event
//! messages (`Changed`, `Selected`, `Navigate`) which `update` intercepts.

use crate::config::RankListConfig;
use crate::i18n::{labels, Labels};
use crate::widgets::pager::{self, PageNav, Pager};
use crate::widgets::promotions::{self, PromotionTabs};
use crate::widgets::search::{self, SearchBar};
use crate::widgets::RankTable;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kayfabe_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use kayfabe_rank::{
    paginate, Debouncer, FilterState, Language, PageView, PromotionId, Roster, Ticket,
};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Initialization data for [`RankList`].
#[derive(Debug, Clone)]
pub struct RankListFlags {
    pub roster: Roster,
    pub config: RankListConfig,
}

/// Messages handled by [`RankList`].
#[derive(Debug)]
pub enum Msg {
    Search(search::Message),
    /// A debounce delay elapsed.
    SearchDue(Ticket),
    Promotion(promotions::Message),
    Pager(pager::Message),
    ToggleLanguage,
    Resize,
    Suspend,
    Quit,
    Noop,
}

/// Filterable, paginated rank list.
pub struct RankList {
    roster: Roster,
    filter: FilterState,
    page_size: usize,
    current_page: usize,
    view: PageView,
    debouncer: Debouncer<String>,
    searches_run: usize,
    language: Language,
    english_control_active: bool,
    search: SearchBar,
    promotions: PromotionTabs,
    pager: Pager,
}

impl RankList {
    /// Build the controller and render the starting page.
    pub fn new(roster: Roster, config: RankListConfig) -> Self {
        let language = Language::default();
        let text = labels(language);
        let filter = FilterState::new()
            .with_gimmick(config.gimmick.as_str())
            .with_promotion(config.promotion);
        let page_size = config.page_size.max(1);
        let view = paginate(&roster, &filter, config.page, page_size);

        let mut promotions = PromotionTabs::new(text.all_promotions, &roster.promotions);
        if !promotions.select(config.promotion) {
            tracing::warn!(promotion = ?config.promotion, "initial promotion has no control");
        }

        let mut list = Self {
            current_page: view.page,
            view,
            filter,
            page_size,
            debouncer: Debouncer::new(config.debounce),
            searches_run: 0,
            language,
            english_control_active: false,
            search: SearchBar::new(text.search_prompt, text.search_placeholder)
                .with_query(config.gimmick.as_str()),
            promotions,
            pager: Pager::new(),
            roster,
        };
        list.pager.sync(&list.view);
        list.init_language(&config.locale);
        list.refresh_labels();
        list
    }

    /// Run a gimmick search now, bypassing the debounce, and show page 1.
    pub fn search_gimmick(&mut self, text: &str) {
        tracing::debug!(gimmick = text, "search");
        self.searches_run += 1;
        self.filter.set_gimmick(text);
        self.render_page(1);
    }

    /// Schedule a search for `text` once input has been quiet for the
    /// debounce delay.  Any search queued earlier is superseded.
    pub fn queue_search(&mut self, text: String) -> Command<Msg> {
        let delay = self.debouncer.delay();
        let ticket = self.debouncer.schedule(text);
        Command::after(delay, Msg::SearchDue(ticket))
    }

    /// Restrict the list to one promotion (`None` shows every item) and show
    /// page 1.  Returns `false`, changing nothing, when no control carries
    /// `promotion`.
    pub fn filter_promotion(&mut self, promotion: Option<PromotionId>) -> bool {
        tracing::debug!(?promotion, "filter promotion");
        if !self.promotions.select(promotion) {
            tracing::warn!(?promotion, "promotion has no control");
            return false;
        }
        self.filter.set_promotion(promotion);
        self.render_page(1);
        self.refresh_labels();
        true
    }

    /// Recompute visibility and control states for page `page` (0 means 1).
    pub fn render_page(&mut self, page: usize) {
        self.view = paginate(&self.roster, &self.filter, page, self.page_size);
        self.current_page = self.view.page;
        self.pager.sync(&self.view);
        self.refresh_summary();
        tracing::debug!(
            page = self.current_page,
            visible = self.view.visible_count,
            shown = self.view.shown_count(),
            "render page"
        );
    }

    /// Step back one page.  Returns `false`, changing nothing, on page 1.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.render_page(self.current_page - 1);
        true
    }

    /// Step forward one page.  Not bounded: past the last page the list is
    /// simply empty.
    pub fn next_page(&mut self) {
        self.render_page(self.current_page.saturating_add(1));
    }

    /// Jump straight to `page`.
    pub fn goto_page(&mut self, page: usize) {
        self.render_page(page);
    }

    /// Switch to English unless `locale` is Japanese.
    pub fn init_language(&mut self, locale: &str) {
        match Language::detect(locale) {
            Some(language) => {
                tracing::info!(locale, %language, "language from locale");
                self.set_language(language);
            }
            None => tracing::debug!(locale, "keeping default language"),
        }
    }

    /// Flip between Japanese and English.
    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggled());
    }

    fn set_language(&mut self, language: Language) {
        self.language = language;
        self.english_control_active = language == Language::English;
        self.refresh_labels();
    }

    fn labels(&self) -> &'static Labels {
        labels(self.language)
    }

    fn refresh_labels(&mut self) {
        let text = self.labels();
        self.search.set_labels(text.search_prompt, text.search_placeholder);
        self.promotions.set_all_label(text.all_promotions);
        let caption = format!("{}: {}", text.promotion, self.promotions.selected_label());
        self.promotions.set_caption(caption);
        self.refresh_summary();
    }

    fn refresh_summary(&mut self) {
        let text = self.labels();
        self.pager.set_summary(format!(
            "{} {} {} {}  ·  {} {}",
            text.page,
            self.current_page,
            text.of,
            self.view.last_page(),
            self.view.visible_count,
            text.matches
        ));
    }

    pub fn view_state(&self) -> &PageView {
        &self.view
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the English language control is the active one.
    pub fn english_control_active(&self) -> bool {
        self.english_control_active
    }

    /// Label of the selected promotion control.
    pub fn promotion_label(&self) -> &str {
        self.promotions.selected_label()
    }

    /// Searches actually executed, after debouncing.
    pub fn searches_run(&self) -> usize {
        self.searches_run
    }

    /// Whether a typed search is waiting for its delay.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn language_line(&self) -> Line<'static> {
        let text = self.labels();
        let control = |label: &'static str, active: bool| {
            let style = if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("[{label}]"), style)
        };
        let mut spans = vec![
            Span::styled(text.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            control(text.language_ja, !self.english_control_active),
            Span::raw(" "),
            control(text.language_en, self.english_control_active),
        ];
        if self.debouncer.is_pending() {
            spans.push(Span::styled(
                format!("  {}", text.searching),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }
}

/// Map a key to the message for whichever part of the screen handles it.
pub fn route_key(key: KeyEvent) -> Msg {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Msg::Quit,
        (KeyCode::Char('l'), m) if m.contains(KeyModifiers::CONTROL) => Msg::ToggleLanguage,
        (KeyCode::Char('z'), m) if m.contains(KeyModifiers::CONTROL) => Msg::Suspend,
        (KeyCode::Tab | KeyCode::BackTab, _) => {
            Msg::Promotion(promotions::Message::KeyPress(key))
        }
        (KeyCode::Left | KeyCode::Right | KeyCode::PageUp | KeyCode::PageDown, _)
        | (KeyCode::F(_), _) => Msg::Pager(pager::Message::KeyPress(key)),
        (KeyCode::Char(c), KeyModifiers::ALT) if c.is_ascii_digit() => {
            Msg::Pager(pager::Message::KeyPress(key))
        }
        (KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Esc, _) => {
            Msg::Search(search::Message::KeyPress(key))
        }
        _ => Msg::Noop,
    }
}

impl Model for RankList {
    type Message = Msg;
    type Flags = RankListFlags;

    fn init(flags: RankListFlags) -> (Self, Command<Msg>) {
        let list = RankList::new(flags.roster, flags.config);
        tracing::info!(
            items = list.roster.len(),
            promotions = list.roster.promotions.len(),
            language = %list.language,
            "rank list ready"
        );
        let title = Command::set_title(list.labels().title);
        (list, title)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Search(search::Message::Changed(text)) => self.queue_search(text),
            Msg::Search(search::Message::Cleared) => {
                self.debouncer.cancel();
                self.search_gimmick("");
                Command::none()
            }
            Msg::Search(m) => self.search.update(m).map(Msg::Search),

            Msg::SearchDue(ticket) => {
                match self.debouncer.redeem(ticket) {
                    Some(text) => self.search_gimmick(&text),
                    None => tracing::trace!(?ticket, "stale search ticket"),
                }
                Command::none()
            }

            Msg::Promotion(promotions::Message::Selected(promotion)) => {
                self.filter_promotion(promotion);
                Command::none()
            }
            Msg::Promotion(m) => self.promotions.update(m).map(Msg::Promotion),

            Msg::Pager(pager::Message::Navigate(nav)) => {
                match nav {
                    PageNav::Previous => {
                        if !self.previous_page() {
                            tracing::debug!("already on the first page");
                        }
                    }
                    PageNav::Next => self.next_page(),
                    PageNav::Goto(page) => self.goto_page(page),
                }
                Command::none()
            }
            Msg::Pager(m) => self.pager.update(m).map(Msg::Pager),

            Msg::ToggleLanguage => {
                self.toggle_language();
                Command::set_title(self.labels().title)
            }
            Msg::Resize => Command::clear_screen(),
            Msg::Suspend => Command::suspend(),
            Msg::Quit => Command::quit(),
            Msg::Noop => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, search_area, promo_area, table_area, pager_area, help_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(Paragraph::new(self.language_line()), title_area);
        self.search.view(frame, search_area);
        self.promotions.view(frame, promo_area);
        frame.render_widget(
            RankTable::new(&self.roster, &self.view, self.labels()),
            table_area,
        );
        self.pager.view(frame, pager_area);
        frame.render_widget(
            Paragraph::new(Line::styled(
                self.labels().help,
                Style::default().fg(Color::DarkGray),
            )),
            help_area,
        );
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(route_key(key)),
            TerminalEvent::Paste(text) => Some(Msg::Search(search::Message::Paste(text))),
            TerminalEvent::Resize(..) => Some(Msg::Resize),
        })]
    }
}
