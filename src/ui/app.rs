use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::{debug, warn};
use open::that as open_image;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;

use crate::config::Config;
use crate::db::{fetch_countries, Store};
use crate::error::HotelResult;
use crate::images::TourImage;
use crate::manager::{ensure_unreferenced, DeleteOutcome, HotelPage};

use super::forms::{ConfirmHotelDelete, HotelField, HotelForm};
use super::helpers::{centered_rect, image_label, stars_label, status_style, surface_hotel_error};
use super::screens::{HotelScreen, TourScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the filter summary above the tour list.
const FILTER_HEIGHT: u16 = 4;

/// Which screen is showing.
enum Screen {
    Tours,
    Hotels(HotelScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    Searching(SearchState),
    AddingHotel(HotelForm),
    EditingHotel { id: i64, form: HotelForm },
    ConfirmHotelDelete(ConfirmHotelDelete),
}

/// Live search over the tour list. The text is applied on every keystroke;
/// `previous` is restored when the search is abandoned with Esc.
struct SearchState {
    previous: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Store,
    config: Config,
    tours: TourScreen,
    countries: Vec<String>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Load the initial tour listing and the country suggestions.
    pub fn new(store: Store, config: Config) -> Result<Self> {
        let tours = TourScreen::load(&store, config.search_match, &config.image_dir)?;
        let countries = fetch_countries(&store)?;
        Ok(Self {
            store,
            config,
            tours,
            countries,
            screen: Screen::Tours,
            mode: Mode::Normal,
            status: None,
        })
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => {
                if matches!(self.screen, Screen::Tours) {
                    self.handle_tours_key(code, &mut exit)?
                } else {
                    self.handle_hotels_key(code, &mut exit)?
                }
            }
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::AddingHotel(form) => self.handle_hotel_form(code, None, form),
            Mode::EditingHotel { id, form } => self.handle_hotel_form(code, Some(id), form),
            Mode::ConfirmHotelDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        Ok(exit)
    }

    fn handle_tours_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.tours.move_selection(-1),
            KeyCode::Down => self.tours.move_selection(1),
            KeyCode::PageUp => self.tours.move_selection(-5),
            KeyCode::PageDown => self.tours.move_selection(5),
            KeyCode::Home => self.tours.select_first(),
            KeyCode::End => self.tours.select_last(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    previous: self.tours.filter.search.clone(),
                }));
            }
            KeyCode::Char('t') => {
                self.tours.cycle_type(1);
                self.reload_tours()?;
            }
            KeyCode::Char('T') => {
                self.tours.cycle_type(-1);
                self.reload_tours()?;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.tours.filter.active_only = !self.tours.filter.active_only;
                self.reload_tours()?;
                let message = if self.tours.filter.active_only {
                    "Showing active tours only."
                } else {
                    "Showing all tours."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.tours.filter.sort = self.tours.filter.sort.cycle();
                self.reload_tours()?;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.tours.reload_types(&self.store)?;
                self.reload_tours()?;
                self.set_status("Tours reloaded.", StatusKind::Info);
            }
            KeyCode::Enter => self.open_current_image(),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.clear_status();
                self.open_hotels()?;
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode, state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.tours.filter.search = state.previous;
                self.reload_tours()?;
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Backspace => {
                if self.tours.filter.search.pop().is_some() {
                    self.reload_tours()?;
                }
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.tours.filter.search.push(ch);
                self.reload_tours()?;
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    fn handle_hotels_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Screen::Hotels(hotels) = &mut self.screen else {
            return Ok(Mode::Normal);
        };

        let mut paged: Option<HotelResult<HotelPage>> = None;
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let mut back_to_tours = false;

        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                back_to_tours = true;
            }
            KeyCode::Up => hotels.move_selection(-1),
            KeyCode::Down => hotels.move_selection(1),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('[') => {
                paged = Some(hotels.manager.previous_page(&self.store));
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(']') => {
                paged = Some(hotels.manager.next_page(&self.store));
            }
            KeyCode::Char('+') => {
                self.status = None;
                return Ok(Mode::AddingHotel(HotelForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => match hotels.current_hotel() {
                Some(current) => match hotels.manager.hotel(&self.store, current.id) {
                    Ok(hotel) => {
                        self.status = None;
                        return Ok(Mode::EditingHotel {
                            id: hotel.id,
                            form: HotelForm::from_hotel(&hotel),
                        });
                    }
                    Err(err) => {
                        status_to_set = Some((surface_hotel_error(&err), StatusKind::Error));
                    }
                },
                None => {
                    status_to_set = Some((
                        "No hotel selected to edit.".to_string(),
                        StatusKind::Error,
                    ));
                }
            },
            KeyCode::Char('-') | KeyCode::Delete => match hotels.current_hotel() {
                Some(hotel) => match ensure_unreferenced(hotel) {
                    Ok(()) => {
                        self.status = None;
                        return Ok(Mode::ConfirmHotelDelete(ConfirmHotelDelete::from(hotel)));
                    }
                    Err(err) => {
                        status_to_set = Some((surface_hotel_error(&err), StatusKind::Error));
                    }
                },
                None => {
                    status_to_set = Some((
                        "No hotel selected to delete.".to_string(),
                        StatusKind::Error,
                    ));
                }
            },
            _ => {}
        }

        if let Some(result) = paged {
            match result {
                Ok(page) => {
                    hotels.show(page, None);
                    self.status = None;
                }
                Err(err) if err.is_rejection() => {
                    status_to_set = Some((surface_hotel_error(&err), StatusKind::Error));
                }
                Err(err) => return Err(err.into()),
            }
        }

        if back_to_tours {
            self.screen = Screen::Tours;
            self.clear_status();
        } else if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }

        Ok(Mode::Normal)
    }

    fn handle_hotel_form(&mut self, code: KeyCode, id: Option<i64>, mut form: HotelForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                if !form.cancel_autocomplete() {
                    let message = if id.is_some() {
                        "Edit cancelled."
                    } else {
                        "Add hotel cancelled."
                    };
                    self.set_status(message, StatusKind::Info);
                    keep_open = false;
                }
            }
            KeyCode::Tab => {
                if !form.accept_suggestion() {
                    form.next_field();
                }
                form.update_suggestion(&self.countries);
            }
            KeyCode::BackTab => {
                form.previous_field();
                form.update_suggestion(&self.countries);
            }
            KeyCode::Backspace => {
                form.backspace();
                form.update_suggestion(&self.countries);
            }
            KeyCode::Enter => match self.save_hotel(id, &form) {
                Ok(()) => keep_open = false,
                Err(message) => {
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                    form.update_suggestion(&self.countries);
                }
            }
            _ => {}
        }

        match (keep_open, id) {
            (false, _) => Mode::Normal,
            (true, Some(id)) => Mode::EditingHotel { id, form },
            (true, None) => Mode::AddingHotel(form),
        }
    }

    /// Create or update from the form. Any failure, including store errors,
    /// comes back as text for the form so the user can retry or cancel.
    fn save_hotel(&mut self, id: Option<i64>, form: &HotelForm) -> Result<(), String> {
        let Screen::Hotels(hotels) = &mut self.screen else {
            return Err("Hotel list is not open.".to_string());
        };

        let draft = form.draft();
        let result = match id {
            Some(id) => hotels.manager.update(&self.store, id, &draft),
            None => hotels.manager.create(&self.store, &draft),
        };
        let page = result.map_err(|err| surface_hotel_error(&err))?;
        hotels.show(page, id);

        let message = match id {
            Some(_) => format!("Updated hotel \"{}\".", draft.name.trim()),
            None => format!("Added hotel \"{}\".", draft.name.trim()),
        };
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmHotelDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let Screen::Hotels(hotels) = &mut self.screen else {
                    return Mode::Normal;
                };
                // The dialog itself is the confirmation.
                match hotels.manager.delete(&self.store, confirm.id, |_| true) {
                    Ok(DeleteOutcome::Deleted(page)) => {
                        hotels.show(page, None);
                        self.set_status(
                            format!("Hotel \"{}\" deleted.", confirm.name),
                            StatusKind::Info,
                        );
                    }
                    Ok(DeleteOutcome::Declined) => {
                        self.set_status("Deletion cancelled.", StatusKind::Info);
                    }
                    Err(err) => {
                        self.set_status(surface_hotel_error(&err), StatusKind::Error);
                    }
                }
                Mode::Normal
            }
            _ => Mode::ConfirmHotelDelete(confirm),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Tours => self.draw_tours(frame, content_area),
            Screen::Hotels(hotels) => self.draw_hotels(frame, content_area, hotels),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingHotel(form) => self.draw_hotel_form(frame, area, "Add Hotel", form),
            Mode::EditingHotel { form, .. } => {
                self.draw_hotel_form(frame, area, "Edit Hotel", form)
            }
            Mode::ConfirmHotelDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(_) | Mode::Normal => {}
        }
    }

    fn draw_tours(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FILTER_HEIGHT), Constraint::Min(1)])
            .split(area);

        let filter = &self.tours.filter;
        let searching = matches!(self.mode, Mode::Searching(_));
        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let search_style = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Search: ", label_style),
                Span::styled(filter.search.clone(), search_style),
            ]),
            Line::from(vec![
                Span::styled("Type: ", label_style),
                Span::raw(filter.kind.to_string()),
                Span::raw("   "),
                Span::styled("Active only: ", label_style),
                Span::raw(if filter.active_only { "yes" } else { "no" }),
                Span::raw("   "),
                Span::styled("Sort: ", label_style),
                Span::raw(filter.sort.label()),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Tours"));
        frame.render_widget(header, chunks[0]);

        if searching {
            let cursor_x = chunks[0].x + 1 + "Search: ".len() as u16
                + filter.search.chars().count() as u16;
            frame.set_cursor_position((cursor_x, chunks[0].y + 1));
        }

        let list_area = chunks[1];
        if self.tours.cards.is_empty() {
            let message = Paragraph::new("No tours match the current filters.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, list_area);
            return;
        }

        let items: Vec<ListItem> = self
            .tours
            .cards
            .iter()
            .map(|card| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        card.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "Price: {:.2} RUB   Tickets: {}",
                        card.price, card.tickets
                    )),
                    Line::from(vec![
                        Span::raw("Status: "),
                        Span::styled(card.status.to_string(), status_style(card.status)),
                        Span::raw("   "),
                        Span::styled(
                            image_label(&card.image),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(""),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} tours", self.tours.cards.len())),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.tours.selected));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    fn draw_hotels(&self, frame: &mut Frame, area: Rect, hotels: &HotelScreen) {
        let page = &hotels.page;
        let title = format!(
            "Hotels  •  Page {} of {}  •  {} total",
            page.page, page.total_pages, page.total_rows
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if page.hotels.is_empty() {
            let message = Paragraph::new("No hotels yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["ID", "Name", "Stars", "Country", "Tours"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = page.hotels.iter().map(|hotel| {
            Row::new(vec![
                Cell::from(hotel.id.to_string()),
                Cell::from(hotel.name.clone()),
                Cell::from(stars_label(hotel.stars)),
                Cell::from(hotel.country.clone()),
                Cell::from(hotel.tours_count.to_string()),
            ])
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Length(7),
            Constraint::Percentage(30),
            Constraint::Length(6),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = TableState::default();
        state.select(Some(hotels.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&'static str, &'static str)] = match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => &[("[Enter]", "Keep"), ("[Esc]", "Discard")],
            (_, Mode::AddingHotel(_) | Mode::EditingHotel { .. }) => &[
                ("[Tab]", "Accept/Next"),
                ("[Enter]", "Save"),
                ("[Esc]", "Cancel"),
            ],
            (_, Mode::ConfirmHotelDelete(_)) => &[("[y]", "Delete"), ("[n]", "Keep")],
            (Screen::Hotels(_), _) => &[
                ("[↑↓]", "Select"),
                ("[←→]", "Page"),
                ("[+]", "Add"),
                ("[e]", "Edit"),
                ("[-]", "Delete"),
                ("[Esc]", "Tours"),
                ("[q]", "Quit"),
            ],
            (Screen::Tours, _) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Image"),
                ("[f]", "Search"),
                ("[t]", "Type"),
                ("[a]", "Active"),
                ("[o]", "Sort"),
                ("[h]", "Hotels"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (key, action) in keys {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn draw_hotel_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &HotelForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = HotelField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to accept/switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        let row = HotelField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let cursor_x = inner.x + form.cursor_offset(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmHotelDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Are you sure you want to delete hotel \"{}\"?",
                confirm.name
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn reload_tours(&mut self) -> Result<()> {
        self.tours
            .reload(&self.store, self.config.search_match, &self.config.image_dir)
    }

    fn open_hotels(&mut self) -> Result<()> {
        let hotels = HotelScreen::open(&self.store, self.config.page_size)?;
        self.screen = Screen::Hotels(hotels);
        Ok(())
    }

    /// Hand the selected tour's picture to the system viewer. Failures only
    /// show up in the footer.
    fn open_current_image(&mut self) {
        let Some(card) = self.tours.current_card() else {
            return;
        };
        match &card.image {
            TourImage::Available(path) => {
                debug!("opening image {}", path.display());
                let name = card.name.clone();
                if let Err(err) = open_image(path) {
                    warn!("image viewer failed for {}: {err}", path.display());
                    self.set_status(format!("Failed to open image: {err}"), StatusKind::Error);
                } else {
                    self.set_status(format!("Opened image for {name}."), StatusKind::Info);
                }
            }
            TourImage::Unavailable(path) => {
                let message = format!("No image available ({}).", path.display());
                self.set_status(message, StatusKind::Error);
            }
        }
    }
}
