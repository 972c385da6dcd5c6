//! Tracks where a forward pass over the page markup currently is.
//!
//! The navigator sees only tag opens, tag closes and text. From those it keeps
//! a [`Position`] and the date of the row in progress, and hands labelled
//! cell text and row boundaries on as [`RowEvent`]s.

use chrono::NaiveDate;

use super::{dataset::is_day_literal, day_date, Field};

/// Number of leading data cells that carry temperatures.
const DATA_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The tags the navigator reacts to.
pub enum Tag {
    Tbody,
    Tr,
    Abbr,
    Td,
    Other,
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("tbody") {
            Tag::Tbody
        } else if name.eq_ignore_ascii_case("tr") {
            Tag::Tr
        } else if name.eq_ignore_ascii_case("abbr") {
            Tag::Abbr
        } else if name.eq_ignore_ascii_case("td") {
            Tag::Td
        } else {
            Tag::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One structural event from the tokenizer.
pub enum Markup<'a> {
    Open(Tag),
    Close(Tag),
    Text(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
/// What the navigator passes on to the record builder.
pub enum RowEvent {
    Cell { field: Field, raw: String },
    /// A row closed. `date` is the row's day, if a valid label was read.
    RowClosed { date: Option<NaiveDate> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Nesting context within one document.
pub struct Position {
    pub in_table_body: bool,
    pub in_row: bool,
    pub in_day_label: bool,
    pub in_data_cell: bool,
    /// Zero-based index of the next data cell in the row.
    pub column: usize,
}

#[derive(Debug)]
/// State machine over the markup of one station-month page.
///
/// A navigator belongs to a single document; build a fresh one per page.
pub struct Navigator {
    year: i32,
    month: u32,
    position: Position,
    current_date: Option<NaiveDate>,
}

impl Navigator {
    pub fn new(year: i32, month: u32) -> Self {
        Navigator {
            year,
            month,
            position: Position::default(),
            current_date: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    #[cfg(test)]
    fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    pub fn handle(&mut self, markup: Markup<'_>) -> Option<RowEvent> {
        match markup {
            Markup::Open(tag) => {
                self.on_tag_open(tag);
                None
            }
            Markup::Close(tag) => self.on_tag_close(tag),
            Markup::Text(text) => self.on_text(text),
        }
    }

    pub fn on_tag_open(&mut self, tag: Tag) {
        let pos = &mut self.position;
        match tag {
            Tag::Tbody => pos.in_table_body = true,
            Tag::Tr if pos.in_table_body => {
                pos.in_row = true;
                pos.column = 0;
            }
            Tag::Abbr if pos.in_row => pos.in_day_label = true,
            Tag::Td if pos.in_row && pos.column < DATA_COLUMNS => pos.in_data_cell = true,
            _ => {}
        }
    }

    pub fn on_tag_close(&mut self, tag: Tag) -> Option<RowEvent> {
        let pos = &mut self.position;
        match tag {
            Tag::Tbody => pos.in_table_body = false,
            Tag::Tr => {
                pos.in_row = false;
                return Some(RowEvent::RowClosed {
                    date: self.current_date.take(),
                });
            }
            Tag::Abbr => pos.in_day_label = false,
            Tag::Td => {
                pos.in_data_cell = false;
                // Ignored columns still advance the counter.
                pos.column += 1;
            }
            Tag::Other => {}
        }
        None
    }

    pub fn on_text(&mut self, fragment: &str) -> Option<RowEvent> {
        let text = fragment.trim();

        if self.position.in_day_label && is_day_literal(text) {
            match day_date(self.year, self.month, text) {
                Ok(date) => self.current_date = Some(date),
                Err(e) => tracing::warn!("{e}"),
            }
            return None;
        }

        if self.position.in_data_cell && self.current_date.is_some() {
            let field = Field::from_column(self.position.column)?;
            return Some(RowEvent::Cell {
                field,
                raw: text.to_string(),
            });
        }

        None
    }
}

// -- Tests -------------------------------------------------------------------
