//! Feeds an archive page through `html5ever`'s streaming tokenizer.
//!
//! No document tree is built: tag and text tokens go straight to a
//! [`Navigator`], and the rows it reports go to a [`DailyRecordBuilder`].

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    states::RawKind, BufferQueue, Tag as HtmlTag, TagKind, Token, TokenSink, TokenSinkResult,
    Tokenizer, TokenizerOpts, TokenizerResult,
};

use super::{
    navigator::{Markup, Navigator, RowEvent, Tag},
    DailyRecordBuilder, RowOutcome, WeatherDataset,
};

/// Parses one station-month page into the records it contains.
///
/// Every call starts from a fresh navigator and builder, so the result
/// depends only on the arguments.
pub fn parse_month(html: &str, year: i32, month: u32) -> WeatherDataset {
    let mut parser = MonthParser::new(year, month);

    {
        let sink = MarkupSink {
            parser: &mut parser,
            text: String::new(),
        };
        let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
        let mut input = BufferQueue::new();
        input.push_back(StrTendril::from_slice(html));

        // The sink never asks to run a script, so feeding drains the input.
        match tokenizer.feed(&mut input) {
            TokenizerResult::Done => {}
            TokenizerResult::Script(()) => {
                tracing::debug!(year, month, "tokenizer paused at script")
            }
        }
        tokenizer.end();
    }

    parser.finish()
}

#[derive(Debug)]
/// Connects a navigator to a record builder for one document.
pub struct MonthParser {
    navigator: Navigator,
    builder: DailyRecordBuilder,
    dataset: WeatherDataset,
}

impl MonthParser {
    pub fn new(year: i32, month: u32) -> Self {
        MonthParser {
            navigator: Navigator::new(year, month),
            builder: DailyRecordBuilder::new(),
            dataset: WeatherDataset::new(),
        }
    }

    pub fn feed(&mut self, markup: Markup<'_>) {
        match self.navigator.handle(markup) {
            Some(RowEvent::Cell { field, raw }) => self.builder.record(field, raw),
            Some(RowEvent::RowClosed { date }) => self.close_row(date),
            None => {}
        }
    }

    fn close_row(&mut self, date: Option<chrono::NaiveDate>) {
        let outcome = self.builder.close_row(date);
        match &outcome {
            RowOutcome::Repaired(date, record) => {
                tracing::debug!(%date, ?record, "repaired partially missing day")
            }
            RowOutcome::AllInvalid | RowOutcome::Incomplete => {
                tracing::debug!(?date, ?outcome, "no record for row")
            }
            _ => {}
        }

        if let Some((date, record)) = outcome.record() {
            self.dataset.insert(date, record);
        }
    }

    pub fn finish(self) -> WeatherDataset {
        self.dataset
    }
}

/// Adapts tokenizer output to navigator markup events.
///
/// Character tokens are buffered and delivered as one text event at the next
/// tag, comment or end of input, so entity references do not split a value.
struct MarkupSink<'a> {
    parser: &'a mut MonthParser,
    text: String,
}

impl MarkupSink<'_> {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.parser.feed(Markup::Text(&text));
        }
    }

    fn tag(&mut self, tag: HtmlTag) -> TokenSinkResult<()> {
        self.flush_text();
        let kind = Tag::from_name(&tag.name);

        match tag.kind {
            TagKind::StartTag => {
                self.parser.feed(Markup::Open(kind));
                if tag.self_closing {
                    self.parser.feed(Markup::Close(kind));
                    return TokenSinkResult::Continue;
                }

                // The tokenizer has no tree builder to switch these for it.
                match &*tag.name {
                    "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" => return TokenSinkResult::RawData(RawKind::Rawtext),
                    _ => {}
                }
            }
            TagKind::EndTag => self.parser.feed(Markup::Close(kind)),
        }

        TokenSinkResult::Continue
    }
}

impl TokenSink for MarkupSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => return self.tag(tag),
            Token::CharacterTokens(text) => self.text.push_str(&text),
            Token::CommentToken(_) | Token::EOFToken => self.flush_text(),
            Token::DoctypeToken(_) | Token::NullCharacterToken | Token::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }

    fn end(&mut self) {
        self.flush_text();
    }
}

// -- Tests -------------------------------------------------------------------
