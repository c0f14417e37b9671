use strum_macros::Display;

use super::token::Token;

/// The tokenizer state machine.
///
/// The markup we accept is flat enough that two states suffice: either we
/// are collecting text, or we are collecting the body of a tag between `<`
/// and `>`. Comments, doctypes and attribute quoting are all resolved after
/// the closing `>` is seen, from the buffered tag body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    ///
    /// Buffering text outside of any tag.
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    ///
    /// Buffering a tag body after `<`.
    TagOpen,
}

/// Splits raw markup into a stream of [`Token`]s.
///
/// # Example
///
/// ```
/// use wren_html::{HTMLTokenizer, Token};
///
/// let mut tokenizer = HTMLTokenizer::new("<p>Hi</p>".to_string());
/// tokenizer.run();
/// let tokens = tokenizer.into_tokens();
/// assert!(tokens[0].is_start_tag("p"));
/// assert_eq!(tokens.last(), Some(&Token::EndOfFile));
/// ```
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Text or tag body collected since the last state switch.
    pub(super) buffer: String,
    pub(super) token_stream: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The initial state is the data state."
    #[must_use]
    pub const fn new(input: String) -> Self {
        HTMLTokenizer {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            buffer: String::new(),
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after run() to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The current state of the state machine.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Data state: everything but `<` is text, `>` included.
    fn handle_data_state(&mut self, c: char) {
        if c == '<' {
            self.emit_text();
            self.switch_to(TokenizerState::TagOpen);
        } else {
            self.buffer.push(c);
        }
    }

    /// Tag open state: collect until `>`.
    ///
    /// A second `<` means the previous tag was never closed. What was
    /// collected so far is given back as text and a new tag starts.
    fn handle_tag_open_state(&mut self, c: char) {
        match c {
            '>' => {
                self.emit_tag();
                self.switch_to(TokenizerState::Data);
            }
            '<' => {
                log::debug!(target: "wren::html", "unterminated tag <{}", self.buffer);
                self.emit_text();
            }
            _ => self.buffer.push(c),
        }
    }

    /// Run the tokenizer to completion.
    pub fn run(&mut self) {
        while let Some(c) = self.consume() {
            match self.state {
                TokenizerState::Data => self.handle_data_state(c),
                TokenizerState::TagOpen => self.handle_tag_open_state(c),
            }
        }

        match self.state {
            TokenizerState::Data => self.emit_text(),
            TokenizerState::TagOpen => {
                if !self.buffer.is_empty() {
                    wren_common::warning::warn_once(
                        "HTML Tokenizer",
                        "input ended inside a tag; the partial tag was dropped",
                    );
                }
                self.buffer.clear();
            }
        }
        self.emit_token(Token::EndOfFile);
    }
}
