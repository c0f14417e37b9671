use core::fmt;

/// An attribute on a start tag token.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name", case-folded.
    pub name: String,
    /// "and a value". Empty for valueless attributes.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The tokens handed from the tokenizer to the tree builder.
///
/// Unlike a conforming tokenizer we do not emit one token per character:
/// a whole run of text between two tags is a single [`Token::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of text outside any tag, with character references decoded.
    Text {
        /// The decoded text.
        data: String,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes"
    StartTag {
        /// "a tag name", case-folded.
        name: String,
        /// "a self-closing flag", set by a trailing `/`.
        self_closing: bool,
        /// "a list of attributes", in source order. Duplicates are kept here;
        /// the tree builder lets the last one win.
        attributes: Vec<Attribute>,
    },

    /// End tag token. Attributes on end tags are discarded.
    EndTag {
        /// "a tag name", case-folded.
        name: String,
    },

    /// Anything written as `<!...>`: comments, doctypes and CDATA blocks.
    /// The tree builder drops these.
    Declaration {
        /// Everything after the `!`.
        data: String,
    },

    /// "end-of-file"
    EndOfFile,
}

impl Token {
    /// Returns true if this is a start tag with the given name.
    #[must_use]
    pub fn is_start_tag(&self, tag: &str) -> bool {
        matches!(self, Token::StartTag { name, .. } if name == tag)
    }

    /// Returns true if this is an end tag with the given name.
    #[must_use]
    pub fn is_end_tag(&self, tag: &str) -> bool {
        matches!(self, Token::EndTag { name } if name == tag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text { data } => write!(f, "Text({data:?})"),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    if attr.value.is_empty() {
                        write!(f, " {}", attr.name)?;
                    } else {
                        write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                    }
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Token::EndTag { name } => write!(f, "</{name}>"),
            Token::Declaration { data } => write!(f, "<!{data}>"),
            Token::EndOfFile => write!(f, "EOF"),
        }
    }
}
