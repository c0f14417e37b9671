//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! These rules are placed in front of the author rules. The cascade sorts by
//! priority only, so an author rule beats a default rule of the same
//! priority because it comes later.

use std::sync::OnceLock;

use crate::parser::{CSSParser, StyleRule};

/// Default rules, written in the same restricted syntax the parser accepts:
/// one tag or descendant selector per rule, one word per value.
const UA_CSS: &str = r"
i { font-style: italic; }
em { font-style: italic; }
cite { font-style: italic; }
b { font-weight: bold; }
strong { font-weight: bold; }
small { font-size: 90%; }
big { font-size: 110%; }
a { color: blue; }
pre { background-color: gray; }
";

/// Return the parsed default rules, parsing only once.
pub fn ua_rules() -> &'static [StyleRule] {
    static RULES: OnceLock<Vec<StyleRule>> = OnceLock::new();
    RULES.get_or_init(|| CSSParser::new(UA_CSS).parse())
}
