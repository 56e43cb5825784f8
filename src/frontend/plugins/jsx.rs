//! JSX dialect
//!
//! `<Tag attr="x" prop={expr}>{child}</Tag>`; `<>…</>` fragments are
//! rewritten to `<Fragment>…</Fragment>` before lexing.

use super::lowering::{lower_element, Dialect};
use super::{Plugin, PluginError};

pub const NAME: &str = "jsx";
pub const NODE_TYPE: &str = "JSXElement";

/// Rewrite fragment shorthand
pub fn expand_fragments(source: &str) -> String {
    source.replace("<>", "<Fragment>").replace("</>", "</Fragment>")
}

pub fn plugin() -> Result<Plugin, PluginError> {
    Plugin::builder(NAME, env!("CARGO_PKG_VERSION"))
        .conflicts(super::vue::NAME)
        .syntax(r"^<[A-Za-z]", NODE_TYPE, 10)
        .before_parse(expand_fragments)
        .handler(NODE_TYPE, |element, _span| lower_element(element, Dialect::Jsx))
        .build()
}
