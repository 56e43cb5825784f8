//! Vue dialect
//!
//! Lower-case template tags with `v-*` directives and `{{ path }}`
//! interpolation. The `@event=` and `:prop=` shorthands are expanded to
//! `v-on:` / `v-bind:` before lexing so they never reach the `@keyword`
//! scanner.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::lowering::{lower_element, Dialect};
use super::{Plugin, PluginError};

pub const NAME: &str = "vue";
pub const NODE_TYPE: &str = "VueElement";

/// An opening tag, quoted attribute values skipped whole
static OPEN_TAG: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"<[a-z][\w-]*(?:"[^"]*"|'[^']*'|[^"'<>])*>"#).ok());
/// A quoted value (kept as is) or a ` @name=` / ` :name=` shorthand
static SHORTHAND: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"("[^"]*"|'[^']*')|(\s)([@:])([A-Za-z][\w.:-]*)="#).ok());

/// `@click=` → `v-on:click=`, `:href=` → `v-bind:href=`, inside opening
/// tags only
pub fn expand_shorthands(source: &str) -> String {
    match OPEN_TAG.as_ref() {
        Some(tag) => tag.replace_all(source, expand_in_tag).into_owned(),
        None => source.to_string(),
    }
}

fn expand_in_tag(tag: &Captures<'_>) -> String {
    match SHORTHAND.as_ref() {
        Some(shorthand) => shorthand.replace_all(&tag[0], expand_shorthand).into_owned(),
        None => tag[0].to_string(),
    }
}

fn expand_shorthand(caps: &Captures<'_>) -> String {
    if let Some(quoted) = caps.get(1) {
        return quoted.as_str().to_string();
    }
    let directive = if &caps[3] == "@" { "v-on" } else { "v-bind" };
    format!("{}{}:{}=", &caps[2], directive, &caps[4])
}

pub fn plugin() -> Result<Plugin, PluginError> {
    Plugin::builder(NAME, env!("CARGO_PKG_VERSION"))
        .conflicts(super::jsx::NAME)
        .template_syntax(r"^<[a-z][\w-]*", NODE_TYPE, 5)
        .before_parse(expand_shorthands)
        .handler(NODE_TYPE, |element, _span| lower_element(element, Dialect::Vue))
        .build()
}
