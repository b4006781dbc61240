//! Styles for the tagtable CLI.
//!
//! Templates only ever name a style by what the text *is* (a header, a tag, a
//! property value). This module maps those names to `console` styles, so the
//! look can change without touching templates or layout code.
//!
//! A name missing from the theme is rendered with a `(!?)` prefix, which makes
//! typos in templates visible instead of silently unstyled.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const HEADER: &str = "header";
    pub const HEADER_SORTED: &str = "header_sorted";
    pub const PARENT: &str = "parent";
    pub const ITEM: &str = "item";
    pub const TAG: &str = "tag";
    pub const DATE: &str = "date";
    pub const MENTION: &str = "mention";
    pub const BACKLINK: &str = "backlink";
    pub const PROPERTY: &str = "property";
    pub const MUTED: &str = "muted";
    pub const CONFIG_KEY: &str = "config_key";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Named styles applied by the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Styles `text`, or returns it untouched when `use_color` is off.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{}{}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static TAGTABLE_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::HEADER, Style::new().bold())
        .add(names::HEADER_SORTED, Style::new().bold().underlined())
        .add(names::PARENT, Style::new().dim())
        .add(names::ITEM, Style::new())
        .add(names::TAG, Style::new().cyan())
        .add(names::DATE, Style::new().magenta())
        .add(names::MENTION, Style::new().blue())
        .add(names::BACKLINK, Style::new().dim().italic())
        .add(names::PROPERTY, Style::new().yellow())
        .add(names::MUTED, Style::new().color256(246).italic())
        .add(names::CONFIG_KEY, Style::new().cyan())
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_apply_returns_text() {
        assert_eq!(TAGTABLE_THEME.apply(names::TAG, "#idea", false), "#idea");
    }

    #[test]
    fn colored_apply_adds_ansi() {
        let theme = Theme::new().add("green", Style::new().green().force_styling(true));
        let styled = theme.apply("green", "ok", true);
        assert!(styled.contains("\x1b["));
        assert!(styled.contains("ok"));
    }

    #[test]
    fn unknown_style_shows_indicator() {
        assert_eq!(TAGTABLE_THEME.apply("typo", "x", false), "(!?)x");
    }

    #[test]
    fn every_name_is_in_the_theme() {
        for name in [
            names::HEADER,
            names::HEADER_SORTED,
            names::PARENT,
            names::ITEM,
            names::TAG,
            names::DATE,
            names::MENTION,
            names::BACKLINK,
            names::PROPERTY,
            names::MUTED,
            names::CONFIG_KEY,
            names::INFO,
            names::SUCCESS,
            names::WARNING,
            names::ERROR,
        ] {
            assert!(TAGTABLE_THEME.has(name), "missing style {}", name);
        }
    }
}
