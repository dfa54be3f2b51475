use log::trace;
use regex::Regex;
use std::sync::OnceLock;

use super::fields::tips_marker;

fn item_marker_regex() -> Option<&'static Regex> {
    static ITEM_MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    ITEM_MARKER
        .get_or_init(|| Regex::new(r"\d+\.\s+").ok())
        .as_ref()
}

fn bold_regex() -> Option<&'static Regex> {
    static BOLD: OnceLock<Option<Regex>> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").ok()).as_ref()
}

/// Raw text of one numbered item: its first line plus the wrapped lines that
/// belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock<'a> {
    pub first_line: &'a str,
    pub continuation: Vec<&'a str>,
}

impl<'a> ItemBlock<'a> {
    fn from_raw(raw: &'a str) -> Self {
        let mut lines = raw.trim().lines();
        let first_line = lines.next().unwrap_or_default().trim();
        let continuation = lines
            .map(str::trim)
            .take_while(|line| !is_rule_line(line))
            .filter(|line| !line.is_empty())
            .collect();

        Self {
            first_line,
            continuation,
        }
    }

    /// `head` followed by the continuation lines, newline-joined and trimmed.
    pub fn description_from(&self, head: &str) -> String {
        let mut description = head.trim().to_string();
        for line in &self.continuation {
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(line);
        }
        description.trim().to_string()
    }

    /// Split the first line at its first colon, if the colon is not the first
    /// character.
    pub fn split_at_colon(&self) -> Option<(&'a str, &'a str)> {
        match self.first_line.find(':') {
            Some(index) if index > 0 => Some((
                &self.first_line[..index],
                &self.first_line[index + 1..],
            )),
            _ => None,
        }
    }
}

/// Collect every top-level numbered item, in source order.
///
/// Items stop at the General Tips marker; a `N. ` run only starts an item at
/// the beginning of the text or after whitespace.
pub fn scan_items(text: &str) -> Vec<ItemBlock<'_>> {
    let Some(marker) = item_marker_regex() else {
        return Vec::new();
    };

    let region = &text[..items_end(text)];
    let bounds: Vec<(usize, usize)> = marker
        .find_iter(region)
        .filter(|m| starts_item(region, m.start()))
        .map(|m| (m.start(), m.end()))
        .collect();

    trace!("found {} numbered items", bounds.len());

    bounds
        .iter()
        .enumerate()
        .map(|(index, &(_, content_start))| {
            let content_end = bounds
                .get(index + 1)
                .map(|&(next_start, _)| next_start)
                .unwrap_or(region.len());
            ItemBlock::from_raw(&region[content_start..content_end])
        })
        .collect()
}

fn starts_item(region: &str, start: usize) -> bool {
    region[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace)
}

/// Byte offset where the numbered list ends: just before the General Tips
/// marker and any emoji/bold prefix attached to it.
fn items_end(text: &str) -> usize {
    tips_marker(text).map_or(text.len(), |marker| marker.start)
}

fn is_rule_line(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '=')
}

/// Pictographic ranges the backend draws its item glyphs from.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F9FF | 0x1FA70..=0x1FAFF | 0x2600..=0x27BF | 0x23E9..=0x23FA
    )
}

/// First emoji on the line, with its variation selector when one follows.
pub fn first_emoji(line: &str) -> Option<String> {
    let mut chars = line.chars().skip_while(|c| !is_emoji(*c));
    let glyph = chars.next()?;

    let mut emoji = glyph.to_string();
    if chars.next() == Some('\u{FE0F}') {
        emoji.push('\u{FE0F}');
    }
    Some(emoji)
}

/// Text between the first pair of `**` delimiters.
pub fn bold_text(line: &str) -> Option<&str> {
    let captures = bold_regex()?.captures(line)?;
    let title = captures.get(1)?.as_str().trim();
    (!title.is_empty()).then_some(title)
}
