//! One extraction step per header field.
//!
//! Every function here is total: a missing or malformed section yields `None`
//! (or an empty list) and never affects the other fields.

use log::trace;
use regex::Regex;
use std::sync::OnceLock;

use super::items::is_emoji;
use crate::model::PriorityLevel;

/// Rule line closing the backend's recommendation block.
const RULE: &str = "==========";

fn age_group_regex() -> Option<&'static Regex> {
    static AGE_GROUP: OnceLock<Option<Regex>> = OnceLock::new();
    AGE_GROUP
        .get_or_init(|| Regex::new(r"(?m)Sleep Recommendations for (.+?)\s*(?:=|$)").ok())
        .as_ref()
}

fn priority_regex() -> Option<&'static Regex> {
    static PRIORITY: OnceLock<Option<Regex>> = OnceLock::new();
    PRIORITY
        .get_or_init(|| Regex::new(r"Priority Level:\s*(\w+)").ok())
        .as_ref()
}

fn effectiveness_regex() -> Option<&'static Regex> {
    static EFFECTIVENESS: OnceLock<Option<Regex>> = OnceLock::new();
    EFFECTIVENESS
        .get_or_init(|| Regex::new(r"(?i)sleep effectiveness is\s*(\d*\.?\d+)\s*%").ok())
        .as_ref()
}

fn tips_marker_regex() -> Option<&'static Regex> {
    static TIPS_MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    TIPS_MARKER
        .get_or_init(|| Regex::new(r"General Tips:(?:\*\*)?").ok())
        .as_ref()
}

/// Age group named in the `Sleep Recommendations for ...` header.
pub fn age_group(text: &str) -> Option<String> {
    let captures = age_group_regex()?.captures(text)?;
    let group = captures.get(1)?.as_str().trim();
    trace!("age group header: {:?}", group);
    (!group.is_empty()).then(|| group.to_string())
}

/// Word after `Priority Level:`, upper-cased. Not validated against the known
/// levels.
pub fn priority_level(text: &str) -> Option<PriorityLevel> {
    let captures = priority_regex()?.captures(text)?;
    let word = captures.get(1)?.as_str();
    trace!("priority marker: {:?}", word);
    Some(PriorityLevel::from_marker(word))
}

/// Numeric text of `sleep effectiveness is N%`, as written.
pub fn effectiveness(text: &str) -> Option<String> {
    let captures = effectiveness_regex()?.captures(text)?;
    let value = captures.get(1)?.as_str();
    trace!("effectiveness marker: {}%", value);
    Some(value.to_string())
}

/// Location of the General Tips section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TipsMarker {
    /// Where the numbered list ends, before any emoji/bold prefix
    pub start: usize,
    /// Where the tips body begins
    pub end: usize,
}

/// First `General Tips:` that opens a line or follows an emoji glyph.
///
/// The phrase anywhere else is ordinary item prose.
pub(crate) fn tips_marker(text: &str) -> Option<TipsMarker> {
    tips_marker_regex()?.find_iter(text).find_map(|m| {
        let prefix = &text[..m.start()];

        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        if strip_decoration(&prefix[line_start..]).is_empty() {
            return Some(TipsMarker {
                start: line_start,
                end: m.end(),
            });
        }

        let head = strip_decoration(prefix);
        let glyph = head.chars().next_back().filter(|c| is_emoji(*c))?;
        trace!("emoji tips marker at {}", m.start());
        Some(TipsMarker {
            start: head.len() - glyph.len_utf8(),
            end: m.end(),
        })
    })
}

/// Drop trailing whitespace, one `**` and a variation selector.
fn strip_decoration(prefix: &str) -> &str {
    let prefix = prefix.trim_end();
    let prefix = prefix.strip_suffix("**").unwrap_or(prefix).trim_end();
    prefix.strip_suffix('\u{FE0F}').unwrap_or(prefix)
}

/// Bullet-separated sentences following the General Tips marker, up to the
/// closing rule line.
pub fn general_tips(text: &str) -> Vec<String> {
    let Some(marker) = tips_marker(text) else {
        return Vec::new();
    };

    let body = &text[marker.end..];
    let body = body.find(RULE).map_or(body, |end| &body[..end]);

    body.split('•')
        .map(str::trim)
        .filter(|tip| !tip.is_empty())
        .map(str::to_string)
        .collect()
}
