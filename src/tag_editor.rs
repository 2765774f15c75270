//! Computing a record's new tag set, either directly or through an
//! interactive select-and-add loop.

use crate::error::{Error, Result};
use crate::name::Record;
use crate::prompt::TagPrompter;
use crate::registry::TagRegistry;
use log::warn;

/// Extra choice appended to every selection round.
pub const ADD_CUSTOM_TAG: &str = "[+ Add custom tag]";
pub const SELECT_PROMPT: &str = "Select tags (space to toggle, enter to confirm):";
pub const CUSTOM_PROMPT: &str = "Enter custom tag:";

/// Characters that structure a file name and so cannot appear in a tag.
pub const RESERVED_TAG_CHARS: [char; 4] = ['/', '_', '-', '.'];

/// Trim and check a tag typed by a user.
pub fn validate_tag(raw: &str) -> Result<String> {
    let tag = raw.trim();
    if tag.is_empty() {
        return Err(Error::InvalidTag {
            tag: raw.to_string(),
            reason: "tag cannot be empty",
        });
    }
    if tag.contains(RESERVED_TAG_CHARS) {
        return Err(Error::InvalidTag {
            tag: tag.to_string(),
            reason: "tag cannot contain special characters (/, _, -, .)",
        });
    }
    Ok(tag.to_string())
}

/// Sort and dedup `tags`.
pub fn normalize_tags(mut tags: Vec<String>) -> Vec<String> {
    tags.sort();
    tags.dedup();
    tags
}

/// Replace the record's tags. The flag is false when the new set equals the
/// current one, in which case the record comes back untouched and no rename
/// should follow.
pub fn set_tags(record: &Record, new_tags: Vec<String>) -> (Record, bool) {
    let new_tags = normalize_tags(new_tags);
    if new_tags == record.tag_set() {
        return (record.clone(), false);
    }
    (record.clone().with_tags(new_tags), true)
}

/// `key - description` when the registry describes the key, else `key`.
pub fn display_for(registry: &TagRegistry, key: &str) -> String {
    match registry.description(key) {
        Some(desc) => format!("{key} - {desc}"),
        None => key.to_string(),
    }
}

/// Inverse of [`display_for`]: everything before the first `" - "`. A key
/// whose description itself contains `" - "` still splits at the first one.
pub fn key_from_display(display: &str) -> &str {
    display.split_once(" - ").map_or(display, |(key, _)| key)
}

/// Current tags first, then registry tags not already shown, each rendered
/// for display. The custom-tag choice is not included.
pub fn candidate_options(current: &[String], registry: &TagRegistry) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut options = Vec::new();
    for key in current.iter().map(String::as_str).chain(registry.keys()) {
        if !seen.contains(&key) {
            seen.push(key);
            options.push(display_for(registry, key));
        }
    }
    options
}

/// Run selection rounds until one finishes without the custom-tag choice.
/// Each custom tag is added to the selection and moved to the front of the
/// options for the next round. The result is sorted.
pub fn edit_tags(
    current: &[String],
    registry: &TagRegistry,
    prompter: &mut dyn TagPrompter,
) -> Result<Vec<String>> {
    let mut options = candidate_options(current, registry);
    let mut defaults: Vec<String> =
        current.iter().map(|t| display_for(registry, t)).collect();

    loop {
        let mut offered = options.clone();
        offered.push(ADD_CUSTOM_TAG.to_string());
        let picked = prompter.select_multiple(SELECT_PROMPT, &offered, &defaults)?;

        let mut add_custom = false;
        let mut chosen: Vec<String> = Vec::new();
        for display in picked {
            if display == ADD_CUSTOM_TAG {
                add_custom = true;
            } else {
                chosen.push(key_from_display(&display).to_string());
            }
        }

        if !add_custom {
            chosen.sort();
            return Ok(chosen);
        }

        let custom = prompt_custom_tag(prompter)?;
        let display = display_for(registry, &custom);
        options.retain(|o| o != &display);
        options.insert(0, display);
        if !chosen.contains(&custom) {
            chosen.push(custom);
        }
        defaults = chosen.iter().map(|t| display_for(registry, t)).collect();
    }
}

fn prompt_custom_tag(prompter: &mut dyn TagPrompter) -> Result<String> {
    loop {
        let raw = prompter.input_text(CUSTOM_PROMPT)?;
        match validate_tag(&raw) {
            Ok(tag) => return Ok(tag),
            Err(e) => {
                warn!("{e}");
                prompter.notify(&e.to_string());
            }
        }
    }
}
