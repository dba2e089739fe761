//! Catalog Resolver
//!
//! Best-effort resolution of a note into a `CatalogItem`. Each field is tried
//! against an ordered list of sources: frontmatter metadata, then a body
//! marker, then a fallback. Malformed input silently falls through to the next
//! source; resolution never fails, so a broken note at worst gets a random
//! price and a placeholder description.

use std::sync::LazyLock;

use regex::Regex;

use crate::rng::DiceRoller;
use crate::vault::Note;

use super::item::{CatalogItem, Consumable};

/// Fallback price range when neither metadata nor body provide one
pub const FALLBACK_PRICE_MIN: i32 = 10;
pub const FALLBACK_PRICE_MAX: i32 = 99;

/// Description used when a note provides none
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

// Body markers: "(40) #price", "(A sharp blade) #description", "2/5 #consumable"
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)\s*#price\b").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]+)\)\s*#description\b").unwrap());
static USES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)\s*#consumable\b").unwrap());

/// Resolve a note into a catalog item
pub fn resolve(note: &Note, dice: &mut DiceRoller) -> CatalogItem {
    let base_price = metadata_price(note)
        .or_else(|| marker_price(&note.body))
        .unwrap_or_else(|| dice.range(FALLBACK_PRICE_MIN, FALLBACK_PRICE_MAX));

    let description = metadata_description(note)
        .or_else(|| marker_description(&note.body))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    let consumable = marker_uses(&note.body).or_else(|| bare_consumable(&note.body));

    CatalogItem {
        path: note.path.clone(),
        name: note.basename.clone(),
        base_price,
        description,
        tags: note.tags.clone(),
        consumable,
    }
}

/// Frontmatter `price`, accepted only as a non-negative integer
fn metadata_price(note: &Note) -> Option<i32> {
    note.metadata
        .get("price")?
        .parse::<i32>()
        .ok()
        .filter(|p| *p >= 0)
}

/// Body marker `(N) #price`
fn marker_price(body: &str) -> Option<i32> {
    PRICE_RE.captures(body)?[1].parse().ok()
}

/// Frontmatter `description`, accepted only when non-empty
fn metadata_description(note: &Note) -> Option<String> {
    note.metadata
        .get("description")
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Body marker `(text) #description`
fn marker_description(body: &str) -> Option<String> {
    DESCRIPTION_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Body marker `current/max #consumable`; max must be at least 1
fn marker_uses(body: &str) -> Option<Consumable> {
    let captures = USES_RE.captures(body)?;
    let max_uses: i32 = captures[2].parse().ok()?;
    if max_uses < 1 {
        return None;
    }
    // The current side must at least parse for the marker to count.
    let _current: i32 = captures[1].parse().ok()?;
    Some(Consumable { max_uses })
}

/// A literal `#consumable` anywhere in the body means a single-use item
fn bare_consumable(body: &str) -> Option<Consumable> {
    body.contains("#consumable").then_some(Consumable { max_uses: 1 })
}
