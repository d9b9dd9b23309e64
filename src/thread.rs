//! Thread assembly: splitting a summary into a fixed number of tweet-sized
//! parts, and decorating those parts into numbered messages.

use tracing::debug;

/// Characters set aside for the marker and `i/n` numbering of each message.
pub const RESERVED_OVERHEAD: usize = 15;

/// Packing threshold; the platform's hard limit is 280.
pub const SOFT_LIMIT: usize = 260;

/// Hard per-message limit of the target platform. Not enforced.
pub const PLATFORM_LIMIT: usize = 280;

/// Sentence delimiter used for splitting and re-joining fragments.
const SENTENCE_DELIMITER: &str = ". ";

/// Decorative markers, cycled across message headers.
pub const MARKERS: [&str; 10] = ["🚀", "💡", "📌", "🔍", "🔥", "📘", "✅", "🌟", "🎯", "🧠"];

/// Appended to the trimmed title to form the first message's hook line.
pub const HOOK_SUFFIX: &str = " – here’s what you’ll learn:";

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Splits `summary` into exactly `n_parts` parts.
///
/// Fragments are found by splitting on `". "`, which mis-splits on
/// abbreviations and decimals. Fragments are greedily packed while a part
/// plus [`RESERVED_OVERHEAD`] stays within [`SOFT_LIMIT`]; the resulting list
/// is then split (longest part at its character midpoint) or merged
/// (adjacent pair with the smallest combined length) until it has exactly
/// `n_parts` entries. Parts are not re-checked against the limit after
/// splitting or merging.
///
/// An empty or whitespace-only summary yields `n_parts` empty strings.
pub fn assemble(summary: &str, n_parts: usize) -> Vec<String> {
    let summary = summary.trim();
    if summary.is_empty() {
        return vec![String::new(); n_parts];
    }

    let mut parts = pack_sentences(summary);
    debug!(packed = parts.len(), requested = n_parts, "Packed summary into parts");

    while parts.len() < n_parts {
        let Some(idx) = longest_index(&parts) else {
            break;
        };
        let (left, right) = split_at_midpoint(&parts[idx]);
        parts[idx] = left;
        parts.insert(idx + 1, right);
    }

    while parts.len() > n_parts {
        let Some(idx) = smallest_adjacent_pair(&parts) else {
            break;
        };
        let right = parts.remove(idx + 1);
        parts[idx] = merge_pair(&parts[idx], &right);
    }

    parts.resize(n_parts, String::new());
    parts
}

/// Greedy sentence packing.
///
/// When a fragment alone pushes an empty `current` past the limit, the empty
/// `current` is still emitted as a part. Later normalization sees that empty
/// part like any other.
pub(crate) fn pack_sentences(summary: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for sentence in summary.split(SENTENCE_DELIMITER) {
        let seg = sentence.trim();
        if seg.is_empty() {
            continue;
        }

        let tentative = if current.is_empty() {
            seg.to_string()
        } else {
            format!("{current}{SENTENCE_DELIMITER}{seg}")
        };

        if char_len(&tentative) + RESERVED_OVERHEAD > SOFT_LIMIT {
            parts.push(std::mem::replace(&mut current, seg.to_string()));
        } else {
            current = tentative;
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// Index of the longest part by character count, lowest index on ties.
fn longest_index(parts: &[String]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (idx, part) in parts.iter().enumerate() {
        let len = char_len(part);
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((idx, len));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Left index of the adjacent pair with the smallest combined character
/// count, lowest index on ties. `None` with fewer than two parts.
fn smallest_adjacent_pair(parts: &[String]) -> Option<usize> {
    (0..parts.len().saturating_sub(1))
        .min_by_key(|&idx| char_len(&parts[idx]) + char_len(&parts[idx + 1]))
}

/// Cuts `part` at `chars / 2` with no regard for word boundaries.
pub(crate) fn split_at_midpoint(part: &str) -> (String, String) {
    let half = char_len(part) / 2;
    let byte_idx = part
        .char_indices()
        .nth(half)
        .map_or(part.len(), |(idx, _)| idx);
    let (left, right) = part.split_at(byte_idx);
    (left.trim().to_string(), right.trim().to_string())
}

pub(crate) fn merge_pair(left: &str, right: &str) -> String {
    format!("{left} {right}").trim().to_string()
}

/// Marker for the 1-based message position `i`.
pub fn marker_for(i: usize) -> &'static str {
    MARKERS[(i.max(1) - 1) % MARKERS.len()]
}

/// Builds the final messages: `"{marker} {i}/{n_parts} "` followed by the
/// trimmed part, with the hook line and a newline inserted before the body
/// of the first message.
///
/// Overhead is only estimated during assembly, so a message may exceed
/// [`PLATFORM_LIMIT`].
pub fn format_thread(parts: &[String], title: &str, n_parts: usize) -> Vec<String> {
    parts
        .iter()
        .enumerate()
        .map(|(idx, part)| {
            let i = idx + 1;
            let header = format!("{} {}/{} ", marker_for(i), i, n_parts);
            if i == 1 {
                let hook = format!("{}{}", title.trim(), HOOK_SUFFIX);
                format!("{header}{hook}\n{}", part.trim())
            } else {
                format!("{header}{}", part.trim())
            }
        })
        .collect()
}
