//! Field-delimiter sniffing.
//!
//! Customer exports arrive as comma, pipe, semicolon, or tab separated
//! text, usually without anyone saying which. The sniffer counts
//! candidate separator bytes across a sample of lines and picks the one
//! that appears consistently; an explicitly configured delimiter always
//! wins upstream.

use tracing::debug;

/// Separators seen in the wild, in preference order for ties.
const CANDIDATES: [u8; 4] = [b',', b'|', b'\t', b';'];

/// Number of lines examined before committing.
const SAMPLE_LINES: usize = 20;

/// Picks the most plausible field delimiter from raw input text.
///
/// A candidate qualifies when it appears at least once on every sampled
/// non-empty line; among qualifiers the one with the highest total count
/// wins. Returns `None` for input where no candidate qualifies
/// (single-column data or free text); the reader then falls back to the
/// comma default.
pub fn sniff_delimiter(text: &str) -> Option<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, usize)> = None;
    for candidate in CANDIDATES {
        let mut total = 0usize;
        let mut on_every_line = true;
        for line in &lines {
            let count = line.bytes().filter(|b| *b == candidate).count();
            if count == 0 {
                on_every_line = false;
                break;
            }
            total += count;
        }
        if !on_every_line {
            continue;
        }
        if best.is_none_or(|(_, best_total)| total > best_total) {
            best = Some((candidate, total));
        }
    }

    if let Some((delimiter, total)) = best {
        debug!(
            delimiter = %(delimiter as char),
            occurrences = total,
            "detected field delimiter"
        );
    }
    best.map(|(delimiter, _)| delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_comma() {
        let text = "Jane,Doe,jane@x.com\nBob,Roe,bob@y.com\n";
        assert_eq!(sniff_delimiter(text), Some(b','));
    }

    #[test]
    fn detects_pipe_over_incidental_commas() {
        let text = "Doe, Jane|jane@x.com|ON\nRoe, Bob|bob@y.com|BC\n";
        // Both qualify on every line; pipe wins on total count.
        assert_eq!(sniff_delimiter(text), Some(b'|'));
    }

    #[test]
    fn detects_tab() {
        let text = "Jane\tDoe\nBob\tRoe\n";
        assert_eq!(sniff_delimiter(text), Some(b'\t'));
    }

    #[test]
    fn free_text_yields_none() {
        assert_eq!(sniff_delimiter("just a sentence\nanother sentence\n"), None);
        assert_eq!(sniff_delimiter(""), None);
    }
}
