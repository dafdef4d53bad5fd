use serde::{Deserialize, Serialize};

/// Tag for one line of a positional diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Same,
    Removed,
    Added,
}

/// One tagged line of diff output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub text: String,
}

impl DiffEntry {
    fn new(kind: DiffKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Positional line-by-line comparison of two texts.
///
/// The shorter text is padded with empty lines to the longer one's line
/// count. Equal lines emit `same`; differing indices emit `removed` for a
/// non-empty original line followed by `added` for a non-empty refined
/// line. This is not a minimal-edit diff: lines that shift position are
/// reported as removed/added pairs.
pub fn diff_lines(original: &str, refined: &str) -> Vec<DiffEntry> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let refined_lines: Vec<&str> = refined.split('\n').collect();
    let max_lines = original_lines.len().max(refined_lines.len());

    let mut entries = Vec::with_capacity(max_lines);
    for index in 0..max_lines {
        let original_line = original_lines.get(index).copied().unwrap_or("");
        let refined_line = refined_lines.get(index).copied().unwrap_or("");

        if original_line == refined_line {
            entries.push(DiffEntry::new(DiffKind::Same, original_line));
        } else {
            if !original_line.is_empty() {
                entries.push(DiffEntry::new(DiffKind::Removed, original_line));
            }
            if !refined_line.is_empty() {
                entries.push(DiffEntry::new(DiffKind::Added, refined_line));
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(entries: &[DiffEntry]) -> Vec<DiffKind> {
        entries.iter().map(|entry| entry.kind).collect()
    }

    #[test]
    fn identical_texts_emit_only_same() {
        let text = "line one\nline two\nline three";
        let entries = diff_lines(text, text);
        assert_eq!(kinds(&entries), vec![DiffKind::Same; 3]);
        let lines: Vec<&str> = entries.iter().map(|entry| entry.text.as_str()).collect();
        assert_eq!(lines, vec!["line one", "line two", "line three"]);
    }

    #[test]
    fn changed_line_emits_removed_then_added() {
        let entries = diff_lines("line one\nline two", "line one\nline TWO");
        assert_eq!(
            entries,
            vec![
                DiffEntry::new(DiffKind::Same, "line one"),
                DiffEntry::new(DiffKind::Removed, "line two"),
                DiffEntry::new(DiffKind::Added, "line TWO"),
            ]
        );
    }

    #[test]
    fn empty_original_emits_only_added() {
        let entries = diff_lines("", "alpha\nbeta");
        assert_eq!(
            entries,
            vec![
                DiffEntry::new(DiffKind::Added, "alpha"),
                DiffEntry::new(DiffKind::Added, "beta"),
            ]
        );
    }

    #[test]
    fn empty_refined_emits_only_removed() {
        let entries = diff_lines("alpha\nbeta", "");
        assert_eq!(
            entries,
            vec![
                DiffEntry::new(DiffKind::Removed, "alpha"),
                DiffEntry::new(DiffKind::Removed, "beta"),
            ]
        );
    }

    #[test]
    fn longer_refined_pads_original_with_empty_lines() {
        let entries = diff_lines("one", "one\ntwo\nthree");
        assert_eq!(
            entries,
            vec![
                DiffEntry::new(DiffKind::Same, "one"),
                DiffEntry::new(DiffKind::Added, "two"),
                DiffEntry::new(DiffKind::Added, "three"),
            ]
        );
    }

    #[test]
    fn shifted_lines_over_report_as_removed_added_pairs() {
        // Positional comparison: insertion at the top misaligns every line.
        let entries = diff_lines("a\nb", "x\na\nb");
        assert_eq!(
            kinds(&entries),
            vec![
                DiffKind::Removed,
                DiffKind::Added,
                DiffKind::Removed,
                DiffKind::Added,
                DiffKind::Added,
            ]
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let entry = DiffEntry::new(DiffKind::Removed, "old line");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "removed");
        assert_eq!(json["text"], "old line");
    }
}
