//! Lint: every `[X]` key hint a screen draws must also be tappable.
//!
//! Hints go through `push_clickable()` (whole row) or `push_buttons()` /
//! `button()` (inline). A hint passed to plain `cl.push(...)` renders fine
//! on a desktop but leaves phone users with no way to trigger it.
//!
//! Scans every `.rs` file under `src/screens/`, line by line, for `.push(`
//! calls whose text contains a bracket-key pattern.

use std::fs;
use std::path::Path;

/// `[A]`, `[x]`, `[1]`, `[-]`, ... but not `[Tab]` or `[]`.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-+=!~{}|\\<>".contains(&w[1]))
    })
}

fn is_registered(line: &str) -> bool {
    line.contains("push_clickable(") || line.contains("push_buttons(") || line.contains("button(")
}

/// `(line_number, trimmed_line)` of each offending line.
fn find_unclickable_hints(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && line.contains(".push(")
                && contains_bracket_key(line)
                && !is_registered(line)
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn scan_dir(dir: &Path, found: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            scan_dir(&path, found);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            for (line_num, line) in find_unclickable_hints(&source) {
                found.push(format!("  {}:{}: {}", path.display(), line_num, line));
            }
        }
    }
}

#[test]
fn screen_key_hints_are_clickable() {
    let screens = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/screens");
    let mut found = Vec::new();
    scan_dir(&screens, &mut found);

    assert!(
        found.is_empty(),
        "key hints drawn with cl.push() cannot be tapped; use push_clickable() \
         for rows or push_buttons() for inline buttons:\n{}",
        found.join("\n")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_hint_in_plain_push() {
        let source = r#"cl.push(Line::from(" [A] Add stock  [C] add category"));"#;
        assert_eq!(find_unclickable_hints(source).len(), 1);
    }

    #[test]
    fn accepts_registered_hints() {
        let row = r#"cl.push_clickable(Line::from(" [A] Add stock"), ADD_STOCK);"#;
        let inline = r#"cl.push_buttons(line, vec![button("[x]", key_style(false), REMOVE)]);"#;
        assert!(find_unclickable_hints(row).is_empty());
        assert!(find_unclickable_hints(inline).is_empty());
    }

    #[test]
    fn ignores_comments_and_other_pushes() {
        assert!(find_unclickable_hints(r#"// cl.push(Line::from(" [P] Proceed"));"#).is_empty());
        assert!(find_unclickable_hints(r#"commands.push(Command::FetchMarket);"#).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[A]"));
        assert!(contains_bracket_key("[x]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(contains_bracket_key("[<]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[Tab]"));
        assert!(!contains_bracket_key("ab"));
    }
}
