//
//  jira-cli
//  interactive/mod.rs
//

//! # Interactive Prompts
//!
//! Wrappers around `dialoguer` for gathering user input in the terminal:
//! text input, masked token entry, and external-editor comment
//! composition.
//!
//! Every prompt blocks until the user answers; none of these are called
//! when the corresponding value arrived as a flag.

use anyhow::Result;
use dialoguer::{Editor, Input, Password};

/// Prompts the user for required text input.
///
/// The prompt repeats until non-empty input is provided.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts the user for text input with a pre-filled default.
pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompts the user for a secret with masked input.
///
/// Used for token entry during `auth login`; the value never echoes.
pub fn prompt_password(message: &str) -> Result<String> {
    let input = Password::new().with_prompt(message).interact()?;
    Ok(input)
}

/// Template shown in the editor when composing a comment.
///
/// Lines starting with `#` are stripped from the result, git-commit style.
const COMMENT_TEMPLATE: &str = "\n\
# Write your comment above.\n\
# Lines starting with '#' are ignored. An empty comment aborts.\n";

/// Opens `$EDITOR` (via dialoguer's editor discovery) to compose a
/// multi-line comment.
///
/// Returns `None` when the user aborts the editor or the stripped result
/// is empty.
pub fn edit_comment() -> Result<Option<String>> {
    let Some(raw) = Editor::new().edit(COMMENT_TEMPLATE)? else {
        return Ok(None);
    };

    let body = strip_comment_lines(&raw);
    if body.is_empty() {
        Ok(None)
    } else {
        Ok(Some(body))
    }
}

/// Removes `#`-prefixed lines and trims surrounding whitespace.
fn strip_comment_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_lines_are_stripped() {
        let raw = "My comment here\n\n# Write your comment above.\n# Lines starting with '#' are ignored.\n";
        assert_eq!(strip_comment_lines(raw), "My comment here");
    }

    #[test]
    fn interior_hash_lines_are_stripped_too() {
        let raw = "first\n# note to self\nsecond";
        assert_eq!(strip_comment_lines(raw), "first\nsecond");
    }

    #[test]
    fn all_comments_yields_empty() {
        assert_eq!(strip_comment_lines("# one\n  # two\n"), "");
        assert_eq!(strip_comment_lines(""), "");
    }

    #[test]
    fn hash_inside_a_line_survives() {
        assert_eq!(strip_comment_lines("see issue #42"), "see issue #42");
    }
}
