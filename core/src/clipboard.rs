//! Shapes clipboard-bound text. The system clipboard itself lives in the
//! CLI; everything here is pure so the formats stay testable.

use crate::node::{Folder, Node, Prompt};

/// Name given to a prompt imported from an empty clipboard.
pub const DEFAULT_PROMPT_NAME: &str = "New Prompt";

/// Builds a prompt from raw clipboard text: the first line becomes the
/// name, everything after the first line break becomes the content.
/// "OnlyTitle" imports with empty content; an empty clipboard falls back
/// to [`DEFAULT_PROMPT_NAME`].
#[must_use]
pub fn prompt_from_text(text: &str) -> Prompt {
    let mut parts = text.splitn(2, '\n');
    // Tolerate CRLF clipboards: the name line must not keep a stray '\r'.
    let first = parts.next().unwrap_or("").trim_end_matches('\r');
    let name = if first.is_empty() {
        DEFAULT_PROMPT_NAME.to_string()
    } else {
        first.to_string()
    };
    let content = parts.next().unwrap_or("").to_string();
    Prompt::new(name, content)
}

/// Renders every descendant prompt of `folder` as one text blob:
///
/// ```text
/// === <path>/<prompt name> ===
/// <content>
/// ```
///
/// entries separated by a blank line, `<path>` being the slash-joined
/// folder chain starting at `folder` itself. Order follows child
/// iteration order. `None` for a folder with no descendant prompts, so
/// callers skip the clipboard write entirely.
#[must_use]
pub fn flattened_copy(folder: &Folder) -> Option<String> {
    let mut entries = Vec::new();
    collect_prompts(folder, &folder.name, &mut entries);
    if entries.is_empty() {
        return None;
    }
    Some(entries.join("\n\n"))
}

fn collect_prompts(folder: &Folder, path: &str, out: &mut Vec<String>) {
    for child in &folder.children {
        match child {
            Node::Prompt(prompt) => {
                out.push(format!("=== {}/{} ===\n{}", path, prompt.name, prompt.content));
            }
            Node::Folder(sub) => {
                collect_prompts(sub, &format!("{}/{}", path, sub.name), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_splits_at_the_first_line_break() {
        let prompt = prompt_from_text("Title\nLine A\nLine B");
        assert_eq!(prompt.name, "Title");
        assert_eq!(prompt.content, "Line A\nLine B");
    }

    #[test]
    fn import_without_line_break_has_empty_content() {
        let prompt = prompt_from_text("OnlyTitle");
        assert_eq!(prompt.name, "OnlyTitle");
        assert_eq!(prompt.content, "");
    }

    #[test]
    fn import_of_empty_clipboard_uses_the_placeholder_name() {
        let prompt = prompt_from_text("");
        assert_eq!(prompt.name, DEFAULT_PROMPT_NAME);
        assert_eq!(prompt.content, "");
    }

    #[test]
    fn import_strips_a_crlf_tail_from_the_name_line() {
        let prompt = prompt_from_text("Title\r\nbody");
        assert_eq!(prompt.name, "Title");
        assert_eq!(prompt.content, "body");
    }

    #[test]
    fn flatten_prefixes_each_prompt_with_its_folder_path() {
        let mut sub = Folder::new("Sub");
        sub.children.push(Node::Prompt(Prompt::new("Q", "bye")));

        let mut root = Folder::new("Root");
        root.children.push(Node::Prompt(Prompt::new("P", "hi")));
        root.children.push(Node::Folder(sub));

        let text = flattened_copy(&root).unwrap();
        assert_eq!(text, "=== Root/P ===\nhi\n\n=== Root/Sub/Q ===\nbye");
    }

    #[test]
    fn flatten_of_a_folder_with_no_prompts_is_none() {
        let mut root = Folder::new("Root");
        root.children.push(Node::Folder(Folder::new("Empty")));
        assert!(flattened_copy(&root).is_none());
    }
}
