//! # Report Formatter
//!
//! Renders the collected per-repository results as Markdown on behalf of the
//! comparison run: error blocks first for each repository, then its diff in
//! a fenced code block, and a closing sentinel when no repository produced
//! any diff at all.
//!
//! Diff text is arbitrary — it quotes the repositories' own sources, which
//! may themselves contain backtick fences — so each block's fence is chosen
//! longer than the longest backtick run found anywhere in the content. A
//! fence can therefore never be terminated early by the text it wraps.

use regex::Regex;

use crate::compare::RepoResult;

/// Printed when no repository produced a diff.
const NO_DIFF_SENTINEL: &str = "No diff produced";

/// Render all results into the final Markdown report.
pub fn render(results: &[RepoResult]) -> String {
    let mut out = String::new();

    for result in results {
        for incident in &result.incidents {
            let message = if incident.message.trim().is_empty() {
                "<no output>"
            } else {
                incident.message.as_str()
            };
            out.push_str(&format!(
                "**Error when {} on `{}`**:\n",
                incident.stage, result.entry.name
            ));
            out.push_str(&codeblock(message, ""));
            out.push('\n');
        }

        if let Some(diff) = &result.diff_text {
            out.push_str(&codeblock(diff, "diff"));
            out.push('\n');
        }
    }

    if results.iter().all(|r| r.diff_text.is_none()) {
        out.push_str(NO_DIFF_SENTINEL);
        out.push('\n');
    }

    out
}

/// Wrap `content` in a fenced block that its own backticks cannot close.
fn codeblock(content: &str, lang: &str) -> String {
    let fence = fence_for(content);
    format!("{fence}{lang}\n{}\n{fence}\n", content.trim_end_matches('\n'))
}

/// Pick a fence one backtick longer than the longest run in `content`,
/// with a minimum length of three.
fn fence_for(content: &str) -> String {
    let runs = Regex::new("`+").unwrap();
    let longest = runs
        .find_iter(content)
        .map(|m| m.as_str().len())
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
