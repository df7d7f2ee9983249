use super::types::CommentBody;

/// Longest output (in characters) that goes into a comment
pub const MAX_OUTPUT_CHARS: usize = 64_000;

pub const TRUNCATION_WARNING: &str = "**Warn**: The output was too long and trimmed.";

/// Heading shared by every comment for the same command and stack.
///
/// Existing comments are matched by prefix against this string, so any
/// change here orphans comments left by earlier runs.
pub fn render_heading(command: &str, target_name: &str) -> String {
    format!(
        "#### :tropical_drink: `{}` on {}\n\n<details>\n<summary>Click to expand Pulumi report</summary>",
        command, target_name
    )
}

/// Cut `output` to at most `MAX_OUTPUT_CHARS` characters
pub fn truncate_output(output: &str) -> (&str, bool) {
    match output.char_indices().nth(MAX_OUTPUT_CHARS) {
        Some((end, _)) => (&output[..end], true),
        None => (output, false),
    }
}

pub fn render_body(command: &str, target_name: &str, output: &str) -> CommentBody {
    let heading = render_heading(command, target_name);
    let (raw, truncated) = truncate_output(output);

    // The blank line after the heading keeps the fence from being swallowed
    // by the <summary> block.
    let body = {
        let mut lines = vec![heading.as_str(), "", "```", raw, "```"];
        if truncated {
            lines.push(TRUNCATION_WARNING);
        }
        lines.push("</details>");
        lines.join("\n")
    };

    CommentBody {
        heading,
        body,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod render_heading {
        use super::*;

        #[test]
        fn includes_command_and_stack() {
            let heading = render_heading("preview", "prod-stack");
            assert!(heading.starts_with("#### :tropical_drink: `preview` on prod-stack\n\n"));
            assert!(heading.ends_with("<summary>Click to expand Pulumi report</summary>"));
        }

        #[test]
        fn is_deterministic() {
            assert_eq!(render_heading("up", "dev"), render_heading("up", "dev"));
            assert_ne!(render_heading("up", "dev"), render_heading("up", "Dev"));
        }
    }

    mod truncate_output {
        use super::*;

        #[test]
        fn keeps_short_output() {
            assert_eq!(truncate_output("OK"), ("OK", false));
            assert_eq!(truncate_output(""), ("", false));
        }

        #[test]
        fn keeps_output_at_limit() {
            let output = "x".repeat(MAX_OUTPUT_CHARS);
            let (raw, truncated) = truncate_output(&output);
            assert_eq!(raw.len(), MAX_OUTPUT_CHARS);
            assert!(!truncated);
        }

        #[test]
        fn counts_characters_not_bytes() {
            let output = "é".repeat(MAX_OUTPUT_CHARS + 5);
            let (raw, truncated) = truncate_output(&output);
            assert!(truncated);
            assert_eq!(raw.chars().count(), MAX_OUTPUT_CHARS);
        }
    }

    mod render_body {
        use super::*;

        #[test]
        fn short_output_has_no_warning() {
            let rendered = render_body("preview", "prod-stack", "OK");
            assert!(!rendered.truncated);
            assert!(rendered.body.starts_with(&rendered.heading));
            assert!(rendered.body.contains("#### :tropical_drink: `preview` on prod-stack"));
            assert!(rendered.body.contains("\n\n```\nOK\n```\n</details>"));
            assert!(!rendered.body.contains(TRUNCATION_WARNING));
        }

        #[test]
        fn heading_is_followed_by_blank_line_then_fence() {
            let rendered = render_body("up", "dev", "done");
            let rest = &rendered.body[rendered.heading.len()..];
            assert!(rest.starts_with("\n\n```\n"));
        }

        #[test]
        fn output_at_limit_is_kept_whole() {
            let output = "b".repeat(MAX_OUTPUT_CHARS);
            let rendered = render_body("preview", "prod", &output);
            assert!(!rendered.truncated);
            assert!(rendered.body.contains(&format!("```\n{}\n```\n</details>", output)));
            assert!(!rendered.body.contains(TRUNCATION_WARNING));
        }

        #[test]
        fn long_output_is_trimmed_with_warning() {
            let output = format!("{}{}", "a".repeat(MAX_OUTPUT_CHARS), "TAIL");
            let rendered = render_body("preview", "prod", &output);
            assert!(rendered.truncated);
            assert!(!rendered.body.contains("TAIL"));
            let expected = format!(
                "```\n{}\n```\n{}\n</details>",
                "a".repeat(MAX_OUTPUT_CHARS),
                TRUNCATION_WARNING
            );
            assert!(rendered.body.ends_with(&expected));
        }
    }
}
