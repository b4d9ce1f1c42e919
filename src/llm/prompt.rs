/// Static system directives (cacheable) - for use in system/user split mode
const REVIEW_SYSTEM_PROMPT_BASE: &str = r#"You are an expert code reviewer.

Review the submitted code and provide:
1. A list of potential bugs and issues
2. Code quality improvements
3. A corrected version of the code"#;

/// Section format contract (always appended so the reply stays parseable)
const REVIEW_SECTION_CONSTRAINT: &str = r#"

Format your response exactly as shown below:
ISSUES:
- [issue description]

IMPROVEMENTS:
- [improvement suggestion]

FIXED_CODE:
```{language}
[corrected code]
```

Maintain this exact format in your response."#;

/// Build split review prompt (system + user)
///
/// Returns (system_prompt, user_message):
/// - system_prompt: custom template (or default) + section format contract
///   (always appended)
/// - user_message: the code to review, fenced with the language tag
pub fn build_review_prompt_split(
    code: &str,
    language: &str,
    custom_template: Option<&str>,
) -> (String, String) {
    let base = custom_template.unwrap_or(REVIEW_SYSTEM_PROMPT_BASE);
    let constraint = REVIEW_SECTION_CONSTRAINT.replace("{language}", language);
    let system = format!("{}{}", base, constraint);

    let user = format!("## Code to Review:\n```{}\n{}\n```", language, code);

    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_section_contract() {
        let (system, _) = build_review_prompt_split("print(1)", "python", None);
        assert!(system.contains("ISSUES:"));
        assert!(system.contains("IMPROVEMENTS:"));
        assert!(system.contains("FIXED_CODE:"));
        assert!(system.contains("```python"));
        assert!(system.contains("expert code reviewer"));
    }

    #[test]
    fn test_user_message_embeds_code_with_language() {
        let (_, user) = build_review_prompt_split("fn main() {}", "rust", None);
        assert!(user.contains("```rust\nfn main() {}\n```"));
        assert!(user.starts_with("## Code to Review:"));
    }

    #[test]
    fn test_custom_template_replaces_base_keeps_contract() {
        let (system, _) =
            build_review_prompt_split("x = 1", "python", Some("Focus on security only."));
        assert!(system.starts_with("Focus on security only."));
        assert!(!system.contains("expert code reviewer"));
        // The contract survives a custom template, otherwise the scraper
        // has nothing to anchor on.
        assert!(system.contains("ISSUES:"));
        assert!(system.contains("FIXED_CODE:"));
    }

    #[test]
    fn test_language_tag_substituted_in_contract() {
        let (system, _) = build_review_prompt_split("x", "go", None);
        assert!(system.contains("```go"));
        assert!(!system.contains("{language}"));
    }
}
