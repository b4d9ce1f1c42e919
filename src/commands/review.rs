use std::io::Read;
use std::path::Path;

use super::json::JsonOutput;
use super::options::ReviewOptions;
use crate::config::AppConfig;
use crate::error::{RefineError, Result};
use crate::llm::{provider::create_provider, LLMProvider, ReviewReport};
use crate::ui;

/// Runs the review command (public entry point).
pub async fn run(options: &ReviewOptions<'_>, config: &AppConfig) -> Result<()> {
    let provider = create_provider(config, options.provider_override)?;
    run_internal(options, config, provider.as_ref()).await
}

/// Internal implementation taking an injected provider (used by tests).
pub async fn run_internal(
    options: &ReviewOptions<'_>,
    config: &AppConfig,
    llm: &dyn LLMProvider,
) -> Result<()> {
    let is_machine = options.format.is_machine_readable();
    let colored = options.effective_colored(config);

    let (code, source_label, inferred_language) = read_code(options.path, config)?;

    if code.trim().is_empty() {
        return Err(RefineError::InvalidInput(
            "code is empty; nothing to review".to_string(),
        ));
    }

    let language = options
        .language
        .map(str::to_string)
        .or(inferred_language)
        .unwrap_or_else(|| config.review.default_language.clone());

    if !is_machine {
        ui::step("1/2", &format!("Analyzing {} ({})", source_label, language), colored);
    }

    // Machine-readable output keeps the terminal quiet.
    let spinner = if is_machine {
        None
    } else {
        Some(ui::Spinner::new("Reviewing code..."))
    };

    let result = llm
        .review_code(
            &code,
            Some(&language),
            config.review.custom_prompt.as_deref(),
            spinner.as_ref().map(|s| s as &dyn crate::llm::ProgressReporter),
        )
        .await?;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    if !is_machine {
        ui::step("2/2", "Formatting results", colored);
        println!();
    }

    match options.format {
        super::format::OutputFormat::Json => print_json(&result)?,
        super::format::OutputFormat::Markdown => print_markdown(&result, &source_label),
        super::format::OutputFormat::Text => print_text(&result, &source_label, colored),
    }

    Ok(())
}

/// Reads the code to review.
///
/// Returns `(code, source_label, inferred_language)`. A `path` of `None` or
/// `"-"` reads stdin; otherwise the file is read with a size guard.
fn read_code(path: Option<&str>, config: &AppConfig) -> Result<(String, String, Option<String>)> {
    match path {
        None | Some("-") => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            if code.len() > config.review.max_code_bytes {
                return Err(oversized_error(code.len(), config.review.max_code_bytes));
            }
            Ok((code, "stdin".to_string(), None))
        }
        Some(path) => {
            let metadata = std::fs::metadata(path)
                .map_err(|e| RefineError::InvalidInput(format!("cannot read '{}': {}", path, e)))?;
            if metadata.len() > config.review.max_code_bytes as u64 {
                return Err(oversized_error(
                    metadata.len() as usize,
                    config.review.max_code_bytes,
                ));
            }
            let code = std::fs::read_to_string(path)?;
            let language = infer_language(path).map(str::to_string);
            Ok((code, path.to_string(), language))
        }
    }
}

fn oversized_error(actual: usize, limit: usize) -> RefineError {
    RefineError::InvalidInput(format!(
        "code is {} bytes, exceeding the {} byte limit (review.max_code_bytes)",
        actual, limit
    ))
}

/// Infers the language hint from a file extension.
pub fn infer_language(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "py" => Some("python"),
        "rs" => Some("rust"),
        "js" | "mjs" => Some("javascript"),
        "ts" => Some("typescript"),
        "go" => Some("go"),
        "java" => Some("java"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "hpp" => Some("cpp"),
        "rb" => Some("ruby"),
        "sh" | "bash" => Some("bash"),
        _ => None,
    }
}

/// Prints the review report as text sections.
fn print_text(result: &ReviewReport, source_label: &str, colored: bool) {
    use colored::Colorize;

    println!(
        "{}",
        ui::info(&format!("Review of {}", source_label), colored)
    );
    println!();

    let issues_heading = if colored {
        "Identified Issues:".red().bold().to_string()
    } else {
        "Identified Issues:".to_string()
    };
    println!("{}", issues_heading);
    if result.bugs.is_empty() {
        println!("  No issues found.");
    } else {
        for (i, bug) in result.bugs.iter().enumerate() {
            println!("  {}. {}", i + 1, bug);
        }
    }
    println!();

    let improvements_heading = if colored {
        "Suggested Improvements:".green().bold().to_string()
    } else {
        "Suggested Improvements:".to_string()
    };
    println!("{}", improvements_heading);
    if result.improvements.is_empty() {
        println!("  No suggestions.");
    } else {
        for improvement in &result.improvements {
            println!("  • {}", improvement);
        }
    }
    println!();

    if !result.fixed_code.is_empty() {
        let fixed_heading = if colored {
            "Fixed Code:".yellow().bold().to_string()
        } else {
            "Fixed Code:".to_string()
        };
        println!("{}", fixed_heading);
        println!();
        println!("{}", result.fixed_code);
        println!();
    }
}

/// Prints the review report as a JSON envelope.
fn print_json(result: &ReviewReport) -> Result<()> {
    let output = JsonOutput {
        success: true,
        data: Some(result.clone()),
        error: None,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints the review report as Markdown.
fn print_markdown(result: &ReviewReport, source_label: &str) {
    println!("# Code Review: {}", source_label);
    println!();

    println!("## 🐞 Identified Issues");
    println!();
    if result.bugs.is_empty() {
        println!("No issues found.");
    } else {
        for bug in &result.bugs {
            println!("- {}", bug);
        }
    }
    println!();

    println!("## ✨ Suggested Improvements");
    println!();
    if result.improvements.is_empty() {
        println!("No suggestions.");
    } else {
        for improvement in &result.improvements {
            println!("- {}", improvement);
        }
    }
    println!();

    if !result.fixed_code.is_empty() {
        println!("## ✅ Fixed Code");
        println!();
        println!("```");
        println!("{}", result.fixed_code);
        println!("```");
        println!();
    }
}
