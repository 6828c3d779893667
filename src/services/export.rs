use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pulldown_cmark::{html, Options, Parser};

use super::display::RecipeDisplay;

const PRINT_STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 56rem; margin: 0 auto; padding: 1.5rem; line-height: 1.5; color: #111827; }
h1 { font-size: 1.875rem; margin-bottom: 0.25rem; }
h2 { font-size: 1.25rem; margin-top: 1.5rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.tips { margin-top: 2rem; padding: 1rem; border: 1px solid #fde68a; border-radius: 0.5rem; background: #fffbeb; }
@media print {
  body { padding: 0.5rem; }
  h1, h2 { page-break-after: avoid; }
  .columns { page-break-inside: avoid; }
}
";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const MARKDOWN_SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '#', '+', '-', '.', '~', '|'];

/// Recipe text as literal Markdown: nothing in it becomes markup.
fn escape_markdown(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in escape(text).chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            output.push('\\');
        }
        output.push(c);
    }
    output
}

/// Free text keeps its line breaks as hard breaks.
fn escape_lines(text: &str) -> String {
    text.lines()
        .map(|line| escape_markdown(line.trim()))
        .collect::<Vec<_>>()
        .join("  \n")
}

/// Markdown rendition of what the page is showing.
pub fn recipe_to_markdown(recipe: &RecipeDisplay) -> String {
    let mut output = format!("# {}\n\n", escape_markdown(&recipe.title));

    if let Some(description) = &recipe.description {
        output.push_str(&format!("{}\n\n", escape_lines(description)));
    }

    output.push_str("## Ingredients\n\n");
    for ingredient in &recipe.ingredients {
        output.push_str(&format!("- {}\n", escape_markdown(ingredient)));
    }

    output.push_str("\n## Instructions\n\n");
    for (i, step) in recipe.steps.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, escape_markdown(step)));
    }

    if let Some(tips) = &recipe.tips {
        output.push_str(&format!("\n## Tips\n\n{}\n", escape_lines(tips)));
    }

    output
}

/// A standalone, print-ready HTML page for the recipe.
pub fn recipe_to_html(recipe: &RecipeDisplay) -> String {
    let markdown = recipe_to_markdown(recipe);
    let mut body = String::new();
    html::push_html(&mut body, Parser::new_ext(&markdown, Options::empty()));

    // Put the two lists side by side; tips get their own box.
    let body = body
        .replacen("<h2>Ingredients</h2>", "<div class=\"columns\"><div><h2>Ingredients</h2>", 1)
        .replacen("<h2>Instructions</h2>", "</div><div><h2>Instructions</h2>", 1);
    let body = match body.find("<h2>Tips</h2>") {
        Some(at) => format!(
            "{}</div></div><div class=\"tips\">{}</div>",
            &body[..at],
            &body[at..]
        ),
        None => format!("{}</div></div>", body),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{} - Recipe</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(&recipe.title),
        PRINT_STYLE,
        body
    )
}

/// Write the print page into `dir` and return its path.
pub fn write_print_page(recipe: &RecipeDisplay, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let file_name: String = recipe
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let file_name = match file_name.trim_matches('-') {
        "" => "recipe".to_string(),
        trimmed => trimmed.to_string(),
    };
    let path = dir.join(format!("{}.html", file_name));
    std::fs::write(&path, recipe_to_html(recipe))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
