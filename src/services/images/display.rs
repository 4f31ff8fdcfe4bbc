use crate::services::images::ImageResult;

const RULE_WIDTH: usize = 80;
const WRAP_WIDTH: usize = 76;

/// Greedy word wrap; a single word longer than `width` gets its own line.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Human-readable summary of a generation, for terminals.
pub fn format_for_display(result: &ImageResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "Image Generated Successfully".to_string(),
        rule.clone(),
        String::new(),
        format!("Prompt: {}", result.prompt),
        format!(
            "Model: {} ({})",
            result.metadata.model, result.metadata.size
        ),
        format!(
            "Generated: {}",
            result.metadata.created_at.format("%Y-%m-%d %H:%M:%S")
        ),
        String::new(),
    ];

    if let Some(revised) = &result.metadata.revised_prompt {
        lines.push("Revised Prompt:".to_string());
        lines.extend(wrap_words(revised, WRAP_WIDTH));
        lines.push(String::new());
    }

    if let Some(url) = &result.image_url {
        lines.push(format!("Image URL: {}", url));
    }

    let mut status = vec![if result.is_downloaded() {
        "Downloaded".to_string()
    } else {
        "Ready for download".to_string()
    }];
    if let Some(path) = &result.file_path {
        status.push(format!("Saved to {}", path.display()));
    }
    lines.push(format!("Status: {}", status.join(" | ")));
    lines.push(format!("ID: {}", result.generation_id));
    lines.push(rule);

    lines.join("\n")
}
