/// Suggest a short uppercase code from a name and optional description.
///
/// Single word: first 6 characters. Multiple words: first 3 characters of
/// the first up-to-3 words. Short results are padded from the description
/// before clamping to 10 characters.
pub fn suggest_code(name: &str, description: Option<&str>) -> String {
    let words = significant_words(name, 1);
    if words.is_empty() {
        return String::new();
    }

    if words.len() == 1 {
        return words[0].chars().take(6).collect();
    }

    let mut code: String = words
        .iter()
        .take(3)
        .map(|word| word.chars().take(3).collect::<String>())
        .collect();

    if code.len() < 4 {
        if let Some(description) = description {
            if let Some(word) = significant_words(description, 3).first() {
                code.push_str(&word.chars().take(3).collect::<String>());
            }
        }
    }

    code.chars().take(10).collect()
}

fn significant_words(input: &str, min_len: usize) -> Vec<String> {
    input
        .trim()
        .to_uppercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| word.len() >= min_len)
        .collect()
}

/// Make `base` unique against `existing` by appending a numeric suffix.
pub fn dedupe_code<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: std::collections::HashSet<&str> = existing.into_iter().collect();
    if base.is_empty() {
        return String::new();
    }
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}{counter}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}
