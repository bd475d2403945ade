//! Label → display text, and the numbers derived from a score.

/// Replace underscores with spaces and uppercase the first letter of each word.
///
/// A word starts at an ASCII alphanumeric that doesn't follow another one, so
/// `tomato_early_blight` → `Tomato Early Blight` and `leaf-spot(2)` → `Leaf-Spot(2)`.
/// Letters after the first are left as they are.
pub fn humanize(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_word = false;
    for c in label.chars() {
        let c = if c == '_' { ' ' } else { c };
        let word_char = c.is_ascii_alphanumeric();
        if word_char && !in_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        in_word = word_char;
    }
    out
}

/// A label is healthy when it mentions "healthy" in any case.
pub fn is_healthy(label: &str) -> bool {
    label.to_lowercase().contains("healthy")
}

fn unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// `round(score × 100)`, 0..=100
pub fn confidence_percent(score: f64) -> u8 {
    (unit(score) * 100.0).round() as u8
}

/// Estimated crop loss: 0 when healthy, else `round((1 − score) × 30 + 15)`,
/// which stays within 15..=45.
pub fn crop_loss_percent(score: f64, healthy: bool) -> u8 {
    if healthy {
        return 0;
    }
    ((1.0 - unit(score)) * 30.0 + 15.0).round() as u8
}
