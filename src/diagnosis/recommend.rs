//! Disease → agronomic advice.
//!
//! Rules are evaluated in table order against the lowercased disease name;
//! the first rule whose key is a substring wins.

/// Advice for a healthy crop
pub const HEALTHY_ADVICE: &str = "Your crop appears healthy! Continue regular monitoring and maintain good agricultural practices. Ensure adequate watering, proper nutrition, and pest control.";

/// Advice for a disease no rule covers
pub const FALLBACK_ADVICE: &str = "Consult with a local agricultural extension officer for specific treatment. Remove and isolate infected plants. Maintain good field hygiene and monitor regularly.";

/// Appended to the advice whenever the result came from the mock path
pub const MOCK_DISCLAIMER: &str =
    "\n\n⚠️ Note: This is a mock prediction. Configure Hugging Face for real AI predictions.";

/// One (predicate, advice) pair
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    pub advice: &'static str,
}

impl Rule {
    /// `disease` must already be lowercase
    pub fn matches(&self, disease: &str) -> bool {
        disease.contains(self.key)
    }
}

pub const RULES: [Rule; 7] = [
    Rule {
        key: "early blight",
        advice: "Immediately remove and destroy infected leaves. Apply fungicide containing chlorothalonil or mancozeb. Ensure proper spacing between plants for air circulation. Avoid overhead watering to reduce leaf wetness.",
    },
    Rule {
        key: "late blight",
        advice: "Remove and destroy all infected plant parts immediately. Apply copper-based fungicide or mancozeb. Improve air circulation and avoid overhead irrigation. Consider resistant varieties for future planting.",
    },
    Rule {
        key: "septoria leaf spot",
        advice: "Remove infected leaves and destroy them. Apply fungicide with chlorothalonil. Mulch around plants to prevent soil splash. Rotate crops and avoid overhead watering.",
    },
    Rule {
        key: "anthracnose",
        advice: "Prune and destroy infected parts. Apply copper-based fungicide. Improve air circulation and reduce humidity. Avoid working with plants when wet.",
    },
    Rule {
        key: "bacterial spot",
        advice: "Remove infected leaves. Apply copper-based bactericide. Avoid overhead watering. Use disease-free seeds and transplants. Practice crop rotation.",
    },
    Rule {
        key: "powdery mildew",
        advice: "Apply sulfur-based or neem oil fungicide. Improve air circulation. Remove heavily infected leaves. Avoid excess nitrogen fertilization.",
    },
    Rule {
        key: "mosaic virus",
        advice: "No cure available. Remove and destroy infected plants to prevent spread. Control aphid populations as they transmit the virus. Use resistant varieties.",
    },
];

/// Advice for a humanized disease name.
pub fn recommend(disease: &str, healthy: bool) -> &'static str {
    if healthy {
        return HEALTHY_ADVICE;
    }

    let disease = disease.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&disease))
        .map(|rule| rule.advice)
        .unwrap_or(FALLBACK_ADVICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_blight_any_case() {
        let advice = RULES[1].advice;
        assert_eq!(recommend("Tomato Late Blight", false), advice);
        assert_eq!(recommend("POTATO LATE BLIGHT", false), advice);
        assert_eq!(recommend("late blight", false), advice);
    }

    #[test]
    fn test_unmatched_disease_gets_fallback() {
        assert_eq!(recommend("Tomato Leaf Mold", false), FALLBACK_ADVICE);
        assert_eq!(recommend("Pizza", false), FALLBACK_ADVICE);
    }

    #[test]
    fn test_healthy_ignores_table() {
        assert_eq!(recommend("Tomato Healthy", true), HEALTHY_ADVICE);
        assert_eq!(recommend("Late Blight", true), HEALTHY_ADVICE);
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // Both "early blight" and "late blight" match; the earlier rule wins
        assert_eq!(
            recommend("Early Blight Then Late Blight", false),
            RULES[0].advice
        );
        assert_eq!(
            recommend("Late Blight Then Early Blight", false),
            RULES[0].advice
        );
    }

    #[test]
    fn test_table_keys_in_fixed_order() {
        let keys: Vec<&str> = RULES.iter().map(|r| r.key).collect();
        assert_eq!(
            keys,
            [
                "early blight",
                "late blight",
                "septoria leaf spot",
                "anthracnose",
                "bacterial spot",
                "powdery mildew",
                "mosaic virus",
            ]
        );
    }

    #[test]
    fn test_underscored_names_do_not_match() {
        // Matching runs on humanized names, not raw labels
        assert_eq!(recommend("tomato_late_blight", false), FALLBACK_ADVICE);
    }
}
