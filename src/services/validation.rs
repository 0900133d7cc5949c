use regex::Regex;

use crate::error::ApiError;

pub const MAX_POST_LEN: usize = 140;
const MASK: &str = "****";
const DENYLIST: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// One step of the request-body pipeline. `Ok` carries the (possibly
/// rewritten) body onward; `Err` terminates the chain with a structured
/// rejection. Stages compose explicitly instead of wrapping each other.
pub trait Stage: Send + Sync {
    fn apply(&self, body: String) -> Result<String, ApiError>;
}

pub struct ValidationChain {
    stages: Vec<Box<dyn Stage>>,
}

impl ValidationChain {
    /// The pipeline gating post creation. Order matters: the length gate
    /// judges the original body, so redaction runs after it.
    pub fn for_posts() -> Self {
        Self {
            stages: vec![
                Box::new(LengthGate { max: MAX_POST_LEN }),
                Box::new(Redactor::new(&DENYLIST)),
            ],
        }
    }

    pub fn run(&self, body: String) -> Result<String, ApiError> {
        self.stages
            .iter()
            .try_fold(body, |body, stage| stage.apply(body))
    }
}

/// Rejects over-long bodies outright — no silent truncation.
struct LengthGate {
    max: usize,
}

impl Stage for LengthGate {
    fn apply(&self, body: String) -> Result<String, ApiError> {
        if body.chars().count() > self.max {
            return Err(ApiError::Validation("Post is too long".to_string()));
        }
        Ok(body)
    }
}

/// Case-insensitive, whole-word denylist match; every hit becomes the fixed
/// four-character mask regardless of the matched word's length.
struct Redactor {
    pattern: Regex,
}

impl Redactor {
    fn new(words: &[&str]) -> Self {
        let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", escaped.join("|")))
            .expect("denylist pattern is static and valid");
        Self { pattern }
    }
}

impl Stage for Redactor {
    fn apply(&self, body: String) -> Result<String, ApiError> {
        Ok(self.pattern.replace_all(&body, MASK).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylisted_word_is_masked() {
        let out = ValidationChain::for_posts()
            .run("This is a kerfuffle opinion".to_string())
            .unwrap();
        assert_eq!(out, "This is a **** opinion");
    }

    #[test]
    fn match_is_case_insensitive() {
        let out = ValidationChain::for_posts()
            .run("I hear Mastodon is better than Sharbert".to_string())
            .unwrap();
        assert_eq!(out, "I hear Mastodon is better than ****");
    }

    #[test]
    fn word_boundaries_are_respected() {
        let out = ValidationChain::for_posts()
            .run("kerfuffles are not kerfuffle".to_string())
            .unwrap();
        assert_eq!(out, "kerfuffles are not ****");
    }

    #[test]
    fn exactly_140_chars_passes() {
        let body = "a".repeat(140);
        assert_eq!(ValidationChain::for_posts().run(body.clone()).unwrap(), body);
    }

    #[test]
    fn over_140_chars_is_rejected() {
        let body = "a".repeat(141);
        let err = ValidationChain::for_posts().run(body).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn length_gate_judges_the_original_body() {
        // 141 chars of denylisted words would fit after redaction, but the
        // gate runs before the redactor rewrites anything.
        let body = format!("{} fornax", "kerfuffle ".repeat(13)); // 137 chars
        assert!(ValidationChain::for_posts().run(body).is_ok());

        let long = "kerfuffle ".repeat(15); // 150 chars pre-redaction
        let err = ValidationChain::for_posts().run(long).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
