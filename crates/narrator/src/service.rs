use crate::NarrativeGenerator;
use crate::error::NarratorError;
use reporting::Narrative;

/// Runs a `NarrativeGenerator` with a retry budget and never fails.
pub struct NarrativeService {
    generator: Box<dyn NarrativeGenerator>,
    max_attempts: u32,
}

impl NarrativeService {
    /// `max_attempts` counts the first try; zero is treated as one.
    pub fn new(generator: Box<dyn NarrativeGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Asks for a narrative of `brief`.
    ///
    /// Retryable failures (timeouts, refused connections, 5xx) are retried up
    /// to the budget. Whatever the outcome, the result can be attached to the
    /// report as-is.
    pub async fn narrate(&self, brief: &str) -> Narrative {
        let mut last_error: Option<NarratorError> = None;

        for attempt in 1..=self.max_attempts {
            match self.generator.generate(brief).await {
                Ok(text) => {
                    tracing::info!(attempt, "Narrative generated.");
                    return Narrative::Generated(text);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Narrative generation failed."
                    );
                    let retryable = e.is_retryable();
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempt was made".to_string());
        Narrative::Unavailable(reason)
    }
}
