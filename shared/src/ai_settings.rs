//! Central registry for supported AI gateway models.

/// Candidate text models in fallback priority order, most capable first.
/// A degraded or deprecated model drops through to the next entry at the
/// cost of potentially lower content quality.
pub const MODEL_FALLBACK_CHAIN: &[&str] = &[
    "google/gemini-3-flash-preview",
    "google/gemini-2.5-flash",
    "google/gemini-2.5-flash-lite",
];

/// Image-capable model used for hero-image generation.
pub const IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";

/// Default fallback chain as owned strings for client construction.
pub fn default_model_chain() -> Vec<String> {
    MODEL_FALLBACK_CHAIN.iter().map(|m| m.to_string()).collect()
}
