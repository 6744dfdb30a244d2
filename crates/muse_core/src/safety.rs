//! Safety policy sent with every generation request.

use serde::{Deserialize, Serialize};

/// Harm category recognised by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Harassment and bullying
    HarmCategoryHarassment,
    /// Hateful or discriminatory content
    HarmCategoryHateSpeech,
    /// Sexually explicit content
    HarmCategorySexuallyExplicit,
    /// Instructions for dangerous activities
    HarmCategoryDangerousContent,
}

/// Probability level at which content in a category is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Never block
    BlockNone,
    /// Block only high-probability content
    BlockOnlyHigh,
    /// Block medium and high
    BlockMediumAndAbove,
    /// Block low, medium and high
    BlockLowAndAbove,
}

/// One category/threshold pair, in wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafetySetting {
    /// Category to filter
    pub category: HarmCategory,
    /// Threshold for the category
    pub threshold: HarmBlockThreshold,
}

/// Mapping from harm category to threshold.
///
/// The default policy is `BLOCK_NONE` in all four categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafetyPolicy(Vec<SafetySetting>);

impl SafetyPolicy {
    /// Creates a policy from explicit settings.
    pub fn new(settings: Vec<SafetySetting>) -> Self {
        Self(settings)
    }

    /// Same threshold for every category.
    pub fn uniform(threshold: HarmBlockThreshold) -> Self {
        Self(
            [
                HarmCategory::HarmCategoryHarassment,
                HarmCategory::HarmCategoryHateSpeech,
                HarmCategory::HarmCategorySexuallyExplicit,
                HarmCategory::HarmCategoryDangerousContent,
            ]
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold,
            })
            .collect(),
        )
    }

    /// Settings in request order.
    pub fn settings(&self) -> &[SafetySetting] {
        &self.0
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::uniform(HarmBlockThreshold::BlockNone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_serializes_to_wire_format() {
        let json = serde_json::to_value(SafetyPolicy::default()).unwrap();
        let settings = json.as_array().unwrap();
        assert_eq!(settings.len(), 4);
        assert_eq!(
            settings[0],
            serde_json::json!({"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"})
        );
        assert_eq!(settings[3]["category"], "HARM_CATEGORY_DANGEROUS_CONTENT");
    }
}
