//! Generation and safety settings sent with every request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sampling parameters.
///
/// Defaults to a low-temperature profile that biases the model toward
/// deterministic tool selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_output_tokens: 2048,
        }
    }
}

/// Harm categories the provider can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
}

/// Probability threshold at which content is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// Category → threshold map sent as the request's safety settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafetyProfile {
    thresholds: BTreeMap<HarmCategory, BlockThreshold>,
}

impl SafetyProfile {
    /// Profile with no explicit thresholds (provider defaults apply).
    pub fn empty() -> Self {
        Self {
            thresholds: BTreeMap::new(),
        }
    }

    pub fn with_threshold(mut self, category: HarmCategory, threshold: BlockThreshold) -> Self {
        self.thresholds.insert(category, threshold);
        self
    }

    pub fn threshold(&self, category: HarmCategory) -> Option<BlockThreshold> {
        self.thresholds.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HarmCategory, BlockThreshold)> + '_ {
        self.thresholds.iter().map(|(c, t)| (*c, *t))
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl Default for SafetyProfile {
    /// Blocks medium-and-above harassment, hate speech, sexual and dangerous content.
    fn default() -> Self {
        Self::empty()
            .with_threshold(HarmCategory::Harassment, BlockThreshold::BlockMediumAndAbove)
            .with_threshold(HarmCategory::HateSpeech, BlockThreshold::BlockMediumAndAbove)
            .with_threshold(
                HarmCategory::SexuallyExplicit,
                BlockThreshold::BlockMediumAndAbove,
            )
            .with_threshold(
                HarmCategory::DangerousContent,
                BlockThreshold::BlockMediumAndAbove,
            )
    }
}
