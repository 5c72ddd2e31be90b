//! Tree parameters.

use serde::{Deserialize, Serialize};

use crate::error::{QuadtreeError, Result};

/// Deepest subdivision a tree may be configured for.
pub const MAX_SUPPORTED_DEPTH: u8 = 48;

/// What a full leaf at maximum depth does with another object.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxDepthPolicy {
    /// Keep appending past `max_objects_per_leaf`.
    #[default]
    Grow,
    /// Leave the object out of that leaf.
    Reject,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadtreeConfig {
    /// Objects a leaf holds before it subdivides.
    #[serde(default = "default_max_objects_per_leaf")]
    pub max_objects_per_leaf: usize,
    /// Depth below which leaves may subdivide. The root is depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,
    #[serde(default)]
    pub max_depth_policy: MaxDepthPolicy,
}

fn default_max_objects_per_leaf() -> usize {
    8
}

fn default_max_depth() -> u8 {
    8
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            max_objects_per_leaf: default_max_objects_per_leaf(),
            max_depth: default_max_depth(),
            max_depth_policy: MaxDepthPolicy::default(),
        }
    }
}

impl QuadtreeConfig {
    pub fn new(max_objects_per_leaf: usize, max_depth: u8) -> Self {
        Self {
            max_objects_per_leaf,
            max_depth,
            max_depth_policy: MaxDepthPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MaxDepthPolicy) -> Self {
        self.max_depth_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_objects_per_leaf == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(QuadtreeError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        Ok(())
    }
}
