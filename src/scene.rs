//! Scene identifiers
//!
//! A scene name picks the initial particle layout, the motion rule applied
//! each tick and the shading rule applied per pixel. The rules are chosen
//! once when the scene is loaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::renderer::ShadingRule;
use crate::sim::MotionRule;

/// Closed set of renderable scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SceneName {
    /// Three overlapping red/green/blue circles
    #[default]
    #[serde(rename = "rgb")]
    CircleRgb,
    /// Four overlapping red/green/blue/yellow circles
    #[serde(rename = "rgby")]
    CircleRgby,
    /// 10K random circles
    #[serde(rename = "rand10k")]
    CircleTest10k,
    /// 100K random circles
    #[serde(rename = "rand100k")]
    CircleTest100k,
    /// Few large circles over many small ones
    #[serde(rename = "biglittle")]
    BigLittle,
    /// Many small circles over few large ones
    #[serde(rename = "littlebig")]
    LittleBig,
    /// Concentric grid of circles, static
    #[serde(rename = "pattern")]
    Pattern,
    /// Falling snow with depth parallax
    #[serde(rename = "snow", alias = "snowflakes")]
    Snowflakes,
    /// Snow layout rendered without animation
    #[serde(rename = "snowsingle")]
    SnowflakesSingleFrame,
    /// Balls falling and bouncing on the floor
    #[serde(rename = "bouncingballs")]
    BouncingBalls,
    /// Concentric rings growing outward
    #[serde(rename = "hypnosis")]
    Hypnosis,
    /// Sparks streaming out of firework centers
    #[serde(rename = "fireworks")]
    Fireworks,
}

impl SceneName {
    /// Every scene, in declaration order
    pub const ALL: [SceneName; 12] = [
        SceneName::CircleRgb,
        SceneName::CircleRgby,
        SceneName::CircleTest10k,
        SceneName::CircleTest100k,
        SceneName::BigLittle,
        SceneName::LittleBig,
        SceneName::Pattern,
        SceneName::Snowflakes,
        SceneName::SnowflakesSingleFrame,
        SceneName::BouncingBalls,
        SceneName::Hypnosis,
        SceneName::Fireworks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneName::CircleRgb => "rgb",
            SceneName::CircleRgby => "rgby",
            SceneName::CircleTest10k => "rand10k",
            SceneName::CircleTest100k => "rand100k",
            SceneName::BigLittle => "biglittle",
            SceneName::LittleBig => "littlebig",
            SceneName::Pattern => "pattern",
            SceneName::Snowflakes => "snow",
            SceneName::SnowflakesSingleFrame => "snowsingle",
            SceneName::BouncingBalls => "bouncingballs",
            SceneName::Hypnosis => "hypnosis",
            SceneName::Fireworks => "fireworks",
        }
    }

    /// True for both snow scenes (gradient clear + snowflake shading)
    pub fn is_snow(&self) -> bool {
        matches!(self, SceneName::Snowflakes | SceneName::SnowflakesSingleFrame)
    }

    /// Motion rule applied by `advance_animation`
    pub fn motion_rule(&self) -> MotionRule {
        match self {
            SceneName::Snowflakes => MotionRule::Snowflakes,
            SceneName::BouncingBalls => MotionRule::BouncingBalls,
            SceneName::Hypnosis => MotionRule::Hypnosis,
            SceneName::Fireworks => MotionRule::Fireworks,
            _ => MotionRule::Static,
        }
    }

    /// Shading rule applied by the pixel shader
    pub fn shading_rule(&self) -> ShadingRule {
        if self.is_snow() {
            ShadingRule::Snowflake
        } else {
            ShadingRule::FlatColor
        }
    }
}

impl fmt::Display for SceneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneName {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(SceneName::CircleRgb),
            "rgby" => Ok(SceneName::CircleRgby),
            "rand10k" => Ok(SceneName::CircleTest10k),
            "rand100k" => Ok(SceneName::CircleTest100k),
            "biglittle" => Ok(SceneName::BigLittle),
            "littlebig" => Ok(SceneName::LittleBig),
            "pattern" => Ok(SceneName::Pattern),
            "snow" | "snowflakes" => Ok(SceneName::Snowflakes),
            "snowsingle" => Ok(SceneName::SnowflakesSingleFrame),
            "bouncingballs" => Ok(SceneName::BouncingBalls),
            "hypnosis" => Ok(SceneName::Hypnosis),
            "fireworks" => Ok(SceneName::Fireworks),
            _ => Err(RenderError::UnknownScene(s.to_string())),
        }
    }
}
