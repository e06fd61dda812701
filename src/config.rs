use crate::selector::DEFAULT_KEYWORDS;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_transcript_path() -> PathBuf {
    PathBuf::from("whisper_transcript.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("shorts")
}

/// Extraction settings. Built once at startup and passed down explicitly;
/// every field has a default so the tool runs with no profile at all.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Path of the pre-generated transcript JSON.
    #[serde(default = "default_transcript_path")]
    pub transcript_path: PathBuf,

    /// Directory the numbered clip files are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            transcript_path: default_transcript_path(),
            output_dir: default_output_dir(),
        }
    }
}

pub fn load_profile(path: &Path) -> anyhow::Result<HighlightConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {:?}", path))?;
    let config: HighlightConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse profile {:?}", path))?;
    Ok(config)
}

/// Resolves a profile argument: an explicit or relative path is used
/// as-is, a bare name maps to `~/.clipsift/profiles/<name>.yaml`.
pub fn resolve_profile_path(profile: &str) -> anyhow::Result<PathBuf> {
    if let Some(rest) = profile.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }

    let path = PathBuf::from(profile);
    if path.is_absolute() || profile.starts_with("./") || profile.starts_with("../") {
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home
        .join(".clipsift/profiles")
        .join(format!("{}.yaml", profile)))
}
