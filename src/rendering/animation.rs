// src/rendering/animation.rs
//
// GIF assembly is delegated to an external image tool (ImageMagick `convert` by default).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::AnimationConfig;
use crate::error::{BuildError, Result};

/// Builds the command line without running it.
pub fn gif_command(frames: &[PathBuf], output: &Path, cfg: &AnimationConfig) -> Command {
  let mut cmd = Command::new(&cfg.command);
  cmd.arg("-delay")
    .arg(cfg.delay.to_string())
    .arg("-loop")
    .arg(if cfg.loop_forever { "0" } else { "1" })
    .args(frames)
    .arg(output);
  cmd
}

pub fn assemble_gif(frames: &[PathBuf], output: &Path, cfg: &AnimationConfig) -> Result<()> {
  if frames.is_empty() {
    return Err(BuildError::Animation("no frames to assemble".into()));
  }

  let status = gif_command(frames, output, cfg).status().map_err(|e| match e.kind() {
    ErrorKind::NotFound => BuildError::Animation(format!("`{}` not found on PATH", cfg.command)),
    _ => BuildError::Animation(format!("failed to run `{}`: {e}", cfg.command)),
  })?;

  if !status.success() {
    return Err(BuildError::Animation(format!("`{}` exited with {status}", cfg.command)));
  }
  log::info!("Assembled {} frames into {}", frames.len(), output.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frames() -> Vec<PathBuf> {
    vec![PathBuf::from("f_0000.png"), PathBuf::from("f_0001.png")]
  }

  #[test]
  fn test_command_line() {
    let cmd = gif_command(&frames(), Path::new("out.gif"), &AnimationConfig::default());
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(cmd.get_program(), "convert");
    assert_eq!(args, ["-delay", "10", "-loop", "0", "f_0000.png", "f_0001.png", "out.gif"]);
  }

  #[test]
  fn test_missing_tool() {
    let cfg = AnimationConfig { command: "nanoview-no-such-tool".into(), ..Default::default() };
    let err = assemble_gif(&frames(), Path::new("out.gif"), &cfg);
    assert!(matches!(err, Err(BuildError::Animation(msg)) if msg.contains("not found")));
  }

  #[cfg(unix)]
  #[test]
  fn test_tool_failure_is_reported() {
    let cfg = AnimationConfig { command: "false".into(), ..Default::default() };
    assert!(assemble_gif(&frames(), Path::new("out.gif"), &cfg).is_err());
  }

  #[test]
  fn test_no_frames() {
    assert!(assemble_gif(&[], Path::new("out.gif"), &AnimationConfig::default()).is_err());
  }
}
