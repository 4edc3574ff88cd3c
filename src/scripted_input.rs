use anyhow::Context;
use emberwild_core::ItemKind;
use emberwild_world::RecipeId;
use glam::Vec3;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    look: Option<[f32; 3]>,
    #[serde(default)]
    actions: Vec<ScriptedAction>,
}

/// One-shot player action fired when its step begins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedAction {
    Interact,
    Fire,
    Cook,
    Restart,
    Craft { recipe: RecipeId },
    Consume { item: ItemKind },
}

/// What the script asks for during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    pub position: Option<Vec3>,
    pub look: Option<Vec3>,
    pub actions: Vec<ScriptedAction>,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    entered: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scripted input {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("invalid scripted input {}", path.display()))
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        if let Some(index) = file
            .steps
            .iter()
            .position(|step| !(step.duration.is_finite() && step.duration >= 0.0))
        {
            anyhow::bail!("step {index} has an invalid duration");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            entered: false,
        })
    }

    /// Every step has run to completion.
    pub fn finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Move the script forward by `dt` seconds. Actions of every step entered
    /// during this frame are returned in order.
    pub fn advance(&mut self, dt: f32) -> ScriptedFrame {
        let mut frame = ScriptedFrame::default();
        if self.finished() {
            return frame;
        }

        self.enter_current(&mut frame);
        self.time_in_step += dt.max(0.0);
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            self.index += 1;
            self.entered = false;
            if self.index < self.steps.len() {
                self.enter_current(&mut frame);
            }
        }

        frame
    }

    fn enter_current(&mut self, frame: &mut ScriptedFrame) {
        if self.entered {
            return;
        }
        self.entered = true;
        let step = &self.steps[self.index];
        if let Some([x, y, z]) = step.position {
            frame.position = Some(Vec3::new(x, y, z));
        }
        if let Some([x, y, z]) = step.look {
            frame.look = Some(Vec3::new(x, y, z));
        }
        frame.actions.extend(step.actions.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "steps": [
            { "duration": 0.5, "position": [1.0, 1.6, 2.0], "actions": [{ "action": "interact" }] },
            { "duration": 0.0, "actions": [{ "action": "craft", "recipe": "campfire" }] },
            { "duration": 1.0, "look": [1.0, 0.0, 0.0], "actions": [
                { "action": "consume", "item": "RawMeat" },
                { "action": "cook" }
            ] }
        ]
    }"#;

    #[test]
    fn actions_fire_once_when_their_step_begins() {
        let mut player = ScriptedInputPlayer::from_json(SCRIPT).unwrap();

        let first = player.advance(0.25);
        assert_eq!(first.position, Some(Vec3::new(1.0, 1.6, 2.0)));
        assert_eq!(first.actions, vec![ScriptedAction::Interact]);

        assert_eq!(player.advance(0.1), ScriptedFrame::default());

        let third = player.advance(0.2);
        assert_eq!(
            third.actions,
            vec![
                ScriptedAction::Craft {
                    recipe: RecipeId::Campfire
                },
                ScriptedAction::Consume {
                    item: ItemKind::RawMeat
                },
                ScriptedAction::Cook,
            ]
        );
        assert_eq!(third.look, Some(Vec3::X));
        assert!(!player.finished());

        player.advance(1.0);
        assert!(player.finished());
        assert_eq!(player.advance(1.0), ScriptedFrame::default());
    }

    #[test]
    fn empty_or_invalid_scripts_are_rejected() {
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [] }"#).is_err());
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [{ "duration": -1.0 }] }"#).is_err());
        assert!(ScriptedInputPlayer::from_json(
            r#"{ "steps": [{ "duration": 1.0, "actions": [{ "action": "dance" }] }] }"#
        )
        .is_err());
    }
}
