//! Text emitters for translated animations.
//!
//! Emitters only append to string buffers; attaching the buffers to the
//! document is the driver's job.

pub mod css;
pub mod script;

use super::OutputMode;
use super::model::AnimationModel;

/// Generated text for one document.
#[derive(Debug, Default)]
pub struct EmitBuffers {
    /// Content for the `<style>` container.
    pub style: String,
    /// Content for the `<script>` container.
    pub script: String,
    /// Set once anything has been written to `style`.
    pub needs_style: bool,
    /// Set once anything has been written to `script`.
    pub needs_script: bool,
}

impl EmitBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the output of one animation in the given mode.
    ///
    /// Motion side rules are CSS in both modes.
    pub fn push(&mut self, model: &AnimationModel, mode: OutputMode) {
        if let Some(motion) = &model.motion {
            css::write_motion_rule(&mut self.style, &model.target_id, motion);
            self.needs_style = true;
        }

        match mode {
            OutputMode::Css => {
                css::write_animation(&mut self.style, model);
                self.needs_style = true;
            }
            OutputMode::Script => {
                script::write_animation(&mut self.script, model);
                self.needs_script = true;
            }
        }
    }
}
