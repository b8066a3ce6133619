use tracing::info;

use super::{Node, NodeInputs, NodeValue, OutputKind, OutputSpec, ParamKind, ParamSpec};
use super::{get_image, get_int, get_str};
use crate::core::batch::{ImageBatch, batch_from_images, images_from_batch};
use crate::core::params::{
    DEFAULT_TARGET_SIZE, MAX_TARGET_SIZE, MIN_TARGET_SIZE, TARGET_SIZE_STEP, TargetSpec,
};
use crate::core::processing::resize::aspect_resize_batch;
use crate::error::{Error, Result};
use crate::types::{PadColor, ResizeMode};

/// Aspect fill (zoom + crop) or aspect fit (scale + pad) on every image of a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectResizeNode;

impl AspectResizeNode {
    /// Build the resize parameters from validated node inputs.
    pub fn target_spec(inputs: &NodeInputs) -> Result<TargetSpec> {
        let width = get_int(inputs, "width")?;
        let height = get_int(inputs, "height")?;
        let mode = get_str(inputs, "mode")?;
        let color = get_str(inputs, "padding_color")?;
        Ok(TargetSpec::new(
            u32::try_from(width).map_err(|_| Error::invalid_argument("width", width))?,
            u32::try_from(height).map_err(|_| Error::invalid_argument("height", height))?,
            ResizeMode::parse(mode).ok_or_else(|| Error::invalid_argument("mode", mode))?,
            PadColor::parse(color).ok_or_else(|| Error::invalid_argument("padding_color", color))?,
        ))
    }

    /// Resize a host batch; output keeps batch order and count.
    pub fn resize_batch(batch: &ImageBatch, spec: &TargetSpec) -> Result<ImageBatch> {
        let images = images_from_batch(batch)?;
        let resized = aspect_resize_batch(&images, spec)?;
        batch_from_images(&resized)
    }
}

fn size_param(name: &str) -> ParamSpec {
    ParamSpec::new(
        name,
        ParamKind::Int {
            default: DEFAULT_TARGET_SIZE as i64,
            min: MIN_TARGET_SIZE as i64,
            max: MAX_TARGET_SIZE as i64,
            step: TARGET_SIZE_STEP as i64,
        },
    )
}

impl Node for AspectResizeNode {
    fn name(&self) -> &'static str {
        "PapcornsAspectResize"
    }

    fn display_name(&self) -> &'static str {
        "Papcorns - Aspect Resize"
    }

    fn category(&self) -> &'static str {
        "Papcorns🍿"
    }

    fn inputs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("image", ParamKind::Image),
            size_param("width"),
            size_param("height"),
            ParamSpec::new(
                "mode",
                ParamKind::Choice {
                    choices: ResizeMode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
                    default: ResizeMode::AspectFill.as_str().to_string(),
                },
            ),
            ParamSpec::new(
                "padding_color",
                ParamKind::Choice {
                    choices: PadColor::ALL.iter().map(|c| c.as_str().to_string()).collect(),
                    default: PadColor::Black.as_str().to_string(),
                },
            ),
        ]
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![OutputSpec::new("image", OutputKind::Image)]
    }

    fn run(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>> {
        let batch = get_image(inputs, "image")?;
        let spec = Self::target_spec(inputs)?;
        info!(
            "Aspect resize: {} image(s) -> {}x{} {} ({})",
            batch.shape()[0],
            spec.target_width,
            spec.target_height,
            spec.mode,
            spec.pad_color
        );
        let out = Self::resize_batch(batch, &spec)?;
        Ok(vec![NodeValue::Image(out)])
    }
}
