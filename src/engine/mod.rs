// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive mask authoring: ROI selection, mask canvas and brush.

pub mod brush;
pub mod mask_canvas;
pub mod roi_selector;

pub use brush::{BrushEngine, BrushSize, MaskSink, PaintMode, PointerButton};
pub use mask_canvas::{MaskBuffer, MaskCanvas};
pub use roi_selector::{FrameRequest, RoiSelector, SelectorState};
