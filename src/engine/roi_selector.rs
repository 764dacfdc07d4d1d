// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-rectangle ROI selection over a displayed video frame.
//!
//! Pointer positions arrive in screen space together with the rectangle
//! the frame is currently drawn in; the selector maps them to frame pixels
//! itself, so every candidate lies inside the frame.

use crate::error::ValidationError;
use crate::models::Roi;
use crate::util::geometry::{self, DisplayRect, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorState {
    Idle,
    Dragging { start: Point },
    Selected,
}

/// A frame fetch issued by the scrub control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    pub seq: u64,
    pub time: f64,
}

#[derive(Debug, Clone)]
pub struct RoiSelector {
    frame_size: Size,
    state: SelectorState,
    candidate: Option<Roi>,
    next_frame_seq: u64,
    applied_frame_seq: Option<u64>,
}

impl RoiSelector {
    /// Selector for a video of the given pixel size.
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_size: Size::from_pixels(frame_width, frame_height),
            state: SelectorState::Idle,
            candidate: None,
            next_frame_seq: 0,
            applied_frame_seq: None,
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn candidate(&self) -> Option<Roi> {
        self.candidate
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectorState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, screen: Point, element: DisplayRect) {
        if self.is_dragging() {
            return;
        }
        let start = geometry::to_image_space(screen, element, self.frame_size);
        self.state = SelectorState::Dragging { start };
        self.candidate = None;
    }

    pub fn pointer_move(&mut self, screen: Point, element: DisplayRect) {
        if let SelectorState::Dragging { start } = self.state {
            let current = geometry::to_image_space(screen, element, self.frame_size);
            self.candidate = Some(Roi::from_corners(start, current));
        }
    }

    /// Ends the drag; the candidate is kept but not committed.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            self.state = if self.candidate.is_some() {
                SelectorState::Selected
            } else {
                SelectorState::Idle
            };
        }
    }

    pub fn can_confirm(&self) -> bool {
        !self.is_dragging() && self.candidate.is_some_and(|roi| roi.meets_minimum())
    }

    /// Validated candidate, ready to commit to the session.
    pub fn confirm(&self) -> Result<Roi, ValidationError> {
        let roi = self
            .candidate
            .ok_or(ValidationError::RoiTooSmall { min: crate::models::roi::MIN_ROI_SIZE })?;
        roi.validate(self.frame_size.width as u32, self.frame_size.height as u32)?;
        Ok(roi)
    }

    pub fn clear(&mut self) {
        self.state = SelectorState::Idle;
        self.candidate = None;
    }

    /// Start a frame fetch for a new scrub position. The drag state is
    /// left alone.
    pub fn request_frame(&mut self, time: f64) -> FrameRequest {
        self.next_frame_seq += 1;
        FrameRequest {
            seq: self.next_frame_seq,
            time,
        }
    }

    /// Whether a fetched frame should replace the displayed one. Responses
    /// older than the last applied one are dropped.
    pub fn accept_frame(&mut self, seq: u64) -> bool {
        if self.applied_frame_seq.is_some_and(|applied| seq <= applied) {
            return false;
        }
        self.applied_frame_seq = Some(seq);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> DisplayRect {
        // 1920x1080 frame shown at half size
        DisplayRect::new(Point::new(0.0, 0.0), Size::new(960.0, 540.0))
    }

    fn drag(selector: &mut RoiSelector, from: (f64, f64), to: (f64, f64)) {
        selector.pointer_down(Point::new(from.0, from.1), element());
        selector.pointer_move(Point::new(to.0, to.1), element());
        selector.pointer_up();
    }

    #[test]
    fn test_drag_produces_frame_space_roi() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (100.0, 50.0), (150.0, 80.0));

        assert_eq!(selector.state(), SelectorState::Selected);
        assert_eq!(selector.candidate(), Some(Roi::new(200, 100, 100, 60)));
        assert!(selector.can_confirm());
        assert_eq!(selector.confirm(), Ok(Roi::new(200, 100, 100, 60)));
    }

    #[test]
    fn test_drag_up_and_left() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (150.0, 80.0), (100.0, 50.0));
        assert_eq!(selector.candidate(), Some(Roi::new(200, 100, 100, 60)));
    }

    #[test]
    fn test_drag_past_edge_stays_in_frame() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (900.0, 500.0), (2000.0, 9000.0));

        let roi = selector.candidate().unwrap();
        assert_eq!(roi, Roi::new(1800, 1000, 120, 80));
        assert!(roi.fits_within(1920, 1080));
        assert!(selector.confirm().is_ok());
    }

    #[test]
    fn test_small_selection_cannot_confirm() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (10.0, 10.0), (11.0, 40.0));

        assert_eq!(selector.candidate(), Some(Roi::new(20, 20, 2, 60)));
        assert!(!selector.can_confirm());
        assert!(selector.confirm().is_err());
    }

    #[test]
    fn test_new_drag_clears_previous_selection() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (10.0, 10.0), (100.0, 100.0));

        selector.pointer_down(Point::new(300.0, 300.0), element());
        assert!(selector.is_dragging());
        assert_eq!(selector.candidate(), None);
        assert!(!selector.can_confirm());
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut selector = RoiSelector::new(1920, 1080);
        drag(&mut selector, (10.0, 10.0), (100.0, 100.0));
        selector.clear();

        assert_eq!(selector.state(), SelectorState::Idle);
        assert_eq!(selector.candidate(), None);
    }

    #[test]
    fn test_click_without_move_returns_to_idle() {
        let mut selector = RoiSelector::new(640, 480);
        selector.pointer_down(Point::new(5.0, 5.0), element());
        selector.pointer_up();
        assert_eq!(selector.state(), SelectorState::Idle);
    }

    #[test]
    fn test_frame_swap_keeps_drag() {
        let mut selector = RoiSelector::new(1920, 1080);
        selector.pointer_down(Point::new(10.0, 10.0), element());

        let request = selector.request_frame(2.5);
        assert!(selector.accept_frame(request.seq));

        assert!(selector.is_dragging());
        selector.pointer_move(Point::new(60.0, 60.0), element());
        assert_eq!(selector.candidate(), Some(Roi::new(20, 20, 100, 100)));
    }

    #[test]
    fn test_stale_frames_are_dropped() {
        let mut selector = RoiSelector::new(1920, 1080);
        let first = selector.request_frame(1.0);
        let second = selector.request_frame(2.0);

        assert!(selector.accept_frame(second.seq));
        assert!(!selector.accept_frame(first.seq));
    }
}
