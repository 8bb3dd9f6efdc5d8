//! Camera state of side-by-side 3D subplots kept in sync.
//!
//! Rotating one subplot rotates the other one the same way, zooming one subplot applies
//! the same axes limits to the other one.
use crate::config::ViewAngles;

/// Axis range (lower, upper)
pub type Limits = (f64, f64);

/// View state of a 3D subplot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Elevation in degrees
    pub elev: f64,
    /// Azimuth in degrees
    pub azim: f64,
    /// x axis limits
    pub xlim: Limits,
    /// y axis limits
    pub ylim: Limits,
    /// z axis limits
    pub zlim: Limits,
}

impl ViewState {
    /// View with given camera angles over given axes limits
    pub fn new(angles: ViewAngles, xlim: Limits, ylim: Limits, zlim: Limits) -> Self {
        ViewState {
            elev: angles.elev,
            azim: angles.azim,
            xlim,
            ylim,
            zlim,
        }
    }

    /// Pitch in radians as expected by 3D projections
    pub fn pitch(&self) -> f64 {
        self.elev.to_radians()
    }

    /// Yaw in radians as expected by 3D projections
    pub fn yaw(&self) -> f64 {
        self.azim.to_radians()
    }
}

/// Subplot of a linked pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// Left subplot
    Left,
    /// Right subplot
    Right,
}

/// Mouse button held during a pointer move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Button bound to rotation
    Rotate,
    /// Button bound to zoom
    Zoom,
}

/// Pointer move notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Subplot under the pointer if any
    pub over: Option<Panel>,
    /// Button pressed if any
    pub button: Option<Button>,
}

/// Two subplots views mirrored on pointer moves
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkedViews {
    /// Left subplot view
    pub left: ViewState,
    /// Right subplot view
    pub right: ViewState,
}

impl LinkedViews {
    /// Links two views, the right one takes the left one camera and limits
    pub fn new(left: ViewState, right: ViewState) -> Self {
        let mut views = LinkedViews { left, right };
        views.on_move(PointerEvent {
            over: Some(Panel::Left),
            button: Some(Button::Rotate),
        });
        views.on_move(PointerEvent {
            over: Some(Panel::Left),
            button: Some(Button::Zoom),
        });
        views
    }

    /// Mirrors the view under the pointer onto the other one.
    ///
    /// Returns whether a view changed and subplots have to be redrawn.
    pub fn on_move(&mut self, event: PointerEvent) -> bool {
        let (Some(panel), Some(button)) = (event.over, event.button) else {
            return false;
        };
        let (src, dst) = match panel {
            Panel::Left => (self.left, &mut self.right),
            Panel::Right => (self.right, &mut self.left),
        };
        let before = *dst;
        match button {
            Button::Rotate => {
                dst.elev = src.elev;
                dst.azim = src.azim;
            }
            Button::Zoom => {
                dst.xlim = src.xlim;
                dst.ylim = src.ylim;
                dst.zlim = src.zlim;
            }
        }
        before != *dst
    }

    /// View of the given subplot
    pub fn view(&self, panel: Panel) -> &ViewState {
        match panel {
            Panel::Left => &self.left,
            Panel::Right => &self.right,
        }
    }

    /// Mutable view of the given subplot, as changed by user interaction
    pub fn view_mut(&mut self, panel: Panel) -> &mut ViewState {
        match panel {
            Panel::Left => &mut self.left,
            Panel::Right => &mut self.right,
        }
    }
}
