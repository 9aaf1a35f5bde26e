use crate::foundation::error::{SnowballError, SnowballResult};
use crate::render::surface::Surface;

/// Draw-session state: either idle or drawing into exactly one target surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawSession {
    /// No target; draw calls fail.
    #[default]
    Idle,
    /// Draw calls write into `target`.
    Drawing {
        /// Current draw target.
        target: Surface,
    },
}

impl DrawSession {
    pub(crate) fn begin(&mut self, target: Surface) -> SnowballResult<()> {
        match self {
            Self::Idle => {
                *self = Self::Drawing { target };
                Ok(())
            }
            Self::Drawing { .. } => Err(SnowballError::invalid_operation("already drawing")),
        }
    }

    pub(crate) fn end(&mut self) -> SnowballResult<Surface> {
        match *self {
            Self::Drawing { target } => {
                *self = Self::Idle;
                Ok(target)
            }
            Self::Idle => Err(SnowballError::invalid_operation("not drawing")),
        }
    }

    /// Current target, or `None` when idle.
    pub fn target(&self) -> Option<Surface> {
        match *self {
            Self::Drawing { target } => Some(target),
            Self::Idle => None,
        }
    }

    pub(crate) fn require_target(&self) -> SnowballResult<Surface> {
        self.target()
            .ok_or_else(|| SnowballError::invalid_operation("not drawing"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
