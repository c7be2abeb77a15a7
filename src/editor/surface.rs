use crate::error::SurfaceError;
use std::fmt;

/// Which input surface the editor currently shows.
///
/// ```text
/// Idle --open_add--> Adding --commit/cancel--> Idle
/// Idle --select--> Editing(id) --save/cancel--> Idle
/// Editing(id) --request_delete--> ConfirmingDelete(id)
/// ConfirmingDelete(id) --cancel--> Editing(id)
/// ConfirmingDelete(id) --confirm--> Idle
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Idle,
    Adding,
    Editing { node_id: String },
    ConfirmingDelete { node_id: String },
}

impl fmt::Display for SurfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceState::Idle => write!(f, "idle"),
            SurfaceState::Adding => write!(f, "adding a node"),
            SurfaceState::Editing { node_id } => write!(f, "editing node '{}'", node_id),
            SurfaceState::ConfirmingDelete { node_id } => {
                write!(f, "confirming deletion of node '{}'", node_id)
            }
        }
    }
}

impl SurfaceState {
    /// The node currently selected for editing or deletion.
    pub fn selected(&self) -> Option<&str> {
        match self {
            SurfaceState::Editing { node_id } | SurfaceState::ConfirmingDelete { node_id } => {
                Some(node_id)
            }
            _ => None,
        }
    }

    fn reject(&self, action: &'static str) -> SurfaceError {
        SurfaceError::InvalidTransition {
            action,
            state: self.to_string(),
        }
    }

    pub fn open_add(&mut self) -> Result<(), SurfaceError> {
        match self {
            SurfaceState::Idle | SurfaceState::Adding => {
                *self = SurfaceState::Adding;
                Ok(())
            }
            _ => Err(self.reject("open the add form")),
        }
    }

    /// Selecting a node while another is being edited switches the selection.
    pub fn select(&mut self, node_id: &str) -> Result<(), SurfaceError> {
        match self {
            SurfaceState::Idle | SurfaceState::Editing { .. } => {
                *self = SurfaceState::Editing {
                    node_id: node_id.to_string(),
                };
                Ok(())
            }
            _ => Err(self.reject("select a node")),
        }
    }

    pub fn request_delete(&mut self) -> Result<String, SurfaceError> {
        match self {
            SurfaceState::Editing { node_id } => {
                let node_id = node_id.clone();
                *self = SurfaceState::ConfirmingDelete {
                    node_id: node_id.clone(),
                };
                Ok(node_id)
            }
            _ => Err(self.reject("request deletion")),
        }
    }

    /// Backs out of the innermost step: a pending deletion returns to editing,
    /// anything else returns to idle.
    pub fn cancel(&mut self) {
        *self = match std::mem::take(self) {
            SurfaceState::ConfirmingDelete { node_id } => SurfaceState::Editing { node_id },
            _ => SurfaceState::Idle,
        };
    }

    pub fn confirm_delete(&mut self) -> Result<String, SurfaceError> {
        match self {
            SurfaceState::ConfirmingDelete { node_id } => {
                let node_id = node_id.clone();
                *self = SurfaceState::Idle;
                Ok(node_id)
            }
            _ => Err(self.reject("confirm deletion")),
        }
    }

    /// Closes whatever surface is open and clears the selection.
    pub fn close(&mut self) {
        *self = SurfaceState::Idle;
    }
}
