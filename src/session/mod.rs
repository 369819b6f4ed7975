//! Editing session: the single owner of a layout and its view state.
//!
//! All edits go through [`Command`]s, each of which produces a new [`Layout`]
//! snapshot recorded in a bounded [`History`]. Dragging is the exception
//! while it is in progress: positions are updated live on every pointer move
//! and recorded once when the drag ends.

mod history;
mod layout;

pub use history::History;
pub use layout::{Command, Layout, Outcome};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::math::{Camera, Point2};
use crate::operations::{FindBestSnap, SnapResult, TakeoffResult};
use crate::part::{Connector, GroupId, PartId};

/// A drag in progress.
#[derive(Debug, Clone)]
struct DragState {
    target: PartId,
    group: GroupId,
    start: Point2,
    initial: Vec<(PartId, Point2)>,
    moved: bool,
}

/// An interactive editing session.
#[derive(Debug, Clone)]
pub struct Session {
    layout: Layout,
    selection: Option<PartId>,
    camera: Camera,
    history: History,
    config: SessionConfig,
    drag: Option<DragState>,
}

impl Default for Session {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            layout: Layout::new(),
            selection: None,
            camera: Camera::default(),
            history: History::new(Layout::new(), config.history_limit),
            config,
            drag: None,
        }
    }
}

impl Session {
    /// Creates a session with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: History::new(Layout::new(), config.history_limit),
            config,
            ..Self::default()
        })
    }

    /// Starts a session from a previously saved layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_layout(layout: Layout, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: History::new(layout.clone(), config.history_limit),
            layout,
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn selection(&self) -> Option<PartId> {
        self.selection
    }

    /// Selects a part, or clears the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn select(&mut self, part: Option<PartId>) -> Result<()> {
        if let Some(id) = part {
            self.layout.parts.part(id)?;
        }
        self.selection = part;
        Ok(())
    }

    /// Applies a command and records the result in the history.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag is in progress or the command cannot be
    /// applied; the session is left unchanged in both cases.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        if self.drag.is_some() {
            return Err(SessionError::DragInProgress.into());
        }
        let (next, outcome) = self.layout.apply(&command, &self.config)?;
        self.layout = next;
        self.history.record(&self.layout);
        tracing::info!(command = command.name(), ?outcome, "layout changed");

        match outcome {
            Outcome::PartAdded(id) => self.selection = Some(id),
            Outcome::PartDeleted { part, .. } if self.selection == Some(part) => {
                self.selection = None;
            }
            Outcome::Cleared => self.selection = None,
            _ => {}
        }
        Ok(outcome)
    }

    /// Applies a command built from the selected part.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or the command fails.
    pub fn execute_on_selection(
        &mut self,
        build: impl FnOnce(PartId) -> Command,
    ) -> Result<Outcome> {
        let id = self.selection.ok_or(SessionError::NothingSelected)?;
        self.execute(build(id))
    }

    /// Restores the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        let layout = self.history.undo().ok_or(SessionError::NothingToUndo)?.clone();
        self.restore(layout);
        Ok(())
    }

    /// Re-applies the next snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        let layout = self.history.redo().ok_or(SessionError::NothingToRedo)?.clone();
        self.restore(layout);
        Ok(())
    }

    fn restore(&mut self, layout: Layout) {
        self.layout = layout;
        self.drag = None;
        if let Some(id) = self.selection {
            if !self.layout.parts.contains(id) {
                self.selection = None;
            }
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Starts dragging the topmost part under `world`, selecting it.
    ///
    /// The whole rigid group of the picked part follows the drag. Returns the
    /// picked part, or `None` (clearing the selection) if nothing was hit.
    pub fn begin_drag(&mut self, world: Point2) -> Option<PartId> {
        let Some(hit) = self.layout.pick(&world) else {
            self.selection = None;
            self.drag = None;
            return None;
        };
        let (target, group) = (hit.id, hit.group_id);
        let initial = self
            .layout
            .parts
            .iter()
            .filter(|p| p.group_id == group)
            .map(|p| (p.id, p.position))
            .collect();
        self.selection = Some(target);
        self.drag = Some(DragState {
            target,
            group,
            start: world,
            initial,
            moved: false,
        });
        tracing::debug!(part = ?target, "drag started");
        Some(target)
    }

    /// Moves the dragged group so the pointer is at `world`, snapping onto a
    /// nearby connector when one is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if no drag is in progress.
    pub fn drag_to(&mut self, world: Point2) -> Result<SnapResult> {
        let drag = self.drag.as_mut().ok_or(SessionError::NoActiveDrag)?;
        let raw = world - drag.start;

        for (id, initial) in &drag.initial {
            if let Ok(part) = self.layout.parts.part_mut(*id) {
                part.position = *initial;
            }
        }
        let snap = FindBestSnap::new(drag.group, raw)
            .with_config(&self.config.snap, self.camera.zoom)
            .execute(self.layout.parts.iter());

        let delta = raw + snap.delta();
        for (id, initial) in &drag.initial {
            if let Ok(part) = self.layout.parts.part_mut(*id) {
                part.position = *initial + delta;
            }
        }
        drag.moved = true;
        Ok(snap)
    }

    /// Finishes the drag, recording one history entry if anything moved.
    ///
    /// # Errors
    ///
    /// Returns an error if no drag is in progress.
    pub fn end_drag(&mut self) -> Result<()> {
        let drag = self.drag.take().ok_or(SessionError::NoActiveDrag)?;
        if drag.moved {
            self.history.record(&self.layout);
            tracing::info!(part = ?drag.target, "drag committed");
        }
        Ok(())
    }

    /// Abandons the drag and puts the group back where it started.
    ///
    /// # Errors
    ///
    /// Returns an error if no drag is in progress.
    pub fn cancel_drag(&mut self) -> Result<()> {
        let drag = self.drag.take().ok_or(SessionError::NoActiveDrag)?;
        for (id, initial) in drag.initial {
            if let Ok(part) = self.layout.parts.part_mut(id) {
                part.position = initial;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Computes the material takeoff of the current layout.
    #[must_use]
    pub fn takeoff(&self) -> TakeoffResult {
        self.layout.takeoff(&self.config)
    }

    /// Returns the world-space connectors of a part.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn connectors(&self, part: PartId) -> Result<Vec<Connector>> {
        Ok(self.layout.parts.part(part)?.connectors())
    }

    /// Resolves every dimension against the current layout.
    #[must_use]
    pub fn dimension_points(&self) -> Vec<Option<(Point2, Point2)>> {
        self.layout.dimension_points()
    }
}
