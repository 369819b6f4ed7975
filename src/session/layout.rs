use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::dimension::{Anchor, Dimension};
use crate::error::{Result, SessionError};
use crate::math::{Point2, Vector2};
use crate::operations::{Takeoff, TakeoffResult};
use crate::part::{DuctPart, GroupId, PartId, PartKind, PartStore, PartTemplate};

/// An editing command against a [`Layout`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Places a new part in a group of its own.
    AddPart(PartTemplate),
    /// Places a new part in an existing rigid group.
    AddToGroup {
        template: PartTemplate,
        group: GroupId,
    },
    /// Moves the whole group of `part` by `delta`.
    MovePart { part: PartId, delta: Vector2 },
    /// Rotates one part by the configured step.
    RotatePart(PartId),
    FlipPart(PartId),
    /// Nudges a part off its joints and gives it a group of its own.
    DisconnectPart(PartId),
    /// Changes the length of a `Straight` part.
    SetStraightLength { part: PartId, length: f64 },
    /// Removes a part and every dimension attached to it.
    DeletePart(PartId),
    /// Adds a dimension measuring the current distance between two anchors.
    AddDimension { p1: Anchor, p2: Anchor },
    DeleteDimension(usize),
    /// Edits the value of a dimension that spans the ends of one straight,
    /// resizing that straight to match.
    SetDimensionValue { index: usize, value: f64 },
    /// Removes every part and dimension.
    Clear,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPart(_) => "add-part",
            Self::AddToGroup { .. } => "add-to-group",
            Self::MovePart { .. } => "move-part",
            Self::RotatePart(_) => "rotate-part",
            Self::FlipPart(_) => "flip-part",
            Self::DisconnectPart(_) => "disconnect-part",
            Self::SetStraightLength { .. } => "set-straight-length",
            Self::DeletePart(_) => "delete-part",
            Self::AddDimension { .. } => "add-dimension",
            Self::DeleteDimension(_) => "delete-dimension",
            Self::SetDimensionValue { .. } => "set-dimension-value",
            Self::Clear => "clear",
        }
    }
}

/// What a successfully applied [`Command`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PartAdded(PartId),
    PartChanged(PartId),
    PartDeleted {
        part: PartId,
        dimensions_removed: usize,
    },
    DimensionAdded(usize),
    DimensionDeleted(usize),
    Cleared,
}

/// The editable document: parts and the dimensions placed on them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub(crate) parts: PartStore,
    dimensions: Vec<Dimension>,
}

impl Layout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn parts(&self) -> &PartStore {
        &self.parts
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Applies `command` and returns the resulting layout, leaving `self`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the command references a missing part, group or
    /// dimension, or targets a part of the wrong kind.
    pub fn apply(&self, command: &Command, config: &SessionConfig) -> Result<(Self, Outcome)> {
        let mut next = self.clone();
        let outcome = next.apply_in_place(command, config)?;
        Ok((next, outcome))
    }

    fn apply_in_place(&mut self, command: &Command, config: &SessionConfig) -> Result<Outcome> {
        let outcome = match command {
            Command::AddPart(template) => {
                if template.kind == PartKind::Unknown {
                    tracing::warn!("adding a part of unknown kind");
                }
                Outcome::PartAdded(self.parts.add(template.clone()))
            }
            Command::AddToGroup { template, group } => {
                Outcome::PartAdded(self.parts.add_to_group(template.clone(), *group)?)
            }
            Command::MovePart { part, delta } => {
                let group = self.parts.part(*part)?.group_id;
                self.parts.translate_group(group, delta);
                Outcome::PartChanged(*part)
            }
            Command::RotatePart(part) => {
                self.parts.part_mut(*part)?.rotate_by(config.rotate_step_deg);
                Outcome::PartChanged(*part)
            }
            Command::FlipPart(part) => {
                self.parts.part_mut(*part)?.flip();
                Outcome::PartChanged(*part)
            }
            Command::DisconnectPart(part) => {
                let offset = Vector2::new(config.disconnect_offset, config.disconnect_offset);
                self.parts.part_mut(*part)?.translate(&offset);
                self.parts.detach(*part)?;
                Outcome::PartChanged(*part)
            }
            Command::SetStraightLength { part, length } => {
                let target = self.parts.part_mut(*part)?;
                match &mut target.kind {
                    PartKind::Straight { length: current } => *current = *length,
                    other => {
                        return Err(SessionError::WrongKind {
                            command: "set-straight-length",
                            expected: "Straight",
                            actual: other.name(),
                        }
                        .into())
                    }
                }
                Outcome::PartChanged(*part)
            }
            Command::DeletePart(part) => {
                self.parts.remove(*part)?;
                let before = self.dimensions.len();
                self.dimensions.retain(|d| !d.references(*part));
                Outcome::PartDeleted {
                    part: *part,
                    dimensions_removed: before - self.dimensions.len(),
                }
            }
            Command::AddDimension { p1, p2 } => {
                let dim = Dimension::measured(*p1, *p2, self.parts.iter()).ok_or_else(|| {
                    let missing = if self.parts.contains(p1.part) {
                        p2.part
                    } else {
                        p1.part
                    };
                    SessionError::PartNotFound(format!("{missing:?}"))
                })?;
                self.dimensions.push(dim);
                Outcome::DimensionAdded(self.dimensions.len() - 1)
            }
            Command::DeleteDimension(index) => {
                if *index >= self.dimensions.len() {
                    return Err(SessionError::DimensionNotFound(*index).into());
                }
                self.dimensions.remove(*index);
                Outcome::DimensionDeleted(*index)
            }
            Command::SetDimensionValue { index, value } => {
                if !value.is_finite() || *value <= 0.0 {
                    return Err(SessionError::InvalidValue {
                        parameter: "dimension value",
                        value: *value,
                    }
                    .into());
                }
                let dim = self
                    .dimensions
                    .get(*index)
                    .copied()
                    .ok_or(SessionError::DimensionNotFound(*index))?;
                let part = dim
                    .straight_span(self.parts.iter())
                    .ok_or(SessionError::NotAStraightSpan(*index))?;
                if let PartKind::Straight { length } = &mut self.parts.part_mut(part)?.kind {
                    *length = *value;
                }
                if let Some(dim) = self.dimensions.get_mut(*index) {
                    dim.value = *value;
                }
                Outcome::PartChanged(part)
            }
            Command::Clear => {
                self.parts.clear();
                self.dimensions.clear();
                Outcome::Cleared
            }
        };
        Ok(outcome)
    }

    /// Returns the topmost part under `world`, if any.
    #[must_use]
    pub fn pick(&self, world: &Point2) -> Option<&DuctPart> {
        self.parts.iter().rev().find(|p| p.contains_point(world))
    }

    /// Computes the material takeoff of the current parts.
    #[must_use]
    pub fn takeoff(&self, config: &SessionConfig) -> TakeoffResult {
        Takeoff::new(config.takeoff).execute(self.parts.iter())
    }

    /// Resolves every dimension to its current endpoints.
    ///
    /// Dimensions whose parts are gone yield `None` and should be skipped.
    #[must_use]
    pub fn dimension_points(&self) -> Vec<Option<(Point2, Point2)>> {
        self.dimensions
            .iter()
            .map(|d| d.endpoints(self.parts.iter()))
            .collect()
    }
}
