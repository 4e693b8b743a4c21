//! The live set of assembled parts.
//!
//! [`Registry`] is an arena keyed by [`PartId`]: inserts allocate a fresh id
//! from a monotone counter, so the no-duplicates invariant holds by
//! construction. Iteration follows registration order, which makes snap
//! resolution and chain extraction deterministic.
//!
//! All attach/detach bookkeeping lives here so that the adjacency invariant
//! (`a.connected_to == b` iff `a` is in `b.connected_by`) is restored before
//! any mutating method returns.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::error::{AssemblyError, AssemblyResult};
use crate::part::{Part, PartId, PartRole};

/// The registry of all assembled parts.
///
/// # Example
///
/// ```
/// use rocket_assembly::{Part, PartRole, Registry};
///
/// let mut registry = Registry::new();
/// let tank = registry.insert(Part::new(PartRole::CoreTank));
/// let engine = registry.insert(Part::new(PartRole::CoreThruster));
///
/// registry.attach(engine, tank).unwrap();
/// assert_eq!(registry.get(engine).unwrap().connected_to(), Some(tank));
/// assert_eq!(registry.get(tank).unwrap().connected_by(), &[engine]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Parts keyed by ID.
    parts: HashMap<PartId, Part>,

    /// Part IDs in registration order.
    order: Vec<PartId>,

    /// Next available part ID.
    next_id: u64,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a part and return its ID.
    ///
    /// Every insert allocates a fresh ID, so a part instance can never be
    /// registered twice.
    pub fn insert(&mut self, part: Part) -> PartId {
        let id = PartId::new(self.next_id);
        self.next_id += 1;
        self.parts.insert(id, part);
        self.order.push(id);
        debug!(%id, "part registered");
        id
    }

    /// Remove a part, severing every edge touching it first.
    ///
    /// Returns the removed part, or `None` if the ID is unknown.
    pub fn remove(&mut self, id: PartId) -> Option<Part> {
        if !self.parts.contains_key(&id) {
            return None;
        }

        self.detach(id).ok()?;
        let part = self.parts.remove(&id)?;
        self.order.retain(|&p| p != id);
        debug!(%id, "part removed");
        Some(part)
    }

    /// Drop every part. Used by scene reset and launch abort.
    pub fn clear(&mut self) {
        self.parts.clear();
        self.order.clear();
        debug!("registry cleared");
    }

    /// Get a part by ID.
    #[must_use]
    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// Get a mutable reference to a part by ID.
    pub fn get_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(&id)
    }

    /// Check whether a part is registered.
    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    /// Iterate over part IDs in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PartId> + '_ {
        self.order.iter().copied()
    }

    /// Iterate over `(id, part)` pairs in registration order.
    pub fn parts(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.order.iter().filter_map(|id| {
            self.parts.get(id).map(|part| (*id, part))
        })
    }

    /// Get the number of registered parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Find the first registered payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<PartId> {
        self.parts_with_role(PartRole::Payload).into_iter().next()
    }

    /// Find all parts with the given role, in registration order.
    #[must_use]
    pub fn parts_with_role(&self, role: PartRole) -> Vec<PartId> {
        self.parts()
            .filter(|(_, part)| part.role() == role)
            .map(|(id, _)| id)
            .collect()
    }

    /// Lock every part, freezing the assembly for launch.
    pub fn lock_all(&mut self) {
        for part in self.parts.values_mut() {
            part.set_locked(true);
        }
        debug!("all parts locked");
    }

    // =========================================================================
    // Connection bookkeeping
    // =========================================================================

    /// Point `id`'s outgoing edge at `other`, replacing any previous edge.
    ///
    /// Mirrors the back-reference on both the old and the new partner. If `id`
    /// is a payload that is already connected to a different part, the
    /// attachment is refused and the existing connection is kept; the refusal
    /// is logged and reported as `Ok(false)`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::PartNotFound`] if either ID is unknown.
    pub fn attach(&mut self, id: PartId, other: PartId) -> AssemblyResult<bool> {
        if !self.parts.contains_key(&id) {
            return Err(AssemblyError::PartNotFound { id });
        }
        if !self.parts.contains_key(&other) {
            return Err(AssemblyError::PartNotFound { id: other });
        }
        if id == other {
            warn!(%id, "refusing self-attachment");
            return Ok(false);
        }

        let (role, current) = {
            let part = &self.parts[&id];
            (part.role(), part.connected_to)
        };

        if role == PartRole::Payload
            && let Some(existing) = current
            && existing != other
        {
            warn!(%id, %existing, %other, "payload already connected; attachment refused");
            return Ok(false);
        }

        if let Some(old) = current
            && old != other
        {
            if let Some(old_part) = self.parts.get_mut(&old) {
                old_part.connected_by.retain(|&b| b != id);
            }
            debug!(%id, %old, "previous connection released");
        }

        if let Some(part) = self.parts.get_mut(&id) {
            part.connected_to = Some(other);
        }
        if let Some(partner) = self.parts.get_mut(&other)
            && !partner.connected_by.contains(&id)
        {
            partner.connected_by.push(id);
        }

        debug!(%id, %other, "parts attached");
        Ok(true)
    }

    /// Sever every edge touching `id`, leaving it isolated.
    ///
    /// Clears the outgoing edge (and the partner's back-reference) and clears
    /// the outgoing edge of every part pointing at `id`. Detaching an already
    /// isolated part is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::PartNotFound`] if the ID is unknown.
    pub fn detach(&mut self, id: PartId) -> AssemblyResult<()> {
        if !self.parts.contains_key(&id) {
            return Err(AssemblyError::PartNotFound { id });
        }

        let outgoing = self
            .parts
            .get_mut(&id)
            .and_then(|part| part.connected_to.take());
        if let Some(partner) = outgoing
            && let Some(partner_part) = self.parts.get_mut(&partner)
        {
            partner_part.connected_by.retain(|&b| b != id);
        }

        let incoming = self
            .parts
            .get_mut(&id)
            .map(|part| std::mem::take(&mut part.connected_by))
            .unwrap_or_default();
        for by in incoming {
            if let Some(by_part) = self.parts.get_mut(&by)
                && by_part.connected_to == Some(id)
            {
                by_part.connected_to = None;
            }
        }

        debug!(%id, "part detached");
        Ok(())
    }

    /// Check the adjacency invariant over the whole registry.
    ///
    /// True iff every outgoing edge has a matching back-reference and every
    /// back-reference has a matching outgoing edge. Diagnostic only; the
    /// mutating methods maintain this themselves.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        for (id, part) in self.parts() {
            if let Some(other) = part.connected_to {
                let Some(partner) = self.get(other) else {
                    return false;
                };
                if !partner.connected_by.contains(&id) {
                    return false;
                }
            }
            for &by in part.connected_by() {
                let Some(by_part) = self.get(by) else {
                    return false;
                };
                if by_part.connected_to != Some(id) {
                    return false;
                }
            }
        }
        true
    }
}
