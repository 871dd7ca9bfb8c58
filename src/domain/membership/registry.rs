//! Membership registry - the lifecycle state machine.
//!
//! Owns every membership record and the owner → active membership index,
//! and keeps them consistent:
//!
//! - **Single active membership**: an owner's index entry is absent or points
//!   at an active record owned by that owner.
//! - **Ownership consistency**: every active record is indexed under its owner.
//! - **Temporal validity**: `expires_at > issued_at` for every record.
//!
//! Every mutating operation validates all of its preconditions before it
//! touches state, so a failed call leaves no trace: no id consumed, no
//! index entry written, no event queued.
//!
//! Events are queued on the registry and collected with
//! [`MembershipRegistry::take_events`] by the caller that holds the lock.
//!
//! Revocation destroys the record; expiry only deactivates it and leaves
//! it queryable. Expired records may still be revoked.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Capability, EventId, Identity, MembershipId, Timestamp};
use crate::ports::{CapabilityChecker, Clock, OperationalGate};

use super::{
    Membership, MembershipError, MembershipEvent, MembershipStatus, RevocationReason, Tier,
    TierValidity,
};

/// Read model returned by [`MembershipRegistry::membership_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipInfo {
    pub membership_id: MembershipId,
    pub tier: Tier,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
    pub status: MembershipStatus,
    pub issuer: Identity,
    pub owner: Identity,
    pub metadata_ref: String,

    /// `now >= expires_at`, independent of `active`.
    pub expired: bool,
}

/// Read model returned by [`MembershipRegistry::active_membership`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMembership {
    /// `MembershipId::NONE` when the owner has no active membership.
    pub membership_id: MembershipId,
    pub tier: Option<Tier>,
    pub expires_at: Option<Timestamp>,

    /// Active and not yet past expiry.
    pub valid: bool,
}

impl ActiveMembership {
    /// The sentinel shape for an owner without an active membership.
    pub fn none() -> Self {
        Self {
            membership_id: MembershipId::NONE,
            tier: None,
            expires_at: None,
            valid: false,
        }
    }
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReceipt {
    pub membership_id: MembershipId,
    pub expires_at: Timestamp,

    /// The recipient's previous active membership, now destroyed.
    pub superseded: Option<MembershipId>,
}

/// Result of a custody transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub membership_id: MembershipId,

    /// True if the membership became the recipient's active membership.
    pub activated: bool,

    /// The recipient's previous active membership, now destroyed.
    pub superseded: Option<MembershipId>,
}

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Ids handed out so far.
    pub issued_total: u64,

    /// Records not yet destroyed.
    pub live_records: u64,

    /// Owners with an active membership.
    pub active_memberships: u64,

    /// Records deactivated by expiry and still queryable.
    pub expired_records: u64,
}

/// The membership registry.
pub struct MembershipRegistry {
    next_id: MembershipId,
    memberships: BTreeMap<MembershipId, Membership>,
    active_membership_of: HashMap<Identity, MembershipId>,
    tier_validity: TierValidity,
    capabilities: Arc<dyn CapabilityChecker>,
    gate: Arc<dyn OperationalGate>,
    clock: Arc<dyn Clock>,
    pending_events: Vec<MembershipEvent>,
}

impl MembershipRegistry {
    /// Create an empty registry with the given tier durations and collaborators.
    pub fn new(
        tier_validity: TierValidity,
        capabilities: Arc<dyn CapabilityChecker>,
        gate: Arc<dyn OperationalGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            next_id: MembershipId::FIRST,
            memberships: BTreeMap::new(),
            active_membership_of: HashMap::new(),
            tier_validity,
            capabilities,
            gate,
            clock,
            pending_events: Vec::new(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Commands
    // ════════════════════════════════════════════════════════════════════════

    /// Issue a membership to `recipient`, superseding any active one it holds.
    ///
    /// `custom_expiry` is in Unix seconds. `None` or `Some(0)` means "use the
    /// tier default".
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not an issuer
    /// - `NotOperational` if the registry is paused
    /// - `ZeroRecipient` if `recipient` is null
    /// - `InvalidExpiry` if the custom expiry is unrepresentable or not
    ///   strictly in the future
    pub fn issue(
        &mut self,
        caller: &Identity,
        recipient: &Identity,
        tier: Tier,
        custom_expiry: Option<i64>,
        metadata_ref: impl Into<String>,
    ) -> Result<IssueReceipt, MembershipError> {
        self.require(caller, Capability::Issuer)?;
        self.require_operational()?;
        if recipient.is_null() {
            return Err(MembershipError::zero_recipient());
        }

        let now = self.clock.now();
        let expires_at = match custom_expiry {
            None | Some(0) => now
                .checked_plus_secs(self.tier_validity.get(tier))
                .ok_or_else(|| MembershipError::invalid_expiry(now.as_unix_secs(), now))?,
            Some(secs) => Timestamp::try_from_unix_secs(secs)
                .ok_or_else(|| MembershipError::invalid_expiry(secs, now))?,
        };

        let id = self.next_id;
        let membership = Membership::issue(
            id,
            tier,
            recipient.clone(),
            caller.clone(),
            now,
            expires_at,
            metadata_ref,
        )?;

        let superseded = match self.active_id_of(recipient) {
            Some(previous) => {
                self.destroy(previous, RevocationReason::SupersededByIssue, now)?;
                Some(previous)
            }
            None => None,
        };

        self.next_id = id.next();
        self.active_membership_of.insert(recipient.clone(), id);
        self.pending_events.push(MembershipEvent::BadgeIssued {
            event_id: EventId::new(),
            membership_id: id,
            recipient: recipient.clone(),
            issuer: caller.clone(),
            tier,
            issued_at: now,
            expires_at,
            metadata_ref: membership.metadata_ref.clone(),
        });
        self.memberships.insert(id, membership);

        Ok(IssueReceipt {
            membership_id: id,
            expires_at,
            superseded,
        })
    }

    /// Revoke and destroy a membership, active or expired.
    ///
    /// Returns the record as it was before destruction.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not an issuer
    /// - `NotOperational` if the registry is paused
    /// - `NotFound` if the id does not exist or was already destroyed
    pub fn revoke(
        &mut self,
        caller: &Identity,
        id: MembershipId,
    ) -> Result<Membership, MembershipError> {
        self.require(caller, Capability::Issuer)?;
        self.require_operational()?;
        if !self.memberships.contains_key(&id) {
            return Err(MembershipError::not_found(id));
        }

        let now = self.clock.now();
        self.destroy(id, RevocationReason::Revoked, now)
    }

    /// Deactivate a membership whose expiry has passed. Permissionless.
    ///
    /// Returns true if this call deactivated it; false if it was already
    /// inactive or is not yet due.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist or was destroyed.
    pub fn check_and_expire(&mut self, id: MembershipId) -> Result<bool, MembershipError> {
        let now = self.clock.now();
        let membership = self
            .memberships
            .get_mut(&id)
            .ok_or_else(|| MembershipError::not_found(id))?;

        if !membership.is_active() || !membership.is_expired_at(now) {
            return Ok(false);
        }

        membership.expire()?;
        let owner = membership.owner.clone();
        let expires_at = membership.expires_at;

        if self.active_membership_of.get(&owner) == Some(&id) {
            self.active_membership_of.remove(&owner);
        }
        self.pending_events.push(MembershipEvent::BadgeExpired {
            event_id: EventId::new(),
            membership_id: id,
            owner,
            expires_at,
            occurred_at: now,
        });

        Ok(true)
    }

    /// Apply a custody change reported by the ownership ledger.
    ///
    /// The sender loses active status for this membership. If the membership
    /// is active it becomes the recipient's active membership, destroying
    /// any different one the recipient held. An inactive membership only
    /// changes owner.
    ///
    /// # Errors
    ///
    /// - `ZeroRecipient` if `to` is null
    /// - `InvalidTransfer` if `from` is null, equals `to`, or is not the recorded owner
    /// - `NotOperational` if the registry is paused
    /// - `NotFound` if the id does not exist or was destroyed
    pub fn on_transfer(
        &mut self,
        from: &Identity,
        to: &Identity,
        id: MembershipId,
    ) -> Result<TransferReceipt, MembershipError> {
        if to.is_null() {
            return Err(MembershipError::zero_recipient());
        }
        if from.is_null() {
            return Err(MembershipError::invalid_transfer(
                id,
                "sender is the null identity",
            ));
        }
        if from == to {
            return Err(MembershipError::invalid_transfer(
                id,
                "sender and recipient are the same identity",
            ));
        }
        self.require_operational()?;

        let membership = self
            .memberships
            .get(&id)
            .ok_or_else(|| MembershipError::not_found(id))?;
        if &membership.owner != from {
            return Err(MembershipError::invalid_transfer(
                id,
                format!("recorded owner is {}, not {}", membership.owner, from),
            ));
        }
        let activated = membership.is_active();
        let now = self.clock.now();

        let superseded = match self.active_id_of(to) {
            Some(previous) if activated && previous != id => {
                self.destroy(previous, RevocationReason::SupersededByTransfer, now)?;
                Some(previous)
            }
            _ => None,
        };

        if self.active_membership_of.get(from) == Some(&id) {
            self.active_membership_of.remove(from);
        }
        if activated {
            self.active_membership_of.insert(to.clone(), id);
        }
        if let Some(membership) = self.memberships.get_mut(&id) {
            membership.transfer_to(to.clone());
        }

        Ok(TransferReceipt {
            membership_id: id,
            activated,
            superseded,
        })
    }

    /// Change the default validity of a tier for future issuances.
    ///
    /// Returns the previous duration in seconds.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not an admin
    /// - `InvalidDuration` if `duration_secs` is not positive
    pub fn set_tier_validity(
        &mut self,
        caller: &Identity,
        tier: Tier,
        duration_secs: i64,
    ) -> Result<u64, MembershipError> {
        self.require(caller, Capability::Admin)?;
        let previous = self.tier_validity.set(tier, duration_secs)?;

        self.pending_events.push(MembershipEvent::TierValidityUpdated {
            event_id: EventId::new(),
            tier,
            previous_secs: previous,
            new_secs: self.tier_validity.get(tier),
            updated_by: caller.clone(),
            occurred_at: self.clock.now(),
        });

        Ok(previous)
    }

    /// Drain the events queued by completed operations, oldest first.
    pub fn take_events(&mut self) -> Vec<MembershipEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Queries
    // ════════════════════════════════════════════════════════════════════════

    /// Describe a membership. Does not deactivate it if expired.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist or was destroyed.
    pub fn membership_info(&self, id: MembershipId) -> Result<MembershipInfo, MembershipError> {
        let membership = self
            .memberships
            .get(&id)
            .ok_or_else(|| MembershipError::not_found(id))?;
        let now = self.clock.now();

        Ok(MembershipInfo {
            membership_id: membership.id,
            tier: membership.tier,
            issued_at: membership.issued_at,
            expires_at: membership.expires_at,
            active: membership.is_active(),
            status: membership.status,
            issuer: membership.issuer.clone(),
            owner: membership.owner.clone(),
            metadata_ref: membership.metadata_ref.clone(),
            expired: membership.is_expired_at(now),
        })
    }

    /// The owner's active membership, or the sentinel shape if none.
    pub fn active_membership(&self, owner: &Identity) -> ActiveMembership {
        let Some(membership) = self
            .active_id_of(owner)
            .and_then(|id| self.memberships.get(&id))
        else {
            return ActiveMembership::none();
        };

        ActiveMembership {
            membership_id: membership.id,
            tier: Some(membership.tier),
            expires_at: Some(membership.expires_at),
            valid: membership.is_valid_at(self.clock.now()),
        }
    }

    /// True if the owner holds an active, unexpired membership.
    pub fn has_valid_membership(&self, owner: &Identity) -> bool {
        self.active_membership(owner).valid
    }

    /// Current default validity for a tier, in seconds.
    pub fn tier_validity(&self, tier: Tier) -> u64 {
        self.tier_validity.get(tier)
    }

    /// The whole tier validity table.
    pub fn tier_validities(&self) -> TierValidity {
        self.tier_validity
    }

    /// The id the next issuance will receive.
    pub fn next_id(&self) -> MembershipId {
        self.next_id
    }

    /// Borrow a stored record.
    pub fn membership(&self, id: MembershipId) -> Option<&Membership> {
        self.memberships.get(&id)
    }

    /// Active memberships whose expiry has passed, lowest id first.
    pub fn due_for_expiry(&self, limit: usize) -> Vec<MembershipId> {
        let now = self.clock.now();
        self.memberships
            .values()
            .filter(|m| m.is_active() && m.is_expired_at(now))
            .map(|m| m.id)
            .take(limit)
            .collect()
    }

    /// Registry-wide counters.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            issued_total: self.next_id.value() - 1,
            live_records: self.memberships.len() as u64,
            active_memberships: self.active_membership_of.len() as u64,
            expired_records: self
                .memberships
                .values()
                .filter(|m| m.status == MembershipStatus::Expired)
                .count() as u64,
        }
    }

    /// Describe every violated invariant. Empty when the registry is consistent.
    pub fn consistency_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for (owner, id) in &self.active_membership_of {
            match self.memberships.get(id) {
                None => violations.push(format!("{} points at missing membership {}", owner, id)),
                Some(m) if !m.is_active() => {
                    violations.push(format!("{} points at inactive membership {}", owner, id))
                }
                Some(m) if &m.owner != owner => violations.push(format!(
                    "{} points at membership {} owned by {}",
                    owner, id, m.owner
                )),
                Some(_) => {}
            }
        }

        for membership in self.memberships.values() {
            if membership.expires_at <= membership.issued_at {
                violations.push(format!("membership {} expires before issuance", membership.id));
            }
            if membership.id >= self.next_id || membership.id.is_none() {
                violations.push(format!("membership {} has an unassigned id", membership.id));
            }
            if membership.is_active()
                && self.active_membership_of.get(&membership.owner) != Some(&membership.id)
            {
                violations.push(format!(
                    "active membership {} is not indexed under {}",
                    membership.id, membership.owner
                ));
            }
        }

        violations
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internals
    // ════════════════════════════════════════════════════════════════════════

    fn require(&self, caller: &Identity, capability: Capability) -> Result<(), MembershipError> {
        if self.capabilities.has_capability(caller, capability) {
            Ok(())
        } else {
            Err(MembershipError::unauthorized(caller.clone(), capability))
        }
    }

    fn require_operational(&self) -> Result<(), MembershipError> {
        if self.gate.is_operational() {
            Ok(())
        } else {
            Err(MembershipError::not_operational())
        }
    }

    fn active_id_of(&self, owner: &Identity) -> Option<MembershipId> {
        self.active_membership_of.get(owner).copied()
    }

    /// Revoke, unindex and remove a record, queueing `BadgeRevoked`.
    fn destroy(
        &mut self,
        id: MembershipId,
        reason: RevocationReason,
        now: Timestamp,
    ) -> Result<Membership, MembershipError> {
        let membership = self
            .memberships
            .get_mut(&id)
            .ok_or_else(|| MembershipError::not_found(id))?;
        membership.revoke()?;

        let owner = membership.owner.clone();
        if self.active_membership_of.get(&owner) == Some(&id) {
            self.active_membership_of.remove(&owner);
        }
        let destroyed = self
            .memberships
            .remove(&id)
            .ok_or_else(|| MembershipError::not_found(id))?;

        self.pending_events.push(MembershipEvent::BadgeRevoked {
            event_id: EventId::new(),
            membership_id: id,
            owner,
            reason,
            occurred_at: now,
        });

        Ok(destroyed)
    }
}
