//! Constraint match and indictment bookkeeping.

use std::collections::{BTreeMap, HashMap};

use scoreforge_core::score::Score;
use scoreforge_core::ConstraintRef;

use crate::api::analysis::{ConstraintMatch, ConstraintMatchTotal, EntityRef, Indictment, MatchId};

struct Owner {
    constraint: ConstraintRef,
    entities: Vec<EntityRef>,
}

pub(super) struct MatchTracker<Sc: Score> {
    zero: Sc,
    next_id: u64,
    totals: BTreeMap<ConstraintRef, ConstraintMatchTotal<Sc>>,
    indictments: HashMap<EntityRef, Indictment<Sc>>,
    owners: HashMap<MatchId, Owner>,
}

impl<Sc: Score> MatchTracker<Sc> {
    pub(super) fn new(zero: Sc) -> Self {
        Self {
            zero,
            next_id: 0,
            totals: BTreeMap::new(),
            indictments: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    pub(super) fn add_match(
        &mut self,
        constraint: &ConstraintRef,
        weight: &Sc,
        score: Sc,
        justifications: Vec<EntityRef>,
    ) -> MatchId {
        let id = MatchId(self.next_id);
        self.next_id += 1;

        // An entity justifying a match twice is indicted once.
        let mut entities: Vec<EntityRef> = Vec::with_capacity(justifications.len());
        for entity in &justifications {
            if !entities.contains(entity) {
                entities.push(entity.clone());
            }
        }

        let constraint_match = ConstraintMatch {
            id,
            constraint_ref: constraint.clone(),
            score,
            justifications,
        };
        for entity in &entities {
            self.indictments
                .entry(entity.clone())
                .or_insert_with(|| Indictment::new(entity.clone(), self.zero.clone()))
                .add_match(constraint_match.clone());
        }
        self.totals
            .entry(constraint.clone())
            .or_insert_with(|| ConstraintMatchTotal::new(constraint.clone(), weight.clone()))
            .add_match(constraint_match);

        self.owners.insert(
            id,
            Owner {
                constraint: constraint.clone(),
                entities,
            },
        );
        id
    }

    pub(super) fn remove_match(&mut self, id: MatchId) {
        let Some(owner) = self.owners.remove(&id) else {
            return;
        };
        if let Some(total) = self.totals.get_mut(&owner.constraint) {
            total.remove_match(id);
            if total.match_count() == 0 {
                self.totals.remove(&owner.constraint);
            }
        }
        for entity in &owner.entities {
            if let Some(indictment) = self.indictments.get_mut(entity) {
                indictment.remove_match(id);
                if indictment.match_count() == 0 {
                    self.indictments.remove(entity);
                }
            }
        }
    }

    pub(super) fn totals(&self) -> impl Iterator<Item = &ConstraintMatchTotal<Sc>> {
        self.totals.values()
    }

    pub(super) fn total(&self, constraint: &ConstraintRef) -> Option<&ConstraintMatchTotal<Sc>> {
        self.totals.get(constraint)
    }

    pub(super) fn indictments(&self) -> impl Iterator<Item = &Indictment<Sc>> {
        self.indictments.values()
    }

    pub(super) fn indictment(&self, entity: &EntityRef) -> Option<&Indictment<Sc>> {
        self.indictments.get(entity)
    }
}
