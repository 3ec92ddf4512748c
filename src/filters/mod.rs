use crate::model::{Cluster, Province, SeatResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod predicate;

pub use predicate::FilterEngine;

/// Viewer-supplied filter. Every empty set (and `disputed_only == false`)
/// leaves its criterion unconstrained, so the default spec matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub winner_parties: BTreeSet<String>,
    pub runner_up_parties: BTreeSet<String>,
    pub provinces: BTreeSet<Province>,
    pub seat_labels: BTreeSet<String>,
    pub disputed_only: bool,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.winner_parties.is_empty()
            && self.runner_up_parties.is_empty()
            && self.provinces.is_empty()
            && self.seat_labels.is_empty()
            && !self.disputed_only
    }

    pub fn winners<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.winner_parties = parties.into_iter().map(Into::into).collect();
        self
    }

    pub fn runners_up<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner_up_parties = parties.into_iter().map(Into::into).collect();
        self
    }

    pub fn provinces<I>(mut self, provinces: I) -> Self
    where
        I: IntoIterator<Item = Province>,
    {
        self.provinces = provinces.into_iter().collect();
        self
    }

    pub fn seat_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seat_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn disputed_only(mut self, disputed_only: bool) -> Self {
        self.disputed_only = disputed_only;
        self
    }
}

/// What a filter is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum FilterTarget<'a> {
    Seat(&'a SeatResult),
    Cluster(&'a Cluster),
}
