use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::proto;

/// Registration state of a [`ModelVersion`](super::ModelVersion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVersionStatus {
    PendingRegistration,
    FailedRegistration,
    Ready,
}

/// Wire enum value of every status, indexed by [`ModelVersionStatus::index`].
///
/// Both directions of the mapping read this table; symbolic names come from
/// the wire enum so there is a single list of them.
const STATUS_TABLE: [(ModelVersionStatus, proto::ModelVersionStatus); 3] = [
    (
        ModelVersionStatus::PendingRegistration,
        proto::ModelVersionStatus::PendingRegistration,
    ),
    (
        ModelVersionStatus::FailedRegistration,
        proto::ModelVersionStatus::FailedRegistration,
    ),
    (ModelVersionStatus::Ready, proto::ModelVersionStatus::Ready),
];

// every status sits at its own index and no two rows share a wire code
const _: () = {
    assert!(STATUS_TABLE.len() == ModelVersionStatus::ALL.len());
    let mut i = 0;
    while i < STATUS_TABLE.len() {
        assert!(STATUS_TABLE[i].0.index() == i);
        let mut j = i + 1;
        while j < STATUS_TABLE.len() {
            assert!(STATUS_TABLE[i].1 as i32 != STATUS_TABLE[j].1 as i32);
            j += 1;
        }
        i += 1;
    }
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown model version status {0}")]
pub struct ParseStatusError(pub String);

impl ModelVersionStatus {
    pub const ALL: [ModelVersionStatus; 3] = [
        ModelVersionStatus::PendingRegistration,
        ModelVersionStatus::FailedRegistration,
        ModelVersionStatus::Ready,
    ];

    const fn index(self) -> usize {
        match self {
            ModelVersionStatus::PendingRegistration => 0,
            ModelVersionStatus::FailedRegistration => 1,
            ModelVersionStatus::Ready => 2,
        }
    }

    /// The symbolic name, e.g. `READY`.
    pub fn as_str(self) -> &'static str {
        self.to_proto().as_str_name()
    }

    pub fn to_proto(self) -> proto::ModelVersionStatus {
        STATUS_TABLE[self.index()].1
    }

    fn from_proto(wire: proto::ModelVersionStatus) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, row)| *row == wire)
            .map(|(status, _)| *status)
    }

    pub fn wire_code(self) -> i32 {
        self.to_proto() as i32
    }

    /// Look up a wire code. Unknown codes yield `None`, never a fallback status.
    pub fn from_wire_code(code: i32) -> Option<Self> {
        proto::ModelVersionStatus::try_from(code)
            .ok()
            .and_then(Self::from_proto)
    }
}

impl Default for ModelVersionStatus {
    fn default() -> Self {
        ModelVersionStatus::Ready
    }
}

impl fmt::Display for ModelVersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVersionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        proto::ModelVersionStatus::from_str_name(s)
            .and_then(Self::from_proto)
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}
