//! Team member model and trait implementations.

use serde::{Deserialize, Serialize};

use crate::projection::{assigned_id, Writable};
use crate::traits::{Create, Delete, Get, List, Resource};

/// Membership of a user in a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Server-assigned ID of the membership.
    #[serde(rename = "PERMISSION_ID", default)]
    pub permission_id: u64,

    #[serde(rename = "TEAM_ID", default)]
    pub team_id: u64,

    #[serde(rename = "MEMBER_USER_ID", default)]
    pub member_user_id: u64,
}

impl TeamMember {
    pub fn new(team_id: u64, member_user_id: u64) -> Self {
        Self {
            permission_id: 0,
            team_id,
            member_user_id,
        }
    }
}

/// The fields of a [`TeamMember`] accepted by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberWrite {
    #[serde(rename = "PERMISSION_ID", default, skip_serializing_if = "Option::is_none")]
    pub permission_id: Option<u64>,
    #[serde(rename = "TEAM_ID")]
    pub team_id: u64,
    #[serde(rename = "MEMBER_USER_ID")]
    pub member_user_id: u64,
}

impl Writable for TeamMember {
    type Projection = TeamMemberWrite;

    fn to_projection(&self) -> TeamMemberWrite {
        TeamMemberWrite {
            permission_id: assigned_id(self.permission_id),
            team_id: self.team_id,
            member_user_id: self.member_user_id,
        }
    }

    fn merge_projection(&mut self, p: TeamMemberWrite) {
        if let Some(id) = p.permission_id {
            self.permission_id = id;
        }
        self.team_id = p.team_id;
        self.member_user_id = p.member_user_id;
    }
}

impl Resource for TeamMember {
    const ENTITY_TYPE: &'static str = "TeamMember";
    const PATH: &'static str = "TeamMembers";
    type Id = u64;
}

impl Get for TeamMember {}

impl List for TeamMember {
    const PAGE_SIZE: u32 = 500;
}

impl Create for TeamMember {}

impl Delete for TeamMember {}
