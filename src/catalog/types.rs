//! The closed set of relationship types and their category grouping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Grouping tag on relationship types. Used for filtering and chart grouping
/// only, never for canonicalization correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeCategory {
    Family,
    Social,
    Geographic,
    Vocational,
    Action,
    Textual,
}

impl EdgeCategory {
    pub const ALL: [EdgeCategory; 6] = [
        EdgeCategory::Family,
        EdgeCategory::Social,
        EdgeCategory::Geographic,
        EdgeCategory::Vocational,
        EdgeCategory::Action,
        EdgeCategory::Textual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCategory::Family => "family",
            EdgeCategory::Social => "social/political",
            EdgeCategory::Geographic => "geographic",
            EdgeCategory::Vocational => "vocational/functional",
            EdgeCategory::Action => "action/event",
            EdgeCategory::Textual => "textual/symbolic",
        }
    }

    /// All relationship types belonging to this category.
    pub fn types(&self) -> impl Iterator<Item = EdgeType> + '_ {
        EdgeType::ALL.into_iter().filter(|t| t.category() == *self)
    }
}

impl fmt::Display for EdgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of the closed relationship type catalog.
///
/// The wire form is the kebab-case identifier used by the curation layer
/// (e.g. `parent-of`); serde and `FromStr` both use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    // Family
    ParentOf,
    ChildOf,
    AncestorOf,
    DescendantOf,
    MarriedTo,
    /// General kinship, used only when no closer relationship is cited.
    RelatedTo,

    // Social / Political
    MemberOf,
    LeaderOf,
    LedBy,
    AllyOf,
    EnemyOf,
    ContemporaryOf,
    /// Founder / source of a people, group, or role.
    OriginOf,
    /// Functional or vocational link, looser than `resident-of`.
    AssociatedWith,

    // Geographic
    ResidentOf,
    Visited,
    BornIn,
    DiedIn,
    BuriedIn,
    Near,

    // Vocational / Functional
    RoleAs,
    /// Symmetric, mutual ongoing vocational partnership.
    WorkedWith,
    /// Asymmetric, temporary or situational.
    Assisted,

    // Action-based (event / interaction), all asymmetric actor -> acted-upon
    Taught,
    LearnedFrom,
    Sent,
    ReceivedFrom,
    GaveTo,
    Blessed,
    Cursed,
    Anointed,
    Appointed,
    Judged,
    Healed,
    Persecuted,
    Saved,
    Killed,
    Created,
    Defeated,
    Promised,
    Attacked,
    Loved,

    // Textual / Symbolic
    NameMatches,
    TypeOf,
    AntitypeOf,
    ExampleOf,
    MentionedWith,
    /// Textual citation, direct or indirect.
    Cited,
}

impl EdgeType {
    pub const ALL: [EdgeType; 48] = [
        EdgeType::ParentOf,
        EdgeType::ChildOf,
        EdgeType::AncestorOf,
        EdgeType::DescendantOf,
        EdgeType::MarriedTo,
        EdgeType::RelatedTo,
        EdgeType::MemberOf,
        EdgeType::LeaderOf,
        EdgeType::LedBy,
        EdgeType::AllyOf,
        EdgeType::EnemyOf,
        EdgeType::ContemporaryOf,
        EdgeType::OriginOf,
        EdgeType::AssociatedWith,
        EdgeType::ResidentOf,
        EdgeType::Visited,
        EdgeType::BornIn,
        EdgeType::DiedIn,
        EdgeType::BuriedIn,
        EdgeType::Near,
        EdgeType::RoleAs,
        EdgeType::WorkedWith,
        EdgeType::Assisted,
        EdgeType::Taught,
        EdgeType::LearnedFrom,
        EdgeType::Sent,
        EdgeType::ReceivedFrom,
        EdgeType::GaveTo,
        EdgeType::Blessed,
        EdgeType::Cursed,
        EdgeType::Anointed,
        EdgeType::Appointed,
        EdgeType::Judged,
        EdgeType::Healed,
        EdgeType::Persecuted,
        EdgeType::Saved,
        EdgeType::Killed,
        EdgeType::Created,
        EdgeType::Defeated,
        EdgeType::Promised,
        EdgeType::Attacked,
        EdgeType::Loved,
        EdgeType::NameMatches,
        EdgeType::TypeOf,
        EdgeType::AntitypeOf,
        EdgeType::ExampleOf,
        EdgeType::MentionedWith,
        EdgeType::Cited,
    ];

    /// The kebab-case identifier stored in the database and authored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::ParentOf => "parent-of",
            EdgeType::ChildOf => "child-of",
            EdgeType::AncestorOf => "ancestor-of",
            EdgeType::DescendantOf => "descendant-of",
            EdgeType::MarriedTo => "married-to",
            EdgeType::RelatedTo => "related-to",
            EdgeType::MemberOf => "member-of",
            EdgeType::LeaderOf => "leader-of",
            EdgeType::LedBy => "led-by",
            EdgeType::AllyOf => "ally-of",
            EdgeType::EnemyOf => "enemy-of",
            EdgeType::ContemporaryOf => "contemporary-of",
            EdgeType::OriginOf => "origin-of",
            EdgeType::AssociatedWith => "associated-with",
            EdgeType::ResidentOf => "resident-of",
            EdgeType::Visited => "visited",
            EdgeType::BornIn => "born-in",
            EdgeType::DiedIn => "died-in",
            EdgeType::BuriedIn => "buried-in",
            EdgeType::Near => "near",
            EdgeType::RoleAs => "role-as",
            EdgeType::WorkedWith => "worked-with",
            EdgeType::Assisted => "assisted",
            EdgeType::Taught => "taught",
            EdgeType::LearnedFrom => "learned-from",
            EdgeType::Sent => "sent",
            EdgeType::ReceivedFrom => "received-from",
            EdgeType::GaveTo => "gave-to",
            EdgeType::Blessed => "blessed",
            EdgeType::Cursed => "cursed",
            EdgeType::Anointed => "anointed",
            EdgeType::Appointed => "appointed",
            EdgeType::Judged => "judged",
            EdgeType::Healed => "healed",
            EdgeType::Persecuted => "persecuted",
            EdgeType::Saved => "saved",
            EdgeType::Killed => "killed",
            EdgeType::Created => "created",
            EdgeType::Defeated => "defeated",
            EdgeType::Promised => "promised",
            EdgeType::Attacked => "attacked",
            EdgeType::Loved => "loved",
            EdgeType::NameMatches => "name-matches",
            EdgeType::TypeOf => "type-of",
            EdgeType::AntitypeOf => "antitype-of",
            EdgeType::ExampleOf => "example-of",
            EdgeType::MentionedWith => "mentioned-with",
            EdgeType::Cited => "cited",
        }
    }

    /// Every type belongs to exactly one category.
    pub fn category(&self) -> EdgeCategory {
        use EdgeType::*;
        match self {
            ParentOf | ChildOf | AncestorOf | DescendantOf | MarriedTo | RelatedTo => {
                EdgeCategory::Family
            }
            MemberOf | LeaderOf | LedBy | AllyOf | EnemyOf | ContemporaryOf | OriginOf
            | AssociatedWith => EdgeCategory::Social,
            ResidentOf | Visited | BornIn | DiedIn | BuriedIn | Near => EdgeCategory::Geographic,
            RoleAs | WorkedWith | Assisted => EdgeCategory::Vocational,
            Taught | LearnedFrom | Sent | ReceivedFrom | GaveTo | Blessed | Cursed | Anointed
            | Appointed | Judged | Healed | Persecuted | Saved | Killed | Created | Defeated
            | Promised | Attacked | Loved => EdgeCategory::Action,
            NameMatches | TypeOf | AntitypeOf | ExampleOf | MentionedWith | Cited => {
                EdgeCategory::Textual
            }
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = GraphError;

    /// Unknown identifiers are rejected at the boundary, never treated as an
    /// empty filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GraphError::UnknownEdgeType(s.to_string()))
    }
}
