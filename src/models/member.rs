//! Clan, member and character models.

/// A Destiny player identity.
///
/// Immutable once fetched; the roster keys members by `membership_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    /// Destiny membership ID (unique across platforms)
    pub membership_id: i64,
    /// Platform membership type, required to scope per-member queries
    pub membership_type: i32,
    /// Display name
    pub display_name: String,
}

/// A character belonging to exactly one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub character_id: i64,
}

/// A clan group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clan {
    pub group_id: i64,
    pub name: String,
}

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub has_more: bool,
}
