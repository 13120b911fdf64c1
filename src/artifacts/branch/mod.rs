pub mod branch_name;

/// Branches are flat files under `branches/`, so in addition to the usual
/// forbidden patterns the separator `/` is rejected outright.
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\.\.|\.lock$|@\{|/|[\x00-\x20\*:\?\[\\~\^\x7f]";
