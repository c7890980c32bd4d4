//! Per-repository outcome enumeration

/// Status enum representing the result of mirroring one repository
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    /// Repository was cloned and its remotes reproduced
    Cloned,
    /// Repository was skipped (detached HEAD, unresolvable branch)
    Skip,
    /// An error occurred while cloning or rewriting remotes
    Error,
}

impl Status {
    /// Returns the emoji symbol for this status
    pub fn symbol(&self) -> &str {
        match self {
            Status::Cloned => "🟢",
            Status::Skip => "🟠",
            Status::Error => "🔴",
        }
    }

    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            Status::Cloned => "cloned",
            Status::Skip => "skip",
            Status::Error => "failed",
        }
    }
}
