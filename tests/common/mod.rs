//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::TestRepoBuilder;
pub use self::git::{
    add_git_remote, create_test_commit, current_branch_of, is_git_available, setup_git_repo,
};
