//! Git command objects.
//!
//! Each command is a small data type implementing [`VcsCommand`]: it builds an
//! argument list and interprets git's output, while [`GitApplication`] performs the
//! actual process I/O.

pub mod add;
pub mod application;
pub mod branch;
pub mod checkout;
pub mod clean;
pub mod command;
pub mod commit;
pub mod diff;
pub mod init;
pub mod reset;
pub mod rev_parse;
pub mod status;
pub mod symbolic_ref;

pub use add::{Add, AddTarget};
pub use application::{GitApplication, Launcher, SystemLauncher};
pub use branch::{Branch, BranchEntry, GetBranches};
pub use checkout::Checkout;
pub use clean::{Clean, CleanTarget};
pub use command::VcsCommand;
pub use commit::Commit;
pub use diff::Diff;
pub use init::Init;
pub use reset::{Reset, ResetMode};
pub use rev_parse::{RevParse, RevParseQuery};
pub use status::Status;
pub use symbolic_ref::SymbolicRef;
