//! restnest-sync - Prepares Postman globals for RESTNEST workspace sync.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── prep          # Default command: prepare working globals
//! │   ├── status        # Show what the last run prepared
//! │   ├── prompt        # Developer key prompt
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── context       # Repository name + task from git
//!     ├── credentials   # Admin vs developer key resolution
//!     ├── merge         # Globals merge and workspace classification
//!     ├── prep          # Sequential run orchestration
//!     ├── snapshot      # Postman globals documents
//!     ├── state         # Run-state record
//!     ├── secrets       # Local secret store
//!     ├── cloud         # Cloud secret manager lookup
//!     ├── git           # Git introspection
//!     └── config        # restnest.toml
//! ```
//!
//! # Run
//!
//! 1. Derive `restnest-openapi-<domain>` and the task identifier from git.
//! 2. Resolve the admin key (local store or cloud) and the developer key
//!    (carried over, prompted, or the admin key on main runs).
//! 3. Copy the globals template, fill the recognized keys, write it for the
//!    collection runner.

pub mod cli;
pub mod core;
pub mod error;
