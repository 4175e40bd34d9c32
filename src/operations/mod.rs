//! Task operations - shared business logic layer
//!
//! The CLI and the Web API both drive tasks through [`tasks::TaskService`].

pub mod tasks;
