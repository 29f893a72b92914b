// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape editing: interaction state machine and undo history.

pub mod history;
pub mod session;

pub use session::{EditorSession, Tool};
