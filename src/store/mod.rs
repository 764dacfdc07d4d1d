// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

pub mod persist;
pub mod state;
pub mod view;

pub use persist::PersistedState;
pub use state::{Action, AppState, MAX_HISTORY};
pub use view::{derive_view, AppView};
