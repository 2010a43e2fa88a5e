// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handler modules for processing bot events.

pub mod callback;
pub mod dispatch;

pub use callback::CallbackAction;
pub use dispatch::{Command, EventDispatcher, Inbound, Sender};
