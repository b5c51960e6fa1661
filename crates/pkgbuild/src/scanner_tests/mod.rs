// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner tests split by declaration shape.

#[macro_use]
mod macros;

mod arrays;
mod basic;
mod errors;
mod functions;
mod heredoc;
mod modes;
mod positions;
