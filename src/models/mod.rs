// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: shapes, colours and project files.

pub mod palette;
pub mod project;
pub mod shape;
