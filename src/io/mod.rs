// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, project files and markup export.

pub mod markup;
pub mod media;
pub mod serialization;
