// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the areamap application.

pub mod canvas;
pub mod markup;
pub mod properties;
pub mod toolbar;
