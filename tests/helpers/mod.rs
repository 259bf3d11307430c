// ABOUTME: Test helper module organization
// ABOUTME: Exposes the axum oneshot request helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

#![allow(dead_code)]

/// In-process HTTP testing against axum routers
pub mod axum_test;
