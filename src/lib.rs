// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project
#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod bootinfo;
pub mod env;
pub mod fb;
pub mod font;
pub mod pattern;
pub mod report;
pub mod screen;
pub mod text;
