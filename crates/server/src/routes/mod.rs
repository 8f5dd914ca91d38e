// Copyright 2025 Alexandre D. Díaz
pub mod bank;
pub mod hello;
