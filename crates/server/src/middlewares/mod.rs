// Copyright 2025 Alexandre D. Díaz
pub mod error_pages;
